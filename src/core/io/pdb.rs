//! Minimal PDB reader: enough of the ATOM records to place residues in
//! space and derive a contact index.

use std::collections::{BTreeMap, HashMap};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::assemble::StructureView;
use crate::core::contacts::ContactIndex;
use crate::core::error::{DatasetError, TranscriptError};

/// One residue reduced to what scoring needs: identity plus a representative
/// sidechain coordinate (CB, falling back to CA for glycine and incomplete
/// sidechains).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Residue {
    pub name: char,
    ca: Option<[f64; 3]>,
    cb: Option<[f64; 3]>,
}

impl Residue {
    pub fn representative(&self) -> Option<[f64; 3]> {
        self.cb.or(self.ca)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Chain {
    residues: BTreeMap<i64, Residue>,
}

impl Chain {
    pub fn residue(&self, seq_num: i64) -> Option<&Residue> {
        self.residues.get(&seq_num)
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&i64, &Residue)> {
        self.residues.iter()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Structure {
    chains: BTreeMap<char, Chain>,
}

impl Structure {
    pub fn chain(&self, id: char) -> Option<&Chain> {
        self.chains.get(&id)
    }

    pub fn chains(&self) -> impl Iterator<Item = (&char, &Chain)> {
        self.chains.iter()
    }
}

fn three_to_one(name: &str) -> char {
    match name {
        "ALA" => 'A',
        "ARG" => 'R',
        "ASN" => 'N',
        "ASP" => 'D',
        "CYS" => 'C',
        "GLN" => 'Q',
        "GLU" => 'E',
        "GLY" => 'G',
        "HIS" => 'H',
        "ILE" => 'I',
        "LEU" => 'L',
        "LYS" => 'K',
        "MET" => 'M',
        "PHE" => 'F',
        "PRO" => 'P',
        "SER" => 'S',
        "THR" => 'T',
        "TRP" => 'W',
        "TYR" => 'Y',
        "VAL" => 'V',
        _ => 'X',
    }
}

fn field(line: &str, range: std::ops::Range<usize>) -> &str {
    line.get(range).unwrap_or("").trim()
}

/// Parse the first model of a PDB file. HETATM records and alternate
/// locations other than blank/`A` are ignored.
pub fn parse_pdb(path: &Path) -> Result<Structure, DatasetError> {
    let reader = BufReader::new(super::open(path)?);

    let mut structure = Structure::default();
    for line in reader.lines() {
        let line = line.map_err(|x| DatasetError::io(path, x))?;
        if line.starts_with("ENDMDL") {
            break;
        }
        if !line.starts_with("ATOM  ") {
            continue;
        }
        let alt_loc = line.as_bytes().get(16).copied().unwrap_or(b' ');
        if alt_loc != b' ' && alt_loc != b'A' {
            continue;
        }

        let atom_name = field(&line, 12..16);
        if atom_name != "CA" && atom_name != "CB" {
            continue;
        }
        let res_name = field(&line, 17..20);
        let chain_id = line.as_bytes().get(21).copied().unwrap_or(b' ') as char;
        let seq_num: i64 = field(&line, 22..26)
            .parse()
            .map_err(|_| DatasetError::malformed(path, format!("bad residue number in {:?}", line)))?;
        let coords: [f64; 3] = {
            let parse = |range: std::ops::Range<usize>| {
                field(&line, range)
                    .parse::<f64>()
                    .map_err(|_| DatasetError::malformed(path, format!("bad coordinates in {:?}", line)))
            };
            [parse(30..38)?, parse(38..46)?, parse(46..54)?]
        };

        let residue = structure
            .chains
            .entry(chain_id)
            .or_default()
            .residues
            .entry(seq_num)
            .or_insert(Residue { name: three_to_one(res_name), ca: None, cb: None });
        match atom_name {
            "CA" if residue.ca.is_none() => residue.ca = Some(coords),
            "CB" if residue.cb.is_none() => residue.cb = Some(coords),
            _ => {}
        }
    }
    Ok(structure)
}

fn distance2(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// Reduce a parsed structure to the [`StructureView`] of one chain.
///
/// Contacts are residue pairs whose representative atoms lie within `radius`
/// angstrom. With `multimer`, residues of the other chains also count as
/// neighbors of the target chain, identified by their own residue numbers
/// (the homo-oligomer convention where every chain shares the numbering).
pub fn structure_view(
    structure: &Structure,
    uniprot_id: &str,
    pdb_id: &str,
    chain_id: char,
    radius: f64,
    multimer: bool,
) -> Result<StructureView, TranscriptError> {
    let chain = structure
        .chain(chain_id)
        .filter(|chain| !chain.is_empty())
        .ok_or_else(|| TranscriptError::NoStructure { id: uniprot_id.to_owned() })?;

    let radius2 = radius * radius;
    let target: Vec<(i64, [f64; 3])> = chain
        .iter()
        .filter_map(|(&num, residue)| residue.representative().map(|point| (num, point)))
        .collect();

    let mut pairs = Vec::new();
    for (i, &(a, pa)) in target.iter().enumerate() {
        for &(b, pb) in &target[i + 1..] {
            if distance2(pa, pb) <= radius2 {
                pairs.push((a, b));
            }
        }
    }
    if multimer {
        for (&other_id, other) in structure.chains() {
            if other_id == chain_id {
                continue;
            }
            for (&b, residue) in other.iter() {
                let pb = match residue.representative() {
                    Some(point) => point,
                    None => continue,
                };
                for &(a, pa) in &target {
                    if distance2(pa, pb) <= radius2 {
                        pairs.push((a, b));
                    }
                }
            }
        }
    }

    let residues: HashMap<i64, char> = chain.iter().map(|(&num, residue)| (num, residue.name)).collect();
    Ok(StructureView::new(
        Some(pdb_id.to_owned()),
        Some(chain_id.to_string()),
        residues,
        ContactIndex::from_pairs(pairs),
    ))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn atom(serial: u32, name: &str, res: &str, chain: char, seq: i64, x: f64) -> String {
        format!(
            "ATOM  {:>5} {:<4} {:<3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00           C\n",
            serial, name, res, chain, seq, x, 0.0, 0.0
        )
    }

    fn fixture() -> tempfile::NamedTempFile {
        let mut content = String::new();
        // Chain A: three residues on a line, 4 A apart (CB where present).
        content.push_str(&atom(1, "CA", "MET", 'A', 1, 0.0));
        content.push_str(&atom(2, "CB", "MET", 'A', 1, 0.5));
        content.push_str(&atom(3, "CA", "GLY", 'A', 2, 4.5));
        content.push_str(&atom(4, "CA", "ALA", 'A', 3, 9.0));
        content.push_str(&atom(5, "CB", "ALA", 'A', 3, 8.5));
        // Chain B: one residue near A/1.
        content.push_str(&atom(6, "CA", "LYS", 'B', 7, 1.0));
        let mut file = tempfile::Builder::new().suffix(".pdb").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_residues_and_representative_atoms() {
        let file = fixture();
        let structure = parse_pdb(file.path()).unwrap();
        let chain = structure.chain('A').unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.residue(1).unwrap().name, 'M');
        // CB wins over CA when present.
        assert_eq!(chain.residue(1).unwrap().representative(), Some([0.5, 0.0, 0.0]));
        assert_eq!(chain.residue(2).unwrap().representative(), Some([4.5, 0.0, 0.0]));
        assert_eq!(structure.chain('B').unwrap().len(), 1);
        assert!(structure.chain('C').is_none());
    }

    #[test]
    fn contacts_within_radius() {
        let file = fixture();
        let structure = parse_pdb(file.path()).unwrap();
        let view = structure_view(&structure, "P1", "1abc", 'A', 5.0, false).unwrap();
        // 1-2 at 4.0 A and 2-3 at 4.0 A are in contact; 1-3 at 8.0 A is not.
        assert_eq!(view.neighbors(1), &[2]);
        assert_eq!(view.neighbors(2), &[1, 3]);
        assert_eq!(view.residue(3), Some('A'));
        assert_eq!(view.pdb_id.as_deref(), Some("1abc"));
    }

    #[test]
    fn multimer_adds_interchain_neighbors() {
        let file = fixture();
        let structure = parse_pdb(file.path()).unwrap();
        let view = structure_view(&structure, "P1", "1abc", 'A', 5.0, true).unwrap();
        // B/7 sits 0.5 A from A/1's CB.
        assert_eq!(view.neighbors(1), &[2, 7]);
        let without = structure_view(&structure, "P1", "1abc", 'A', 5.0, false).unwrap();
        assert_eq!(without.neighbors(1), &[2]);
    }

    #[test]
    fn missing_chain_is_no_structure() {
        let file = fixture();
        let structure = parse_pdb(file.path()).unwrap();
        let err = structure_view(&structure, "P1", "1abc", 'Z', 5.0, false).unwrap_err();
        assert!(matches!(err, TranscriptError::NoStructure { .. }));
    }
}
