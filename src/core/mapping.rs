use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;

/// Bidirectional lookup between 1-based peptide positions and structural
/// residue numbers. Both directions are partial: residues unresolved in the
/// structure and peptide positions outside the mapped range answer `None`.
#[cfg_attr(test, automock)]
pub trait PositionMapper {
    fn to_structure(&self, peptide: usize) -> Option<i64>;
    fn to_peptide(&self, residue: i64) -> Option<usize>;
}

/// Peptide position == residue number, the convention of structures predicted
/// directly from the full-length sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityMapper;

impl PositionMapper for IdentityMapper {
    fn to_structure(&self, peptide: usize) -> Option<i64> {
        Some(peptide as i64)
    }

    fn to_peptide(&self, residue: i64) -> Option<usize> {
        usize::try_from(residue).ok().filter(|&x| x > 0)
    }
}

/// Residue-level mapping from a SIFTS-style alignment between a UniProt
/// sequence and a PDB chain.
#[derive(Clone, Debug, Default)]
pub struct SiftsMapper {
    to_structure: HashMap<usize, i64>,
    to_peptide: HashMap<i64, usize>,
}

impl SiftsMapper {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, i64)>) -> Self {
        let mut mapper = SiftsMapper::default();
        for (peptide, residue) in pairs {
            mapper.to_structure.insert(peptide, residue);
            mapper.to_peptide.insert(residue, peptide);
        }
        mapper
    }

    pub fn is_empty(&self) -> bool {
        self.to_structure.is_empty()
    }

    pub fn len(&self) -> usize {
        self.to_structure.len()
    }
}

impl PositionMapper for SiftsMapper {
    fn to_structure(&self, peptide: usize) -> Option<i64> {
        self.to_structure.get(&peptide).copied()
    }

    fn to_peptide(&self, residue: i64) -> Option<usize> {
        self.to_peptide.get(&residue).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_round_trips() {
        let mapper = IdentityMapper;
        assert_eq!(mapper.to_structure(7), Some(7));
        assert_eq!(mapper.to_peptide(7), Some(7));
        // Structural numbering can be zero or negative; neither is a
        // valid peptide position.
        assert_eq!(mapper.to_peptide(0), None);
        assert_eq!(mapper.to_peptide(-2), None);
    }

    #[test]
    fn sifts_maps_both_directions() {
        let mapper = SiftsMapper::from_pairs([(1, 24), (2, 25), (10, 33)]);
        assert_eq!(mapper.to_structure(1), Some(24));
        assert_eq!(mapper.to_peptide(33), Some(10));
        assert_eq!(mapper.to_structure(3), None);
        assert_eq!(mapper.to_peptide(26), None);
        assert_eq!(mapper.len(), 3);
    }
}
