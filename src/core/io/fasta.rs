//! FASTA readers for the Ensembl/UniProt sequence datasets.

use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::error::DatasetError;

/// Extract the record key from a FASTA header (without the leading `>`).
/// Drivers pick the extractor matching their dataset's header dialect.
pub type Accession = fn(&str) -> String;

/// Ensembl headers: `>ENST00000335137.4 cds chromosome:...`. The key is the
/// first token with its version suffix stripped.
pub fn ensembl_accession(header: &str) -> String {
    let token = header.split_whitespace().next().unwrap_or("");
    token.split('.').next().unwrap_or("").to_string()
}

/// UniProt headers: `>sp|P12345|NAME_HUMAN ...`. The key is the accession
/// between the first two pipes; headers without pipes fall back to the
/// first token.
pub fn uniprot_accession(header: &str) -> String {
    let token = header.split_whitespace().next().unwrap_or("");
    let mut parts = token.split('|');
    match (parts.next(), parts.next()) {
        (Some(_), Some(accession)) => accession.to_string(),
        _ => token.to_string(),
    }
}

/// Read a (possibly gzipped) FASTA file into an accession -> sequence map.
/// Sequences are uppercased; later records under the same key win.
pub fn read_fasta(path: &Path, accession: Accession) -> Result<HashMap<String, String>, DatasetError> {
    let reader = BufReader::new(super::open(path)?);

    let mut records = HashMap::new();
    let mut current: Option<String> = None;
    let mut sequence = String::new();
    for line in reader.lines() {
        let line = line.map_err(|x| DatasetError::io(path, x))?;
        if let Some(header) = line.strip_prefix('>') {
            if let Some(key) = current.take() {
                records.insert(key, std::mem::take(&mut sequence));
            }
            let key = accession(header);
            if key.is_empty() {
                return Err(DatasetError::malformed(path, format!("unkeyed FASTA header: >{}", header)));
            }
            current = Some(key);
        } else if current.is_some() {
            sequence.push_str(line.trim().to_ascii_uppercase().as_str());
        }
    }
    if let Some(key) = current {
        records.insert(key, sequence);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_fixture(content: &str, gz: bool) -> tempfile::NamedTempFile {
        let suffix = if gz { ".fa.gz" } else { ".fa" };
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        if gz {
            let mut encoder =
                flate2::write::GzEncoder::new(file.as_file_mut(), flate2::Compression::fast());
            encoder.write_all(content.as_bytes()).unwrap();
            encoder.finish().unwrap();
        } else {
            file.write_all(content.as_bytes()).unwrap();
        }
        file
    }

    #[test]
    fn accessions() {
        assert_eq!(ensembl_accession("ENST00000335137.4 cds chromosome:GRCh38"), "ENST00000335137");
        assert_eq!(uniprot_accession("sp|P12345|AATM_RABIT Aspartate aminotransferase"), "P12345");
        assert_eq!(uniprot_accession("P12345 bare accession"), "P12345");
    }

    #[test]
    fn reads_plain_and_gzipped() {
        let content = ">ENST00000001.2 cds\natgaaa\nGCC\n>ENST00000002.1 cds\nTTT\n";
        for gz in [false, true] {
            let file = write_fixture(content, gz);
            let records = read_fasta(file.path(), ensembl_accession).unwrap();
            assert_eq!(records.len(), 2);
            assert_eq!(records["ENST00000001"], "ATGAAAGCC");
            assert_eq!(records["ENST00000002"], "TTT");
        }
    }

    #[test]
    fn rejects_unkeyed_header() {
        let file = write_fixture(">\nAAA\n", false);
        assert!(matches!(
            read_fasta(file.path(), ensembl_accession),
            Err(DatasetError::Malformed { .. })
        ));
    }
}
