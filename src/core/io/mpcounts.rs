//! Transcript-level observed/expected variant totals, the calibration table
//! behind the weighted null model.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::DatasetError;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct MutationCounts {
    pub syn_obs: u32,
    pub mis_obs: u32,
    pub syn_exp: f64,
    pub mis_exp: f64,
}

/// TSV table `enst_id / syn_obs / mis_obs / syn_exp / mis_exp`, keyed by
/// unversioned ENST id.
#[derive(Debug, Default)]
pub struct MutationCountsTable {
    records: HashMap<String, MutationCounts>,
}

#[derive(Deserialize)]
struct Row {
    enst_id: String,
    syn_obs: u32,
    mis_obs: u32,
    syn_exp: f64,
    mis_exp: f64,
}

impl MutationCountsTable {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new().delimiter(b'\t').from_reader(super::open(path)?);
        let mut records = HashMap::new();
        for row in reader.deserialize() {
            let row: Row = row.map_err(|x| DatasetError::malformed(path, x.to_string()))?;
            let counts = MutationCounts {
                syn_obs: row.syn_obs,
                mis_obs: row.mis_obs,
                syn_exp: row.syn_exp,
                mis_exp: row.mis_exp,
            };
            records.insert(row.enst_id, counts);
        }
        Ok(MutationCountsTable { records })
    }

    pub fn get(&self, enst_id: &str) -> Option<MutationCounts> {
        self.records.get(enst_id).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_table() {
        let fixture = "enst_id\tsyn_obs\tmis_obs\tsyn_exp\tmis_exp\n\
                       ENST00000001\t104\t260\t98.5\t271.25\n\
                       ENST00000002\t0\t3\t1.1\t2.9\n";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(fixture.as_bytes()).unwrap();

        let table = MutationCountsTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        let counts = table.get("ENST00000001").unwrap();
        assert_eq!(counts.syn_obs, 104);
        assert_eq!(counts.mis_exp, 271.25);
        assert!(table.get("ENST00000003").is_none());
    }

    #[test]
    fn malformed_rows_are_an_error() {
        let fixture = "enst_id\tsyn_obs\tmis_obs\tsyn_exp\tmis_exp\nENST00000001\tlots\t3\t1.0\t2.0\n";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(fixture.as_bytes()).unwrap();
        assert!(matches!(
            MutationCountsTable::load(file.path()),
            Err(DatasetError::Malformed { .. })
        ));
    }
}
