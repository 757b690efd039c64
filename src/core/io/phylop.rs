//! Per-transcript phyloP conservation tracks.

use std::collections::HashMap;
use std::path::Path;

use crate::core::error::DatasetError;

/// phyloP scores keyed by unversioned ENST id, one score per peptide
/// position. The dataset is optional; drivers fall back to NaN columns
/// when it is absent.
#[derive(Debug, Default)]
pub struct PhylopStore {
    tracks: HashMap<String, Vec<f64>>,
}

impl PhylopStore {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let reader = super::open(path)?;
        let tracks = serde_json::from_reader(reader).map_err(|x| DatasetError::json(path, x))?;
        Ok(PhylopStore { tracks })
    }

    pub fn get(&self, enst_id: &str) -> Option<&[f64]> {
        self.tracks.get(enst_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_tracks() {
        let fixture = r#"{"ENST00000001": [1.5, -0.2, 7.013], "ENST00000002": []}"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(fixture.as_bytes()).unwrap();

        let store = PhylopStore::load(file.path()).unwrap();
        assert_eq!(store.get("ENST00000001"), Some([1.5, -0.2, 7.013].as_slice()));
        assert_eq!(store.get("ENST00000002"), Some([].as_slice()));
        assert!(store.get("ENST00000003").is_none());
    }
}
