//! Precomputed gnomAD variant tables, one JSON object per transcript.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::DatasetError;
use crate::core::variants::Variant;

/// All gnomAD evidence attached to one Ensembl transcript: cross-references
/// into other namespaces plus the variant list as `(change, AC, AN)` triples
/// in the compact `"M1K"` notation.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct TranscriptVariants {
    #[serde(default)]
    pub ccds: Option<String>,
    #[serde(default)]
    pub ensp: Option<String>,
    #[serde(default)]
    pub swissprot: Option<String>,
    #[serde(default)]
    pub variants: Vec<(String, u32, u32)>,
}

impl TranscriptVariants {
    /// Decode the raw triples; records that do not parse are skipped.
    pub fn parsed(&self) -> Vec<Variant> {
        self.variants
            .iter()
            .filter_map(|(change, ac, an)| Variant::parse(change, *ac, *an))
            .collect()
    }
}

/// In-memory index of the whole gnomAD dataset, keyed by unversioned ENST id.
#[derive(Debug, Default)]
pub struct VariantStore {
    records: HashMap<String, TranscriptVariants>,
}

impl VariantStore {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let reader = super::open(path)?;
        let records = serde_json::from_reader(reader).map_err(|x| DatasetError::json(path, x))?;
        Ok(VariantStore { records })
    }

    pub fn get(&self, enst_id: &str) -> Option<&TranscriptVariants> {
        self.records.get(enst_id)
    }

    /// Number of raw variant triples attached to a transcript; 0 when absent.
    pub fn variant_count(&self, enst_id: &str) -> usize {
        self.records.get(enst_id).map_or(0, |x| x.variants.len())
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

    const FIXTURE: &str = r#"{
        "ENST00000001": {
            "ccds": "CCDS100.1",
            "ensp": "ENSP00000001",
            "swissprot": "P12345",
            "variants": [["M1K", 1, 1000], ["L7L", 3, 2000], ["bogus", 1, 1]]
        },
        "ENST00000002": {"variants": []}
    }"#;

    #[test]
    fn loads_and_parses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        let store = VariantStore::load(file.path()).unwrap();

        assert_eq!(store.len(), 2);
        let record = store.get("ENST00000001").unwrap();
        assert_eq!(record.swissprot.as_deref(), Some("P12345"));
        assert_eq!(store.variant_count("ENST00000001"), 3);
        // The malformed triple is dropped on decoding.
        let parsed = record.parsed();
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].is_missense());
        assert!(!parsed[1].is_missense());
        assert!(store.get("ENST99999999").is_none());
    }
}
