//! Run configuration: one JSON file naming every dataset a driver may need.
//! Keys are optional so the two drivers can share a single file; each driver
//! demands only the keys it actually uses.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::DatasetError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(skip)]
    source: PathBuf,

    pub ensembl_cds: Option<PathBuf>,
    pub ensembl_pep: Option<PathBuf>,
    pub uniprot_pep: Option<PathBuf>,
    pub gnomad_variants: Option<PathBuf>,
    pub uniprot_to_enst: Option<PathBuf>,
    pub enst_mp_counts: Option<PathBuf>,
    pub sifts_mapping: Option<PathBuf>,
    pub enst_to_phylop: Option<PathBuf>,
    pub pdb_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let reader = super::open(path)?;
        let mut config: Config =
            serde_json::from_reader(reader).map_err(|x| DatasetError::json(path, x))?;
        config.source = path.to_path_buf();
        Ok(config)
    }

    /// Demand a key the current driver cannot run without.
    pub fn required<'a>(
        &self,
        key: &str,
        value: &'a Option<PathBuf>,
    ) -> Result<&'a Path, DatasetError> {
        value
            .as_deref()
            .ok_or_else(|| DatasetError::malformed(&self.source, format!("missing required key {:?}", key)))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_partial_config() {
        let fixture = r#"{
            "gnomad_variants": "/data/gnomad.json.gz",
            "uniprot_pep": "/data/uniprot.fasta",
            "output_dir": "/results"
        }"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(fixture.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(
            config.required("gnomad_variants", &config.gnomad_variants).unwrap(),
            Path::new("/data/gnomad.json.gz")
        );
        assert!(config.required("ensembl_cds", &config.ensembl_cds).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"gnomda_variants": "/typo"}"#).unwrap();
        assert!(matches!(Config::load(file.path()), Err(DatasetError::Json { .. })));
    }
}
