//! SIFTS-derived residue mappings between UniProt sequences and PDB chains.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::DatasetError;
use crate::core::mapping::SiftsMapper;

/// The best structural coverage of one UniProt entry: which chain of which
/// PDB deposition, and the residue-level alignment (peptide position ->
/// author residue number; JSON object keys arrive as strings).
#[derive(Clone, Debug, Deserialize)]
pub struct SiftsEntry {
    pub pdb_id: String,
    pub chain_id: String,
    mapping: HashMap<String, i64>,
}

impl SiftsEntry {
    pub fn mapper(&self) -> Result<SiftsMapper, String> {
        let mut pairs = Vec::with_capacity(self.mapping.len());
        for (peptide, &residue) in &self.mapping {
            let peptide: usize = peptide
                .parse()
                .map_err(|_| format!("non-numeric peptide position {:?}", peptide))?;
            if peptide == 0 {
                return Err("peptide positions are 1-based".to_string());
            }
            pairs.push((peptide, residue));
        }
        Ok(SiftsMapper::from_pairs(pairs))
    }
}

#[derive(Debug, Default)]
pub struct SiftsStore {
    entries: HashMap<String, SiftsEntry>,
}

impl SiftsStore {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let reader = super::open(path)?;
        let entries = serde_json::from_reader(reader).map_err(|x| DatasetError::json(path, x))?;
        Ok(SiftsStore { entries })
    }

    pub fn get(&self, uniprot_id: &str) -> Option<&SiftsEntry> {
        self.entries.get(uniprot_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
