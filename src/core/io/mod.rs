pub mod config;
pub mod fasta;
pub mod gnomad;
pub mod mpcounts;
pub mod pdb;
pub mod phylop;
pub mod sifts;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::core::error::DatasetError;

/// Open a dataset file, transparently decompressing `.gz`.
pub fn open(path: &Path) -> Result<Box<dyn Read>, DatasetError> {
    let file = File::open(path).map_err(|x| DatasetError::io(path, x))?;
    if path.extension().map_or(false, |ext| ext == "gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Decode a whole (possibly gzipped) JSON dataset.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let reader = open(path)?;
    serde_json::from_reader(reader).map_err(|x| DatasetError::json(path, x))
}
