use std::path::PathBuf;

use thiserror::Error;

/// Failures local to a single transcript/protein. The batch survives all of
/// these: the driver logs the reason and moves on to the next item.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranscriptError {
    #[error("{id} not found in {dataset}")]
    NotFound { id: String, dataset: &'static str },
    #[error("incomplete CDS for {id}: {nucleotides} nucleotides is not a whole number of codons")]
    IncompleteCds { id: String, nucleotides: usize },
    #[error("invalid CDS for {id}: symbol {symbol:?} is outside the A/C/G/T alphabet")]
    InvalidAlphabet { id: String, symbol: char },
    #[error("CDS/peptide length mismatch for {id}: {codons} codons vs peptide of {peptide} residues")]
    LengthMismatch { id: String, codons: usize, peptide: usize },
    #[error("empty peptide sequence for {id}")]
    EmptyPeptide { id: String },
    #[error("none of the transcripts mapped to {id} have a CDS compatible with its peptide sequence")]
    NoCompatibleTranscript { id: String },
    #[error("no structure or chain is available for {id}")]
    NoStructure { id: String },
    #[error("no residue-level mapping between sequence and structure for {id}")]
    NoMapping { id: String },
}

/// Failures while loading datasets named in the run configuration. These are
/// raised before any transcript is processed and terminate the whole run.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed dataset {path:?}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

impl DatasetError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasetError::Io { path: path.into(), source }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        DatasetError::Json { path: path.into(), source }
    }

    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DatasetError::Malformed { path: path.into(), reason: reason.into() }
    }
}
