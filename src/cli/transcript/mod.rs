pub use run::run;

pub mod args;
pub mod parse;
mod run;

pub const COMMAND: &str = "transcript";
pub const ABOUT: &str = "Score Ensembl transcripts against SIFTS-mapped experimental structures, one output file per transcript.";
