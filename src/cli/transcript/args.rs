use clap::{Arg, ArgMatches};
use indicatif::ProgressBar;

use crate::cli::shared::args::{defaults, reqdefaults};
use crate::cli::shared::validate;

use super::parse;

pub mod workload {
    use super::*;
    pub const TRANSCRIPTS: &str = "transcripts";
    pub const OVERWRITE: &str = "overwrite";

    pub const SECTION_NAME: &str = "Workload";

    pub fn args<'a>() -> Vec<Arg<'a>> {
        let args = vec![
            Arg::new(TRANSCRIPTS)
                .short('i')
                .long(TRANSCRIPTS)
                .setting(reqdefaults())
                .validator(validate::path)
                .long_about("Path to a text file with one Ensembl transcript id (unversioned ENST) per line. Empty lines and lines starting with # are skipped."),
            Arg::new(OVERWRITE)
                .long(OVERWRITE)
                .setting(defaults())
                .takes_value(false)
                .long_about("Recompute and overwrite per-transcript result files that already exist in the output directory. By default such transcripts are skipped."),
        ];
        args.into_iter().map(|x| x.help_heading(Some(SECTION_NAME))).collect()
    }
}

pub fn all<'a>() -> Vec<Arg<'a>> {
    crate::cli::shared::args::core::args().into_iter().chain(workload::args().into_iter()).collect()
}

pub struct TranscriptArgs {
    pub transcripts: Vec<String>,
    pub overwrite: bool,
}

impl TranscriptArgs {
    pub fn new(args: &ArgMatches, factory: impl Fn() -> ProgressBar) -> Self {
        Self {
            transcripts: parse::transcripts(factory(), args),
            overwrite: parse::overwrite(factory(), args),
        }
    }
}
