use clap::{Arg, ArgMatches};
use indicatif::ProgressBar;

use crate::cli::shared::args::{defaults, reqdefaults};
use crate::cli::shared::validate;

use super::parse;

pub mod workload {
    use super::*;
    pub const UNIPROT: &str = "uniprot";
    pub const STRUCTURE: &str = "structure";
    pub const CHAIN: &str = "chain";
    pub const MULTIMER: &str = "multimer";
    pub const SAVETO: &str = "saveto";

    pub const SECTION_NAME: &str = "Workload";

    pub fn args<'a>() -> Vec<Arg<'a>> {
        let args = vec![
            Arg::new(UNIPROT)
                .short('u')
                .long(UNIPROT)
                .setting(reqdefaults())
                .long_about("UniProt accession of the protein to score. The accession must be present in the configured UniProt peptide FASTA and in the UniProt-to-ENST mapping."),
            Arg::new(STRUCTURE)
                .short('p')
                .long(STRUCTURE)
                .setting(reqdefaults())
                .validator(validate::path)
                .long_about("Path to the PDB file with the protein structure. Residue numbers of the scored chain must match 1-based positions in the UniProt sequence."),
            Arg::new(CHAIN)
                .long(CHAIN)
                .setting(defaults())
                .validator(validate::chain)
                .default_value("A")
                .long_about("Chain to score."),
            Arg::new(MULTIMER)
                .long(MULTIMER)
                .setting(defaults())
                .takes_value(false)
                .long_about("Treat the structure as a homo-oligomer: residues of the other chains also count as contacts of the scored chain (all chains are assumed to share the residue numbering)."),
            Arg::new(SAVETO)
                .short('o')
                .long(SAVETO)
                .setting(defaults())
                .validator(validate::writable)
                .default_value("/dev/stdout")
                .long_about("Path to the output tsv file. By default, the results are printed to stdout."),
        ];
        args.into_iter().map(|x| x.help_heading(Some(SECTION_NAME))).collect()
    }
}

pub fn all<'a>() -> Vec<Arg<'a>> {
    crate::cli::shared::args::core::args().into_iter().chain(workload::args().into_iter()).collect()
}

pub struct ProteinArgs {
    pub uniprot: String,
    pub structure: std::path::PathBuf,
    pub chain: char,
    pub multimer: bool,
    pub saveto: std::io::BufWriter<std::fs::File>,
}

impl ProteinArgs {
    pub fn new(args: &ArgMatches, factory: impl Fn() -> ProgressBar) -> Self {
        Self {
            uniprot: parse::uniprot(factory(), args),
            structure: parse::structure(factory(), args),
            chain: parse::chain(factory(), args),
            multimer: parse::multimer(factory(), args),
            saveto: parse::saveto(factory(), args),
        }
    }
}
