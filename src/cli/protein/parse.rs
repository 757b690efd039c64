use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::ArgMatches;
use indicatif::ProgressBar;

use crate::cli::shared::parse::or_exit;
use crate::core::io::config::Config;
use crate::core::io::fasta::{ensembl_accession, read_fasta, uniprot_accession};
use crate::core::io::gnomad::VariantStore;
use crate::core::io::mpcounts::MutationCountsTable;
use crate::core::io::read_json;

use super::args;

const OUTPUT_IO_ERROR: &str = "Failed to create the output TSV file.";

pub fn uniprot(pbar: ProgressBar, matches: &ArgMatches) -> String {
    let result = matches.value_of(args::workload::UNIPROT).unwrap().to_owned();
    pbar.finish_with_message(format!("Scoring UniProt entry {}", result));
    result
}

pub fn structure(pbar: ProgressBar, matches: &ArgMatches) -> PathBuf {
    let result: PathBuf = matches.value_of(args::workload::STRUCTURE).unwrap().into();
    pbar.finish_with_message(format!("Structure: {}", result.display()));
    result
}

pub fn chain(pbar: ProgressBar, matches: &ArgMatches) -> char {
    let result = matches.value_of(args::workload::CHAIN).unwrap().chars().next().unwrap();
    pbar.finish_with_message(format!("Chain: {}", result));
    result
}

pub fn multimer(pbar: ProgressBar, matches: &ArgMatches) -> bool {
    let result = matches.is_present(args::workload::MULTIMER);
    if result {
        pbar.finish_with_message("Homo-oligomer mode: interchain contacts are counted");
    } else {
        pbar.finish_with_message("Monomer mode: only intrachain contacts are counted");
    }
    result
}

pub fn saveto(pbar: ProgressBar, matches: &ArgMatches) -> BufWriter<File> {
    pbar.set_message("Parsing output path...");
    let result = matches.value_of(args::workload::SAVETO).unwrap();
    let file = BufWriter::new(File::create(result).expect(OUTPUT_IO_ERROR));
    pbar.finish_with_message(format!("Result will be saved to {}", result));
    file
}

pub fn peptides(pbar: ProgressBar, config: &Config) -> HashMap<String, String> {
    pbar.set_message("Loading UniProt peptide sequences...");
    let path = or_exit(&pbar, config.required("uniprot_pep", &config.uniprot_pep));
    let result = or_exit(&pbar, read_fasta(path, uniprot_accession));
    pbar.finish_with_message(format!("UniProt peptides: {} entries", result.len()));
    result
}

pub fn cds(pbar: ProgressBar, config: &Config) -> HashMap<String, String> {
    pbar.set_message("Loading Ensembl coding sequences...");
    let path = or_exit(&pbar, config.required("ensembl_cds", &config.ensembl_cds));
    let result = or_exit(&pbar, read_fasta(path, ensembl_accession));
    pbar.finish_with_message(format!("Ensembl CDS: {} transcripts", result.len()));
    result
}

pub fn gnomad(pbar: ProgressBar, config: &Config) -> VariantStore {
    pbar.set_message("Loading gnomAD variants...");
    let path = or_exit(&pbar, config.required("gnomad_variants", &config.gnomad_variants));
    let result = or_exit(&pbar, VariantStore::load(path));
    pbar.finish_with_message(format!("gnomAD variants: {} transcripts", result.len()));
    result
}

pub fn uniprot_to_enst(pbar: ProgressBar, config: &Config) -> HashMap<String, Vec<String>> {
    pbar.set_message("Loading the UniProt to ENST mapping...");
    let path = or_exit(&pbar, config.required("uniprot_to_enst", &config.uniprot_to_enst));
    let result: HashMap<String, Vec<String>> = or_exit(&pbar, read_json(path));
    pbar.finish_with_message(format!("UniProt to ENST: {} entries", result.len()));
    result
}

pub fn mpcounts(pbar: ProgressBar, config: &Config) -> MutationCountsTable {
    pbar.set_message("Loading transcript mutation counts...");
    let path = or_exit(&pbar, config.required("enst_mp_counts", &config.enst_mp_counts));
    let result = or_exit(&pbar, MutationCountsTable::load(path));
    pbar.finish_with_message(format!("Mutation counts: {} transcripts", result.len()));
    result
}
