use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use clap::ArgMatches;
use indicatif::ProgressBar;

use crate::cli::shared::parse::or_exit;
use crate::core::error::DatasetError;
use crate::core::io::config::Config;
use crate::core::io::fasta::{ensembl_accession, read_fasta};
use crate::core::io::gnomad::VariantStore;
use crate::core::io::phylop::PhylopStore;
use crate::core::io::sifts::SiftsStore;

use super::args;

pub fn transcripts(pbar: ProgressBar, matches: &ArgMatches) -> Vec<String> {
    pbar.set_message("Parsing the transcript list...");
    let path = matches.value_of(args::workload::TRANSCRIPTS).unwrap();
    let content = or_exit(&pbar, fs::read_to_string(path).map_err(|x| DatasetError::io(path, x)));
    let result: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|x| !x.is_empty() && !x.starts_with('#'))
        .map(str::to_owned)
        .collect();
    pbar.finish_with_message(format!("{} transcripts queued from {}", result.len(), path));
    result
}

pub fn overwrite(pbar: ProgressBar, matches: &ArgMatches) -> bool {
    let result = matches.is_present(args::workload::OVERWRITE);
    if result {
        pbar.finish_with_message("Existing result files will be overwritten");
    } else {
        pbar.finish_with_message("Existing result files will be kept (see --overwrite)");
    }
    result
}

pub fn cds(pbar: ProgressBar, config: &Config) -> HashMap<String, String> {
    pbar.set_message("Loading Ensembl coding sequences...");
    let path = or_exit(&pbar, config.required("ensembl_cds", &config.ensembl_cds));
    let result = or_exit(&pbar, read_fasta(path, ensembl_accession));
    pbar.finish_with_message(format!("Ensembl CDS: {} transcripts", result.len()));
    result
}

pub fn peptides(pbar: ProgressBar, config: &Config) -> HashMap<String, String> {
    pbar.set_message("Loading Ensembl peptide sequences...");
    let path = or_exit(&pbar, config.required("ensembl_pep", &config.ensembl_pep));
    let result = or_exit(&pbar, read_fasta(path, ensembl_accession));
    pbar.finish_with_message(format!("Ensembl peptides: {} transcripts", result.len()));
    result
}

pub fn gnomad(pbar: ProgressBar, config: &Config) -> VariantStore {
    pbar.set_message("Loading gnomAD variants...");
    let path = or_exit(&pbar, config.required("gnomad_variants", &config.gnomad_variants));
    let result = or_exit(&pbar, VariantStore::load(path));
    pbar.finish_with_message(format!("gnomAD variants: {} transcripts", result.len()));
    result
}

pub fn sifts(pbar: ProgressBar, config: &Config) -> SiftsStore {
    pbar.set_message("Loading SIFTS mappings...");
    let path = or_exit(&pbar, config.required("sifts_mapping", &config.sifts_mapping));
    let result = or_exit(&pbar, SiftsStore::load(path));
    pbar.finish_with_message(format!("SIFTS mappings: {} UniProt entries", result.len()));
    result
}

pub fn phylop(pbar: ProgressBar, config: &Config) -> Option<PhylopStore> {
    pbar.set_message("Loading phyloP tracks...");
    match &config.enst_to_phylop {
        Some(path) => {
            let result = or_exit(&pbar, PhylopStore::load(path));
            pbar.finish_with_message(format!("phyloP tracks: {} transcripts", result.len()));
            Some(result)
        }
        None => {
            pbar.finish_with_message("phyloP tracks not configured, the column will be NaN");
            None
        }
    }
}

pub fn pdb_dir(pbar: ProgressBar, config: &Config) -> PathBuf {
    pbar.set_message("Parsing the structure directory...");
    let path = or_exit(&pbar, config.required("pdb_dir", &config.pdb_dir));
    pbar.finish_with_message(format!("PDB structures: {}", path.display()));
    path.to_path_buf()
}

pub fn output_dir(pbar: ProgressBar, config: &Config) -> PathBuf {
    pbar.set_message("Parsing the output directory...");
    let path = or_exit(&pbar, config.required("output_dir", &config.output_dir));
    or_exit(&pbar, fs::create_dir_all(path).map_err(|x| DatasetError::io(path, x)));
    pbar.finish_with_message(format!("Results will be saved to {}", path.display()));
    path.to_path_buf()
}
