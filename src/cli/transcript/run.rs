use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::cli::resformat;
use crate::cli::shared;
use crate::cli::shared::args::CoreArgs;
use crate::cli::transcript::args::TranscriptArgs;
use crate::core::assemble::{score, NullSpec, ScoreInput, ScoreOptions};
use crate::core::error::TranscriptError;
use crate::core::io::gnomad::VariantStore;
use crate::core::io::pdb::{parse_pdb, structure_view};
use crate::core::io::phylop::PhylopStore;
use crate::core::io::sifts::SiftsStore;
use crate::core::seq::CodingSequence;

use super::parse;

const OUTPUT_IO_ERROR: &str = "Failed to create the output TSV file.";

struct Datasets {
    cds: HashMap<String, String>,
    peptides: HashMap<String, String>,
    gnomad: VariantStore,
    sifts: SiftsStore,
    phylop: Option<PhylopStore>,
    pdb_dir: PathBuf,
}

enum Outcome {
    Scored { positions: usize, degraded: usize },
    Skipped,
}

pub fn run(matches: &ArgMatches, core: CoreArgs, factory: impl Fn() -> ProgressBar + Sync) {
    let args = TranscriptArgs::new(matches, &factory);
    let datasets = Datasets {
        cds: parse::cds(factory(), &core.config),
        peptides: parse::peptides(factory(), &core.config),
        gnomad: parse::gnomad(factory(), &core.config),
        sifts: parse::sifts(factory(), &core.config),
        phylop: parse::phylop(factory(), &core.config),
        pdb_dir: parse::pdb_dir(factory(), &core.config),
    };
    let output_dir = parse::output_dir(factory(), &core.config);

    let pbar = factory();
    pbar.set_style(shared::style::run::running());
    pbar.set_length(args.transcripts.len() as u64);

    let outcomes: Vec<(&str, Result<Outcome, TranscriptError>)> = args
        .transcripts
        .par_iter()
        .map(|enst| {
            let saveto = output_dir.join(format!("{}.cosmis.tsv", enst));
            let result = if saveto.exists() && !args.overwrite {
                Ok(Outcome::Skipped)
            } else {
                score_transcript(enst, &datasets, &core.options, core.radius, &saveto)
            };
            pbar.inc(1);
            (enst.as_str(), result)
        })
        .collect();

    pbar.set_style(shared::style::run::finished());
    let (mut scored, mut skipped, mut failed) = (0usize, 0usize, 0usize);
    let (mut positions, mut degraded) = (0usize, 0usize);
    for (enst, outcome) in &outcomes {
        match outcome {
            Ok(Outcome::Scored { positions: p, degraded: d }) => {
                scored += 1;
                positions += p;
                degraded += d;
            }
            Ok(Outcome::Skipped) => skipped += 1,
            Err(x) => {
                failed += 1;
                eprintln!("{}: {}", enst, x);
            }
        }
    }
    pbar.finish_with_message(format!(
        "Finished: {} transcripts scored ({} positions, {} degraded to NaN), {} skipped, {} failed",
        scored, positions, degraded, skipped, failed
    ));
}

fn score_transcript(
    enst: &str,
    datasets: &Datasets,
    options: &ScoreOptions,
    radius: f64,
    saveto: &Path,
) -> Result<Outcome, TranscriptError> {
    let sequence = datasets
        .cds
        .get(enst)
        .ok_or_else(|| TranscriptError::NotFound { id: enst.to_owned(), dataset: "Ensembl CDS" })?;
    let cds = CodingSequence::parse(enst, sequence)?;
    let peptide = datasets
        .peptides
        .get(enst)
        .ok_or_else(|| TranscriptError::NotFound { id: enst.to_owned(), dataset: "Ensembl peptides" })?;
    let record = datasets
        .gnomad
        .get(enst)
        .ok_or_else(|| TranscriptError::NotFound { id: enst.to_owned(), dataset: "gnomAD variants" })?;
    let uniprot = record
        .swissprot
        .clone()
        .ok_or_else(|| TranscriptError::NoMapping { id: enst.to_owned() })?;

    let entry = datasets
        .sifts
        .get(&uniprot)
        .ok_or_else(|| TranscriptError::NoStructure { id: uniprot.clone() })?;
    let mapper = entry.mapper().map_err(|_| TranscriptError::NoMapping { id: uniprot.clone() })?;
    let chain = entry
        .chain_id
        .chars()
        .next()
        .ok_or_else(|| TranscriptError::NoStructure { id: uniprot.clone() })?;
    let structure = parse_pdb(&datasets.pdb_dir.join(format!("{}.pdb", entry.pdb_id)))
        .map_err(|_| TranscriptError::NoStructure { id: uniprot.clone() })?;
    let view = structure_view(&structure, &uniprot, &entry.pdb_id, chain, radius, false)?;

    let variants = record.parsed();
    let phylop = datasets.phylop.as_ref().and_then(|x| x.get(enst));
    let input = ScoreInput {
        uniprot_id: &uniprot,
        enst_id: enst,
        peptide,
        cds,
        variants: &variants,
        structure: &view,
        mapper: &mapper,
        null: NullSpec::Uniform,
        observed: None,
        expected: None,
        phylop,
    };
    let outcome = score(input, options)?;

    let writer = BufWriter::new(File::create(saveto).expect(OUTPUT_IO_ERROR));
    resformat::records(writer, &outcome.records);
    Ok(Outcome::Scored {
        positions: outcome.records.len(),
        degraded: outcome.diagnostics.unmapped.len() + outcome.diagnostics.mismatched.len(),
    })
}
