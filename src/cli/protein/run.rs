use std::collections::HashMap;

use clap::ArgMatches;
use indicatif::ProgressBar;

use crate::cli::resformat;
use crate::cli::shared;
use crate::cli::shared::args::CoreArgs;
use crate::cli::shared::parse::or_exit;
use crate::cli::protein::args::ProteinArgs;
use crate::core::assemble::{score, select_compatible, NullSpec, ScoreInput, ScoreOutcome};
use crate::core::error::TranscriptError;
use crate::core::io::gnomad::VariantStore;
use crate::core::io::mpcounts::MutationCountsTable;
use crate::core::io::pdb::{parse_pdb, structure_view, Structure};
use crate::core::mapping::IdentityMapper;

use super::parse;

struct Datasets {
    peptides: HashMap<String, String>,
    cds: HashMap<String, String>,
    gnomad: VariantStore,
    uniprot_to_enst: HashMap<String, Vec<String>>,
    mpcounts: MutationCountsTable,
}

pub fn run(matches: &ArgMatches, core: CoreArgs, factory: impl Fn() -> ProgressBar + Sync) {
    let args = ProteinArgs::new(matches, &factory);
    let datasets = Datasets {
        peptides: parse::peptides(factory(), &core.config),
        cds: parse::cds(factory(), &core.config),
        gnomad: parse::gnomad(factory(), &core.config),
        uniprot_to_enst: parse::uniprot_to_enst(factory(), &core.config),
        mpcounts: parse::mpcounts(factory(), &core.config),
    };

    let pbar = factory();
    pbar.set_message(format!("Scoring {}...", args.uniprot));
    let structure = or_exit(&pbar, parse_pdb(&args.structure));
    let pdb_id = args
        .structure
        .file_stem()
        .map(|x| x.to_string_lossy().into_owned())
        .unwrap_or_else(|| "NA".to_owned());

    match score_protein(&args.uniprot, &structure, &pdb_id, args.chain, args.multimer, &datasets, &core) {
        Ok(outcome) => {
            pbar.set_style(shared::style::run::finished());
            pbar.finish_with_message(format!(
                "Finished {}: {} positions scored, {} degraded to NaN, {} contacts dropped",
                args.uniprot,
                outcome.records.len(),
                outcome.diagnostics.unmapped.len() + outcome.diagnostics.mismatched.len(),
                outcome.diagnostics.dropped_contacts,
            ));
            resformat::records(args.saveto, &outcome.records);
        }
        Err(x) => {
            pbar.abandon_with_message(format!("{}: {}", args.uniprot, x));
            std::process::exit(1);
        }
    }
}

fn score_protein(
    uniprot: &str,
    structure: &Structure,
    pdb_id: &str,
    chain: char,
    multimer: bool,
    datasets: &Datasets,
    core: &CoreArgs,
) -> Result<ScoreOutcome, TranscriptError> {
    let peptide = datasets
        .peptides
        .get(uniprot)
        .ok_or_else(|| TranscriptError::NotFound { id: uniprot.to_owned(), dataset: "UniProt peptides" })?;
    let transcripts = datasets
        .uniprot_to_enst
        .get(uniprot)
        .ok_or_else(|| TranscriptError::NoMapping { id: uniprot.to_owned() })?;

    let candidates: Vec<(String, String, usize)> = transcripts
        .iter()
        .filter_map(|enst| {
            let sequence = datasets.cds.get(enst)?;
            Some((enst.clone(), sequence.clone(), datasets.gnomad.variant_count(enst)))
        })
        .collect();
    let (enst, cds) = select_compatible(uniprot, peptide.chars().count(), &candidates)?;

    let counts = datasets
        .mpcounts
        .get(&enst)
        .ok_or_else(|| TranscriptError::NotFound { id: enst.clone(), dataset: "mutation counts table" })?;
    let variants = datasets.gnomad.get(&enst).map(|x| x.parsed()).unwrap_or_default();

    let view = structure_view(structure, uniprot, pdb_id, chain, core.radius, multimer)?;
    let input = ScoreInput {
        uniprot_id: uniprot,
        enst_id: &enst,
        peptide,
        cds,
        variants: &variants,
        structure: &view,
        mapper: &IdentityMapper,
        null: NullSpec::Weighted {
            syn_total: counts.syn_exp.round() as u32,
            mis_total: counts.mis_exp.round() as u32,
        },
        observed: Some((counts.syn_obs, counts.mis_obs)),
        expected: Some((counts.syn_exp, counts.mis_exp)),
        phylop: None,
    };
    score(input, &core.options)
}
