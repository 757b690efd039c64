use std::collections::HashMap;

use crate::core::aggregate::aggregate;
use crate::core::contacts::ContactIndex;
use crate::core::error::TranscriptError;
use crate::core::mapping::PositionMapper;
use crate::core::mutrate::codon_stats;
use crate::core::permutation::PermutationMatrix;
use crate::core::record::CosmisRecord;
use crate::core::seq::CodingSequence;
use crate::core::variants::{tabulate, Variant};

/// One resolved chain: residue identities by structural number plus the
/// contact index derived from its coordinates.
#[derive(Clone, Debug, Default)]
pub struct StructureView {
    pub pdb_id: Option<String>,
    pub chain_id: Option<String>,
    residues: HashMap<i64, char>,
    contacts: ContactIndex,
}

impl StructureView {
    pub fn new(
        pdb_id: Option<String>,
        chain_id: Option<String>,
        residues: HashMap<i64, char>,
        contacts: ContactIndex,
    ) -> Self {
        StructureView { pdb_id, chain_id, residues, contacts }
    }

    pub fn residue(&self, position: i64) -> Option<char> {
        self.residues.get(&position).copied()
    }

    pub fn neighbors(&self, position: i64) -> &[i64] {
        self.contacts.neighbors(position)
    }

    pub fn residues(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// How the null model places variants along the peptide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NullSpec {
    /// Place the observed totals uniformly.
    Uniform,
    /// Place externally calibrated expected totals proportionally to the
    /// per-codon mutation rates.
    Weighted { syn_total: u32, mis_total: u32 },
}

#[derive(Clone, Copy, Debug)]
pub struct ScoreOptions {
    pub trials: usize,
    pub frequency_cutoff: Option<f64>,
    pub seed: u64,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        ScoreOptions { trials: 10_000, frequency_cutoff: Some(0.001), seed: 0 }
    }
}

/// Everything one scoring run needs, resolved by the driver beforehand.
pub struct ScoreInput<'a> {
    pub uniprot_id: &'a str,
    pub enst_id: &'a str,
    pub peptide: &'a str,
    pub cds: CodingSequence,
    pub variants: &'a [Variant],
    pub structure: &'a StructureView,
    pub mapper: &'a dyn PositionMapper,
    pub null: NullSpec,
    /// Transcript-wide observed totals (syn, mis) from an external
    /// calibration table; when absent the tabulated variant totals are
    /// reported instead.
    pub observed: Option<(u32, u32)>,
    /// Transcript-wide expected totals (syn, mis) when calibrated externally.
    pub expected: Option<(f64, f64)>,
    /// Per-position conservation scores, same length as the peptide.
    pub phylop: Option<&'a [f64]>,
}

/// Per-run bookkeeping of positions that degraded instead of scoring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreDiagnostics {
    /// Peptide positions with no structural residue.
    pub unmapped: Vec<usize>,
    /// Peptide positions whose structural residue disagrees with the peptide.
    pub mismatched: Vec<usize>,
    /// Structural neighbors dropped because they map nowhere on the peptide.
    pub dropped_contacts: usize,
}

#[derive(Debug)]
pub struct ScoreOutcome {
    pub records: Vec<CosmisRecord>,
    pub diagnostics: ScoreDiagnostics,
}

/// Score every position of one transcript/protein.
///
/// Stages: validate CDS/peptide concordance, derive the per-codon mutation
/// model, tabulate variants, simulate the null once per channel, then walk
/// the peptide aggregating each contact set against the shared null.
/// Positions that cannot be placed on the structure produce NaN rows rather
/// than aborting the run.
pub fn score(input: ScoreInput<'_>, opts: &ScoreOptions) -> Result<ScoreOutcome, TranscriptError> {
    let peptide: Vec<char> = input.peptide.chars().collect();
    input.cds.concordant_with(input.enst_id, peptide.len())?;
    if peptide.is_empty() {
        return Err(TranscriptError::EmptyPeptide { id: input.enst_id.to_owned() });
    }
    if input.structure.is_empty() {
        return Err(TranscriptError::NoStructure { id: input.uniprot_id.to_owned() });
    }
    let cds = input.cds.clone().trim_stop();
    let length = cds.codons();

    let stats = codon_stats(&cds);
    let counts = tabulate(input.variants, opts.frequency_cutoff);
    let syn_total = counts.synonymous.total();
    let mis_total = counts.missense.total();
    let (enst_syn_obs, enst_mis_obs) = input.observed.unwrap_or((syn_total, mis_total));

    // The two channels get distinct streams so their draws stay independent
    // under a shared seed.
    let (syn_seed, mis_seed) = (opts.seed, opts.seed.wrapping_add(1));
    let (syn_null, mis_null) = match input.null {
        NullSpec::Uniform => (
            PermutationMatrix::uniform(opts.trials, length, syn_total, syn_seed),
            PermutationMatrix::uniform(opts.trials, length, mis_total, mis_seed),
        ),
        NullSpec::Weighted { syn_total, mis_total } => {
            let syn_weights: Vec<f64> = stats.iter().map(|x| x.syn_rate).collect();
            let mis_weights: Vec<f64> = stats.iter().map(|x| x.mis_rate).collect();
            (
                PermutationMatrix::weighted(opts.trials, length, syn_total, &syn_weights, syn_seed),
                PermutationMatrix::weighted(opts.trials, length, mis_total, &mis_weights, mis_seed),
            )
        }
    };

    let (enst_syn_exp, enst_mis_exp) = input.expected.unwrap_or((f64::NAN, f64::NAN));
    let mut records = Vec::with_capacity(length);
    let mut diagnostics = ScoreDiagnostics::default();
    for pos in 1..=length {
        let aa = peptide[pos - 1];
        let mut record = CosmisRecord::unresolved(
            input.uniprot_id.to_owned(),
            input.enst_id.to_owned(),
            pos,
            aa,
            enst_syn_obs,
            enst_mis_obs,
            peptide.len(),
        );
        record.pdb_id = input.structure.pdb_id.clone();
        record.chain_id = input.structure.chain_id.clone();
        if let Some(scores) = input.phylop {
            if let Some(&x) = scores.get(pos - 1) {
                record.phylop_score = x;
            }
        }

        let residue = match input.mapper.to_structure(pos) {
            Some(residue) => residue,
            None => {
                diagnostics.unmapped.push(pos);
                records.push(record);
                continue;
            }
        };
        let structural_aa = match input.structure.residue(residue) {
            Some(aa) => aa,
            None => {
                diagnostics.unmapped.push(pos);
                records.push(record);
                continue;
            }
        };
        record.pdb_pos = Some(residue);
        record.pdb_aa = Some(structural_aa);
        if structural_aa != aa {
            diagnostics.mismatched.push(pos);
            records.push(record);
            continue;
        }

        let agg = aggregate(
            pos,
            residue,
            input.structure.neighbors(residue),
            input.mapper,
            &counts,
            &stats,
            &cds,
        );
        diagnostics.dropped_contacts += agg.dropped.len();

        let mis = mis_null.evaluate(&agg.positions, agg.mis_obs);
        let syn = syn_null.evaluate(&agg.positions, agg.syn_obs);

        record.seq_separations = agg.seq_separations;
        record.num_contacts = agg.num_contacts;
        record.syn_var_sites = f64::from(agg.syn_var_sites);
        record.total_syn_sites = agg.total_syn_sites;
        record.mis_var_sites = f64::from(agg.mis_var_sites);
        record.total_mis_sites = agg.total_mis_sites;
        record.cs_syn_poss = f64::from(agg.syn_poss);
        record.cs_mis_poss = f64::from(agg.mis_poss);
        record.cs_gc_content = agg.gc_content;
        record.cs_syn_prob = agg.syn_prob;
        record.cs_syn_obs = f64::from(agg.syn_obs);
        record.cs_mis_prob = agg.mis_prob;
        record.cs_mis_obs = f64::from(agg.mis_obs);
        record.mis_pmt_mean = mis.mean;
        record.mis_pmt_sd = mis.sd;
        record.mis_p_value = mis.p_value;
        record.syn_pmt_mean = syn.mean;
        record.syn_pmt_sd = syn.sd;
        record.syn_p_value = syn.p_value;
        record.enst_syn_exp = enst_syn_exp;
        record.enst_mis_exp = enst_mis_exp;
        records.push(record);
    }

    Ok(ScoreOutcome { records, diagnostics })
}

/// Pick the transcript whose CDS is concordant with the peptide; ties are
/// broken towards the one with the most variants, so sparse isoforms do not
/// shadow the canonical one.
pub fn select_compatible(
    uniprot_id: &str,
    peptide_len: usize,
    candidates: &[(String, String, usize)],
) -> Result<(String, CodingSequence), TranscriptError> {
    candidates
        .iter()
        .filter_map(|(enst_id, sequence, variants)| {
            let cds = CodingSequence::parse(enst_id, sequence).ok()?;
            cds.concordant_with(enst_id, peptide_len).ok()?;
            Some((enst_id, cds, *variants))
        })
        .max_by_key(|&(_, _, variants)| variants)
        .map(|(enst_id, cds, _)| (enst_id.clone(), cds))
        .ok_or_else(|| TranscriptError::NoCompatibleTranscript { id: uniprot_id.to_owned() })
}
