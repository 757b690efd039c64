use derive_more::{Add, AddAssign};

use crate::core::seq::{CodingSequence, Nucleotide};

/// Per-codon substitution capacity under all 9 single-nucleotide changes.
///
/// Two sibling metrics are kept: *counts* are integer enumerations of possible
/// synonymous/missense outcomes (nonsense outcomes are excluded from the
/// missense tally), *sites* are the same counts normalized per nucleotide
/// (divided by 3). Rates accumulate the trinucleotide substitution
/// probabilities over the same enumeration and are linearly summable across
/// codons; nonsense outcomes do contribute to the missense rate.
#[derive(Clone, Copy, PartialEq, Debug, Default, Add, AddAssign)]
pub struct CodonStats {
    pub syn_poss: u32,
    pub mis_poss: u32,
    pub syn_sites: f64,
    pub mis_sites: f64,
    pub syn_rate: f64,
    pub mis_rate: f64,
}

// Relative single-nucleotide substitution weights, scaled to a plausible
// per-site per-generation magnitude. Transitions run hotter than
// transversions; CpG transitions hotter still.
const TRANSVERSION_RATE: f64 = 1.5e-9;
const TRANSITION_FACTOR: f64 = 4.0;
const CPG_FACTOR: f64 = 10.0;

#[inline]
fn is_transition(reference: Nucleotide, alt: Nucleotide) -> bool {
    use Nucleotide::*;
    matches!((reference, alt), (A, G) | (G, A) | (C, T) | (T, C))
}

/// Probability of `reference -> alt` in its trinucleotide context
/// (5' flank, reference, 3' flank).
pub fn substitution_probability(context: [Nucleotide; 3], alt: Nucleotide) -> f64 {
    let [five, reference, three] = context;
    debug_assert!(reference != alt);
    if !is_transition(reference, alt) {
        return TRANSVERSION_RATE;
    }
    // CpG deamination: C->T with a 3' G, or G->A with a 5' C.
    let cpg = (reference == Nucleotide::C && alt == Nucleotide::T && three == Nucleotide::G)
        || (reference == Nucleotide::G && alt == Nucleotide::A && five == Nucleotide::C);
    if cpg {
        TRANSVERSION_RATE * TRANSITION_FACTOR * CPG_FACTOR
    } else {
        TRANSVERSION_RATE * TRANSITION_FACTOR
    }
}

/// Compute [`CodonStats`] for every codon of a (stop-trimmed) CDS.
pub fn codon_stats(cds: &CodingSequence) -> Vec<CodonStats> {
    let mut all = Vec::with_capacity(cds.codons());
    for index in 0..cds.codons() {
        let codon = cds.codon(index);
        let wildtype = codon.translate();
        let mut stats = CodonStats::default();
        for offset in 0..3 {
            let context = cds.context(index, offset);
            for alt in Nucleotide::ALL {
                if alt == codon.0[offset] {
                    continue;
                }
                let mutant = codon.substitute(offset, alt).translate();
                let probability = substitution_probability(context, alt);
                if mutant == wildtype {
                    stats.syn_poss += 1;
                    stats.syn_rate += probability;
                } else {
                    stats.mis_rate += probability;
                    if mutant != crate::core::seq::STOP {
                        stats.mis_poss += 1;
                    }
                }
            }
        }
        stats.syn_sites = f64::from(stats.syn_poss) / 3.0;
        stats.mis_sites = f64::from(stats.mis_poss) / 3.0;
        all.push(stats);
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seq::CodingSequence;

    fn stats_for(seq: &str) -> Vec<CodonStats> {
        codon_stats(&CodingSequence::parse("test", seq).unwrap())
    }

    #[test]
    fn enumeration_bound() {
        // Possible outcomes per codon never exceed the 9 enumerable
        // substitutions, minus identity (already excluded) and stops.
        for seq in ["ATG", "AAA", "TGG", "CGA", "TTT", "ATGAAACCCGGG"] {
            for stats in stats_for(seq) {
                assert!(stats.syn_poss + stats.mis_poss <= 9);
                assert!((stats.syn_sites - f64::from(stats.syn_poss) / 3.0).abs() < 1e-12);
                assert!((stats.mis_sites - f64::from(stats.mis_poss) / 3.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn methionine_has_no_synonymous_outcome() {
        // ATG is the only Met codon: every substitution changes the residue.
        let stats = &stats_for("ATG")[0];
        assert_eq!(stats.syn_poss, 0);
        assert_eq!(stats.syn_rate, 0.0);
        assert!(stats.mis_rate > 0.0);
    }

    #[test]
    fn fourfold_degenerate_third_position() {
        // GGG (Gly): any third-position change is synonymous.
        let stats = &stats_for("GGG")[0];
        assert_eq!(stats.syn_poss, 3);
    }

    #[test]
    fn nonsense_excluded_from_counts_but_not_rates() {
        // TGG (Trp): TAG/TGA/TAA reachable; TGG->TAG and TGG->TGA are stops.
        let stats = &stats_for("TGG")[0];
        assert_eq!(stats.syn_poss, 0);
        assert_eq!(stats.mis_poss, 7);
        // The rate side still sees all 9 substitutions.
        let total_rate = stats.syn_rate + stats.mis_rate;
        let floor = 9.0 * TRANSVERSION_RATE;
        assert!(total_rate >= floor);
    }

    #[test]
    fn cpg_transition_is_accelerated() {
        let cpg = substitution_probability(
            [Nucleotide::A, Nucleotide::C, Nucleotide::G],
            Nucleotide::T,
        );
        let plain = substitution_probability(
            [Nucleotide::A, Nucleotide::C, Nucleotide::A],
            Nucleotide::T,
        );
        assert!((cpg / plain - CPG_FACTOR).abs() < 1e-12);
        // Mirror on the reverse strand orientation: G->A with 5' C.
        let mirror = substitution_probability(
            [Nucleotide::C, Nucleotide::G, Nucleotide::T],
            Nucleotide::A,
        );
        assert_eq!(mirror, cpg);
    }

    #[test]
    fn stats_are_deterministic() {
        assert_eq!(stats_for("ATGAAACCC"), stats_for("ATGAAACCC"));
    }
}
