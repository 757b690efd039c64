use itertools::Itertools;

use crate::core::mapping::PositionMapper;
use crate::core::mutrate::CodonStats;
use crate::core::seq::{codon_seq_context, gc_fraction, CodingSequence};
use crate::core::variants::VariantCounts;

/// Everything the contact set of one residue contributes to its record:
/// summed mutational capacity, summed observations, sequence context and the
/// separations string. Positions are 1-based peptide coordinates with the
/// center first.
#[derive(Clone, Debug, PartialEq)]
pub struct ContactAggregate {
    pub positions: Vec<usize>,
    /// Contact-set size: the center plus the retained neighbors.
    pub num_contacts: usize,
    pub seq_separations: String,
    pub syn_var_sites: u32,
    pub mis_var_sites: u32,
    pub total_syn_sites: f64,
    pub total_mis_sites: f64,
    pub syn_poss: u32,
    pub mis_poss: u32,
    pub gc_content: f64,
    pub syn_prob: f64,
    pub mis_prob: f64,
    pub syn_obs: u32,
    pub mis_obs: u32,
    /// Structural neighbors that could not be placed on the peptide.
    pub dropped: Vec<i64>,
}

/// Fold the contact set of `center_peptide` into a [`ContactAggregate`].
///
/// `neighbors` are structural residue numbers; each is mapped back to the
/// peptide and dropped (recorded, not fatal) when the mapping fails or lands
/// outside `1..=length`. The center itself is always part of the set.
pub fn aggregate(
    center_peptide: usize,
    center_residue: i64,
    neighbors: &[i64],
    mapper: &dyn PositionMapper,
    counts: &VariantCounts,
    stats: &[CodonStats],
    cds: &CodingSequence,
) -> ContactAggregate {
    let length = stats.len();
    debug_assert_eq!(length, cds.codons());
    debug_assert!(center_peptide >= 1 && center_peptide <= length);

    let mut positions = vec![center_peptide];
    let mut retained = Vec::with_capacity(neighbors.len());
    let mut dropped = Vec::new();
    for &residue in neighbors {
        match mapper.to_peptide(residue).filter(|&pos| pos >= 1 && pos <= length) {
            Some(pos) => {
                positions.push(pos);
                retained.push(residue);
            }
            None => dropped.push(residue),
        }
    }

    let seq_separations = retained.iter().map(|residue| residue - center_residue).join(";");

    let mut summed = CodonStats::default();
    let (mut syn_var_sites, mut mis_var_sites) = (0, 0);
    let (mut syn_obs, mut mis_obs) = (0, 0);
    for &pos in &positions {
        summed += stats[pos - 1];
        syn_var_sites += counts.synonymous.variable(pos);
        mis_var_sites += counts.missense.variable(pos);
        syn_obs += counts.synonymous.count(pos);
        mis_obs += counts.missense.count(pos);
    }
    let gc_content = gc_fraction(&codon_seq_context(&positions, cds));

    ContactAggregate {
        num_contacts: retained.len() + 1,
        positions,
        seq_separations,
        syn_var_sites,
        mis_var_sites,
        total_syn_sites: summed.syn_sites,
        total_mis_sites: summed.mis_sites,
        syn_poss: summed.syn_poss,
        mis_poss: summed.mis_poss,
        gc_content,
        syn_prob: summed.syn_rate,
        mis_prob: summed.mis_rate,
        syn_obs,
        mis_obs,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::*;

    use super::*;
    use crate::core::mapping::{IdentityMapper, MockPositionMapper};
    use crate::core::mutrate::codon_stats;
    use crate::core::variants::{tabulate, Variant};

    fn fixture() -> (CodingSequence, Vec<CodonStats>, VariantCounts) {
        // 10 codons, no stop.
        let cds = CodingSequence::parse("t", "ATGAAACCCGGGTTTCTGATCGACGAGAAG").unwrap();
        let stats = codon_stats(&cds);
        let counts = tabulate(
            &[
                Variant::parse("M5K", 1, 100).unwrap(),
                Variant::parse("M5R", 1, 100).unwrap(),
                Variant::parse("A3V", 1, 100).unwrap(),
                Variant::parse("L9L", 1, 100).unwrap(),
            ],
            None,
        );
        (cds, stats, counts)
    }

    #[test]
    fn observed_counts_sum_over_contact_set() {
        let (cds, stats, counts) = fixture();
        let agg = aggregate(5, 5, &[3, 9], &IdentityMapper, &counts, &stats, &cds);
        assert_eq!(agg.positions, vec![5, 3, 9]);
        assert_eq!(agg.num_contacts, 3);
        assert_eq!(agg.mis_obs, 3);
        assert_eq!(agg.mis_var_sites, 2);
        assert_eq!(agg.syn_obs, 1);
        assert_eq!(agg.syn_var_sites, 1);
        assert_eq!(agg.seq_separations, "-2;4");
        assert!(agg.dropped.is_empty());
    }

    #[test]
    fn capacity_is_the_sum_of_per_codon_stats() {
        let (cds, stats, counts) = fixture();
        let agg = aggregate(1, 1, &[2], &IdentityMapper, &counts, &stats, &cds);
        let expected = stats[0] + stats[1];
        assert_eq!(agg.syn_poss, expected.syn_poss);
        assert_eq!(agg.mis_poss, expected.mis_poss);
        assert!((agg.mis_prob - expected.mis_rate).abs() < 1e-18);
        assert!((agg.total_mis_sites - expected.mis_sites).abs() < 1e-12);
    }

    #[test]
    fn unmappable_neighbors_are_dropped_not_fatal() {
        let (cds, stats, counts) = fixture();
        // 40 is past the peptide, -1 cannot map at all.
        let agg = aggregate(5, 5, &[3, 40, -1], &IdentityMapper, &counts, &stats, &cds);
        assert_eq!(agg.positions, vec![5, 3]);
        assert_eq!(agg.num_contacts, 2);
        assert_eq!(agg.dropped, vec![40, -1]);
        assert_eq!(agg.seq_separations, "-2");
    }

    #[test]
    fn neighbors_are_resolved_through_the_mapper() {
        let (cds, stats, counts) = fixture();
        let mut mapper = MockPositionMapper::new();
        mapper.expect_to_peptide().with(eq(105)).times(1).return_const(Some(3usize));
        mapper.expect_to_peptide().with(eq(200)).times(1).return_const(None);

        let agg = aggregate(5, 102, &[105, 200], &mapper, &counts, &stats, &cds);
        assert_eq!(agg.positions, vec![5, 3]);
        assert_eq!(agg.seq_separations, "3");
        assert_eq!(agg.dropped, vec![200]);
    }

    #[test]
    fn isolated_residue_keeps_only_itself() {
        let (cds, stats, counts) = fixture();
        let agg = aggregate(7, 7, &[], &IdentityMapper, &counts, &stats, &cds);
        assert_eq!(agg.positions, vec![7]);
        // A set of itself only still has size 1.
        assert_eq!(agg.num_contacts, 1);
        assert_eq!(agg.seq_separations, "");
        assert_eq!(agg.gc_content, gc_fraction(cds.codon_window(6)));
    }
}
