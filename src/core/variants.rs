use std::collections::HashMap;

use derive_getters::Getters;

/// One population variant lifted to peptide coordinates: wild-type residue,
/// 1-based position, observed residue, and gnomAD allele counts.
#[derive(Clone, Debug, PartialEq, Eq, Getters)]
pub struct Variant {
    wildtype: char,
    position: usize,
    mutant: char,
    allele_count: u32,
    allele_number: u32,
}

impl Variant {
    pub fn new(wildtype: char, position: usize, mutant: char, allele_count: u32, allele_number: u32) -> Self {
        Variant { wildtype, position, mutant, allele_count, allele_number }
    }

    /// Parse the compact `"M1K"` notation: wild-type residue, position,
    /// mutant residue. Synonymous records repeat the residue (`"L7L"`).
    pub fn parse(change: &str, allele_count: u32, allele_number: u32) -> Option<Self> {
        let mut chars = change.chars();
        let wildtype = chars.next()?;
        let mutant = chars.next_back()?;
        let position: usize = chars.as_str().parse().ok()?;
        if position == 0 || !wildtype.is_ascii_alphabetic() || !mutant.is_ascii_alphabetic() {
            return None;
        }
        Some(Variant { wildtype, position, mutant, allele_count, allele_number })
    }

    #[inline]
    pub fn is_missense(&self) -> bool {
        self.wildtype != self.mutant
    }

    /// Allele frequency; 0 when the allele number is unreported.
    pub fn frequency(&self) -> f64 {
        if self.allele_number == 0 {
            return 0.0;
        }
        f64::from(self.allele_count) / f64::from(self.allele_number)
    }
}

/// Per-position variant counts with pure default-to-zero lookups. Unlike the
/// usual default-dict pattern, reading a position never inserts it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionCounts {
    counts: HashMap<usize, u32>,
}

impl PositionCounts {
    fn increment(&mut self, position: usize) {
        *self.counts.entry(position).or_insert(0) += 1;
    }

    /// Observed variants at a 1-based position; 0 for unseen positions.
    #[inline]
    pub fn count(&self, position: usize) -> u32 {
        self.counts.get(&position).copied().unwrap_or(0)
    }

    /// Site-variability indicator: 1 if anything was observed here, else 0.
    #[inline]
    pub fn variable(&self, position: usize) -> u32 {
        u32::from(self.counts.contains_key(&position))
    }

    /// Sum over all positions.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Missense and synonymous tallies for one transcript.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariantCounts {
    pub missense: PositionCounts,
    pub synonymous: PositionCounts,
}

/// Tabulate variants into per-position missense/synonymous counts. With a
/// frequency threshold, variants with allele_count/allele_number strictly
/// above it are excluded entirely: they neither count nor mark the site
/// as variable.
pub fn tabulate(variants: &[Variant], threshold: Option<f64>) -> VariantCounts {
    let mut counts = VariantCounts::default();
    for variant in variants {
        if let Some(threshold) = threshold {
            if variant.frequency() > threshold {
                continue;
            }
        }
        if variant.is_missense() {
            counts.missense.increment(*variant.position());
        } else {
            counts.synonymous.increment(*variant.position());
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_change() {
        let variant = Variant::parse("M1K", 1, 1000).unwrap();
        assert_eq!(*variant.wildtype(), 'M');
        assert_eq!(*variant.position(), 1);
        assert_eq!(*variant.mutant(), 'K');
        assert!(variant.is_missense());

        let synonymous = Variant::parse("L1234L", 7, 2000).unwrap();
        assert_eq!(*synonymous.position(), 1234);
        assert!(!synonymous.is_missense());

        for bad in ["", "M", "MK", "MxK", "M0K", "1K"] {
            assert!(Variant::parse(bad, 1, 1).is_none(), "{:?} parsed", bad);
        }
    }

    #[test]
    fn single_missense_counts_once() {
        // CDS ATGAAATAA / peptide MK / one missense at position 1.
        let counts = tabulate(&[Variant::parse("M1K", 1, 1000).unwrap()], None);
        assert_eq!(counts.missense.count(1), 1);
        assert_eq!(counts.missense.total(), 1);
        assert!(counts.synonymous.is_empty());
    }

    #[test]
    fn partition() {
        let variants = vec![
            Variant::parse("M1K", 1, 1000).unwrap(),
            Variant::parse("K2K", 1, 1000).unwrap(),
            Variant::parse("K2R", 1, 1000).unwrap(),
            Variant::parse("K2R", 1, 1000).unwrap(),
        ];
        let counts = tabulate(&variants, None);
        // Every variant lands in exactly one of the two tallies.
        assert_eq!(counts.missense.total() + counts.synonymous.total(), variants.len() as u32);
        assert_eq!(counts.missense.count(2), 2);
        assert_eq!(counts.synonymous.count(2), 1);
    }

    #[test]
    fn frequency_filter_excludes_entirely() {
        let variants = vec![
            Variant::new('M', 1, 'K', 10, 1000), // freq 0.01 > 0.001: excluded
            Variant::new('K', 2, 'K', 1, 10_000),
            Variant::new('A', 3, 'V', 0, 0), // unreported AN: kept
        ];
        let counts = tabulate(&variants, Some(0.001));
        assert_eq!(counts.missense.count(1), 0);
        assert_eq!(counts.missense.variable(1), 0);
        assert_eq!(counts.synonymous.count(2), 1);
        assert_eq!(counts.missense.count(3), 1);
    }

    #[test]
    fn lookup_never_inserts() {
        let counts = tabulate(&[], None);
        assert_eq!(counts.missense.count(42), 0);
        assert_eq!(counts.missense.variable(42), 0);
        assert!(counts.missense.is_empty());
    }
}
