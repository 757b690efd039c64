use std::fmt::{Display, Formatter};

use crate::core::error::TranscriptError;

/// Strict coding alphabet. Anything outside A/C/G/T fails CDS validation
/// upstream, so no `Unknown` member is carried around.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
}

impl Nucleotide {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'A' | 'a' => Some(Nucleotide::A),
            'C' | 'c' => Some(Nucleotide::C),
            'G' | 'g' => Some(Nucleotide::G),
            'T' | 't' => Some(Nucleotide::T),
            _ => None,
        }
    }

    #[inline]
    pub fn is_gc(&self) -> bool {
        matches!(self, Nucleotide::G | Nucleotide::C)
    }

    #[inline]
    fn index(&self) -> usize {
        match self {
            Nucleotide::A => 0,
            Nucleotide::C => 1,
            Nucleotide::G => 2,
            Nucleotide::T => 3,
        }
    }

    pub const ALL: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T];
}

impl Display for Nucleotide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Nucleotide::A => write!(f, "A"),
            Nucleotide::C => write!(f, "C"),
            Nucleotide::G => write!(f, "G"),
            Nucleotide::T => write!(f, "T"),
        }
    }
}

// Standard genetic code, indexed as 16*first + 4*second + third with
// A=0, C=1, G=2, T=3. '*' marks stop codons.
const GENETIC_CODE: &[u8; 64] =
    b"KNKNTTTTRSRSIIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVV*Y*YSSSS*CWCLFLF";

pub const STOP: char = '*';

/// A single codon. Translation and single-nucleotide substitution enumeration
/// live here; mutation probabilities live in [`crate::core::mutrate`].
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Codon(pub [Nucleotide; 3]);

impl Codon {
    pub fn translate(&self) -> char {
        let idx = self.0[0].index() * 16 + self.0[1].index() * 4 + self.0[2].index();
        GENETIC_CODE[idx] as char
    }

    pub fn is_stop(&self) -> bool {
        self.translate() == STOP
    }

    /// The codon with position `offset` (0..3) replaced by `alt`.
    pub fn substitute(&self, offset: usize, alt: Nucleotide) -> Codon {
        debug_assert!(offset < 3);
        let mut nucs = self.0;
        nucs[offset] = alt;
        Codon(nucs)
    }
}

impl Display for Codon {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.0[0], self.0[1], self.0[2])
    }
}

/// A validated coding sequence: A/C/G/T only and a whole number of codons.
/// Whether the trailing stop codon is still present is up to the caller;
/// [`CodingSequence::trim_stop`] drops it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CodingSequence {
    nucs: Vec<Nucleotide>,
}

impl CodingSequence {
    pub fn parse(id: &str, sequence: &str) -> Result<Self, TranscriptError> {
        let mut nucs = Vec::with_capacity(sequence.len());
        for symbol in sequence.chars() {
            match Nucleotide::from_symbol(symbol) {
                Some(nuc) => nucs.push(nuc),
                None => {
                    return Err(TranscriptError::InvalidAlphabet { id: id.to_owned(), symbol })
                }
            }
        }
        if nucs.len() % 3 != 0 {
            return Err(TranscriptError::IncompleteCds { id: id.to_owned(), nucleotides: nucs.len() });
        }
        Ok(CodingSequence { nucs })
    }

    /// Enforce `codons == peptide + 1`, i.e. a complete CDS ending in a stop.
    pub fn concordant_with(&self, id: &str, peptide: usize) -> Result<(), TranscriptError> {
        if self.codons() != peptide + 1 {
            return Err(TranscriptError::LengthMismatch {
                id: id.to_owned(),
                codons: self.codons(),
                peptide,
            });
        }
        Ok(())
    }

    /// Drop the trailing (stop) codon.
    pub fn trim_stop(mut self) -> Self {
        debug_assert!(self.codons() > 0);
        self.nucs.truncate(self.nucs.len() - 3);
        self
    }

    #[inline]
    pub fn codons(&self) -> usize {
        self.nucs.len() / 3
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nucs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nucs.is_empty()
    }

    /// Codon at 0-based index.
    pub fn codon(&self, index: usize) -> Codon {
        let start = index * 3;
        Codon([self.nucs[start], self.nucs[start + 1], self.nucs[start + 2]])
    }

    /// The three nucleotides of the codon at 0-based index.
    pub fn codon_window(&self, index: usize) -> &[Nucleotide] {
        &self.nucs[index * 3..index * 3 + 3]
    }

    /// Trinucleotide context (5' flank, reference, 3' flank) of the nucleotide
    /// at `offset` (0..3) in the codon at `index`. Flanks cross codon borders;
    /// at the ends of the sequence the missing flank falls back to the
    /// reference base itself so the lookup stays total.
    pub fn context(&self, index: usize, offset: usize) -> [Nucleotide; 3] {
        let global = index * 3 + offset;
        let reference = self.nucs[global];
        let five = if global > 0 { self.nucs[global - 1] } else { reference };
        let three = if global + 1 < self.nucs.len() { self.nucs[global + 1] } else { reference };
        [five, reference, three]
    }
}

/// Fraction of G/C bases; 0 for an empty slice.
pub fn gc_fraction(nucs: &[Nucleotide]) -> f64 {
    if nucs.is_empty() {
        return 0.0;
    }
    let gc = nucs.iter().filter(|x| x.is_gc()).count();
    gc as f64 / nucs.len() as f64
}

/// Concatenated codon windows of the given 1-based peptide positions.
/// Callers are expected to pass in-range positions only.
pub fn codon_seq_context(positions: &[usize], cds: &CodingSequence) -> Vec<Nucleotide> {
    let mut context = Vec::with_capacity(positions.len() * 3);
    for &pos in positions {
        debug_assert!(pos >= 1 && pos <= cds.codons());
        context.extend_from_slice(cds.codon_window(pos - 1));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate() {
        let parse = |s: &str| CodingSequence::parse("test", s).unwrap().codon(0);
        assert_eq!(parse("ATG").translate(), 'M');
        assert_eq!(parse("AAA").translate(), 'K');
        assert_eq!(parse("TGG").translate(), 'W');
        assert_eq!(parse("TTT").translate(), 'F');
        for stop in ["TAA", "TAG", "TGA"] {
            assert!(parse(stop).is_stop());
        }
    }

    #[test]
    fn translate_full_code() {
        // Every codon translates to exactly one of the 20 amino acids or stop.
        let mut stops = 0;
        for a in Nucleotide::ALL {
            for b in Nucleotide::ALL {
                for c in Nucleotide::ALL {
                    let aa = Codon([a, b, c]).translate();
                    assert!(aa == STOP || aa.is_ascii_uppercase());
                    if aa == STOP {
                        stops += 1;
                    }
                }
            }
        }
        assert_eq!(stops, 3);
    }

    #[test]
    fn parse_rejects_bad_alphabet() {
        assert!(matches!(
            CodingSequence::parse("t", "ATN"),
            Err(TranscriptError::InvalidAlphabet { symbol: 'N', .. })
        ));
        assert!(matches!(
            CodingSequence::parse("t", "ATGA"),
            Err(TranscriptError::IncompleteCds { nucleotides: 4, .. })
        ));
    }

    #[test]
    fn concordance() {
        let cds = CodingSequence::parse("t", "ATGAAATAA").unwrap();
        assert!(cds.concordant_with("t", 2).is_ok());
        assert!(cds.concordant_with("t", 3).is_err());
        let trimmed = cds.trim_stop();
        assert_eq!(trimmed.codons(), 2);
        assert_eq!(trimmed.codon(1).translate(), 'K');
    }

    #[test]
    fn context_crosses_codons_and_clamps_at_ends() {
        let cds = CodingSequence::parse("t", "ATGAAA").unwrap();
        // First base has no 5' flank: falls back onto itself.
        assert_eq!(cds.context(0, 0), [Nucleotide::A, Nucleotide::A, Nucleotide::T]);
        // Middle of codon 0.
        assert_eq!(cds.context(0, 1), [Nucleotide::A, Nucleotide::T, Nucleotide::G]);
        // Last base of codon 0 reaches into codon 1.
        assert_eq!(cds.context(0, 2), [Nucleotide::T, Nucleotide::G, Nucleotide::A]);
        // Last base of the sequence: 3' flank falls back onto itself.
        assert_eq!(cds.context(1, 2), [Nucleotide::A, Nucleotide::A, Nucleotide::A]);
    }

    #[test]
    fn gc() {
        let cds = CodingSequence::parse("t", "GCGCAT").unwrap();
        assert_eq!(gc_fraction(cds.codon_window(0)), 1.0);
        let context = codon_seq_context(&[1, 2], &cds);
        assert_eq!(context.len(), 6);
        assert!((gc_fraction(&context) - 4.0 / 6.0).abs() < 1e-12);
        assert_eq!(gc_fraction(&[]), 0.0);
    }
}
