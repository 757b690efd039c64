use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Monte-Carlo null distribution of variant placements: `trials` rows, one
/// column per peptide position. Each row places `total` indistinguishable
/// events, either uniformly or under a categorical distribution proportional
/// to per-codon mutation rates. Built once per transcript with an explicit
/// seed and shared by every position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationMatrix {
    trials: usize,
    length: usize,
    data: Vec<u32>,
}

/// Null statistics of one contact set: mean/sd of the simulated totals and
/// the upper-tail empirical p-value of the observed total.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PermutationStats {
    pub mean: f64,
    pub sd: f64,
    pub p_value: f64,
}

impl PermutationMatrix {
    /// Uniform placement: every position is equally likely.
    pub fn uniform(trials: usize, length: usize, total: u32, seed: u64) -> Self {
        debug_assert!(length > 0);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut data = vec![0u32; trials * length];
        for row in data.chunks_exact_mut(length) {
            for _ in 0..total {
                row[rng.gen_range(0..length)] += 1;
            }
        }
        PermutationMatrix { trials, length, data }
    }

    /// Weighted placement: positions drawn proportionally to `weights`
    /// (typically per-codon missense or synonymous mutation rates; they are
    /// normalized internally). Degenerate all-zero weights place uniformly.
    pub fn weighted(trials: usize, length: usize, total: u32, weights: &[f64], seed: u64) -> Self {
        debug_assert_eq!(weights.len(), length);
        let mut cumulative = Vec::with_capacity(length);
        let mut sum = 0.0;
        for &w in weights {
            debug_assert!(w >= 0.0);
            sum += w;
            cumulative.push(sum);
        }
        if sum <= 0.0 {
            return Self::uniform(trials, length, total, seed);
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut data = vec![0u32; trials * length];
        for row in data.chunks_exact_mut(length) {
            for _ in 0..total {
                let draw = rng.gen::<f64>() * sum;
                let position = cumulative.partition_point(|&edge| edge <= draw).min(length - 1);
                row[position] += 1;
            }
        }
        PermutationMatrix { trials, length, data }
    }

    #[inline]
    pub fn trials(&self) -> usize {
        self.trials
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    fn row(&self, trial: usize) -> &[u32] {
        &self.data[trial * self.length..(trial + 1) * self.length]
    }

    /// Null mean/sd/p-value of the observed count over the contact set given
    /// as 1-based peptide positions. The p-value is the fraction of trials
    /// with a simulated total >= observed, floored at 1/trials so an exact
    /// zero is never reported.
    pub fn evaluate(&self, positions: &[usize], observed: u32) -> PermutationStats {
        let mut sum = 0.0;
        let mut sumsq = 0.0;
        let mut at_least = 0usize;
        for trial in 0..self.trials {
            let row = self.row(trial);
            let total: u32 = positions.iter().map(|&pos| row[pos - 1]).sum();
            let total = f64::from(total);
            sum += total;
            sumsq += total * total;
            if total >= f64::from(observed) {
                at_least += 1;
            }
        }
        let trials = self.trials as f64;
        let mean = sum / trials;
        let sd = (sumsq / trials - mean * mean).max(0.0).sqrt();
        let p_value = at_least.max(1) as f64 / trials;
        PermutationStats { mean, sd, p_value }
    }
}
