//! Seeded label shuffling for permutation null distributions
//!
//! Permutation reassigns labels across points while positions stay fixed,
//! which preserves marginal label frequencies while destroying any spatial
//! structure. An explicit seed makes replicate sequences reproducible.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Reusable shuffler over a fixed code vector
#[derive(Debug)]
pub struct LabelPermuter {
    rng: StdRng,
    codes: Vec<usize>,
}

impl LabelPermuter {
    /// Create a permuter over the observed code assignment
    pub fn new(codes: &[usize], seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            codes: codes.to_vec(),
        }
    }

    /// Shuffle in place and return the next permuted assignment
    pub fn next_permutation(&mut self) -> &[usize] {
        self.codes.shuffle(&mut self.rng);
        &self.codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutation_preserves_multiset() {
        let codes = vec![0, 0, 1, 1, 1, 2];
        let mut permuter = LabelPermuter::new(&codes, 7);

        let mut shuffled = permuter.next_permutation().to_vec();
        shuffled.sort_unstable();
        assert_eq!(shuffled, codes);
    }

    #[test]
    fn test_same_seed_replays_identically() {
        let codes: Vec<usize> = (0..50).collect();
        let mut first = LabelPermuter::new(&codes, 42);
        let mut second = LabelPermuter::new(&codes, 42);

        for _ in 0..5 {
            assert_eq!(first.next_permutation(), second.next_permutation());
        }
    }
}
