//! Noisy channel simulation.
//!
//! Error injection for exercising a code: random single- and multi-bit flips on one
//! codeword, and per-block error patterns for a sequence of codewords sent over a channel
//! with a given error probability.
//!
//! [`ErrorInjector`] owns a ChaCha20 generator so runs can be reproduced from a seed.

use crate::cs::ecc::binary::BinaryVector;
use crate::cs::ecc::Result;
use crate::cs::error::Error;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Flips `flips` randomly chosen bits of a copy of `v`.
///
/// Positions are drawn independently, so the same bit can be picked twice and the two flips
/// cancel out.
pub fn flip_random_bits<R: Rng + ?Sized>(
    v: &BinaryVector,
    flips: usize,
    rng: &mut R,
) -> Result<BinaryVector> {
    if v.is_empty() {
        return Err(Error::Validation(
            "cannot flip bits of an empty vector".to_string(),
        ));
    }

    let mut corrupted = v.clone();
    for _ in 0..flips {
        corrupted.flip(rng.gen_range(0..v.len()))?;
    }
    Ok(corrupted)
}

/// XORs every block with its error pattern.
///
/// # Errors
///
/// [`Error::LengthMismatch`] if the counts or any pair of lengths differ.
pub fn apply_errors(
    blocks: &[BinaryVector],
    patterns: &[BinaryVector],
) -> Result<Vec<BinaryVector>> {
    if blocks.len() != patterns.len() {
        return Err(Error::LengthMismatch {
            expected: blocks.len(),
            actual: patterns.len(),
        });
    }
    blocks
        .iter()
        .zip(patterns)
        .map(|(block, pattern)| block.xor(pattern))
        .collect()
}

fn check_probability(probability: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(Error::InvalidProbability(probability));
    }
    Ok(())
}

/// Seedable source of transmission errors
#[derive(Debug, Clone)]
pub struct ErrorInjector {
    rng: ChaCha20Rng,
}

impl ErrorInjector {
    /// Injector seeded from system entropy
    pub fn new() -> Self {
        ErrorInjector {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Deterministic injector for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        ErrorInjector {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Copy of `v` with one random bit flipped
    pub fn flip_one(&mut self, v: &BinaryVector) -> Result<BinaryVector> {
        flip_random_bits(v, 1, &mut self.rng)
    }

    /// Copy of `v` with two random bits flipped (possibly the same bit twice)
    pub fn flip_two(&mut self, v: &BinaryVector) -> Result<BinaryVector> {
        flip_random_bits(v, 2, &mut self.rng)
    }

    /// One error pattern per block: with `probability`, a single random bit is set,
    /// otherwise the pattern is all zeros.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidProbability`] unless `0 <= probability <= 1`.
    pub fn single_bit_error_patterns(
        &mut self,
        blocks: &[BinaryVector],
        probability: f64,
    ) -> Result<Vec<BinaryVector>> {
        check_probability(probability)?;

        let mut patterns = Vec::with_capacity(blocks.len());
        for block in blocks {
            let mut pattern = BinaryVector::zeros(block.len());
            if !block.is_empty() && self.rng.gen::<f64>() < probability {
                pattern.flip(self.rng.gen_range(0..block.len()))?;
            }
            patterns.push(pattern);
        }
        Ok(patterns)
    }

    /// One error pattern per block where every bit is set independently with `probability`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidProbability`] unless `0 <= probability <= 1`.
    pub fn multi_bit_error_patterns(
        &mut self,
        blocks: &[BinaryVector],
        probability: f64,
    ) -> Result<Vec<BinaryVector>> {
        check_probability(probability)?;

        Ok(blocks
            .iter()
            .map(|block| {
                (0..block.len())
                    .map(|_| self.rng.gen::<f64>() < probability)
                    .collect()
            })
            .collect())
    }
}

impl Default for ErrorInjector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(count: usize, len: usize) -> Vec<BinaryVector> {
        vec![BinaryVector::zeros(len); count]
    }

    #[test]
    fn test_flip_one() {
        let mut injector = ErrorInjector::with_seed(1);
        let v: BinaryVector = "1011010".parse().unwrap();
        for _ in 0..50 {
            let corrupted = injector.flip_one(&v).unwrap();
            assert_eq!(corrupted.xor(&v).unwrap().count_ones(), 1);
        }
        assert_eq!(v.to_string(), "1011010");
    }

    #[test]
    fn test_flip_two_may_collide() {
        let mut injector = ErrorInjector::with_seed(3);
        // A two-bit vector collides half the time
        let v: BinaryVector = "10".parse().unwrap();
        let mut collisions = 0;
        for _ in 0..200 {
            let distance = injector.flip_two(&v).unwrap().xor(&v).unwrap().count_ones();
            assert!(distance == 0 || distance == 2);
            if distance == 0 {
                collisions += 1;
            }
        }
        assert!(collisions > 0);
    }

    #[test]
    fn test_flip_empty_vector() {
        let mut injector = ErrorInjector::with_seed(0);
        assert!(matches!(
            injector.flip_one(&BinaryVector::zeros(0)),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_seeded_injectors_agree() {
        let v = BinaryVector::zeros(31);
        let mut a = ErrorInjector::with_seed(99);
        let mut b = ErrorInjector::with_seed(99);
        for _ in 0..10 {
            assert_eq!(a.flip_two(&v).unwrap(), b.flip_two(&v).unwrap());
        }
    }

    #[test]
    fn test_single_bit_error_patterns() {
        let mut injector = ErrorInjector::with_seed(5);
        let input = blocks(100, 7);

        let always = injector.single_bit_error_patterns(&input, 1.0).unwrap();
        assert_eq!(always.len(), 100);
        assert!(always.iter().all(|p| p.len() == 7 && p.count_ones() == 1));

        let never = injector.single_bit_error_patterns(&input, 0.0).unwrap();
        assert!(never.iter().all(BinaryVector::is_zero));
    }

    #[test]
    fn test_multi_bit_error_patterns() {
        let mut injector = ErrorInjector::with_seed(11);
        let input = blocks(20, 12);

        let all = injector.multi_bit_error_patterns(&input, 1.0).unwrap();
        assert!(all.iter().all(|p| p.count_ones() == 12));

        let none = injector.multi_bit_error_patterns(&input, 0.0).unwrap();
        assert!(none.iter().all(BinaryVector::is_zero));

        let some = injector.multi_bit_error_patterns(&input, 0.5).unwrap();
        let ones: usize = some.iter().map(BinaryVector::count_ones).sum();
        assert!(ones > 0 && ones < 240);
    }

    #[test]
    fn test_invalid_probability() {
        let mut injector = ErrorInjector::with_seed(0);
        let input = blocks(1, 7);
        for bad in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                injector.single_bit_error_patterns(&input, bad),
                Err(Error::InvalidProbability(_))
            ));
            assert!(matches!(
                injector.multi_bit_error_patterns(&input, bad),
                Err(Error::InvalidProbability(_))
            ));
        }
    }

    #[test]
    fn test_apply_errors() {
        let sent: Vec<BinaryVector> = vec!["1010".parse().unwrap(), "1111".parse().unwrap()];
        let patterns: Vec<BinaryVector> = vec!["0010".parse().unwrap(), "0000".parse().unwrap()];
        let received = apply_errors(&sent, &patterns).unwrap();
        assert_eq!(received[0].to_string(), "1000");
        assert_eq!(received[1].to_string(), "1111");

        assert!(apply_errors(&sent, &patterns[..1]).is_err());
    }
}
