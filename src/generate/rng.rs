//! Seeded random source owned by each generator.
//!
//! Every generator constructs its own [`RandomSource`] from a seed. There is no
//! process-wide generator: the same seed always yields the same draw stream,
//! on every platform, regardless of what other generators are doing.

use crate::error::{Result, SynthError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Gamma, Normal, Poisson};

/// Negative binomial distribution in the number-of-failures form.
///
/// Counts failures before the `n`-th success, each trial succeeding with
/// probability `p`. Sampled as a Gamma-Poisson mixture: if
/// `L ~ Gamma(n, (1 - p) / p)` and `X | L ~ Poisson(L)` then `X ~ NB(n, p)`.
#[derive(Debug, Clone)]
pub struct NegativeBinomial {
    n: f64,
    p: f64,
    gamma: Option<Gamma<f64>>,
}

impl NegativeBinomial {
    /// Validate `n > 0` and `0 < p <= 1` and build the distribution.
    pub fn new(n: f64, p: f64) -> Result<Self> {
        if !(n > 0.0) || !n.is_finite() {
            return Err(SynthError::InvalidParameter(format!(
                "neg_binomial_n must be a positive finite number, got {}",
                n
            )));
        }
        if !(p > 0.0 && p <= 1.0) {
            return Err(SynthError::InvalidParameter(format!(
                "neg_binomial_p must be in (0, 1], got {}",
                p
            )));
        }

        // p == 1 is a point mass at zero
        let gamma = if p < 1.0 {
            let scale = (1.0 - p) / p;
            if !scale.is_finite() {
                return Err(SynthError::InvalidParameter(format!(
                    "neg_binomial_p = {} is too small to sample from",
                    p
                )));
            }
            let gamma = Gamma::new(n, scale).map_err(|e| {
                SynthError::InvalidParameter(format!("invalid gamma parameters: {}", e))
            })?;
            if !(n * scale < COUNT_LIMIT) {
                return Err(SynthError::InvalidParameter(format!(
                    "expected count n (1 - p) / p = {} exceeds the u64 count range",
                    n * scale
                )));
            }
            Some(gamma)
        } else {
            None
        };

        Ok(Self { n, p, gamma })
    }

    /// Shape parameter (number of successes).
    pub fn n(&self) -> f64 {
        self.n
    }

    /// Success probability.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Expected count, `n (1 - p) / p`.
    pub fn mean(&self) -> f64 {
        self.n * (1.0 - self.p) / self.p
    }
}

impl NegativeBinomial {
    /// Draw one count.
    ///
    /// Fails when the Gamma rate or the Poisson draw does not fit in a `u64`.
    pub fn try_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<u64> {
        let Some(gamma) = &self.gamma else {
            return Ok(0);
        };
        let lambda = gamma.sample(rng);
        count_from_rate(lambda, rng)
    }
}

/// Smallest `f64` that no longer fits in a `u64` (2^64).
const COUNT_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Draw `Poisson(lambda)` as a count; a non-positive rate is a point mass at 0.
fn count_from_rate<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> Result<u64> {
    if !(lambda > 0.0) {
        return Ok(0);
    }
    if !(lambda < COUNT_LIMIT) {
        return Err(SynthError::Numerical(format!(
            "negative binomial rate {} exceeds the u64 count range",
            lambda
        )));
    }
    let poisson = Poisson::new(lambda)
        .map_err(|e| SynthError::Numerical(format!("invalid poisson rate {}: {}", lambda, e)))?;
    let count: f64 = poisson.sample(rng);
    if !(count < COUNT_LIMIT) {
        return Err(SynthError::Numerical(format!(
            "poisson draw {} exceeds the u64 count range",
            count
        )));
    }
    Ok(count as u64)
}

/// Deterministic pseudo-random source backed by ChaCha8.
///
/// Not `Clone`: each generator owns exactly one stream.
#[derive(Debug)]
pub struct RandomSource {
    rng: ChaCha8Rng,
    seed: u64,
}

impl RandomSource {
    /// Create a random source from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw one value from any distribution.
    pub fn sample<T, D: Distribution<T>>(&mut self, distribution: &D) -> T {
        distribution.sample(&mut self.rng)
    }

    /// Draw one negative binomial count.
    pub fn negative_binomial(&mut self, distribution: &NegativeBinomial) -> Result<u64> {
        distribution.try_sample(&mut self.rng)
    }

    /// Draw one value from `Normal(mean, std_dev)`.
    ///
    /// A standard deviation of zero is a point mass at `mean`.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> Result<f64> {
        let normal = Normal::new(mean, std_dev).map_err(|e| {
            SynthError::Numerical(format!(
                "cannot sample Normal(mean = {}, sd = {}): {}",
                mean, std_dev, e
            ))
        })?;
        Ok(self.sample(&normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_seeded_source_reproducible() {
        let dist = NegativeBinomial::new(0.5, 0.05).unwrap();
        let mut rng1 = RandomSource::new(42);
        let mut rng2 = RandomSource::new(42);

        let values1: Vec<u64> = (0..20).map(|_| rng1.negative_binomial(&dist).unwrap()).collect();
        let values2: Vec<u64> = (0..20).map(|_| rng2.negative_binomial(&dist).unwrap()).collect();

        assert_eq!(values1, values2);
        assert_eq!(rng1.seed(), 42);
    }

    #[test]
    fn test_different_seeds_different_values() {
        let dist = NegativeBinomial::new(5.0, 0.1).unwrap();
        let mut rng1 = RandomSource::new(42);
        let mut rng2 = RandomSource::new(43);

        let values1: Vec<u64> = (0..20).map(|_| rng1.negative_binomial(&dist).unwrap()).collect();
        let values2: Vec<u64> = (0..20).map(|_| rng2.negative_binomial(&dist).unwrap()).collect();

        assert_ne!(values1, values2);
    }

    #[test]
    fn test_negative_binomial_rejects_bad_parameters() {
        assert!(NegativeBinomial::new(0.0, 0.5).is_err());
        assert!(NegativeBinomial::new(-1.0, 0.5).is_err());
        assert!(NegativeBinomial::new(f64::NAN, 0.5).is_err());
        assert!(NegativeBinomial::new(1.0, 0.0).is_err());
        assert!(NegativeBinomial::new(1.0, 1.5).is_err());
        assert!(NegativeBinomial::new(1.0, f64::NAN).is_err());
        assert!(NegativeBinomial::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_negative_binomial_p_one_is_zero() {
        let dist = NegativeBinomial::new(3.0, 1.0).unwrap();
        let mut rng = RandomSource::new(7);
        assert!((0..100).all(|_| rng.negative_binomial(&dist).unwrap() == 0));
    }

    #[test]
    fn test_negative_binomial_mean() {
        let dist = NegativeBinomial::new(5.0, 0.5).unwrap();
        assert_relative_eq!(dist.mean(), 5.0);

        let mut rng = RandomSource::new(1);
        let n_draws = 20_000;
        let total: u64 = (0..n_draws)
            .map(|_| rng.negative_binomial(&dist).unwrap())
            .sum();
        let mean = total as f64 / n_draws as f64;
        assert_relative_eq!(mean, 5.0, epsilon = 0.2);
    }

    #[test]
    fn test_negative_binomial_rejects_out_of_range_mean() {
        assert!(matches!(
            NegativeBinomial::new(0.5, 1e-20),
            Err(SynthError::InvalidParameter(_))
        ));
        assert!(matches!(
            NegativeBinomial::new(5.0, 1e-19),
            Err(SynthError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_count_from_rate_limits() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(count_from_rate(0.0, &mut rng).unwrap(), 0);
        assert!(matches!(
            count_from_rate(1e20, &mut rng),
            Err(SynthError::Numerical(_))
        ));
        assert!(matches!(
            count_from_rate(f64::INFINITY, &mut rng),
            Err(SynthError::Numerical(_))
        ));
        assert!(count_from_rate(1e15, &mut rng).unwrap() > 0);
    }

    #[test]
    fn test_small_p_draws_fit_or_fail() {
        // Mean 5e18 fits, but Gamma tail draws can exceed 2^64.
        let dist = NegativeBinomial::new(0.5, 1e-19).unwrap();
        let mut rng = RandomSource::new(1);
        for _ in 0..200 {
            match rng.negative_binomial(&dist) {
                Ok(count) => assert!(count < u64::MAX),
                Err(e) => assert!(matches!(e, SynthError::Numerical(_))),
            }
        }
    }

    #[test]
    fn test_normal_zero_sd_is_point_mass() {
        let mut rng = RandomSource::new(3);
        for _ in 0..10 {
            assert_eq!(rng.normal(12.0, 0.0).unwrap(), 12.0);
            assert_eq!(rng.normal(0.0, 0.0).unwrap().abs(), 0.0);
        }
    }

    #[test]
    fn test_normal_rejects_negative_sd() {
        let mut rng = RandomSource::new(3);
        assert!(matches!(rng.normal(1.0, -1.0), Err(SynthError::Numerical(_))));
    }
}
