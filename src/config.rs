//! Parameter sets for the three generators.
//!
//! Field names match the recognized configuration options, so a YAML or JSON
//! document can be deserialized straight into these structs.

use crate::error::{Result, SynthError};
use serde::{Deserialize, Serialize};

fn default_n_replicates() -> usize {
    2
}

/// Parameters for [`SingleSampleGenerator`](crate::generate::SingleSampleGenerator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleSampleConfig {
    /// Number of genes (rows).
    pub number_of_genes: usize,
    /// Negative binomial shape (number of successes).
    pub neg_binomial_n: f64,
    /// Negative binomial success probability.
    pub neg_binomial_p: f64,
    /// Random seed.
    #[serde(default)]
    pub seed: u64,
}

impl Default for SingleSampleConfig {
    fn default() -> Self {
        Self {
            number_of_genes: 60_000,
            neg_binomial_n: 0.5,
            neg_binomial_p: 0.05,
            seed: 0,
        }
    }
}

impl SingleSampleConfig {
    /// Create a config with seed 0.
    pub fn new(number_of_genes: usize, neg_binomial_n: f64, neg_binomial_p: f64) -> Self {
        Self {
            number_of_genes,
            neg_binomial_n,
            neg_binomial_p,
            seed: 0,
        }
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Parameters for [`MultipleSampleGenerator`](crate::generate::MultipleSampleGenerator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleSampleConfig {
    /// Number of samples (columns).
    pub number_of_samples: usize,
    /// Number of genes (rows).
    pub number_of_genes: usize,
    /// Negative binomial shape (number of successes).
    pub neg_binomial_n: f64,
    /// Negative binomial success probability.
    pub neg_binomial_p: f64,
    /// Random seed.
    #[serde(default)]
    pub seed: u64,
}

impl MultipleSampleConfig {
    /// Create a config with seed 0.
    pub fn new(
        number_of_samples: usize,
        number_of_genes: usize,
        neg_binomial_n: f64,
        neg_binomial_p: f64,
    ) -> Self {
        Self {
            number_of_samples,
            number_of_genes,
            neg_binomial_n,
            neg_binomial_p,
            seed: 0,
        }
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Parameters for [`ReplicateGenerator`](crate::generate::ReplicateGenerator).
///
/// The base table is supplied separately when the generator is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicateConfig {
    /// Scale of the per-gene standard deviation (`sd = sigma * value`).
    pub normal_distribution_sigma: f64,
    /// Number of replicate columns to add.
    #[serde(default = "default_n_replicates")]
    pub n_replicates: usize,
    /// Random seed.
    #[serde(default)]
    pub seed: u64,
}

impl ReplicateConfig {
    /// Create a config with two replicates and seed 0.
    pub fn new(normal_distribution_sigma: f64) -> Self {
        Self {
            normal_distribution_sigma,
            n_replicates: default_n_replicates(),
            seed: 0,
        }
    }

    /// Set the number of replicates.
    pub fn with_replicates(mut self, n_replicates: usize) -> Self {
        self.n_replicates = n_replicates;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

pub(crate) fn validate_samples(number_of_samples: usize) -> Result<()> {
    if number_of_samples == 0 {
        return Err(SynthError::InvalidParameter(
            "number_of_samples must be at least 1".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_sigma(sigma: f64) -> Result<()> {
    if !(sigma >= 0.0) || !sigma.is_finite() {
        return Err(SynthError::InvalidParameter(format!(
            "normal_distribution_sigma must be a non-negative finite number, got {}",
            sigma
        )));
    }
    Ok(())
}

pub(crate) fn validate_replicates(n_replicates: usize) -> Result<()> {
    if n_replicates == 0 {
        return Err(SynthError::InvalidParameter(
            "n_replicates must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_single_config() {
        let config = SingleSampleConfig::default();
        assert_eq!(config.number_of_genes, 60_000);
        assert_eq!(config.neg_binomial_n, 0.5);
        assert_eq!(config.neg_binomial_p, 0.05);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_builders() {
        let single = SingleSampleConfig::new(10, 2.0, 0.3).with_seed(9);
        assert_eq!(single.seed, 9);

        let multiple = MultipleSampleConfig::new(4, 10, 2.0, 0.3).with_seed(5);
        assert_eq!(multiple.number_of_samples, 4);
        assert_eq!(multiple.seed, 5);

        let replicates = ReplicateConfig::new(0.1).with_replicates(3).with_seed(1);
        assert_eq!(replicates.n_replicates, 3);
        assert_eq!(replicates.seed, 1);
    }

    #[test]
    fn test_serde_defaults() {
        let yaml = "normal_distribution_sigma: 0.2\n";
        let config: ReplicateConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.n_replicates, 2);
        assert_eq!(config.seed, 0);

        let yaml = "number_of_genes: 5\nneg_binomial_n: 0.5\nneg_binomial_p: 0.05\n";
        let config: SingleSampleConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config, SingleSampleConfig::new(5, 0.5, 0.05));
    }

    #[test]
    fn test_validators() {
        assert!(validate_samples(0).is_err());
        assert!(validate_samples(1).is_ok());
        assert!(validate_sigma(-0.1).is_err());
        assert!(validate_sigma(f64::NAN).is_err());
        assert!(validate_sigma(f64::INFINITY).is_err());
        assert!(validate_sigma(0.0).is_ok());
        assert!(validate_replicates(0).is_err());
        assert!(validate_replicates(2).is_ok());
    }
}
