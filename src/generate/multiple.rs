//! Multi-sample cohort generation.

use super::{draw_counts, NegativeBinomial, RandomSource};
use crate::config::{validate_samples, MultipleSampleConfig};
use crate::data::{column_labels, gene_labels, GeneTable};
use crate::error::Result;
use tracing::debug;

/// Generate a cohort of samples sharing one negative binomial distribution.
///
/// Columns are named `Sample_0..Sample_<number_of_samples - 1>`. Note the
/// zero-based numbering, unlike the `Sample_1` column of
/// [`SingleSampleGenerator`](super::SingleSampleGenerator); downstream tools
/// already depend on both names.
#[derive(Debug)]
pub struct MultipleSampleGenerator {
    number_of_samples: usize,
    number_of_genes: usize,
    distribution: NegativeBinomial,
    rng: RandomSource,
}

impl MultipleSampleGenerator {
    /// Create a generator. Fails on zero samples, `n <= 0`, or `p` outside (0, 1].
    pub fn new(
        number_of_samples: usize,
        number_of_genes: usize,
        neg_binomial_n: f64,
        neg_binomial_p: f64,
        seed: u64,
    ) -> Result<Self> {
        validate_samples(number_of_samples)?;
        Ok(Self {
            number_of_samples,
            number_of_genes,
            distribution: NegativeBinomial::new(neg_binomial_n, neg_binomial_p)?,
            rng: RandomSource::new(seed),
        })
    }

    /// Create from a config.
    pub fn from_config(config: &MultipleSampleConfig) -> Result<Self> {
        Self::new(
            config.number_of_samples,
            config.number_of_genes,
            config.neg_binomial_n,
            config.neg_binomial_p,
            config.seed,
        )
    }

    pub fn number_of_samples(&self) -> usize {
        self.number_of_samples
    }

    pub fn number_of_genes(&self) -> usize {
        self.number_of_genes
    }

    /// Draw a (genes × samples) table, filled gene by gene.
    pub fn generate_multiple_sample(&mut self) -> Result<GeneTable> {
        debug!(
            genes = self.number_of_genes,
            samples = self.number_of_samples,
            n = self.distribution.n(),
            p = self.distribution.p(),
            seed = self.rng.seed(),
            "generating multiple samples"
        );
        let counts = draw_counts(
            &mut self.rng,
            &self.distribution,
            self.number_of_genes * self.number_of_samples,
        )?;
        GeneTable::new(
            counts,
            gene_labels(self.number_of_genes),
            column_labels("Sample", 0, self.number_of_samples),
        )
    }
}
