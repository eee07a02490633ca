//! Single-sample generation.

use super::{draw_counts, NegativeBinomial, RandomSource};
use crate::config::SingleSampleConfig;
use crate::data::{gene_labels, GeneTable};
use crate::error::Result;
use tracing::debug;

/// Generate one sample of negative binomial counts.
///
/// The output has rows `Gene_1..Gene_<number_of_genes>` in draw order and a
/// single column named `Sample_1`.
#[derive(Debug)]
pub struct SingleSampleGenerator {
    number_of_genes: usize,
    distribution: NegativeBinomial,
    rng: RandomSource,
}

impl SingleSampleGenerator {
    /// Create a generator. Fails on `n <= 0` or `p` outside (0, 1].
    pub fn new(
        number_of_genes: usize,
        neg_binomial_n: f64,
        neg_binomial_p: f64,
        seed: u64,
    ) -> Result<Self> {
        Ok(Self {
            number_of_genes,
            distribution: NegativeBinomial::new(neg_binomial_n, neg_binomial_p)?,
            rng: RandomSource::new(seed),
        })
    }

    /// Create from a config.
    pub fn from_config(config: &SingleSampleConfig) -> Result<Self> {
        Self::new(
            config.number_of_genes,
            config.neg_binomial_n,
            config.neg_binomial_p,
            config.seed,
        )
    }

    /// Number of genes drawn per call.
    pub fn number_of_genes(&self) -> usize {
        self.number_of_genes
    }

    /// Draw a (genes × 1) table.
    ///
    /// Calling again continues the same random stream.
    pub fn generate_single_sample(&mut self) -> Result<GeneTable> {
        debug!(
            genes = self.number_of_genes,
            n = self.distribution.n(),
            p = self.distribution.p(),
            seed = self.rng.seed(),
            "generating single sample"
        );
        let counts = draw_counts(&mut self.rng, &self.distribution, self.number_of_genes)?;
        GeneTable::new(
            counts,
            gene_labels(self.number_of_genes),
            vec!["Sample_1".to_string()],
        )
    }
}
