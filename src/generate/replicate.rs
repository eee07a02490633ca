//! Technical replicate generation.

use super::RandomSource;
use crate::config::{validate_replicates, validate_sigma, ReplicateConfig};
use crate::data::{column_labels, GeneTable};
use crate::error::{Result, SynthError};
use tracing::debug;

/// Generate technical replicates of a single-sample table.
///
/// Each replicate value of a gene with base count `v` is drawn from
/// `Normal(v, sigma * v)`, rounded half-to-even, and folded to its absolute
/// value. A gene with base count 0 therefore always replicates as 0.
#[derive(Debug)]
pub struct ReplicateGenerator {
    sigma: f64,
    base: GeneTable,
    n_replicates: usize,
    rng: RandomSource,
}

impl ReplicateGenerator {
    /// Create a generator from a table with exactly one column.
    ///
    /// The table is copied; the caller's table is never modified.
    pub fn new(
        normal_distribution_sigma: f64,
        df: &GeneTable,
        n_replicates: usize,
        seed: u64,
    ) -> Result<Self> {
        validate_sigma(normal_distribution_sigma)?;
        validate_replicates(n_replicates)?;
        if df.n_samples() != 1 {
            return Err(SynthError::ShapeMismatch {
                expected: 1,
                actual: df.n_samples(),
            });
        }
        Ok(Self {
            sigma: normal_distribution_sigma,
            base: df.clone(),
            n_replicates,
            rng: RandomSource::new(seed),
        })
    }

    /// Create from a config and the base table.
    pub fn from_config(config: &ReplicateConfig, df: &GeneTable) -> Result<Self> {
        Self::new(
            config.normal_distribution_sigma,
            df,
            config.n_replicates,
            config.seed,
        )
    }

    pub fn n_replicates(&self) -> usize {
        self.n_replicates
    }

    /// Return the base column as `Replicate_1` followed by `Replicate_2..`.
    ///
    /// Rows keep the input table's labels and order.
    pub fn get_sample_replicates(&mut self) -> Result<GeneTable> {
        debug!(
            genes = self.base.n_genes(),
            replicates = self.n_replicates,
            sigma = self.sigma,
            seed = self.rng.seed(),
            "generating replicates"
        );
        let n_cols = self.n_replicates + 1;
        let mut values = Vec::with_capacity(self.base.n_genes() * n_cols);

        for &base_value in self.base.values() {
            values.push(base_value);
            let mean = base_value as f64;
            let std_dev = self.sigma * mean;
            if !std_dev.is_finite() {
                return Err(SynthError::Numerical(format!(
                    "standard deviation {} * {} overflows",
                    self.sigma, mean
                )));
            }
            for _ in 0..self.n_replicates {
                let draw = self.rng.normal(mean, std_dev)?;
                values.push(fold_count(draw)?);
            }
        }

        GeneTable::new(
            values,
            self.base.gene_ids().to_vec(),
            column_labels("Replicate", 1, n_cols),
        )
    }
}

/// Round half-to-even, then take the absolute value.
///
/// Fails when the result does not fit in a `u64`.
fn fold_count(draw: f64) -> Result<u64> {
    let folded = draw.round_ties_even().abs();
    if !(folded < 18_446_744_073_709_551_616.0) {
        return Err(SynthError::Numerical(format!(
            "replicate draw {} exceeds the u64 count range",
            draw
        )));
    }
    Ok(folded as u64)
}
