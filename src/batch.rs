//! Parallel generation of many independent tables.
//!
//! Every work item builds its own generators from its own seed, so each
//! output depends only on its config and never on thread scheduling.

use crate::config::MultipleSampleConfig;
use crate::data::GeneTable;
use crate::error::Result;
use crate::simulation::{Simulation, SimulationConfig};
use rayon::prelude::*;
use tracing::info;

/// Consecutive seeds starting at `base_seed`, wrapping on overflow.
pub fn seed_series(base_seed: u64, count: usize) -> Vec<u64> {
    (0..count as u64)
        .map(|i| base_seed.wrapping_add(i))
        .collect()
}

/// Run every simulation in parallel; output order matches input order.
///
/// Fails if any simulation is invalid; no partial batch is returned.
pub fn generate_batch(configs: &[SimulationConfig]) -> Result<Vec<GeneTable>> {
    info!(n = configs.len(), "generating batch");
    configs
        .par_iter()
        .map(|config| config.simulation.run())
        .collect()
}

/// Generate `n_cohorts` cohorts that differ only in seed.
///
/// Cohort `i` uses seed `config.seed + i`.
pub fn generate_cohorts(config: &MultipleSampleConfig, n_cohorts: usize) -> Result<Vec<GeneTable>> {
    let configs: Vec<SimulationConfig> = seed_series(config.seed, n_cohorts)
        .into_iter()
        .enumerate()
        .map(|(i, seed)| {
            SimulationConfig::new(
                &format!("cohort_{}", i),
                Simulation::MultipleSample(config.clone().with_seed(seed)),
            )
        })
        .collect();
    generate_batch(&configs)
}
