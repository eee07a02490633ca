//! Synthetic RNA-seq count generation.
//!
//! This library produces mock gene expression count tables for exercising
//! downstream RNA-seq analysis code without real sequencing data.
//!
//! # Overview
//!
//! - **data**: the labeled count table ([`GeneTable`](data::GeneTable)) and its TSV/JSON I/O
//! - **generate**: the three generators and their seeded random source
//! - **config**: parameter sets for each generator
//! - **simulation**: YAML simulation documents
//! - **batch**: parallel generation of many independently seeded tables
//! - **profile**: library size and sparsity summaries
//!
//! # Example
//!
//! ```no_run
//! use synthetic_rnaseq::prelude::*;
//!
//! let mut sample = SingleSampleGenerator::new(60_000, 0.5, 0.05, 0).unwrap();
//! let base = sample.generate_single_sample().unwrap();
//!
//! let replicates = ReplicateGenerator::new(0.1, &base, 2, 0)
//!     .unwrap()
//!     .get_sample_replicates()
//!     .unwrap();
//! replicates.to_tsv("replicates.tsv").unwrap();
//! ```

pub mod batch;
pub mod config;
pub mod data;
pub mod error;
pub mod generate;
pub mod profile;
pub mod simulation;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::batch::{generate_batch, generate_cohorts, seed_series};
    pub use crate::config::{MultipleSampleConfig, ReplicateConfig, SingleSampleConfig};
    pub use crate::data::GeneTable;
    pub use crate::error::{Result, SynthError};
    pub use crate::generate::{
        MultipleSampleGenerator, NegativeBinomial, RandomSource, ReplicateGenerator,
        SingleSampleGenerator,
    };
    pub use crate::profile::{profile_table, TableProfile};
    pub use crate::simulation::{Simulation, SimulationConfig};
}
