//! Declarative simulation documents.
//!
//! A [`SimulationConfig`] names one generation job and can be stored as YAML,
//! so a mock experiment is reproducible from a checked-in file.

use crate::config::{
    validate_replicates, validate_sigma, MultipleSampleConfig, ReplicateConfig, SingleSampleConfig,
};
use crate::data::GeneTable;
use crate::error::{Result, SynthError};
use crate::generate::{MultipleSampleGenerator, ReplicateGenerator, SingleSampleGenerator};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One generation job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Simulation {
    /// One column of counts.
    SingleSample(SingleSampleConfig),
    /// A cohort of independent samples.
    MultipleSample(MultipleSampleConfig),
    /// A single sample followed by technical replicates of it.
    Replicates {
        sample: SingleSampleConfig,
        replicates: ReplicateConfig,
    },
}

impl Simulation {
    /// Build the generator(s) and produce the table.
    ///
    /// All parameters are validated before any value is drawn.
    pub fn run(&self) -> Result<GeneTable> {
        match self {
            Simulation::SingleSample(config) => {
                SingleSampleGenerator::from_config(config)?.generate_single_sample()
            }
            Simulation::MultipleSample(config) => {
                MultipleSampleGenerator::from_config(config)?.generate_multiple_sample()
            }
            Simulation::Replicates { sample, replicates } => {
                let mut sample_generator = SingleSampleGenerator::from_config(sample)?;
                validate_sigma(replicates.normal_distribution_sigma)?;
                validate_replicates(replicates.n_replicates)?;
                let base = sample_generator.generate_single_sample()?;
                ReplicateGenerator::from_config(replicates, &base)?.get_sample_replicates()
            }
        }
    }

    /// (genes, columns) of the table `run` will produce.
    pub fn output_shape(&self) -> (usize, usize) {
        match self {
            Simulation::SingleSample(config) => (config.number_of_genes, 1),
            Simulation::MultipleSample(config) => {
                (config.number_of_genes, config.number_of_samples)
            }
            Simulation::Replicates { sample, replicates } => {
                (sample.number_of_genes, replicates.n_replicates + 1)
            }
        }
    }
}

/// A named simulation, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Name of the simulation.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// What to generate.
    pub simulation: Simulation,
}

impl SimulationConfig {
    /// Create a config without description.
    pub fn new(name: &str, simulation: Simulation) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            simulation,
        }
    }

    /// Set description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(SynthError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(SynthError::from)
    }

    /// Example document: a 60,000-gene sample with two replicates.
    pub fn example() -> Self {
        Self::new(
            "example-replicates",
            Simulation::Replicates {
                sample: SingleSampleConfig::default(),
                replicates: ReplicateConfig::new(0.1),
            },
        )
        .with_description("One negative binomial sample with two technical replicates")
    }

    /// Run the simulation.
    pub fn run(&self) -> Result<GeneTable> {
        let (genes, columns) = self.simulation.output_shape();
        info!(name = %self.name, genes, columns, "running simulation");
        self.simulation.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_roundtrip() {
        let config = SimulationConfig::example();
        let yaml = config.to_yaml().unwrap();
        let parsed = SimulationConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_parse_handwritten_yaml() {
        let yaml = r#"
name: cohort
simulation:
  kind: multiple_sample
  number_of_samples: 3
  number_of_genes: 10
  neg_binomial_n: 0.5
  neg_binomial_p: 0.05
"#;
        let config = SimulationConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.description, None);
        assert_eq!(
            config.simulation,
            Simulation::MultipleSample(MultipleSampleConfig::new(3, 10, 0.5, 0.05))
        );

        let table = config.run().unwrap();
        assert_eq!(table.shape(), (10, 3));
    }

    #[test]
    fn test_parse_replicates_yaml_defaults() {
        let yaml = r#"
name: reps
simulation:
  kind: replicates
  sample:
    number_of_genes: 8
    neg_binomial_n: 2.0
    neg_binomial_p: 0.2
    seed: 5
  replicates:
    normal_distribution_sigma: 0.25
"#;
        let config = SimulationConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.simulation.output_shape(), (8, 3));
        let table = config.run().unwrap();
        assert_eq!(
            table.sample_ids(),
            &["Replicate_1", "Replicate_2", "Replicate_3"]
        );
    }

    #[test]
    fn test_replicates_base_matches_single_sample() {
        let sample = SingleSampleConfig::new(25, 0.5, 0.05).with_seed(2);
        let replicated = Simulation::Replicates {
            sample: sample.clone(),
            replicates: ReplicateConfig::new(0.1).with_seed(3),
        }
        .run()
        .unwrap();
        let single = Simulation::SingleSample(sample).run().unwrap();
        assert_eq!(replicated.column(0), single.column(0));
        assert_eq!(replicated.gene_ids(), single.gene_ids());
    }

    #[test]
    fn test_invalid_replicates_fail_before_drawing() {
        let simulation = Simulation::Replicates {
            sample: SingleSampleConfig::new(5, 1.0, 0.5),
            replicates: ReplicateConfig::new(-1.0),
        };
        assert!(matches!(simulation.run(), Err(SynthError::InvalidParameter(_))));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            SimulationConfig::from_yaml("name: [unclosed"),
            Err(SynthError::Yaml(_))
        ));
    }
}
