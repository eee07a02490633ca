//! synthrna - Synthetic RNA-seq count CLI
//!
//! Command-line interface for generating mock gene expression tables.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use synthetic_rnaseq::data::GeneTable;
use synthetic_rnaseq::error::Result;
use synthetic_rnaseq::generate::{
    MultipleSampleGenerator, ReplicateGenerator, SingleSampleGenerator,
};
use synthetic_rnaseq::profile::profile_table;
use synthetic_rnaseq::simulation::SimulationConfig;
use tracing::{error, info};

/// Output format for the profile command
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileFormat {
    Text,
    Json,
}

/// Synthetic RNA-seq count generator
#[derive(Parser)]
#[command(name = "synthrna")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one sample (column `Sample_1`)
    Single {
        /// Number of genes
        #[arg(short, long)]
        genes: usize,

        /// Negative binomial n (number of successes)
        #[arg(short, long)]
        n: f64,

        /// Negative binomial p (success probability)
        #[arg(short, long)]
        p: f64,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output path for the counts TSV
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Generate a cohort of samples (columns `Sample_0..`)
    Multiple {
        /// Number of samples
        #[arg(short, long)]
        samples: usize,

        /// Number of genes
        #[arg(short, long)]
        genes: usize,

        /// Negative binomial n (number of successes)
        #[arg(short, long)]
        n: f64,

        /// Negative binomial p (success probability)
        #[arg(short, long)]
        p: f64,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output path for the counts TSV
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Add technical replicates to a single-sample TSV
    Replicates {
        /// Path to a one-column counts TSV
        #[arg(short, long)]
        input: PathBuf,

        /// Standard deviation scale (sd = sigma * count)
        #[arg(long)]
        sigma: f64,

        /// Number of replicates to add
        #[arg(short = 'r', long, default_value = "2")]
        replicates: usize,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output path for the replicates TSV
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Run a simulation from a YAML configuration file
    Run {
        /// Path to simulation configuration YAML
        #[arg(short, long)]
        config: PathBuf,

        /// Output path for the counts TSV
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Generate an example simulation configuration
    Example {
        /// Output path for the example YAML
        #[arg(short, long, default_value = "simulation.yaml")]
        output: PathBuf,
    },

    /// Summarize a counts TSV
    Profile {
        /// Path to counts TSV
        #[arg(short = 'c', long)]
        counts: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ProfileFormat,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Single {
            genes,
            n,
            p,
            seed,
            output,
        } => cmd_single(genes, n, p, seed, &output),

        Commands::Multiple {
            samples,
            genes,
            n,
            p,
            seed,
            output,
        } => cmd_multiple(samples, genes, n, p, seed, &output),

        Commands::Replicates {
            input,
            sigma,
            replicates,
            seed,
            output,
        } => cmd_replicates(&input, sigma, replicates, seed, &output),

        Commands::Run { config, output } => cmd_run(&config, &output),

        Commands::Example { output } => cmd_example(&output),

        Commands::Profile { counts, format } => cmd_profile(&counts, format),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn write_table(table: &GeneTable, output_path: &PathBuf) -> Result<()> {
    info!(
        genes = table.n_genes(),
        samples = table.n_samples(),
        "writing {:?}",
        output_path
    );
    table.to_tsv(output_path)
}

/// Generate a single sample
fn cmd_single(genes: usize, n: f64, p: f64, seed: u64, output_path: &PathBuf) -> Result<()> {
    let table = SingleSampleGenerator::new(genes, n, p, seed)?.generate_single_sample()?;
    write_table(&table, output_path)
}

/// Generate a multi-sample cohort
fn cmd_multiple(
    samples: usize,
    genes: usize,
    n: f64,
    p: f64,
    seed: u64,
    output_path: &PathBuf,
) -> Result<()> {
    let table =
        MultipleSampleGenerator::new(samples, genes, n, p, seed)?.generate_multiple_sample()?;
    write_table(&table, output_path)
}

/// Add replicates to an existing sample
fn cmd_replicates(
    input_path: &PathBuf,
    sigma: f64,
    replicates: usize,
    seed: u64,
    output_path: &PathBuf,
) -> Result<()> {
    info!("loading {:?}", input_path);
    let base = GeneTable::from_tsv(input_path)?;
    let table = ReplicateGenerator::new(sigma, &base, replicates, seed)?.get_sample_replicates()?;
    write_table(&table, output_path)
}

/// Run a simulation from configuration
fn cmd_run(config_path: &PathBuf, output_path: &PathBuf) -> Result<()> {
    info!("loading simulation configuration from {:?}", config_path);
    let config_str = std::fs::read_to_string(config_path)?;
    let config = SimulationConfig::from_yaml(&config_str)?;

    let table = config.run()?;
    write_table(&table, output_path)
}

/// Write an example configuration
fn cmd_example(output_path: &PathBuf) -> Result<()> {
    let yaml = SimulationConfig::example().to_yaml()?;
    std::fs::write(output_path, &yaml)?;
    info!("wrote example simulation to {:?}", output_path);
    println!("{}", yaml);
    Ok(())
}

/// Profile a counts table
fn cmd_profile(counts_path: &PathBuf, format: ProfileFormat) -> Result<()> {
    let table = GeneTable::from_tsv(counts_path)?;
    let profile = profile_table(&table);
    match format {
        ProfileFormat::Text => print!("{}", profile),
        ProfileFormat::Json => println!("{}", serde_json::to_string_pretty(&profile)?),
    }
    Ok(())
}
