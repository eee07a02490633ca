//! Summary statistics of a generated table.

use crate::data::GeneTable;
use serde::{Deserialize, Serialize};

/// Library size and sparsity summary of a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableProfile {
    /// Number of genes.
    pub n_genes: usize,
    /// Number of samples.
    pub n_samples: usize,
    /// Library size (total counts) per sample.
    pub library_sizes: Vec<u64>,
    /// Mean library size.
    pub mean_library_size: f64,
    /// Median library size.
    pub median_library_size: f64,
    /// Mean count over all cells.
    pub mean_count: f64,
    /// Largest single count.
    pub max_count: u64,
    /// Proportion of zero cells.
    pub sparsity: f64,
    /// Genes that are zero in every sample.
    pub n_all_zero_genes: usize,
}

impl TableProfile {
    /// Check if the table is highly sparse (> 50% zeros).
    pub fn is_highly_sparse(&self) -> bool {
        self.sparsity > 0.5
    }
}

impl std::fmt::Display for TableProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Table Profile")?;
        writeln!(f, "  Genes:   {}", self.n_genes)?;
        writeln!(f, "  Samples: {}", self.n_samples)?;
        writeln!(f, "  Mean library size:   {:.0}", self.mean_library_size)?;
        writeln!(f, "  Median library size: {:.0}", self.median_library_size)?;
        writeln!(f, "  Mean count: {:.2}", self.mean_count)?;
        writeln!(f, "  Max count:  {}", self.max_count)?;
        writeln!(f, "  Sparsity:   {:.2}%", self.sparsity * 100.0)?;
        writeln!(f, "  All-zero genes: {}", self.n_all_zero_genes)?;
        Ok(())
    }
}

/// Profile a table.
pub fn profile_table(table: &GeneTable) -> TableProfile {
    let library_sizes = table.col_sums();
    let n_samples = table.n_samples();
    let n_cells = table.values().len();

    let mean_library_size = if n_samples > 0 {
        library_sizes.iter().map(|&x| x as f64).sum::<f64>() / n_samples as f64
    } else {
        0.0
    };
    let median_library_size = median_u64(&library_sizes);

    let (mean_count, sparsity) = if n_cells > 0 {
        let total: f64 = table.values().iter().map(|&v| v as f64).sum();
        let zeros = table.values().iter().filter(|&&v| v == 0).count();
        (total / n_cells as f64, zeros as f64 / n_cells as f64)
    } else {
        (0.0, 0.0)
    };

    let n_all_zero_genes = (0..table.n_genes())
        .filter(|&row| table.row(row).iter().all(|&v| v == 0))
        .count();

    TableProfile {
        n_genes: table.n_genes(),
        n_samples,
        library_sizes,
        mean_library_size,
        median_library_size,
        mean_count,
        max_count: table.values().iter().copied().max().unwrap_or(0),
        sparsity,
        n_all_zero_genes,
    }
}

fn median_u64(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
    } else {
        sorted[n / 2] as f64
    }
}
