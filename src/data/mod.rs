//! Data structures for simulated expression tables.

mod gene_table;

pub use gene_table::GeneTable;

/// Row labels `Gene_1..Gene_<n>`, 1-indexed.
pub fn gene_labels(n_genes: usize) -> Vec<String> {
    (1..=n_genes).map(|i| format!("Gene_{}", i)).collect()
}

/// Column labels `<prefix>_<first>..`, `count` of them.
pub fn column_labels(prefix: &str, first: usize, count: usize) -> Vec<String> {
    (first..first + count)
        .map(|i| format!("{}_{}", prefix, i))
        .collect()
}
