//! Dense labeled count table for simulated gene expression.

use crate::error::{Result, SynthError};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// A dense count table storing read counts across samples.
///
/// Rows represent genes, columns represent samples (or replicates).
/// Values are stored row-major; both label vectors keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneTable {
    /// Row-major counts (genes × samples)
    values: Vec<u64>,
    /// Gene identifiers (row names)
    gene_ids: Vec<String>,
    /// Sample identifiers (column names)
    sample_ids: Vec<String>,
}

impl GeneTable {
    /// Create a new GeneTable from row-major values and identifiers.
    pub fn new(values: Vec<u64>, gene_ids: Vec<String>, sample_ids: Vec<String>) -> Result<Self> {
        let expected = gene_ids.len() * sample_ids.len();
        if values.len() != expected {
            return Err(SynthError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            values,
            gene_ids,
            sample_ids,
        })
    }

    /// Load a table from a TSV file.
    ///
    /// Expected format:
    /// - First row: header with sample IDs (first column is the gene ID header)
    /// - Subsequent rows: gene ID followed by one count per sample
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::read_tsv(BufReader::new(file))
    }

    /// Parse a table from any buffered TSV source.
    pub fn read_tsv<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        let header_line = lines
            .next()
            .ok_or_else(|| SynthError::EmptyData("Empty TSV file".to_string()))??;
        let header: Vec<&str> = header_line.split('\t').collect();
        if header.len() < 2 {
            return Err(SynthError::EmptyData(
                "TSV must have at least one sample".to_string(),
            ));
        }
        let sample_ids: Vec<String> = header[1..].iter().map(|s| s.to_string()).collect();
        let n_samples = sample_ids.len();

        let mut values = Vec::new();
        let mut gene_ids = Vec::new();

        for line_result in lines {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }
            let row_idx = gene_ids.len();
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() - 1 != n_samples {
                return Err(SynthError::DimensionMismatch {
                    expected: n_samples,
                    actual: fields.len() - 1,
                });
            }

            gene_ids.push(fields[0].to_string());
            for (col_idx, value_str) in fields[1..].iter().enumerate() {
                let value: u64 = value_str.trim().parse().map_err(|_| SynthError::InvalidCount {
                    value: value_str.to_string(),
                    row: row_idx,
                    col: col_idx,
                })?;
                values.push(value);
            }
        }

        Self::new(values, gene_ids, sample_ids)
    }

    /// Write the table to a TSV file.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_tsv(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the table as TSV to any writer.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> Result<()> {
        write!(writer, "gene_id")?;
        for sample_id in &self.sample_ids {
            write!(writer, "\t{}", sample_id)?;
        }
        writeln!(writer)?;

        for (row_idx, gene_id) in self.gene_ids.iter().enumerate() {
            write!(writer, "{}", gene_id)?;
            for value in self.row(row_idx) {
                write!(writer, "\t{}", value)?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }

    /// Serialize the table to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(SynthError::from)
    }

    /// Get the value at (row, col).
    ///
    /// Panics if the position is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u64 {
        assert!(col < self.n_samples(), "column {} out of bounds", col);
        self.values[row * self.n_samples() + col]
    }

    /// Number of genes (rows).
    #[inline]
    pub fn n_genes(&self) -> usize {
        self.gene_ids.len()
    }

    /// Number of samples (columns).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.sample_ids.len()
    }

    /// (rows, columns)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_genes(), self.n_samples())
    }

    /// Gene identifiers.
    #[inline]
    pub fn gene_ids(&self) -> &[String] {
        &self.gene_ids
    }

    /// Sample identifiers.
    #[inline]
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Row-major view of all counts.
    #[inline]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Counts of one gene across all samples.
    pub fn row(&self, row: usize) -> &[u64] {
        let n = self.n_samples();
        &self.values[row * n..(row + 1) * n]
    }

    /// Get a dense vector for a specific column (sample).
    pub fn column(&self, col: usize) -> Vec<u64> {
        (0..self.n_genes()).map(|row| self.get(row, col)).collect()
    }

    /// Look up a column by sample ID.
    pub fn column_by_id(&self, sample_id: &str) -> Option<Vec<u64>> {
        self.sample_ids
            .iter()
            .position(|s| s == sample_id)
            .map(|col| self.column(col))
    }

    /// Total counts per gene, saturating at `u64::MAX`.
    pub fn row_sums(&self) -> Vec<u64> {
        (0..self.n_genes())
            .map(|row| {
                self.row(row)
                    .iter()
                    .fold(0u64, |acc, &val| acc.saturating_add(val))
            })
            .collect()
    }

    /// Library sizes (total counts per sample), saturating at `u64::MAX`.
    pub fn col_sums(&self) -> Vec<u64> {
        let mut sums = vec![0u64; self.n_samples()];
        for row in 0..self.n_genes() {
            for (col, &val) in self.row(row).iter().enumerate() {
                sums[col] = sums[col].saturating_add(val);
            }
        }
        sums
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_table() -> GeneTable {
        // 3 genes × 2 samples
        GeneTable::new(
            vec![10, 20, 0, 5, 7, 0],
            vec!["Gene_1".into(), "Gene_2".into(), "Gene_3".into()],
            vec!["Sample_0".into(), "Sample_1".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_dimensions() {
        let table = create_test_table();
        assert_eq!(table.n_genes(), 3);
        assert_eq!(table.n_samples(), 2);
        assert_eq!(table.shape(), (3, 2));
    }

    #[test]
    fn test_dimension_mismatch() {
        let result = GeneTable::new(vec![1, 2, 3], vec!["Gene_1".into()], vec!["Sample_1".into()]);
        assert!(matches!(
            result,
            Err(SynthError::DimensionMismatch { expected: 1, actual: 3 })
        ));
    }

    #[test]
    fn test_get_and_row() {
        let table = create_test_table();
        assert_eq!(table.get(0, 1), 20);
        assert_eq!(table.get(2, 0), 7);
        assert_eq!(table.row(1), &[0, 5]);
        assert_eq!(table.column(0), vec![10, 0, 7]);
        assert_eq!(table.column_by_id("Sample_1"), Some(vec![20, 5, 0]));
        assert_eq!(table.column_by_id("Sample_9"), None);
    }

    #[test]
    fn test_sums() {
        let table = create_test_table();
        assert_eq!(table.row_sums(), vec![30, 5, 7]);
        assert_eq!(table.col_sums(), vec![17, 25]);
    }

    #[test]
    fn test_sums_saturate() {
        let table = GeneTable::new(
            vec![u64::MAX, 1, u64::MAX, 2],
            vec!["Gene_1".into(), "Gene_2".into()],
            vec!["Sample_0".into(), "Sample_1".into()],
        )
        .unwrap();
        assert_eq!(table.col_sums(), vec![u64::MAX, 3]);
        assert_eq!(table.row_sums(), vec![u64::MAX, u64::MAX]);
    }

    #[test]
    fn test_tsv_roundtrip() {
        let table = create_test_table();

        let temp_file = NamedTempFile::new().unwrap();
        table.to_tsv(temp_file.path()).unwrap();

        let loaded = GeneTable::from_tsv(temp_file.path()).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_tsv_layout() {
        let table = create_test_table();
        let mut buf = Vec::new();
        table.write_tsv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "gene_id\tSample_0\tSample_1\nGene_1\t10\t20\nGene_2\t0\t5\nGene_3\t7\t0\n"
        );
    }

    #[test]
    fn test_read_tsv_rejects_bad_count() {
        let input = "gene_id\tSample_1\nGene_1\t-4\n";
        let result = GeneTable::read_tsv(input.as_bytes());
        assert!(matches!(result, Err(SynthError::InvalidCount { row: 0, col: 0, .. })));
    }

    #[test]
    fn test_read_tsv_rejects_ragged_row() {
        let input = "gene_id\tSample_1\tSample_2\nGene_1\t4\n";
        let result = GeneTable::read_tsv(input.as_bytes());
        assert!(matches!(result, Err(SynthError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_read_tsv_header_only() {
        let input = "gene_id\tSample_1\n";
        let table = GeneTable::read_tsv(input.as_bytes()).unwrap();
        assert_eq!(table.shape(), (0, 1));
    }

    #[test]
    fn test_to_json() {
        let table = create_test_table();
        let json: serde_json::Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();
        assert_eq!(json["gene_ids"][2], "Gene_3");
        assert_eq!(json["values"][1], 20);
    }
}
