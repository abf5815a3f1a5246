use crate::discovery::BenchmarkFile;
use crate::errors::{BenchError, BenchResult};
use crate::variant::ConfigurationVariant;
use polars::prelude::*;
use serde::Serialize;
use std::time::Duration;

/// Name of the leading column holding the benchmark file names
pub const FILENAME_COLUMN: &str = "filename";

/// Wall-clock seconds for one (file, variant) pair; always finite and non-negative
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct TimingResult(f64);

impl TimingResult {
    pub fn from_seconds(seconds: f64) -> Option<Self> {
        (seconds.is_finite() && seconds >= 0.0).then_some(Self(seconds))
    }

    pub fn seconds(&self) -> f64 {
        self.0
    }
}

impl From<Duration> for TimingResult {
    fn from(duration: Duration) -> Self {
        Self(duration.as_secs_f64())
    }
}

/// All timings for one variant, one cell per benchmark file in discovery order.
/// `None` marks a file whose pipeline failed.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingColumn {
    variant: ConfigurationVariant,
    cells: Vec<Option<TimingResult>>,
}

impl TimingColumn {
    pub fn new(variant: ConfigurationVariant, cells: Vec<Option<TimingResult>>) -> Self {
        Self { variant, cells }
    }

    pub fn variant(&self) -> &ConfigurationVariant {
        &self.variant
    }

    pub fn cells(&self) -> &[Option<TimingResult>] {
        &self.cells
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }
}

/// Timings of every benchmark file under every variant.
///
/// Rows follow file discovery order, columns follow variant declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    files: Vec<BenchmarkFile>,
    columns: Vec<TimingColumn>,
}

impl ResultTable {
    /// Assemble the table once all columns are known
    pub fn new(files: Vec<BenchmarkFile>, columns: Vec<TimingColumn>) -> BenchResult<Self> {
        if let Some(column) = columns.iter().find(|c| c.cells.len() != files.len()) {
            return Err(BenchError::ResultsProcessing(format!(
                "Column {:?} has {} cells but there are {} benchmark files",
                column.variant.label(),
                column.cells.len(),
                files.len()
            )));
        }
        Ok(Self { files, columns })
    }

    pub fn files(&self) -> &[BenchmarkFile] {
        &self.files
    }

    pub fn columns(&self) -> &[TimingColumn] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.files.len()
    }

    /// Column names as printed, starting with the filename column
    pub fn column_labels(&self) -> Vec<&str> {
        std::iter::once(FILENAME_COLUMN)
            .chain(self.columns.iter().map(|c| c.variant.label()))
            .collect()
    }

    pub fn column(&self, label: &str) -> Option<&TimingColumn> {
        self.columns.iter().find(|c| c.variant.label() == label)
    }

    /// Timing at `row` in the `column`-th variant column (0 is the first variant)
    pub fn cell(&self, row: usize, column: usize) -> Option<TimingResult> {
        self.columns.get(column)?.cells.get(row).copied().flatten()
    }

    pub fn missing_count(&self) -> usize {
        self.columns.iter().map(TimingColumn::missing_count).sum()
    }

    /// Build a DataFrame: a string filename column then one nullable Float64 column per variant
    pub fn to_dataframe(&self) -> BenchResult<DataFrame> {
        let mut series_vec = Vec::with_capacity(self.columns.len() + 1);

        let names: Vec<&str> = self.files.iter().map(BenchmarkFile::name).collect();
        series_vec.push(Series::new(FILENAME_COLUMN, names));

        for column in &self.columns {
            let values: Vec<Option<f64>> = column
                .cells
                .iter()
                .map(|cell| cell.map(|t| t.seconds()))
                .collect();
            series_vec.push(Series::new(column.variant.label(), values));
        }

        DataFrame::new(series_vec)
            .map_err(|e| BenchError::DataFrame(format!("Failed to create DataFrame: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(names: &[&str]) -> Vec<BenchmarkFile> {
        names
            .iter()
            .map(|n| BenchmarkFile::new(*n, format!("benches/{}", n)))
            .collect()
    }

    fn secs(s: f64) -> Option<TimingResult> {
        TimingResult::from_seconds(s)
    }

    #[test]
    fn test_timing_result_rejects_negative_and_nan() {
        assert!(TimingResult::from_seconds(-0.5).is_none());
        assert!(TimingResult::from_seconds(f64::NAN).is_none());
        assert!(TimingResult::from_seconds(f64::INFINITY).is_none());
        assert_eq!(TimingResult::from_seconds(0.0).unwrap().seconds(), 0.0);
        assert_eq!(
            TimingResult::from(Duration::from_millis(1500)).seconds(),
            1.5
        );
    }

    #[test]
    fn test_shape_and_labels() {
        let table = ResultTable::new(
            files(&["a.src", "b.src"]),
            vec![
                TimingColumn::new(ConfigurationVariant::new(""), vec![secs(0.1), secs(0.2)]),
                TimingColumn::new(
                    ConfigurationVariant::new("--flag-x false"),
                    vec![secs(0.3), None],
                ),
            ],
        )
        .unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_labels(), vec!["filename", "", "--flag-x false"]);
        assert_eq!(table.cell(1, 0), secs(0.2));
        assert_eq!(table.cell(1, 1), None);
        assert_eq!(table.cell(5, 0), None);
        assert_eq!(table.missing_count(), 1);
        assert_eq!(table.column("--flag-x false").unwrap().missing_count(), 1);
    }

    #[test]
    fn test_rejects_ragged_columns() {
        let err = ResultTable::new(
            files(&["a.src", "b.src"]),
            vec![TimingColumn::new(ConfigurationVariant::new(""), vec![secs(0.1)])],
        )
        .unwrap_err();
        assert!(matches!(err, BenchError::ResultsProcessing(_)));
    }

    #[test]
    fn test_dataframe_matches_table() {
        let table = ResultTable::new(
            files(&["a.src", "b.src"]),
            vec![
                TimingColumn::new(ConfigurationVariant::new(""), vec![secs(0.5), None]),
                TimingColumn::new(
                    ConfigurationVariant::new("--jit true"),
                    vec![secs(0.25), secs(1.0)],
                ),
            ],
        )
        .unwrap();

        let df = table.to_dataframe().unwrap();
        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.get_column_names(), vec!["filename", "", "--jit true"]);

        let default_col = df.column("").unwrap().f64().unwrap();
        assert_eq!(default_col.get(0), Some(0.5));
        assert_eq!(default_col.get(1), None);
        assert_eq!(df.column("--jit true").unwrap().null_count(), 0);
    }

    #[test]
    fn test_empty_table_keeps_columns() {
        let table = ResultTable::new(
            Vec::new(),
            vec![TimingColumn::new(ConfigurationVariant::new(""), Vec::new())],
        )
        .unwrap();
        let df = table.to_dataframe().unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 2);
    }
}
