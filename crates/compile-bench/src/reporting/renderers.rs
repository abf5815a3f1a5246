use crate::errors::{BenchError, BenchResult};
use crate::table::ResultTable;
use chrono::{DateTime, Utc};
use polars::prelude::*;
use serde::Serialize;
use std::env;
use std::io::Write;

/// Trait for result table renderers
pub trait TableRenderer {
    fn render(&self, table: &ResultTable, out: &mut dyn Write) -> BenchResult<()>;
}

/// Prints the DataFrame with its default formatting, every row and column included
pub struct TextRenderer;

impl TextRenderer {
    /// polars reads its display limits from the environment; lift them so nothing is elided
    fn lift_display_limits() {
        for var in ["POLARS_FMT_MAX_ROWS", "POLARS_FMT_MAX_COLS"] {
            env::set_var(var, "-1");
        }
        env::set_var("POLARS_FMT_STR_LEN", "1024");
    }
}

impl TableRenderer for TextRenderer {
    fn render(&self, table: &ResultTable, out: &mut dyn Write) -> BenchResult<()> {
        let df = table.to_dataframe()?;
        Self::lift_display_limits();
        writeln!(out, "{}", df)?;
        Ok(())
    }
}

/// Writes the table as CSV; missing timings become empty fields
pub struct CsvRenderer;

impl TableRenderer for CsvRenderer {
    fn render(&self, table: &ResultTable, out: &mut dyn Write) -> BenchResult<()> {
        let mut df = table.to_dataframe()?;
        CsvWriter::new(out)
            .include_header(true)
            .with_separator(b',')
            .finish(&mut df)
            .map_err(|e| BenchError::DataFrame(format!("Failed to write CSV: {}", e)))?;
        Ok(())
    }
}

/// Writes a pretty-printed JSON document with one object per benchmark file
pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    columns: Vec<&'a str>,
    rows: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    filename: &'a str,
    timings: Vec<JsonCell<'a>>,
}

#[derive(Serialize)]
struct JsonCell<'a> {
    variant: &'a str,
    seconds: Option<f64>,
}

impl TableRenderer for JsonRenderer {
    fn render(&self, table: &ResultTable, out: &mut dyn Write) -> BenchResult<()> {
        let rows = table
            .files()
            .iter()
            .enumerate()
            .map(|(row, file)| JsonRow {
                filename: file.name(),
                timings: table
                    .columns()
                    .iter()
                    .enumerate()
                    .map(|(col, column)| JsonCell {
                        variant: column.variant().label(),
                        seconds: table.cell(row, col).map(|t| t.seconds()),
                    })
                    .collect(),
            })
            .collect();

        let report = JsonReport {
            generated_at: Utc::now(),
            columns: table.column_labels(),
            rows,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::BenchmarkFile;
    use crate::table::{TimingColumn, TimingResult, FILENAME_COLUMN};
    use crate::variant::ConfigurationVariant;

    fn sample_table() -> ResultTable {
        ResultTable::new(
            vec![
                BenchmarkFile::new("a.src", "benches/a.src"),
                BenchmarkFile::new("b.src", "benches/b.src"),
            ],
            vec![
                TimingColumn::new(
                    ConfigurationVariant::new(""),
                    vec![TimingResult::from_seconds(0.5), None],
                ),
                TimingColumn::new(
                    ConfigurationVariant::new("--flag-x false"),
                    vec![
                        TimingResult::from_seconds(0.25),
                        TimingResult::from_seconds(2.0),
                    ],
                ),
            ],
        )
        .unwrap()
    }

    fn render(renderer: &dyn TableRenderer, table: &ResultTable) -> String {
        let mut buf = Vec::new();
        renderer.render(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_lists_every_file() {
        let output = render(&TextRenderer, &sample_table());
        assert!(output.contains(FILENAME_COLUMN));
        assert!(output.contains("a.src"));
        assert!(output.contains("b.src"));
        assert!(output.contains("--flag-x false"));
    }

    #[test]
    fn test_csv_has_header_and_empty_missing_cells() {
        let output = render(&CsvRenderer, &sample_table());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("filename,"));
        assert!(lines[0].ends_with("--flag-x false"));
        assert!(lines[1].starts_with("a.src,0.5,0.25"));
        assert!(lines[2].starts_with("b.src,,2"));
    }

    #[test]
    fn test_json_keeps_row_and_column_order() {
        let output = render(&JsonRenderer, &sample_table());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            value["columns"],
            serde_json::json!(["filename", "", "--flag-x false"])
        );
        assert_eq!(value["rows"][0]["filename"], "a.src");
        assert_eq!(value["rows"][0]["timings"][1]["seconds"], 0.25);
        assert!(value["rows"][1]["timings"][0]["seconds"].is_null());
        assert!(value["generated_at"].is_string());
    }
}
