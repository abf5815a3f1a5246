pub mod renderers;

pub use renderers::{CsvRenderer, JsonRenderer, TableRenderer, TextRenderer};

use crate::errors::BenchResult;
use crate::table::ResultTable;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// How the final table is written to standard output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn renderer(&self) -> Box<dyn TableRenderer> {
        match self {
            OutputFormat::Text => Box::new(TextRenderer),
            OutputFormat::Csv => Box::new(CsvRenderer),
            OutputFormat::Json => Box::new(JsonRenderer),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{}', expected one of: text, csv, json",
                other
            )),
        }
    }
}

/// Render `table` in `format`
pub fn render_table(
    table: &ResultTable,
    format: OutputFormat,
    out: &mut dyn Write,
) -> BenchResult<()> {
    format.renderer().render(table, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
