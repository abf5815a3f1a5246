use crate::errors::{BenchError, BenchResult};
use crate::variant::{parse_variants, ConfigurationVariant};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_BENCH_DIR: &str = "benches";
pub const DEFAULT_COMPILER: &str = "./compiler.out";
pub const DEFAULT_TOOLCHAIN: &str = "clang";
pub const DEFAULT_ASSEMBLY_PATH: &str = "scriptasm.s";
pub const DEFAULT_EXECUTABLE_PATH: &str = "scriptasm.out";
pub const DEFAULT_VARIANTS: [&str; 2] = ["", "--partial-eval false"];

/// What the runner does when one step of a (file, variant) pipeline fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Record a missing value for the file and continue with the next one
    #[default]
    SkipFile,
    /// Record missing values for the rest of the variant and move to the next variant
    AbortVariant,
    /// Stop the whole run and report the error
    AbortRun,
}

impl FailurePolicy {
    pub const ALL: [FailurePolicy; 3] = [
        FailurePolicy::SkipFile,
        FailurePolicy::AbortVariant,
        FailurePolicy::AbortRun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::SkipFile => "skip-file",
            FailurePolicy::AbortVariant => "abort-variant",
            FailurePolicy::AbortRun => "abort-run",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown failure policy '{}', expected one of: skip-file, abort-variant, abort-run",
                    s
                )
            })
    }
}

/// Settings for one benchmark run.
///
/// Every field has a default, so an empty TOML document describes the stock setup:
/// `./compiler.out` and `clang` over the files in `benches/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchRunConfig {
    pub bench_dir: PathBuf,
    pub compiler: PathBuf,
    pub toolchain: PathBuf,
    pub assembly_path: PathBuf,
    pub executable_path: PathBuf,
    pub variants: Vec<String>,
    pub on_failure: FailurePolicy,
}

impl Default for BenchRunConfig {
    fn default() -> Self {
        Self {
            bench_dir: PathBuf::from(DEFAULT_BENCH_DIR),
            compiler: PathBuf::from(DEFAULT_COMPILER),
            toolchain: PathBuf::from(DEFAULT_TOOLCHAIN),
            assembly_path: PathBuf::from(DEFAULT_ASSEMBLY_PATH),
            executable_path: PathBuf::from(DEFAULT_EXECUTABLE_PATH),
            variants: DEFAULT_VARIANTS.iter().map(|v| v.to_string()).collect(),
            on_failure: FailurePolicy::default(),
        }
    }
}

impl BenchRunConfig {
    /// Parse a TOML document; fields it leaves out keep their defaults
    pub fn from_toml_str(content: &str) -> BenchResult<Self> {
        let config: BenchRunConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file
    pub fn load(path: &Path) -> BenchResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BenchError::Config(format!("Failed to read config at {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Check the settings that would otherwise only fail halfway through a run
    pub fn validate(&self) -> BenchResult<()> {
        if self.variants.is_empty() {
            return Err(BenchError::Config(
                "At least one variant is required".to_string(),
            ));
        }
        if self.assembly_path == self.executable_path {
            return Err(BenchError::Config(format!(
                "Assembly and executable paths must differ (both are {})",
                self.assembly_path.display()
            )));
        }
        self.configuration_variants().map(|_| ())
    }

    pub fn configuration_variants(&self) -> BenchResult<Vec<ConfigurationVariant>> {
        parse_variants(self.variants.iter().cloned())
    }
}
