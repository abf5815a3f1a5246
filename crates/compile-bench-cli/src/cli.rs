use anyhow::Result;
use clap::Parser;
use compile_bench::{BenchRunConfig, FailurePolicy, OutputFormat};
use std::io;
use std::path::PathBuf;

use crate::commands::bench::{list_plan, run_benchmark};
use crate::logging::setup_logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Time a compiler's output across flag configurations", long_about = None)]
pub struct Cli {
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Read settings from a TOML file",
        long_help = "Read settings from a TOML file. Fields left out keep their defaults, and flags given on the command line override the file."
    )]
    config: Option<PathBuf>,

    #[arg(
        short = 'd',
        long = "bench-dir",
        value_name = "DIR",
        help = "Directory of benchmark programs (default: benches)"
    )]
    bench_dir: Option<PathBuf>,

    #[arg(
        long = "compiler",
        value_name = "PATH",
        help = "Compiler to benchmark (default: ./compiler.out)"
    )]
    compiler: Option<PathBuf>,

    #[arg(
        long = "toolchain",
        value_name = "PATH",
        help = "Assembler/linker that turns the compiler output into an executable (default: clang)"
    )]
    toolchain: Option<PathBuf>,

    #[arg(
        long = "assembly",
        value_name = "PATH",
        help = "Where the compiler writes its output (default: scriptasm.s)"
    )]
    assembly: Option<PathBuf>,

    #[arg(
        long = "executable",
        value_name = "PATH",
        help = "Where the linked benchmark executable is written (default: scriptasm.out)"
    )]
    executable: Option<PathBuf>,

    #[arg(
        long = "variant",
        value_name = "FLAGS",
        action = clap::ArgAction::Append,
        allow_hyphen_values = true,
        help = "Compiler flags for one column; repeat for more columns",
        long_help = "Compiler flags for one result column, split on whitespace. Repeat the option to declare several variants in order; an empty string is the default build. Replaces the variants from the config file."
    )]
    variants: Vec<String>,

    #[arg(
        long = "on-failure",
        value_name = "POLICY",
        help = "What to do when a build or run fails: skip-file, abort-variant, abort-run"
    )]
    on_failure: Option<FailurePolicy>,

    #[arg(
        long = "format",
        value_name = "FORMAT",
        help = "Output format (text, csv, json)",
        default_value = "text"
    )]
    format: OutputFormat,

    #[arg(
        long = "list",
        help = "List the benchmark files and variants without running anything",
        action = clap::ArgAction::SetTrue
    )]
    list: bool,

    #[arg(
        long = "log-file",
        value_name = "FILE",
        help = "Also write logs to this file"
    )]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Defaults, then the config file, then command-line flags
    pub fn resolve_config(&self) -> Result<BenchRunConfig> {
        let mut config = match &self.config {
            Some(path) => BenchRunConfig::load(path)?,
            None => BenchRunConfig::default(),
        };

        if let Some(dir) = &self.bench_dir {
            config.bench_dir = dir.clone();
        }
        if let Some(compiler) = &self.compiler {
            config.compiler = compiler.clone();
        }
        if let Some(toolchain) = &self.toolchain {
            config.toolchain = toolchain.clone();
        }
        if let Some(assembly) = &self.assembly {
            config.assembly_path = assembly.clone();
        }
        if let Some(executable) = &self.executable {
            config.executable_path = executable.clone();
        }
        if !self.variants.is_empty() {
            config.variants = self.variants.clone();
        }
        if let Some(policy) = self.on_failure {
            config.on_failure = policy;
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn cli() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_file.as_deref())?;

    let config = cli.resolve_config()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        return list_plan(config, &mut out);
    }
    run_benchmark(config, cli.format, &mut out)
}
