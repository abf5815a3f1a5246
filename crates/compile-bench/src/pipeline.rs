use crate::config::BenchRunConfig;
use crate::discovery::BenchmarkFile;
use crate::errors::{BenchError, BenchResult};
use crate::process::{path_arg, Invocation, ProcessOutput, ProcessRunner};
use crate::table::TimingResult;
use crate::variant::ConfigurationVariant;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// The three subprocess steps that turn one benchmark file into a timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Compile,
    Assemble,
    Execute,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Compile => write!(f, "compile"),
            Step::Assemble => write!(f, "assemble"),
            Step::Execute => write!(f, "execute"),
        }
    }
}

/// Compiles, links and times benchmark programs through the external toolchain.
///
/// The assembly and executable paths are shared by every iteration and overwritten each time.
pub struct BuildPipeline<'a> {
    compiler: PathBuf,
    toolchain: PathBuf,
    assembly_path: PathBuf,
    executable_path: PathBuf,
    runner: &'a dyn ProcessRunner,
}

impl<'a> BuildPipeline<'a> {
    pub fn new(config: &BenchRunConfig, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            compiler: config.compiler.clone(),
            toolchain: config.toolchain.clone(),
            assembly_path: config.assembly_path.clone(),
            executable_path: runnable_path(&config.executable_path),
            runner,
        }
    }

    /// `<compiler> <file> -o <assembly> [flags...]`
    pub fn compile_invocation(
        &self,
        file: &BenchmarkFile,
        variant: &ConfigurationVariant,
    ) -> Invocation {
        Invocation::new(path_arg(&self.compiler))
            .arg(path_arg(file.path()))
            .arg("-o")
            .arg(path_arg(&self.assembly_path))
            .args(variant.flags())
    }

    /// `<toolchain> <assembly> -o <executable>`
    pub fn assemble_invocation(&self) -> Invocation {
        Invocation::new(path_arg(&self.toolchain))
            .arg(path_arg(&self.assembly_path))
            .arg("-o")
            .arg(path_arg(&self.executable_path))
    }

    pub fn execute_invocation(&self) -> Invocation {
        Invocation::new(path_arg(&self.executable_path)).discard_output()
    }

    pub fn compile(&self, file: &BenchmarkFile, variant: &ConfigurationVariant) -> BenchResult<()> {
        let invocation = self.compile_invocation(file, variant);
        self.run_step(Step::Compile, file, &invocation).map(|_| ())
    }

    pub fn assemble(&self, file: &BenchmarkFile) -> BenchResult<()> {
        let invocation = self.assemble_invocation();
        self.run_step(Step::Assemble, file, &invocation).map(|_| ())
    }

    /// Run the built executable and return the wall-clock time the harness waited for it
    pub fn execute(&self, file: &BenchmarkFile) -> BenchResult<TimingResult> {
        let invocation = self.execute_invocation();
        let start = Instant::now();
        let output = self.runner.run(&invocation)?;
        let elapsed = start.elapsed();
        check_status(Step::Execute, file, &output)?;
        Ok(TimingResult::from(elapsed))
    }

    /// Compile, assemble and time one file under one variant
    pub fn measure(
        &self,
        file: &BenchmarkFile,
        variant: &ConfigurationVariant,
    ) -> BenchResult<TimingResult> {
        self.compile(file, variant)?;
        self.assemble(file)?;
        let timing = self.execute(file)?;
        tracing::debug!(
            "{} [{}] ran in {:.6}s",
            file.name(),
            variant,
            timing.seconds()
        );
        Ok(timing)
    }

    fn run_step(
        &self,
        step: Step,
        file: &BenchmarkFile,
        invocation: &Invocation,
    ) -> BenchResult<ProcessOutput> {
        tracing::debug!("{}: {}", step, invocation);
        let output = self.runner.run(invocation)?;
        check_status(step, file, &output)?;
        Ok(output)
    }
}

fn check_status(step: Step, file: &BenchmarkFile, output: &ProcessOutput) -> BenchResult<()> {
    if output.success {
        return Ok(());
    }
    if !output.stderr.trim().is_empty() {
        tracing::debug!("{} stderr for {}:\n{}", step, file.name(), output.stderr.trim_end());
    }
    Err(BenchError::StepFailed {
        step,
        file: file.path().to_path_buf(),
        status: output.exit_report(),
    })
}

/// A bare file name would be looked up on PATH; anchor it to the working directory instead
fn runnable_path(path: &Path) -> PathBuf {
    let bare = path.is_relative()
        && path
            .parent()
            .map_or(true, |parent| parent.as_os_str().is_empty());
    if bare {
        Path::new(".").join(path)
    } else {
        path.to_path_buf()
    }
}
