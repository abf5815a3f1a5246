use crate::errors::{BenchError, BenchResult, ExitReport};
use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// A single blocking subprocess call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
    /// Send stdout and stderr to the null device instead of capturing them
    pub discard_output: bool,
}

impl Invocation {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            discard_output: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn discard_output(mut self) -> Self {
        self.discard_output = true;
        self
    }

    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// What the harness keeps from a finished subprocess
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    /// None when the process was killed by a signal
    pub status_code: Option<i32>,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            status_code: Some(0),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            status_code: Some(code),
            stderr: stderr.into(),
        }
    }

    pub fn exit_report(&self) -> ExitReport {
        match self.status_code {
            Some(code) => ExitReport::Code(code),
            None => ExitReport::Signal,
        }
    }
}

impl From<Output> for ProcessOutput {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            status_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Runs subprocesses to completion. Implementations block until the child exits.
pub trait ProcessRunner {
    fn run(&self, invocation: &Invocation) -> BenchResult<ProcessOutput>;
}

impl<T: ProcessRunner + ?Sized> ProcessRunner for &T {
    fn run(&self, invocation: &Invocation) -> BenchResult<ProcessOutput> {
        (**self).run(invocation)
    }
}

/// Spawns real child processes through `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, invocation: &Invocation) -> BenchResult<ProcessOutput> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).stdin(Stdio::null());

        let launch_error = |source: std::io::Error| BenchError::Launch {
            program: invocation.program_name(),
            source,
        };

        if invocation.discard_output {
            let status = cmd
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .map_err(launch_error)?;
            Ok(ProcessOutput {
                success: status.success(),
                status_code: status.code(),
                stderr: String::new(),
            })
        } else {
            let output = cmd.output().map_err(launch_error)?;
            Ok(output.into())
        }
    }
}

/// Render a path as a process argument
pub(crate) fn path_arg(path: &Path) -> OsString {
    path.as_os_str().to_os_string()
}
