use crate::errors::BenchResult;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One benchmark source file, identified by its name within the input directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkFile {
    name: String,
    path: PathBuf,
}

impl BenchmarkFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// List the regular files directly inside `dir`, sorted by name.
///
/// A missing directory is not an error: it yields no benchmarks.
pub fn discover_benchmarks(dir: &Path) -> BenchResult<Vec<BenchmarkFile>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("Benchmark directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        // follows symlinks, like the directory listing it replaces
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        files.push(BenchmarkFile::new(name, path));
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!("Discovered {} benchmarks in {}", files.len(), dir.display());
    Ok(files)
}
