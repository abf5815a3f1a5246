//! Drives the harness against shell-script stand-ins for the compiler and the linker.
#![cfg(unix)]

use compile_bench::{BenchRunConfig, BenchmarkRunner, FailurePolicy};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::tempdir;

/// "Compiles" to a shell script that exits with the status named in the source file
const FAKE_COMPILER: &str = r#"#!/bin/sh
src="$1"
out="$3"
shift 3
case "$*" in
  *--reject*) echo "rejected flags: $*" >&2; exit 1 ;;
esac
printf '#!/bin/sh\nexit %s\n' "$(cat "$src")" > "$out"
"#;

/// "Links" by copying the script and marking it executable
const FAKE_LINKER: &str = r#"#!/bin/sh
cp "$1" "$3" && chmod +x "$3"
"#;

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

// One test so no other thread forks while the scripts are being written.
#[test]
fn builds_and_times_with_external_processes() {
    let dir = tempdir().unwrap();
    let benches = dir.path().join("benches");
    fs::create_dir(&benches).unwrap();
    fs::write(benches.join("fast.b"), "0").unwrap();
    fs::write(benches.join("crash.b"), "3").unwrap();

    let compiler = dir.path().join("compiler.out");
    let linker = dir.path().join("linker");
    write_script(&compiler, FAKE_COMPILER);
    write_script(&linker, FAKE_LINKER);

    let config = BenchRunConfig {
        bench_dir: benches,
        compiler,
        toolchain: linker,
        assembly_path: dir.path().join("scriptasm.s"),
        executable_path: dir.path().join("scriptasm.out"),
        variants: vec!["".to_string(), "--reject true".to_string()],
        on_failure: FailurePolicy::SkipFile,
    };

    let table = BenchmarkRunner::new(config.clone()).run().unwrap();
    let names: Vec<&str> = table.files().iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["crash.b", "fast.b"]);

    // the default variant builds both; crash.b's executable exits non-zero
    assert_eq!(table.cell(0, 0), None);
    let fast = table.cell(1, 0).unwrap().seconds();
    assert!(fast.is_finite() && fast >= 0.0);

    // the compiler rejects every file under the second variant
    assert_eq!(table.column("--reject true").unwrap().missing_count(), 2);
    assert!(dir.path().join("scriptasm.out").exists());

    let abort = BenchRunConfig {
        on_failure: FailurePolicy::AbortRun,
        ..config
    };
    assert!(BenchmarkRunner::new(abort).run().is_err());
}
