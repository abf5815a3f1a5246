use anyhow::Result;
use compile_bench::{render_table, BenchRunConfig, BenchmarkRunner, OutputFormat};
use std::io::Write;

/// Build and time every benchmark under every variant, then print the table once
pub fn run_benchmark(
    config: BenchRunConfig,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let runner = BenchmarkRunner::new(config);
    let table = runner.run()?;

    let missing = table.missing_count();
    if missing > 0 {
        tracing::warn!("{} of the timings are missing; see the log above", missing);
    }

    render_table(&table, format, out)?;
    out.flush()?;
    Ok(())
}

/// Print what a run would cover without running anything
pub fn list_plan(config: BenchRunConfig, out: &mut dyn Write) -> Result<()> {
    let runner = BenchmarkRunner::new(config);
    let plan = runner.plan()?;

    writeln!(
        out,
        "Benchmarks in {} ({}):",
        runner.config().bench_dir.display(),
        plan.files.len()
    )?;
    for file in &plan.files {
        writeln!(out, "  {}", file.name())?;
    }

    let max_len = plan
        .variants
        .iter()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(0);
    writeln!(out, "Variants ({}):", plan.variants.len())?;
    for variant in &plan.variants {
        let label = variant.to_string();
        writeln!(
            out,
            "  {}{} => {:?}",
            label,
            " ".repeat(max_len - label.len()),
            variant.flags()
        )?;
    }
    Ok(())
}
