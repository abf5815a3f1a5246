use crate::config::{BenchRunConfig, FailurePolicy};
use crate::discovery::{discover_benchmarks, BenchmarkFile};
use crate::errors::BenchResult;
use crate::pipeline::BuildPipeline;
use crate::process::{ProcessRunner, SystemProcessRunner};
use crate::table::{ResultTable, TimingColumn};
use crate::variant::ConfigurationVariant;

/// The benchmark files and variants a run will cover, fixed before anything executes
#[derive(Debug, Clone, PartialEq)]
pub struct BenchPlan {
    pub files: Vec<BenchmarkFile>,
    pub variants: Vec<ConfigurationVariant>,
}

/// Main benchmark runner: builds and times every benchmark file under every variant.
///
/// Everything runs sequentially; each subprocess finishes before the next one starts.
pub struct BenchmarkRunner<R = SystemProcessRunner> {
    config: BenchRunConfig,
    runner: R,
}

impl BenchmarkRunner<SystemProcessRunner> {
    pub fn new(config: BenchRunConfig) -> Self {
        Self::with_runner(config, SystemProcessRunner)
    }
}

impl<R: ProcessRunner> BenchmarkRunner<R> {
    pub fn with_runner(config: BenchRunConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &BenchRunConfig {
        &self.config
    }

    /// Discover benchmark files and parse variants without invoking anything
    pub fn plan(&self) -> BenchResult<BenchPlan> {
        let variants = self.config.configuration_variants()?;
        let files = discover_benchmarks(&self.config.bench_dir)?;
        Ok(BenchPlan { files, variants })
    }

    /// Run the benchmark
    pub fn run(&self) -> BenchResult<ResultTable> {
        let plan = self.plan()?;
        self.execute(plan)
    }

    /// Run a prepared plan and assemble the result table
    pub fn execute(&self, plan: BenchPlan) -> BenchResult<ResultTable> {
        let BenchPlan { files, variants } = plan;
        tracing::info!(
            "Running {} benchmarks under {} variants (on failure: {})",
            files.len(),
            variants.len(),
            self.config.on_failure
        );

        let pipeline = BuildPipeline::new(&self.config, &self.runner);
        let columns = variants
            .iter()
            .map(|variant| self.run_variant(&pipeline, &files, variant))
            .collect::<BenchResult<Vec<_>>>()?;

        ResultTable::new(files, columns)
    }

    fn run_variant(
        &self,
        pipeline: &BuildPipeline<'_>,
        files: &[BenchmarkFile],
        variant: &ConfigurationVariant,
    ) -> BenchResult<TimingColumn> {
        tracing::info!("Starting variant {}", variant);
        let mut cells = Vec::with_capacity(files.len());
        let mut aborted = false;

        for file in files {
            if aborted {
                cells.push(None);
                continue;
            }

            match pipeline.measure(file, variant) {
                Ok(timing) => cells.push(Some(timing)),
                Err(e) if e.is_step_failure() => match self.config.on_failure {
                    FailurePolicy::AbortRun => {
                        tracing::error!("{} [{}]: {}", file.name(), variant, e);
                        return Err(e);
                    }
                    FailurePolicy::SkipFile => {
                        tracing::warn!("{} [{}]: {}; recording no timing", file.name(), variant, e);
                        cells.push(None);
                    }
                    FailurePolicy::AbortVariant => {
                        tracing::warn!(
                            "{} [{}]: {}; skipping the rest of this variant",
                            file.name(),
                            variant,
                            e
                        );
                        cells.push(None);
                        aborted = true;
                    }
                },
                Err(e) => return Err(e),
            }
        }

        let column = TimingColumn::new(variant.clone(), cells);
        tracing::info!(
            "Finished variant {} ({} of {} files timed)",
            variant,
            files.len() - column.missing_count(),
            files.len()
        );
        Ok(column)
    }
}
