pub mod config;
pub mod discovery;
pub mod errors;
pub mod pipeline;
pub mod process;
pub mod reporting;
pub mod runners;
pub mod table;
pub mod variant;

// Re-export main components for easier use
pub use config::{BenchRunConfig, FailurePolicy};
pub use discovery::{discover_benchmarks, BenchmarkFile};
pub use errors::{BenchError, BenchResult};
pub use reporting::{render_table, OutputFormat};
pub use runners::benchmark_runner::{BenchPlan, BenchmarkRunner};
pub use table::{ResultTable, TimingColumn, TimingResult};
pub use variant::ConfigurationVariant;
