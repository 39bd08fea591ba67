mod cli;
mod dataset;
mod runner;
mod stats;

pub use cli::Args;
pub use dataset::generate_users;
pub use runner::run_benchmark;
pub use stats::BenchReport;
