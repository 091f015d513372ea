pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{
    bench::BenchEngine,
    checkers::{is_prime_bounded, is_prime_naive, BoundedChecker, NaiveChecker, SieveChecker},
    report::ReportWriter,
    scanner::RangeScanner,
};
pub use domain::model::{Boundary, CheckerKind, PrimeSequence, RangeBound};
pub use domain::ports::PrimalityTest;
pub use utils::error::{BenchError, Result};
