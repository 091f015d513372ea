pub mod bench;
pub mod checkers;
pub mod report;
pub mod scanner;

pub use crate::domain::model::{BenchReport, CheckerRun, PrimeSequence};
pub use crate::domain::ports::{ConfigProvider, PrimalityTest, ReportSink, Storage};
pub use crate::utils::error::Result;
