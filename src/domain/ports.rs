use crate::domain::model::{BenchReport, Boundary, CheckerKind, RangeBound};
use crate::utils::error::Result;
use async_trait::async_trait;

/// A pure decision of whether `n` is prime.
pub trait PrimalityTest {
    fn is_prime(&self, n: i64) -> bool;

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> PrimalityTest for F
where
    F: Fn(i64) -> bool,
{
    fn is_prime(&self, n: i64) -> bool {
        self(n)
    }
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn limit(&self) -> i64;
    fn boundary(&self) -> Boundary;
    fn checkers(&self) -> &[CheckerKind];
    fn profile(&self) -> Option<CheckerKind>;
    fn output_path(&self) -> &str;
    fn export_enabled(&self) -> bool;

    fn range_bound(&self) -> RangeBound {
        RangeBound::new(self.limit(), self.boundary())
    }
}

#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Persists the report and returns where it went.
    async fn publish(&self, report: &BenchReport) -> Result<String>;
}
