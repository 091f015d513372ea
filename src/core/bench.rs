use crate::core::checkers::Checker;
use crate::core::scanner::RangeScanner;
use crate::core::{BenchReport, CheckerRun, ConfigProvider, Result};
use crate::domain::model::CheckerKind;
use crate::utils::monitor::SystemMonitor;
use std::time::Instant;

pub struct BenchEngine<C: ConfigProvider> {
    config: C,
    monitor: SystemMonitor,
}

impl<C: ConfigProvider> BenchEngine<C> {
    pub fn new(config: C) -> Self {
        Self::new_with_monitoring(config, false)
    }

    pub fn new_with_monitoring(config: C, monitor_enabled: bool) -> Self {
        Self {
            config,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Runs every configured checker once over the range, in order.
    pub fn run(&self) -> Result<BenchReport> {
        let bound = self.config.range_bound();
        let scanner = RangeScanner::new(bound);
        tracing::info!("🔢 Scanning {} for primes", bound);
        self.monitor.log_sample("Start");

        let mut runs = Vec::with_capacity(self.config.checkers().len());
        for &kind in self.config.checkers() {
            let run = self.run_checker(&scanner, kind)?;
            println!("{} elapsed: {} seconds", run.label, run.elapsed.as_secs_f64());
            runs.push(run);
        }

        let profile = match self.config.profile() {
            Some(kind) => {
                tracing::info!("🔍 Profiling {} checker", kind);
                let checker = Checker::for_kind(kind, bound.limit);
                let (_, profile) = scanner.scan_profiled(&checker, kind)?;
                for (label, percent) in profile.slices() {
                    tracing::debug!("{}: {:.1}%", label, percent);
                }
                Some(profile)
            }
            None => None,
        };

        self.monitor.log_summary();

        Ok(BenchReport {
            generated_at: chrono::Utc::now(),
            bound,
            runs,
            profile,
        })
    }

    fn run_checker(&self, scanner: &RangeScanner, kind: CheckerKind) -> Result<CheckerRun> {
        tracing::debug!("Preparing {} checker", kind);
        let checker = Checker::for_kind(kind, scanner.bound().limit);

        let started = Instant::now();
        let primes = scanner.scan(&checker)?;
        let elapsed = started.elapsed();

        tracing::info!(
            "✅ {} checker found {} primes in {:?}",
            kind.label(),
            primes.len(),
            elapsed
        );
        self.monitor.log_sample(kind.label());

        Ok(CheckerRun {
            label: kind.label().to_string(),
            checker: kind,
            prime_count: primes.len(),
            elapsed,
            primes,
        })
    }
}
