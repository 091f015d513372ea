#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Process resources observed right after a checker run.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy)]
pub struct ResourceSample {
    pub cpu_usage: f32,
    pub memory_mb: u64,
    pub since_start: Duration,
}

#[cfg(feature = "cli")]
struct MonitorState {
    system: System,
    peak_memory_mb: u64,
    samples: usize,
}

#[cfg(feature = "cli")]
pub struct SystemMonitor {
    state: Mutex<MonitorState>,
    pid: Option<Pid>,
    started: Instant,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => Some(pid),
                Err(e) => {
                    tracing::warn!("Could not resolve current PID, monitoring disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            state: Mutex::new(MonitorState {
                system: System::new(),
                peak_memory_mb: 0,
                samples: 0,
            }),
            pid,
            started: Instant::now(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.pid.is_some()
    }

    /// Refreshes only this process and folds its memory into the running peak.
    pub fn sample(&self) -> Option<ResourceSample> {
        let pid = self.pid?;
        let mut state = self.state.lock().ok()?;
        state.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );

        let process = state.system.process(pid)?;
        let sample = ResourceSample {
            cpu_usage: process.cpu_usage(),
            memory_mb: process.memory() / 1024 / 1024,
            since_start: self.started.elapsed(),
        };

        state.peak_memory_mb = state.peak_memory_mb.max(sample.memory_mb);
        state.samples += 1;
        Some(sample)
    }

    pub fn log_sample(&self, label: &str) {
        if let Some(sample) = self.sample() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Since start: {:?}",
                label,
                sample.cpu_usage,
                sample.memory_mb,
                sample.since_start
            );
        }
    }

    pub fn log_summary(&self) {
        if !self.is_enabled() {
            return;
        }
        if let Ok(state) = self.state.lock() {
            tracing::info!(
                "📊 {} samples over {:?}, peak memory {}MB",
                state.samples,
                self.started.elapsed(),
                state.peak_memory_mb
            );
        }
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn is_enabled(&self) -> bool {
        false
    }

    pub fn log_sample(&self, _label: &str) {}

    pub fn log_summary(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_reports_nothing() {
        let monitor = SystemMonitor::new(false);
        assert!(!monitor.is_enabled());
        monitor.log_sample("noop");
        monitor.log_summary();
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_enabled_monitor_samples_current_process() {
        let monitor = SystemMonitor::new(true);
        assert!(monitor.is_enabled());
        // 沙盒環境可能看不到 /proc，只在取得樣本時檢查內容
        if let Some(sample) = monitor.sample() {
            assert!(sample.memory_mb < 1024 * 1024);
            assert!(sample.since_start <= monitor.started.elapsed());
        }
    }
}
