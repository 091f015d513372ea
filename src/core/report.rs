use crate::core::{BenchReport, ReportSink, Result, Storage};
use crate::domain::model::ProfileBreakdown;
use crate::utils::error::BenchError;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;
use std::time::Duration;
use zip::write::{FileOptions, ZipWriter};

pub const REPORT_ARCHIVE: &str = "bench_report.zip";
const BAR_WIDTH: usize = 40;

/// Horizontal bar chart of elapsed seconds per checker.
pub fn render_runtime_chart(timings: &[(&str, Duration)]) -> String {
    let mut out = String::from("Runtime comparison (seconds)\n");
    if timings.is_empty() {
        out.push_str("  (no runs)\n");
        return out;
    }

    let label_width = timings.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let max = timings
        .iter()
        .map(|(_, d)| d.as_secs_f64())
        .fold(0.0_f64, f64::max);

    for (label, elapsed) in timings {
        let secs = elapsed.as_secs_f64();
        let len = if max > 0.0 {
            ((secs / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {:<width$} | {:<bar$} {:.4}",
            label,
            "█".repeat(len),
            secs,
            width = label_width,
            bar = BAR_WIDTH
        );
    }
    out
}

/// Share of profiled time per slice, one decimal like `%1.1f%%`.
pub fn render_profile_chart(profile: &ProfileBreakdown) -> String {
    let mut out = format!("Time distribution by function ({} checker)\n", profile.checker);
    let slices = profile.slices();
    let label_width = slices.iter().map(|(l, _)| l.len()).max().unwrap_or(0);

    for (label, percent) in slices {
        let len = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "  {:<width$} | {:<bar$} {:.1}%",
            label,
            "▒".repeat(len),
            percent,
            width = label_width,
            bar = BAR_WIDTH
        );
    }
    out
}

pub fn render_charts(report: &BenchReport) -> String {
    let mut out = render_runtime_chart(&report.timings());
    if let Some(profile) = &report.profile {
        out.push('\n');
        out.push_str(&render_profile_chart(profile));
    }
    out
}

#[derive(Serialize)]
struct TimingRow<'a> {
    label: &'a str,
    checker: String,
    boundary: String,
    limit: i64,
    prime_count: usize,
    elapsed_seconds: f64,
}

#[derive(Serialize)]
struct PrimeRow<'a> {
    checker: &'a str,
    index: usize,
    prime: i64,
}

pub fn timings_csv(report: &BenchReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for run in &report.runs {
        writer.serialize(TimingRow {
            label: &run.label,
            checker: run.checker.to_string(),
            boundary: report.bound.boundary.to_string(),
            limit: report.bound.limit,
            prime_count: run.prime_count,
            elapsed_seconds: run.elapsed.as_secs_f64(),
        })?;
    }
    finish_csv(writer)
}

pub fn primes_csv(report: &BenchReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for run in &report.runs {
        let checker = run.checker.to_string();
        for (index, &prime) in run.primes.iter().enumerate() {
            writer.serialize(PrimeRow {
                checker: &checker,
                index,
                prime,
            })?;
        }
    }
    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer.into_inner().map_err(|e| BenchError::ReportError {
        message: format!("Failed to flush CSV buffer: {}", e),
    })
}

/// Packs the report into a ZIP archive and stores it.
pub struct ReportWriter<S: Storage> {
    storage: S,
    output_path: String,
}

impl<S: Storage> ReportWriter<S> {
    pub fn new(storage: S, output_path: impl Into<String>) -> Self {
        Self {
            storage,
            output_path: output_path.into(),
        }
    }

    pub fn build_archive(report: &BenchReport) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        zip.start_file::<_, ()>("timings.csv", FileOptions::default())?;
        zip.write_all(&timings_csv(report)?)?;

        zip.start_file::<_, ()>("primes.csv", FileOptions::default())?;
        zip.write_all(&primes_csv(report)?)?;

        zip.start_file::<_, ()>("report.json", FileOptions::default())?;
        let json_data = serde_json::to_string_pretty(report)?;
        zip.write_all(json_data.as_bytes())?;

        zip.start_file::<_, ()>("charts.txt", FileOptions::default())?;
        zip.write_all(render_charts(report).as_bytes())?;

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait::async_trait]
impl<S: Storage> ReportSink for ReportWriter<S> {
    async fn publish(&self, report: &BenchReport) -> Result<String> {
        let zip_data = Self::build_archive(report)?;

        tracing::debug!("Writing report archive ({} bytes) to storage", zip_data.len());
        self.storage.write_file(REPORT_ARCHIVE, &zip_data).await?;

        Ok(format!("{}/{}", self.output_path, REPORT_ARCHIVE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CheckerKind, CheckerRun, PrimeSequence, RangeBound};
    use std::collections::HashMap;
    use std::io::Read;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                BenchError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    path.to_string(),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn sample_report() -> BenchReport {
        let mut primes = PrimeSequence::new();
        for p in [2, 3, 5, 7] {
            primes.push(p).unwrap();
        }
        BenchReport {
            generated_at: chrono::Utc::now(),
            bound: RangeBound::inclusive(10),
            runs: vec![
                CheckerRun {
                    label: "Naive".to_string(),
                    checker: CheckerKind::Naive,
                    prime_count: 4,
                    elapsed: Duration::from_millis(1500),
                    primes: primes.clone(),
                },
                CheckerRun {
                    label: "Bounded".to_string(),
                    checker: CheckerKind::Bounded,
                    prime_count: 4,
                    elapsed: Duration::from_millis(75),
                    primes,
                },
            ],
            profile: Some(ProfileBreakdown {
                checker: CheckerKind::Naive,
                is_prime: Duration::from_millis(90),
                append: Duration::from_millis(5),
                clock: Duration::from_millis(3),
                other: Duration::from_millis(2),
            }),
        }
    }

    #[test]
    fn test_runtime_chart_scales_to_slowest() {
        let chart = render_runtime_chart(&[
            ("Naive", Duration::from_secs(2)),
            ("Bounded", Duration::from_secs(1)),
        ]);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[2].matches('█').count(), BAR_WIDTH / 2);
        assert!(lines[1].ends_with("2.0000"));
    }

    #[test]
    fn test_profile_chart_uses_measured_percentages() {
        let report = sample_report();
        let chart = render_profile_chart(report.profile.as_ref().unwrap());
        assert!(chart.contains("is_prime()"));
        assert!(chart.contains("90.0%"));
        assert!(chart.contains("5.0%"));
    }

    #[test]
    fn test_timings_csv_has_header_and_rows() {
        let csv = String::from_utf8(timings_csv(&sample_report()).unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("label,checker,boundary,limit,prime_count,elapsed_seconds")
        );
        assert_eq!(lines.next(), Some("Naive,naive,inclusive,10,4,1.5"));
        assert_eq!(lines.next(), Some("Bounded,bounded,inclusive,10,4,0.075"));
    }

    #[tokio::test]
    async fn test_publish_writes_archive() {
        let storage = MockStorage::default();
        let writer = ReportWriter::new(storage.clone(), "./out");

        let location = writer.publish(&sample_report()).await.unwrap();
        assert_eq!(location, "./out/bench_report.zip");

        let data = storage.read_file(REPORT_ARCHIVE).await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 4);

        let mut json = String::new();
        archive
            .by_name("report.json")
            .unwrap()
            .read_to_string(&mut json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["runs"][0]["elapsed"], 1.5);
        assert_eq!(value["bound"]["boundary"], "inclusive");
        assert!(value["runs"][0].get("primes").is_none());
    }
}
