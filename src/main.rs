use clap::Parser;
use prime_bench::core::report::render_charts;
use prime_bench::core::{ConfigProvider, ReportSink};
use prime_bench::utils::error::BenchError;
use prime_bench::utils::{logger, validation::Validate};
use prime_bench::{BenchEngine, CliConfig, LocalStorage, ReportWriter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting prime-bench");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let show_charts = config.charts;
    let export = config.export_enabled();
    let output_path = config.output_path().to_string();
    let engine = BenchEngine::new_with_monitoring(config, monitor_enabled);

    // 掃描是純 CPU 計算，移出 async worker
    let report = match tokio::task::spawn_blocking(move || engine.run()).await? {
        Ok(report) => report,
        Err(e) => fail(e),
    };

    if show_charts {
        println!();
        print!("{}", render_charts(&report));
    }

    if export {
        let writer = ReportWriter::new(LocalStorage::new(&output_path), output_path.clone());
        match writer.publish(&report).await {
            Ok(location) => {
                tracing::info!("📁 Report saved to: {}", location);
                println!("📁 Report saved to: {}", location);
            }
            Err(e) => fail(e),
        }
    }

    Ok(())
}

fn fail(e: BenchError) -> ! {
    tracing::error!(
        "❌ Benchmark failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code())
}
