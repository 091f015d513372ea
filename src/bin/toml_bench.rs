use clap::Parser;
use prime_bench::core::report::render_charts;
use prime_bench::core::{ConfigProvider, ReportSink};
use prime_bench::utils::error::BenchError;
use prime_bench::utils::{logger, validation::Validate};
use prime_bench::{BenchEngine, LocalStorage, ReportWriter, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-bench")]
#[command(about = "Prime checker benchmark driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "prime-bench.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override range limit from config
    #[arg(long)]
    limit: Option<i64>,

    /// Dry run - show what would be measured without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based prime benchmark");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(limit) = args.limit {
        config.range.limit = limit;
        tracing::info!("🔧 Range limit overridden to: {}", limit);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No checkers will be run");
        perform_dry_run(&config);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let show_charts = config.charts_enabled();
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Bench: {}", config.bench.name);
    if let Some(description) = &config.bench.description {
        println!("  Description: {}", description);
    }
    println!("  Range: {}", config.range_bound());
    let checkers: Vec<String> = config.checkers().iter().map(|c| c.to_string()).collect();
    println!("  Checkers: {}", checkers.join(", "));
    if let Some(profile) = config.profile() {
        println!("  Profile: {}", profile);
    }
    if config.export_enabled() {
        println!("  Output: {}", config.output_path());
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    let bound = config.range_bound();
    let candidates = bound.candidates().count();

    println!("🔍 Dry Run Analysis:");
    println!("  Candidates to test per checker: {}", candidates);
    for checker in config.checkers() {
        println!("  ⚙️ {} checker over {}", checker.label(), bound);
    }
    if let Some(profile) = config.profile() {
        println!("  📊 An extra profiled pass of the {} checker will run", profile);
    }
    if config.export_enabled() {
        println!(
            "  💾 Report archive would be written to {}/{}",
            config.output_path(),
            prime_bench::core::report::REPORT_ARCHIVE
        );
    }

    println!();
    println!("✅ Dry run analysis complete.");
}
