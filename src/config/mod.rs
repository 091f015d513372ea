pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
mod args {
    use crate::core::ConfigProvider;
    use crate::domain::model::{Boundary, CheckerKind, DEFAULT_LIMIT, MAX_LIMIT};
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_non_empty_list, validate_path, validate_range, validate_unique, Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "prime-bench")]
    #[command(about = "Time naive and square-root bounded prime checkers over a range")]
    pub struct CliConfig {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        pub limit: i64,

        #[arg(long, value_enum, default_value_t = Boundary::Inclusive)]
        pub boundary: Boundary,

        #[arg(long, value_enum, value_delimiter = ',', default_values_t = [CheckerKind::Naive, CheckerKind::Bounded])]
        pub checkers: Vec<CheckerKind>,

        #[arg(long, value_enum, help = "Profile one checker and chart where its time goes")]
        pub profile: Option<CheckerKind>,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, help = "Skip writing the report archive")]
        pub no_export: bool,

        #[arg(long, help = "Print runtime and profile charts")]
        pub charts: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log CPU and memory usage per checker")]
        pub monitor: bool,
    }

    impl ConfigProvider for CliConfig {
        fn limit(&self) -> i64 {
            self.limit
        }

        fn boundary(&self) -> Boundary {
            self.boundary
        }

        fn checkers(&self) -> &[CheckerKind] {
            &self.checkers
        }

        fn profile(&self) -> Option<CheckerKind> {
            self.profile
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn export_enabled(&self) -> bool {
            !self.no_export
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_range("limit", self.limit, 1, MAX_LIMIT)?;
            validate_non_empty_list("checkers", &self.checkers)?;
            validate_unique("checkers", &self.checkers)?;
            if self.export_enabled() {
                validate_path("output_path", &self.output_path)?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults_match_original_run() {
            let config = CliConfig::parse_from(["prime-bench"]);
            assert_eq!(config.limit, 100_000);
            assert_eq!(config.boundary, Boundary::Inclusive);
            assert_eq!(config.checkers, vec![CheckerKind::Naive, CheckerKind::Bounded]);
            assert!(config.profile.is_none());
            assert!(config.export_enabled());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_parse_checker_list_and_boundary() {
            let config = CliConfig::parse_from([
                "prime-bench",
                "--limit",
                "5000",
                "--boundary",
                "exclusive",
                "--checkers",
                "bounded,sieve",
                "--profile",
                "naive",
            ]);
            assert_eq!(config.range_bound().to_string(), "[1, 5000)");
            assert_eq!(config.checkers, vec![CheckerKind::Bounded, CheckerKind::Sieve]);
            assert_eq!(config.profile, Some(CheckerKind::Naive));
        }

        #[test]
        fn test_rejects_duplicate_checkers_and_bad_limit() {
            let dup = CliConfig::parse_from(["prime-bench", "--checkers", "naive,naive"]);
            assert!(dup.validate().is_err());

            let zero = CliConfig::parse_from(["prime-bench", "--limit", "0"]);
            assert!(zero.validate().is_err());
        }

        #[test]
        fn test_rejects_empty_checker_list() {
            let mut config = CliConfig::parse_from(["prime-bench"]);
            config.checkers.clear();
            assert!(matches!(
                config.validate(),
                Err(crate::utils::error::BenchError::MissingConfigError { field }) if field == "checkers"
            ));
        }
    }
}

#[cfg(feature = "cli")]
pub use args::CliConfig;
