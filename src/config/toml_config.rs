use crate::core::ConfigProvider;
use crate::domain::model::{Boundary, CheckerKind, DEFAULT_LIMIT, MAX_LIMIT};
use crate::utils::error::{BenchError, Result};
use crate::utils::validation::{
    validate_non_empty_list, validate_path, validate_range, validate_required_field,
    validate_unique, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub bench: BenchSection,
    #[serde(default)]
    pub range: RangeSection,
    #[serde(default)]
    pub checkers: CheckersSection,
    #[serde(default)]
    pub output: OutputSection,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchSection {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeSection {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub boundary: Boundary,
}

impl Default for RangeSection {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            boundary: Boundary::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckersSection {
    #[serde(default = "default_checkers")]
    pub enabled: Vec<CheckerKind>,
    pub profile: Option<CheckerKind>,
}

impl Default for CheckersSection {
    fn default() -> Self {
        Self {
            enabled: default_checkers(),
            profile: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
    #[serde(default)]
    pub export: bool,
    #[serde(default)]
    pub charts: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringSection {
    pub enabled: bool,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

fn default_checkers() -> Vec<CheckerKind> {
    vec![CheckerKind::Naive, CheckerKind::Bounded]
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BenchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BenchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PRIME_LIMIT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn charts_enabled(&self) -> bool {
        self.output.charts
    }
}

impl ConfigProvider for TomlConfig {
    fn limit(&self) -> i64 {
        self.range.limit
    }

    fn boundary(&self) -> Boundary {
        self.range.boundary
    }

    fn checkers(&self) -> &[CheckerKind] {
        &self.checkers.enabled
    }

    fn profile(&self) -> Option<CheckerKind> {
        self.checkers.profile
    }

    fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or("./output")
    }

    fn export_enabled(&self) -> bool {
        self.output.export
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_range("range.limit", self.range.limit, 1, MAX_LIMIT)?;
        validate_non_empty_list("checkers.enabled", &self.checkers.enabled)?;
        validate_unique("checkers.enabled", &self.checkers.enabled)?;

        if self.output.export {
            let path = validate_required_field("output.path", &self.output.path)?;
            validate_path("output.path", path)?;
        }

        Ok(())
    }
}
