use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Prime sequence order violated: {candidate} appended after {last}")]
    SequenceOrderError { last: i64, candidate: i64 },

    #[error("Report error: {message}")]
    ReportError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Computation,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl BenchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BenchError::ConfigValidationError { .. }
            | BenchError::InvalidConfigValueError { .. }
            | BenchError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BenchError::SequenceOrderError { .. } => ErrorCategory::Computation,
            BenchError::ZipError(_)
            | BenchError::CsvError(_)
            | BenchError::SerializationError(_)
            | BenchError::ReportError { .. } => ErrorCategory::Output,
            BenchError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 報告輸出失敗時計算結果仍然有效
            ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Computation | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BenchError::ConfigValidationError { .. } => {
                "Check the configuration file syntax and field names".to_string()
            }
            BenchError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' and run again", field)
            }
            BenchError::MissingConfigError { field } => {
                format!("Add the '{}' setting to your configuration", field)
            }
            BenchError::SequenceOrderError { .. } => {
                "Candidates must be scanned in ascending order; this is a bug in the scanner".to_string()
            }
            BenchError::IoError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            BenchError::ZipError(_)
            | BenchError::CsvError(_)
            | BenchError::SerializationError(_)
            | BenchError::ReportError { .. } => {
                "Re-run with --no-export to skip report output, or use --verbose for details".to_string()
            }
        }
    }

    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Computation => format!("Computation failed: {}", self),
            ErrorCategory::Output => format!("Could not write the benchmark report: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_high_severity() {
        let err = BenchError::InvalidConfigValueError {
            field: "range.limit".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("range.limit"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: BenchError = io.into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert!(err.user_friendly_message().starts_with("System error"));
    }

    #[test]
    fn test_sequence_order_message() {
        let err = BenchError::SequenceOrderError {
            last: 7,
            candidate: 5,
        };
        assert_eq!(
            err.to_string(),
            "Prime sequence order violated: 5 appended after 7"
        );
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_report_errors_exit_with_two() {
        let err = BenchError::ReportError {
            message: "flush failed".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.exit_code(), 2);
    }
}
