use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing credential: {variable} is not set")]
    MissingCredential { variable: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("CSV file {path} has no '{column}' column")]
    MissingColumnError { column: String, path: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Failure of a single tenant upsert. Never fatal for the run.
#[derive(Error, Debug)]
pub enum UpsertError {
    #[error("{status} - {body}")]
    Status { status: u16, body: String },

    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl UpsertError {
    pub fn status(&self) -> Option<u16> {
        match self {
            UpsertError::Status { status, .. } => Some(*status),
            UpsertError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, UpsertError::Transport(e) if e.is_timeout())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::MissingCredential { .. }
            | AppError::ConfigError { .. }
            | AppError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AppError::MissingColumnError { .. } | AppError::CsvError(_) | AppError::IoError(_) => {
                ErrorCategory::Input
            }
            AppError::HttpClientError(_) => ErrorCategory::Network,
            AppError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AppError::MissingCredential { variable } => format!(
                "Create a .env file containing {}=<your-token-here>, export it, or pass --api-token",
                variable
            ),
            AppError::ConfigError { .. } => {
                "Check the --config file and --env-file paths and their syntax".to_string()
            }
            AppError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and try again", field)
            }
            AppError::MissingColumnError { column, .. } => {
                format!("Add a header row with a '{}' column to the CSV file", column)
            }
            AppError::CsvError(_) => "Make sure the input is valid UTF-8 CSV".to_string(),
            AppError::IoError(_) => "Check that the file exists and is readable".to_string(),
            AppError::HttpClientError(_) => {
                "Check the TLS setup of this machine and the timeout setting".to_string()
            }
            AppError::SerializationError(_) => "Report this as a bug".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => format!("Could not read tenants: {}", self),
            ErrorCategory::Network => format!("Could not set up the API client: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_is_fatal_configuration_error() {
        let err = AppError::MissingCredential {
            variable: "PELANOR_API_TOKEN".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.recovery_suggestion().contains("PELANOR_API_TOKEN="));
        assert!(err.user_friendly_message().contains("PELANOR_API_TOKEN"));
    }

    #[test]
    fn test_status_error_display_contains_status_and_body() {
        let err = UpsertError::Status {
            status: 500,
            body: "internal error".to_string(),
        };

        assert_eq!(err.to_string(), "500 - internal error");
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_io_error_maps_to_input_category() {
        let err: AppError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "tenants.csv").into();

        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.to_string().starts_with("IO error"));
    }
}
