use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Trivia data unavailable: {message}")]
    DataUnavailable { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Network,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl BoardError {
    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::DataUnavailable {
            message: message.into(),
        }
    }

    /// 把傳輸層錯誤收斂成 `DataUnavailable`，其他錯誤原樣返回
    pub fn into_data_unavailable(self) -> Self {
        match self {
            Self::ApiError(e) => Self::data_unavailable(format!("remote source unreachable: {}", e)),
            Self::SerializationError(e) => {
                Self::data_unavailable(format!("malformed response from remote source: {}", e))
            }
            other => other,
        }
    }

    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DataUnavailable { .. } | Self::SerializationError(_) => ErrorCategory::Data,
            Self::ApiError(_) => ErrorCategory::Network,
            Self::IoError(_) => ErrorCategory::Io,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 重新開始一局通常就能恢復
            ErrorCategory::Data | ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Data => {
                "The trivia source did not return enough usable data; restart the game to try another set of categories"
            }
            ErrorCategory::Network => "Check the network connection and the --api-endpoint value, then restart",
            ErrorCategory::Io => "Check terminal input/output and file permissions",
            ErrorCategory::Configuration => "Fix the configuration value reported above and run again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DataUnavailable { message } => format!("Could not build a board: {}", message),
            Self::ApiError(_) => "Could not reach the trivia service".to_string(),
            Self::IoError(e) => format!("I/O failure: {}", e),
            Self::SerializationError(_) => "The trivia service sent data we could not read".to_string(),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            Self::ConfigValidationError { field, message } => {
                format!("Invalid configuration '{}': {}", field, message)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
