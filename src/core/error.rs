//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Integer severity no severity level has (a caller bug)
    #[error("Invalid severity {value}: no severity has this ordinal")]
    InvalidSeverity { value: i32 },

    /// Tagged line requested at an ordinal with no abbreviation
    #[error("Severity {value} cannot be tagged: only ordinals 0 to 4 have an abbreviation")]
    UntaggableSeverity { value: i32 },

    /// Severity name that does not match any known severity
    #[error("Unknown severity name: '{0}'")]
    UnknownSeverityName(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File sink could not be opened
    #[error("File sink error for '{path}': {source}")]
    FileSink {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },
}

impl LoggerError {
    pub fn invalid_severity(value: i32) -> Self {
        LoggerError::InvalidSeverity { value }
    }

    pub fn untaggable_severity(value: i32) -> Self {
        LoggerError::UntaggableSeverity { value }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::FileSink {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}
