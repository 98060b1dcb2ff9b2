use thiserror::Error;

/// Errors surfaced by configuration commands and the stores behind them.
///
/// Usage problems and "not found" results are not errors: the CLI handles a
/// missing argument locally and lookups return `Option`.
#[derive(Error, Debug)]
pub enum CmError {
    #[error("Configuration Admin service not available")]
    StoreUnavailable,
    #[error("Failed to read configuration payload from {source_name}: {reason}")]
    PayloadFetch { source_name: String, reason: String },
    #[error("Invalid filter '{filter}': {reason}")]
    FilterSyntax { filter: String, reason: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CmError {
    pub fn payload_fetch(source_name: impl Into<String>, reason: impl ToString) -> Self {
        CmError::PayloadFetch {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn filter_syntax(filter: impl Into<String>, reason: impl Into<String>) -> Self {
        CmError::FilterSyntax {
            filter: filter.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_yaml_ng::Error> for CmError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        CmError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for CmError {
    fn from(err: serde_json::Error) -> Self {
        CmError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CmError>;
