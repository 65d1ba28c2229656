//! Shared error type across promkit crates.

use thiserror::Error;

/// Stable error codes, one per failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A non-mapping value was supplied where a label mapping is required.
    KeyType,
    /// Reserved label name or non-scalar label value.
    InvalidLabels,
    /// Metric name is empty or contains illegal characters.
    InvalidName,
    /// No value stored for the requested label combination.
    NotFound,
    /// Negative delta applied to a counter.
    CounterDecrease,
    /// Config could not be read, parsed or validated.
    Config,
    /// Internal failure (e.g. a worker task died).
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::KeyType => "KEY_TYPE",
            ErrorCode::InvalidLabels => "INVALID_LABELS",
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::CounterDecrease => "COUNTER_DECREASE",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by the store, collectors and config loader.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("only accepts maps as keys (got {0})")]
    KeyType(String),
    #[error("labels not correct: {0}")]
    InvalidLabels(String),
    #[error("invalid metric name: {0:?}")]
    InvalidName(String),
    #[error("no value stored for labels {0}")]
    NotFound(String),
    #[error("counters can't decrease (delta {0})")]
    CounterDecrease(f64),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MetricsError::KeyType(_) => ErrorCode::KeyType,
            MetricsError::InvalidLabels(_) => ErrorCode::InvalidLabels,
            MetricsError::InvalidName(_) => ErrorCode::InvalidName,
            MetricsError::NotFound(_) => ErrorCode::NotFound,
            MetricsError::CounterDecrease(_) => ErrorCode::CounterDecrease,
            MetricsError::Config(_) => ErrorCode::Config,
            MetricsError::Internal(_) => ErrorCode::Internal,
        }
    }
}
