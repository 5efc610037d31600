use thiserror::Error;

/// Remote failure. Transport errors, timeouts, undecodable bodies and non-2xx
/// statuses all collapse into `Network`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{operation} request failed: {message}")]
    Network {
        operation: &'static str,
        message: String,
    },
    #[error("invalid API base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    pub fn network(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Network {
            operation,
            message: message.into(),
        }
    }

    pub(crate) fn from_reqwest(operation: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |err| Self::network(operation, err.to_string())
    }
}

/// Local rejections raised by the grid controller before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("row {index} is out of range for a grid of {len} rows")]
    RowOutOfRange { index: usize, len: usize },
    #[error("employee list is already loading")]
    LoadInFlight,
    #[error("a save is already in progress")]
    SaveInFlight,
    #[error("a delete is already in progress")]
    DeleteInFlight,
}
