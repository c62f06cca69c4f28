//! Error handling and custom error types
//!
//! `Error` covers transport and configuration failures inside the crate.
//! `InferenceError` is what callers of `classify_food` see: its `Display`
//! output is a message fit for showing to an end user.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Empty response from AI provider: {0}")]
    EmptyResponse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub const REMOTE_CALL_MESSAGE: &str = "Failed to analyze image. Please try again.";
pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "Could not identify the food in this image. Please try another photo.";

/// Failure of a food classification call.
///
/// The payload of `RemoteCall` and `MalformedResponse` is diagnostic detail
/// for logs; it never appears in the `Display` output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("{}", REMOTE_CALL_MESSAGE)]
    RemoteCall(String),

    /// The model reported that the image holds no recognizable food.
    #[error("{0}")]
    UnrecognizedContent(String),

    #[error("{}", MALFORMED_RESPONSE_MESSAGE)]
    MalformedResponse(String),
}

impl InferenceError {
    pub fn detail(&self) -> &str {
        match self {
            InferenceError::RemoteCall(detail)
            | InferenceError::UnrecognizedContent(detail)
            | InferenceError::MalformedResponse(detail) => detail,
        }
    }
}

impl From<Error> for InferenceError {
    fn from(err: Error) -> Self {
        match err {
            Error::EmptyResponse(detail) => InferenceError::MalformedResponse(detail),
            other => InferenceError::RemoteCall(other.to_string()),
        }
    }
}
