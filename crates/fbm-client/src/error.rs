//! Error types for fbm-client

use thiserror::Error;

/// Malformed `#`-delimited button or quick reply spec
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionParseError {
    #[error("{kind} spec {input:?} has {found} field(s), expected {expected}")]
    TooFewSegments {
        kind: &'static str,
        input: String,
        expected: usize,
        found: usize,
    },

    #[error("{kind} spec {input:?} has {found} fields, expected {expected}")]
    TooManySegments {
        kind: &'static str,
        input: String,
        expected: usize,
        found: usize,
    },

    #[error("Unknown button type: {0}")]
    UnknownButtonType(String),
}

/// fbm-client error type
#[derive(Error, Debug)]
pub enum MessengerError {
    #[error("Invalid option: {0}")]
    OptionParse(#[from] OptionParseError),

    #[error("At least one quick reply option is required")]
    NoQuickReplies,

    #[error("Recipient id is empty")]
    EmptyRecipient,

    #[error("Message text is empty")]
    EmptyText,

    #[error("User id is empty")]
    EmptyUserId,

    #[error("App secret not set")]
    AppSecretNotSet,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-2xx reply from the Send API
    #[error(
        "Send API rejected the message\nResponse status code: [{status}]\nResponse status: [{status_line}]\nResponse body: [{body}]\nURL called: [{url}]\nPayload sent: [{payload}]"
    )]
    Platform {
        status: u16,
        status_line: String,
        body: String,
        url: String,
        payload: String,
    },

    #[error("User profile request failed with status {status}: {body}")]
    UserFetch { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MessengerError {
    /// HTTP status of a platform rejection, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            MessengerError::Platform { status, .. } | MessengerError::UserFetch { status, .. } => {
                Some(*status)
            }
            MessengerError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MessengerError>;
