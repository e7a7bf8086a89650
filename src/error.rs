//! Error types shared by the fetch pipeline

use thiserror::Error;

/// Coarse classification of a [`FetchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required identifier was missing; no request was made
    Config,
    /// The request failed or returned a non-success status
    Transport,
    /// The response did not have the expected envelope
    Shape,
    /// Anything else
    Unknown,
}

/// A failure recorded in a state holder's error slot
///
/// The `Display` text is the human-readable message shown to readers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("{0}")]
    Config(String),

    #[error("Failed to load {resource} (status {status}).")]
    Status { resource: &'static str, status: u16 },

    #[error("Network request failed: {0}")]
    Network(String),

    #[error("{0}")]
    Shape(String),

    #[error("{0}")]
    Unknown(String),
}

impl FetchError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Config(_) => ErrorKind::Config,
            FetchError::Status { .. } | FetchError::Network(_) => ErrorKind::Transport,
            FetchError::Shape(_) => ErrorKind::Shape,
            FetchError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Replace an empty `Unknown` message with a generic one
    pub fn or_fallback(self, fallback: &str) -> Self {
        match self {
            FetchError::Unknown(msg) if msg.trim().is_empty() => {
                FetchError::Unknown(fallback.to_string())
            }
            other => other,
        }
    }
}

/// Why a raw record could not be decoded into its typed shape
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("expected an object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` should be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = FetchError::Status {
            resource: "posts",
            status: 502,
        };
        assert_eq!(err.to_string(), "Failed to load posts (status 502).");
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_unknown_fallback() {
        let err = FetchError::Unknown("  ".to_string()).or_fallback("Unable to load blog posts.");
        assert_eq!(err.to_string(), "Unable to load blog posts.");

        let err = FetchError::Shape("bad".to_string()).or_fallback("ignored");
        assert_eq!(err.to_string(), "bad");
    }
}
