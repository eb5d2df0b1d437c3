//! Error types for the GraphQL request layer.
//!
//! Every failure raised while talking to the reserves API ends up as an
//! [`Error`]. The domain client passes these through untouched; only the
//! store converts them into a [`StoreError`](crate::core::reserves::StoreError).

use serde::Serialize;
use thiserror::Error;

/// Result type alias for GraphQL operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while executing a GraphQL request.
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP error! status: {status}")]
    Transport {
        /// HTTP status code.
        status: u16,
    },

    /// The response envelope carried a non-empty `errors` list.
    #[error("GraphQL errors: {}", .messages.join(", "))]
    GraphQL {
        /// One message per envelope error, in server order.
        messages: Vec<String>,
    },

    /// The request never produced a response (connect failure, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload lacked a field the operation expects.
    #[error("Response missing field `{0}`")]
    MissingField(String),

    /// Argument rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error (bad base URL, client construction).
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`], cheap to copy into UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    #[serde(rename = "graphql")]
    GraphQL,
    Network,
    Decode,
    InvalidArgument,
    Config,
}

impl Error {
    /// Creates a GraphQL error from envelope messages.
    #[must_use]
    pub fn graphql(messages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::GraphQL {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::GraphQL { .. } => ErrorKind::GraphQL,
            Self::Http(e) if e.is_decode() => ErrorKind::Decode,
            Self::Http(_) => ErrorKind::Network,
            Self::Json(_) | Self::MissingField(_) => ErrorKind::Decode,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// HTTP status code, if the failure came from the transport.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the server rejected the operation itself.
    #[must_use]
    pub fn is_graphql(&self) -> bool {
        matches!(self, Self::GraphQL { .. })
    }

    /// Returns true if the endpoint answered with a non-success status.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns true if no usable response arrived (connect failure, timeout).
    #[must_use]
    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::Network
    }
}
