//! Error types for remote collection calls.
//!
//! # Design
//! Two categories matter to the view-model. Transport and parse failures
//! (everything except `MissingId`) mean the exchange did not produce a
//! usable item. `MissingId` means the create call went through but the
//! server handed back an item it never identified, which the view-model
//! must refuse to store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A create response parsed fine but carried no `id`.
    #[error("created item has no id")]
    MissingId,

    /// The host could not complete the round-trip at all.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// True for failures where the server accepted the call but answered
    /// with something the view-model cannot use.
    pub fn is_semantic(&self) -> bool {
        matches!(self, ApiError::MissingId)
    }
}

/// Failure reported by a host when a request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport(err.0)
    }
}
