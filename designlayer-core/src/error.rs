//! Error types and result types for the design mapping layer.
//!
//! This module provides the domain-level error taxonomy. Use
//! [`DesignLayerResult<T>`] as the return type for fallible operations.
//!
//! Transport-level errors raised by the database client live in
//! [`ClientError`](crate::client::ClientError) and are translated into this
//! enum at the query facade boundary: a client not-found becomes
//! [`DesignLayerError::DocumentNotFound`], everything else is wrapped as
//! [`DesignLayerError::Client`] so the transport type never leaks through the
//! lookup API.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

use crate::client::ClientError;

/// Represents all domain-level errors raised by the design mapping layer.
#[derive(Error, Debug)]
pub enum DesignLayerError {
    /// The requested document was not found, or an empty identifier was
    /// passed to a strict lookup. The argument is the requested document ID.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),
    /// A view or filter definition was rejected (empty name, empty function
    /// body).
    #[error("Invalid design definition: {0}")]
    InvalidDesign(String),
    /// Serialization/deserialization error when materializing a model
    /// instance from a raw document or rendering a design document.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A non-recoverable error reported by the underlying database client.
    #[error("Client error: {0}")]
    Client(String),
}

/// A specialized `Result` type for design mapping operations.
pub type DesignLayerResult<T> = Result<T, DesignLayerError>;

impl From<SerdeJsonError> for DesignLayerError {
    fn from(err: SerdeJsonError) -> Self {
        DesignLayerError::Serialization(err.to_string())
    }
}

impl From<ClientError> for DesignLayerError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(id) => DesignLayerError::DocumentNotFound(id),
            other => DesignLayerError::Client(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_not_found_translates_to_document_not_found() {
        let err: DesignLayerError = ClientError::NotFound("abc".to_string()).into();
        assert!(matches!(err, DesignLayerError::DocumentNotFound(id) if id == "abc"));
    }

    #[test]
    fn other_client_errors_stay_client_errors() {
        let err: DesignLayerError = ClientError::Connection("refused".to_string()).into();
        assert!(matches!(err, DesignLayerError::Client(_)));
    }
}
