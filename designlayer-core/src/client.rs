//! Database client abstraction for the mapping layer.
//!
//! This module defines the consumed interface of the underlying document
//! database transport. The mapping layer treats the client as a stateless
//! service reference per call: connection pooling, retries and any transport
//! size limits are entirely the implementation's concern.
//!
//! # Traits
//!
//! - [`DatabaseClient`]: single fetch, bulk fetch and a minimal view query
//!
//! # Errors
//!
//! Client implementations report [`ClientError`]. The query facade translates
//! `NotFound` into the domain-level
//! [`DocumentNotFound`](crate::error::DesignLayerError::DocumentNotFound) at
//! its boundary; the transport error type never leaks through the lookup API.

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

/// Transport-level errors reported by a database client.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// The database holds no document for the ID.
    #[error("document {0} not found")]
    NotFound(String),
    /// The database could not be reached.
    #[error("connection error: {0}")]
    Connection(String),
    /// The database rejected the request.
    #[error("request error: {0}")]
    Request(String),
    /// A response could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// One row of a bulk-fetch response.
///
/// A row either carries the resolved document or marks the ID missing; the
/// server reports the latter with an error tag rather than dropping the row.
#[derive(Debug, Clone)]
pub struct BulkRow {
    /// The requested document ID.
    pub id: String,
    /// The resolved document, if one exists.
    pub doc: Option<Value>,
    /// Server-side error tag for unresolved rows (e.g. "not_found").
    pub error: Option<String>,
}

impl BulkRow {
    /// A row carrying a resolved document.
    pub fn found(id: impl Into<String>, doc: Value) -> Self {
        BulkRow { id: id.into(), doc: Some(doc), error: None }
    }

    /// A row marking the ID as missing.
    pub fn missing(id: impl Into<String>) -> Self {
        BulkRow {
            id: id.into(),
            doc: None,
            error: Some("not_found".to_string()),
        }
    }

    /// Whether this row failed to resolve a document.
    pub fn is_missing(&self) -> bool {
        self.doc.is_none()
    }
}

/// Response of a bulk fetch: one row per requested ID, in request order.
#[derive(Debug, Clone, Default)]
pub struct BulkResponse {
    pub rows: Vec<BulkRow>,
}

/// Parameters for a view query.
///
/// Deliberately minimal: just enough surface for the facade's canonical-view
/// delegations. Full query semantics (keys, ranges, reductions, pagination)
/// belong to the transport and are not modeled here.
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    /// Maximum number of rows to return.
    pub limit: Option<usize>,
    /// Return rows in reverse key order.
    pub descending: bool,
    /// Attach the full document to each row.
    pub include_docs: bool,
}

/// One row of a view response.
#[derive(Debug, Clone)]
pub struct ViewRow {
    /// ID of the emitting document.
    pub id: String,
    /// The full document, when the query asked for `include_docs`.
    pub doc: Option<Value>,
}

/// Response of a view query.
#[derive(Debug, Clone, Default)]
pub struct ViewResponse {
    /// Total number of rows in the view, before `limit` is applied.
    pub total_rows: u64,
    pub rows: Vec<ViewRow>,
}

/// Abstract interface to the underlying document database.
///
/// Implementations must be thread-safe; all methods are async and issue a
/// single request with no internal retry.
#[async_trait]
pub trait DatabaseClient: Send + Sync + Debug {
    /// Fetches a single raw document by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the database holds no document
    /// for `id`, or another [`ClientError`] variant on transport failure.
    async fn get(&self, id: &str) -> Result<Value, ClientError>;

    /// Fetches a set of raw documents in one round trip.
    ///
    /// The response carries one row per requested ID, in request order;
    /// missing documents appear as marker rows rather than being dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure. Missing individual
    /// documents are not an error at this level.
    async fn get_bulk(&self, ids: &[String]) -> Result<BulkResponse, ClientError>;

    /// Queries a named view of a design document.
    ///
    /// # Arguments
    ///
    /// * `design` - The design document ID (e.g. `_design/Cat`)
    /// * `view` - The view name within that design
    /// * `query` - Row limit, ordering and document inclusion flags
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the view does not exist or the transport
    /// fails.
    async fn query_view(
        &self,
        design: &str,
        view: &str,
        query: ViewQuery,
    ) -> Result<ViewResponse, ClientError>;
}

#[async_trait]
impl<C> DatabaseClient for &C
where
    C: DatabaseClient,
{
    async fn get(&self, id: &str) -> Result<Value, ClientError> {
        (*self).get(id).await
    }

    async fn get_bulk(&self, ids: &[String]) -> Result<BulkResponse, ClientError> {
        (*self).get_bulk(ids).await
    }

    async fn query_view(
        &self,
        design: &str,
        view: &str,
        query: ViewQuery,
    ) -> Result<ViewResponse, ClientError> {
        (*self)
            .query_view(design, view, query)
            .await
    }
}
