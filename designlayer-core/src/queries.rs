//! Identifier-based lookups materialized into model instances.
//!
//! [`ModelQueries`] is the per-model query facade: it resolves document IDs
//! through a [`DatabaseClient`] and turns the raw documents into instances
//! via the model's `build_from_database` hook. Strict variants propagate
//! [`DocumentNotFound`](crate::error::DesignLayerError::DocumentNotFound);
//! tolerant variants substitute `None`.
//!
//! # Example
//!
//! ```ignore
//! use designlayer_core::queries::ModelQueries;
//!
//! let cats = ModelQueries::<_, Cat>::new(&client);
//! let felix = cats.get("felix").await?;          // strict
//! let maybe = cats.find("missing").await;        // tolerant, None
//! let some = cats.find_bulk(&ids).await?;        // [Some(..), None, ..]
//! ```

use std::marker::PhantomData;

use log::debug;

use crate::client::{BulkRow, DatabaseClient, ViewQuery};
use crate::design::{ALL_VIEW, design_id};
use crate::error::{DesignLayerError, DesignLayerResult};
use crate::model::Model;

/// Per-model query facade over a database client.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the client reference
/// * `C` - The database client type
/// * `M` - The model type instances are materialized into
#[derive(Debug)]
pub struct ModelQueries<'a, C: DatabaseClient, M: Model> {
    client: &'a C,
    _marker: PhantomData<M>,
}

impl<'a, C: DatabaseClient, M: Model> ModelQueries<'a, C, M> {
    /// Creates a query facade for `M` over the given client.
    pub fn new(client: &'a C) -> Self {
        ModelQueries { client, _marker: PhantomData }
    }

    /// Loads a document from the database by ID, strictly.
    ///
    /// An empty ID fails immediately with `DocumentNotFound`; no request is
    /// issued. A transport-level not-found is translated to the same domain
    /// error at this boundary.
    ///
    /// # Errors
    ///
    /// [`DocumentNotFound`](DesignLayerError::DocumentNotFound) for empty or
    /// unknown IDs; other variants for transport or deserialization failures.
    pub async fn get(&self, id: &str) -> DesignLayerResult<M> {
        if id.is_empty() {
            return Err(DesignLayerError::DocumentNotFound(id.to_string()));
        }

        let raw = self.client.get(id).await?;

        M::build_from_database(raw)
    }

    /// Loads a document from the database by ID, tolerantly.
    ///
    /// Any failure on the strict path, not-found or otherwise, yields `None`
    /// instead of propagating.
    pub async fn find(&self, id: &str) -> Option<M> {
        self.get(id).await.ok()
    }

    /// Loads a set of documents by ID in one round trip, strictly.
    ///
    /// Result order mirrors the bulk response rows, which in turn mirror the
    /// request order.
    ///
    /// # Errors
    ///
    /// [`DocumentNotFound`](DesignLayerError::DocumentNotFound) as soon as
    /// any row comes back unresolved.
    pub async fn get_bulk(&self, ids: &[String]) -> DesignLayerResult<Vec<M>> {
        let response = self.client.get_bulk(ids).await?;
        debug!(
            "bulk fetch for {}: {} ids, {} rows",
            M::model_name(),
            ids.len(),
            response.rows.len()
        );

        response
            .rows
            .into_iter()
            .map(|row| match row.doc {
                Some(doc) => M::build_from_database(doc),
                None => Err(DesignLayerError::DocumentNotFound(row.id)),
            })
            .collect()
    }

    /// Loads a set of documents by ID, substituting unresolved rows through
    /// `on_missing`.
    ///
    /// The handler receives the raw row and its return value is taken as the
    /// authoritative, final substitute; with a handler supplied, missing rows
    /// never raise.
    ///
    /// # Errors
    ///
    /// Transport or deserialization failures still propagate.
    pub async fn get_bulk_with<F>(&self, ids: &[String], on_missing: F) -> DesignLayerResult<Vec<M>>
    where
        F: Fn(&BulkRow) -> M,
    {
        let response = self.client.get_bulk(ids).await?;

        response
            .rows
            .into_iter()
            .map(|row| {
                if let Some(doc) = row.doc {
                    M::build_from_database(doc)
                } else {
                    Ok(on_missing(&row))
                }
            })
            .collect()
    }

    /// Loads a set of documents by ID, tolerantly.
    ///
    /// Unresolved rows become `None` in place, preserving request order;
    /// missing documents never raise.
    ///
    /// # Errors
    ///
    /// Transport or deserialization failures still propagate.
    pub async fn find_bulk(&self, ids: &[String]) -> DesignLayerResult<Vec<Option<M>>> {
        let response = self.client.get_bulk(ids).await?;

        response
            .rows
            .into_iter()
            .map(|row| match row.doc {
                Some(doc) => M::build_from_database(doc).map(Some),
                None => Ok(None),
            })
            .collect()
    }

    /// Total number of entries in the model's canonical all-documents view.
    pub async fn count(&self) -> DesignLayerResult<u64> {
        let response = self
            .client
            .query_view(&self.design(), ALL_VIEW, ViewQuery::default())
            .await?;

        Ok(response.total_rows)
    }

    /// First entry of the canonical all-documents view, if any.
    pub async fn first(&self) -> DesignLayerResult<Option<M>> {
        self.edge(false).await
    }

    /// Last entry of the canonical all-documents view, if any.
    pub async fn last(&self) -> DesignLayerResult<Option<M>> {
        self.edge(true).await
    }

    async fn edge(&self, descending: bool) -> DesignLayerResult<Option<M>> {
        let query = ViewQuery { limit: Some(1), descending, include_docs: true };
        let response = self
            .client
            .query_view(&self.design(), ALL_VIEW, query)
            .await?;

        match response.rows.into_iter().next() {
            Some(row) => match row.doc {
                Some(doc) => Ok(Some(M::build_from_database(doc)?)),
                None => Ok(None),
            },
            None => Ok(None),
        }
    }

    // count/first/last always target the master design; the canonical view
    // is not parameterizable.
    fn design(&self) -> String {
        design_id(M::model_name(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};

    use crate::client::{BulkResponse, ClientError, ViewResponse, ViewRow};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Cat {
        id: String,
        name: String,
    }

    impl Model for Cat {
        fn model_name() -> &'static str {
            "Cat"
        }
    }

    /// Minimal scripted client: a fixed document map plus request counters.
    #[derive(Debug, Default)]
    struct StubClient {
        docs: BTreeMap<String, Value>,
        get_calls: AtomicUsize,
        bulk_calls: AtomicUsize,
    }

    impl StubClient {
        fn with_docs(docs: Vec<(&str, Value)>) -> Self {
            StubClient {
                docs: docs
                    .into_iter()
                    .map(|(id, doc)| (id.to_string(), doc))
                    .collect(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl DatabaseClient for StubClient {
        async fn get(&self, id: &str) -> Result<Value, ClientError> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.docs
                .get(id)
                .cloned()
                .ok_or_else(|| ClientError::NotFound(id.to_string()))
        }

        async fn get_bulk(&self, ids: &[String]) -> Result<BulkResponse, ClientError> {
            self.bulk_calls.fetch_add(1, Ordering::SeqCst);
            Ok(BulkResponse {
                rows: ids
                    .iter()
                    .map(|id| match self.docs.get(id) {
                        Some(doc) => BulkRow::found(id.clone(), doc.clone()),
                        None => BulkRow::missing(id.clone()),
                    })
                    .collect(),
            })
        }

        async fn query_view(
            &self,
            _design: &str,
            _view: &str,
            query: ViewQuery,
        ) -> Result<ViewResponse, ClientError> {
            let total = self.docs.len() as u64;
            let iter: Box<dyn Iterator<Item = (&String, &Value)>> = if query.descending {
                Box::new(self.docs.iter().rev())
            } else {
                Box::new(self.docs.iter())
            };
            let rows = iter
                .take(query.limit.unwrap_or(usize::MAX))
                .map(|(id, doc)| ViewRow {
                    id: id.clone(),
                    doc: query.include_docs.then(|| doc.clone()),
                })
                .collect();

            Ok(ViewResponse { total_rows: total, rows })
        }
    }

    fn felix() -> Value {
        json!({"id": "felix", "name": "Felix"})
    }

    fn tom() -> Value {
        json!({"id": "tom", "name": "Tom"})
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn get_materializes_an_instance() {
        let client = StubClient::with_docs(vec![("felix", felix())]);
        let cats = ModelQueries::<_, Cat>::new(&client);

        let cat = cats.get("felix").await.unwrap();
        assert_eq!(cat.name, "Felix");
    }

    #[tokio::test]
    async fn get_empty_id_fails_without_a_request() {
        let client = StubClient::default();
        let cats = ModelQueries::<_, Cat>::new(&client);

        let err = cats.get("").await.unwrap_err();
        assert!(matches!(err, DesignLayerError::DocumentNotFound(_)));
        assert_eq!(client.get_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn get_translates_transport_not_found() {
        let client = StubClient::default();
        let cats = ModelQueries::<_, Cat>::new(&client);

        let err = cats.get("missing-id").await.unwrap_err();
        assert!(matches!(err, DesignLayerError::DocumentNotFound(id) if id == "missing-id"));
    }

    #[tokio::test]
    async fn find_swallows_all_failures() {
        let client = StubClient::with_docs(vec![("felix", felix())]);
        let cats = ModelQueries::<_, Cat>::new(&client);

        assert!(cats.find("felix").await.is_some());
        assert!(cats.find("missing-id").await.is_none());
        assert!(cats.find("").await.is_none());
    }

    #[tokio::test]
    async fn get_bulk_is_one_round_trip() {
        let client = StubClient::with_docs(vec![("felix", felix()), ("tom", tom())]);
        let cats = ModelQueries::<_, Cat>::new(&client);

        let found = cats
            .get_bulk(&ids(&["felix", "tom"]))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, "felix");
        assert_eq!(found[1].id, "tom");
        assert_eq!(client.bulk_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn get_bulk_fails_on_a_missing_row() {
        let client = StubClient::with_docs(vec![("felix", felix())]);
        let cats = ModelQueries::<_, Cat>::new(&client);

        let err = cats
            .get_bulk(&ids(&["felix", "tom"]))
            .await
            .unwrap_err();
        assert!(matches!(err, DesignLayerError::DocumentNotFound(id) if id == "tom"));
    }

    #[tokio::test]
    async fn get_bulk_with_substitutes_missing_rows() {
        let client = StubClient::with_docs(vec![("felix", felix())]);
        let cats = ModelQueries::<_, Cat>::new(&client);

        let found = cats
            .get_bulk_with(&ids(&["felix", "tom"]), |row| Cat {
                id: row.id.clone(),
                name: "placeholder".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(found[0].name, "Felix");
        assert_eq!(found[1].name, "placeholder");
        assert_eq!(found[1].id, "tom");
    }

    #[tokio::test]
    async fn find_bulk_preserves_order_with_none_gaps() {
        let client = StubClient::with_docs(vec![("felix", felix())]);
        let cats = ModelQueries::<_, Cat>::new(&client);

        let found = cats
            .find_bulk(&ids(&["felix", "tom"]))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].as_ref().unwrap().name, "Felix");
        assert!(found[1].is_none());
    }

    #[tokio::test]
    async fn count_first_last_delegate_to_the_all_view() {
        let client = StubClient::with_docs(vec![("a-felix", felix()), ("z-tom", tom())]);
        let cats = ModelQueries::<_, Cat>::new(&client);

        assert_eq!(cats.count().await.unwrap(), 2);
        assert_eq!(cats.first().await.unwrap().unwrap().name, "Felix");
        assert_eq!(cats.last().await.unwrap().unwrap().name, "Tom");
    }

    #[tokio::test]
    async fn empty_database_has_no_first_or_last() {
        let client = StubClient::default();
        let cats = ModelQueries::<_, Cat>::new(&client);

        assert_eq!(cats.count().await.unwrap(), 0);
        assert!(cats.first().await.unwrap().is_none());
        assert!(cats.last().await.unwrap().is_none());
    }
}
