//! In-memory implementation of the database client.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use mea::rwlock::RwLock;
use serde_json::Value;

use designlayer_core::{
    client::{BulkResponse, BulkRow, ClientError, DatabaseClient, ViewQuery, ViewResponse, ViewRow},
    design::ALL_VIEW,
};

type DocMap = BTreeMap<String, Value>;

/// Thread-safe in-memory document database client.
///
/// Documents are JSON values keyed by string ID in a `BTreeMap`, so the
/// canonical all-documents view comes back in ID order, matching the
/// `_all_docs` ordering of a real server.
///
/// # Thread Safety
///
/// `MemoryClient` is cloneable and uses an `Arc`-wrapped internal state;
/// clones of the same instance share the same underlying data.
///
/// # Example
///
/// ```ignore
/// use designlayer_memory::MemoryClient;
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = MemoryClient::new();
///     client.put("felix", json!({"name": "Felix"})).await;
///
///     let doc = client.get("felix").await?;
///     assert_eq!(doc["name"], "Felix");
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct MemoryClient {
    docs: Arc<RwLock<DocMap>>,
}

impl MemoryClient {
    /// Creates a new empty in-memory client.
    pub fn new() -> Self {
        Self { docs: Arc::new(RwLock::new(DocMap::new())) }
    }

    /// Creates a builder for constructing a `MemoryClient`.
    pub fn builder() -> MemoryClientBuilder {
        MemoryClientBuilder::default()
    }

    /// Stores a document under the given ID, replacing any existing one.
    pub async fn put(&self, id: impl Into<String>, doc: Value) {
        self.docs.write().await.insert(id.into(), doc);
    }

    /// Stores a batch of documents.
    pub async fn put_all(&self, docs: Vec<(String, Value)>) {
        let mut map = self.docs.write().await;
        for (id, doc) in docs {
            map.insert(id, doc);
        }
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    /// Whether the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }

    /// Removes all stored documents.
    pub async fn clear(&self) {
        self.docs.write().await.clear();
    }
}

#[async_trait]
impl DatabaseClient for MemoryClient {
    async fn get(&self, id: &str) -> Result<Value, ClientError> {
        self.docs
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(id.to_string()))
    }

    async fn get_bulk(&self, ids: &[String]) -> Result<BulkResponse, ClientError> {
        let docs = self.docs.read().await;

        Ok(BulkResponse {
            rows: ids
                .iter()
                .map(|id| match docs.get(id) {
                    Some(doc) => BulkRow::found(id.clone(), doc.clone()),
                    None => BulkRow::missing(id.clone()),
                })
                .collect(),
        })
    }

    async fn query_view(
        &self,
        design: &str,
        view: &str,
        query: ViewQuery,
    ) -> Result<ViewResponse, ClientError> {
        // Only the canonical all-documents view is served; executing
        // arbitrary map functions is the server's concern.
        if view != ALL_VIEW {
            return Err(ClientError::Request(format!(
                "view {design}/{view} is not served by the memory client"
            )));
        }

        let docs = self.docs.read().await;
        let user_docs: Vec<(&String, &Value)> = docs
            .iter()
            .filter(|(id, _)| !id.starts_with("_design/"))
            .collect();
        let total = user_docs.len() as u64;

        let iter: Box<dyn Iterator<Item = (&String, &Value)>> = if query.descending {
            Box::new(user_docs.into_iter().rev())
        } else {
            Box::new(user_docs.into_iter())
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

/// Builder for constructing [`MemoryClient`] instances.
///
/// Currently a no-op builder, kept for parity with clients whose
/// construction can fail.
#[derive(Default)]
pub struct MemoryClientBuilder;

impl MemoryClientBuilder {
    /// Builds and returns a new [`MemoryClient`] instance.
    pub async fn build(self) -> Result<MemoryClient, ClientError> {
        Ok(MemoryClient::new())
    }
}
