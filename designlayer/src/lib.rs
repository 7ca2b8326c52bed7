//! Main designlayer crate providing the design-document mapping layer.
//!
//! This crate is the primary entry point for users of the designlayer
//! framework. It re-exports the core types from the sub-crates and provides
//! convenient access to the in-memory client.
//!
//! # Features
//!
//! - **Declarative designs** - Models declare named server-side views and filters in a
//!   configuration block; the definitions accumulate into one design document per model
//! - **Lazy, per-model design documents** - Each model type owns its design documents,
//!   created on first access and shared by identity thereafter
//! - **Strict and tolerant lookups** - Identifier-based fetches materialized into model
//!   instances, with not-found either propagated or substituted
//!
//! # Quick Start
//!
//! ```ignore
//! use designlayer::{prelude::*, memory::MemoryClient};
//! use serde::{Serialize, Deserialize};
//! use serde_json::json;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Cat {
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! impl Model for Cat {
//!     fn model_name() -> &'static str { "Cat" }
//! }
//!
//! #[tokio::main]
//! async fn main() -> DesignLayerResult<()> {
//!     // Declare the model's design once, at bootstrap.
//!     design::<Cat, _>(|doc| {
//!         doc.view("by_name", ViewOptions::with_map(
//!             "function(doc) { if (doc.type == 'Cat') emit(doc.name, 1); }",
//!         ))?;
//!         doc.filter("named", "function(doc, req) { return doc.name != null; }")?;
//!         Ok(())
//!     })?;
//!
//!     // Query instances through a client.
//!     let client = MemoryClient::new();
//!     client.put("felix", json!({"id": "felix", "name": "Felix"})).await;
//!
//!     let cats = ModelQueries::<_, Cat>::new(&client);
//!     let felix = cats.get("felix").await?;
//!     println!("found {}", felix.name);
//!
//!     Ok(())
//! }
//! ```

pub mod prelude;

pub use designlayer_core::{client, design, error, mapper, model, queries, registry};

/// In-memory database client implementations.
pub mod memory {
    pub use designlayer_memory::{MemoryClient, MemoryClientBuilder};
}
