//! In-memory database client for designlayer.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `DatabaseClient` trait. It uses an async-aware read-write lock for
//! concurrent access and is ideal for development and testing.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using an async-aware RwLock
//! - **Order-preserving bulk fetch** - One marker row per missing ID, in request order
//! - **Canonical view** - Serves the all-documents view in ID order, like `_all_docs`
//!
//! # Quick Start
//!
//! ```ignore
//! use designlayer_memory::MemoryClient;
//! use designlayer_core::queries::ModelQueries;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MemoryClient::new();
//!     client.put("felix", json!({"id": "felix", "name": "Felix"})).await;
//!
//!     let cats = ModelQueries::<_, Cat>::new(&client);
//!     let felix = cats.get("felix").await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as designlayer_memory;

pub mod client;

pub use client::{MemoryClient, MemoryClientBuilder};
