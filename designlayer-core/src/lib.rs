//! A design-document mapping layer between an object model and a schemaless
//! JSON document database.
//!
//! This crate is the core of the designlayer project and provides:
//!
//! - **Model trait** ([`model`]) - The trait a persisted type implements to take part in the mapping
//! - **Design documents** ([`design`]) - Named server-side view and filter definitions
//! - **Design registry** ([`registry`]) - Lazily-created, per-model design document storage
//! - **Design mapper** ([`mapper`]) - Declarative configuration surface for a model's design
//! - **Database client abstraction** ([`client`]) - Trait for the underlying document database
//! - **Query facade** ([`queries`]) - Identifier-based lookups materialized into model instances
//! - **Error handling** ([`error`]) - Domain error types and result alias
//!
//! # Example
//!
//! ```ignore
//! use designlayer_core::{mapper::design, model::Model, design::ViewOptions};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Cat {
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! impl Model for Cat {
//!     fn model_name() -> &'static str {
//!         "Cat"
//!     }
//! }
//!
//! design::<Cat, _>(|doc| {
//!     doc.view("by_name", ViewOptions::with_map(
//!         "function(doc) { if (doc.type == 'Cat') emit(doc.name, 1); }",
//!     ))?;
//!     doc.filter("named", "function(doc, req) { return doc.name != null; }")?;
//!     Ok(())
//! })?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as designlayer_core;

pub mod client;
pub mod design;
pub mod error;
pub mod mapper;
pub mod model;
pub mod queries;
pub mod registry;
