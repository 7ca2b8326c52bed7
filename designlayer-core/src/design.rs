//! Design documents: named server-side view and filter definitions.
//!
//! A [`DesignDocument`] is a mutable aggregate of view and filter definitions
//! owned by exactly one model. It is created lazily by the
//! [mapper](crate::mapper), mutated in place by every subsequent declarative
//! call, and lives for the lifetime of the owning model type in the
//! [registry](crate::registry).
//!
//! The definitions accumulate locally; rendering the aggregate into the
//! server-side document shape is [`DesignDocument::to_json`], while pushing it
//! to a server is the persistence layer's concern and out of scope here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{DesignLayerError, DesignLayerResult};

/// Name of the canonical all-documents view every default design exposes.
///
/// `count`, `first` and `last` on the query facade delegate to this view.
pub const ALL_VIEW: &str = "all";

/// Computes the server-side document ID for a model's design document.
///
/// No prefix yields the master design (`_design/Cat`); a prefix yields an
/// independent design per feature area (`_design/Cat_stats`).
pub fn design_id(model: &str, prefix: Option<&str>) -> String {
    match prefix {
        None => format!("_design/{model}"),
        Some(p) => format!("_design/{model}_{p}"),
    }
}

/// Definition of a single named view.
///
/// The mapper treats these options as an opaque pass-through: `map` and
/// `reduce` carry JavaScript source, and any additional server-recognized
/// keys ride along in `extras` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewOptions {
    /// Map function source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    /// Reduce function source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce: Option<String>,
    /// Additional options forwarded verbatim to the server.
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl ViewOptions {
    /// Creates view options with the given map function.
    pub fn with_map(map: impl Into<String>) -> Self {
        ViewOptions { map: Some(map.into()), ..Default::default() }
    }

    /// Creates view options with the given map and reduce functions.
    pub fn with_map_reduce(map: impl Into<String>, reduce: impl Into<String>) -> Self {
        ViewOptions {
            map: Some(map.into()),
            reduce: Some(reduce.into()),
            ..Default::default()
        }
    }
}

/// One server-side design document: an addressable, mutable aggregate of
/// named view and filter definitions with an `auto_update` policy.
///
/// Instances are handed out by the [registry](crate::registry) wrapped in a
/// [`DesignHandle`](crate::registry::DesignHandle); exactly one instance
/// exists per (model, accessor name) pair.
#[derive(Debug, Clone)]
pub struct DesignDocument {
    model: &'static str,
    prefix: Option<String>,
    /// Whether the persistence layer may push this design to the server when
    /// it drifts from the stored copy. Seeded from the model's class-level
    /// default at creation.
    pub auto_update: bool,
    views: BTreeMap<String, ViewOptions>,
    filters: BTreeMap<String, String>,
}

impl DesignDocument {
    /// Creates a new empty design document for a model (internal use; go
    /// through the registry or mapper instead).
    pub(crate) fn new(model: &'static str, prefix: Option<String>, auto_update: bool) -> Self {
        DesignDocument {
            model,
            prefix,
            auto_update,
            views: BTreeMap::new(),
            filters: BTreeMap::new(),
        }
    }

    /// The name of the owning model.
    pub fn model(&self) -> &'static str {
        self.model
    }

    /// The server-side document ID of this design.
    pub fn id(&self) -> String {
        design_id(self.model, self.prefix.as_deref())
    }

    /// Registers a named view, overwriting any previous definition under the
    /// same name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDesign`](DesignLayerError::InvalidDesign) if `name`
    /// is empty.
    pub fn create_view(&mut self, name: &str, options: ViewOptions) -> DesignLayerResult<()> {
        if name.is_empty() {
            return Err(DesignLayerError::InvalidDesign(
                "view name must not be empty".to_string(),
            ));
        }

        self.views.insert(name.to_string(), options);

        Ok(())
    }

    /// Registers a named change-feed filter function, overwriting any
    /// previous definition under the same name.
    ///
    /// Filters are plain function registrations; unlike views they never gain
    /// query accessors.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDesign`](DesignLayerError::InvalidDesign) if `name`
    /// or `function` is empty.
    pub fn create_filter(&mut self, name: &str, function: &str) -> DesignLayerResult<()> {
        if name.is_empty() {
            return Err(DesignLayerError::InvalidDesign(
                "filter name must not be empty".to_string(),
            ));
        }
        if function.is_empty() {
            return Err(DesignLayerError::InvalidDesign(
                "filter function must not be empty".to_string(),
            ));
        }

        self.filters
            .insert(name.to_string(), function.to_string());

        Ok(())
    }

    /// Looks up a view definition by name.
    pub fn view(&self, name: &str) -> Option<&ViewOptions> {
        self.views.get(name)
    }

    /// Returns whether a view with the given name is defined.
    pub fn has_view(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    /// Looks up a filter function body by name.
    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    /// All registered views, keyed by name.
    pub fn views(&self) -> &BTreeMap<String, ViewOptions> {
        &self.views
    }

    /// All registered filter function bodies, keyed by name.
    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Renders the aggregate into the server-side design document shape.
    ///
    /// # Errors
    ///
    /// Returns a [`Serialization`](DesignLayerError::Serialization) error if
    /// a view definition fails to serialize.
    pub fn to_json(&self) -> DesignLayerResult<Value> {
        Ok(json!({
            "_id": self.id(),
            "language": "javascript",
            "views": serde_json::to_value(&self.views)?,
            "filters": serde_json::to_value(&self.filters)?,
        }))
    }
}
