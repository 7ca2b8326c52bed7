//! Class-level storage for design documents.
//!
//! Design documents are shared mutable state attached to a model type, not to
//! its instances. This module holds that state in an explicit registry: a map
//! from (model type, accessor name) to a shared [`DesignDocument`] handle,
//! populated lazily and read through typed lookups.
//!
//! # Concurrency
//!
//! Configuration is expected to happen sequentially at load/bootstrap time.
//! The interior locks exist because a process-wide registry must be `Sync`,
//! not to make concurrent configuration of the same model a supported
//! pattern.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use log::debug;

use crate::design::DesignDocument;
use crate::model::Model;

/// Shared handle to a model's design document.
///
/// Cloning the handle never clones the document; all clones point at the one
/// instance held by the registry. Identity can be checked with
/// [`Arc::ptr_eq`].
pub type DesignHandle = Arc<RwLock<DesignDocument>>;

#[derive(Debug, Default)]
struct RegistryState {
    entries: HashMap<(TypeId, String), DesignHandle>,
    /// Creation-ordered handles per model, the `design_docs` collection.
    ordered: HashMap<TypeId, Vec<DesignHandle>>,
}

/// Registry mapping (model type, accessor name) to design document handles.
///
/// Most callers use the process-wide instance via [`DesignRegistry::global`],
/// which the [mapper](crate::mapper) defaults to. Independent instances can
/// be constructed for tests.
#[derive(Debug, Default)]
pub struct DesignRegistry {
    state: RwLock<RegistryState>,
}

impl DesignRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        DesignRegistry::default()
    }

    /// Returns the process-wide registry instance.
    pub fn global() -> &'static DesignRegistry {
        static GLOBAL: OnceLock<DesignRegistry> = OnceLock::new();
        GLOBAL.get_or_init(DesignRegistry::new)
    }

    /// Resolves the design document stored for `M` under `accessor`, creating
    /// it if this is the first access.
    ///
    /// Creation happens at most once per (model, accessor) pair: a new
    /// document is seeded with the model's `auto_update_design_doc` default
    /// and appended to the model's ordered collection, and every later call
    /// returns the same handle.
    pub fn resolve_or_create<M: Model>(
        &self,
        accessor: &str,
        prefix: Option<&str>,
    ) -> DesignHandle {
        let key = (TypeId::of::<M>(), accessor.to_string());
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|e| e.into_inner());

        if let Some(handle) = state.entries.get(&key) {
            return handle.clone();
        }

        debug!(
            "creating design document {} for model {}",
            accessor,
            M::model_name()
        );

        let doc = DesignDocument::new(
            M::model_name(),
            prefix.map(str::to_string),
            M::auto_update_design_doc(),
        );
        let handle: DesignHandle = Arc::new(RwLock::new(doc));

        state.entries.insert(key, handle.clone());
        state
            .ordered
            .entry(TypeId::of::<M>())
            .or_default()
            .push(handle.clone());

        handle
    }

    /// Typed read accessor for a model's stored design document.
    ///
    /// This replaces the synthesized per-class reader method: looking it up
    /// any number of times is side-effect free and returns the same handle,
    /// or `None` before the first [`resolve_or_create`](Self::resolve_or_create).
    pub fn design_document<M: Model>(&self, accessor: &str) -> Option<DesignHandle> {
        let key = (TypeId::of::<M>(), accessor.to_string());
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .get(&key)
            .cloned()
    }

    /// All design documents created for `M`, in creation order.
    pub fn design_docs<M: Model>(&self) -> Vec<DesignHandle> {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .ordered
            .get(&TypeId::of::<M>())
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Cat {
        id: String,
    }

    impl Model for Cat {
        fn model_name() -> &'static str {
            "Cat"
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Dog {
        id: String,
    }

    impl Model for Dog {
        fn model_name() -> &'static str {
            "Dog"
        }

        fn auto_update_design_doc() -> bool {
            false
        }
    }

    #[test]
    fn resolve_is_idempotent_by_identity() {
        let registry = DesignRegistry::new();
        let first = registry.resolve_or_create::<Cat>("design_doc", None);
        let second = registry.resolve_or_create::<Cat>("design_doc", None);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.design_docs::<Cat>().len(), 1);
    }

    #[test]
    fn accessor_lookup_is_repeatable_and_side_effect_free() {
        let registry = DesignRegistry::new();
        assert!(registry.design_document::<Cat>("design_doc").is_none());

        let created = registry.resolve_or_create::<Cat>("design_doc", None);
        for _ in 0..3 {
            let read = registry
                .design_document::<Cat>("design_doc")
                .unwrap();
            assert!(Arc::ptr_eq(&created, &read));
        }
        assert_eq!(registry.design_docs::<Cat>().len(), 1);
    }

    #[test]
    fn distinct_accessors_yield_distinct_documents() {
        let registry = DesignRegistry::new();
        let base = registry.resolve_or_create::<Cat>("design_doc", None);
        let stats = registry.resolve_or_create::<Cat>("stats_design_doc", Some("stats"));

        assert!(!Arc::ptr_eq(&base, &stats));
        assert_eq!(registry.design_docs::<Cat>().len(), 2);

        base.write()
            .unwrap()
            .create_view("by_name", Default::default())
            .unwrap();
        assert!(base.read().unwrap().has_view("by_name"));
        assert!(!stats.read().unwrap().has_view("by_name"));
    }

    #[test]
    fn distinct_models_never_share_a_document() {
        let registry = DesignRegistry::new();
        let cat = registry.resolve_or_create::<Cat>("design_doc", None);
        let dog = registry.resolve_or_create::<Dog>("design_doc", None);

        assert!(!Arc::ptr_eq(&cat, &dog));
        assert_eq!(cat.read().unwrap().model(), "Cat");
        assert_eq!(dog.read().unwrap().model(), "Dog");
    }

    #[test]
    fn auto_update_seeds_from_model_default() {
        let registry = DesignRegistry::new();
        let cat = registry.resolve_or_create::<Cat>("design_doc", None);
        let dog = registry.resolve_or_create::<Dog>("design_doc", None);

        assert!(cat.read().unwrap().auto_update);
        assert!(!dog.read().unwrap().auto_update);
    }

    #[test]
    fn design_docs_preserve_creation_order() {
        let registry = DesignRegistry::new();
        let a = registry.resolve_or_create::<Cat>("a_design_doc", Some("a"));
        let b = registry.resolve_or_create::<Cat>("b_design_doc", Some("b"));

        let docs = registry.design_docs::<Cat>();
        assert_eq!(docs.len(), 2);
        assert!(Arc::ptr_eq(&docs[0], &a));
        assert!(Arc::ptr_eq(&docs[1], &b));
    }
}
