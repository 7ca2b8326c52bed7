//! Declarative configuration surface for a model's design documents.
//!
//! A [`DesignMapper`] is a short-lived builder: constructing one resolves (or
//! lazily creates) the model's design document for the chosen prefix, and the
//! methods called on it relay their parameters to that document. It exists
//! for the duration of one configuration block and is discarded after.
//!
//! # Example
//!
//! ```ignore
//! use designlayer_core::{mapper::design, design::ViewOptions};
//!
//! design::<Cat, _>(|doc| {
//!     doc.view("by_name", ViewOptions::with_map(
//!         "function(doc) { if (doc.type == 'Cat') emit(doc.name, 1); }",
//!     ))?;
//!     doc.disable_auto_update();
//!     Ok(())
//! })?;
//! ```

use std::marker::PhantomData;

use crate::design::ViewOptions;
use crate::error::DesignLayerResult;
use crate::model::Model;
use crate::registry::{DesignHandle, DesignRegistry};

/// Accessor name used when no prefix is given.
pub const DEFAULT_ACCESSOR: &str = "design_doc";

/// Derives the accessor name for a design document from an optional prefix.
///
/// Pure and stable: the same prefix always maps to the same name, distinct
/// prefixes to distinct names, and `None` to [`DEFAULT_ACCESSOR`].
pub fn accessor_name(prefix: Option<&str>) -> String {
    match prefix {
        None => DEFAULT_ACCESSOR.to_string(),
        Some(p) => format!("{p}_{DEFAULT_ACCESSOR}"),
    }
}

/// Options controlling which of a model's design documents a mapper binds to.
#[derive(Debug, Clone, Default)]
pub struct DesignOptions {
    /// Optional prefix selecting a named design besides the master one.
    pub prefix: Option<String>,
}

impl DesignOptions {
    /// Options for a prefixed (non-master) design document.
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        DesignOptions { prefix: Some(prefix.into()) }
    }
}

/// Transient builder binding a configuration block's declarative calls to the
/// correct [`DesignDocument`](crate::design::DesignDocument).
///
/// Construction resolves the target document through the registry exactly
/// once; every method then delegates to it. Constructing a second mapper for
/// the same (model, prefix) pair resolves the same document instance.
#[derive(Debug)]
pub struct DesignMapper<M: Model> {
    accessor: String,
    options: DesignOptions,
    doc: DesignHandle,
    _marker: PhantomData<M>,
}

impl<M: Model> DesignMapper<M> {
    /// Creates a mapper against the process-wide registry.
    pub fn new(options: DesignOptions) -> Self {
        Self::with_registry(DesignRegistry::global(), options)
    }

    /// Creates a mapper against an explicit registry.
    pub fn with_registry(registry: &DesignRegistry, options: DesignOptions) -> Self {
        let accessor = accessor_name(options.prefix.as_deref());
        let doc = registry.resolve_or_create::<M>(&accessor, options.prefix.as_deref());

        DesignMapper { accessor, options, doc, _marker: PhantomData }
    }

    /// The derived accessor name this mapper resolved.
    pub fn accessor(&self) -> &str {
        &self.accessor
    }

    /// The options this mapper was constructed with.
    pub fn options(&self) -> &DesignOptions {
        &self.options
    }

    /// Adds the named view to the design document the definition was made in.
    ///
    /// The options are an opaque pass-through; see
    /// [`DesignDocument::create_view`](crate::design::DesignDocument::create_view).
    pub fn view(&self, name: &str, options: ViewOptions) -> DesignLayerResult<()> {
        self.write(|doc| doc.create_view(name, options))
    }

    /// Adds a change-feed filter function to the design document.
    ///
    /// Filters are a pure registration; no query accessors are generated.
    pub fn filter(&self, name: &str, function: &str) -> DesignLayerResult<()> {
        self.write(|doc| doc.create_filter(name, function))
    }

    /// Clears the design document's `auto_update` flag. Explicit set, stable
    /// under repeated calls.
    pub fn disable_auto_update(&self) {
        self.write(|doc| doc.auto_update = false);
    }

    /// Sets the design document's `auto_update` flag. Explicit set, stable
    /// under repeated calls.
    pub fn enable_auto_update(&self) {
        self.write(|doc| doc.auto_update = true);
    }

    /// Convenience wrapper for the model's type discriminator key.
    pub fn model_type_key(&self) -> &'static str {
        M::model_type_key()
    }

    /// The design document this mapper resolved.
    pub fn design_doc(&self) -> DesignHandle {
        self.doc.clone()
    }

    fn write<R>(&self, apply: impl FnOnce(&mut crate::design::DesignDocument) -> R) -> R {
        let mut doc = self
            .doc
            .write()
            .unwrap_or_else(|e| e.into_inner());
        apply(&mut doc)
    }
}

/// Runs a configuration block against the model's master design document.
///
/// The closure receives a freshly resolved mapper, and the mapper is
/// discarded when the block returns.
pub fn design<M, F>(configure: F) -> DesignLayerResult<()>
where
    M: Model,
    F: FnOnce(&DesignMapper<M>) -> DesignLayerResult<()>,
{
    design_with(DesignOptions::default(), configure)
}

/// Runs a configuration block against the design document selected by
/// `options`.
pub fn design_with<M, F>(options: DesignOptions, configure: F) -> DesignLayerResult<()>
where
    M: Model,
    F: FnOnce(&DesignMapper<M>) -> DesignLayerResult<()>,
{
    let mapper = DesignMapper::<M>::new(options);
    configure(&mapper)
}
