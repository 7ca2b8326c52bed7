//! The trait a persisted type implements to take part in the mapping layer.
//!
//! A [`Model`] is a serde-serializable type with a stable name. The name keys
//! the model's design documents in the [registry](crate::registry) and names
//! the server-side design document (`_design/<name>`).
//!
//! # Example
//!
//! ```ignore
//! use designlayer_core::model::Model;
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
//! ```

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::DesignLayerResult;

/// Core trait for types mapped onto documents in the database.
///
/// The class-level protocol the mapping layer relies on (a stable name, an
/// `auto_update` default, a construction hook) is expressed as associated
/// functions, so a type that lacks the protocol does not compile instead of
/// failing at configuration time.
pub trait Model: Serialize + DeserializeOwned + Send + Sync + Clone + 'static {
    /// Returns the stable name of this model.
    ///
    /// This should be a static identifier (e.g. "Cat", "Article"). It keys
    /// the model's design documents and appears in the design document ID.
    fn model_name() -> &'static str;

    /// The document field carrying the model type discriminator.
    ///
    /// View map functions typically test this field to select documents
    /// belonging to the model. Opaque to this crate; exposed for pass-through.
    fn model_type_key() -> &'static str {
        "type"
    }

    /// Class-level default for the `auto_update` flag of newly created
    /// design documents. Read once, at design document creation.
    fn auto_update_design_doc() -> bool {
        true
    }

    /// Constructs a model instance from a raw database document.
    ///
    /// The default implementation deserializes through serde. Override to
    /// apply legacy field handling or other shaping; the mapping layer never
    /// interprets document contents itself.
    ///
    /// # Errors
    ///
    /// Returns a [`Serialization`](crate::error::DesignLayerError::Serialization)
    /// error if the raw document does not deserialize into `Self`.
    fn build_from_database(raw: Value) -> DesignLayerResult<Self> {
        Ok(serde_json::from_value(raw)?)
    }
}
