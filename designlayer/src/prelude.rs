//! Convenient re-exports of commonly used types from designlayer.
//!
//! Import this prelude module to quickly access the most frequently used
//! types and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use designlayer::prelude::*;
//! ```

pub use designlayer_core::{
    client::{
        BulkResponse, BulkRow, ClientError, DatabaseClient, ViewQuery, ViewResponse, ViewRow,
    },
    design::{ALL_VIEW, DesignDocument, ViewOptions, design_id},
    error::{DesignLayerError, DesignLayerResult},
    mapper::{DEFAULT_ACCESSOR, DesignMapper, DesignOptions, accessor_name, design, design_with},
    model::Model,
    queries::ModelQueries,
    registry::{DesignHandle, DesignRegistry},
};
