use std::path::PathBuf;

use thiserror::Error;

use crate::models::FeatureId;

/// Errors raised while loading line features
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported GeoJSON document type '{0}'")]
    UnsupportedDocument(String),

    #[error("feature {id} has unsupported geometry type '{kind}'")]
    UnsupportedGeometry { id: FeatureId, kind: String },

    #[error("feature {id}: position {index} has {len} ordinate(s), expected at least 2")]
    InvalidPosition {
        id: FeatureId,
        index: usize,
        len: usize,
    },
}
