//! Core data models for the line network.

pub mod coordinate;
pub mod feature;

pub use coordinate::Coordinate;
pub use feature::{FeatureId, LineFeature, NumericId};
