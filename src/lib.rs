//! Linenodes - finds the nodes of a line network.
//!
//! A node is a coordinate shared by two or more features, or a coordinate with
//! a single neighbor inside its own feature. This library provides the graph
//! construction and classification used by the `nodes` binary.

pub mod graph;
pub mod io;
pub mod models;

pub use graph::{classify, Node, NodeClassifier, NodeKind, NodeSet};
pub use models::{Coordinate, FeatureId, LineFeature};
