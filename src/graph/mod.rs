//! Line network graph construction and node classification.

mod adjacency;
mod classify;
mod membership;

pub use adjacency::FeatureAdjacency;
pub use classify::{classify, Node, NodeClassifier, NodeKind, NodeSet};
pub use membership::{Membership, MembershipIndex};
