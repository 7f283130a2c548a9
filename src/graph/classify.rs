//! Node classification.
//!
//! A coordinate is a node when two or more distinct features touch it, or
//! when it has exactly one neighbor inside its own feature.

use hashbrown::HashMap;
use tracing::{debug, info};

use super::{FeatureAdjacency, MembershipIndex};
use crate::models::{Coordinate, LineFeature};

/// Which rule(s) made a coordinate a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Shared by two or more distinct features
    Intersection,
    /// Degree 1 within its own feature
    Endpoint,
    /// Both of the above
    Both,
}

impl NodeKind {
    fn merge(self, other: NodeKind) -> NodeKind {
        if self == other {
            self
        } else {
            NodeKind::Both
        }
    }

    pub fn is_intersection(&self) -> bool {
        matches!(self, NodeKind::Intersection | NodeKind::Both)
    }

    pub fn is_endpoint(&self) -> bool {
        matches!(self, NodeKind::Endpoint | NodeKind::Both)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Intersection => "intersection",
            NodeKind::Endpoint => "endpoint",
            NodeKind::Both => "both",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub coord: Coordinate,
    pub kind: NodeKind,
}

/// Deduplicated node set
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    nodes: HashMap<Coordinate, NodeKind>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, merging kinds if the coordinate is already present
    pub fn insert(&mut self, coord: Coordinate, kind: NodeKind) {
        self.nodes
            .entry(coord)
            .and_modify(|existing| *existing = existing.merge(kind))
            .or_insert(kind);
    }

    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.nodes.contains_key(coord)
    }

    pub fn kind(&self, coord: &Coordinate) -> Option<NodeKind> {
        self.nodes.get(coord).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes sorted ascending by longitude, then latitude
    pub fn into_sorted(self) -> Vec<Node> {
        let mut nodes: Vec<Node> = self
            .nodes
            .into_iter()
            .map(|(coord, kind)| Node { coord, kind })
            .collect();
        nodes.sort_unstable_by(|a, b| a.coord.cmp(&b.coord));
        nodes
    }

    /// Sorted coordinates only
    pub fn coordinates(&self) -> Vec<Coordinate> {
        let mut coords: Vec<Coordinate> = self.nodes.keys().copied().collect();
        coords.sort_unstable();
        coords
    }
}

/// Builds adjacency and membership for one batch and derives its nodes
#[derive(Debug, Default)]
pub struct NodeClassifier {
    adjacencies: Vec<FeatureAdjacency>,
    membership: MembershipIndex,
    nodes: NodeSet,
}

impl NodeClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk one feature's segments, growing its adjacency and the global
    /// membership index together. Intersections are recorded as soon as a
    /// second feature is seen at a coordinate.
    pub fn add_feature(&mut self, feature: &LineFeature) {
        let mut adjacency = FeatureAdjacency::new();

        for (start, end) in feature.segments() {
            adjacency.add_edge(start, end);

            // Degenerate segments still count as touching the coordinate
            for coord in [start, end] {
                if self.membership.record(coord, &feature.id) {
                    self.nodes.insert(coord, NodeKind::Intersection);
                }
            }
        }

        debug!(
            "Feature {}: {} vertices, {} in graph",
            feature.id,
            feature.len(),
            adjacency.len()
        );

        self.adjacencies.push(adjacency);
    }

    pub fn membership(&self) -> &MembershipIndex {
        &self.membership
    }

    /// Add endpoint nodes from every feature graph and return the node set
    pub fn finish(mut self) -> NodeSet {
        let intersections = self.nodes.len();

        for adjacency in &self.adjacencies {
            for coord in adjacency.endpoints() {
                self.nodes.insert(coord, NodeKind::Endpoint);
            }
        }

        info!(
            "Classified {} nodes from {} features ({} intersections)",
            self.nodes.len(),
            self.adjacencies.len(),
            intersections
        );

        self.nodes
    }
}

/// Classify all nodes of a batch of features
pub fn classify(features: &[LineFeature]) -> NodeSet {
    let mut classifier = NodeClassifier::new();
    for feature in features {
        classifier.add_feature(feature);
    }
    classifier.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeatureId;

    fn c(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat)
    }

    fn feature(id: &str, coords: &[(f64, f64)]) -> LineFeature {
        LineFeature::new(id, coords.iter().copied())
    }

    #[test]
    fn test_two_features_meeting_at_endpoint() {
        let features = vec![
            feature("F1", &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]),
            feature("F2", &[(2.0, 2.0), (3.0, 3.0)]),
        ];

        let nodes = classify(&features);
        assert_eq!(
            nodes.coordinates(),
            vec![c(0.0, 0.0), c(2.0, 2.0), c(3.0, 3.0)]
        );
        assert_eq!(nodes.kind(&c(2.0, 2.0)), Some(NodeKind::Both));
        assert_eq!(nodes.kind(&c(0.0, 0.0)), Some(NodeKind::Endpoint));
        assert!(!nodes.contains(&c(1.0, 1.0)));
    }

    #[test]
    fn test_closed_loop_has_no_nodes() {
        let features = vec![feature(
            "F1",
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)],
        )];
        assert!(classify(&features).is_empty());
    }

    #[test]
    fn test_single_point_feature_has_no_nodes() {
        let features = vec![feature("F1", &[(5.0, 5.0)])];
        assert!(classify(&features).is_empty());
    }

    #[test]
    fn test_duplicate_consecutive_point() {
        let features = vec![feature("F1", &[(0.0, 0.0), (0.0, 0.0), (1.0, 1.0)])];
        let nodes = classify(&features);
        assert_eq!(nodes.coordinates(), vec![c(0.0, 0.0), c(1.0, 1.0)]);
    }

    #[test]
    fn test_crossing_at_interior_vertex() {
        // Two lines crossing at (1, 1), degree 2 in both
        let features = vec![
            feature("a", &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]),
            feature("b", &[(0.0, 2.0), (1.0, 1.0), (2.0, 0.0)]),
        ];
        let nodes = classify(&features);
        assert_eq!(nodes.kind(&c(1.0, 1.0)), Some(NodeKind::Intersection));
        assert_eq!(nodes.len(), 5);
    }

    #[test]
    fn test_self_touching_feature_is_not_intersection() {
        // Figure eight through (1, 1): degree 4 there, same feature both times
        let features = vec![feature(
            "a",
            &[
                (0.0, 0.0),
                (1.0, 1.0),
                (2.0, 0.0),
                (2.0, 2.0),
                (1.0, 1.0),
                (0.0, 2.0),
                (0.0, 0.0),
            ],
        )];
        let nodes = classify(&features);
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_geometric_crossing_without_shared_vertex_is_ignored() {
        // Segments cross at (1, 1) but neither has a vertex there
        let features = vec![
            feature("a", &[(0.0, 0.0), (2.0, 2.0)]),
            feature("b", &[(0.0, 2.0), (2.0, 0.0)]),
        ];
        let nodes = classify(&features);
        assert!(!nodes.contains(&c(1.0, 1.0)));
        assert_eq!(nodes.len(), 4);
    }

    #[test]
    fn test_degenerate_only_feature_still_touches() {
        // "b" never forms an edge but still touches (1, 1)
        let features = vec![
            feature("a", &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]),
            feature("b", &[(1.0, 1.0), (1.0, 1.0)]),
        ];
        let nodes = classify(&features);
        assert_eq!(nodes.kind(&c(1.0, 1.0)), Some(NodeKind::Intersection));
    }

    #[test]
    fn test_same_id_on_two_features_does_not_intersect() {
        let features = vec![
            feature("a", &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]),
            feature("a", &[(0.0, 2.0), (1.0, 1.0), (2.0, 0.0)]),
        ];
        let nodes = classify(&features);
        assert!(!nodes.contains(&c(1.0, 1.0)));
    }

    #[test]
    fn test_interior_vertex_after_skip_counts_as_endpoint() {
        // (1, 0) is reached twice from the same neighbor, so it keeps degree 1
        let features = vec![feature("a", &[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 0.0)])];
        let nodes = classify(&features);
        assert_eq!(nodes.coordinates(), vec![c(0.0, 0.0), c(1.0, 0.0)]);
    }

    #[test]
    fn test_output_sorted_and_unique() {
        let features = vec![
            feature("a", &[(3.0, 1.0), (3.0, -1.0), (-2.0, 0.5)]),
            feature("b", &[(3.0, -1.0), (10.0, 10.0)]),
            feature("c", &[(-2.0, 0.5), (-2.0, -4.0), (3.0, 1.0)]),
        ];
        let sorted = classify(&features).into_sorted();

        for pair in sorted.windows(2) {
            assert!(pair[0].coord < pair[1].coord);
        }
        assert_eq!(sorted.len(), 4);
        assert_eq!(sorted.first().map(|n| n.coord), Some(c(-2.0, 0.5)));
        assert_eq!(sorted[1].coord, c(3.0, -1.0));
        assert_eq!(sorted.last().map(|n| n.coord), Some(c(10.0, 10.0)));
    }

    #[test]
    fn test_classifier_exposes_membership() {
        let mut classifier = NodeClassifier::new();
        classifier.add_feature(&feature("a", &[(0.0, 0.0), (1.0, 0.0)]));
        classifier.add_feature(&feature("b", &[(1.0, 0.0), (2.0, 0.0)]));

        let membership = classifier.membership();
        assert!(membership.is_shared(&c(1.0, 0.0)));
        assert_eq!(membership.owners(&c(0.0, 0.0)), vec![&FeatureId::from("a")]);

        let nodes = classifier.finish();
        assert_eq!(nodes.len(), 3);
    }

    #[test]
    fn test_node_kind_merge() {
        let mut set = NodeSet::new();
        set.insert(c(0.0, 0.0), NodeKind::Endpoint);
        set.insert(c(0.0, 0.0), NodeKind::Endpoint);
        assert_eq!(set.kind(&c(0.0, 0.0)), Some(NodeKind::Endpoint));

        set.insert(c(0.0, 0.0), NodeKind::Intersection);
        assert_eq!(set.kind(&c(0.0, 0.0)), Some(NodeKind::Both));
        assert!(set.kind(&c(0.0, 0.0)).unwrap().is_endpoint());
        assert_eq!(set.len(), 1);
    }
}
