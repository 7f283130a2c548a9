//! Per-feature adjacency graph.

use hashbrown::{HashMap, HashSet};

use crate::models::Coordinate;

/// Undirected adjacency of one feature: vertex -> distinct neighbors
#[derive(Debug, Clone, Default)]
pub struct FeatureAdjacency {
    neighbors: HashMap<Coordinate, HashSet<Coordinate>>,
}

impl FeatureAdjacency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the adjacency for a whole coordinate sequence
    pub fn from_coords(coords: &[Coordinate]) -> Self {
        let mut adjacency = Self::new();
        for pair in coords.windows(2) {
            adjacency.add_edge(pair[0], pair[1]);
        }
        adjacency
    }

    /// Record an undirected edge. Zero-length edges are dropped.
    ///
    /// Returns `false` when `start == end` and nothing was recorded.
    pub fn add_edge(&mut self, start: Coordinate, end: Coordinate) -> bool {
        if start == end {
            return false;
        }

        self.neighbors.entry(start).or_default().insert(end);
        self.neighbors.entry(end).or_default().insert(start);
        true
    }

    pub fn neighbors(&self, coord: &Coordinate) -> Option<&HashSet<Coordinate>> {
        self.neighbors.get(coord)
    }

    /// Number of distinct neighbors, 0 for unknown vertices
    pub fn degree(&self, coord: &Coordinate) -> usize {
        self.neighbors.get(coord).map_or(0, |n| n.len())
    }

    /// Vertices with exactly one neighbor
    pub fn endpoints(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.neighbors
            .iter()
            .filter(|(_, n)| n.len() == 1)
            .map(|(coord, _)| *coord)
    }

    /// Number of vertices with at least one edge
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}
