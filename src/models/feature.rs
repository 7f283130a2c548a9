//! Line features as handed to the node classifier.

use std::fmt;
use std::hash::{Hash, Hasher};

use geo::LineString;

use super::Coordinate;

/// Stable identifier of a line feature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeatureId {
    /// GeoJSON string id
    Text(String),
    /// GeoJSON numeric id
    Number(NumericId),
    /// Position in the input, used when the source carries no id
    Position(usize),
}

/// Numeric feature id compared by value, so `1` and `1.0` are one id
#[derive(Debug, Clone, Copy)]
pub struct NumericId(f64);

impl NumericId {
    pub fn new(value: f64) -> Self {
        Self(value + 0.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for NumericId {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for NumericId {}

impl Hash for NumericId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for NumericId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureId::Text(s) => write!(f, "{}", s),
            FeatureId::Number(n) => write!(f, "{}", n),
            FeatureId::Position(i) => write!(f, "#{}", i),
        }
    }
}

impl From<&str> for FeatureId {
    fn from(s: &str) -> Self {
        FeatureId::Text(s.to_string())
    }
}

impl From<String> for FeatureId {
    fn from(s: String) -> Self {
        FeatureId::Text(s)
    }
}

impl From<f64> for FeatureId {
    fn from(n: f64) -> Self {
        FeatureId::Number(NumericId::new(n))
    }
}

impl From<u64> for FeatureId {
    fn from(n: u64) -> Self {
        FeatureId::Number(NumericId::new(n as f64))
    }
}

/// A polyline with its feature id
#[derive(Debug, Clone)]
pub struct LineFeature {
    pub id: FeatureId,
    pub geometry: LineString<f64>,
}

impl LineFeature {
    pub fn new<I, C>(id: impl Into<FeatureId>, coords: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        let geometry = coords
            .into_iter()
            .map(|c| {
                let coord: Coordinate = c.into();
                geo::Coord::from(coord)
            })
            .collect::<Vec<_>>();

        Self {
            id: id.into(),
            geometry: LineString::new(geometry),
        }
    }

    /// Number of vertices in the polyline
    pub fn len(&self) -> usize {
        self.geometry.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }

    pub fn coords(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.geometry.coords().map(|c| Coordinate::from(*c))
    }

    /// Consecutive vertex pairs, degenerate ones included
    pub fn segments(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.geometry
            .lines()
            .map(|line| (Coordinate::from(line.start), Coordinate::from(line.end)))
    }
}
