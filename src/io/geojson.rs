//! GeoJSON line feature loader.
//!
//! Accepts a `FeatureCollection`, a single `Feature`, or a bare `LineString`
//! geometry. Only `LineString` geometries become features. Anything else is
//! skipped with a warning, or rejected when the loader is strict.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::LoadError;
use crate::models::{Coordinate, FeatureId, LineFeature, NumericId};

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<RawFeature>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
    #[serde(default)]
    coordinates: Value,
}

#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Fail on non-LineString geometries instead of skipping them
    pub strict: bool,
}

/// Features read from one document
#[derive(Debug, Clone, Default)]
pub struct FeatureBatch {
    pub features: Vec<LineFeature>,
    /// Features dropped for having no usable line geometry
    pub skipped: usize,
}

pub struct GeoJsonLoader {
    config: LoaderConfig,
}

impl GeoJsonLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load from a file path. `-` reads stdin and a `.gz` extension is
    /// decompressed on the fly.
    pub fn load_path(&self, path: &Path) -> Result<FeatureBatch, LoadError> {
        if path == Path::new("-") {
            return self.load_reader(io::stdin().lock());
        }

        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let reader: Box<dyn Read> = if path.extension().map_or(false, |e| e == "gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };

        let batch = self.load_reader(BufReader::new(reader))?;
        info!(
            "Loaded {} line features from {} ({} skipped)",
            batch.features.len(),
            path.display(),
            batch.skipped
        );
        Ok(batch)
    }

    pub fn load_reader<R: Read>(&self, reader: R) -> Result<FeatureBatch, LoadError> {
        let doc: RawDocument = serde_json::from_reader(reader)?;
        self.load_document(doc)
    }

    pub fn load_str(&self, s: &str) -> Result<FeatureBatch, LoadError> {
        let doc: RawDocument = serde_json::from_str(s)?;
        self.load_document(doc)
    }

    fn load_document(&self, doc: RawDocument) -> Result<FeatureBatch, LoadError> {
        let raw_features = match doc.kind.as_str() {
            "FeatureCollection" => doc.features,
            "Feature" => vec![RawFeature {
                id: doc.id,
                geometry: doc.geometry,
            }],
            "LineString" => vec![RawFeature {
                id: None,
                geometry: Some(RawGeometry {
                    kind: doc.kind,
                    coordinates: doc.coordinates,
                }),
            }],
            other => return Err(LoadError::UnsupportedDocument(other.to_string())),
        };

        let mut batch = FeatureBatch::default();

        for (index, raw) in raw_features.into_iter().enumerate() {
            let id = feature_id(raw.id, index);

            let geometry = match raw.geometry {
                Some(g) if g.kind == "LineString" => g,
                other => {
                    let kind = other.map_or_else(|| "null".to_string(), |g| g.kind);
                    if self.config.strict {
                        return Err(LoadError::UnsupportedGeometry { id, kind });
                    }
                    warn!("Skipping feature {} with geometry type {}", id, kind);
                    batch.skipped += 1;
                    continue;
                }
            };

            let coords = parse_positions(&id, geometry.coordinates)?;
            batch.features.push(LineFeature::new(id, coords));
        }

        Ok(batch)
    }
}

fn feature_id(raw: Option<Value>, index: usize) -> FeatureId {
    match raw {
        Some(Value::String(s)) => FeatureId::Text(s),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(value) => FeatureId::Number(NumericId::new(value)),
            None => FeatureId::Text(n.to_string()),
        },
        _ => FeatureId::Position(index),
    }
}

/// Parse `[[lon, lat, ...], ...]`, keeping the first two ordinates
fn parse_positions(id: &FeatureId, coordinates: Value) -> Result<Vec<Coordinate>, LoadError> {
    let positions: Vec<Vec<f64>> = serde_json::from_value(coordinates)?;

    positions
        .iter()
        .enumerate()
        .map(|(index, position)| match position.as_slice() {
            [lon, lat, ..] => Ok(Coordinate::new(*lon, *lat)),
            _ => Err(LoadError::InvalidPosition {
                id: id.clone(),
                index,
                len: position.len(),
            }),
        })
        .collect()
}
