//! Feature loading and node output.

mod error;
mod geojson;
mod sink;

pub use error::LoadError;
pub use geojson::{FeatureBatch, GeoJsonLoader, LoaderConfig};
pub use sink::{sink_for, GeoJsonSink, NodeSink, OutputFormat, TextSink};
