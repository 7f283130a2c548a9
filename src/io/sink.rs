//! Result sinks for classified nodes.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::graph::Node;

/// Receives the final, already sorted node list
pub trait NodeSink {
    fn emit(&mut self, nodes: &[Node]) -> Result<()>;
}

/// Output encoding for the node list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `(lon, lat)` pair per line
    #[default]
    Text,
    /// FeatureCollection of Point features
    Geojson,
}

/// Writes `(lon, lat)` lines
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> NodeSink for TextSink<W> {
    fn emit(&mut self, nodes: &[Node]) -> Result<()> {
        for node in nodes {
            writeln!(self.writer, "{}", node.coord).context("Failed to write node")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes a GeoJSON FeatureCollection with one Point per node
pub struct GeoJsonSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> GeoJsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn to_value(nodes: &[Node]) -> Value {
        let features: Vec<Value> = nodes
            .iter()
            .map(|node| {
                json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": [node.coord.lon(), node.coord.lat()],
                    },
                    "properties": { "kind": node.kind.as_str() },
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}

impl<W: Write> NodeSink for GeoJsonSink<W> {
    fn emit(&mut self, nodes: &[Node]) -> Result<()> {
        let doc = Self::to_value(nodes);
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &doc)?;
        } else {
            serde_json::to_writer(&mut self.writer, &doc)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Build the sink for `format`
pub fn sink_for<'a, W: Write + 'a>(format: OutputFormat, writer: W) -> Box<dyn NodeSink + 'a> {
    match format {
        OutputFormat::Text => Box::new(TextSink::new(writer)),
        OutputFormat::Geojson => Box::new(GeoJsonSink::new(writer).pretty(true)),
    }
}
