//! Line network node finder.
//!
//! Reads GeoJSON line features, classifies intersection and endpoint nodes,
//! and writes them sorted by longitude then latitude.

mod config;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use linenodes::graph::NodeClassifier;
use linenodes::io::{sink_for, GeoJsonLoader, LoaderConfig, OutputFormat};

use crate::config::Config;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "nodes")]
#[command(about = "Find intersection and endpoint nodes of a GeoJSON line network")]
struct Args {
    /// GeoJSON file to read (`-` for stdin, `.gz` is decompressed)
    #[arg(short, long)]
    file: PathBuf,

    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail on non-LineString features instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging. stdout carries results, so logs go to stderr.
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    let strict = args.strict || config.input.strict;
    let format = args.format.unwrap_or(config.output.format);
    let output = args.output.or(config.output.path);

    info!("Reading features from {}", args.file.display());
    let batch = GeoJsonLoader::new(LoaderConfig { strict })
        .load_path(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let mut classifier = NodeClassifier::new();
    for feature in &batch.features {
        classifier.add_feature(feature);
    }
    info!(
        "Indexed {} coordinates, {} shared between features",
        classifier.membership().len(),
        classifier.membership().shared_count()
    );
    let nodes = classifier.finish().into_sorted();

    let writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut sink = sink_for(format, writer);
    sink.emit(&nodes)?;

    match &output {
        Some(path) => info!("Wrote {} nodes to {}", nodes.len(), path.display()),
        None => info!("Wrote {} nodes", nodes.len()),
    }

    Ok(())
}
