//! CLI logic for the dotgraph rendering tool.
//!
//! Reads an existing DOT document from disk and hands it to one of the
//! dotgraph writers to produce an image: the local Graphviz binary by
//! default, or the remote chart service when an endpoint is configured.
//! The input text is passed through untouched; this tool never parses
//! DOT.

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;
use thiserror::Error;

use dotgraph::{DotWriter, GraphvizWriter, RemoteChartWriter, WriterError, config::ConfigError};

/// The CLI's error type, aggregating everything `run` can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Writer(#[from] WriterError),

    #[error("Cannot derive a document name from input path: {0}")]
    BadInput(String),

    #[error("The remote renderer always produces png; --format cannot be combined with --remote")]
    RemoteFormat,
}

/// Run the dotgraph CLI application
///
/// Reads the input DOT file and produces an image next to the configured
/// output directory through the selected writer.
///
/// # Errors
///
/// Returns [`CliError`] for file I/O errors, configuration errors, and
/// writer failures (subprocess or remote service).
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(input_path = args.input; "Rendering DOT document");

    // The remote service only ever returns png.
    if args.remote.is_some() && args.format.is_some() {
        return Err(CliError::RemoteFormat);
    }

    let writer_config = config::load_config(args.config.as_ref())?;

    let content = fs::read_to_string(&args.input)?;
    let name = Path::new(&args.input)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| CliError::BadInput(args.input.clone()))?;

    // Command-line flags win over the configuration file; absent flags
    // take the configured values.
    let endpoint = args.remote.clone().or(writer_config.endpoint);
    let out_dir = args
        .out_dir
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or(writer_config.out_dir);
    let format = args.format.clone().unwrap_or(writer_config.format);

    let image = match endpoint {
        Some(endpoint) => RemoteChartWriter::new(&out_dir)
            .with_endpoint(endpoint)
            .to_image(name, &content)?,
        None => GraphvizWriter::new(&out_dir)
            .with_dot_path(&writer_config.dot_path)
            .with_format(format)
            .to_image(name, &content)?,
    };

    info!(image = image.display().to_string(); "Image produced");

    Ok(())
}
