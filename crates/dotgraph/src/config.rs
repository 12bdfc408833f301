//! Writer configuration loaded from TOML.
//!
//! A [`WriterConfig`] bundles everything the I/O layer can be told from
//! the outside: where files go, which `dot` binary and output format to
//! use, an optional remote endpoint, the render [`Theme`], and style
//! overrides layered over the built-in [`StyleSheet`]. Every field has a
//! default, so an empty document is a valid configuration.

use std::{
    fs,
    hash::Hash,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use dotgraph_core::{DotGraph, Theme};

use crate::styles::StyleSheet;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for the writer layer, with style and theme sections.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Directory where `.dot` files and images are produced.
    pub out_dir: PathBuf,

    /// Path to the Graphviz `dot` executable.
    pub dot_path: PathBuf,

    /// Graphviz output format, doubling as the image file extension.
    pub format: String,

    /// Remote chart-service endpoint; `None` selects the local binary.
    pub endpoint: Option<String>,

    /// Render theme bound into graphs built from this configuration.
    pub theme: Theme,

    /// Style-sheet overrides layered over the built-in table.
    pub styles: IndexMap<String, String>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            out_dir: PathBuf::from("."),
            dot_path: PathBuf::from("dot"),
            format: "png".to_string(),
            endpoint: None,
            theme: Theme::default(),
            styles: IndexMap::new(),
        }
    }
}

impl WriterConfig {
    /// The built-in style sheet with this configuration's overrides
    /// applied.
    pub fn style_sheet(&self) -> StyleSheet {
        StyleSheet::default().with_overrides(self.styles.clone())
    }

    /// Creates a [`DotGraph`] with this configuration's theme bound in.
    ///
    /// # Example
    ///
    /// ```
    /// use dotgraph::{DotElement, DotGraph, WriterConfig};
    ///
    /// let config = WriterConfig::default();
    /// let styles = config.style_sheet();
    ///
    /// let mut graph: DotGraph<&str> = config.graph("styled");
    /// graph
    ///     .digraph_mut()
    ///     .add_node("Car")
    ///     .set_label("My Car")
    ///     .set_options(styles.get("class-node").unwrap_or_default());
    ///
    /// assert!(graph.render().contains("fillcolor=lightyellow"));
    /// ```
    pub fn graph<K>(&self, title: impl Into<String>) -> DotGraph<K>
    where
        K: Eq + Hash,
    {
        DotGraph::with_theme(title, self.theme.clone())
    }
}

/// Loads a [`WriterConfig`] from a TOML file.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] if the file cannot be read and
/// [`ConfigError::Parse`] if it is not valid TOML for the expected
/// shape.
pub fn load(path: &Path) -> Result<WriterConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&text)?;
    debug!(path = path.display().to_string(); "Loaded writer configuration");
    Ok(config)
}
