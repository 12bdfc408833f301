//! Persistence and rasterization of rendered DOT documents.
//!
//! The core produces text; everything here is the thin I/O layer around
//! it. A [`DotWriter`] persists a document as `<out_dir>/<name>.dot` and
//! turns it into an image next to it, either by running the local
//! Graphviz `dot` binary ([`GraphvizWriter`]) or by submitting the text
//! to a remote chart-rendering HTTP service ([`RemoteChartWriter`]).
//! Callers hand over text and get back an image path; they neither know
//! nor care which backend did the work.
//!
//! # Error Handling
//!
//! All failures surface as a single [`WriterError`] carrying the target
//! name and the underlying cause. The core itself has nothing to report
//! at this level; its operations are total.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info};
use thiserror::Error;

/// Errors produced while persisting or rasterizing a DOT document.
#[derive(Debug, Error)]
pub enum WriterError {
    #[error("I/O failure for {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Graphviz failed on {name}.dot: {detail}")]
    Graphviz { name: String, detail: String },

    #[error("Remote rendering failed for {name}: {detail}")]
    Remote { name: String, detail: String },
}

impl WriterError {
    fn io(name: &str, source: io::Error) -> Self {
        WriterError::Io {
            name: name.to_string(),
            source,
        }
    }
}

/// Capability for turning rendered DOT text into an image reference.
///
/// Implementors supply the output locations and the rasterization step;
/// the writing of the `.dot` file and the write-then-render convenience
/// are provided.
pub trait DotWriter {
    /// Directory where `.dot` files and images are produced.
    fn out_dir(&self) -> &Path;

    /// Path of the image produced for `name`.
    fn image_path(&self, name: &str) -> PathBuf;

    /// Rasterizes a previously written `<out_dir>/<name>.dot`.
    ///
    /// # Errors
    ///
    /// Returns a [`WriterError`] naming `name` and the underlying cause.
    fn render(&self, name: &str) -> Result<(), WriterError>;

    /// Persists `content` as `<out_dir>/<name>.dot` and returns its path.
    fn write(&self, name: &str, content: &str) -> Result<PathBuf, WriterError> {
        let path = self.out_dir().join(format!("{name}.dot"));
        fs::write(&path, content).map_err(|source| WriterError::io(name, source))?;
        debug!(path = path.display().to_string(); "Wrote DOT file");
        Ok(path)
    }

    /// All-in-one convenience: write, render, return the image path.
    fn to_image(&self, name: &str, content: &str) -> Result<PathBuf, WriterError> {
        self.write(name, content)?;
        self.render(name)?;
        Ok(self.image_path(name))
    }
}

/// Writer backed by the local Graphviz `dot` binary.
///
/// Requires Graphviz to be installed and read/write access to the output
/// directory. Runs `dot -T<format> <name>.dot -o <name>.<format>` and
/// aggregates a non-zero exit together with the captured stderr.
#[derive(Debug, Clone)]
pub struct GraphvizWriter {
    out_dir: PathBuf,
    dot_path: PathBuf,
    format: String,
}

impl GraphvizWriter {
    /// Creates a writer producing PNG images via `dot` found on `PATH`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        GraphvizWriter {
            out_dir: out_dir.into(),
            dot_path: PathBuf::from("dot"),
            format: "png".to_string(),
        }
    }

    /// Overrides the path to the `dot` executable.
    pub fn with_dot_path(mut self, dot_path: impl Into<PathBuf>) -> Self {
        self.dot_path = dot_path.into();
        self
    }

    /// Overrides the Graphviz output format (`png`, `svg`, ...), which is
    /// also used as the image file extension.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }
}

impl DotWriter for GraphvizWriter {
    fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn image_path(&self, name: &str) -> PathBuf {
        self.out_dir.join(format!("{name}.{}", self.format))
    }

    fn render(&self, name: &str) -> Result<(), WriterError> {
        let input = self.out_dir.join(format!("{name}.dot"));
        let output = self.image_path(name);

        debug!(dot = self.dot_path.display().to_string(), input = input.display().to_string(); "Running Graphviz");
        let result = Command::new(&self.dot_path)
            .arg(format!("-T{}", self.format))
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .output()
            .map_err(|source| WriterError::io(name, source))?;

        if !result.status.success() {
            return Err(WriterError::Graphviz {
                name: name.to_string(),
                detail: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        info!(image = output.display().to_string(); "Graphviz produced image");
        Ok(())
    }
}

/// Writer submitting the document to a remote chart-rendering service.
///
/// The persisted text is stripped of comment lines (they upset the
/// service's query parsing), submitted over HTTP, and the returned image
/// bytes are written next to the text.
#[derive(Debug, Clone)]
pub struct RemoteChartWriter {
    out_dir: PathBuf,
    endpoint: String,
}

impl RemoteChartWriter {
    /// Historic default; kept as a placeholder, override it with
    /// [`with_endpoint`](Self::with_endpoint) for a live service.
    pub const DEFAULT_ENDPOINT: &'static str = "https://chart.googleapis.com/chart";

    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        RemoteChartWriter {
            out_dir: out_dir.into(),
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl DotWriter for RemoteChartWriter {
    fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn image_path(&self, name: &str) -> PathBuf {
        self.out_dir.join(format!("{name}.png"))
    }

    fn render(&self, name: &str) -> Result<(), WriterError> {
        let input = self.out_dir.join(format!("{name}.dot"));
        let dot = fs::read_to_string(&input).map_err(|source| WriterError::io(name, source))?;
        let dot = strip_comment_lines(&dot);

        debug!(endpoint = self.endpoint; "Submitting DOT to remote renderer");
        let response = reqwest::blocking::Client::new()
            .get(&self.endpoint)
            .query(&[("cht", "gv"), ("chl", dot.as_str())])
            .send()
            .map_err(|err| WriterError::Remote {
                name: name.to_string(),
                detail: err.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(WriterError::Remote {
                name: name.to_string(),
                detail: format!("HTTP {}", response.status()),
            });
        }

        let bytes = response.bytes().map_err(|err| WriterError::Remote {
            name: name.to_string(),
            detail: err.to_string(),
        })?;
        let output = self.image_path(name);
        fs::write(&output, &bytes).map_err(|source| WriterError::io(name, source))?;

        info!(image = output.display().to_string(); "Remote renderer produced image");
        Ok(())
    }
}

/// Drops `//` and `#` comment lines before upload; the document meaning
/// is unchanged.
fn strip_comment_lines(dot: &str) -> String {
    dot.lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("//") && !trimmed.starts_with('#')
        })
        .collect::<Vec<_>>()
        .join("\n")
}
