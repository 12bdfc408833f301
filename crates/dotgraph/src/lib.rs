//! dotgraph - build directed, hierarchically clustered graphs in memory
//! and turn them into images through Graphviz.
//!
//! The core model and the deterministic DOT serializer live in
//! [`dotgraph_core`] and are re-exported here. This crate adds the thin
//! I/O collaborators around them: persisting the generated text, running
//! the local `dot` binary or a remote chart service to rasterize it, and
//! resolving symbolic style names to raw attribute fragments.
//!
//! # Example
//!
//! ```
//! use dotgraph::{DotElement, DotGraph, StyleSheet};
//!
//! let styles = StyleSheet::default();
//!
//! let mut graph: DotGraph<&str> = DotGraph::new("simple test");
//! let digraph = graph.digraph_mut();
//! digraph.add_node("Car").set_label("My Car").set_comment("This is BMW");
//! digraph.add_node("Wheel").set_label("Its wheels");
//! digraph
//!     .add_association("Car", "Wheel")
//!     .set_label("4*")
//!     .set_options(styles.get("association-edge").unwrap_or_default());
//!
//! let dot = graph.render();
//! assert!(dot.contains("digraph G {"));
//! ```
//!
//! Producing an image then goes through a [`DotWriter`]:
//!
//! ```no_run
//! use dotgraph::{DotWriter, GraphvizWriter};
//!
//! # let dot = String::new();
//! let writer = GraphvizWriter::new("out");
//! let image = writer.to_image("simple", &dot)?;
//! # Ok::<(), dotgraph::WriterError>(())
//! ```

pub mod config;
pub mod styles;
pub mod writer;

pub use dotgraph_core::{entity, graph, identifier, render};

pub use dotgraph_core::{
    Association, Cluster, Digraph, Direction, DotElement, DotGraph, Id, Node, Theme,
};

pub use config::WriterConfig;
pub use styles::StyleSheet;
pub use writer::{DotWriter, GraphvizWriter, RemoteChartWriter, WriterError};
