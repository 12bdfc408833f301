//! Core graph model and DOT renderer for dotgraph.
//!
//! This crate builds an in-memory model of a directed, hierarchically
//! clustered graph (nodes, nested clusters, labeled directed edges) and
//! serializes it deterministically into the Graphviz DOT language. Layout
//! and rasterization are entirely the job of external tools; this crate
//! only produces text.
//!
//! A graph and its containers share one identity registry through a
//! non-`Sync` handle: build the model from a single thread, then render
//! as often as needed. Rendering never mutates.
//!
//! # Architecture
//!
//! - [`identifier`]: the per-graph registry mapping arbitrary application
//!   keys to stable generated ids
//! - [`entity`]: the containment tree (nodes, clusters) and the directed
//!   associations between registered elements
//! - [`graph`]: the [`DotGraph`] facade owning the registry, the root
//!   digraph, and the render theme
//! - [`render`]: text wrapping, label composition, and the DOT document
//!   fragments
//!
//! # Example
//!
//! ```
//! use dotgraph_core::{DotElement, DotGraph};
//!
//! let mut graph: DotGraph<&str> = DotGraph::new("simple test");
//! let digraph = graph.digraph_mut();
//! digraph.add_node("Car").set_label("My Car").set_comment("This is BMW");
//! digraph.add_node("Wheel").set_label("Its wheels");
//! digraph
//!     .add_association("Car", "Wheel")
//!     .set_label("4*")
//!     .set_comment("There are 4 wheels");
//!
//! let dot = graph.render();
//! assert!(dot.contains("digraph G {"));
//! assert!(dot.contains("label=\"4*\""));
//! ```

pub mod entity;
pub mod graph;
pub mod identifier;
pub mod render;

pub use entity::{Association, Cluster, DotElement, Node};
pub use graph::{Digraph, Direction, DotGraph};
pub use identifier::Id;
pub use render::Theme;
