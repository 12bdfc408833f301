//! DOT text assembly: wrapping, label composition, and the document
//! fragments emitted around the graph body.
//!
//! Everything here is pure string building. The fragment builders encode
//! the exact shape of the emitted DOT statements; the entity tree in
//! [`crate::entity`] decides which fragments appear and in what order.

use serde::Deserialize;

use crate::{graph::Direction, identifier::Id};

/// Line-break marker inserted by [`wrap`] (DOT left-justified newline).
pub const LINE_BREAK: &str = "\\l";

/// Separator joining label cells into a multi-line record label.
const CELL_SEPARATOR: &str = "\\n ";

const OPEN_STEREOTYPE: &str = "\\<\\<";
const CLOSE_STEREOTYPE: &str = "\\>\\>";

/// Immutable style table bound into a [`DotGraph`] at construction.
///
/// Carries the default-style directives emitted once at the document
/// header (graph title font, node appearance, edge label font) and the
/// column width used to wrap node labels. Never read from ambient global
/// state; construct one and hand it to
/// [`DotGraph::with_theme`](crate::DotGraph::with_theme).
///
/// [`DotGraph`]: crate::DotGraph
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Font of the document title.
    pub graph_font: String,
    pub graph_font_size: u32,
    /// Font of node labels.
    pub node_font: String,
    pub node_font_size: u32,
    /// Default node shape; `record` produces the boxed multi-line labels.
    pub node_shape: String,
    /// Font of edge labels.
    pub edge_font: String,
    pub edge_font_size: u32,
    /// Column width at which node labels are wrapped.
    pub wrap_width: usize,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            graph_font: "Verdana".to_string(),
            graph_font_size: 12,
            node_font: "Verdana".to_string(),
            node_font_size: 9,
            node_shape: "record".to_string(),
            edge_font: "Verdana".to_string(),
            edge_font_size: 9,
            wrap_width: 20,
        }
    }
}

/// Inserts [`LINE_BREAK`] markers into `text` so no line run grows far
/// beyond `width` columns.
///
/// The input is split into alternating runs of whitespace and
/// non-whitespace; a break is inserted before the next run once the
/// current line has exceeded `width`. This is a length-triggered break,
/// not a minimal-raggedness wrap: no character of the input is ever
/// dropped or reordered, so removing every marker reproduces the input
/// exactly.
///
/// # Example
///
/// ```
/// use dotgraph_core::render::{LINE_BREAK, wrap};
///
/// let wrapped = wrap("a label that is far too long for one line", 20);
/// assert_eq!(wrapped.replace(LINE_BREAK, ""), "a label that is far too long for one line");
/// ```
pub fn wrap(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut line_len = 0;
    for token in tokenize(text) {
        if line_len > width {
            line_len = 0;
            out.push_str(LINE_BREAK);
        }
        out.push_str(token);
        line_len += token.chars().count();
    }
    out
}

/// Joins label cells with the DOT cell separator, building a multi-line
/// record label from a label and its stereotypes.
pub fn to_lines<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            out.push_str(CELL_SEPARATOR);
        }
        out.push_str(cell.as_ref());
    }
    out
}

/// Wraps `text` in the escaped stereotype guillemets, `\<\<text\>\>`.
pub fn stereotype(text: &str) -> String {
    format!("{OPEN_STEREOTYPE}{text}{CLOSE_STEREOTYPE}")
}

/// Splits text into alternating whitespace and non-whitespace runs,
/// discarding nothing.
fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}

struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first_is_ws = self.rest.chars().next()?.is_whitespace();
        let split = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != first_is_ws)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (token, rest) = self.rest.split_at(split);
        self.rest = rest;
        Some(token)
    }
}

// =============================================================================
// Document fragments
// =============================================================================

/// Document header: a `#` comment carrying the title, the `digraph G {`
/// opener, the optional `rankdir` hint, and the three default-style
/// directives (graph title, edge defaults, node defaults).
pub(crate) fn open_graph(title: &str, direction: Option<Direction>, theme: &Theme) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Diagram {title}\n"));
    out.push_str("digraph G {");
    if let Some(direction) = direction {
        out.push_str(&format!("\n\trankdir={direction};"));
    }
    out.push_str(&format!(
        "\n\tgraph [labelloc=top,label=\"{title}\",fontname=\"{}\",fontsize={}];",
        theme.graph_font, theme.graph_font_size
    ));
    out.push_str(&format!(
        "\n\tedge [fontname=\"{0}\",fontsize={1},labelfontname=\"{0}\",labelfontsize={1}];",
        theme.edge_font, theme.edge_font_size
    ));
    out.push_str(&format!(
        "\n\tnode [fontname=\"{}\",fontsize={},shape={}];",
        theme.node_font, theme.node_font_size, theme.node_shape
    ));
    out
}

pub(crate) fn close_graph() -> &'static str {
    "\n}\n"
}

/// A node declaration with its (already wrapped) label and optional raw
/// attribute fragment.
pub(crate) fn node_decl(id: Id, label: &str, options: Option<&str>) -> String {
    match options {
        Some(options) => format!("\n\t{id} [label=\"{label}\", {options}]"),
        None => format!("\n\t{id} [label=\"{label}\"]"),
    }
}

/// A `//` comment line preceding a node declaration.
pub(crate) fn node_comment(comment: &str) -> String {
    format!("\n//{comment}")
}

/// A `//` comment line preceding an edge statement.
pub(crate) fn edge_comment(comment: &str) -> String {
    format!("\n\t// {comment}")
}

/// A directed edge statement. The bracketed attribute list carries the
/// label and the raw options fragment, and is omitted entirely when both
/// are absent.
pub(crate) fn edge_stmt(
    source: Id,
    target: Id,
    label: Option<&str>,
    options: Option<&str>,
) -> String {
    let mut attrs = Vec::new();
    if let Some(label) = label {
        attrs.push(format!("label=\"{label}\""));
    }
    if let Some(options) = options {
        attrs.push(options.to_string());
    }
    if attrs.is_empty() {
        format!("\n\t{source} -> {target};")
    } else {
        format!("\n\t{source} -> {target} [{}];", attrs.join(", "))
    }
}

pub(crate) fn open_cluster(id: Id) -> String {
    format!("\nsubgraph cluster_{id} {{")
}

pub(crate) fn cluster_label(content: &str) -> String {
    format!("\nlabel = \"{content}\";")
}

pub(crate) fn close_cluster() -> &'static str {
    "\n}"
}
