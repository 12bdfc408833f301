//! Named style fragments for UML-flavored DOT output.
//!
//! A [`StyleSheet`] maps symbolic style names to raw attribute-string
//! fragments. The fragments are opaque to the core: resolve a name here
//! and hand the fragment to `set_options` on a node, cluster, or
//! association. The built-in table covers the usual UML flavors; a TOML
//! document can override entries or add new ones.

use indexmap::IndexMap;

use crate::config::ConfigError;

/// Immutable name-to-fragment table, constructed once and threaded
/// through the code that needs it. Never ambient global state.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    entries: IndexMap<String, String>,
}

impl StyleSheet {
    /// Returns the raw attribute fragment for `name`, if known.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// All known style names, built-ins first, in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Parses a TOML table of `name = "fragment"` pairs layered over the
    /// built-in defaults: unknown names are added, known names replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `text` is not a flat string
    /// table.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let overrides: IndexMap<String, String> = toml::from_str(text)?;
        Ok(Self::default().with_overrides(overrides))
    }

    /// Layers `overrides` over this table.
    pub fn with_overrides(mut self, overrides: IndexMap<String, String>) -> Self {
        self.entries.extend(overrides);
        self
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        let entries = [
            ("class-node", "style=filled, fillcolor=lightyellow"),
            ("note-node", "shape=note, style=filled, fillcolor=cornsilk"),
            ("stub-node", "color=grey, fontcolor=grey"),
            ("collaboration-node", "shape=ellipse, style=dashed"),
            ("ellipsis-node", "shape=plaintext"),
            ("association-edge", "arrowhead=open"),
            ("instantiation-edge", "arrowhead=open, style=dashed"),
            ("implements-edge", "arrowhead=onormal, style=dashed"),
            ("extends-edge", "arrowhead=onormal"),
            ("note-edge", "arrowhead=none, style=dashed"),
            ("client-edge", "arrowhead=open, color=grey"),
        ]
        .into_iter()
        .map(|(name, fragment)| (name.to_string(), fragment.to_string()))
        .collect();
        StyleSheet { entries }
    }
}
