//! The [`DotGraph`] facade and the root [`Digraph`].
//!
//! A `DotGraph` owns the single identity registry for the whole tree, the
//! root digraph, and the [`Theme`] bound at construction. Mutation goes
//! through the root (and whatever clusters and nodes hang off it);
//! rendering is a pure read-only traversal that may run any number of
//! times.

use std::{cell::RefCell, fmt, hash::Hash, rc::Rc};

use log::debug;

use crate::{
    entity::{self, DotElement, Scope},
    identifier::{Id, Registry, SharedRegistry},
    render::{self, Theme},
};

/// Layout direction hint for the whole document, emitted as the DOT
/// `rankdir` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftRight,
    RightLeft,
    TopBottom,
    BottomTop,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rankdir = match self {
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
            Direction::TopBottom => "TB",
            Direction::BottomTop => "BT",
        };
        write!(f, "{rankdir}")
    }
}

/// The root container of a graph. Exactly one per [`DotGraph`].
///
/// Carries the document title (doubling as the root label), the optional
/// layout direction hint, and the root-level containment scope.
#[derive(Debug)]
pub struct Digraph<K> {
    title: String,
    direction: Option<Direction>,
    scope: Scope<K>,
}

impl<K> Digraph<K>
where
    K: Eq + Hash,
{
    fn new(registry: SharedRegistry<K>, title: String, direction: Option<Direction>) -> Self {
        let scope = entity::new_scope(registry, Some(title.clone()));
        Digraph {
            title,
            direction,
            scope,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }
}

impl<K> DotElement<K> for Digraph<K>
where
    K: Eq + Hash,
{
    fn scope(&self) -> &Scope<K> {
        &self.scope
    }

    fn scope_mut(&mut self) -> &mut Scope<K> {
        &mut self.scope
    }

    fn render(&self, theme: &Theme) -> String {
        let mut out = String::new();
        let title = self.scope.label().unwrap_or(&self.title);
        out.push_str(&render::open_graph(title, self.direction, theme));
        self.scope.render_children(&mut out, theme);
        self.scope.render_associations(&mut out);
        out.push_str(render::close_graph());
        out
    }
}

/// Builds an in-memory directed graph and serializes it to DOT text.
///
/// The type parameter `K` is the caller's key type identifying graph
/// elements; it only needs a well-defined equality/hash contract and is
/// never interpreted beyond that.
///
/// Mutation is single-writer (see the crate docs); rendering is read-only
/// and deterministic: the same unmutated graph always renders to the same
/// text, regardless of the order the mutation calls were issued in.
#[derive(Debug)]
pub struct DotGraph<K> {
    registry: SharedRegistry<K>,
    root: Digraph<K>,
    theme: Theme,
}

impl<K> DotGraph<K>
where
    K: Eq + Hash,
{
    /// Creates a graph with the given document title and the default
    /// [`Theme`].
    pub fn new(title: impl Into<String>) -> Self {
        Self::build(title.into(), None, Theme::default())
    }

    /// Creates a graph with a layout direction hint.
    pub fn with_direction(title: impl Into<String>, direction: Direction) -> Self {
        Self::build(title.into(), Some(direction), Theme::default())
    }

    /// Creates a graph with an explicit style table.
    pub fn with_theme(title: impl Into<String>, theme: Theme) -> Self {
        Self::build(title.into(), None, theme)
    }

    fn build(title: String, direction: Option<Direction>, theme: Theme) -> Self {
        let registry = Rc::new(RefCell::new(Registry::new()));
        let root = Digraph::new(Rc::clone(&registry), title, direction);
        DotGraph {
            registry,
            root,
            theme,
        }
    }

    /// The root container, for building the tree.
    pub fn digraph_mut(&mut self) -> &mut Digraph<K> {
        &mut self.root
    }

    pub fn digraph(&self) -> &Digraph<K> {
        &self.root
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Registers `key` ahead of time (or returns its existing id) without
    /// creating any child entity, so later
    /// [`add_existing_association`](DotElement::add_existing_association)
    /// calls can resolve it.
    pub fn preload(&mut self, key: K) -> Id {
        self.registry.borrow_mut().register(key)
    }

    /// Renders the whole document. Read-only; safe to call repeatedly.
    pub fn render(&self) -> String {
        debug!(title = self.root.title(), elements = self.registry.borrow().len(); "Rendering DOT document");
        self.root.render(&self.theme)
    }
}
