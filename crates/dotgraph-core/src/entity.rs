//! The entity hierarchy: nodes, nested clusters, and the directed
//! associations between registered elements.
//!
//! Every container variant composes the same [`Scope`] helper, which owns
//! the child map, the association map, the display attributes, and a
//! handle to the graph-wide registry. The variants form a closed set
//! ({[`Node`], [`Cluster`], root digraph}) sharing one capability trait,
//! [`DotElement`], instead of a common base class.
//!
//! Mutation follows lookup-or-create semantics throughout: a child map
//! never holds two entries for the same id, and an association is
//! identified solely by its ordered endpoint pair. There is no deletion;
//! the model is build-once, render-many.

use std::{fmt, hash::Hash, rc::Rc};

use indexmap::IndexMap;

use crate::{
    identifier::{Id, SharedRegistry},
    render::{self, Theme},
};

/// A directed, labeled edge between two registered graph elements.
///
/// Identity and equality are defined solely by the ordered `(source,
/// target)` pair; label, comment, and options are display attributes.
#[derive(Debug, Clone)]
pub struct Association {
    source: Id,
    target: Id,
    label: Option<String>,
    comment: Option<String>,
    options: Option<String>,
}

impl Association {
    fn new(source: Id, target: Id) -> Self {
        Association {
            source,
            target,
            label: None,
            comment: None,
            options: None,
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn options(&self) -> Option<&str> {
        self.options.as_deref()
    }

    /// Sets the edge label. An empty label is ignored, so the attribute
    /// list never carries `label=""`.
    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        let label = label.into();
        if !label.is_empty() {
            self.label = Some(label);
        }
        self
    }

    /// Sets the comment emitted as a `//` line before the edge statement.
    pub fn set_comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the raw attribute fragment appended verbatim to the edge's
    /// attribute list.
    pub fn set_options(&mut self, options: impl Into<String>) -> &mut Self {
        self.options = Some(options.into());
        self
    }

    /// Renders the optional comment line and the edge statement.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(comment) = &self.comment {
            out.push_str(&render::edge_comment(comment));
        }
        out.push_str(&render::edge_stmt(
            self.source,
            self.target,
            self.label.as_deref(),
            self.options.as_deref(),
        ));
        out
    }
}

impl PartialEq for Association {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.target == other.target
    }
}

impl Eq for Association {}

impl Hash for Association {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.target.hash(state);
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Association from {} to {}", self.source, self.target)
    }
}

/// Shared containment storage composed into every container variant.
///
/// Holds the display attributes, the direct children keyed by id, the
/// outgoing associations keyed by endpoint pair, and the handle to the
/// graph-wide [`Registry`](crate::identifier::Registry).
#[derive(Debug)]
pub struct Scope<K> {
    registry: SharedRegistry<K>,
    label: Option<String>,
    comment: Option<String>,
    options: Option<String>,
    stereotypes: Vec<String>,
    children: IndexMap<Id, Entity<K>>,
    associations: IndexMap<(Id, Id), Association>,
}

impl<K> Scope<K>
where
    K: Eq + Hash,
{
    fn new(registry: SharedRegistry<K>) -> Self {
        Scope {
            registry,
            label: None,
            comment: None,
            options: None,
            stereotypes: Vec::new(),
            children: IndexMap::new(),
            associations: IndexMap::new(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn options(&self) -> Option<&str> {
        self.options.as_deref()
    }

    /// Stereotype tags in insertion order, undecorated.
    pub fn stereotypes(&self) -> &[String] {
        &self.stereotypes
    }

    /// Direct children of this scope, in insertion order.
    pub fn children(&self) -> impl Iterator<Item = &Entity<K>> {
        self.children.values()
    }

    /// Associations added to this scope, in insertion order.
    pub fn associations(&self) -> impl Iterator<Item = &Association> {
        self.associations.values()
    }

    fn add_node(&mut self, key: K) -> &mut Node<K> {
        let id = self.registry.borrow_mut().register(key);
        let registry = Rc::clone(&self.registry);
        match self
            .children
            .entry(id)
            .or_insert_with(|| Entity::Node(Node::new(registry, id)))
        {
            Entity::Node(node) => node,
            Entity::Cluster(_) => panic!("id {id} was already added as a cluster in this scope"),
        }
    }

    fn add_cluster(&mut self, key: K) -> &mut Cluster<K> {
        let id = self.registry.borrow_mut().register(key);
        let registry = Rc::clone(&self.registry);
        match self
            .children
            .entry(id)
            .or_insert_with(|| Entity::Cluster(Cluster::new(registry, id)))
        {
            Entity::Cluster(cluster) => cluster,
            Entity::Node(_) => panic!("id {id} was already added as a node in this scope"),
        }
    }

    fn add_possible_node(&mut self, key: &K) -> Option<&mut Node<K>> {
        let id = self.registry.borrow().lookup(key)?;
        match self.children.get_mut(&id) {
            Some(Entity::Node(node)) => Some(node),
            _ => None,
        }
    }

    fn add_association(&mut self, source: K, target: K) -> &mut Association {
        let (source, target) = {
            let mut registry = self.registry.borrow_mut();
            (registry.register(source), registry.register(target))
        };
        self.associations
            .entry((source, target))
            .or_insert_with(|| Association::new(source, target))
    }

    fn add_existing_association(&mut self, source: &K, target: &K) -> Option<&mut Association> {
        let (source, target) = {
            let registry = self.registry.borrow();
            match (registry.lookup(source), registry.lookup(target)) {
                (Some(source), Some(target)) => (source, target),
                _ => return None,
            }
        };
        Some(
            self.associations
                .entry((source, target))
                .or_insert_with(|| Association::new(source, target)),
        )
    }

    fn add_stereotype(&mut self, stereotype: String) {
        if !self.stereotypes.contains(&stereotype) {
            self.stereotypes.push(stereotype);
        }
    }

    /// Label cells for a record label: the label (if set) followed by the
    /// decorated stereotypes.
    fn label_cells(&self) -> Vec<String> {
        let mut cells = Vec::new();
        if let Some(label) = &self.label {
            cells.push(label.clone());
        }
        cells.extend(self.stereotypes.iter().map(|s| render::stereotype(s)));
        cells
    }

    /// Renders the direct children sorted by type-qualified display form,
    /// with the id as tie-break, so the output text is identical for a
    /// given final graph state regardless of mutation order.
    pub(crate) fn render_children(&self, out: &mut String, theme: &Theme) {
        let mut children: Vec<&Entity<K>> = self.children.values().collect();
        children.sort_by_key(|child| (child.to_string(), child.id()));
        for child in children {
            out.push_str(&child.render(theme));
        }
    }

    pub(crate) fn render_associations(&self, out: &mut String) {
        for association in self.associations.values() {
            out.push_str(&association.render());
        }
    }
}

/// One shared capability interface over the closed set of container
/// variants: mutation of the containment tree, attribute setters, and
/// rendering.
///
/// The mutators consult the graph-wide registry and follow
/// lookup-or-create semantics; the setters return the element itself for
/// chained configuration. Implementors only supply the scope accessors
/// and [`render`](DotElement::render).
pub trait DotElement<K>
where
    K: Eq + Hash,
{
    /// The containment scope composed into this element.
    fn scope(&self) -> &Scope<K>;

    fn scope_mut(&mut self) -> &mut Scope<K>;

    /// Renders this element and everything below it into DOT text.
    fn render(&self, theme: &Theme) -> String;

    /// Registers `key` (or reuses its id) and returns the node child for
    /// that id in this scope, creating it on first reference.
    ///
    /// # Panics
    ///
    /// Panics if the id was already added to this scope as a cluster.
    fn add_node(&mut self, key: K) -> &mut Node<K> {
        self.scope_mut().add_node(key)
    }

    /// Registers `key` (or reuses its id) and returns the cluster child
    /// for that id in this scope, creating it on first reference.
    ///
    /// # Panics
    ///
    /// Panics if the id was already added to this scope as a node.
    fn add_cluster(&mut self, key: K) -> &mut Cluster<K> {
        self.scope_mut().add_cluster(key)
    }

    /// Returns the node child for `key` only if the key is registered and
    /// a node wrapper for it exists among this scope's direct children.
    /// Never registers and never creates.
    fn add_possible_node(&mut self, key: &K) -> Option<&mut Node<K>> {
        self.scope_mut().add_possible_node(key)
    }

    /// Registers both endpoints (materializing ids for new keys) and
    /// returns the association for the ordered pair, creating it on first
    /// reference in this scope.
    fn add_association<'a>(&'a mut self, source: K, target: K) -> &'a mut Association
    where
        K: 'a,
    {
        self.scope_mut().add_association(source, target)
    }

    /// Returns the association for the ordered pair only if both endpoint
    /// keys were previously registered anywhere in the tree. When either
    /// is unregistered, returns `None` with no side effect: nothing is
    /// registered and no association is added. Optional attributes are
    /// applied through the chained setters on the returned value.
    fn add_existing_association<'a>(
        &'a mut self,
        source: &K,
        target: &K,
    ) -> Option<&'a mut Association>
    where
        K: 'a,
    {
        self.scope_mut().add_existing_association(source, target)
    }

    /// Sets the display label. A node renders only once it has a label.
    fn set_label(&mut self, label: impl Into<String>) -> &mut Self
    where
        Self: Sized,
    {
        self.scope_mut().label = Some(label.into());
        self
    }

    /// Sets the comment emitted as a `//` line before the declaration.
    fn set_comment(&mut self, comment: impl Into<String>) -> &mut Self
    where
        Self: Sized,
    {
        self.scope_mut().comment = Some(comment.into());
        self
    }

    /// Sets the raw attribute fragment appended verbatim to the
    /// declaration. Fragments are opaque to the core; see the style-sheet
    /// resolver in the main crate for symbolic names.
    fn set_options(&mut self, options: impl Into<String>) -> &mut Self
    where
        Self: Sized,
    {
        self.scope_mut().options = Some(options.into());
        self
    }

    /// Accumulates a stereotype tag, deduplicated, rendered inside the
    /// decorative bracket pair after the label.
    fn add_stereotype(&mut self, stereotype: impl Into<String>) -> &mut Self
    where
        Self: Sized,
    {
        self.scope_mut().add_stereotype(stereotype.into());
        self
    }
}

/// A child of a container: either a leaf node or a nested cluster.
#[derive(Debug)]
pub enum Entity<K> {
    Node(Node<K>),
    Cluster(Cluster<K>),
}

impl<K> Entity<K>
where
    K: Eq + Hash,
{
    pub fn id(&self) -> Id {
        match self {
            Entity::Node(node) => node.id(),
            Entity::Cluster(cluster) => cluster.id(),
        }
    }

    pub fn render(&self, theme: &Theme) -> String {
        match self {
            Entity::Node(node) => node.render(theme),
            Entity::Cluster(cluster) => cluster.render(theme),
        }
    }
}

impl<K> fmt::Display for Entity<K> {
    /// Type-qualified display form, the primary render sort key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Node(node) => write!(f, "Node {}", node.id),
            Entity::Cluster(cluster) => write!(f, "Cluster {}", cluster.id),
        }
    }
}

/// A leaf entity, rendered as one record-shaped node declaration.
///
/// A node with no label renders as nothing at all, even though its id may
/// still appear as an edge endpoint elsewhere in the document. That
/// silent omission is inherited behavior, kept deliberately (and covered
/// by tests) rather than papered over.
#[derive(Debug)]
pub struct Node<K> {
    id: Id,
    scope: Scope<K>,
}

impl<K> Node<K>
where
    K: Eq + Hash,
{
    fn new(registry: SharedRegistry<K>, id: Id) -> Self {
        Node {
            id,
            scope: Scope::new(registry),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }
}

impl<K> DotElement<K> for Node<K>
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
        if self.scope.label.is_none() {
            return String::new();
        }
        let mut out = String::new();
        if let Some(comment) = &self.scope.comment {
            out.push_str(&render::node_comment(comment));
        }
        let content = render::to_lines(self.scope.label_cells());
        let wrapped = render::wrap(&content, theme.wrap_width);
        out.push_str(&render::node_decl(
            self.id,
            &wrapped,
            self.scope.options.as_deref(),
        ));
        self.scope.render_associations(&mut out);
        out
    }
}

/// A container entity, rendered as a named `subgraph cluster_<id>` block
/// grouping its children.
#[derive(Debug)]
pub struct Cluster<K> {
    id: Id,
    scope: Scope<K>,
}

impl<K> Cluster<K>
where
    K: Eq + Hash,
{
    fn new(registry: SharedRegistry<K>, id: Id) -> Self {
        Cluster {
            id,
            scope: Scope::new(registry),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }
}

impl<K> DotElement<K> for Cluster<K>
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
        out.push_str(&render::open_cluster(self.id));
        let cells = self.scope.label_cells();
        if !cells.is_empty() {
            out.push_str(&render::cluster_label(&render::to_lines(cells)));
        }
        self.scope.render_children(&mut out, theme);
        self.scope.render_associations(&mut out);
        out.push_str(render::close_cluster());
        out
    }
}

/// Constructor access for the root digraph, which lives in [`crate::graph`]
/// and seeds its scope label with the document title.
pub(crate) fn new_scope<K>(registry: SharedRegistry<K>, label: Option<String>) -> Scope<K>
where
    K: Eq + Hash,
{
    let mut scope = Scope::new(registry);
    scope.label = label;
    scope
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crate::identifier::Registry;

    use super::*;

    fn scope() -> Scope<&'static str> {
        Scope::new(Rc::new(RefCell::new(Registry::new())))
    }

    #[test]
    fn test_add_node_is_lookup_or_create() {
        let mut scope = scope();

        let id = scope.add_node("Car").id();
        scope.add_node("Car").set_label("My Car");

        assert_eq!(scope.add_node("Car").id(), id);
        assert_eq!(scope.children().count(), 1);
        assert_eq!(scope.add_node("Car").scope().label(), Some("My Car"));
    }

    #[test]
    fn test_add_cluster_is_lookup_or_create() {
        let mut scope = scope();

        let id = scope.add_cluster("Brand").id();

        assert_eq!(scope.add_cluster("Brand").id(), id);
        assert_eq!(scope.children().count(), 1);
    }

    #[test]
    #[should_panic(expected = "already added as a cluster")]
    fn test_add_node_on_cluster_id_panics() {
        let mut scope = scope();
        scope.add_cluster("Brand");
        scope.add_node("Brand");
    }

    #[test]
    fn test_add_possible_node_requires_registration_and_local_child() {
        let registry = Rc::new(RefCell::new(Registry::new()));
        let mut outer: Scope<&str> = Scope::new(Rc::clone(&registry));
        let mut inner: Scope<&str> = Scope::new(Rc::clone(&registry));

        // Unregistered key: absent, and no registration happens.
        assert!(outer.add_possible_node(&"Car").is_none());
        assert_eq!(registry.borrow().len(), 0);

        // Registered in another scope: still absent here, lookup is local.
        inner.add_node("Car");
        assert!(outer.add_possible_node(&"Car").is_none());

        // Present locally: returned.
        outer.add_node("Car");
        assert!(outer.add_possible_node(&"Car").is_some());
    }

    #[test]
    fn test_add_association_registers_bare_endpoints() {
        let registry = Rc::new(RefCell::new(Registry::new()));
        let mut scope: Scope<&str> = Scope::new(Rc::clone(&registry));

        let association = scope.add_association("Car", "Wheel");
        let (source, target) = (association.source(), association.target());

        assert_ne!(source, target);
        assert_eq!(registry.borrow().len(), 2);
        // Endpoints are ids only; no child wrappers materialize.
        assert_eq!(scope.children().count(), 0);
    }

    #[test]
    fn test_association_identity_is_the_endpoint_pair() {
        let mut scope = scope();

        scope.add_association("Car", "Wheel").set_label("4*");
        let again = scope.add_association("Car", "Wheel");

        assert_eq!(again.label(), Some("4*"));
        assert_eq!(scope.associations().count(), 1);

        scope.add_association("Wheel", "Car");
        assert_eq!(scope.associations().count(), 2);
    }

    #[test]
    fn test_add_existing_association_has_no_side_effect_when_absent() {
        let registry = Rc::new(RefCell::new(Registry::new()));
        let mut scope: Scope<&str> = Scope::new(Rc::clone(&registry));
        scope.add_node("Car");

        assert!(scope.add_existing_association(&"Car", &"Boat").is_none());
        assert!(scope.add_existing_association(&"Plane", &"Car").is_none());
        assert!(scope.add_existing_association(&"Plane", &"Boat").is_none());

        assert_eq!(registry.borrow().len(), 1);
        assert_eq!(scope.associations().count(), 0);
    }

    #[test]
    fn test_add_existing_association_once_both_registered() {
        let mut scope = scope();
        scope.add_node("Car");
        scope.add_node("Wheel");

        let association = scope
            .add_existing_association(&"Car", &"Wheel")
            .expect("both endpoints registered");
        association.set_label("4*");

        assert_eq!(scope.associations().count(), 1);
    }

    #[test]
    fn test_node_without_label_renders_empty() {
        let mut scope = scope();
        scope.add_node("Car").set_comment("invisible");

        assert_eq!(scope.add_node("Car").render(&Theme::default()), "");
    }

    #[test]
    fn test_node_with_label_renders_declaration() {
        let mut scope = scope();
        let node = scope.add_node("Car");
        node.set_label("My Car").set_comment("This is BMW");
        let id = node.id().to_string();

        let rendered = scope.add_node("Car").render(&Theme::default());

        assert!(rendered.contains(&format!("{id} [label=\"My Car\"]")));
        assert!(rendered.contains("//This is BMW"));
    }

    #[test]
    fn test_node_label_joins_stereotypes_wrapped() {
        let mut scope = scope();
        let node = scope.add_node("Car");
        node.set_label("My Car").add_stereotype("vehicle");

        let rendered = scope.add_node("Car").render(&Theme::default());

        assert!(rendered.contains("My Car\\n \\<\\<vehicle\\>\\>"));
    }

    #[test]
    fn test_stereotypes_deduplicate() {
        let mut scope = scope();
        let node = scope.add_node("Car");
        node.add_stereotype("vehicle").add_stereotype("vehicle");

        assert_eq!(node.scope().stereotypes(), ["vehicle"]);
    }

    #[test]
    fn test_node_renders_its_own_associations_after_declaration() {
        let mut scope = scope();
        let node = scope.add_node("Car");
        node.set_label("My Car");
        node.add_association("Engine", "Piston").set_label("8*");

        let rendered = scope.add_node("Car").render(&Theme::default());
        let decl = rendered.find("label=\"My Car\"").expect("declaration");
        let edge = rendered.find("label=\"8*\"").expect("edge");

        assert!(decl < edge);
    }

    #[test]
    fn test_cluster_renders_named_block() {
        let mut scope = scope();
        let cluster = scope.add_cluster("Brand");
        cluster.set_label("BMW brand");
        cluster.add_node("Car").set_label("My Car");
        let id = cluster.id().to_string();

        let rendered = scope.add_cluster("Brand").render(&Theme::default());

        assert!(rendered.contains(&format!("subgraph cluster_{id} {{")));
        assert!(rendered.contains("label = \"BMW brand\";"));
        assert!(rendered.contains("label=\"My Car\""));
        assert!(rendered.trim_end().ends_with('}'));
    }

    #[test]
    fn test_cluster_without_label_has_no_label_line() {
        let mut scope = scope();
        scope.add_cluster("Brand");

        let rendered = scope.add_cluster("Brand").render(&Theme::default());

        assert!(!rendered.contains("label ="));
    }

    #[test]
    fn test_association_render_shapes() {
        let mut scope = scope();
        let association = scope.add_association("Car", "Wheel");
        let (source, target) = (association.source(), association.target());

        assert_eq!(association.render(), format!("\n\t{source} -> {target};"));

        association.set_comment("There are 4 wheels").set_label("4*");
        let rendered = scope.add_association("Car", "Wheel").render();

        assert!(rendered.contains("// There are 4 wheels"));
        assert!(rendered.contains(&format!("{source} -> {target} [label=\"4*\"];")));
    }

    #[test]
    fn test_association_empty_label_is_ignored() {
        let mut scope = scope();
        let association = scope.add_association("Car", "Wheel");
        association.set_label("");

        assert_eq!(association.label(), None);
        assert!(!association.render().contains("label"));
    }

    #[test]
    fn test_children_render_sorted_not_by_insertion() {
        let mut scope = scope();
        // Insert in an order where the cluster comes last; clusters sort
        // before nodes by display form.
        scope.add_node("Zed").set_label("zed");
        scope.add_cluster("Box");

        let mut out = String::new();
        scope.render_children(&mut out, &Theme::default());

        let cluster_at = out.find("subgraph").expect("cluster block");
        let node_at = out.find("label=\"zed\"").expect("node declaration");
        assert!(cluster_at < node_at);
    }
}
