//! End-to-end scenarios for the public graph-building API
//!
//! These exercise complete build-then-render flows through the crate's
//! public surface only.

use dotgraph_core::{Direction, DotElement, DotGraph};

#[test]
fn test_simple_graph() {
    let mut graph: DotGraph<&str> = DotGraph::new("simple test");

    let digraph = graph.digraph_mut();
    digraph
        .add_node("Car")
        .set_label("My Car")
        .set_comment("This is BMW");
    digraph
        .add_node("Wheel")
        .set_label("Its wheels")
        .set_comment("The wheels of my car");
    digraph
        .add_association("Car", "Wheel")
        .set_label("4*")
        .set_comment("There are 4 wheels");

    let car = digraph.add_node("Car").id().to_string();
    let wheel = digraph.add_node("Wheel").id().to_string();

    let dot = graph.render();

    assert!(dot.starts_with("# Diagram simple test\n"), "got: {dot}");
    assert!(dot.contains("digraph G {"));
    assert!(dot.contains("label=\"simple test\""));
    assert!(dot.contains(&format!("{car} [label=\"My Car\"]")));
    assert!(dot.contains(&format!("{wheel} [label=\"Its wheels\"]")));
    assert!(dot.contains("// There are 4 wheels"));
    assert!(dot.contains(&format!("{car} -> {wheel} [label=\"4*\"];")));
}

#[test]
fn test_unregistered_endpoints_leave_no_trace() {
    let mut graph: DotGraph<&str> = DotGraph::new("preload test");

    let digraph = graph.digraph_mut();
    digraph.add_node("Car").set_label("My Car");
    digraph.add_node("Wheel").set_label("Its wheels");
    digraph
        .add_existing_association(&"Car", &"Wheel")
        .expect("both endpoints registered")
        .set_label("4*");

    // None of these may register anything or add an association.
    assert!(digraph.add_existing_association(&"Car", &"Boat").is_none());
    assert!(digraph.add_existing_association(&"Plane", &"Car").is_none());
    assert!(digraph.add_existing_association(&"Plane", &"Boat").is_none());

    let dot = graph.render();

    assert!(dot.contains("label=\"4*\""));
    assert!(!dot.contains("Plane"));
    assert!(!dot.contains("Boat"));
    // No id slot was consumed either: only Car and Wheel exist, so the
    // counter stops at c1.
    assert!(!dot.contains("c2"));
}

#[test]
fn test_cluster_encloses_its_members() {
    let mut graph: DotGraph<&str> = DotGraph::new("clustering test");

    let digraph = graph.digraph_mut();
    let cluster = digraph.add_cluster("Brand");
    cluster.set_label("BMW brand").set_comment("my cluster");
    cluster
        .add_node("Car")
        .set_label("My Car")
        .set_comment("This is BMW");
    cluster.add_node("Wheel").set_label("Its wheels");
    cluster
        .add_association("Car", "Wheel")
        .set_label("4*")
        .set_comment("There are 4 wheels");
    let cluster_id = digraph.add_cluster("Brand").id().to_string();

    digraph.add_node("Customer").set_label("My Customer");
    digraph.add_association("Customer", "Car").set_label("buys");

    let dot = graph.render();

    let open = dot
        .find(&format!("subgraph cluster_{cluster_id} {{"))
        .expect("cluster block");
    let close = open + dot[open..].find("\n}").expect("cluster block closes");

    let block = &dot[open..close];
    assert!(block.contains("label = \"BMW brand\";"));
    assert!(block.contains("label=\"My Car\""));
    assert!(block.contains("label=\"Its wheels\""));
    assert!(block.contains("label=\"4*\""));

    // Customer and its edge stay at the root level, outside the block.
    let customer = dot.find("label=\"My Customer\"").expect("customer node");
    let buys = dot.find("label=\"buys\"").expect("customer edge");
    assert!(customer > close || customer < open);
    assert!(buys > close || buys < open);
}

#[test]
fn test_unlabeled_node_vanishes_but_edges_survive() {
    let mut graph: DotGraph<&str> = DotGraph::new("dangling test");

    let digraph = graph.digraph_mut();
    digraph.add_node("Car").set_label("My Car");
    // Registers "Plane" as a bare endpoint with no label.
    digraph.add_association("Car", "Plane").set_label("-");
    let plane = digraph.add_node("Plane").id().to_string();

    let dot = graph.render();

    // The edge references an id that has no declaration anywhere in the
    // document. Inherited sharp edge, kept on purpose.
    assert!(dot.contains(&format!("-> {plane} [label=\"-\"];")));
    assert!(!dot.contains(&format!("\n\t{plane} [label=")));
}

#[test]
fn test_direction_and_theme_surface() {
    let mut graph: DotGraph<&str> = DotGraph::with_direction("t", Direction::TopBottom);
    graph.digraph_mut().add_node("a").set_label("a");

    let dot = graph.render();

    assert!(dot.contains("rankdir=TB;"));
    assert!(dot.contains("shape=record"));
}

#[test]
fn test_string_keys_and_tuple_keys() {
    // Key types only need Eq + Hash; the graph never inspects them.
    let mut graph: DotGraph<(u8, &str)> = DotGraph::new("typed keys");
    let digraph = graph.digraph_mut();
    digraph.add_node((1, "Car")).set_label("My Car");
    digraph.add_node((2, "Car")).set_label("Another Car");

    let dot = graph.render();

    assert!(dot.contains("label=\"My Car\""));
    assert!(dot.contains("label=\"Another Car\""));
}
