use super::*;

fn sample() -> GraphSnapshot {
    GraphSnapshot::from_json_str(
        r#"{
            "nodes": [
                { "id": "a", "x": 0, "y": 0 },
                { "id": " b ", "x": 100, "y": 0 },
                { "id": "c", "x": 100, "y": 100 }
            ],
            "edges": [
                ["a", "b", "pubsub"],
                { "src": "c", "dst": "b", "kind": "request" },
                ["a", "ghost"]
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn edges_with_missing_endpoints_are_not_visible() {
    let g = sample();
    assert_eq!(g.edges().len(), 3);
    assert_eq!(g.visible_edges().len(), 2);
    assert!(!g.visible_edges().contains(&EdgeKey::new("a", "ghost")));
}

#[test]
fn ids_are_trimmed_and_anchors_looked_up() {
    let g = sample();
    assert!(g.contains("b"));
    assert_eq!(g.anchor(" b"), Some(Point::new(100.0, 0.0)));
    assert_eq!(g.anchor("zzz"), None);
    assert_eq!(g.node_ids().collect::<Vec<_>>(), vec!["a", "b", "c"]);
}

#[test]
fn resolve_edge_checks_both_orientations() {
    let g = sample();
    assert_eq!(g.resolve_edge("b", "c"), Some(&EdgeKey::new("c", "b")));
    assert_eq!(g.resolve_edge("a", "b"), Some(&EdgeKey::new("a", "b")));
    assert_eq!(g.resolve_edge("a", "c"), None);
    assert_eq!(g.resolve_edge("", "c"), None);
}

#[test]
fn edge_kinds_are_an_open_set() {
    let g = sample();
    assert_eq!(g.edge_kind(&EdgeKey::new("a", "b")), Some(&EdgeKind::PubSub));
    assert_eq!(
        g.edge_kind(&EdgeKey::new("c", "b")),
        Some(&EdgeKind::Request)
    );
    assert_eq!(
        g.edge_kind(&EdgeKey::new("a", "ghost")),
        Some(&EdgeKind::Unspecified)
    );
    assert_eq!(
        EdgeKind::from("telemetry".to_string()),
        EdgeKind::Other("telemetry".to_string())
    );
}

#[test]
fn edge_kind_labels_are_trimmed() {
    assert_eq!(EdgeKind::from(" pubsub ".to_string()), EdgeKind::PubSub);
    let rpc = EdgeKind::from(" rpc\t".to_string());
    assert_eq!(rpc, EdgeKind::Other("rpc".to_string()));
    assert_eq!(rpc.to_string(), "rpc");

    let g = GraphSnapshot::from_json_str(
        r#"{ "nodes": ["a", "b"], "edges": [["a", "b", "  rpc  "]] }"#,
    )
    .unwrap();
    assert_eq!(
        g.edge_kind(&EdgeKey::new("a", "b")),
        Some(&EdgeKind::Other("rpc".to_string()))
    );
}

#[test]
fn nodes_without_coordinates_get_grid_slots() {
    let g = GraphSnapshot::from_json_str(r#"{ "nodes": ["p", "q", "r", "s"] }"#).unwrap();
    assert_eq!(g.anchor("p"), Some(Point::new(90.0, 45.0)));
    assert_eq!(g.anchor("q"), Some(Point::new(350.0, 45.0)));
    assert_eq!(g.anchor("s"), Some(Point::new(90.0, 195.0)));
}

#[test]
fn duplicate_and_empty_ids_are_dropped() {
    let g = GraphSnapshot::new(
        vec![
            GraphNode {
                id: "a".into(),
                anchor: Point::new(1.0, 1.0),
            },
            GraphNode {
                id: "a".into(),
                anchor: Point::new(9.0, 9.0),
            },
            GraphNode {
                id: "   ".into(),
                anchor: Point::ZERO,
            },
        ],
        vec![],
    );
    assert_eq!(g.nodes().len(), 1);
    assert_eq!(g.anchor("a"), Some(Point::new(1.0, 1.0)));
}

#[test]
fn malformed_payloads_name_the_offending_entry() {
    let err = GraphSnapshot::from_json_str(r#"{ "nodes": ["a"], "edges": [["a"]] }"#).unwrap_err();
    assert!(err.to_string().contains("graph.edges[0]"), "{err}");

    let err = GraphSnapshot::from_json_str(r#"{ "nodes": [{ "x": 1 }] }"#).unwrap_err();
    assert!(err.to_string().contains("graph.nodes[0]"), "{err}");

    let err = GraphSnapshot::from_json_str(r#"{ "nodes": [{ "id": "a", "x": "left", "y": 0 }] }"#)
        .unwrap_err();
    assert!(err.to_string().contains("graph.nodes[0].x"), "{err}");

    assert!(matches!(
        GraphSnapshot::from_json_str("not json"),
        Err(TrailError::Serde(_))
    ));
}
