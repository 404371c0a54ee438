use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde_json::Value;

use crate::foundation::core::{EdgeKey, Point, normalize_id};
use crate::foundation::error::{TrailError, TrailResult};
use crate::foundation::lookup::edge_entry;

/// Width of a node card on the canvas, used for fallback placement.
pub const NODE_WIDTH: f64 = 180.0;
/// Height of a node card on the canvas, used for fallback placement.
pub const NODE_HEIGHT: f64 = 90.0;

const GRID_COLUMNS: usize = 3;
const GRID_GAP_X: f64 = 80.0;
const GRID_GAP_Y: f64 = 60.0;

/// Edge category. Open set: unknown labels are kept, trimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EdgeKind {
    /// Publish/subscribe topic edge.
    PubSub,
    /// Request/reply edge.
    Request,
    /// No kind given.
    #[default]
    Unspecified,
    /// Any other label.
    Other(String),
}

impl From<String> for EdgeKind {
    fn from(label: String) -> Self {
        match label.trim() {
            "" => Self::Unspecified,
            "pubsub" => Self::PubSub,
            "request" => Self::Request,
            _ => Self::Other(label.trim().to_owned()),
        }
    }
}

impl From<EdgeKind> for String {
    fn from(kind: EdgeKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PubSub => f.write_str("pubsub"),
            Self::Request => f.write_str("request"),
            Self::Unspecified => Ok(()),
            Self::Other(label) => f.write_str(label),
        }
    }
}

/// Node with its center anchor in scene coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    /// Node id.
    pub id: String,
    /// Center of the node on the canvas.
    pub anchor: Point,
}

/// Directed, kinded edge.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
    /// Orientation the edge was added to the scene with.
    pub key: EdgeKey,
    /// Edge category.
    pub kind: EdgeKind,
}

/// Read-only view of the graph currently on screen.
///
/// Rebuilt by the host whenever the graph is rebuilt or filtered. Edges referencing a node that
/// is not part of the snapshot are kept in [`GraphSnapshot::edges`] but never become visible.
#[derive(Clone, Debug, Default)]
pub struct GraphSnapshot {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    index: HashMap<String, usize>,
    visible_edges: BTreeSet<EdgeKey>,
}

impl GraphSnapshot {
    /// Build a snapshot. Ids are trimmed, empty ids dropped; the first node with a given id wins.
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        let mut kept = Vec::with_capacity(nodes.len());
        let mut index = HashMap::with_capacity(nodes.len());
        for node in nodes {
            let Some(id) = normalize_id(&node.id) else {
                continue;
            };
            if index.contains_key(id) {
                tracing::debug!(id, "duplicate node id ignored");
                continue;
            }
            index.insert(id.to_owned(), kept.len());
            kept.push(GraphNode {
                id: id.to_owned(),
                anchor: node.anchor,
            });
        }

        let mut kept_edges = Vec::with_capacity(edges.len());
        let mut visible_edges = BTreeSet::new();
        for edge in edges {
            let Some(key) = edge.key.normalize() else {
                continue;
            };
            if index.contains_key(&key.src) && index.contains_key(&key.dst) {
                visible_edges.insert(key.clone());
            }
            kept_edges.push(GraphEdge {
                key,
                kind: edge.kind,
            });
        }

        Self {
            nodes: kept,
            edges: kept_edges,
            index,
            visible_edges,
        }
    }

    /// Parse a snapshot from JSON text (see [`GraphSnapshot::from_value`]).
    pub fn from_json_str(text: &str) -> TrailResult<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| TrailError::serde(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Parse `{"nodes": [{"id", "x", "y"}], "edges": [[src, dst, kind?] | {"src","dst","kind"}]}`.
    ///
    /// Nodes without coordinates are laid out on a three-column grid in input order.
    pub fn from_value(value: &Value) -> TrailResult<Self> {
        let Value::Object(map) = value else {
            return Err(TrailError::validation("graph: expected an object"));
        };

        let mut nodes = Vec::new();
        if let Some(raw_nodes) = map.get("nodes") {
            let Value::Array(items) = raw_nodes else {
                return Err(TrailError::validation("graph.nodes: expected an array"));
            };
            for (i, item) in items.iter().enumerate() {
                nodes.push(parse_node(item, i)?);
            }
        }

        let mut edges = Vec::new();
        if let Some(raw_edges) = map.get("edges") {
            let Value::Array(items) = raw_edges else {
                return Err(TrailError::validation("graph.edges: expected an array"));
            };
            for (i, item) in items.iter().enumerate() {
                let (src, dst, kind) = edge_entry(item, &format!("graph.edges[{i}]"))?;
                edges.push(GraphEdge {
                    key: EdgeKey { src, dst },
                    kind: kind.map(EdgeKind::from).unwrap_or_default(),
                });
            }
        }

        Ok(Self::new(nodes, edges))
    }

    /// Nodes in input order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// All edges, including ones whose endpoints are missing.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Node ids in input order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    /// Whether `node_id` is part of the snapshot.
    pub fn contains(&self, node_id: &str) -> bool {
        self.index.contains_key(node_id.trim())
    }

    /// Center anchor of a node.
    pub fn anchor(&self, node_id: &str) -> Option<Point> {
        self.index
            .get(node_id.trim())
            .map(|&i| self.nodes[i].anchor)
    }

    /// Edges with both endpoints present.
    pub fn visible_edges(&self) -> &BTreeSet<EdgeKey> {
        &self.visible_edges
    }

    /// Visible edge connecting `a` and `b`, in its registered orientation.
    pub fn resolve_edge(&self, a: &str, b: &str) -> Option<&EdgeKey> {
        EdgeKey::normalized(a, b)?.resolve_in(&self.visible_edges)
    }

    /// Kind of the first edge registered under `key`.
    pub fn edge_kind(&self, key: &EdgeKey) -> Option<&EdgeKind> {
        self.edges.iter().find(|e| &e.key == key).map(|e| &e.kind)
    }
}

fn parse_node(item: &Value, i: usize) -> TrailResult<GraphNode> {
    let ctx = format!("graph.nodes[{i}]");
    let (id, x, y) = match item {
        Value::String(id) => (id.clone(), None, None),
        Value::Object(map) => {
            let id = match map.get("id") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => {
                    return Err(TrailError::validation(format!(
                        "{ctx}: node needs a string 'id'"
                    )));
                }
            };
            let coord = |key: &str| -> TrailResult<Option<f64>> {
                match map.get(key) {
                    None | Some(Value::Null) => Ok(None),
                    Some(v) => v.as_f64().filter(|f| f.is_finite()).map(Some).ok_or_else(|| {
                        TrailError::validation(format!("{ctx}.{key}: expected a finite number"))
                    }),
                }
            };
            (id, coord("x")?, coord("y")?)
        }
        other => {
            return Err(TrailError::validation(format!(
                "{ctx}: expected a node object or id, got {other}"
            )));
        }
    };

    let anchor = match (x, y) {
        (Some(x), Some(y)) => Point::new(x, y),
        _ => grid_anchor(i),
    };
    Ok(GraphNode { id, anchor })
}

/// Fallback placement: center of the `i`-th cell of a three-column grid.
pub(crate) fn grid_anchor(i: usize) -> Point {
    let col = (i % GRID_COLUMNS) as f64;
    let row = (i / GRID_COLUMNS) as f64;
    Point::new(
        col * (NODE_WIDTH + GRID_GAP_X) + NODE_WIDTH / 2.0,
        row * (NODE_HEIGHT + GRID_GAP_Y) + NODE_HEIGHT / 2.0,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/graph/snapshot.rs"]
mod tests;
