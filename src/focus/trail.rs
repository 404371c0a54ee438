use std::collections::{BTreeMap, BTreeSet};

use crate::focus::monitor::MonitorStatus;
use crate::focus::settings::{
    FocusSettings, clamp_inactive_edge_opacity, clamp_inactive_node_opacity,
};
use crate::foundation::core::{EdgeKey, normalize_id};
use crate::graph::diff::DiffResult;
use crate::graph::snapshot::GraphSnapshot;

/// Everything the focus computation looks at.
///
/// Collections are taken as given: ids are trimmed and empty ids dropped during computation, so
/// callers can pass raw UI state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrailFocusInput {
    /// Nodes currently on screen.
    pub visible_nodes: Vec<String>,
    /// Edges currently on screen, in the orientation they were added to the scene.
    pub visible_edges: Vec<EdgeKey>,
    /// Monitor record per node id.
    pub monitor_states: BTreeMap<String, MonitorStatus>,
    /// Nodes recently exercised by the followed trace.
    pub trace_nodes: Vec<String>,
    /// Edges recently exercised by the followed trace, in traversal direction.
    pub trace_edges: Vec<EdgeKey>,
    /// User selection.
    pub selected_node_ids: Vec<String>,
    /// Extra nodes kept in focus by the surrounding view (e.g. the subgraph owner).
    pub context_node_ids: Vec<String>,
}

impl TrailFocusInput {
    /// Input whose visible sets mirror `graph`. Edges with a missing endpoint are left out, as
    /// they never reach the scene.
    pub fn for_graph(graph: &GraphSnapshot) -> Self {
        Self {
            visible_nodes: graph.node_ids().map(str::to_owned).collect(),
            visible_edges: graph.visible_edges().iter().cloned().collect(),
            ..Self::default()
        }
    }

    /// Fold a snapshot diff into the trace sets: added/changed nodes and added edges count as
    /// recently exercised.
    pub fn merge_diff(&mut self, diff: &DiffResult) {
        self.trace_nodes
            .extend(diff.nodes_added.iter().chain(&diff.nodes_changed).cloned());
        self.trace_edges.extend(diff.edges_added.iter().cloned());
    }
}

/// Focus sets and total opacity maps over the visible graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrailFocusResult {
    /// Visible nodes considered relevant.
    pub focus_nodes: BTreeSet<String>,
    /// Visible edges considered relevant, in their visible orientation.
    pub focus_edges: BTreeSet<EdgeKey>,
    /// Opacity for every visible node.
    pub node_opacity: BTreeMap<String, f64>,
    /// Opacity for every visible edge.
    pub edge_opacity: BTreeMap<EdgeKey, f64>,
}

impl TrailFocusResult {
    /// Opacity of a node; elements that are not visible report `None`.
    pub fn node_opacity(&self, node_id: &str) -> Option<f64> {
        self.node_opacity.get(node_id.trim()).copied()
    }

    /// Opacity of an edge, resolved in either orientation.
    pub fn edge_opacity(&self, edge: &EdgeKey) -> Option<f64> {
        self.edge_opacity
            .get(edge)
            .or_else(|| self.edge_opacity.get(&edge.reversed()))
            .copied()
    }

    /// Serializable view (edge maps cannot use pairs as JSON object keys).
    pub fn to_report(&self) -> FocusReport {
        FocusReport {
            focus_nodes: self.focus_nodes.iter().cloned().collect(),
            focus_edges: self.focus_edges.iter().cloned().collect(),
            node_opacity: self.node_opacity.clone(),
            edge_opacity: self
                .edge_opacity
                .iter()
                .map(|(edge, &opacity)| EdgeOpacity {
                    src: edge.src.clone(),
                    dst: edge.dst.clone(),
                    opacity,
                })
                .collect(),
        }
    }
}

/// JSON-friendly rendition of a [`TrailFocusResult`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FocusReport {
    /// Sorted focus node ids.
    pub focus_nodes: Vec<String>,
    /// Sorted focus edges.
    pub focus_edges: Vec<EdgeKey>,
    /// Node opacity by id.
    pub node_opacity: BTreeMap<String, f64>,
    /// Edge opacity entries, sorted by edge.
    pub edge_opacity: Vec<EdgeOpacity>,
}

/// One edge opacity entry of a [`FocusReport`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EdgeOpacity {
    /// Source node id.
    pub src: String,
    /// Destination node id.
    pub dst: String,
    /// Opacity in `(0, 1]`.
    pub opacity: f64,
}

/// Resolve focus sets and opacity maps. Pure: identical inputs give identical results.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(
        nodes = input.visible_nodes.len(),
        edges = input.visible_edges.len(),
        enabled = settings.enabled
    )
)]
pub fn compute_trail_focus(input: &TrailFocusInput, settings: &FocusSettings) -> TrailFocusResult {
    let visible_nodes = normalize_ids(&input.visible_nodes);
    let visible_edges = normalize_edges(&input.visible_edges);
    let selected = normalize_ids(&input.selected_node_ids);

    let mut focus_nodes = BTreeSet::new();
    for (node_id, status) in &input.monitor_states {
        let Some(id) = normalize_id(node_id) else {
            continue;
        };
        if visible_nodes.contains(id) && status.is_active() {
            focus_nodes.insert(id.to_owned());
        }
    }
    for group in [&input.trace_nodes, &input.selected_node_ids, &input.context_node_ids] {
        focus_nodes.extend(
            normalize_ids(group)
                .into_iter()
                .filter(|id| visible_nodes.contains(id)),
        );
    }

    let mut focus_edges = BTreeSet::new();
    for raw in &input.trace_edges {
        let Some(edge) = raw.normalize() else {
            continue;
        };
        match edge.resolve_in(&visible_edges) {
            Some(visible) => {
                focus_edges.insert(visible.clone());
            }
            None => tracing::trace!(%edge, "trace edge not visible, dropped"),
        }
    }
    focus_edges.extend(
        visible_edges
            .iter()
            .filter(|e| selected.contains(&e.src) || selected.contains(&e.dst))
            .cloned(),
    );

    let (node_opacity, edge_opacity) = if settings.enabled {
        let node_dim = clamp_inactive_node_opacity(settings.inactive_node_opacity);
        let edge_dim = clamp_inactive_edge_opacity(settings.inactive_edge_opacity);
        (
            visible_nodes
                .iter()
                .map(|id| {
                    let o = if focus_nodes.contains(id) { 1.0 } else { node_dim };
                    (id.clone(), o)
                })
                .collect(),
            visible_edges
                .iter()
                .map(|e| {
                    let o = if focus_edges.contains(e) { 1.0 } else { edge_dim };
                    (e.clone(), o)
                })
                .collect(),
        )
    } else {
        (
            visible_nodes.iter().map(|id| (id.clone(), 1.0)).collect(),
            visible_edges.iter().map(|e| (e.clone(), 1.0)).collect(),
        )
    };

    TrailFocusResult {
        focus_nodes,
        focus_edges,
        node_opacity,
        edge_opacity,
    }
}

fn normalize_ids(ids: &[String]) -> BTreeSet<String> {
    ids.iter()
        .filter_map(|id| normalize_id(id))
        .map(str::to_owned)
        .collect()
}

fn normalize_edges(edges: &[EdgeKey]) -> BTreeSet<EdgeKey> {
    edges.iter().filter_map(EdgeKey::normalize).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/focus/trail.rs"]
mod tests;
