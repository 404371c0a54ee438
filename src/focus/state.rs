use std::collections::BTreeMap;

use serde_json::Value;

use crate::focus::monitor::MonitorStatus;
use crate::focus::trail::TrailFocusInput;
use crate::foundation::core::EdgeKey;
use crate::foundation::error::{TrailError, TrailResult};
use crate::foundation::lookup::{edge_list, id_list};
use crate::graph::diff::DiffResult;

/// Focus-relevant UI state published by the host: monitor snapshot, followed trace, selection,
/// view context and an optional snapshot diff.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FocusState {
    /// Monitor record per node id.
    pub monitor_states: BTreeMap<String, MonitorStatus>,
    /// Trace nodes.
    pub trace_nodes: Vec<String>,
    /// Trace edges in traversal direction.
    pub trace_edges: Vec<EdgeKey>,
    /// Selected node ids.
    pub selected_node_ids: Vec<String>,
    /// Context node ids.
    pub context_node_ids: Vec<String>,
    /// Recently changed membership, folded in as trace.
    pub diff: Option<DiffResult>,
}

impl FocusState {
    /// Parse JSON text (see [`FocusState::from_value`]).
    pub fn from_json_str(text: &str) -> TrailResult<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| TrailError::serde(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Parse a state object. Every key is optional; `selected`/`context` are accepted as short
    /// spellings of `selected_node_ids`/`context_node_ids`.
    ///
    /// Shape errors (an edge that is not a pair, a monitor table that is not an object) fail here
    /// with the offending path in the message.
    pub fn from_value(value: &Value) -> TrailResult<Self> {
        let Value::Object(map) = value else {
            return Err(TrailError::validation("focus state: expected an object"));
        };

        let monitor_states = match map.get("monitor_states") {
            None | Some(Value::Null) => BTreeMap::new(),
            Some(Value::Object(entries)) => entries
                .iter()
                .map(|(id, raw)| {
                    serde_json::from_value::<MonitorStatus>(raw.clone())
                        .map(|status| (id.clone(), status))
                        .map_err(|e| {
                            TrailError::validation(format!("monitor_states.{id}: {e}"))
                        })
                })
                .collect::<TrailResult<_>>()?,
            Some(other) => {
                return Err(TrailError::validation(format!(
                    "monitor_states: expected an object, got {other}"
                )));
            }
        };

        let either = |long: &str, short: &str| map.get(long).or_else(|| map.get(short));

        let diff = match map.get("diff") {
            None | Some(Value::Null) => None,
            Some(v) => Some(DiffResult::from_value(v)?),
        };

        Ok(Self {
            monitor_states,
            trace_nodes: id_list(map.get("trace_nodes"), "trace_nodes")?,
            trace_edges: edge_list(map.get("trace_edges"), "trace_edges")?,
            selected_node_ids: id_list(either("selected_node_ids", "selected"), "selected")?,
            context_node_ids: id_list(either("context_node_ids", "context"), "context")?,
            diff,
        })
    }

    /// Copy this state into `input`, leaving its visible sets untouched.
    pub fn apply_to(&self, input: &mut TrailFocusInput) {
        input.monitor_states = self.monitor_states.clone();
        input.trace_nodes = self.trace_nodes.clone();
        input.trace_edges = self.trace_edges.clone();
        input.selected_node_ids = self.selected_node_ids.clone();
        input.context_node_ids = self.context_node_ids.clone();
        if let Some(diff) = &self.diff {
            input.merge_diff(diff);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/focus/state.rs"]
mod tests;
