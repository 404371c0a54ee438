use std::collections::BTreeSet;

use serde_json::Value;

use crate::foundation::core::EdgeKey;
use crate::foundation::error::{TrailError, TrailResult};
use crate::foundation::lookup::{edge_list, id_list};

/// Recently changed membership between two graph snapshots.
///
/// Produced upstream; the focus computer only reads it as extra trace membership
/// (see [`crate::TrailFocusInput::merge_diff`]).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DiffResult {
    /// Nodes present only in the newer snapshot.
    pub nodes_added: BTreeSet<String>,
    /// Nodes whose content changed.
    pub nodes_changed: BTreeSet<String>,
    /// Edges present only in the newer snapshot.
    pub edges_added: BTreeSet<EdgeKey>,
}

impl DiffResult {
    /// True when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.nodes_added.is_empty() && self.nodes_changed.is_empty() && self.edges_added.is_empty()
    }

    /// Parse a diff payload. Edge entries may carry a third `kind` element, which is ignored.
    pub fn from_value(value: &Value) -> TrailResult<Self> {
        let Value::Object(map) = value else {
            return Err(TrailError::validation("diff: expected an object"));
        };
        Ok(Self {
            nodes_added: id_list(map.get("nodes_added"), "diff.nodes_added")?
                .into_iter()
                .collect(),
            nodes_changed: id_list(map.get("nodes_changed"), "diff.nodes_changed")?
                .into_iter()
                .collect(),
            edges_added: edge_list(map.get("edges_added"), "diff.edges_added")?
                .into_iter()
                .collect(),
        })
    }
}
