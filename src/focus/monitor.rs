/// Sentinel state for a node with no ongoing activity.
pub const STATE_INACTIVE: &str = "INACTIVE";
/// A span is running on the node.
pub const STATE_RUNNING: &str = "RUNNING";
/// The node is running but reported errors or a stuck span.
pub const STATE_DEGRADED: &str = "DEGRADED";
/// The node crashed.
pub const STATE_FATAL: &str = "FATAL";

/// Per-node activity record supplied by the monitor.
///
/// Only the `state` text matters here; its vocabulary is owned upstream. Deserializes from
/// either `{"state": "RUNNING"}` or the bare string `"RUNNING"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "MonitorStatusRepr")]
pub struct MonitorStatus {
    /// Raw state label.
    pub state: String,
}

impl MonitorStatus {
    /// Status with the given label.
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
        }
    }

    /// Active iff the trimmed, upper-cased label is non-empty and not `INACTIVE`.
    pub fn is_active(&self) -> bool {
        let text = self.state.trim().to_uppercase();
        !text.is_empty() && text != STATE_INACTIVE
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum MonitorStatusRepr {
    Label(String),
    Record {
        #[serde(default)]
        state: Option<String>,
    },
}

impl From<MonitorStatusRepr> for MonitorStatus {
    fn from(repr: MonitorStatusRepr) -> Self {
        match repr {
            MonitorStatusRepr::Label(state) => Self { state },
            MonitorStatusRepr::Record { state } => Self {
                state: state.unwrap_or_default(),
            },
        }
    }
}
