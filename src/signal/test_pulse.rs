//! Source/target choice for the diagnostic pulse a user can fire from the overlay.

/// Nodes tried, in order, as the pulse source.
pub const PREFERRED_PULSE_SOURCES: [&str; 4] = [
    "system:app_ui",
    "system:runtime_bus",
    "system:core_center",
    "system:content_system",
];

/// Nodes tried, in order, as the pulse target.
pub const PREFERRED_PULSE_TARGETS: [&str; 2] = ["system:runtime_bus", "system:app_ui"];

/// Chosen endpoints of a diagnostic pulse.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PulsePick {
    /// Where the pulse starts.
    pub source: String,
    /// Where the pulse lands (may equal `source`).
    pub target: String,
}

impl PulsePick {
    /// Distinct node ids involved, source first.
    pub fn node_ids(&self) -> Vec<String> {
        if self.source == self.target {
            vec![self.source.clone()]
        } else {
            vec![self.source.clone(), self.target.clone()]
        }
    }
}

/// Pick a source and target among `node_ids`.
///
/// Well-known system nodes win; without them the pulse runs from the first node to the last.
/// When only the source is well known the pulse lands on the source itself. `None` for an empty
/// graph.
pub fn pick_pulse_nodes<S: AsRef<str>>(node_ids: &[S]) -> Option<PulsePick> {
    let first = node_ids.first()?.as_ref();
    let last = node_ids.last()?.as_ref();
    let find = |preferred: &[&'static str]| {
        preferred
            .iter()
            .copied()
            .find(|p| node_ids.iter().any(|id| id.as_ref() == *p))
    };

    let pick = match find(&PREFERRED_PULSE_SOURCES) {
        Some(source) => PulsePick {
            source: source.to_owned(),
            target: find(&PREFERRED_PULSE_TARGETS).unwrap_or(source).to_owned(),
        },
        None => PulsePick {
            source: first.to_owned(),
            target: last.to_owned(),
        },
    };
    Some(pick)
}
