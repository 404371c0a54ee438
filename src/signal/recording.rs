use std::collections::BTreeMap;

use crate::foundation::core::{EdgeKey, Point, Rgba8};
use crate::graph::snapshot::GraphSnapshot;
use crate::signal::canvas::{ArrivalPulse, SignalCanvas, SignalVisual, VisualHandle};

/// One command issued to a [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CanvasCommand {
    /// A marker appeared.
    AddVisual(SignalVisual),
    /// A marker moved.
    MoveVisual {
        /// Marker handle.
        handle: VisualHandle,
        /// New position.
        position: Point,
    },
    /// A marker disappeared.
    RemoveVisual {
        /// Marker handle.
        handle: VisualHandle,
    },
    /// A node played its arrival effect.
    ArrivalPulse(ArrivalPulse),
    /// A node flashed.
    Flash {
        /// Node id.
        node_id: String,
        /// Flash color.
        color: Rgba8,
    },
}

/// Headless canvas over a [`GraphSnapshot`].
///
/// Keeps the live marker positions and a log of every command that had an effect. Moves and
/// removals of unknown handles are ignored and not logged.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    graph: GraphSnapshot,
    visuals: BTreeMap<VisualHandle, Point>,
    commands: Vec<CanvasCommand>,
}

impl RecordingCanvas {
    /// Canvas showing `graph`.
    pub fn new(graph: GraphSnapshot) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    /// Graph on screen.
    pub fn graph(&self) -> &GraphSnapshot {
        &self.graph
    }

    /// Replace the graph (a rebuild). Live markers are kept; the scheduler decides their fate.
    pub fn set_graph(&mut self, graph: GraphSnapshot) {
        self.graph = graph;
    }

    /// Markers currently drawn.
    pub fn visual_count(&self) -> usize {
        self.visuals.len()
    }

    /// Position of a drawn marker.
    pub fn visual_position(&self, handle: VisualHandle) -> Option<Point> {
        self.visuals.get(&handle).copied()
    }

    /// Command log, oldest first.
    pub fn commands(&self) -> &[CanvasCommand] {
        &self.commands
    }

    /// Drain the command log.
    pub fn take_commands(&mut self) -> Vec<CanvasCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Arrival pulses in the log.
    pub fn arrival_pulses(&self) -> impl Iterator<Item = &ArrivalPulse> {
        self.commands.iter().filter_map(|c| match c {
            CanvasCommand::ArrivalPulse(p) => Some(p),
            _ => None,
        })
    }
}

impl SignalCanvas for RecordingCanvas {
    fn node_anchor(&self, node_id: &str) -> Option<Point> {
        self.graph.anchor(node_id)
    }

    fn visible_edge(&self, a: &str, b: &str) -> Option<EdgeKey> {
        self.graph.resolve_edge(a, b).cloned()
    }

    fn add_visual(&mut self, visual: &SignalVisual) {
        self.visuals.insert(visual.handle, visual.position);
        self.commands.push(CanvasCommand::AddVisual(visual.clone()));
    }

    fn move_visual(&mut self, handle: VisualHandle, position: Point) {
        let Some(slot) = self.visuals.get_mut(&handle) else {
            return;
        };
        *slot = position;
        self.commands
            .push(CanvasCommand::MoveVisual { handle, position });
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        if self.visuals.remove(&handle).is_some() {
            self.commands.push(CanvasCommand::RemoveVisual { handle });
        }
    }

    fn trigger_arrival_pulse(&mut self, pulse: &ArrivalPulse) {
        self.commands.push(CanvasCommand::ArrivalPulse(pulse.clone()));
    }

    fn trigger_flash(&mut self, node_id: &str, color: Rgba8) {
        self.commands.push(CanvasCommand::Flash {
            node_id: node_id.to_owned(),
            color,
        });
    }
}
