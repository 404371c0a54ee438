use std::fmt;
use std::time::Duration;

use crate::foundation::core::{EdgeKey, Point, Rgba8};

/// Opaque id of a visual the scheduler asked the canvas to draw.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct VisualHandle(pub u64);

impl fmt::Display for VisualHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "visual#{}", self.0)
    }
}

/// Traveling marker handed to [`SignalCanvas::add_visual`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SignalVisual {
    /// Handle later used to move or remove the marker.
    pub handle: VisualHandle,
    /// Initial position (the source anchor).
    pub position: Point,
    /// Fill color.
    pub color: Rgba8,
    /// Marker radius.
    pub radius_px: f64,
    /// Marker opacity.
    pub alpha: f64,
    /// Edge kind label the signal represents.
    pub kind: String,
}

/// Arrival effect on a target node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArrivalPulse {
    /// Node that receives the pulse.
    pub node_id: String,
    /// Pulse color.
    pub color: Rgba8,
    /// Time at full strength.
    pub linger_ms: u64,
    /// Fade-out time.
    pub fade_ms: u64,
    /// Pulse radius.
    pub radius_px: f64,
    /// Pulse opacity.
    pub alpha: f64,
    /// Set when the pulse replaces travel because reduced motion is on.
    pub reduced_motion: bool,
}

impl ArrivalPulse {
    /// Linger as a duration.
    pub fn linger(&self) -> Duration {
        Duration::from_millis(self.linger_ms)
    }

    /// Fade as a duration.
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

/// Paint-layer contract the scheduler drives.
///
/// The scheduler never paints; it only queries node geometry and issues these commands.
/// Implementations must tolerate handles they do not know (already removed, scene rebuilt) by
/// ignoring them.
pub trait SignalCanvas {
    /// Center anchor of a node, or `None` if the node is not on the canvas.
    fn node_anchor(&self, node_id: &str) -> Option<Point>;

    /// Visible edge connecting `a` and `b` in either orientation, returned in the orientation it
    /// was registered with.
    fn visible_edge(&self, a: &str, b: &str) -> Option<EdgeKey>;

    /// Polyline of a visible edge in its registered orientation. Defaults to the straight
    /// segment between the endpoint anchors.
    fn edge_path(&self, edge: &EdgeKey) -> Option<Vec<Point>> {
        Some(vec![
            self.node_anchor(&edge.src)?,
            self.node_anchor(&edge.dst)?,
        ])
    }

    /// Start drawing a traveling marker.
    fn add_visual(&mut self, visual: &SignalVisual);

    /// Move a marker.
    fn move_visual(&mut self, handle: VisualHandle, position: Point);

    /// Stop drawing a marker.
    fn remove_visual(&mut self, handle: VisualHandle);

    /// Play the arrival effect on a node.
    fn trigger_arrival_pulse(&mut self, pulse: &ArrivalPulse);

    /// Briefly highlight a node.
    fn trigger_flash(&mut self, node_id: &str, color: Rgba8);
}
