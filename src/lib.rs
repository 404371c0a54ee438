//! trailpulse: trail focus and signal propagation for interactive architecture graphs.
//!
//! The crate sits between a graph canvas and the runtime events it visualizes:
//!
//! - [`compute_trail_focus`] decides which visible nodes and edges are relevant (monitor
//!   activity, the followed trace, the selection, view context) and assigns every visible
//!   element an opacity.
//! - [`SignalScheduler`] animates signals traveling along visible edges, evicts the oldest
//!   past a capacity bound and hands each finished signal off to an arrival pulse on its target.
//! - [`OverlaySession`] owns both for one view, together with its clock and settings.
//!
//! The crate never paints. It queries geometry and issues commands through [`SignalCanvas`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod focus;
mod foundation;
mod geometry;
mod graph;
mod session;
mod signal;

pub use focus::monitor::{
    MonitorStatus, STATE_DEGRADED, STATE_FATAL, STATE_INACTIVE, STATE_RUNNING,
};
pub use focus::settings::{
    DEFAULT_INACTIVE_EDGE_OPACITY, DEFAULT_INACTIVE_NODE_OPACITY, DEFAULT_MONITOR_BORDER_PX,
    FocusSettings, MAX_INACTIVE_OPACITY, MAX_MONITOR_BORDER_PX, MIN_INACTIVE_EDGE_OPACITY,
    MIN_INACTIVE_NODE_OPACITY, MIN_MONITOR_BORDER_PX, clamp_inactive_edge_opacity,
    clamp_inactive_node_opacity, clamp_monitor_border_px,
};
pub use focus::state::FocusState;
pub use focus::trail::{
    EdgeOpacity, FocusReport, TrailFocusInput, TrailFocusResult, compute_trail_focus,
};
pub use foundation::core::{EdgeKey, Point, Rgba8, Vec2};
pub use foundation::error::{TrailError, TrailResult};
pub use geometry::polyline::{build_cumulative_distance, distance_to_percent, point_at_percent};
pub use geometry::route::{EdgeRoute, edge_progress};
pub use graph::diff::DiffResult;
pub use graph::snapshot::{EdgeKind, GraphEdge, GraphNode, GraphSnapshot, NODE_HEIGHT, NODE_WIDTH};
pub use session::clock::{Clock, ManualClock, MonotonicClock};
pub use session::config::OverlayConfig;
pub use session::overlay::{OverlaySession, TEST_PULSE_KIND};
pub use signal::canvas::{ArrivalPulse, SignalCanvas, SignalVisual, VisualHandle};
pub use signal::driver::{ManualTicker, TICK_INTERVAL, TickDriver};
pub use signal::motion::ReducedMotion;
pub use signal::recording::{CanvasCommand, RecordingCanvas};
pub use signal::scheduler::{
    ActiveSignal, EmitOutcome, EmitRequest, SchedulerStats, SignalId, SignalPhase,
    SignalScheduler, TickReport,
};
pub use signal::settings::{
    DEFAULT_ARRIVE_LINGER_MS, DEFAULT_FADE_MS, DEFAULT_MAX_CONCURRENT_SIGNALS,
    DEFAULT_PULSE_ALPHA, DEFAULT_PULSE_RADIUS_PX, DEFAULT_TRAVEL_SPEED_PX_PER_S, MIN_TRAVEL_SECS,
    PulseSettings,
};
pub use signal::test_pulse::{
    PREFERRED_PULSE_SOURCES, PREFERRED_PULSE_TARGETS, PulsePick, pick_pulse_nodes,
};
