use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use crate::foundation::core::{EdgeKey, Point, Rgba8, normalize_id};
use crate::geometry::route::EdgeRoute;
use crate::signal::canvas::{ArrivalPulse, SignalCanvas, SignalVisual, VisualHandle};
use crate::signal::driver::{TICK_INTERVAL, TickDriver};
use crate::signal::motion::ReducedMotion;
use crate::signal::settings::PulseSettings;

/// Identifier of one emitted signal.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SignalId(pub u64);

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "signal#{}", self.0)
    }
}

/// Lifecycle of a signal: `PendingEmit -> Traveling -> Arrived`, or `Evicted` when capacity
/// forces it out. Both terminal phases drop the record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalPhase {
    /// Accepted, not yet on the canvas.
    PendingEmit,
    /// Drawn and moving.
    Traveling,
    /// Reached its target; the arrival pulse was handed off.
    Arrived,
    /// Dropped for capacity without an arrival pulse.
    Evicted,
}

/// One request to show activity flowing into `target`.
#[derive(Clone, Debug, PartialEq)]
pub struct EmitRequest {
    /// Node the activity came from; without one the target just pulses.
    pub source: Option<String>,
    /// Node receiving the activity.
    pub target: String,
    /// Edge kind label (`"pubsub"`, `"request"`, ...).
    pub kind: String,
    /// Marker and pulse color.
    pub color: Rgba8,
}

impl EmitRequest {
    /// Request with no source, empty kind and the default signal color.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            source: None,
            target: target.into(),
            kind: String::new(),
            color: Rgba8::SIGNAL,
        }
    }

    /// Set the source node.
    pub fn from_node(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the kind label.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the color.
    pub fn with_color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }
}

/// What [`SignalScheduler::emit_signal`] did with a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "outcome", content = "signal", rename_all = "snake_case")]
pub enum EmitOutcome {
    /// Target unknown to the canvas; nothing happened.
    Ignored,
    /// No animated travel (reduced motion, no source, no visible edge); the target pulsed.
    ArrivedImmediately,
    /// A marker is traveling.
    Traveling(SignalId),
}

/// Result of one tick pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct TickReport {
    /// Markers moved in place.
    pub moved: usize,
    /// Signals that reached their target during this pass, oldest first.
    pub arrived: Vec<SignalId>,
}

/// Running totals since the scheduler was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SchedulerStats {
    /// Signals that started traveling.
    pub emitted: u64,
    /// Traveling signals that reached their target.
    pub arrived: u64,
    /// Traveling signals dropped for capacity.
    pub evicted: u64,
    /// Requests answered with an immediate pulse.
    pub immediate: u64,
}

/// A signal in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveSignal {
    id: SignalId,
    handle: VisualHandle,
    edge: EdgeKey,
    target: String,
    route: EdgeRoute,
    started: Duration,
    duration: Duration,
    phase: SignalPhase,
    arrival: ArrivalPulse,
}

impl ActiveSignal {
    /// Signal id.
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Canvas handle of the marker.
    pub fn handle(&self) -> VisualHandle {
        self.handle
    }

    /// Visible edge being traveled, in its registered orientation.
    pub fn edge(&self) -> &EdgeKey {
        &self.edge
    }

    /// Node the signal is heading to.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether travel runs against the edge's registered orientation.
    pub fn is_reversed(&self) -> bool {
        self.route.is_reversed()
    }

    /// Travel time.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current phase.
    pub fn phase(&self) -> SignalPhase {
        self.phase
    }

    /// `elapsed / duration` at `now`; not clamped, so values past `1.0` mean "arrived".
    pub fn progress_at(&self, now: Duration) -> f64 {
        let elapsed = now.saturating_sub(self.started).as_secs_f64();
        let total = self.duration.as_secs_f64();
        if total > 0.0 { elapsed / total } else { 1.0 }
    }

    /// Marker position at `now`.
    pub fn position_at(&self, now: Duration) -> Option<Point> {
        self.route.position_at(self.progress_at(now))
    }
}

/// Owns every traveling signal and the tick driver that animates them.
///
/// All calls are synchronous and run to completion. The canvas is borrowed per call, so it can
/// never call back into the scheduler while a tick is in progress. Time is passed in explicitly
/// as an offset from any fixed origin (see [`crate::Clock`]).
#[derive(Debug)]
pub struct SignalScheduler<D: TickDriver> {
    settings: PulseSettings,
    reduced_motion: ReducedMotion,
    driver: D,
    signals: VecDeque<ActiveSignal>,
    next_id: u64,
    stats: SchedulerStats,
}

impl<D: TickDriver> SignalScheduler<D> {
    /// Scheduler with sanitized `settings`. The driver is left as given; it is started on the
    /// first traveling signal.
    pub fn new(settings: PulseSettings, reduced_motion: ReducedMotion, driver: D) -> Self {
        Self {
            settings: settings.sanitized(),
            reduced_motion,
            driver,
            signals: VecDeque::new(),
            next_id: 1,
            stats: SchedulerStats::default(),
        }
    }

    /// Active settings.
    pub fn settings(&self) -> &PulseSettings {
        &self.settings
    }

    /// Shared reduced-motion flag.
    pub fn reduced_motion(&self) -> &ReducedMotion {
        &self.reduced_motion
    }

    /// Tick driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Whether the tick driver is running.
    pub fn is_ticking(&self) -> bool {
        self.driver.is_running()
    }

    /// Totals since creation.
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Number of signals currently traveling.
    pub fn signals_active_count(&self) -> usize {
        self.signals.len()
    }

    /// Traveling signals, oldest first.
    pub fn active_signals(&self) -> impl Iterator<Item = &ActiveSignal> {
        self.signals.iter()
    }

    /// Show activity flowing into `req.target`.
    ///
    /// Unknown targets are ignored. With reduced motion on, or when there is no visible edge
    /// between source and target, the target pulses immediately. Otherwise the oldest signals
    /// are evicted until there is room, and a new marker starts at the source.
    #[tracing::instrument(
        level = "debug",
        skip(self, canvas, req),
        fields(source = ?req.source, target = %req.target, kind = %req.kind)
    )]
    pub fn emit_signal(
        &mut self,
        canvas: &mut dyn SignalCanvas,
        req: EmitRequest,
        now: Duration,
    ) -> EmitOutcome {
        let Some(target) = normalize_id(&req.target) else {
            tracing::debug!("empty target, ignored");
            return EmitOutcome::Ignored;
        };
        let Some(target_anchor) = canvas.node_anchor(target) else {
            tracing::debug!("target not on canvas, ignored");
            return EmitOutcome::Ignored;
        };

        if self.reduced_motion.is_enabled() {
            self.pulse_now(canvas, target, req.color, true);
            return EmitOutcome::ArrivedImmediately;
        }

        let travel = req
            .source
            .as_deref()
            .and_then(normalize_id)
            .and_then(|source| {
                let edge = canvas.visible_edge(source, target)?;
                let anchor = canvas.node_anchor(source)?;
                Some((source.to_owned(), edge, anchor))
            });
        let Some((source, edge, source_anchor)) = travel else {
            tracing::debug!("no visible edge to travel, pulsing target");
            self.pulse_now(canvas, target, req.color, false);
            return EmitOutcome::ArrivedImmediately;
        };

        self.evict_to(canvas, self.settings.max_concurrent_signals.saturating_sub(1));

        let reversed = edge.src != source;
        let path = canvas
            .edge_path(&edge)
            .filter(|p| p.len() >= 2)
            .unwrap_or_else(|| {
                if reversed {
                    vec![target_anchor, source_anchor]
                } else {
                    vec![source_anchor, target_anchor]
                }
            });
        let route = EdgeRoute::new(path, reversed);
        let duration = self
            .settings
            .travel_duration(source_anchor.distance(target_anchor));

        let id = SignalId(self.next_id);
        let handle = VisualHandle(self.next_id);
        self.next_id += 1;

        let mut signal = ActiveSignal {
            id,
            handle,
            edge,
            target: target.to_owned(),
            started: now,
            duration,
            phase: SignalPhase::PendingEmit,
            arrival: self.arrival_pulse(target, req.color, false),
            route,
        };
        let start = signal.route.start().unwrap_or(source_anchor);
        canvas.add_visual(&SignalVisual {
            handle,
            position: start,
            color: req.color,
            radius_px: self.settings.pulse_radius_px,
            alpha: self.settings.pulse_alpha,
            kind: req.kind,
        });
        signal.phase = SignalPhase::Traveling;
        tracing::debug!(%id, ?duration, reversed, "signal traveling");
        self.signals.push_back(signal);
        self.stats.emitted += 1;

        if !self.driver.is_running() {
            self.driver.start(TICK_INTERVAL);
        }
        EmitOutcome::Traveling(id)
    }

    /// Advance every traveling signal to `now`.
    ///
    /// Finished signals lose their marker and hand off to the target's arrival pulse (skipped
    /// if the target left the canvas meanwhile). The driver stops once nothing travels.
    pub fn tick(&mut self, canvas: &mut dyn SignalCanvas, now: Duration) -> TickReport {
        let mut report = TickReport::default();
        let queue = std::mem::take(&mut self.signals);
        for mut signal in queue {
            let progress = signal.progress_at(now);
            if progress >= 1.0 {
                canvas.remove_visual(signal.handle);
                signal.phase = SignalPhase::Arrived;
                if canvas.node_anchor(&signal.target).is_some() {
                    canvas.trigger_arrival_pulse(&signal.arrival);
                } else {
                    tracing::debug!(id = %signal.id, "target left the canvas, pulse skipped");
                }
                self.stats.arrived += 1;
                tracing::trace!(id = %signal.id, phase = ?signal.phase, "handed off");
                report.arrived.push(signal.id);
                continue;
            }
            if let Some(position) = signal.route.position_at(progress) {
                canvas.move_visual(signal.handle, position);
                report.moved += 1;
            }
            self.signals.push_back(signal);
        }
        tracing::trace!(moved = report.moved, arrived = report.arrived.len(), "tick");

        if self.signals.is_empty() && self.driver.is_running() {
            self.driver.stop();
        }
        report
    }

    /// Swap settings. In-flight signals keep their timing; if the new capacity is lower the
    /// oldest are evicted down to it.
    pub fn update_settings(&mut self, canvas: &mut dyn SignalCanvas, settings: PulseSettings) {
        self.settings = settings.sanitized();
        self.evict_to(canvas, self.settings.max_concurrent_signals);
        if self.signals.is_empty() && self.driver.is_running() {
            self.driver.stop();
        }
    }

    /// Briefly highlight a node. Returns false when the node is not on the canvas.
    pub fn flash_node(&mut self, canvas: &mut dyn SignalCanvas, node_id: &str, color: Rgba8) -> bool {
        let Some(id) = normalize_id(node_id) else {
            return false;
        };
        if canvas.node_anchor(id).is_none() {
            return false;
        }
        canvas.trigger_flash(id, color);
        true
    }

    /// Drop every signal without arrival pulses and stop the driver (scene teardown).
    pub fn clear(&mut self, canvas: &mut dyn SignalCanvas) {
        for signal in self.signals.drain(..) {
            canvas.remove_visual(signal.handle);
        }
        if self.driver.is_running() {
            self.driver.stop();
        }
    }

    fn evict_to(&mut self, canvas: &mut dyn SignalCanvas, keep: usize) {
        while self.signals.len() > keep {
            let Some(mut oldest) = self.signals.pop_front() else {
                break;
            };
            canvas.remove_visual(oldest.handle);
            oldest.phase = SignalPhase::Evicted;
            self.stats.evicted += 1;
            tracing::debug!(
                id = %oldest.id,
                target = %oldest.target,
                phase = ?oldest.phase,
                "evicted for capacity"
            );
        }
    }

    fn pulse_now(&mut self, canvas: &mut dyn SignalCanvas, target: &str, color: Rgba8, reduced: bool) {
        let pulse = self.arrival_pulse(target, color, reduced);
        canvas.trigger_arrival_pulse(&pulse);
        self.stats.immediate += 1;
    }

    fn arrival_pulse(&self, target: &str, color: Rgba8, reduced_motion: bool) -> ArrivalPulse {
        ArrivalPulse {
            node_id: target.to_owned(),
            color,
            linger_ms: self.settings.arrive_linger_ms,
            fade_ms: self.settings.fade_ms,
            radius_px: self.settings.pulse_radius_px,
            alpha: self.settings.pulse_alpha,
            reduced_motion,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/signal/scheduler.rs"]
mod tests;
