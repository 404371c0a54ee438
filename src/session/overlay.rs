use crate::focus::settings::FocusSettings;
use crate::focus::state::FocusState;
use crate::focus::trail::{TrailFocusInput, TrailFocusResult, compute_trail_focus};
use crate::foundation::core::Rgba8;
use crate::graph::snapshot::GraphSnapshot;
use crate::session::clock::Clock;
use crate::session::config::OverlayConfig;
use crate::signal::canvas::SignalCanvas;
use crate::signal::driver::TickDriver;
use crate::signal::motion::ReducedMotion;
use crate::signal::scheduler::{
    EmitOutcome, EmitRequest, SchedulerStats, SignalScheduler, TickReport,
};
use crate::signal::settings::PulseSettings;
use crate::signal::test_pulse::{PulsePick, pick_pulse_nodes};

/// Kind label used by [`OverlaySession::fire_test_pulse`].
pub const TEST_PULSE_KIND: &str = "test";

/// Owned overlay context for one graph view.
///
/// Created when the view opens and torn down with [`OverlaySession::shutdown`]. It owns the
/// focus settings, the signal scheduler and the clock that timestamps emits and ticks. The
/// canvas stays with the host and is lent to each call.
#[derive(Debug)]
pub struct OverlaySession<D: TickDriver, C: Clock> {
    focus: FocusSettings,
    scheduler: SignalScheduler<D>,
    clock: C,
}

impl<D: TickDriver, C: Clock> OverlaySession<D, C> {
    /// Open a session. The config is sanitized here, once.
    #[tracing::instrument(level = "debug", skip_all, fields(reduced_motion = config.reduced_motion))]
    pub fn new(config: OverlayConfig, driver: D, clock: C) -> Self {
        let config = config.sanitized();
        let reduced_motion = ReducedMotion::new(config.reduced_motion);
        Self {
            focus: config.focus,
            scheduler: SignalScheduler::new(config.pulse, reduced_motion, driver),
            clock,
        }
    }

    /// Shared reduced-motion flag; hand clones to whatever toggles accessibility settings.
    pub fn reduced_motion(&self) -> &ReducedMotion {
        self.scheduler.reduced_motion()
    }

    /// Focus settings in use.
    pub fn focus_settings(&self) -> &FocusSettings {
        &self.focus
    }

    /// Pulse settings in use.
    pub fn pulse_settings(&self) -> &PulseSettings {
        self.scheduler.settings()
    }

    /// Underlying scheduler.
    pub fn scheduler(&self) -> &SignalScheduler<D> {
        &self.scheduler
    }

    /// Session clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Focus sets and opacity maps for `input` under the session's focus settings.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn compute_focus(&self, input: &TrailFocusInput) -> TrailFocusResult {
        compute_trail_focus(input, &self.focus)
    }

    /// Focus for a graph snapshot and the host's focus state.
    pub fn focus_for(&self, graph: &GraphSnapshot, state: &FocusState) -> TrailFocusResult {
        let mut input = TrailFocusInput::for_graph(graph);
        state.apply_to(&mut input);
        self.compute_focus(&input)
    }

    /// Emit a signal stamped with the session clock. Kinds switched off in
    /// [`PulseSettings::topic_enabled`] are ignored.
    #[tracing::instrument(level = "debug", skip_all, fields(target = %req.target, kind = %req.kind))]
    pub fn emit_signal(&mut self, canvas: &mut dyn SignalCanvas, req: EmitRequest) -> EmitOutcome {
        if !self.scheduler.settings().topic_enabled(&req.kind) {
            tracing::debug!("topic disabled, ignored");
            return EmitOutcome::Ignored;
        }
        let now = self.clock.now();
        self.scheduler.emit_signal(canvas, req, now)
    }

    /// Timer callback: advance every signal to the clock's current time.
    pub fn tick(&mut self, canvas: &mut dyn SignalCanvas) -> TickReport {
        let now = self.clock.now();
        self.scheduler.tick(canvas, now)
    }

    /// Briefly highlight a node; false when it is not on the canvas.
    pub fn flash_node(&mut self, canvas: &mut dyn SignalCanvas, node_id: &str, color: Rgba8) -> bool {
        self.scheduler.flash_node(canvas, node_id, color)
    }

    /// Diagnostic pulse: flash the chosen nodes and send a signal between them.
    pub fn fire_test_pulse<S: AsRef<str>>(
        &mut self,
        canvas: &mut dyn SignalCanvas,
        node_ids: &[S],
    ) -> Option<(PulsePick, EmitOutcome)> {
        let pick = pick_pulse_nodes(node_ids)?;
        for id in pick.node_ids() {
            self.scheduler.flash_node(canvas, &id, Rgba8::SIGNAL);
        }
        let req = EmitRequest::new(pick.target.clone())
            .from_node(pick.source.clone())
            .with_kind(TEST_PULSE_KIND);
        let outcome = self.emit_signal(canvas, req);
        tracing::info!(source = %pick.source, target = %pick.target, ?outcome, "test pulse");
        Some((pick, outcome))
    }

    /// Replace the focus settings (sanitized).
    pub fn set_focus_settings(&mut self, settings: FocusSettings) {
        self.focus = settings.sanitized();
    }

    /// Replace the pulse settings; a lower capacity evicts the oldest signals right away.
    pub fn set_pulse_settings(&mut self, canvas: &mut dyn SignalCanvas, settings: PulseSettings) {
        self.scheduler.update_settings(canvas, settings);
    }

    /// Number of signals currently traveling.
    pub fn signals_active_count(&self) -> usize {
        self.scheduler.signals_active_count()
    }

    /// Scheduler totals.
    pub fn stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    /// Scene teardown (graph rebuilt from scratch): drop every signal and stop ticking.
    pub fn clear_scene(&mut self, canvas: &mut dyn SignalCanvas) {
        self.scheduler.clear(canvas);
    }

    /// End the session, returning its final totals.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn shutdown(mut self, canvas: &mut dyn SignalCanvas) -> SchedulerStats {
        self.scheduler.clear(canvas);
        self.scheduler.stats()
    }
}
