use super::*;
use crate::graph::snapshot::GraphSnapshot;
use crate::signal::driver::ManualTicker;
use crate::signal::recording::{CanvasCommand, RecordingCanvas};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// `a` at the origin, `b` 900px to the right (one second at default speed), `c` isolated.
fn canvas() -> RecordingCanvas {
    let graph = GraphSnapshot::from_json_str(
        r#"{
            "nodes": [
                {"id": "a", "x": 0, "y": 0},
                {"id": "b", "x": 900, "y": 0},
                {"id": "c", "x": 0, "y": 500}
            ],
            "edges": [["a", "b", "pubsub"]]
        }"#,
    )
    .unwrap();
    RecordingCanvas::new(graph)
}

fn scheduler(max: usize) -> SignalScheduler<ManualTicker> {
    let settings = PulseSettings {
        max_concurrent_signals: max,
        ..PulseSettings::default()
    };
    SignalScheduler::new(settings, ReducedMotion::default(), ManualTicker::new())
}

fn traveling(outcome: EmitOutcome) -> SignalId {
    match outcome {
        EmitOutcome::Traveling(id) => id,
        other => panic!("expected a traveling signal, got {other:?}"),
    }
}

#[test]
fn emit_adds_visual_at_source_and_starts_driver() {
    let mut c = canvas();
    let mut s = scheduler(6);
    let out = s.emit_signal(&mut c, EmitRequest::new("b").from_node("a"), ms(0));
    let id = traveling(out);

    assert_eq!(s.signals_active_count(), 1);
    assert!(s.is_ticking());
    assert_eq!(s.driver().interval(), Some(TICK_INTERVAL));
    match &c.commands()[0] {
        CanvasCommand::AddVisual(v) => {
            assert_eq!(v.position, Point::new(0.0, 0.0));
            assert_eq!(v.radius_px, 8.0);
            assert_eq!(v.alpha, 0.6);
        }
        other => panic!("unexpected command {other:?}"),
    }
    let signal = s.active_signals().next().unwrap();
    assert_eq!(signal.id(), id);
    assert_eq!(signal.phase(), SignalPhase::Traveling);
    assert_eq!(signal.duration(), Duration::from_secs(1));
}

#[test]
fn tick_interpolates_then_hands_off_to_arrival_pulse() {
    let mut c = canvas();
    let mut s = scheduler(6);
    let id = traveling(s.emit_signal(
        &mut c,
        EmitRequest::new("b").from_node("a").with_color(Rgba8::rgb(1, 2, 3)),
        ms(0),
    ));

    let report = s.tick(&mut c, ms(250));
    assert_eq!(report.moved, 1);
    let pos = c.visual_position(VisualHandle(id.0)).unwrap();
    assert!((pos.x - 225.0).abs() < 1e-9 && pos.y.abs() < 1e-9, "{pos:?}");

    let report = s.tick(&mut c, ms(1000));
    assert_eq!(report.arrived, vec![id]);
    assert_eq!(s.signals_active_count(), 0);
    assert_eq!(c.visual_count(), 0);
    assert!(!s.is_ticking());
    assert_eq!(s.driver().stops(), 1);

    let pulses: Vec<_> = c.arrival_pulses().collect();
    assert_eq!(pulses.len(), 1);
    assert_eq!(pulses[0].node_id, "b");
    assert_eq!(pulses[0].color, Rgba8::rgb(1, 2, 3));
    assert_eq!((pulses[0].linger_ms, pulses[0].fade_ms), (300, 500));
    assert!(!pulses[0].reduced_motion);
}

#[test]
fn reversed_travel_walks_edge_backwards() {
    let mut c = canvas();
    let mut s = scheduler(6);
    let id = traveling(s.emit_signal(&mut c, EmitRequest::new("a").from_node("b"), ms(0)));
    let signal = s.active_signals().next().unwrap();
    assert!(signal.is_reversed());
    assert_eq!(signal.edge(), &EdgeKey::new("a", "b"));

    match &c.commands()[0] {
        CanvasCommand::AddVisual(v) => assert_eq!(v.position, Point::new(900.0, 0.0)),
        other => panic!("unexpected command {other:?}"),
    }
    s.tick(&mut c, ms(250));
    let pos = c.visual_position(VisualHandle(id.0)).unwrap();
    assert!((pos.x - 675.0).abs() < 1e-9, "{pos:?}");
}

#[test]
fn capacity_evicts_oldest_before_adding() {
    let mut c = canvas();
    let mut s = scheduler(2);
    let first = traveling(s.emit_signal(&mut c, EmitRequest::new("b").from_node("a"), ms(0)));
    let _second = traveling(s.emit_signal(&mut c, EmitRequest::new("b").from_node("a"), ms(10)));
    c.take_commands();

    let third = traveling(s.emit_signal(&mut c, EmitRequest::new("a").from_node("b"), ms(20)));
    let log = c.take_commands();
    assert_eq!(
        log[0],
        CanvasCommand::RemoveVisual {
            handle: VisualHandle(first.0)
        }
    );
    assert!(matches!(&log[1], CanvasCommand::AddVisual(v) if v.handle == VisualHandle(third.0)));
    assert_eq!(log.len(), 2, "eviction issues no arrival pulse");
    assert_eq!(s.signals_active_count(), 2);
    assert_eq!(s.stats().evicted, 1);
}

#[test]
fn active_count_never_exceeds_capacity() {
    let mut c = canvas();
    let mut s = scheduler(3);
    for i in 0..20 {
        s.emit_signal(&mut c, EmitRequest::new("b").from_node("a"), ms(i * 5));
        assert!(s.signals_active_count() <= 3);
        assert_eq!(c.visual_count(), s.signals_active_count());
    }
    assert_eq!(s.stats().emitted, 20);
    assert_eq!(s.stats().evicted, 17);
}

#[test]
fn reduced_motion_bypasses_travel() {
    let mut c = canvas();
    let mut s = scheduler(6);
    s.reduced_motion().set(true);
    let out = s.emit_signal(&mut c, EmitRequest::new("b").from_node("a"), ms(0));
    assert_eq!(out, EmitOutcome::ArrivedImmediately);
    assert_eq!(s.signals_active_count(), 0);
    assert!(!s.is_ticking());
    assert_eq!(c.visual_count(), 0);
    let pulse = c.arrival_pulses().next().unwrap();
    assert!(pulse.reduced_motion);
    assert_eq!(pulse.linger_ms, 300);

    // Read per call: turning it off animates the next emit.
    s.reduced_motion().set(false);
    traveling(s.emit_signal(&mut c, EmitRequest::new("b").from_node("a"), ms(0)));
}

#[test]
fn missing_source_or_edge_pulses_immediately() {
    let mut c = canvas();
    let mut s = scheduler(6);
    assert_eq!(
        s.emit_signal(&mut c, EmitRequest::new("b"), ms(0)),
        EmitOutcome::ArrivedImmediately
    );
    assert_eq!(
        s.emit_signal(&mut c, EmitRequest::new("c").from_node("a"), ms(0)),
        EmitOutcome::ArrivedImmediately
    );
    assert_eq!(
        s.emit_signal(&mut c, EmitRequest::new("b").from_node("  "), ms(0)),
        EmitOutcome::ArrivedImmediately
    );
    assert_eq!(c.arrival_pulses().count(), 3);
    assert!(c.arrival_pulses().all(|p| !p.reduced_motion));
    assert_eq!(s.stats().immediate, 3);
    assert!(!s.is_ticking());
}

#[test]
fn unknown_target_is_a_no_op() {
    let mut c = canvas();
    let mut s = scheduler(6);
    assert_eq!(
        s.emit_signal(&mut c, EmitRequest::new("ghost").from_node("a"), ms(0)),
        EmitOutcome::Ignored
    );
    assert_eq!(
        s.emit_signal(&mut c, EmitRequest::new(""), ms(0)),
        EmitOutcome::Ignored
    );
    assert!(c.commands().is_empty());
}

#[test]
fn short_edges_travel_for_minimum_duration() {
    let graph = GraphSnapshot::from_json_str(
        r#"{ "nodes": [{"id": "a", "x": 0, "y": 0}, {"id": "b", "x": 3, "y": 4}],
             "edges": [["a", "b"]] }"#,
    )
    .unwrap();
    let mut c = RecordingCanvas::new(graph);
    let mut s = scheduler(6);
    traveling(s.emit_signal(&mut c, EmitRequest::new("b").from_node("a"), ms(0)));
    let signal = s.active_signals().next().unwrap();
    assert_eq!(signal.duration(), Duration::from_secs_f64(0.15));

    assert!(s.tick(&mut c, ms(100)).arrived.is_empty());
    assert_eq!(s.tick(&mut c, ms(151)).arrived.len(), 1);
}

#[test]
fn far_apart_nodes_travel_without_overflow() {
    let graph = GraphSnapshot::from_json_str(
        r#"{ "nodes": [{"id": "a", "x": 0, "y": 0}, {"id": "b", "x": 1e25, "y": 0}],
             "edges": [["a", "b"]] }"#,
    )
    .unwrap();
    let mut c = RecordingCanvas::new(graph);
    let mut s = scheduler(6);
    traveling(s.emit_signal(&mut c, EmitRequest::new("b").from_node("a"), ms(0)));
    assert_eq!(s.active_signals().next().unwrap().duration(), Duration::MAX);

    let report = s.tick(&mut c, ms(1000));
    assert_eq!(report.moved, 1);
    assert!(report.arrived.is_empty());
    assert!(s.is_ticking());
}

#[test]
fn target_removed_mid_flight_skips_pulse() {
    let mut c = canvas();
    let mut s = scheduler(6);
    traveling(s.emit_signal(&mut c, EmitRequest::new("b").from_node("a"), ms(0)));
    c.set_graph(GraphSnapshot::from_json_str(r#"{ "nodes": ["a"] }"#).unwrap());

    let report = s.tick(&mut c, ms(2000));
    assert_eq!(report.arrived.len(), 1);
    assert_eq!(c.visual_count(), 0);
    assert_eq!(c.arrival_pulses().count(), 0);
    assert!(!s.is_ticking());
}

#[test]
fn concurrent_signals_to_same_target_coexist() {
    let mut c = canvas();
    let mut s = scheduler(6);
    let a = traveling(s.emit_signal(&mut c, EmitRequest::new("b").from_node("a"), ms(0)));
    let b = traveling(s.emit_signal(&mut c, EmitRequest::new("b").from_node("a"), ms(500)));
    assert_ne!(a, b);

    let report = s.tick(&mut c, ms(1000));
    assert_eq!(report.arrived, vec![a]);
    assert_eq!(report.moved, 1);
    assert!(s.is_ticking());

    let report = s.tick(&mut c, ms(1500));
    assert_eq!(report.arrived, vec![b]);
    assert!(!s.is_ticking());
    assert_eq!(c.arrival_pulses().count(), 2);
}

#[test]
fn clear_drops_everything_without_pulses() {
    let mut c = canvas();
    let mut s = scheduler(6);
    for _ in 0..3 {
        s.emit_signal(&mut c, EmitRequest::new("b").from_node("a"), ms(0));
    }
    s.clear(&mut c);
    assert_eq!(s.signals_active_count(), 0);
    assert_eq!(c.visual_count(), 0);
    assert_eq!(c.arrival_pulses().count(), 0);
    assert!(!s.is_ticking());
    assert!(s.tick(&mut c, ms(5000)).arrived.is_empty());
}

#[test]
fn lowering_capacity_evicts_down_to_it() {
    let mut c = canvas();
    let mut s = scheduler(6);
    for i in 0..4 {
        s.emit_signal(&mut c, EmitRequest::new("b").from_node("a"), ms(i));
    }
    let settings = PulseSettings {
        max_concurrent_signals: 1,
        ..PulseSettings::default()
    };
    s.update_settings(&mut c, settings);
    assert_eq!(s.signals_active_count(), 1);
    assert_eq!(c.visual_count(), 1);
    assert_eq!(s.active_signals().next().unwrap().id(), SignalId(4));
}

#[test]
fn flash_requires_known_node() {
    let mut c = canvas();
    let mut s = scheduler(6);
    assert!(s.flash_node(&mut c, " a ", Rgba8::SIGNAL));
    assert!(!s.flash_node(&mut c, "ghost", Rgba8::SIGNAL));
    assert_eq!(
        c.commands(),
        &[CanvasCommand::Flash {
            node_id: "a".into(),
            color: Rgba8::SIGNAL
        }]
    );
}
