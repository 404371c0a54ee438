use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trailpulse::{
    CanvasCommand, Clock as _, EmitOutcome, EmitRequest, FocusState, GraphSnapshot, ManualClock,
    ManualTicker, OverlayConfig, OverlaySession, PulsePick, RecordingCanvas, Rgba8,
    SchedulerStats, TICK_INTERVAL,
};

/// Ticks after the last emit before a replay gives up on signals still traveling.
const MAX_IDLE_TICKS: u32 = 10_000;

#[derive(Parser, Debug)]
#[command(name = "trailpulse", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print focus sets and opacity maps for a graph and a focus state.
    Focus(FocusArgs),
    /// Replay signal emits on a simulated clock and print the canvas command log.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct FocusArgs {
    /// Graph snapshot JSON (`{"nodes": [...], "edges": [...]}`).
    #[arg(long)]
    graph: PathBuf,

    /// Focus state JSON (monitor states, trace, selection, context, diff).
    #[arg(long)]
    state: Option<PathBuf>,

    /// Overlay config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Graph snapshot JSON.
    #[arg(long)]
    graph: PathBuf,

    /// Signal to emit, as `SRC->DST` or `SRC->DST@KIND` (empty SRC for a bare pulse). Repeatable.
    #[arg(long = "emit", value_name = "SRC->DST[@KIND]", allow_hyphen_values = true)]
    emits: Vec<String>,

    /// Time between consecutive emits, in milliseconds.
    #[arg(long, default_value_t = 100)]
    spacing_ms: u64,

    /// Severity used to color the signals (crash, error, failure, warn).
    #[arg(long)]
    severity: Option<String>,

    /// Overlay config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Force reduced motion on.
    #[arg(long)]
    reduced_motion: bool,

    /// Also fire the diagnostic test pulse first.
    #[arg(long)]
    test_pulse: bool,
}

#[derive(serde::Serialize)]
struct EmitLog {
    at_ms: u64,
    source: Option<String>,
    target: String,
    kind: String,
    outcome: EmitOutcome,
}

#[derive(serde::Serialize)]
struct SimulationReport {
    test_pulse: Option<PulsePick>,
    emits: Vec<EmitLog>,
    commands: Vec<CanvasCommand>,
    stats: SchedulerStats,
    finished_ms: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Focus(args) => cmd_focus(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn read_graph(path: &Path) -> anyhow::Result<GraphSnapshot> {
    let text = read_text(path, "graph")?;
    GraphSnapshot::from_json_str(&text).with_context(|| format!("parse graph '{}'", path.display()))
}

fn read_config(path: Option<&Path>) -> anyhow::Result<OverlayConfig> {
    let Some(path) = path else {
        return Ok(OverlayConfig::default());
    };
    let text = read_text(path, "config")?;
    OverlayConfig::from_json_str(&text)
        .with_context(|| format!("parse config '{}'", path.display()))
}

fn cmd_focus(args: FocusArgs) -> anyhow::Result<()> {
    let graph = read_graph(&args.graph)?;
    let config = read_config(args.config.as_deref())?;
    let state = match &args.state {
        Some(path) => {
            let text = read_text(path, "focus state")?;
            FocusState::from_json_str(&text)
                .with_context(|| format!("parse focus state '{}'", path.display()))?
        }
        None => FocusState::default(),
    };

    let session = OverlaySession::new(config, ManualTicker::new(), ManualClock::default());
    let result = session.focus_for(&graph, &state);
    let out = serde_json::to_string_pretty(&result.to_report()).context("encode focus report")?;
    println!("{out}");
    Ok(())
}

fn parse_emit(arg: &str) -> anyhow::Result<EmitRequest> {
    let (route, kind) = match arg.rsplit_once('@') {
        Some((route, kind)) => (route, kind.trim()),
        None => (arg, ""),
    };
    let (source, target) = route
        .split_once("->")
        .with_context(|| format!("emit '{arg}': expected SRC->DST"))?;
    let target = target.trim();
    anyhow::ensure!(!target.is_empty(), "emit '{arg}': empty target");

    let mut req = EmitRequest::new(target).with_kind(kind);
    if !source.trim().is_empty() {
        req = req.from_node(source.trim());
    }
    Ok(req)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let graph = read_graph(&args.graph)?;
    let mut config = read_config(args.config.as_deref())?;
    config.reduced_motion |= args.reduced_motion;
    let color = args
        .severity
        .as_deref()
        .map(Rgba8::for_severity)
        .unwrap_or_default();

    let mut pending = args
        .emits
        .iter()
        .map(|s| parse_emit(s))
        .collect::<anyhow::Result<VecDeque<_>>>()?;

    let node_ids: Vec<String> = graph.node_ids().map(str::to_owned).collect();
    let mut canvas = RecordingCanvas::new(graph);
    let mut session = OverlaySession::new(config, ManualTicker::new(), ManualClock::default());

    let test_pulse = if args.test_pulse {
        session
            .fire_test_pulse(&mut canvas, &node_ids)
            .map(|(pick, _)| pick)
    } else {
        None
    };

    let spacing = Duration::from_millis(args.spacing_ms);
    let mut next_emit_at = Duration::ZERO;
    let mut emits = Vec::new();
    let mut idle_ticks = 0u32;
    loop {
        let now = session.clock().now();
        while now >= next_emit_at {
            let Some(req) = pending.pop_front() else {
                break;
            };
            let req = req.with_color(color);
            let (source, target, kind) = (req.source.clone(), req.target.clone(), req.kind.clone());
            let outcome = session.emit_signal(&mut canvas, req);
            emits.push(EmitLog {
                at_ms: millis(now),
                source,
                target,
                kind,
                outcome,
            });
            next_emit_at += spacing;
        }

        if session.scheduler().is_ticking() {
            session.tick(&mut canvas);
        } else if pending.is_empty() {
            break;
        }
        if pending.is_empty() {
            idle_ticks += 1;
            anyhow::ensure!(
                idle_ticks <= MAX_IDLE_TICKS,
                "signals still traveling after {MAX_IDLE_TICKS} ticks"
            );
        }
        session.clock().advance(TICK_INTERVAL);
    }

    let finished_ms = millis(session.clock().now());
    let report = SimulationReport {
        test_pulse,
        emits,
        commands: canvas.take_commands(),
        stats: session.shutdown(&mut canvas),
        finished_ms,
    };
    let out = serde_json::to_string_pretty(&report).context("encode simulation report")?;
    println!("{out}");
    Ok(())
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
