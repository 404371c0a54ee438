use std::time::Duration;

/// Tick period of the animation loop (about 30 Hz).
pub const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// Periodic timer owned by the scheduler.
///
/// The host wires the timer's callback to [`crate::SignalScheduler::tick`]. The scheduler starts
/// the driver when the first signal begins traveling and stops it once nothing is left, so an
/// idle scene holds no running timer.
pub trait TickDriver {
    /// Begin firing every `interval`. Called only while stopped.
    fn start(&mut self, interval: Duration);
    /// Stop firing.
    fn stop(&mut self);
    /// Whether the timer is currently firing.
    fn is_running(&self) -> bool;
}

impl<D: TickDriver + ?Sized> TickDriver for Box<D> {
    fn start(&mut self, interval: Duration) {
        (**self).start(interval);
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn is_running(&self) -> bool {
        (**self).is_running()
    }
}

/// Driver that only records start/stop requests. Hosts that pump ticks themselves (tests, the
/// CLI replay) use it to observe the scheduler's timer lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualTicker {
    running: bool,
    interval: Option<Duration>,
    starts: u32,
    stops: u32,
}

impl ManualTicker {
    /// Stopped ticker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interval of the last start request.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Number of start requests seen.
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Number of stop requests that stopped a running timer.
    pub fn stops(&self) -> u32 {
        self.stops
    }
}

impl TickDriver for ManualTicker {
    fn start(&mut self, interval: Duration) {
        self.running = true;
        self.interval = Some(interval);
        self.starts += 1;
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.stops += 1;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
