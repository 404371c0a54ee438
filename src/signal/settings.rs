use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;

use crate::foundation::error::{TrailError, TrailResult};
use crate::foundation::lookup::{Object, bool_field, f64_field, u64_field};
use crate::foundation::math::positive_or;

/// Default travel speed in pixels per second.
pub const DEFAULT_TRAVEL_SPEED_PX_PER_S: f64 = 900.0;
/// Default time a target keeps its arrival pulse before fading.
pub const DEFAULT_ARRIVE_LINGER_MS: u64 = 300;
/// Default arrival pulse fade time.
pub const DEFAULT_FADE_MS: u64 = 500;
/// Default radius of the traveling marker.
pub const DEFAULT_PULSE_RADIUS_PX: f64 = 8.0;
/// Default opacity of the traveling marker.
pub const DEFAULT_PULSE_ALPHA: f64 = 0.6;
/// Default cap on simultaneously traveling signals.
pub const DEFAULT_MAX_CONCURRENT_SIGNALS: usize = 6;

/// Shortest travel time, so very short edges still show a visible marker.
pub const MIN_TRAVEL_SECS: f64 = 0.15;

/// Signal animation settings.
///
/// Field names match the settings keys used by the host. Every field has a default, so partial
/// payloads are fine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PulseSettings {
    /// Travel speed used to derive durations from edge length.
    pub travel_speed_px_per_s: f64,
    /// Fixed travel time; `0` derives the duration from distance and speed.
    pub travel_duration_ms: u64,
    /// How long the arrival pulse stays at full strength.
    pub arrive_linger_ms: u64,
    /// How long the arrival pulse takes to fade out.
    pub fade_ms: u64,
    /// Marker radius.
    pub pulse_radius_px: f64,
    /// Marker opacity in `[0, 1]`.
    pub pulse_alpha: f64,
    /// Signals beyond this many evict the oldest traveling one.
    pub max_concurrent_signals: usize,
    /// Per-kind switch; kinds not listed are enabled.
    pub topic_enabled: BTreeMap<String, bool>,
}

impl Default for PulseSettings {
    fn default() -> Self {
        Self {
            travel_speed_px_per_s: DEFAULT_TRAVEL_SPEED_PX_PER_S,
            travel_duration_ms: 0,
            arrive_linger_ms: DEFAULT_ARRIVE_LINGER_MS,
            fade_ms: DEFAULT_FADE_MS,
            pulse_radius_px: DEFAULT_PULSE_RADIUS_PX,
            pulse_alpha: DEFAULT_PULSE_ALPHA,
            max_concurrent_signals: DEFAULT_MAX_CONCURRENT_SIGNALS,
            topic_enabled: BTreeMap::new(),
        }
    }
}

impl PulseSettings {
    /// Copy with unusable values replaced: non-positive speed/radius fall back to defaults,
    /// alpha is clamped into `[0, 1]` and the capacity is at least one.
    pub fn sanitized(&self) -> Self {
        let alpha = if self.pulse_alpha.is_finite() {
            self.pulse_alpha.clamp(0.0, 1.0)
        } else {
            DEFAULT_PULSE_ALPHA
        };
        Self {
            travel_speed_px_per_s: positive_or(
                self.travel_speed_px_per_s,
                DEFAULT_TRAVEL_SPEED_PX_PER_S,
            ),
            travel_duration_ms: self.travel_duration_ms,
            arrive_linger_ms: self.arrive_linger_ms,
            fade_ms: self.fade_ms,
            pulse_radius_px: positive_or(self.pulse_radius_px, DEFAULT_PULSE_RADIUS_PX),
            pulse_alpha: alpha,
            max_concurrent_signals: self.max_concurrent_signals.max(1),
            topic_enabled: self.topic_enabled.clone(),
        }
    }

    /// Read settings from a loose JSON mapping.
    ///
    /// Mistyped scalars are logged and defaulted; only a payload that is not an object at all
    /// is an error.
    pub fn from_value(value: &Value) -> TrailResult<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self::from_object(map)),
            other => Err(TrailError::settings(format!(
                "pulse settings: expected an object, got {other}"
            ))),
        }
    }

    pub(crate) fn from_object(map: &Object) -> Self {
        let d = Self::default();
        let max_concurrent = u64_field(
            map,
            "max_concurrent_signals",
            d.max_concurrent_signals as u64,
        );
        Self {
            travel_speed_px_per_s: f64_field(map, "travel_speed_px_per_s", d.travel_speed_px_per_s),
            travel_duration_ms: u64_field(map, "travel_duration_ms", d.travel_duration_ms),
            arrive_linger_ms: u64_field(map, "arrive_linger_ms", d.arrive_linger_ms),
            fade_ms: u64_field(map, "fade_ms", d.fade_ms),
            pulse_radius_px: f64_field(map, "pulse_radius_px", d.pulse_radius_px),
            pulse_alpha: f64_field(map, "pulse_alpha", d.pulse_alpha),
            max_concurrent_signals: usize::try_from(max_concurrent)
                .unwrap_or(d.max_concurrent_signals),
            topic_enabled: topic_map(map.get("topic_enabled")),
        }
        .sanitized()
    }

    /// Whether signals of `kind` should be shown. Unlisted kinds are enabled.
    pub fn topic_enabled(&self, kind: &str) -> bool {
        self.topic_enabled.get(kind.trim()).copied().unwrap_or(true)
    }

    /// Travel time for a signal covering `distance_px`, never shorter than
    /// [`MIN_TRAVEL_SECS`].
    pub fn travel_duration(&self, distance_px: f64) -> Duration {
        let secs = if self.travel_duration_ms > 0 {
            self.travel_duration_ms as f64 / 1000.0
        } else {
            let distance = if distance_px.is_finite() {
                distance_px.max(0.0)
            } else {
                0.0
            };
            distance / self.travel_speed_px_per_s.max(1.0)
        };
        // Far-apart anchors can exceed what `Duration` holds; saturate instead.
        Duration::try_from_secs_f64(secs.max(MIN_TRAVEL_SECS)).unwrap_or(Duration::MAX)
    }

    /// Arrival linger as a duration.
    pub fn linger(&self) -> Duration {
        Duration::from_millis(self.arrive_linger_ms)
    }

    /// Arrival fade as a duration.
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

fn topic_map(value: Option<&Value>) -> BTreeMap<String, bool> {
    let Some(value) = value else {
        return BTreeMap::new();
    };
    let Value::Object(entries) = value else {
        tracing::warn!(value = %value, "topic_enabled is not a mapping, ignored");
        return BTreeMap::new();
    };
    let mut out = BTreeMap::new();
    for key in entries.keys() {
        let kind = key.trim();
        if kind.is_empty() {
            continue;
        }
        out.insert(kind.to_owned(), bool_field(entries, key, true));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/signal/settings.rs"]
mod tests;
