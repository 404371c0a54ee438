use serde_json::Value;

use crate::focus::settings::FocusSettings;
use crate::foundation::error::{TrailError, TrailResult};
use crate::foundation::lookup::bool_field;
use crate::signal::settings::PulseSettings;

/// Everything an overlay session is configured with.
///
/// ```json
/// { "pulse": { "max_concurrent_signals": 4 }, "focus": { "enabled": true }, "reduced_motion": false }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Signal animation settings.
    pub pulse: PulseSettings,
    /// Trail focus settings.
    pub focus: FocusSettings,
    /// Initial reduced-motion state.
    pub reduced_motion: bool,
}

impl OverlayConfig {
    /// Parse JSON text leniently (see [`OverlayConfig::from_value`]).
    pub fn from_json_str(text: &str) -> TrailResult<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| TrailError::serde(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Read a config mapping. Each section is read key by key, so one mistyped value only resets
    /// that value. The result is sanitized.
    pub fn from_value(value: &Value) -> TrailResult<Self> {
        let Value::Object(map) = value else {
            return Err(TrailError::settings(format!(
                "overlay config: expected an object, got {value}"
            )));
        };
        let pulse = match map.get("pulse") {
            None => PulseSettings::default(),
            Some(v) => PulseSettings::from_value(v)?,
        };
        let focus = match map.get("focus") {
            None | Some(Value::Null) => FocusSettings::default(),
            Some(Value::Object(section)) => FocusSettings::from_object(section),
            Some(other) => {
                return Err(TrailError::settings(format!(
                    "focus settings: expected an object, got {other}"
                )));
            }
        };
        Ok(Self {
            pulse,
            focus,
            reduced_motion: bool_field(map, "reduced_motion", false),
        })
    }

    /// Copy with both sections sanitized.
    pub fn sanitized(&self) -> Self {
        Self {
            pulse: self.pulse.sanitized(),
            focus: self.focus.sanitized(),
            reduced_motion: self.reduced_motion,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
