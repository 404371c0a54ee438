use crate::foundation::lookup::{Object, bool_field, f64_field, i64_field};
use crate::foundation::math::clamp_finite;

/// Default opacity of nodes outside the focus set.
pub const DEFAULT_INACTIVE_NODE_OPACITY: f64 = 0.40;
/// Default opacity of edges outside the focus set.
pub const DEFAULT_INACTIVE_EDGE_OPACITY: f64 = 0.20;
/// Default width of the monitor-state border drawn around active nodes.
pub const DEFAULT_MONITOR_BORDER_PX: i64 = 2;

/// Lowest accepted inactive node opacity.
pub const MIN_INACTIVE_NODE_OPACITY: f64 = 0.10;
/// Lowest accepted inactive edge opacity.
pub const MIN_INACTIVE_EDGE_OPACITY: f64 = 0.05;
/// Highest accepted inactive opacity (nodes and edges).
pub const MAX_INACTIVE_OPACITY: f64 = 1.00;
/// Thinnest accepted monitor border.
pub const MIN_MONITOR_BORDER_PX: i64 = 1;
/// Thickest accepted monitor border.
pub const MAX_MONITOR_BORDER_PX: i64 = 6;

/// Clamp an inactive node opacity into `[0.10, 1.00]`; non-finite input uses the default.
pub fn clamp_inactive_node_opacity(value: f64) -> f64 {
    clamp_finite(
        value,
        DEFAULT_INACTIVE_NODE_OPACITY,
        MIN_INACTIVE_NODE_OPACITY,
        MAX_INACTIVE_OPACITY,
    )
}

/// Clamp an inactive edge opacity into `[0.05, 1.00]`; non-finite input uses the default.
pub fn clamp_inactive_edge_opacity(value: f64) -> f64 {
    clamp_finite(
        value,
        DEFAULT_INACTIVE_EDGE_OPACITY,
        MIN_INACTIVE_EDGE_OPACITY,
        MAX_INACTIVE_OPACITY,
    )
}

/// Clamp a monitor border width into `[1, 6]` pixels.
pub fn clamp_monitor_border_px(value: i64) -> i64 {
    value.clamp(MIN_MONITOR_BORDER_PX, MAX_MONITOR_BORDER_PX)
}

/// Trail focus display settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FocusSettings {
    /// When false every visible element keeps full opacity.
    pub enabled: bool,
    /// Opacity of nodes outside the focus set.
    pub inactive_node_opacity: f64,
    /// Opacity of edges outside the focus set.
    pub inactive_edge_opacity: f64,
    /// Border width used to mark nodes with an active monitor state.
    pub monitor_border_px: i64,
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            inactive_node_opacity: DEFAULT_INACTIVE_NODE_OPACITY,
            inactive_edge_opacity: DEFAULT_INACTIVE_EDGE_OPACITY,
            monitor_border_px: DEFAULT_MONITOR_BORDER_PX,
        }
    }
}

impl FocusSettings {
    /// Copy with every numeric field clamped into its documented range.
    pub fn sanitized(&self) -> Self {
        Self {
            enabled: self.enabled,
            inactive_node_opacity: clamp_inactive_node_opacity(self.inactive_node_opacity),
            inactive_edge_opacity: clamp_inactive_edge_opacity(self.inactive_edge_opacity),
            monitor_border_px: clamp_monitor_border_px(self.monitor_border_px),
        }
    }

    /// Read settings from a loose JSON mapping. Missing or mistyped keys use defaults.
    pub(crate) fn from_object(map: &Object) -> Self {
        let d = Self::default();
        Self {
            enabled: bool_field(map, "enabled", d.enabled),
            inactive_node_opacity: f64_field(map, "inactive_node_opacity", d.inactive_node_opacity),
            inactive_edge_opacity: f64_field(map, "inactive_edge_opacity", d.inactive_edge_opacity),
            monitor_border_px: i64_field(map, "monitor_border_px", d.monitor_border_px),
        }
        .sanitized()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/focus/settings.rs"]
mod tests;
