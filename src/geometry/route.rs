use crate::foundation::core::Point;
use crate::geometry::polyline::{build_cumulative_distance, distance_to_percent, point_at_percent};

/// Directional progress along an edge: clamp to `[0, 1]`, then flip when traversing against the
/// edge's registered orientation.
pub fn edge_progress(raw_progress: f64, reversed: bool) -> f64 {
    let clamped = if raw_progress.is_finite() {
        raw_progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if reversed { 1.0 - clamped } else { clamped }
}

/// Polyline of an edge in its registered orientation, with the direction a signal walks it.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRoute {
    points: Vec<Point>,
    cumulative: Vec<f64>,
    total: f64,
    reversed: bool,
}

impl EdgeRoute {
    /// Build a route over `points` (registered orientation). `reversed` means travel runs from
    /// the last point to the first.
    pub fn new(points: Vec<Point>, reversed: bool) -> Self {
        let (cumulative, total) = build_cumulative_distance(&points);
        Self {
            points,
            cumulative,
            total,
            reversed,
        }
    }

    /// Two-point route between anchors.
    pub fn straight(from: Point, to: Point, reversed: bool) -> Self {
        Self::new(vec![from, to], reversed)
    }

    /// Arc length of the route.
    pub fn length(&self) -> f64 {
        self.total
    }

    /// Whether travel runs against the registered orientation.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Where travel begins.
    pub fn start(&self) -> Option<Point> {
        self.position_at(0.0)
    }

    /// Where travel ends.
    pub fn end(&self) -> Option<Point> {
        self.position_at(1.0)
    }

    /// Position after covering `progress` (fraction of travel time) of the route.
    pub fn position_at(&self, progress: f64) -> Option<Point> {
        let along = edge_progress(progress, self.reversed) * self.total;
        let percent = distance_to_percent(&self.cumulative, self.total, along);
        point_at_percent(&self.points, percent)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/route.rs"]
mod tests;
