use crate::foundation::core::Point;

/// Cumulative arc length at every vertex of a polyline, plus the total length.
///
/// The first entry is always `0.0` and the total equals the last entry. A single point yields
/// `([0.0], 0.0)`; an empty slice yields `([], 0.0)`.
pub fn build_cumulative_distance(points: &[Point]) -> (Vec<f64>, f64) {
    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;
    let mut prev: Option<Point> = None;
    for &p in points {
        if let Some(q) = prev {
            total += q.distance(p);
        }
        cumulative.push(total);
        prev = Some(p);
    }
    (cumulative, total)
}

/// Map a travel distance along a polyline to its vertex-parameterized fraction in `[0, 1]`.
///
/// The fraction is `(segment_index + local_t) / segment_count`, where the segment is the first
/// one whose end sample is `>= distance`. Distances landing exactly on a sample map to
/// `sample_index / segment_count` with no interpolation error.
pub fn distance_to_percent(cumulative: &[f64], total: f64, distance: f64) -> f64 {
    // NaN falls through to 0.0 as well.
    if !(distance > 0.0) {
        return 0.0;
    }
    if distance >= total {
        return 1.0;
    }
    if cumulative.len() < 2 {
        return (distance / total).clamp(0.0, 1.0);
    }

    let idx = cumulative.partition_point(|&c| c < distance);
    if idx >= cumulative.len() {
        return 1.0;
    }
    let idx = idx.max(1);
    let prev = cumulative[idx - 1];
    let seg = cumulative[idx] - prev;
    let local = if seg > 0.0 {
        ((distance - prev) / seg).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let segments = (cumulative.len() - 1) as f64;
    ((idx - 1) as f64 + local) / segments
}

/// Point at a vertex-parameterized fraction (the inverse of [`distance_to_percent`]).
pub fn point_at_percent(points: &[Point], percent: f64) -> Option<Point> {
    let (&first, rest) = points.split_first()?;
    if rest.is_empty() {
        return Some(first);
    }
    let segments = (points.len() - 1) as f64;
    let s = if percent.is_finite() {
        percent.clamp(0.0, 1.0) * segments
    } else {
        0.0
    };
    let i = (s.floor() as usize).min(points.len() - 2);
    let t = s - i as f64;
    Some(points[i].lerp(points[i + 1], t))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/polyline.rs"]
mod tests;
