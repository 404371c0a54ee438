/// Clamp a float into `[min, max]`, substituting `default` for NaN/infinite input.
pub(crate) fn clamp_finite(value: f64, default: f64, min: f64, max: f64) -> f64 {
    let v = if value.is_finite() { value } else { default };
    v.max(min).min(max)
}

/// `value` when it is finite and strictly positive, `default` otherwise.
pub(crate) fn positive_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    }
}
