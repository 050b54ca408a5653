//! Log-space to normalized [0,1]² mapping.

use crate::{
    model::PlotPoint,
    transform::scale::{AxisRange, Bounds},
};

#[inline]
fn normalize_axis(v: f64, range: AxisRange) -> f64 {
    let span = range.span();
    if span == 0.0 {
        return 0.0;
    }
    ((v - range.min) / span).clamp(0.0, 1.0)
}

/// Map a log-space point into [0,1]². Points outside the bounds clamp to the
/// edge; dynamic per-frame bounds can legitimately place a point outside.
pub fn normalize(point: PlotPoint, bounds: &Bounds) -> PlotPoint {
    PlotPoint {
        date: point.date,
        x: normalize_axis(point.x, bounds.horizontal),
        y: normalize_axis(point.y, bounds.vertical),
    }
}
