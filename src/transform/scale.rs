//! Axis bounds: fixed from configuration, or recomputed from visible data.

use crate::model::PlotSeries;

/// Half-span used to widen a degenerate (zero-width) axis range.
const DEGENERATE_HALF_SPAN: f64 = 0.5;

/// One axis extent in log space, `min <= max` always.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self {
            min: a.min + (b.min - a.min) * t,
            max: a.max + (b.max - a.max) * t,
        }
    }
}

/// Log-space bounds for both axes of one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub horizontal: AxisRange,
    pub vertical: AxisRange,
}

impl Bounds {
    /// The fallback bounds used when nothing is visible and nothing is pinned.
    pub fn unit() -> Self {
        Self {
            horizontal: AxisRange { min: 0.0, max: 1.0 },
            vertical: AxisRange { min: 0.0, max: 1.0 },
        }
    }

    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self {
            horizontal: AxisRange::lerp(a.horizontal, b.horizontal, t),
            vertical: AxisRange::lerp(a.vertical, b.vertical, t),
        }
    }
}

/// Computes per-frame axis bounds. An explicit override pins that edge for
/// the whole run; any unpinned edge follows the extent of the visible data,
/// padded proportionally. With all four edges pinned the scale is constant.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScaleGenerator {
    pub horizontal_min: Option<f64>,
    pub horizontal_max: Option<f64>,
    pub vertical_min: Option<f64>,
    pub vertical_max: Option<f64>,
    pub padding: f64,
}

impl ScaleGenerator {
    pub fn new(
        horizontal_min: Option<f64>,
        horizontal_max: Option<f64>,
        vertical_min: Option<f64>,
        vertical_max: Option<f64>,
        padding: f64,
    ) -> Self {
        Self {
            horizontal_min,
            horizontal_max,
            vertical_min,
            vertical_max,
            padding,
        }
    }

    /// True when every edge is pinned and bounds cannot vary between frames.
    pub fn is_fixed(&self) -> bool {
        self.horizontal_min.is_some()
            && self.horizontal_max.is_some()
            && self.vertical_min.is_some()
            && self.vertical_max.is_some()
    }

    /// Bounds for the given visible points. Deterministic, never inverted.
    pub fn generate(&self, visible: &[PlotSeries]) -> Bounds {
        let mut x_extent: Option<(f64, f64)> = None;
        let mut y_extent: Option<(f64, f64)> = None;
        for series in visible {
            for p in &series.points {
                x_extent = Some(merge(x_extent, p.x));
                y_extent = Some(merge(y_extent, p.y));
            }
        }
        Bounds {
            horizontal: self.axis(self.horizontal_min, self.horizontal_max, x_extent),
            vertical: self.axis(self.vertical_min, self.vertical_max, y_extent),
        }
    }

    fn axis(&self, pin_min: Option<f64>, pin_max: Option<f64>, extent: Option<(f64, f64)>) -> AxisRange {
        let (data_min, data_max) = match extent {
            Some((lo, hi)) if hi > lo => {
                let pad = self.padding * (hi - lo);
                (lo - pad, hi + pad)
            }
            // Degenerate: a single value (or all equal) widens to a defined
            // minimum span so the normalized scale keeps a non-zero width.
            Some((lo, _)) => (lo - DEGENERATE_HALF_SPAN, lo + DEGENERATE_HALF_SPAN),
            None => (0.0, 1.0),
        };
        let min = pin_min.unwrap_or(data_min);
        let max = pin_max.unwrap_or(data_max);
        if min <= max {
            AxisRange { min, max }
        } else {
            // Pinned edges that cross the data collapse to a degenerate range
            // around the pinned minimum rather than inverting.
            AxisRange {
                min,
                max: min + DEGENERATE_HALF_SPAN * 2.0,
            }
        }
    }
}

fn merge(extent: Option<(f64, f64)>, v: f64) -> (f64, f64) {
    match extent {
        Some((lo, hi)) => (lo.min(v), hi.max(v)),
        None => (v, v),
    }
}
