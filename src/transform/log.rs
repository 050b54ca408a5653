//! Base-10 log transform with a clamp floor for non-positive input.

use crate::{
    foundation::error::{ChartError, ChartResult},
    model::PlotPoint,
};

/// Maps raw coordinates into log10 space. Values at or below the floor clamp
/// to the floor first, so the output is always finite and ordering between
/// raw values is never reversed.
#[derive(Clone, Copy, Debug)]
pub struct Log10Transform {
    floor: f64,
}

impl Log10Transform {
    pub const DEFAULT_FLOOR: f64 = 1.0;

    /// Create a transform with the given clamp floor (must be > 0).
    pub fn new(floor: f64) -> ChartResult<Self> {
        if !(floor > 0.0) {
            return Err(ChartError::validation("log floor must be > 0"));
        }
        Ok(Self { floor })
    }

    /// Transform a single coordinate.
    #[inline]
    pub fn value(&self, v: f64) -> f64 {
        v.max(self.floor).log10()
    }

    /// Transform both coordinates of a point, keeping its date.
    pub fn transform(&self, point: PlotPoint) -> PlotPoint {
        PlotPoint {
            date: point.date,
            x: self.value(point.x),
            y: self.value(point.y),
        }
    }
}

impl Default for Log10Transform {
    fn default() -> Self {
        Self {
            floor: Self::DEFAULT_FLOOR,
        }
    }
}
