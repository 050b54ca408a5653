//! Per-frame data windowing: which points a frame reveals, and how far the
//! newest one has travelled toward its final position.

use crate::{
    animation::FrameFilterInfo,
    model::{PlotPoint, PlotSeries},
};

#[inline]
fn lerp_point(from: PlotPoint, to: PlotPoint, t: f64) -> PlotPoint {
    PlotPoint {
        date: to.date,
        x: from.x + (to.x - from.x) * t,
        y: from.y + (to.y - from.y) * t,
    }
}

/// Selects the subset of every series visible in one frame. Points dated
/// strictly before the cutoff pass through unchanged; a point exactly at the
/// cutoff is interpolated from its predecessor by the frame's ratio; later
/// points are excluded.
pub struct FrameWindowFilter<'a> {
    series: &'a [PlotSeries],
}

impl<'a> FrameWindowFilter<'a> {
    pub fn new(series: &'a [PlotSeries]) -> Self {
        Self { series }
    }

    /// Filtered copies of every series. A series with zero surviving points
    /// is valid and stays in the result (it renders as empty).
    pub fn apply(&self, info: FrameFilterInfo) -> Vec<PlotSeries> {
        self.series
            .iter()
            .map(|series| {
                // Points are date-ordered, so the visible prefix is contiguous.
                let before = series.points.partition_point(|p| p.date < info.date);
                let mut points: Vec<PlotPoint> = series.points[..before].to_vec();
                if let Some(at_cutoff) = series.points.get(before).filter(|p| p.date == info.date) {
                    let revealed = match points.last() {
                        Some(previous) if info.ratio < 1.0 => {
                            lerp_point(*previous, *at_cutoff, info.ratio)
                        }
                        _ => *at_cutoff,
                    };
                    points.push(revealed);
                }
                PlotSeries {
                    code: series.code.clone(),
                    color: series.color.clone(),
                    points,
                }
            })
            .collect()
    }
}
