//! Frame scheduling: how many frames exist and which cutoff each one shows.
//!
//! An [`Animation`] is a closed contract with exactly two implementations:
//! [`TimeAnimation`] reveals a date range day by day with interpolated
//! sub-frames, [`FixedFrameAnimation`] holds the final state. Frame
//! sequences are finite, lazily produced and independently re-creatable:
//! calling [`Animation::frames`] again yields a fresh identical traversal.

pub mod ease;
pub mod schedule;

use chrono::{Duration, NaiveDate};

use crate::{
    foundation::error::{ChartError, ChartResult},
    model::PlotSeries,
    transform::scale::{Bounds, ScaleGenerator},
};

/// Cutoff date plus reveal fraction for one frame. `ratio` is in (0, 1]:
/// 1 shows the cutoff day fully, smaller values show a partial transition
/// into it. Ratios are always derived from integer sub-frame indices so
/// frame boundaries stay exact over long runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameFilterInfo {
    pub date: NaiveDate,
    pub ratio: f64,
}

pub trait Animation {
    /// Number of descriptors [`Self::frames`] will yield.
    fn count_frames(&self) -> u64;

    /// A fresh, finite descriptor sequence. No cursor state is shared
    /// between calls.
    fn frames(&self) -> Box<dyn Iterator<Item = FrameFilterInfo> + '_>;

    /// Axis bounds for the data visible in one frame, per the configured
    /// bounds strategy.
    fn scale(&self, visible: &[PlotSeries]) -> Bounds;
}

/// Reveals the reference series' date range: one fully-shown anchor day,
/// then `frames_per_day` interpolated sub-frames for every following day.
pub struct TimeAnimation {
    frames_per_day: u32,
    /// `(first, last)` animated dates; `None` when the reference series is empty.
    range: Option<(NaiveDate, NaiveDate)>,
    scale: ScaleGenerator,
}

impl TimeAnimation {
    /// `window_days == 0` animates the full history; otherwise only the
    /// trailing window, clipped to the data actually available.
    pub fn new(
        series: &[PlotSeries],
        frames_per_day: u32,
        window_days: u32,
        scale: ScaleGenerator,
    ) -> ChartResult<Self> {
        if frames_per_day == 0 {
            return Err(ChartError::animation("frames per day must be >= 1"));
        }
        let reference = series.first().map(|s| s.points.as_slice()).unwrap_or(&[]);
        let range = match (reference.first(), reference.last()) {
            (Some(first), Some(last)) => {
                let first = if window_days == 0 {
                    first.date
                } else {
                    let requested = last.date - Duration::days(i64::from(window_days) - 1);
                    requested.max(first.date)
                };
                Some((first, last.date))
            }
            _ => None,
        };
        Ok(Self {
            frames_per_day,
            range,
            scale,
        })
    }

    fn day_count(&self) -> u64 {
        match self.range {
            Some((first, last)) => (last - first).num_days() as u64,
            None => 0,
        }
    }
}

impl Animation for TimeAnimation {
    fn count_frames(&self) -> u64 {
        match self.range {
            Some(_) => 1 + u64::from(self.frames_per_day) * self.day_count(),
            None => 0,
        }
    }

    fn frames(&self) -> Box<dyn Iterator<Item = FrameFilterInfo> + '_> {
        let Some((first, _)) = self.range else {
            return Box::new(std::iter::empty());
        };
        let frames_per_day = self.frames_per_day;
        let anchor = std::iter::once(FrameFilterInfo {
            date: first,
            ratio: 1.0,
        });
        let reveal = (1..=self.day_count()).flat_map(move |day| {
            let date = first + Duration::days(day as i64);
            (1..=frames_per_day).map(move |f| FrameFilterInfo {
                date,
                ratio: f64::from(f) / f64::from(frames_per_day),
            })
        });
        Box::new(anchor.chain(reveal))
    }

    fn scale(&self, visible: &[PlotSeries]) -> Bounds {
        self.scale.generate(visible)
    }
}

/// Holds the final state of the reference series for a fixed number of
/// frames, e.g. a closing shot after the reveal.
pub struct FixedFrameAnimation {
    frame_count: u64,
    info: Option<FrameFilterInfo>,
    scale: ScaleGenerator,
}

impl FixedFrameAnimation {
    pub fn new(series: &[PlotSeries], frame_count: u64, scale: ScaleGenerator) -> Self {
        let info = series
            .first()
            .and_then(|s| s.points.last())
            .map(|p| FrameFilterInfo {
                date: p.date,
                ratio: 1.0,
            });
        Self {
            frame_count,
            info,
            scale,
        }
    }
}

impl Animation for FixedFrameAnimation {
    fn count_frames(&self) -> u64 {
        match self.info {
            Some(_) => self.frame_count,
            None => 0,
        }
    }

    fn frames(&self) -> Box<dyn Iterator<Item = FrameFilterInfo> + '_> {
        match self.info {
            Some(info) => Box::new(std::iter::repeat(info).take(self.frame_count as usize)),
            None => Box::new(std::iter::empty()),
        }
    }

    fn scale(&self, visible: &[PlotSeries]) -> Bounds {
        self.scale.generate(visible)
    }
}
