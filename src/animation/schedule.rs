//! Composes animations into one ordered run and resolves per-frame bounds.

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    animation::{Animation, FrameFilterInfo, ease::Ease},
    model::PlotSeries,
    render::filter::FrameWindowFilter,
    transform::scale::Bounds,
};

/// A frame descriptor plus the axis bounds chosen for that frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInfo {
    pub filter: FrameFilterInfo,
    pub bounds: Bounds,
}

/// Walks one or more animations in sequence (typically a [`TimeAnimation`]
/// followed by a [`FixedFrameAnimation`] closing hold) and attaches bounds
/// to every descriptor.
///
/// Each day's target bounds come from that day's fully-revealed view.
/// Within a day, sub-frame bounds interpolate from the previous day's target
/// toward the current one with the zoom easing applied to the sub-frame
/// ratio, so a dynamic scale grows smoothly instead of popping once per day.
/// Easing never changes the frame count: the run total is exactly the sum of
/// the constituent animations' `count_frames()`.
///
/// [`TimeAnimation`]: crate::animation::TimeAnimation
/// [`FixedFrameAnimation`]: crate::animation::FixedFrameAnimation
pub struct FrameScheduler<'a> {
    series: &'a [PlotSeries],
    animations: Vec<Box<dyn Animation + 'a>>,
    zoom_easing: Ease,
    skip_zoom: bool,
}

struct DayState {
    day: Option<NaiveDate>,
    target: Bounds,
    previous: Bounds,
}

impl<'a> FrameScheduler<'a> {
    pub fn new(
        series: &'a [PlotSeries],
        animations: Vec<Box<dyn Animation + 'a>>,
        zoom_easing: Ease,
        skip_zoom: bool,
    ) -> Self {
        Self {
            series,
            animations,
            zoom_easing,
            skip_zoom,
        }
    }

    /// Total frames in the run: the sum over all constituent animations.
    pub fn count_frames(&self) -> u64 {
        self.animations.iter().map(|a| a.count_frames()).sum()
    }

    /// The ordered [`FrameInfo`] sequence for the whole run. Bounds for a
    /// dynamic scale depend on everything visible through the current frame,
    /// which forces this walk to stay sequential.
    pub fn frames(&self) -> impl Iterator<Item = FrameInfo> + '_ {
        let filter = FrameWindowFilter::new(self.series);
        let zoom_easing = self.zoom_easing;
        let skip_zoom = self.skip_zoom;
        let state = DayState {
            day: None,
            target: Bounds::unit(),
            previous: Bounds::unit(),
        };
        self.animations
            .iter()
            .flat_map(|anim| anim.frames().map(move |info| (&**anim, info)))
            .scan(state, move |state, (anim, info)| {
                if state.day != Some(info.date) {
                    let revealed = filter.apply(FrameFilterInfo {
                        date: info.date,
                        ratio: 1.0,
                    });
                    let target = anim.scale(&revealed);
                    state.previous = if state.day.is_some() { state.target } else { target };
                    state.target = target;
                    state.day = Some(info.date);
                    debug!(date = %info.date, ?target, "day bounds target");
                }
                // A full reveal lands on the day target exactly; easing only
                // shapes the sub-frames leading into it.
                let bounds = if skip_zoom || info.ratio >= 1.0 {
                    state.target
                } else {
                    Bounds::lerp(state.previous, state.target, zoom_easing.apply(info.ratio))
                };
                Some(FrameInfo {
                    filter: info,
                    bounds,
                })
            })
    }
}
