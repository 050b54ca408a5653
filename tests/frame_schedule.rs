//! Frame scheduling properties exercised through the public API.

use chartlapse::{
    Animation, Bounds, Ease, FixedFrameAnimation, FrameFilterInfo, FrameScheduler, PlotPoint,
    PlotSeries, ScaleGenerator, TimeAnimation,
};
use chrono::NaiveDate;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 4, d).unwrap()
}

fn reference_series(n: u32) -> Vec<PlotSeries> {
    vec![PlotSeries {
        code: "S".into(),
        color: "#ffffff".into(),
        points: (0..n)
            .map(|i| PlotPoint {
                date: day(1 + i),
                x: f64::from(i + 1),
                y: f64::from(i + 1) * 0.5,
            })
            .collect(),
    }]
}

#[test]
fn scenario_a_full_history_count() {
    // 6 points on consecutive days, 3 frames per day, full history.
    let series = reference_series(6);
    let anim = TimeAnimation::new(&series, 3, 0, ScaleGenerator::default()).unwrap();
    assert_eq!(anim.count_frames(), 16);
    assert_eq!(anim.frames().count(), 16);
}

#[test]
fn scenario_b_trailing_window() {
    let series = reference_series(6);
    let anim = TimeAnimation::new(&series, 3, 2, ScaleGenerator::default()).unwrap();
    assert_eq!(anim.count_frames(), 4);
    let frames: Vec<FrameFilterInfo> = anim.frames().collect();
    assert_eq!(frames[0].date, day(5));
    assert_eq!(frames[0].ratio, 1.0);
    assert_eq!(frames.last().unwrap().date, day(6));
}

#[test]
fn scenario_c_single_point() {
    let series = reference_series(1);
    let anim = TimeAnimation::new(&series, 3, 0, ScaleGenerator::default()).unwrap();
    assert_eq!(anim.count_frames(), 1);
    let frames: Vec<FrameFilterInfo> = anim.frames().collect();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].date, day(1));
    assert_eq!(frames[0].ratio, 1.0);
}

#[test]
fn fixed_frame_animation_holds_the_final_state() {
    let series = reference_series(6);
    let anim = FixedFrameAnimation::new(&series, 12, ScaleGenerator::default());
    assert_eq!(anim.count_frames(), 12);
    let frames: Vec<FrameFilterInfo> = anim.frames().collect();
    assert_eq!(frames.len(), 12);
    assert!(frames.iter().all(|f| f.date == day(6) && f.ratio == 1.0));
}

#[test]
fn first_time_animation_frame_is_never_interpolated() {
    for window in [0, 2, 4, 100] {
        let series = reference_series(8);
        let anim = TimeAnimation::new(&series, 6, window, ScaleGenerator::default()).unwrap();
        assert_eq!(anim.frames().next().unwrap().ratio, 1.0);
    }
}

#[test]
fn dates_are_non_decreasing_and_advance_by_single_days() {
    let series = reference_series(7);
    let anim = TimeAnimation::new(&series, 4, 0, ScaleGenerator::default()).unwrap();
    let frames: Vec<FrameFilterInfo> = anim.frames().collect();
    for w in frames.windows(2) {
        let delta = (w[1].date - w[0].date).num_days();
        assert!(delta == 0 || delta == 1);
        if delta == 1 {
            // A fresh day restarts the ratio sequence.
            assert!(w[1].ratio <= w[0].ratio || w[0].ratio == 1.0);
        } else {
            assert!(w[1].ratio > w[0].ratio);
        }
    }
}

#[test]
fn scheduler_total_is_the_sum_of_animation_counts() {
    let series = reference_series(5);
    let time = TimeAnimation::new(&series, 3, 0, ScaleGenerator::default()).unwrap();
    let hold = FixedFrameAnimation::new(&series, 9, ScaleGenerator::default());
    let expected = time.count_frames() + hold.count_frames();
    let animations: Vec<Box<dyn Animation>> = vec![Box::new(time), Box::new(hold)];
    let scheduler = FrameScheduler::new(&series, animations, Ease::OutCubic, false);
    assert_eq!(scheduler.count_frames(), expected);
    assert_eq!(scheduler.frames().count() as u64, expected);
}

#[test]
fn pinned_bounds_are_constant_across_the_run() {
    let series = reference_series(5);
    let scale = ScaleGenerator::new(Some(0.0), Some(6.0), Some(0.0), Some(6.0), 0.0);
    let time = TimeAnimation::new(&series, 2, 0, scale).unwrap();
    let animations: Vec<Box<dyn Animation>> = vec![Box::new(time)];
    let scheduler = FrameScheduler::new(&series, animations, Ease::Linear, false);
    let bounds: Vec<Bounds> = scheduler.frames().map(|f| f.bounds).collect();
    assert!(bounds.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(bounds[0].horizontal.min, 0.0);
    assert_eq!(bounds[0].horizontal.max, 6.0);
}

#[test]
fn dynamic_bounds_grow_monotonically_for_growing_data() {
    let series = reference_series(6);
    let time = TimeAnimation::new(&series, 3, 0, ScaleGenerator::default()).unwrap();
    let animations: Vec<Box<dyn Animation>> = vec![Box::new(time)];
    let scheduler = FrameScheduler::new(&series, animations, Ease::Linear, false);
    let maxima: Vec<f64> = scheduler.frames().map(|f| f.bounds.horizontal.max).collect();
    for w in maxima.windows(2) {
        assert!(w[1] >= w[0] - 1e-12);
    }
}
