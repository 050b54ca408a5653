//! Chart data model: raw measurements loaded once per run, and the derived
//! plot series consumed by the rendering pipeline.

use chrono::NaiveDate;

use crate::{
    foundation::error::{ChartError, ChartResult},
    transform::log::Log10Transform,
};

/// Trailing window, in days, over which the "new" coordinate is accumulated.
const WEEKLY_WINDOW: usize = 7;

/// One cumulative measurement of a named series on a given day.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// A named series of raw measurements, ordered by non-decreasing date.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TimeSeries {
    pub name: String,
    points: Vec<RawPoint>,
}

impl TimeSeries {
    /// Create a series, validating the date-order invariant.
    pub fn new(name: impl Into<String>, points: Vec<RawPoint>) -> ChartResult<Self> {
        let name = name.into();
        if !points.windows(2).all(|w| w[0].date <= w[1].date) {
            return Err(ChartError::data(format!(
                "time series '{name}' is not ordered by date"
            )));
        }
        Ok(Self { name, points })
    }

    pub fn points(&self) -> &[RawPoint] {
        &self.points
    }
}

/// A point in chart space. Successive transform stages reinterpret the same
/// shape as log-space, normalized [0,1] and finally canvas pixels; each stage
/// produces a new value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotPoint {
    pub date: NaiveDate,
    pub x: f64,
    pub y: f64,
}

/// A displayable series: a short code, a stroke color and log-space points
/// derived 1:1 from a [`TimeSeries`]. Built once at startup, never mutated.
#[derive(Clone, Debug)]
pub struct PlotSeries {
    pub code: String,
    pub color: String,
    pub points: Vec<PlotPoint>,
}

impl PlotSeries {
    /// Derive the log-space plot points for one series: x is the cumulative
    /// total, y the increase over the trailing [`WEEKLY_WINDOW`] days.
    pub fn from_time_series(
        series: &TimeSeries,
        code: impl Into<String>,
        color: impl Into<String>,
        log: &Log10Transform,
    ) -> Self {
        let raw = series.points();
        let points = raw
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let weekly = if i >= WEEKLY_WINDOW {
                    p.value - raw[i - WEEKLY_WINDOW].value
                } else {
                    p.value
                };
                log.transform(PlotPoint {
                    date: p.date,
                    x: p.value,
                    y: weekly,
                })
            })
            .collect();
        Self {
            code: code.into(),
            color: color.into(),
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn series(values: &[f64]) -> TimeSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| RawPoint {
                date: day(1 + i as u32),
                value: *v,
            })
            .collect();
        TimeSeries::new("s", points).unwrap()
    }

    #[test]
    fn rejects_unordered_dates() {
        let points = vec![
            RawPoint { date: day(2), value: 1.0 },
            RawPoint { date: day(1), value: 2.0 },
        ];
        let err = TimeSeries::new("bad", points).unwrap_err();
        assert!(err.to_string().contains("not ordered by date"));
    }

    #[test]
    fn weekly_coordinate_uses_full_total_for_early_points() {
        let ts = series(&[10.0, 20.0, 30.0]);
        let log = Log10Transform::new(1.0).unwrap();
        let plot = PlotSeries::from_time_series(&ts, "S", "#fff", &log);
        // Before a full window exists, the weekly increase is the total itself.
        assert_eq!(plot.points[2].x, 30.0f64.log10());
        assert_eq!(plot.points[2].y, 30.0f64.log10());
    }

    #[test]
    fn weekly_coordinate_is_trailing_difference() {
        let values: Vec<f64> = (1..=10).map(|v| f64::from(v) * 10.0).collect();
        let ts = series(&values);
        let log = Log10Transform::new(1.0).unwrap();
        let plot = PlotSeries::from_time_series(&ts, "S", "#fff", &log);
        // Point 8 (index 7): 80 total, 80 - 10 = 70 new over the last week.
        assert_eq!(plot.points[7].x, 80.0f64.log10());
        assert_eq!(plot.points[7].y, 70.0f64.log10());
    }

    #[test]
    fn derivation_is_one_to_one() {
        let ts = series(&[1.0, 2.0, 3.0, 4.0]);
        let log = Log10Transform::new(1.0).unwrap();
        let plot = PlotSeries::from_time_series(&ts, "S", "#fff", &log);
        assert_eq!(plot.points.len(), ts.points().len());
        assert_eq!(plot.points[0].date, day(1));
        assert_eq!(plot.points[3].date, day(4));
    }
}
