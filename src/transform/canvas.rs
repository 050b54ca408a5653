//! Normalized [0,1]² to plot-area pixel mapping.

use crate::{
    foundation::error::{ChartError, ChartResult},
    model::PlotPoint,
};

/// The plot rectangle in pixel coordinates. Pixel origin is top-left, so
/// `top < bottom` numerically while the data origin sits at the bottom-left.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn validate(&self) -> ChartResult<()> {
        if self.left >= self.right || self.top >= self.bottom {
            return Err(ChartError::validation(
                "plot area requires left < right and top < bottom",
            ));
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Map a normalized point into the plot area, flipping the vertical axis:
/// (0,0) lands on the bottom-left corner, (1,1) on the top-right.
#[inline]
pub fn to_canvas(point: PlotPoint, area: &PlotArea) -> PlotPoint {
    PlotPoint {
        date: point.date,
        x: area.left + point.x * area.width(),
        y: area.bottom - point.y * area.height(),
    }
}
