//! chartlapse renders an animated log-log scatter/line chart as an ordered
//! sequence of still SVG frames, assembled into a video externally (ffmpeg
//! over the image sequence).
//!
//! The interesting parts are temporal, not pictorial: an [`Animation`]
//! decides how many frames exist and which cutoff each frame reveals, a
//! [`FrameScheduler`] attaches axis bounds to every descriptor, and the
//! transform chain maps raw values through log10 space and normalized
//! [0,1]² space into plot pixels identically for every frame.
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod data;
pub mod foundation;
pub mod model;
pub mod render;
pub mod transform;

pub use crate::animation::{
    Animation, FixedFrameAnimation, FrameFilterInfo, TimeAnimation,
    ease::Ease,
    schedule::{FrameInfo, FrameScheduler},
};
pub use crate::config::{
    ColorSchema, Config, DataSourceConfig, Defaults, Layout, Overrides, RunOptions, SeriesConfig,
    resolve_title,
};
pub use crate::data::{CsvDataProvider, DataProvider};
pub use crate::foundation::core::{Canvas, FrameIndex, Point};
pub use crate::foundation::error::{ChartError, ChartResult};
pub use crate::model::{PlotPoint, PlotSeries, RawPoint, TimeSeries};
pub use crate::render::filter::FrameWindowFilter;
pub use crate::render::pipeline::ChartRenderer;
pub use crate::render::sink::{FrameSink, InMemorySink, SvgDirectorySink};
pub use crate::transform::canvas::PlotArea;
pub use crate::transform::log::Log10Transform;
pub use crate::transform::scale::{AxisRange, Bounds, ScaleGenerator};
