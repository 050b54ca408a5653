//! Run configuration: a JSON file naming data sources, color schemas and
//! layouts, plus default run options that CLI flags override. The loaded
//! [`Config`] is constructed once at process start and passed down
//! explicitly; nothing in the pipeline resolves configuration ambiently.

use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::NaiveDate;

use crate::{
    animation::ease::Ease,
    foundation::{
        core::Canvas,
        error::{ChartError, ChartResult},
    },
    transform::canvas::PlotArea,
};

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub data_sources: BTreeMap<String, DataSourceConfig>,
    pub color_schemas: BTreeMap<String, ColorSchema>,
    pub layouts: BTreeMap<String, Layout>,
    #[serde(default)]
    pub defaults: Defaults,
}

impl Config {
    /// Load and parse the configuration file.
    pub fn from_path(path: &Path) -> ChartResult<Self> {
        let file = File::open(path)
            .with_context(|| format!("open configuration '{}'", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("parse configuration '{}'", path.display()))?;
        Ok(config)
    }

    pub fn data_source(&self, name: &str) -> ChartResult<&DataSourceConfig> {
        self.data_sources
            .get(name)
            .ok_or_else(|| ChartError::config(format!("data source not found: {name}")))
    }

    pub fn color_schema(&self, name: &str) -> ChartResult<&ColorSchema> {
        self.color_schemas
            .get(name)
            .ok_or_else(|| ChartError::config(format!("color schema not found: {name}")))
    }

    pub fn layout(&self, name: &str) -> ChartResult<&Layout> {
        self.layouts
            .get(name)
            .ok_or_else(|| ChartError::config(format!("layout not found: {name}")))
    }
}

/// One named data source: a title, the file it is read from, and the series
/// it contributes to the chart.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceConfig {
    pub title: String,
    pub file: PathBuf,
    pub series: Vec<SeriesConfig>,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesConfig {
    /// Series name as it appears in the data file.
    pub name: String,
    /// Short display code drawn next to the newest point.
    pub code: String,
    pub color: String,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
    pub color: String,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStroke {
    pub width: f64,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleStyle {
    pub line_color: String,
    pub line_width: f64,
    pub axis_font: FontSpec,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesLabelStyle {
    pub font: FontSpec,
    /// Pixel offset from the newest point to the label anchor.
    pub offset: [f64; 2],
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimebarStyle {
    pub color: String,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatermarkStyle {
    pub text: String,
    pub font: FontSpec,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSchema {
    pub background: String,
    pub line_stroke: LineStroke,
    pub scale: ScaleStyle,
    pub title: FontSpec,
    pub date: FontSpec,
    pub series_label: SeriesLabelStyle,
    pub timebar: TimebarStyle,
    pub watermark: WatermarkStyle,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimebarLayout {
    pub height: f64,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub canvas_size: Canvas,
    pub plot_area: PlotArea,
    /// Marker radius in pixels.
    pub circle_size: f64,
    pub date_position: [f64; 2],
    #[serde(default)]
    pub title_position: Option<[f64; 2]>,
    #[serde(default)]
    pub watermark_position: Option<[f64; 2]>,
    #[serde(default)]
    pub timebar: Option<TimebarLayout>,
}

/// Default run options, overridable per run by CLI flags.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Defaults {
    pub frames: u32,
    pub extra_frames: u32,
    pub days: u32,
    pub source: String,
    pub schema: String,
    pub layout: String,
    pub title: Option<String>,
    pub horizontal_axis_label: String,
    pub vertical_axis_label: String,
    pub zoom_easing: String,
    pub timebar_easing: String,
    pub date_format: String,
    pub draw_markers: bool,
    pub skip_zoom: bool,
    pub hide_watermark: bool,
    pub series_line_width: Option<f64>,
    pub horizontal_min: Option<f64>,
    pub horizontal_max: Option<f64>,
    pub vertical_min: Option<f64>,
    pub vertical_max: Option<f64>,
    pub scale_padding: f64,
    pub log_floor: f64,
    pub output: PathBuf,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            frames: 30,
            extra_frames: 30,
            days: 0,
            source: String::new(),
            schema: "default".into(),
            layout: "square".into(),
            title: None,
            horizontal_axis_label: "total (log)".into(),
            vertical_axis_label: "new in last week (log)".into(),
            zoom_easing: "out-cubic".into(),
            timebar_easing: "linear".into(),
            date_format: "%Y-%m-%d".into(),
            draw_markers: false,
            skip_zoom: false,
            hide_watermark: false,
            series_line_width: None,
            horizontal_min: None,
            horizontal_max: None,
            vertical_min: None,
            vertical_max: None,
            scale_padding: 0.05,
            log_floor: 1.0,
            output: PathBuf::from("output"),
        }
    }
}

/// CLI-supplied overrides; `None` (or `false` for toggles) keeps the
/// configured default.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub frames: Option<u32>,
    pub extra_frames: Option<u32>,
    pub days: Option<u32>,
    pub source: Option<String>,
    pub schema: Option<String>,
    pub layout: Option<String>,
    pub filter: Option<String>,
    pub title: Option<String>,
    pub horizontal_axis_label: Option<String>,
    pub vertical_axis_label: Option<String>,
    pub zoom_easing: Option<String>,
    pub timebar_easing: Option<String>,
    pub date_format: Option<String>,
    pub draw_markers: bool,
    pub skip_zoom: bool,
    pub hide_watermark: bool,
    pub series_line_width: Option<f64>,
    pub horizontal_min: Option<f64>,
    pub horizontal_max: Option<f64>,
    pub vertical_min: Option<f64>,
    pub vertical_max: Option<f64>,
    pub output: Option<PathBuf>,
}

/// Fully resolved options for one run.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub frames_per_day: u32,
    pub extra_frames: u32,
    pub window_days: u32,
    pub source: String,
    pub schema: String,
    pub layout: String,
    /// Series codes to keep, when the run narrows the data source.
    pub series_filter: Option<Vec<String>>,
    pub title: Option<String>,
    pub horizontal_axis_label: String,
    pub vertical_axis_label: String,
    pub zoom_easing: Ease,
    pub timebar_easing: Ease,
    pub date_format: String,
    pub draw_markers: bool,
    pub skip_zoom: bool,
    pub hide_watermark: bool,
    pub series_line_width: Option<f64>,
    pub horizontal_min: Option<f64>,
    pub horizontal_max: Option<f64>,
    pub vertical_min: Option<f64>,
    pub vertical_max: Option<f64>,
    pub scale_padding: f64,
    pub log_floor: f64,
    pub output: PathBuf,
}

impl RunOptions {
    /// Merge CLI overrides over the configured defaults and resolve easing
    /// identifiers.
    pub fn resolve(defaults: &Defaults, overrides: Overrides) -> ChartResult<Self> {
        let zoom_name = overrides
            .zoom_easing
            .unwrap_or_else(|| defaults.zoom_easing.clone());
        let timebar_name = overrides
            .timebar_easing
            .unwrap_or_else(|| defaults.timebar_easing.clone());
        let series_filter = overrides.filter.map(|f| {
            f.split(',')
                .map(|code| code.trim().to_string())
                .filter(|code| !code.is_empty())
                .collect::<Vec<_>>()
        });
        Ok(Self {
            frames_per_day: overrides.frames.unwrap_or(defaults.frames),
            extra_frames: overrides.extra_frames.unwrap_or(defaults.extra_frames),
            window_days: overrides.days.unwrap_or(defaults.days),
            source: overrides.source.unwrap_or_else(|| defaults.source.clone()),
            schema: overrides.schema.unwrap_or_else(|| defaults.schema.clone()),
            layout: overrides.layout.unwrap_or_else(|| defaults.layout.clone()),
            series_filter,
            title: overrides.title.or_else(|| defaults.title.clone()),
            horizontal_axis_label: overrides
                .horizontal_axis_label
                .unwrap_or_else(|| defaults.horizontal_axis_label.clone()),
            vertical_axis_label: overrides
                .vertical_axis_label
                .unwrap_or_else(|| defaults.vertical_axis_label.clone()),
            zoom_easing: Ease::from_name(&zoom_name)?,
            timebar_easing: Ease::from_name(&timebar_name)?,
            date_format: overrides
                .date_format
                .unwrap_or_else(|| defaults.date_format.clone()),
            draw_markers: overrides.draw_markers || defaults.draw_markers,
            skip_zoom: overrides.skip_zoom || defaults.skip_zoom,
            hide_watermark: overrides.hide_watermark || defaults.hide_watermark,
            series_line_width: overrides.series_line_width.or(defaults.series_line_width),
            horizontal_min: overrides.horizontal_min.or(defaults.horizontal_min),
            horizontal_max: overrides.horizontal_max.or(defaults.horizontal_max),
            vertical_min: overrides.vertical_min.or(defaults.vertical_min),
            vertical_max: overrides.vertical_max.or(defaults.vertical_max),
            scale_padding: defaults.scale_padding,
            log_floor: defaults.log_floor,
            output: overrides.output.unwrap_or_else(|| defaults.output.clone()),
        })
    }
}

/// The run title: the override wins over the data source title, and the
/// `{date}` placeholder expands to the last data date.
pub fn resolve_title(
    source_title: &str,
    override_title: Option<&str>,
    last_date: Option<NaiveDate>,
    date_format: &str,
) -> String {
    let title = override_title.unwrap_or(source_title);
    match last_date {
        Some(date) => title.replace("{date}", &date.format(date_format).to_string()),
        None => title.to_string(),
    }
}
