use std::path::PathBuf;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use chartlapse::{
    ChartRenderer, Config, DataProvider as _, Overrides, RunOptions, SvgDirectorySink,
    resolve_title,
};

#[derive(Parser, Debug)]
#[command(name = "chartlapse", version, about = "Render an animated log-log chart as SVG frames")]
struct Cli {
    /// Configuration JSON.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Frames rendered per data day.
    #[arg(long)]
    frames: Option<u32>,

    /// Closing hold frames appended after the reveal.
    #[arg(long)]
    extra_frames: Option<u32>,

    /// Trailing window in days (0 animates the full history).
    #[arg(long)]
    days: Option<u32>,

    /// Data source name from the configuration.
    #[arg(long)]
    source: Option<String>,

    /// Color schema name from the configuration.
    #[arg(long)]
    schema: Option<String>,

    /// Layout name from the configuration.
    #[arg(long)]
    layout: Option<String>,

    /// Comma-separated series codes to keep.
    #[arg(long)]
    filter: Option<String>,

    /// Chart title ({date} expands to the last data date).
    #[arg(long)]
    title: Option<String>,

    /// Horizontal axis label.
    #[arg(long = "h-label")]
    horizontal_axis_label: Option<String>,

    /// Vertical axis label.
    #[arg(long = "v-label")]
    vertical_axis_label: Option<String>,

    /// Easing curve for scale changes between days.
    #[arg(long)]
    zoom_easing: Option<String>,

    /// Easing curve for the timebar fill.
    #[arg(long)]
    timebar_easing: Option<String>,

    /// Date stamp format (chrono strftime).
    #[arg(long)]
    date_format: Option<String>,

    /// Draw a marker on every visible point, not only the newest one.
    #[arg(long)]
    draw_markers: bool,

    /// Jump to each day's scale instead of easing into it.
    #[arg(long)]
    skip_zoom: bool,

    /// Suppress the watermark.
    #[arg(long)]
    hide_watermark: bool,

    /// Series line width in pixels.
    #[arg(long)]
    line_width: Option<f64>,

    /// Pin the horizontal axis minimum (log10).
    #[arg(long = "h-min")]
    horizontal_min: Option<f64>,

    /// Pin the horizontal axis maximum (log10).
    #[arg(long = "h-max")]
    horizontal_max: Option<f64>,

    /// Pin the vertical axis minimum (log10).
    #[arg(long = "v-min")]
    vertical_min: Option<f64>,

    /// Pin the vertical axis maximum (log10).
    #[arg(long = "v-max")]
    vertical_max: Option<f64>,

    /// Output directory for the frame files.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            frames: self.frames,
            extra_frames: self.extra_frames,
            days: self.days,
            source: self.source.clone(),
            schema: self.schema.clone(),
            layout: self.layout.clone(),
            filter: self.filter.clone(),
            title: self.title.clone(),
            horizontal_axis_label: self.horizontal_axis_label.clone(),
            vertical_axis_label: self.vertical_axis_label.clone(),
            zoom_easing: self.zoom_easing.clone(),
            timebar_easing: self.timebar_easing.clone(),
            date_format: self.date_format.clone(),
            draw_markers: self.draw_markers,
            skip_zoom: self.skip_zoom,
            hide_watermark: self.hide_watermark,
            series_line_width: self.line_width,
            horizontal_min: self.horizontal_min,
            horizontal_max: self.horizontal_max,
            vertical_min: self.vertical_min,
            vertical_max: self.vertical_max,
            output: self.out.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chartlapse=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_path(&cli.config)?;
    let options = RunOptions::resolve(&config.defaults, cli.overrides())?;

    let mut source = config.data_source(&options.source)?.clone();
    if let Some(codes) = &options.series_filter {
        source = chartlapse::data::filter_series(&source, codes)?;
    }

    // Data files are resolved relative to the configuration file.
    let provider = chartlapse::data::provider_for_config(&cli.config);
    let time_series = provider.load(&source)?;

    if source.series.len() == 1 && !options.draw_markers {
        warn!("the data source contains only 1 series; consider --draw-markers");
    }

    let schema = config.color_schema(&options.schema)?;
    let layout = config.layout(&options.layout)?;

    // The first configured series is the reference for dates.
    let last_date = source
        .series
        .first()
        .and_then(|cfg| time_series.iter().find(|t| t.name == cfg.name))
        .and_then(|s| s.points().last())
        .map(|p| p.date);
    let title = resolve_title(
        &source.title,
        options.title.as_deref(),
        last_date,
        &options.date_format,
    );

    let renderer = ChartRenderer::new(
        title,
        &time_series,
        &source.series,
        schema,
        layout,
        &options,
    )?;
    let mut sink = SvgDirectorySink::new(options.output.clone());
    renderer.generate(&mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        sink.written(),
        options.output.display()
    );
    Ok(())
}
