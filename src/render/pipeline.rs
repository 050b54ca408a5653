//! The render orchestrator: walks the scheduled frame sequence in order and
//! turns each frame into a finished SVG document.

use kurbo::Point;
use tracing::info;

use crate::{
    animation::{
        Animation, FixedFrameAnimation, TimeAnimation,
        schedule::{FrameInfo, FrameScheduler},
    },
    config::{ColorSchema, Layout, RunOptions, SeriesConfig},
    foundation::{
        core::FrameIndex,
        error::{ChartError, ChartResult},
    },
    model::{PlotSeries, TimeSeries},
    render::{
        filter::FrameWindowFilter,
        sink::FrameSink,
        svg::{SvgFrame, TextAnchor},
    },
    transform::{canvas::to_canvas, log::Log10Transform, normalize::normalize, scale::ScaleGenerator},
};

#[derive(Debug)]
pub struct ChartRenderer<'a> {
    title: String,
    series: Vec<PlotSeries>,
    schema: &'a ColorSchema,
    layout: &'a Layout,
    options: &'a RunOptions,
}

impl<'a> ChartRenderer<'a> {
    /// Build the renderer, deriving the log-space plot series once up front.
    pub fn new(
        title: impl Into<String>,
        time_series: &[TimeSeries],
        series_configs: &[SeriesConfig],
        schema: &'a ColorSchema,
        layout: &'a Layout,
        options: &'a RunOptions,
    ) -> ChartResult<Self> {
        layout.plot_area.validate()?;
        let log = Log10Transform::new(options.log_floor)?;
        let series = series_configs
            .iter()
            .map(|cfg| {
                let found = time_series
                    .iter()
                    .find(|t| t.name == cfg.name)
                    .ok_or_else(|| {
                        ChartError::config(format!("time series not found: {}", cfg.name))
                    })?;
                Ok(PlotSeries::from_time_series(
                    found, &cfg.code, &cfg.color, &log,
                ))
            })
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(Self {
            title: title.into(),
            series,
            schema,
            layout,
            options,
        })
    }

    /// The derived log-space series, in configuration order.
    pub fn plot_series(&self) -> &[PlotSeries] {
        &self.series
    }

    /// Render the whole run into the sink. Frames are produced and finalized
    /// strictly in index order; the first error aborts the remaining
    /// sequence.
    #[tracing::instrument(skip(self, sink), fields(title = %self.title))]
    pub fn generate(&self, sink: &mut dyn FrameSink) -> ChartResult<()> {
        sink.begin(self.layout.canvas_size)?;

        let options = self.options;
        let scale = ScaleGenerator::new(
            options.horizontal_min,
            options.horizontal_max,
            options.vertical_min,
            options.vertical_max,
            options.scale_padding,
        );
        let mut animations: Vec<Box<dyn Animation>> = vec![Box::new(TimeAnimation::new(
            &self.series,
            options.frames_per_day,
            options.window_days,
            scale,
        )?)];
        if options.extra_frames > 0 {
            animations.push(Box::new(FixedFrameAnimation::new(
                &self.series,
                u64::from(options.extra_frames),
                scale,
            )));
        }
        let scheduler = FrameScheduler::new(
            &self.series,
            animations,
            options.zoom_easing,
            options.skip_zoom,
        );
        let total = scheduler.count_frames();
        info!(total_frames = total, fixed_scale = scale.is_fixed(), "rendering frame sequence");

        let filter = FrameWindowFilter::new(&self.series);
        for (index, frame_info) in scheduler.frames().enumerate() {
            let index = FrameIndex(index as u64);
            let frame = self.draw_frame(&filter, index, total, &frame_info);
            sink.push_frame(index, &frame.render())?;
        }
        sink.end()
    }

    fn draw_frame(
        &self,
        filter: &FrameWindowFilter<'_>,
        index: FrameIndex,
        total: u64,
        info: &FrameInfo,
    ) -> SvgFrame {
        let mut frame = SvgFrame::new(
            self.layout.canvas_size,
            &self.schema.background,
            self.layout.plot_area,
        );

        for series in &filter.apply(info.filter) {
            let points: Vec<Point> = series
                .points
                .iter()
                .map(|p| normalize(*p, &info.bounds))
                .map(|p| to_canvas(p, &self.layout.plot_area))
                .map(|p| Point::new(p.x, p.y))
                .collect();
            self.draw_series_line(&mut frame, &points, &series.color);
            self.draw_series_markers(&mut frame, &points, &series.color);
            self.draw_series_label(&mut frame, &points, &series.code);
        }

        self.draw_axes(&mut frame);
        self.draw_date(&mut frame, info.filter.date);
        self.draw_title(&mut frame);
        self.draw_timebar(&mut frame, index, total);
        if !self.options.hide_watermark {
            self.draw_watermark(&mut frame);
        }
        frame
    }

    fn draw_series_line(&self, frame: &mut SvgFrame, points: &[Point], color: &str) {
        if points.len() < 2 {
            return;
        }
        let width = self
            .options
            .series_line_width
            .unwrap_or(self.schema.line_stroke.width);
        frame.polyline(points.to_vec(), color, width, true);
    }

    fn draw_series_markers(&self, frame: &mut SvgFrame, points: &[Point], color: &str) {
        if self.options.draw_markers {
            for p in points {
                frame.circle(*p, self.layout.circle_size, color, true);
            }
        } else if let Some(last) = points.last() {
            frame.circle(*last, self.layout.circle_size, color, true);
        }
    }

    fn draw_series_label(&self, frame: &mut SvgFrame, points: &[Point], code: &str) {
        let Some(last) = points.last() else {
            return;
        };
        let style = &self.schema.series_label;
        let pos = Point::new(last.x + style.offset[0], last.y + style.offset[1]);
        frame.text(
            pos,
            code,
            &style.font.family,
            style.font.size,
            &style.font.color,
            TextAnchor::Start,
            None,
            true,
        );
    }

    fn draw_axes(&self, frame: &mut SvgFrame) {
        let area = self.layout.plot_area;
        let scale = &self.schema.scale;
        frame.polyline(
            vec![
                Point::new(area.left, area.top),
                Point::new(area.left, area.bottom),
                Point::new(area.right, area.bottom),
            ],
            &scale.line_color,
            scale.line_width,
            false,
        );
        let mid_x = (area.left + area.right) / 2.0;
        frame.text(
            Point::new(mid_x, area.bottom + scale.axis_font.size * 1.5),
            &self.options.horizontal_axis_label,
            &scale.axis_font.family,
            scale.axis_font.size,
            &scale.axis_font.color,
            TextAnchor::Middle,
            None,
            false,
        );
        let mid_y = (area.top + area.bottom) / 2.0;
        frame.text(
            Point::new(area.left - scale.axis_font.size, mid_y),
            &self.options.vertical_axis_label,
            &scale.axis_font.family,
            scale.axis_font.size,
            &scale.axis_font.color,
            TextAnchor::Middle,
            Some(-90.0),
            false,
        );
    }

    fn draw_date(&self, frame: &mut SvgFrame, date: chrono::NaiveDate) {
        let style = &self.schema.date;
        frame.text(
            Point::new(self.layout.date_position[0], self.layout.date_position[1]),
            date.format(&self.options.date_format).to_string(),
            &style.family,
            style.size,
            &style.color,
            TextAnchor::Start,
            None,
            false,
        );
    }

    fn draw_title(&self, frame: &mut SvgFrame) {
        let style = &self.schema.title;
        let pos = self
            .layout
            .title_position
            .map(|p| Point::new(p[0], p[1]))
            .unwrap_or_else(|| {
                Point::new(
                    f64::from(self.layout.canvas_size.width) / 2.0,
                    style.size * 2.0,
                )
            });
        frame.text(
            pos,
            &self.title,
            &style.family,
            style.size,
            &style.color,
            TextAnchor::Middle,
            None,
            false,
        );
    }

    fn draw_timebar(&self, frame: &mut SvgFrame, index: FrameIndex, total: u64) {
        let Some(timebar) = &self.layout.timebar else {
            return;
        };
        let progress = if total <= 1 {
            1.0
        } else {
            self.options
                .timebar_easing
                .apply(index.0 as f64 / (total - 1) as f64)
        };
        let canvas = self.layout.canvas_size;
        frame.rect(
            0.0,
            f64::from(canvas.height) - timebar.height,
            progress * f64::from(canvas.width),
            timebar.height,
            &self.schema.timebar.color,
        );
    }

    fn draw_watermark(&self, frame: &mut SvgFrame) {
        let style = &self.schema.watermark;
        let canvas = self.layout.canvas_size;
        let pos = self
            .layout
            .watermark_position
            .map(|p| Point::new(p[0], p[1]))
            .unwrap_or_else(|| {
                Point::new(
                    f64::from(canvas.width) - 12.0,
                    f64::from(canvas.height) - 12.0,
                )
            });
        frame.text(
            pos,
            &style.text,
            &style.font.family,
            style.font.size,
            &style.font.color,
            TextAnchor::End,
            None,
            false,
        );
    }
}
