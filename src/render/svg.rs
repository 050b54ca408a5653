//! The vector drawing surface: one SVG document per frame.

use std::fmt::Write as _;

use kurbo::Point;

use crate::{foundation::core::Canvas, transform::canvas::PlotArea};

/// Text alignment relative to its anchor position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Clone, Debug)]
enum SvgElement {
    Polyline {
        points: Vec<Point>,
        color: String,
        width: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        color: String,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: String,
    },
    Text {
        pos: Point,
        content: String,
        family: String,
        size: f64,
        color: String,
        anchor: TextAnchor,
        rotate: Option<f64>,
    },
}

/// A single frame under construction. Series marks go into a group clipped
/// to the plot area; decorations (axes, labels, date stamp) render on top,
/// unclipped.
#[derive(Debug)]
pub struct SvgFrame {
    canvas: Canvas,
    background: String,
    clip: PlotArea,
    clipped: Vec<SvgElement>,
    decorations: Vec<SvgElement>,
}

impl SvgFrame {
    pub fn new(canvas: Canvas, background: impl Into<String>, clip: PlotArea) -> Self {
        Self {
            canvas,
            background: background.into(),
            clip,
            clipped: Vec::new(),
            decorations: Vec::new(),
        }
    }

    pub fn polyline(&mut self, points: Vec<Point>, color: impl Into<String>, width: f64, clipped: bool) {
        self.push(
            SvgElement::Polyline {
                points,
                color: color.into(),
                width,
            },
            clipped,
        );
    }

    pub fn circle(&mut self, center: Point, radius: f64, color: impl Into<String>, clipped: bool) {
        self.push(
            SvgElement::Circle {
                center,
                radius,
                color: color.into(),
            },
            clipped,
        );
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: impl Into<String>) {
        self.push(
            SvgElement::Rect {
                x,
                y,
                width,
                height,
                color: color.into(),
            },
            false,
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        pos: Point,
        content: impl Into<String>,
        family: impl Into<String>,
        size: f64,
        color: impl Into<String>,
        anchor: TextAnchor,
        rotate: Option<f64>,
        clipped: bool,
    ) {
        self.push(
            SvgElement::Text {
                pos,
                content: content.into(),
                family: family.into(),
                size,
                color: color.into(),
                anchor,
                rotate,
            },
            clipped,
        );
    }

    fn push(&mut self, element: SvgElement, clipped: bool) {
        if clipped {
            self.clipped.push(element);
        } else {
            self.decorations.push(element);
        }
    }

    /// Serialize the frame to an SVG document.
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.canvas.width,
            h = self.canvas.height,
        );
        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            self.background
        );
        let _ = writeln!(
            svg,
            r#"  <defs><clipPath id="plot-area"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"#,
            self.clip.left,
            self.clip.top,
            self.clip.width(),
            self.clip.height(),
        );
        svg.push_str("  <g clip-path=\"url(#plot-area)\">\n");
        for element in &self.clipped {
            let _ = writeln!(svg, "    {}", element_to_svg(element));
        }
        svg.push_str("  </g>\n");
        for element in &self.decorations {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }
        svg.push_str("</svg>\n");
        svg
    }
}

fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Polyline { points, color, width } => {
            let points_str: String = points
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                r#"<polyline points="{points_str}" fill="none" stroke="{color}" stroke-width="{width}" stroke-linejoin="round" stroke-linecap="round"/>"#
            )
        }
        SvgElement::Circle { center, radius, color } => {
            format!(
                r#"<circle cx="{}" cy="{}" r="{radius}" fill="{color}"/>"#,
                center.x, center.y
            )
        }
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            color,
        } => {
            format!(r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{color}"/>"#)
        }
        SvgElement::Text {
            pos,
            content,
            family,
            size,
            color,
            anchor,
            rotate,
        } => {
            let transform = rotate
                .map(|deg| format!(r#" transform="rotate({deg} {} {})""#, pos.x, pos.y))
                .unwrap_or_default();
            format!(
                r#"<text x="{}" y="{}" font-family="{family}" font-size="{size}" fill="{color}" text-anchor="{}"{transform}>{}</text>"#,
                pos.x,
                pos.y,
                anchor.as_svg(),
                escape_xml(content),
            )
        }
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
