//! SVG vector surface.
//!
//! Drawing commands are flattened under the live transform stack into SVG
//! path data with device-space coordinates, so the emitted document needs
//! no nested transform groups. Stroke widths, dash patterns and font sizes
//! are scaled by the current uniform transform factor at emission time.

use std::fmt::Write as _;
use std::path::Path;

use crate::canvas::{Canvas, Rgb, TextExtents};
use crate::error::Result;
use crate::path::{PathEl, PathState};

/// A vector surface that accumulates drawing commands into an SVG document.
#[derive(Debug)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    state: PathState,
    body: String,
}

impl SvgSurface {
    /// Creates a surface with the given page size in device units.
    pub fn new(width: f64, height: f64) -> Self {
        SvgSurface {
            width,
            height,
            state: PathState::new(),
            body: String::new(),
        }
    }

    /// Finishes the surface and returns the SVG document.
    pub fn finish(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}pt\" height=\"{h}pt\" \
             viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = fmt_num(self.width),
            h = fmt_num(self.height),
            body = self.body
        )
    }

    /// Writes the finished document to a file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.finish())?;
        tracing::debug!(path = %path.display(), "wrote SVG surface");
        Ok(())
    }

    fn path_data(els: &[PathEl]) -> String {
        let mut d = String::new();
        for el in els {
            match *el {
                PathEl::MoveTo(x, y) => {
                    let _ = write!(d, "M {} {} ", fmt_num(x), fmt_num(y));
                }
                PathEl::LineTo(x, y) => {
                    let _ = write!(d, "L {} {} ", fmt_num(x), fmt_num(y));
                }
                PathEl::CubicTo(x1, y1, x2, y2, x, y) => {
                    let _ = write!(
                        d,
                        "C {} {} {} {} {} {} ",
                        fmt_num(x1),
                        fmt_num(y1),
                        fmt_num(x2),
                        fmt_num(y2),
                        fmt_num(x),
                        fmt_num(y)
                    );
                }
                PathEl::Close => d.push_str("Z "),
            }
        }
        d.trim_end().to_string()
    }

    fn emit_fill(&mut self, els: &[PathEl]) {
        if els.is_empty() {
            return;
        }
        let (r, g, b) = self.state.gs.color.to_rgb8();
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"rgb({r},{g},{b})\" stroke=\"none\"/>",
            Self::path_data(els)
        );
    }

    fn emit_stroke(&mut self, els: &[PathEl]) {
        if els.is_empty() {
            return;
        }
        let (r, g, b) = self.state.gs.color.to_rgb8();
        let dash = self.state.device_dash();
        let dash_attr = if dash.is_empty() {
            String::new()
        } else {
            let joined = dash
                .iter()
                .map(|d| fmt_num(*d))
                .collect::<Vec<_>>()
                .join(",");
            format!(" stroke-dasharray=\"{joined}\"")
        };
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"none\" stroke=\"rgb({r},{g},{b})\" \
             stroke-width=\"{}\"{dash_attr}/>",
            Self::path_data(els),
            fmt_num(self.state.device_line_width())
        );
    }
}

impl Canvas for SvgSurface {
    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.gs.matrix.translate(dx, dy);
    }

    fn scale(&mut self, factor: f64) {
        self.state.gs.matrix.scale(factor);
    }

    fn rotate(&mut self, angle: f64) {
        self.state.gs.matrix.rotate(angle);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.state.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.state.line_to(x, y);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, angle1: f64, angle2: f64) {
        self.state.arc(cx, cy, radius, angle1, angle2);
    }

    fn arc_negative(&mut self, cx: f64, cy: f64, radius: f64, angle1: f64, angle2: f64) {
        self.state.arc_negative(cx, cy, radius, angle1, angle2);
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.state.rectangle(x, y, width, height);
    }

    fn close_path(&mut self) {
        self.state.close_path();
    }

    fn set_color(&mut self, color: Rgb) {
        self.state.gs.color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.gs.line_width = width;
    }

    fn set_dash(&mut self, pattern: &[f64]) {
        self.state.gs.dash = pattern.to_vec();
    }

    fn fill(&mut self) {
        let els = self.state.take_path();
        self.emit_fill(&els);
    }

    fn fill_preserve(&mut self) {
        let els = self.state.snapshot_path();
        self.emit_fill(&els);
    }

    fn stroke(&mut self) {
        let els = self.state.take_path();
        self.emit_stroke(&els);
    }

    fn select_font(&mut self, family: &str, bold: bool) {
        self.state.gs.font_family = family.to_string();
        self.state.gs.font_bold = bold;
    }

    fn set_font_size(&mut self, size: f64) {
        self.state.gs.font_size = size;
    }

    fn text_extents(&mut self, text: &str) -> TextExtents {
        self.state.measure_text(text)
    }

    fn show_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let anchor = self.state.current.unwrap_or((0.0, 0.0));
        let (r, g, b) = self.state.gs.color.to_rgb8();
        let weight = if self.state.gs.font_bold {
            " font-weight=\"bold\""
        } else {
            ""
        };
        let _ = writeln!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-family=\"{}, sans-serif\" font-size=\"{}\"\
             {weight} fill=\"rgb({r},{g},{b})\">{}</text>",
            fmt_num(anchor.0),
            fmt_num(anchor.1),
            escape(&self.state.gs.font_family),
            fmt_num(self.state.device_font_size()),
            escape(text)
        );
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn fmt_num(v: f64) -> String {
    // Trim trailing zeros so documents stay compact and diff-friendly.
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_emits_path_with_width() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        svg.set_line_width(0.5);
        svg.move_to(0.0, 0.0);
        svg.line_to(10.0, 0.0);
        svg.stroke();
        let out = svg.finish();
        assert!(out.contains("stroke-width=\"0.5\""));
        assert!(out.contains("M 0 0 L 10 0"));
    }

    #[test]
    fn scaled_stroke_width_is_device_width() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        svg.scale(4.0);
        svg.set_line_width(0.5);
        svg.move_to(0.0, 0.0);
        svg.line_to(1.0, 0.0);
        svg.stroke();
        assert!(svg.finish().contains("stroke-width=\"2\""));
    }

    #[test]
    fn fill_preserve_keeps_path_for_stroke() {
        let mut svg = SvgSurface::new(10.0, 10.0);
        svg.rectangle(1.0, 1.0, 2.0, 2.0);
        svg.fill_preserve();
        svg.stroke();
        let out = svg.finish();
        assert_eq!(out.matches("<path").count(), 2);
    }
}
