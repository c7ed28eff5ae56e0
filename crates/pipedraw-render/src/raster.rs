//! Raster surface over tiny-skia.
//!
//! Paths are filled and stroked into a premultiplied pixmap; text is
//! rasterized glyph-by-glyph with rusttype and blended in. The finished
//! pixmap must be explicitly encoded (PNG via the `image` crate) after
//! drawing completes.

use std::io::Cursor;
use std::path::Path;

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

use crate::canvas::{Canvas, Rgb, TextExtents};
use crate::error::{RenderError, Result};
use crate::path::{PathEl, PathState};
use crate::text;

/// A raster surface holding a white-backed pixmap.
pub struct PixmapSurface {
    pixmap: Pixmap,
    state: PathState,
}

impl PixmapSurface {
    /// Creates a surface of the given pixel size, filled white.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or_else(|| RenderError::InvalidDimensions {
                width: width as f64,
                height: height as f64,
            })?;
        pixmap.fill(tiny_skia::Color::WHITE);
        Ok(PixmapSurface {
            pixmap,
            state: PathState::new(),
        })
    }

    /// Pixel width of the surface.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Pixel height of the surface.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Encodes the finished surface as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let img = self.to_image()?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| RenderError::Encode {
                reason: e.to_string(),
            })?;
        Ok(bytes)
    }

    /// Encodes and writes the finished surface to a PNG file.
    pub fn write_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.encode_png()?)?;
        tracing::debug!(path = %path.display(), "wrote PNG surface");
        Ok(())
    }

    fn to_image(&self) -> Result<image::RgbaImage> {
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        let mut data = Vec::with_capacity((w * h * 4) as usize);
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        image::RgbaImage::from_raw(w, h, data).ok_or_else(|| RenderError::Encode {
            reason: "pixmap buffer size mismatch".to_string(),
        })
    }

    fn build_path(els: &[PathEl]) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();
        for el in els {
            match *el {
                PathEl::MoveTo(x, y) => pb.move_to(x as f32, y as f32),
                PathEl::LineTo(x, y) => pb.line_to(x as f32, y as f32),
                PathEl::CubicTo(x1, y1, x2, y2, x, y) => pb.cubic_to(
                    x1 as f32, y1 as f32, x2 as f32, y2 as f32, x as f32, y as f32,
                ),
                PathEl::Close => pb.close(),
            }
        }
        pb.finish()
    }

    fn paint(&self) -> Paint<'static> {
        let (r, g, b) = self.state.gs.color.to_rgb8();
        let mut paint = Paint::default();
        paint.set_color(tiny_skia::Color::from_rgba8(r, g, b, 255));
        paint.anti_alias = true;
        paint
    }

    fn fill_els(&mut self, els: &[PathEl]) {
        let Some(path) = Self::build_path(els) else {
            return;
        };
        let paint = self.paint();
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn stroke_els(&mut self, els: &[PathEl]) {
        let Some(path) = Self::build_path(els) else {
            return;
        };
        let paint = self.paint();
        let dash = self.state.device_dash();
        let stroke = Stroke {
            width: self.state.device_line_width() as f32,
            dash: if dash.is_empty() {
                None
            } else {
                StrokeDash::new(dash.iter().map(|d| *d as f32).collect(), 0.0)
            },
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

impl Canvas for PixmapSurface {
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
        self.fill_els(&els);
    }

    fn fill_preserve(&mut self) {
        let els = self.state.snapshot_path();
        self.fill_els(&els);
    }

    fn stroke(&mut self) {
        let els = self.state.take_path();
        self.stroke_els(&els);
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
        let Some(font) = text::font_for(&self.state.gs.font_family, self.state.gs.font_bold)
        else {
            return;
        };
        let anchor = self.state.current.unwrap_or((0.0, 0.0));
        let size = self.state.device_font_size() as f32;
        let scale = rusttype::Scale::uniform(size);
        let start = rusttype::point(anchor.0 as f32, anchor.1 as f32);
        let (cr, cg, cb) = self.state.gs.color.to_rgb8();
        let (w, h) = (self.pixmap.width() as i32, self.pixmap.height() as i32);

        for glyph in font.layout(text, scale, start) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = gx as i32 + bb.min.x;
                    let py = gy as i32 + bb.min.y;
                    if px < 0 || px >= w || py < 0 || py >= h || v <= 0.0 {
                        return;
                    }
                    let idx = ((py * w + px) * 4) as usize;
                    let data = self.pixmap.data_mut();
                    // Source-over blend of an opaque glyph color with
                    // coverage `v` onto the premultiplied buffer.
                    let blend = |dst: u8, src: u8| -> u8 {
                        (src as f32 * v + dst as f32 * (1.0 - v)).round() as u8
                    };
                    data[idx] = blend(data[idx], cr);
                    data[idx + 1] = blend(data[idx + 1], cg);
                    data[idx + 2] = blend(data[idx + 2], cb);
                    data[idx + 3] = blend(data[idx + 3], 255);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_white() {
        let s = PixmapSurface::new(4, 4).unwrap();
        let px = s.pixmap.pixels()[0].demultiply();
        assert_eq!((px.red(), px.green(), px.blue()), (255, 255, 255));
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            PixmapSurface::new(0, 10),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn filled_rectangle_changes_pixels() {
        let mut s = PixmapSurface::new(10, 10).unwrap();
        s.set_color(Rgb::BLACK);
        s.rectangle(2.0, 2.0, 6.0, 6.0);
        s.fill();
        let px = s.pixmap.pixels()[5 * 10 + 5].demultiply();
        assert_eq!((px.red(), px.green(), px.blue()), (0, 0, 0));
    }
}
