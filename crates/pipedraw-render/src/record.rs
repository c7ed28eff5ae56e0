//! Recording surface used by tests.
//!
//! Captures every canvas command as a structured [`CanvasOp`] and answers
//! text measurements with the deterministic fallback metrics, so geometry
//! and scale-solving tests never depend on the host font set.

use crate::canvas::{Canvas, Rgb, TextExtents};
use crate::text;

/// One recorded canvas command.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    Save,
    Restore,
    Translate(f64, f64),
    Scale(f64),
    Rotate(f64),
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        angle1: f64,
        angle2: f64,
    },
    ArcNegative {
        cx: f64,
        cy: f64,
        radius: f64,
        angle1: f64,
        angle2: f64,
    },
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    ClosePath,
    SetColor(Rgb),
    SetLineWidth(f64),
    SetDash(Vec<f64>),
    Fill,
    FillPreserve,
    Stroke,
    SelectFont {
        family: String,
        bold: bool,
    },
    SetFontSize(f64),
    ShowText(String),
}

/// A canvas that records commands instead of producing output.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<CanvasOp>,
    font_size: f64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface {
            ops: Vec::new(),
            font_size: 10.0,
        }
    }

    /// All recorded commands in emission order.
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Number of fill commands (including fill-preserve).
    pub fn fill_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, CanvasOp::Fill | CanvasOp::FillPreserve))
            .count()
    }

    /// Number of stroke commands.
    pub fn stroke_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, CanvasOp::Stroke))
            .count()
    }

    /// All strings drawn on the surface, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::ShowText(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingSurface {
    fn save(&mut self) {
        self.ops.push(CanvasOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(CanvasOp::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ops.push(CanvasOp::Translate(dx, dy));
    }

    fn scale(&mut self, factor: f64) {
        self.ops.push(CanvasOp::Scale(factor));
    }

    fn rotate(&mut self, angle: f64) {
        self.ops.push(CanvasOp::Rotate(angle));
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(CanvasOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(CanvasOp::LineTo(x, y));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, angle1: f64, angle2: f64) {
        self.ops.push(CanvasOp::Arc {
            cx,
            cy,
            radius,
            angle1,
            angle2,
        });
    }

    fn arc_negative(&mut self, cx: f64, cy: f64, radius: f64, angle1: f64, angle2: f64) {
        self.ops.push(CanvasOp::ArcNegative {
            cx,
            cy,
            radius,
            angle1,
            angle2,
        });
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(CanvasOp::Rectangle {
            x,
            y,
            width,
            height,
        });
    }

    fn close_path(&mut self) {
        self.ops.push(CanvasOp::ClosePath);
    }

    fn set_color(&mut self, color: Rgb) {
        self.ops.push(CanvasOp::SetColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(CanvasOp::SetLineWidth(width));
    }

    fn set_dash(&mut self, pattern: &[f64]) {
        self.ops.push(CanvasOp::SetDash(pattern.to_vec()));
    }

    fn fill(&mut self) {
        self.ops.push(CanvasOp::Fill);
    }

    fn fill_preserve(&mut self) {
        self.ops.push(CanvasOp::FillPreserve);
    }

    fn stroke(&mut self) {
        self.ops.push(CanvasOp::Stroke);
    }

    fn select_font(&mut self, family: &str, bold: bool) {
        self.ops.push(CanvasOp::SelectFont {
            family: family.to_string(),
            bold,
        });
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
        self.ops.push(CanvasOp::SetFontSize(size));
    }

    fn text_extents(&mut self, text: &str) -> TextExtents {
        text::fallback_measure(self.font_size, text)
    }

    fn show_text(&mut self, text: &str) {
        self.ops.push(CanvasOp::ShowText(text.to_string()));
    }
}
