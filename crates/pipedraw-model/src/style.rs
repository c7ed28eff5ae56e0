//! Drawing style constants and their per-scale derivation.
//!
//! The engine draws under a uniform canvas scale transform, so every
//! fixed-size visual constant (line widths, dash lengths, font sizes,
//! padding) must be divided by the chosen scale factor to keep a constant
//! absolute size on the page. Rather than mutating shared attributes in
//! place between the draw phases, a [`RenderStyle`] is derived fresh from
//! the [`BaseStyle`] once the scale is known and passed explicitly to the
//! drawing operations.

use pipedraw_render::{Canvas, Rgb};

/// Font and padding information for a class of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub bold: bool,
    pub size: f64,
    pub padding: f64,
    pub color: Rgb,
}

impl TextStyle {
    /// Applies the font selection to a canvas.
    pub fn select(&self, canvas: &mut dyn Canvas) {
        canvas.select_font(&self.family, self.bold);
        canvas.set_font_size(self.size);
    }

    fn at_scale(&self, scale: f64) -> TextStyle {
        TextStyle {
            family: self.family.clone(),
            bold: self.bold,
            size: self.size / scale,
            padding: self.padding / scale,
            color: self.color,
        }
    }
}

/// Unscaled style constants for a component drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseStyle {
    pub line_width: f64,
    pub line_color: Rgb,
    pub dash: [f64; 4],
    pub dim_text: TextStyle,
}

impl Default for BaseStyle {
    fn default() -> Self {
        BaseStyle {
            line_width: 0.5,
            line_color: Rgb::BLACK,
            dash: [7.0, 2.0, 2.0, 2.0],
            dim_text: TextStyle {
                family: "Arial".to_string(),
                bold: false,
                size: 8.0,
                padding: 3.0,
                color: Rgb::BLACK,
            },
        }
    }
}

impl BaseStyle {
    /// Derives the style used under a uniform scale transform.
    pub fn at_scale(&self, scale: f64) -> RenderStyle {
        RenderStyle {
            scale,
            line_width: self.line_width / scale,
            line_color: self.line_color,
            dash: self.dash.iter().map(|d| d / scale).collect(),
            dim_text: self.dim_text.at_scale(scale),
        }
    }
}

/// Style constants divided by the chosen scale factor.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub scale: f64,
    pub line_width: f64,
    pub line_color: Rgb,
    pub dash: Vec<f64>,
    pub dim_text: TextStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_scale_divides_fixed_sizes() {
        let base = BaseStyle::default();
        let style = base.at_scale(2.0);
        assert_eq!(style.line_width, 0.25);
        assert_eq!(style.dash, vec![3.5, 1.0, 1.0, 1.0]);
        assert_eq!(style.dim_text.size, 4.0);
        assert_eq!(style.dim_text.padding, 1.5);
    }

    #[test]
    fn base_is_untouched_by_derivation() {
        let base = BaseStyle::default();
        let _ = base.at_scale(4.0);
        let _ = base.at_scale(8.0);
        assert_eq!(base.line_width, 0.5);
        assert_eq!(base.dim_text.size, 8.0);
    }
}
