//! Dimension lines, arrowheads and labels.

use std::f64::consts::PI;

use pipedraw_render::{Canvas, Rgb};

use crate::geom::{polar_to_cartesian, Point};
use crate::style::{RenderStyle, TextStyle};

/// Arrowhead length along the notional line, in page units.
const ARROW_LENGTH: f64 = 8.0;
/// Arrowhead base width, in page units.
const ARROW_WIDTH: f64 = 4.0;
/// Divisor applied to the font size for the degree glyph.
const DEGREE_SIZE_DIV: f64 = 1.7;

/// Optional decoration on a dimension label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelOption {
    #[default]
    Plain,
    /// Prefix the value with an "R" radius marker.
    RadiusPrefix,
    /// Suffix the value with a raised degree glyph.
    DegreeSuffix,
}

/// Returns the widest rendered width in a list of labels, in user units.
pub fn largest_text_width(
    canvas: &mut dyn Canvas,
    labels: &[String],
    text: &TextStyle,
    padding: bool,
) -> f64 {
    canvas.save();
    text.select(canvas);

    let mut max_w: f64 = 0.0;
    for label in labels {
        let e = canvas.text_extents(label);
        max_w = max_w.max(e.width);
    }

    canvas.restore();

    if padding {
        max_w += text.padding * 2.0;
    }
    max_w
}

/// Returns the tallest rendered height in a list of labels, in user units.
pub fn largest_text_height(
    canvas: &mut dyn Canvas,
    labels: &[String],
    text: &TextStyle,
    padding: bool,
) -> f64 {
    canvas.save();
    text.select(canvas);

    let mut max_h: f64 = 0.0;
    for label in labels {
        let e = canvas.text_extents(label);
        max_h = max_h.max(e.height);
    }

    canvas.restore();

    if padding {
        max_h += text.padding * 2.0;
    }
    max_h
}

/// Angle of a dimension line between two points.
///
/// Computed as `atan(dy / -dx)`; a perfectly vertical line would divide
/// by zero, so that case resolves explicitly to 90 or 270 degrees by
/// comparing the endpoint y values.
pub fn dimension_angle(start: Point, end: Point) -> f64 {
    let run = start.x - end.x;
    if run == 0.0 {
        if start.y < end.y {
            PI / 2.0
        } else {
            PI * 3.0 / 2.0
        }
    } else {
        ((end.y - start.y) / run).atan()
    }
}

/// Draws a filled arrowhead pointing along `angle` with its tip at `tip`.
///
/// The triangle is computed from page-unit length and width divided by
/// the scale factor so its absolute size stays constant at any drawing
/// scale.
pub fn draw_arrowhead(canvas: &mut dyn Canvas, angle: f64, tip: Point, scale: f64) {
    canvas.save();

    let l = ARROW_LENGTH / scale;
    let w = ARROW_WIDTH / scale;
    let h = (l * l + (w / 2.0) * (w / 2.0)).sqrt();
    let a_offset = ((w / 2.0) / l).atan();

    canvas.set_color(Rgb::BLACK);
    canvas.move_to(tip.x, tip.y);
    for offset in [a_offset, -a_offset] {
        let p = polar_to_cartesian(angle + PI + offset, h, tip);
        canvas.line_to(p.x, p.y);
    }
    canvas.close_path();
    canvas.fill();

    canvas.restore();
}

/// Draws a labelled dimension line between two points.
///
/// Arrowheads are placed at both ends pointing outward; the label is
/// centered at the geometric middle of the line.
pub fn draw_dim_line(
    canvas: &mut dyn Canvas,
    style: &RenderStyle,
    start: Point,
    end: Point,
    value: f64,
    decimals: usize,
    option: LabelOption,
) {
    canvas.save();

    canvas.move_to(start.x, start.y);
    canvas.line_to(end.x, end.y);
    canvas.stroke();

    let angle = dimension_angle(start, end);

    // The tangent repeats every half turn, so pick which end gets the
    // flipped arrowhead from the endpoint x order.
    let flips = if end.x > start.x { [1.0, 0.0] } else { [0.0, 1.0] };

    for (flip, p) in flips.into_iter().zip([start, end]) {
        draw_arrowhead(canvas, angle + PI * flip, p, style.scale);
    }

    draw_dim_label(canvas, style, start.midpoint(&end), value, decimals, option);

    canvas.restore();
}

/// Draws a dimension label over a cleared background box.
pub fn draw_dim_label(
    canvas: &mut dyn Canvas,
    style: &RenderStyle,
    at: Point,
    value: f64,
    decimals: usize,
    option: LabelOption,
) {
    let margin = style.dim_text.padding;

    canvas.save();
    canvas.translate(at.x, at.y);

    let mut dim_str = if decimals == 0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.decimals$}")
    };

    if option == LabelOption::RadiusPrefix {
        dim_str.insert(0, 'R');
    }

    style.dim_text.select(canvas);
    let e = canvas.text_extents(&dim_str);

    let hw = e.width / 2.0;
    let hh = e.height / 2.0;

    // Clear some whitespace for the label.
    canvas.set_color(Rgb::WHITE);
    canvas.rectangle(
        -hw - margin,
        -hh - margin,
        e.width + margin * 2.0,
        e.height + margin * 2.0,
    );
    canvas.fill();

    canvas.set_color(style.dim_text.color);
    canvas.move_to(-hw, hh);
    canvas.show_text(&dim_str);

    if option == LabelOption::DegreeSuffix {
        canvas.set_font_size(style.dim_text.size / DEGREE_SIZE_DIV);
        let deg = canvas.text_extents("o");
        canvas.move_to(hw + margin / 2.0, deg.height - hh);
        canvas.show_text("o");
    }

    canvas.restore();
}
