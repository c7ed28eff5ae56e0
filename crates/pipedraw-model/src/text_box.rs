//! Multi-row label/value info boxes.

use pipedraw_render::Canvas;

use crate::geom::Point;
use crate::style::TextStyle;

/// Which corner (or the center) of the box an anchor point pins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxAnchor {
    TopLeft(Point),
    TopRight(Point),
    BottomLeft(Point),
    BottomRight(Point),
    Center(Point),
}

/// Layout options for [`draw_text_box`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextBoxOptions {
    /// Fixed box width; measured from the content when `None`.
    pub width: Option<f64>,
    /// Center each row's text instead of left-aligning it.
    ///
    /// Only effective for boxes without value fields.
    pub center: bool,
    /// Suppress the border and row dividers.
    pub no_border: bool,
}

/// Extents and field anchors of a drawn text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBoxExtents {
    pub width: f64,
    pub height: f64,
    /// Start position of each value field, in the caller's coordinates.
    pub field_anchors: Vec<Point>,
}

/// Draws a bordered box of label rows, optionally with a value column.
///
/// Rows are measured with the canvas text metrics; the box is sized to
/// the largest label and field unless a fixed width is given. Returns
/// the box extents and the anchor point of each value field so a caller
/// can write into a field after the fact.
pub fn draw_text_box(
    canvas: &mut dyn Canvas,
    text: &TextStyle,
    labels: &[String],
    fields: Option<&[String]>,
    anchor: BoxAnchor,
    options: TextBoxOptions,
) -> TextBoxExtents {
    canvas.save();

    text.select(canvas);

    let ifm = text.padding;
    let mut label_w: f64 = 0.0;
    let mut field_w: f64 = 0.0;
    let mut row_h: f64 = 0.0;

    for label in labels {
        let e = canvas.text_extents(label);
        label_w = label_w.max(e.width);
        row_h = row_h.max(e.height);
    }
    if let Some(fields) = fields {
        for field in fields {
            let e = canvas.text_extents(field);
            field_w = field_w.max(e.width);
            row_h = row_h.max(e.height);
        }
    }

    row_h += ifm * 2.0;
    label_w += ifm * 2.0;
    field_w += ifm * 2.0;
    let box_h = row_h * labels.len() as f64;
    let box_w = options.width.unwrap_or(label_w + field_w);

    let origin = match anchor {
        BoxAnchor::TopLeft(p) => p,
        BoxAnchor::TopRight(p) => Point::new(p.x - box_w, p.y),
        BoxAnchor::BottomLeft(p) => Point::new(p.x, p.y - box_h),
        BoxAnchor::BottomRight(p) => Point::new(p.x - box_w, p.y - box_h),
        BoxAnchor::Center(p) => Point::new(p.x - label_w / 2.0, p.y - row_h / 2.0),
    };

    canvas.translate(origin.x, origin.y);

    if !options.no_border {
        canvas.rectangle(0.0, 0.0, box_w, box_h);
        if fields.is_some() {
            canvas.move_to(label_w, 0.0);
            canvas.line_to(label_w, box_h);
        }
    }
    canvas.stroke();

    let mut field_anchors = Vec::new();

    for (i, label) in labels.iter().enumerate() {
        let mut y = row_h * (i + 1) as f64;
        if i < labels.len() - 1 && !options.no_border {
            canvas.set_color(text.color);
            canvas.move_to(0.0, y);
            canvas.line_to(box_w, y);
            canvas.stroke();
        }
        let e = canvas.text_extents(label);
        y -= ifm;

        let x = if options.center {
            (box_w - e.width) / 2.0
        } else {
            ifm
        };

        canvas.move_to(x, y);
        canvas.set_color(text.color);
        canvas.show_text(label);

        if let Some(fields) = fields {
            let x = x + label_w;
            field_anchors.push(Point::new(origin.x + x, origin.y + y));
            canvas.move_to(x, y);
            canvas.show_text(&fields[i]);
        }
    }

    canvas.restore();

    TextBoxExtents {
        width: box_w,
        height: box_h,
        field_anchors,
    }
}
