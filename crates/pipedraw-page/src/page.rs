//! The technical drawing page.

use chrono::Local;
use pipedraw_render::{Canvas, Rgb};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use pipedraw_model::{
    draw_text_box, BoxAnchor, ModelError, PipeComponent, Point, TextBoxOptions, TextStyle,
};

/// Points per millimeter at the fixed 72 dpi page resolution.
const POINTS_PER_MM: f64 = 72.0 / 25.4;

const PAGE_MARGIN: f64 = 50.0;
const PAGE_INNER_MARGIN: f64 = 10.0;
const INFO_BOX_SPACING: f64 = 5.0;
const PAGE_LINE_WIDTH: f64 = 0.5;

/// Errors raised while rendering a page.
#[derive(Error, Debug)]
pub enum PageError {
    /// The component could not be drawn.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Supported output page sizes, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    /// Page width in points.
    pub fn width(self) -> f64 {
        match self {
            PageSize::A4 => 596.0,
            PageSize::Letter => 612.0,
        }
    }

    /// Page height in points.
    pub fn height(self) -> f64 {
        match self {
            PageSize::A4 => 843.0,
            PageSize::Letter => 792.0,
        }
    }
}

/// Job information shown in the page info boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageInfo {
    pub title: String,
    pub customer: String,
    pub project_no: String,
    pub drawing_no: String,
    pub quantity: u32,
    pub material: String,
    pub bonding: String,
    pub finish: String,
    pub service_temp: String,
    pub checked_by: String,
    pub company: String,
    /// Letterhead lines shown under the company name.
    pub letterhead: Vec<String>,
}

impl Default for PageInfo {
    fn default() -> Self {
        PageInfo {
            title: String::new(),
            customer: String::new(),
            project_no: String::new(),
            drawing_no: String::new(),
            quantity: 1,
            material: String::new(),
            bonding: String::new(),
            finish: String::new(),
            service_temp: String::new(),
            checked_by: String::new(),
            company: "Clientname Limited".to_string(),
            letterhead: vec![
                "Address 1".to_string(),
                "Address 2".to_string(),
                "Company Tag Line".to_string(),
                "Telephone and Fax".to_string(),
            ],
        }
    }
}

/// A page framing one drawn component.
#[derive(Debug, Clone)]
pub struct DrawingPage {
    size: PageSize,
    info: PageInfo,
    info_text: TextStyle,
    copyright_text: TextStyle,
    title_text: TextStyle,
    client_text: TextStyle,
    notice_text: TextStyle,
}

impl DrawingPage {
    /// Creates a page of the given size.
    pub fn new(size: PageSize, info: PageInfo) -> Self {
        let text = |bold, size, color| TextStyle {
            family: "Arial".to_string(),
            bold,
            size,
            padding: 3.0,
            color,
        };
        DrawingPage {
            size,
            info,
            info_text: text(false, 8.0, Rgb::BLACK),
            copyright_text: text(false, 8.0, Rgb::new(0.757, 0.0, 0.702)),
            title_text: text(false, 10.0, Rgb::new(0.0, 0.0, 0.4)),
            client_text: text(true, 12.0, Rgb::new(0.757, 0.0, 0.702)),
            notice_text: text(false, 10.0, Rgb::BLACK),
        }
    }

    /// The page width in points.
    pub fn width(&self) -> f64 {
        self.size.width()
    }

    /// The page height in points.
    pub fn height(&self) -> f64 {
        self.size.height()
    }

    /// Draws the full page: chrome first, then the component inside the
    /// drawing area, then the scale label.
    ///
    /// Returns the component's solved scale factor.
    pub fn render(
        &self,
        component: &dyn PipeComponent,
        canvas: &mut dyn Canvas,
    ) -> Result<f64, PageError> {
        let notice_h = self.draw_base_page(canvas);
        let (info_box_h, scale_anchor) = self.draw_drawing_info(canvas);

        let m = PAGE_MARGIN + PAGE_INNER_MARGIN;
        let x = m;
        let y = m + notice_h;
        let w = self.width() - m * 2.0;
        let h = self.height() - info_box_h - y * 2.0;

        canvas.save();
        canvas.translate(x, y);
        let scale = component.draw(canvas, w, h)?;
        canvas.restore();

        // One device pixel is one point, 72 to the inch; measurements
        // are millimeters, so scale = mm expressed in points, times 100
        // to avoid a ratio with decimals.
        let page_scale = scale_denominator(scale);
        let label = format!("100:{}", page_scale.round() as i64);
        debug!(scale, label, "rendered drawing page");

        canvas.save();
        canvas.set_line_width(PAGE_LINE_WIDTH);
        canvas.set_color(Rgb::BLACK);
        self.info_text.select(canvas);
        canvas.move_to(scale_anchor.x, scale_anchor.y);
        canvas.show_text(&label);
        canvas.restore();

        Ok(scale)
    }

    /// Draws the page border and the dimensions notice.
    ///
    /// Returns the height consumed at the top of the drawing area.
    fn draw_base_page(&self, canvas: &mut dyn Canvas) -> f64 {
        let pw = self.width() - PAGE_MARGIN * 2.0;
        let ph = self.height() - PAGE_MARGIN * 2.0;

        canvas.save();
        canvas.translate(PAGE_MARGIN, PAGE_MARGIN);
        canvas.set_line_width(PAGE_LINE_WIDTH);
        canvas.set_color(Rgb::BLACK);

        canvas.rectangle(0.0, 0.0, pw, ph);
        canvas.stroke();

        let notice = draw_text_box(
            canvas,
            &self.notice_text,
            &["ALL DIMENSIONS ARE IN mm".to_string()],
            None,
            BoxAnchor::TopRight(Point::new(pw, 0.0)),
            TextBoxOptions {
                no_border: true,
                ..Default::default()
            },
        );

        canvas.move_to(pw - notice.width, 0.0);
        canvas.line_to(pw - notice.width, notice.height);
        canvas.line_to(pw, notice.height);
        canvas.stroke();

        canvas.restore();

        notice.height
    }

    /// Draws the information boxes along the bottom of the page.
    ///
    /// Returns the total info-box height and the anchor where the scale
    /// label is written after the component draw.
    fn draw_drawing_info(&self, canvas: &mut dyn Canvas) -> (f64, Point) {
        let pw = self.width() - PAGE_MARGIN * 2.0;
        let ph = self.height() - PAGE_MARGIN * 2.0;
        let ibs = INFO_BOX_SPACING;

        canvas.save();
        canvas.translate(PAGE_MARGIN, PAGE_MARGIN);
        canvas.set_line_width(PAGE_LINE_WIDTH);
        canvas.set_color(Rgb::BLACK);

        // Width of the letterhead box follows the company name.
        self.client_text.select(canvas);
        let client_e = canvas.text_extents(&self.info.company);
        let cbw = client_e.width + self.client_text.padding * 2.0;
        let ibw = (pw - cbw - ibs * 5.0) / 3.0;

        let date_label = Local::now().format("%-d/%-m/%Y").to_string();
        let info = &self.info;
        let groups: [[(&str, String); 4]; 3] = [
            [
                ("Customer", info.customer.clone()),
                ("Proj. No.", info.project_no.clone()),
                ("DRG No.", info.drawing_no.clone()),
                ("Qty", format!("{} off", info.quantity)),
            ],
            [
                ("Material", info.material.clone()),
                ("Bonding sys.", info.bonding.clone()),
                ("Finish", info.finish.clone()),
                ("Svc. temp.", info.service_temp.clone()),
            ],
            [
                ("Date", date_label),
                ("Scale", String::new()),
                ("Drawn by", "Pipedraw v0.3".to_string()),
                ("Checked by", info.checked_by.clone()),
            ],
        ];

        let mut y = ph - ibs;
        let mut scale_anchor = Point::ORIGIN;
        let mut box_h = 0.0;

        for (i, group) in groups.iter().enumerate() {
            let x = ibs + i as f64 * (ibw + ibs);
            let labels: Vec<String> = group.iter().map(|(l, _)| l.to_string()).collect();
            let fields: Vec<String> = group.iter().map(|(_, f)| f.clone()).collect();

            let extents = draw_text_box(
                canvas,
                &self.info_text,
                &labels,
                Some(&fields),
                BoxAnchor::BottomLeft(Point::new(x, y)),
                TextBoxOptions {
                    width: Some(ibw),
                    ..Default::default()
                },
            );
            box_h = extents.height;

            if group[1].0 == "Scale" {
                // The field anchors are relative to the margin
                // translate, which is restored before the label is
                // finally written.
                let anchor = extents.field_anchors[1];
                scale_anchor = Point::new(anchor.x + PAGE_MARGIN, anchor.y + PAGE_MARGIN);
            }
        }

        // Copyright and title rows spanning all three boxes.
        let x = ibs;
        y -= ibs + box_h;
        let row_w = ibw * 3.0 + ibs * 2.0;
        let copyright = draw_text_box(
            canvas,
            &self.copyright_text,
            &[format!("Industrial copyright {}", info.company)],
            None,
            BoxAnchor::BottomLeft(Point::new(x, y)),
            TextBoxOptions {
                width: Some(row_w),
                center: true,
                ..Default::default()
            },
        );

        y -= ibs + copyright.height;
        let title = draw_text_box(
            canvas,
            &self.title_text,
            &[info.title.clone()],
            None,
            BoxAnchor::BottomLeft(Point::new(x, y)),
            TextBoxOptions {
                width: Some(row_w),
                center: true,
                ..Default::default()
            },
        );

        let info_box_h = ph - (y - ibs - title.height);

        self.draw_letterhead(canvas, pw, ph, cbw, info_box_h);

        // Divider between the drawing area and the info boxes.
        canvas.set_color(Rgb::BLACK);
        canvas.move_to(0.0, ph - info_box_h);
        canvas.line_to(pw, ph - info_box_h);
        canvas.stroke();

        canvas.restore();

        (info_box_h, scale_anchor)
    }

    /// Draws the company letterhead box at the bottom right.
    fn draw_letterhead(
        &self,
        canvas: &mut dyn Canvas,
        pw: f64,
        ph: f64,
        cbw: f64,
        info_box_h: f64,
    ) {
        let ibs = INFO_BOX_SPACING;
        let padding = self.client_text.padding;

        self.client_text.select(canvas);
        let client_e = canvas.text_extents(&self.info.company);

        let x = pw - ibs - client_e.width - padding;
        let mut y = ph - info_box_h + ibs + padding + client_e.height;
        canvas.move_to(x, y);
        canvas.set_color(self.client_text.color);
        canvas.show_text(&self.info.company);

        canvas.set_color(Rgb::BLACK);
        canvas.rectangle(
            x - padding,
            y - client_e.height - padding,
            cbw,
            info_box_h - ibs * 2.0,
        );
        canvas.stroke();

        self.info_text.select(canvas);
        canvas.set_color(self.info_text.color);

        let mut row_h = client_e.height;
        for (row, line) in self.info.letterhead.iter().enumerate() {
            let mult = if row == 2 || row == 3 { 2.5 } else { 1.0 };
            y += (row_h + padding) * mult;
            let e = canvas.text_extents(line);
            row_h = e.height;
            let x = pw - ibs - (cbw / 2.0) - (e.width / 2.0);
            canvas.move_to(x, y);
            canvas.show_text(line);
        }
    }
}

/// Converts a drawing scale factor to the page scale denominator.
///
/// Exposed for callers that format their own scale labels.
pub fn scale_denominator(scale: f64) -> f64 {
    POINTS_PER_MM * 100.0 / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_sizes_are_in_points() {
        assert_eq!(PageSize::A4.width(), 596.0);
        assert_eq!(PageSize::A4.height(), 843.0);
        assert_eq!(PageSize::Letter.width(), 612.0);
        assert_eq!(PageSize::Letter.height(), 792.0);
    }

    #[test]
    fn scale_denominator_inverts_scale() {
        // A drawing at 1 point per mm is roughly 1:2.83, shown as 100:283.
        let d = scale_denominator(1.0);
        assert!((d - 283.46).abs() < 0.01);
    }
}
