//! Shared layer geometry and drawing for both pipe kinds.
//!
//! A pipe is drawn as four concentric layers: casing wall, casing bore,
//! lining wall and lining bore. Each layer is a closed ring described by
//! an outer and an inner point run; the inner run is stored reversed so
//! concatenating the two yields the ring polygon directly.

use std::f64::consts::PI;

use pipedraw_render::{Canvas, Rgb};

use crate::dims::{draw_dim_line, LabelOption};
use crate::error::{ModelError, Result};
use crate::flange::FlangeSpec;
use crate::geom::{polar_to_cartesian, Point};
use crate::style::RenderStyle;

/// One of the four concentric pipe layers, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    CasingOuter,
    CasingInner,
    LiningOuter,
    LiningInner,
}

impl Layer {
    /// All layers in outside-in order.
    pub const ALL: [Layer; 4] = [
        Layer::CasingOuter,
        Layer::CasingInner,
        Layer::LiningOuter,
        Layer::LiningInner,
    ];

    /// Fill color of the layer ring.
    pub fn fill_color(self) -> Rgb {
        match self {
            Layer::CasingOuter => Rgb::gray(0.8),
            Layer::CasingInner => Rgb::gray(0.9),
            Layer::LiningOuter => Rgb::gray(0.6),
            Layer::LiningInner => Rgb::gray(1.0),
        }
    }

    /// True for the two casing layers.
    pub fn is_casing(self) -> bool {
        matches!(self, Layer::CasingOuter | Layer::CasingInner)
    }
}

/// Diameter bookkeeping for the four pipe layers and the flange.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeLayers {
    casing_od: f64,
    casing_id: f64,
    lining_od: f64,
    lining_id: f64,
    flange_hole_d: f64,
    flange_outer_d: f64,
}

impl PipeLayers {
    /// Builds the layer bookkeeping, guarding against degenerate sizes.
    pub fn new(
        casing_od: f64,
        casing_id: f64,
        lining_od: f64,
        lining_id: f64,
        flange: &FlangeSpec,
    ) -> Result<Self> {
        for (what, value) in [
            ("casing outside diameter", casing_od),
            ("casing inside diameter", casing_id),
            ("lining outside diameter", lining_od),
            ("lining inside diameter", lining_id),
        ] {
            if value <= 0.0 {
                return Err(ModelError::DegenerateGeometry { what, value });
            }
        }
        Ok(PipeLayers {
            casing_od,
            casing_id,
            lining_od,
            lining_id,
            flange_hole_d: flange.hole_diameter,
            flange_outer_d: flange.flange_diameter,
        })
    }

    /// Diameter of a layer.
    pub fn diameter(&self, layer: Layer) -> f64 {
        match layer {
            Layer::CasingOuter => self.casing_od,
            Layer::CasingInner => self.casing_id,
            Layer::LiningOuter => self.lining_od,
            Layer::LiningInner => self.lining_id,
        }
    }

    /// Radius of a layer.
    pub fn radius(&self, layer: Layer) -> f64 {
        self.diameter(layer) / 2.0
    }

    /// Outer flange radius.
    pub fn flange_radius(&self) -> f64 {
        self.flange_outer_d / 2.0
    }

    /// Outer flange diameter.
    pub fn flange_diameter(&self) -> f64 {
        self.flange_outer_d
    }

    /// Flange hole diameter.
    pub fn flange_hole_diameter(&self) -> f64 {
        self.flange_hole_d
    }

    /// The four layer diameters as whole-millimeter label strings.
    pub fn diameter_labels(&self) -> Vec<String> {
        Layer::ALL
            .iter()
            .map(|l| format!("{}", self.diameter(*l).round() as i64))
            .collect()
    }
}

/// The outer and inner boundary point runs of one layer ring.
///
/// The inner run is stored reversed, so `outer` followed by `inner` walks
/// the closed ring polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPoints {
    pub outer: Vec<Point>,
    pub inner: Vec<Point>,
}

/// The complete vertex geometry of a drawn pipe shape.
///
/// Produced once at model construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPointSet {
    casing_outer: LayerPoints,
    casing_inner: LayerPoints,
    lining_outer: LayerPoints,
    lining_inner: LayerPoints,
    /// The pipe centerline polyline; also anchors flange placement.
    pub center: Vec<Point>,
}

impl SegmentPointSet {
    pub fn new(
        casing_outer: LayerPoints,
        casing_inner: LayerPoints,
        lining_outer: LayerPoints,
        lining_inner: LayerPoints,
        center: Vec<Point>,
    ) -> Self {
        SegmentPointSet {
            casing_outer,
            casing_inner,
            lining_outer,
            lining_inner,
            center,
        }
    }

    /// The boundary runs of one layer.
    pub fn layer(&self, layer: Layer) -> &LayerPoints {
        match layer {
            Layer::CasingOuter => &self.casing_outer,
            Layer::CasingInner => &self.casing_inner,
            Layer::LiningOuter => &self.lining_outer,
            Layer::LiningInner => &self.lining_inner,
        }
    }

    /// First centerline point: the near pipe end, where the profile-view
    /// flange sits.
    pub fn near_end(&self) -> Point {
        self.center[0]
    }

    /// Last centerline point: the far pipe end.
    pub fn far_end(&self) -> Point {
        self.center[self.center.len() - 1]
    }
}

/// Shared geometry and drawing state for a pipe body.
#[derive(Debug, Clone)]
pub struct PipeBody {
    pub layers: PipeLayers,
    pub points: SegmentPointSet,
    pub flange: &'static FlangeSpec,
    /// The angle of the far pipe end: the bend angle for bends, zero for
    /// straights. Radial dimensions and the far flange rotate with it.
    pub far_angle: f64,
}

impl PipeBody {
    /// Draws one layer ring.
    ///
    /// `fill` paints the ring interior; `outline` strokes the full ring
    /// silhouette; `edges` strokes only the two boundary runs. Callers
    /// compose the modes so seams between adjacent layers are never drawn
    /// twice: every layer fills first without outline, and only the
    /// outermost layer strokes its outline last.
    pub fn draw_layer(
        &self,
        canvas: &mut dyn Canvas,
        style: &RenderStyle,
        layer: Layer,
        fill: bool,
        outline: bool,
        edges: bool,
    ) {
        canvas.save();

        let pts = self.points.layer(layer);

        if fill || outline {
            for (i, p) in pts.outer.iter().chain(pts.inner.iter()).enumerate() {
                if i == 0 {
                    canvas.move_to(p.x, p.y);
                } else {
                    canvas.line_to(p.x, p.y);
                }
            }
            canvas.close_path();

            if fill {
                canvas.set_color(layer.fill_color());
                if outline {
                    canvas.fill_preserve();
                } else {
                    canvas.fill();
                }
            }

            if outline {
                canvas.set_color(style.line_color);
                canvas.stroke();
            }
        }

        if edges {
            canvas.set_color(style.line_color);
            for run in [&pts.outer, &pts.inner] {
                for (i, p) in run.iter().enumerate() {
                    if i == 0 {
                        canvas.move_to(p.x, p.y);
                    } else {
                        canvas.line_to(p.x, p.y);
                    }
                }
                canvas.stroke();
            }
        }

        canvas.restore();
    }

    /// Draws the standard layer sequence: fill everything first, then
    /// stroke only the outermost outline so internal boundaries never
    /// redraw the silhouette edge.
    pub fn draw_body(&self, canvas: &mut dyn Canvas, style: &RenderStyle) {
        self.draw_layer(canvas, style, Layer::CasingOuter, true, false, false);
        self.draw_layer(canvas, style, Layer::CasingInner, true, false, true);
        self.draw_layer(canvas, style, Layer::LiningOuter, true, false, true);
        self.draw_layer(canvas, style, Layer::LiningInner, true, false, true);
        self.draw_layer(canvas, style, Layer::CasingOuter, false, true, false);
    }

    /// Draws a dashed line along the pipe centerline.
    ///
    /// Segmented, not curved, for pipe bends.
    pub fn draw_centerline(&self, canvas: &mut dyn Canvas, style: &RenderStyle) {
        canvas.save();

        canvas.set_dash(&style.dash);
        for (i, p) in self.points.center.iter().enumerate() {
            if i == 0 {
                canvas.move_to(p.x, p.y);
            } else {
                canvas.line_to(p.x, p.y);
            }
        }
        canvas.stroke();

        canvas.restore();
    }

    /// Draws the per-layer diameter dimensions at the far pipe end.
    ///
    /// One dimension line per layer, offset along the normal of the far
    /// end at 4, 3, 2 and 1 stub lengths for the four layers.
    pub fn draw_radial_dimensions(
        &self,
        canvas: &mut dyn Canvas,
        style: &RenderStyle,
        dim_stub: f64,
    ) {
        canvas.save();

        for (mult, layer) in (1..=4).rev().zip(Layer::ALL) {
            let dll = dim_stub * mult as f64;
            let pts = self.points.layer(layer);

            let outer_end = pts.outer[pts.outer.len() - 1];
            let inner_end = pts.inner[0];

            let mut offsets = [Point::ORIGIN; 2];
            for (slot, point) in offsets.iter_mut().zip([outer_end, inner_end]) {
                *slot = polar_to_cartesian(self.far_angle + PI / 2.0, dll, point);
                canvas.move_to(point.x, point.y);
                canvas.line_to(slot.x, slot.y);
            }
            canvas.stroke();

            draw_dim_line(
                canvas,
                style,
                offsets[0],
                offsets[1],
                self.layers.diameter(layer),
                0,
                LabelOption::Plain,
            );
        }

        canvas.restore();
    }

    /// Draws the nested half-profile arcs at the near pipe end.
    pub fn draw_half_profile(&self, canvas: &mut dyn Canvas) {
        canvas.save();
        let near = self.points.near_end();
        canvas.translate(near.x, near.y);

        for layer in [
            Layer::LiningInner,
            Layer::LiningOuter,
            Layer::CasingInner,
            Layer::CasingOuter,
        ] {
            canvas.arc(0.0, 0.0, self.layers.radius(layer), 0.0, PI);
        }
        canvas.stroke();

        canvas.restore();
    }

    /// Draws the flanges: profile view at the near end, section only at
    /// the far end.
    pub fn draw_flanges(&self, canvas: &mut dyn Canvas, style: &RenderStyle) {
        self.flange
            .draw(canvas, style, self.points.near_end(), 0.0, true);
        self.flange.draw(
            canvas,
            style,
            self.points.far_end(),
            self.far_angle + PI,
            false,
        );
    }
}
