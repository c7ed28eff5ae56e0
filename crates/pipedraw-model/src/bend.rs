//! Segmented and one-piece pipe bends.

use std::f64::consts::PI;

use pipedraw_render::Canvas;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::component::{PipeComponent, PipeKind, ScaleSolution};
use crate::dims::{
    draw_arrowhead, draw_dim_label, draw_dim_line, largest_text_width, LabelOption,
};
use crate::error::{ModelError, Result};
use crate::flange::FlangeSpec;
use crate::geom::{polar_to_cartesian, Point};
use crate::layers::{Layer, LayerPoints, PipeBody, PipeLayers, SegmentPointSet};
use crate::style::{BaseStyle, RenderStyle};
use crate::text_box::{draw_text_box, BoxAnchor, TextBoxOptions};

/// Decimal places shown on segment dimensions.
const SEG_DIM_DECIMALS: usize = 3;

/// How the casing is fabricated.
///
/// The lining is always fabricated from mitred segments; a one-piece
/// casing is smoothly curved instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasingKind {
    OnePiece,
    Segmented,
}

/// Job parameters for a pipe bend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BendSpec {
    /// Nominal centerline radius of the bend, in mm.
    pub nominal_radius: f64,
    /// Outside diameter of the casing, in mm.
    pub casing_od: f64,
    /// Inside diameter of the casing, in mm.
    pub casing_id: f64,
    /// Outside diameter of the lining, in mm.
    pub lining_od: f64,
    /// Inside diameter of the lining, in mm.
    pub lining_id: f64,
    /// Overall bend angle, in degrees.
    pub bend_angle: f64,
    /// Angle of each fabricated segment, in degrees; must evenly divide
    /// the bend angle.
    pub segment_angle: f64,
    /// How the casing is fabricated.
    pub casing: CasingKind,
    /// Show segment dimensions on the main drawing.
    pub show_segment_dims_on_drawing: bool,
    /// Show segment dimensions in an info box.
    pub show_segment_dims_box: bool,
    /// Standard flange designation.
    pub flange: String,
}

/// A labeled segment dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentDim {
    pub label: &'static str,
    pub value: f64,
}

/// Fabrication lengths of one bend segment.
///
/// Each is the chord length `2·R·tan(segangle/2)` at the respective arc
/// radius: the extrados along a layer's outer arc, the intrados along
/// its inner arc, and the mean along the nominal centerline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentDims {
    pub casing_extrados: SegmentDim,
    pub casing_intrados: SegmentDim,
    pub lining_extrados: SegmentDim,
    pub lining_intrados: SegmentDim,
    pub mean: SegmentDim,
}

/// A pipe bend with its drawn geometry computed eagerly.
#[derive(Debug, Clone)]
pub struct BendPipeModel {
    body: PipeBody,
    nominal_radius: f64,
    bend_angle_deg: f64,
    bend_arc: f64,
    segment_angle: f64,
    segments: u32,
    casing: CasingKind,
    show_dims_on_drawing: bool,
    show_dims_box: bool,
    seg_dims: SegmentDims,
}

/// Vertex coordinates for the segment boundaries at a layer radius.
///
/// The nominal radius of a bend runs through the center of each segment
/// at its midpoint, not at its ends — the bend always starts and ends
/// with half segments, and fabricated segments are cut so that their
/// midpoints align with the design radius. The vertices computed here
/// are the segment ends, so every internal vertex sits on the larger
/// effective radius `radius / cos(segangle/2)`; only the two bend ends
/// themselves lie on the true radius. The result has `segments + 2`
/// ordered points.
fn segment_points(bend_arc: f64, segment_angle: f64, segments: u32, radius: f64) -> Vec<Point> {
    let erad = radius / (segment_angle / 2.0).cos();

    let mut pts = Vec::with_capacity(segments as usize + 2);
    pts.push(polar_to_cartesian(0.0, radius, Point::ORIGIN));
    for n in 0..segments {
        let ang = segment_angle * (n as f64 + 0.5);
        pts.push(polar_to_cartesian(ang, erad, Point::ORIGIN));
    }
    pts.push(polar_to_cartesian(bend_arc, radius, Point::ORIGIN));

    pts
}

impl BendPipeModel {
    /// Builds the model, computing all vertex geometry.
    pub fn new(spec: &BendSpec) -> Result<Self> {
        let flange = FlangeSpec::lookup(&spec.flange)?;

        for (what, value) in [
            ("nominal radius", spec.nominal_radius),
            ("bend angle", spec.bend_angle),
            ("segment angle", spec.segment_angle),
        ] {
            if value <= 0.0 {
                return Err(ModelError::DegenerateGeometry { what, value });
            }
        }

        // Angle alignment is checked in hundredths of a degree so that
        // fractional angles like 22.5 stay exact.
        let bend_c = (spec.bend_angle * 100.0).round() as i64;
        let seg_c = (spec.segment_angle * 100.0).round() as i64;
        if seg_c == 0 || bend_c % seg_c != 0 {
            return Err(ModelError::AngleAlignmentMismatch {
                bend_angle: spec.bend_angle,
                segment_angle: spec.segment_angle,
            });
        }
        let segments = (bend_c / seg_c) as u32;

        let layers = PipeLayers::new(
            spec.casing_od,
            spec.casing_id,
            spec.lining_od,
            spec.lining_id,
            flange,
        )?;

        let bend_arc = spec.bend_angle.to_radians();
        let segment_angle = spec.segment_angle.to_radians();
        let nom = spec.nominal_radius;

        // Segment fabrication lengths use the true arc radii with a
        // tangent, unlike the vertex coordinates which need the radius
        // to the segment ends.
        let chord = |radius: f64| radius * (segment_angle / 2.0).tan() * 2.0;
        let seg_dims = SegmentDims {
            casing_extrados: SegmentDim {
                label: "Casing seg. extra. length",
                value: chord(nom + layers.radius(Layer::CasingOuter)),
            },
            casing_intrados: SegmentDim {
                label: "Casing seg. intra. length",
                value: chord(nom - layers.radius(Layer::CasingOuter)),
            },
            lining_extrados: SegmentDim {
                label: "Lining seg. extra. length",
                value: chord(nom + layers.radius(Layer::LiningOuter)),
            },
            lining_intrados: SegmentDim {
                label: "Lining seg. intra. length",
                value: chord(nom - layers.radius(Layer::LiningOuter)),
            },
            mean: SegmentDim {
                label: "Mean seg. length",
                value: chord(nom),
            },
        };

        // The vertex-radius correction differs per layer, so concentric
        // layers are generated independently rather than offset from one
        // polygon.
        let layer_runs = |layer: Layer| {
            let r = layers.radius(layer);
            let outer = segment_points(bend_arc, segment_angle, segments, nom + r);
            let mut inner = segment_points(bend_arc, segment_angle, segments, nom - r);
            inner.reverse();
            LayerPoints { outer, inner }
        };
        let points = SegmentPointSet::new(
            layer_runs(Layer::CasingOuter),
            layer_runs(Layer::CasingInner),
            layer_runs(Layer::LiningOuter),
            layer_runs(Layer::LiningInner),
            segment_points(bend_arc, segment_angle, segments, nom),
        );

        debug!(
            nominal_radius = nom,
            bend_angle = spec.bend_angle,
            segments,
            flange = %spec.flange,
            "built pipe bend model"
        );

        Ok(BendPipeModel {
            body: PipeBody {
                layers,
                points,
                flange,
                far_angle: bend_arc,
            },
            nominal_radius: nom,
            bend_angle_deg: spec.bend_angle,
            bend_arc,
            segment_angle,
            segments,
            casing: spec.casing,
            show_dims_on_drawing: spec.show_segment_dims_on_drawing,
            show_dims_box: spec.show_segment_dims_box,
            seg_dims,
        })
    }

    /// The shared body geometry.
    pub fn body(&self) -> &PipeBody {
        &self.body
    }

    /// Number of fabricated segments.
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// The computed segment fabrication lengths.
    pub fn segment_dims(&self) -> &SegmentDims {
        &self.seg_dims
    }

    fn outer_arc_radius(&self, layer: Layer) -> f64 {
        self.nominal_radius + self.body.layers.radius(layer)
    }

    fn inner_arc_radius(&self, layer: Layer) -> f64 {
        self.nominal_radius - self.body.layers.radius(layer)
    }

    fn outer_flange_bound(&self) -> f64 {
        self.nominal_radius + self.body.flange.radius()
    }

    fn inner_flange_bound(&self) -> f64 {
        self.nominal_radius - self.body.flange.radius()
    }

    /// Draws a layer, routing casing layers of a one-piece bend through
    /// the curved renderer.
    fn draw_layer_dispatch(
        &self,
        canvas: &mut dyn Canvas,
        style: &RenderStyle,
        layer: Layer,
        fill: bool,
        outline: bool,
        edges: bool,
    ) {
        if self.casing == CasingKind::OnePiece && layer.is_casing() {
            self.draw_curved_layer(canvas, style, layer, fill, outline, edges);
        } else {
            self.body.draw_layer(canvas, style, layer, fill, outline, edges);
        }
    }

    /// Draws a smoothly curved (not segmented) layer as an annulus
    /// sector.
    fn draw_curved_layer(
        &self,
        canvas: &mut dyn Canvas,
        style: &RenderStyle,
        layer: Layer,
        fill: bool,
        outline: bool,
        edges: bool,
    ) {
        let b_arc = self.bend_arc;
        let ro = self.outer_arc_radius(layer);
        let ri = self.inner_arc_radius(layer);

        canvas.save();

        if fill || outline {
            let start_in = polar_to_cartesian(0.0, ri, Point::ORIGIN);
            let start_out = polar_to_cartesian(0.0, ro, Point::ORIGIN);
            canvas.move_to(start_in.x, start_in.y);
            canvas.line_to(start_out.x, start_out.y);
            canvas.arc_negative(0.0, 0.0, ro, 0.0, PI * 2.0 - b_arc);
            let end_in = polar_to_cartesian(b_arc, ri, Point::ORIGIN);
            canvas.line_to(end_in.x, end_in.y);
            canvas.arc(0.0, 0.0, ri, PI * 2.0 - b_arc, 0.0);
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
            for r in [ro, ri] {
                canvas.arc(0.0, 0.0, r, PI * 2.0 - b_arc, 0.0);
                canvas.stroke();
            }
        }

        canvas.restore();
    }

    /// Draws the mitre seam lines across a layer at each internal
    /// segment boundary.
    fn draw_ribs(&self, canvas: &mut dyn Canvas, layer: Layer) {
        canvas.save();

        let pts = self.body.points.layer(layer);
        let internal_out = &pts.outer[1..pts.outer.len() - 1];
        let internal_in = pts.inner[1..pts.inner.len() - 1].iter().rev();

        for (po, pi) in internal_out.iter().zip(internal_in) {
            canvas.move_to(po.x, po.y);
            canvas.line_to(pi.x, pi.y);
        }
        canvas.stroke();

        canvas.restore();
    }

    /// Draws a dashed arc along the nominal radius of the bend.
    fn draw_center_arc(&self, canvas: &mut dyn Canvas, style: &RenderStyle) {
        canvas.save();

        canvas.set_dash(&style.dash);
        canvas.arc(0.0, 0.0, self.nominal_radius, PI * 2.0 - self.bend_arc, 0.0);
        canvas.stroke();

        canvas.restore();
    }

    /// Draws the bend angle and nominal radius dimensions.
    fn draw_arc_dims(&self, canvas: &mut dyn Canvas, style: &RenderStyle) {
        let b_arc = self.bend_arc;
        let mut rad = self.inner_flange_bound() * 0.95;

        canvas.save();

        // Angle legs to the bend origin.
        let far = polar_to_cartesian(b_arc, rad, Point::ORIGIN);
        canvas.move_to(far.x, far.y);
        canvas.line_to(0.0, 0.0);
        canvas.line_to(rad, 0.0);
        canvas.stroke();

        // Angle arc with its dimension label.
        rad /= 3.0;

        canvas.arc(0.0, 0.0, rad, PI * 2.0 - b_arc, 0.0);
        canvas.stroke();

        draw_arrowhead(
            canvas,
            b_arc + PI / 2.0,
            polar_to_cartesian(b_arc, rad, Point::ORIGIN),
            style.scale,
        );
        draw_arrowhead(
            canvas,
            PI * 3.0 / 2.0,
            polar_to_cartesian(0.0, rad, Point::ORIGIN),
            style.scale,
        );
        draw_dim_label(
            canvas,
            style,
            polar_to_cartesian(b_arc / 2.0, rad, Point::ORIGIN),
            self.bend_angle_deg,
            0,
            LabelOption::DegreeSuffix,
        );

        // Nominal radius dimension line, kept off the mitre seam for odd
        // segment counts by a half-segment offset.
        rad *= 2.0;
        let angle = if self.segments % 2 == 1 {
            b_arc / 2.0 + self.segment_angle / 2.0
        } else {
            b_arc / 2.0
        };

        let pt1 = polar_to_cartesian(angle, rad, Point::ORIGIN);
        let pt2 = polar_to_cartesian(angle, self.nominal_radius, Point::ORIGIN);
        canvas.move_to(pt1.x, pt1.y);
        canvas.line_to(pt2.x, pt2.y);
        canvas.stroke();
        draw_arrowhead(canvas, angle, pt2, style.scale);
        draw_dim_label(
            canvas,
            style,
            pt1,
            self.nominal_radius,
            0,
            LabelOption::RadiusPrefix,
        );

        canvas.restore();
    }

    /// Draws segment extrados and intrados dimensions on the drawing.
    fn draw_segment_dims(
        &self,
        canvas: &mut dyn Canvas,
        style: &RenderStyle,
        solution: &ScaleSolution,
    ) {
        let segs = self.segments as usize;
        if segs < 3 {
            return;
        }

        let s_ang = self.segment_angle;
        let cld = self.body.layers.radius(Layer::CasingOuter)
            - self.body.layers.radius(Layer::LiningOuter);
        let ddll = solution.aux_dim;
        let one_piece = self.casing == CasingKind::OnePiece;

        canvas.save();

        // Extrados dimensions between extension lines from the two
        // vertices straddling the arc midpoint.
        let mut idx0 = segs / 2 + segs % 2;

        for (layer, dim) in [
            (Layer::CasingOuter, self.seg_dims.casing_extrados.value),
            (Layer::LiningOuter, self.seg_dims.lining_extrados.value),
        ] {
            if layer == Layer::CasingOuter && one_piece {
                continue;
            }
            let run = &self.body.points.layer(layer).outer;
            let mut pts = [Point::ORIGIN; 2];
            for (line, slot) in pts.iter_mut().enumerate() {
                let stp = run[idx0 + line];
                let lnl = if layer == Layer::CasingOuter {
                    ddll * 1.7
                } else {
                    cld + ddll * 0.7
                };
                *slot = polar_to_cartesian(s_ang * idx0 as f64, lnl, stp);

                canvas.move_to(stp.x, stp.y);
                canvas.line_to(slot.x, slot.y);
            }
            canvas.stroke();
            draw_dim_line(
                canvas,
                style,
                pts[1],
                pts[0],
                dim,
                SEG_DIM_DECIMALS,
                LabelOption::Plain,
            );
        }

        // Intrados dimensions on the inner boundary.
        idx0 += 1 - segs % 2;

        for (layer, dim) in [
            (Layer::CasingOuter, self.seg_dims.casing_intrados.value),
            (Layer::LiningOuter, self.seg_dims.lining_intrados.value),
        ] {
            if layer == Layer::CasingOuter && one_piece {
                continue;
            }
            let run = &self.body.points.layer(layer).inner;
            let mult = if one_piece { 0.7 } else { 1.7 };
            let mut pts = [Point::ORIGIN; 2];
            for (line, slot) in pts.iter_mut().enumerate() {
                let stp = run[idx0 + line];
                let lnl = if layer == Layer::CasingOuter {
                    ddll * 0.7
                } else {
                    cld + ddll * mult
                };
                let angle = s_ang * (idx0 as f64 - 2.0 + (segs % 2) as f64) + PI;
                *slot = polar_to_cartesian(angle, lnl, stp);

                canvas.move_to(stp.x, stp.y);
                canvas.line_to(slot.x, slot.y);
            }
            canvas.stroke();
            draw_dim_line(
                canvas,
                style,
                pts[1],
                pts[0],
                dim,
                SEG_DIM_DECIMALS,
                LabelOption::Plain,
            );
        }

        canvas.restore();
    }

    /// Draws the info box of segment dimensions at the page top right.
    fn draw_segment_dims_box(
        &self,
        canvas: &mut dyn Canvas,
        page_w: f64,
        base: &BaseStyle,
    ) {
        if !self.show_dims_box && !self.show_dims_on_drawing {
            return;
        }

        let d = &self.seg_dims;
        let rows: Vec<&SegmentDim> = if !self.show_dims_box {
            vec![&d.mean]
        } else if self.casing == CasingKind::Segmented {
            vec![
                &d.casing_extrados,
                &d.lining_extrados,
                &d.mean,
                &d.lining_intrados,
                &d.casing_intrados,
            ]
        } else {
            vec![&d.lining_extrados, &d.mean, &d.lining_intrados]
        };

        let labels: Vec<String> = rows.iter().map(|r| r.label.to_string()).collect();
        let fields: Vec<String> = rows
            .iter()
            .map(|r| format!("{:.prec$}", r.value, prec = SEG_DIM_DECIMALS))
            .collect();

        draw_text_box(
            canvas,
            &base.dim_text,
            &labels,
            Some(&fields),
            BoxAnchor::TopRight(Point::new(page_w, 0.0)),
            TextBoxOptions::default(),
        );
    }
}

impl PipeComponent for BendPipeModel {
    fn kind(&self) -> PipeKind {
        PipeKind::Bend
    }

    fn draw_pre_scale(
        &self,
        canvas: &mut dyn Canvas,
        page_w: f64,
        _page_h: f64,
        base: &BaseStyle,
    ) -> Result<()> {
        canvas.set_line_width(base.line_width);
        self.draw_segment_dims_box(canvas, page_w, base);
        Ok(())
    }

    fn solve_scale(
        &self,
        canvas: &mut dyn Canvas,
        page_w: f64,
        page_h: f64,
        base: &BaseStyle,
    ) -> Result<ScaleSolution> {
        let b_arc = self.bend_arc;
        let cri = self.inner_arc_radius(Layer::CasingOuter);
        let cro = self.outer_arc_radius(Layer::CasingOuter);
        let bfr = self.outer_flange_bound();
        let flr = self.body.flange.radius();

        // Segment dimension line lengths follow the widest rendered
        // segment label.
        let dim_values: Vec<String> = [
            self.seg_dims.casing_extrados,
            self.seg_dims.casing_intrados,
            self.seg_dims.lining_extrados,
            self.seg_dims.lining_intrados,
        ]
        .iter()
        .map(|d| format!("{:.prec$}", d.value, prec = SEG_DIM_DECIMALS))
        .collect();
        let ddm = largest_text_width(canvas, &dim_values, &base.dim_text, true);

        // Radius dimension line lengths vary with the label font and
        // protrude past the bend, so they count toward the extents on
        // both axes. They are upscaled during the final drawing,
        // independent of the factor chosen here.
        let rad_values = self.body.layers.diameter_labels();
        let stub = largest_text_width(canvas, &rad_values, &base.dim_text, true);
        let rdm = stub * 4.0;

        // Width candidates: limited by the flange bounding circle, and
        // by the angular extent plus the protruding radius dimensions.
        //
        // Segment dimension lines can extend past the right edge of the
        // extent computed here under some configurations. A width
        // candidate for them would depend on the casing kind and on
        // which presentation options are selected; it is not computed,
        // and the info-box option covers the affected cases.
        let rad_w = bfr;
        let ang_w = rad_w - b_arc.cos() * cri;
        let dm_w = (PI / 2.0 - b_arc).cos() * rdm;

        let rad_s = page_w / bfr;
        let ang_s = (page_w - dm_w) / ang_w;
        let x_scale = rad_s.min(ang_s);

        // Height candidates, same shapes.
        let rad_h = b_arc.sin() * bfr + flr;
        let ang_h = b_arc.sin() * cro + flr;
        let dm_h = (PI / 2.0 - b_arc).sin() * rdm;
        let y_scale = (page_h / rad_h).min((page_h - dm_h) / ang_h);

        let scale = x_scale.min(y_scale);

        // Center the union of the radius-limited and angle-limited
        // extents within the page, per axis.
        let page_w = page_w / scale;
        let bend_w = rad_w.max(ang_w + dm_w / scale);
        let x_origin = page_w - (page_w - bend_w) / 2.0 - bfr;

        let page_h = page_h / scale;
        let bend_h = rad_h.max(ang_h + dm_h / scale);
        let y_origin = page_h - (page_h - bend_h) / 2.0 - flr;

        debug!(scale, x_origin, y_origin, "solved pipe bend scale");

        Ok(ScaleSolution {
            scale,
            origin: Point::new(x_origin, y_origin),
            dim_stub: stub / scale,
            aux_dim: ddm / scale,
        })
    }

    fn draw_component(
        &self,
        canvas: &mut dyn Canvas,
        style: &RenderStyle,
        solution: &ScaleSolution,
    ) -> Result<()> {
        self.draw_layer_dispatch(canvas, style, Layer::CasingOuter, true, false, false);
        self.draw_layer_dispatch(canvas, style, Layer::CasingInner, true, false, true);
        self.draw_layer_dispatch(canvas, style, Layer::LiningOuter, true, false, true);
        self.draw_layer_dispatch(canvas, style, Layer::LiningInner, true, false, true);
        self.draw_layer_dispatch(canvas, style, Layer::CasingOuter, false, true, false);

        self.body.draw_half_profile(canvas);
        self.body
            .draw_radial_dimensions(canvas, style, solution.dim_stub);
        self.body.draw_flanges(canvas, style);

        self.draw_ribs(canvas, Layer::LiningInner);
        self.draw_center_arc(canvas, style);
        self.draw_arc_dims(canvas, style);
        if self.show_dims_on_drawing {
            self.draw_segment_dims(canvas, style, solution);
        }

        Ok(())
    }
}
