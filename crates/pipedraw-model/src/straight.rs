//! Straight pipe runs.

use pipedraw_render::Canvas;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::component::{PipeComponent, PipeKind, ScaleSolution};
use crate::dims::{draw_dim_line, largest_text_height, largest_text_width, LabelOption};
use crate::error::{ModelError, Result};
use crate::flange::FlangeSpec;
use crate::geom::Point;
use crate::layers::{Layer, LayerPoints, PipeBody, PipeLayers, SegmentPointSet};
use crate::style::{BaseStyle, RenderStyle};

/// Multiplier on the length-label width for the dimension-line offset
/// from the pipe silhouette.
const LEN_DIM_OFFSET_M: f64 = 1.0;
/// Multiplier on the length-label width for the dimension-line band.
const LEN_DIM_WIDTH_M: f64 = 2.0;

/// Job parameters for a straight pipe run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StraightSpec {
    /// Length of the straight, in mm.
    pub length: f64,
    /// Outside diameter of the casing, in mm.
    pub casing_od: f64,
    /// Inside diameter of the casing, in mm.
    pub casing_id: f64,
    /// Outside diameter of the lining, in mm.
    pub lining_od: f64,
    /// Inside diameter of the lining, in mm.
    pub lining_id: f64,
    /// Standard flange designation.
    pub flange: String,
}

/// A straight pipe run with its drawn geometry computed eagerly.
#[derive(Debug, Clone)]
pub struct StraightPipeModel {
    body: PipeBody,
    length: f64,
}

impl StraightPipeModel {
    /// Builds the model, computing all vertex geometry.
    pub fn new(spec: &StraightSpec) -> Result<Self> {
        let flange = FlangeSpec::lookup(&spec.flange)?;
        if spec.length <= 0.0 {
            return Err(ModelError::DegenerateGeometry {
                what: "length",
                value: spec.length,
            });
        }

        let layers = PipeLayers::new(
            spec.casing_od,
            spec.casing_id,
            spec.lining_od,
            spec.lining_id,
            flange,
        )?;

        // The pipe stands upright: the near face on the x axis, the far
        // face `length` above it.
        let layer_runs = |layer: Layer| {
            let r = layers.radius(layer);
            LayerPoints {
                outer: vec![Point::new(r, 0.0), Point::new(r, -spec.length)],
                inner: vec![Point::new(-r, -spec.length), Point::new(-r, 0.0)],
            }
        };
        let points = SegmentPointSet::new(
            layer_runs(Layer::CasingOuter),
            layer_runs(Layer::CasingInner),
            layer_runs(Layer::LiningOuter),
            layer_runs(Layer::LiningInner),
            vec![Point::new(0.0, 0.0), Point::new(0.0, -spec.length)],
        );

        debug!(length = spec.length, flange = %spec.flange, "built straight pipe model");

        Ok(StraightPipeModel {
            body: PipeBody {
                layers,
                points,
                flange,
                far_angle: 0.0,
            },
            length: spec.length,
        })
    }

    /// The shared body geometry.
    pub fn body(&self) -> &PipeBody {
        &self.body
    }

    /// Draws the length dimension line beside the pipe.
    fn draw_length_dim(
        &self,
        canvas: &mut dyn Canvas,
        style: &RenderStyle,
        solution: &ScaleSolution,
    ) {
        let ldm = solution.aux_dim;
        let lem = LEN_DIM_OFFSET_M + LEN_DIM_WIDTH_M;
        let lcm = LEN_DIM_OFFSET_M + LEN_DIM_WIDTH_M / 2.0;
        let flr = self.body.layers.flange_radius();

        canvas.save();

        // Bounding lines extending from both pipe ends.
        let ends = [self.body.points.near_end(), self.body.points.far_end()];
        for end in ends {
            canvas.move_to(flr + ldm * LEN_DIM_OFFSET_M, end.y);
            canvas.line_to(flr + ldm * lem, end.y);
            canvas.stroke();
        }

        let pts = ends.map(|end| Point::new(flr + ldm * lcm, end.y));
        draw_dim_line(
            canvas,
            style,
            pts[0],
            pts[1],
            self.length,
            0,
            LabelOption::Plain,
        );

        canvas.restore();
    }
}

impl PipeComponent for StraightPipeModel {
    fn kind(&self) -> PipeKind {
        PipeKind::Straight
    }

    fn solve_scale(
        &self,
        canvas: &mut dyn Canvas,
        page_w: f64,
        page_h: f64,
        base: &BaseStyle,
    ) -> Result<ScaleSolution> {
        let fld = self.body.layers.flange_diameter();
        let flr = self.body.layers.flange_radius();

        // The radial dimension stubs scale with the label font, so their
        // height must be considered along the y axis; they are upscaled
        // during the final drawing, independent of the factor chosen.
        let rad_values = self.body.layers.diameter_labels();
        let stub = largest_text_height(canvas, &rad_values, &base.dim_text, true);
        let rdm = stub * 4.0;

        // The length dimension occupies width beside the pipe.
        let len_values = vec![format!("{}", self.length.round() as i64)];
        let ldm = largest_text_width(canvas, &len_values, &base.dim_text, true);
        let ldm_total = ldm * (LEN_DIM_OFFSET_M + LEN_DIM_WIDTH_M);

        let x_scale = (page_w - ldm_total) / fld;
        let y_scale = (page_h - rdm) / (self.length + flr);
        let scale = x_scale.min(y_scale);

        let page_w = page_w / scale;
        let drawn_w = fld + ldm_total / scale;
        let x_origin = (page_w - drawn_w) / 2.0 + flr;

        let page_h = page_h / scale;
        let drawn_h = self.length + flr + rdm / scale;
        let y_origin = page_h - (page_h - drawn_h) / 2.0 - flr;

        debug!(scale, x_origin, y_origin, "solved straight pipe scale");

        Ok(ScaleSolution {
            scale,
            origin: Point::new(x_origin, y_origin),
            dim_stub: stub / scale,
            aux_dim: ldm / scale,
        })
    }

    fn draw_component(
        &self,
        canvas: &mut dyn Canvas,
        style: &RenderStyle,
        solution: &ScaleSolution,
    ) -> Result<()> {
        self.body.draw_body(canvas, style);
        self.body.draw_half_profile(canvas);
        self.body
            .draw_radial_dimensions(canvas, style, solution.dim_stub);
        self.body.draw_flanges(canvas, style);

        self.body.draw_centerline(canvas, style);
        self.draw_length_dim(canvas, style, solution);

        Ok(())
    }
}
