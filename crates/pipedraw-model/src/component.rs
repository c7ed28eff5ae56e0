//! The drawn-component interface and its fixed-order draw driver.

use pipedraw_render::Canvas;

use crate::error::Result;
use crate::geom::Point;
use crate::style::BaseStyle;

/// Which kind of pipe component a model draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeKind {
    Straight,
    Bend,
}

/// The solved scale and placement for one draw invocation.
///
/// Computed once per draw, after text metrics are available from the live
/// canvas, and held for the remainder of that draw. Lengths here are in
/// user units under the solved scale (already divided by it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSolution {
    /// The chosen uniform scale factor.
    pub scale: f64,
    /// Translation of the component origin inside the drawing area.
    pub origin: Point,
    /// Unit stub length for the per-layer radial dimension lines.
    pub dim_stub: f64,
    /// Kind-specific dimension length: the segment-dimension line base
    /// length for bends, the length-label width for straights.
    pub aux_dim: f64,
}

/// A component that can be drawn to scale within a page rectangle.
///
/// The three hooks run in a fixed order driven by [`draw`]: first
/// [`draw_pre_scale`] in page coordinates, then [`solve_scale`], then —
/// under the solved scale and translation — [`draw_component`]. The
/// variants form a closed set tagged by [`PipeKind`].
///
/// [`draw`]: PipeComponent::draw
/// [`draw_pre_scale`]: PipeComponent::draw_pre_scale
/// [`solve_scale`]: PipeComponent::solve_scale
/// [`draw_component`]: PipeComponent::draw_component
pub trait PipeComponent {
    /// The component kind tag.
    fn kind(&self) -> PipeKind;

    /// Drawing performed in page coordinates before any scaling.
    fn draw_pre_scale(
        &self,
        canvas: &mut dyn Canvas,
        page_w: f64,
        page_h: f64,
        base: &BaseStyle,
    ) -> Result<()> {
        let _ = (canvas, page_w, page_h, base);
        Ok(())
    }

    /// Chooses the scale factor and origin for the available area.
    fn solve_scale(
        &self,
        canvas: &mut dyn Canvas,
        page_w: f64,
        page_h: f64,
        base: &BaseStyle,
    ) -> Result<ScaleSolution>;

    /// Draws the component under the solved transform.
    fn draw_component(
        &self,
        canvas: &mut dyn Canvas,
        style: &crate::style::RenderStyle,
        solution: &ScaleSolution,
    ) -> Result<()>;

    /// Draws the component within the given rectangle.
    ///
    /// Returns the chosen drawing scale, a unitless ratio the caller can
    /// convert to a page scale label.
    fn draw(&self, canvas: &mut dyn Canvas, page_w: f64, page_h: f64) -> Result<f64> {
        let base = BaseStyle::default();

        canvas.save();

        self.draw_pre_scale(canvas, page_w, page_h, &base)?;

        let solution = self.solve_scale(canvas, page_w, page_h, &base)?;
        canvas.scale(solution.scale);
        canvas.translate(solution.origin.x, solution.origin.y);

        let style = base.at_scale(solution.scale);
        canvas.set_color(style.line_color);
        canvas.set_line_width(style.line_width);

        self.draw_component(canvas, &style, &solution)?;

        canvas.restore();

        Ok(solution.scale)
    }
}
