//! Standard flange dimensions and flange drawing.

use std::f64::consts::PI;

use pipedraw_render::{Canvas, Rgb};

use crate::error::{ModelError, Result};
use crate::geom::{polar_to_cartesian, Point};
use crate::style::RenderStyle;

/// Multiplier on the bolt-hole radius for the radial tick marks.
const BOLT_HOLE_TICK: f64 = 1.5;

const SECTION_COLOR: Rgb = Rgb::gray(0.9);
const ARC_COLOR: Rgb = Rgb::WHITE;

/// Dimensions of one standard flange, in millimeters.
///
/// Invariant across the catalogue: hole diameter < raised-face diameter <
/// bolt-circle diameter < flange diameter, and the bolt count is even.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlangeSpec {
    pub designation: &'static str,
    pub hole_diameter: f64,
    pub flange_diameter: f64,
    pub flange_thickness: f64,
    pub bolt_circle_diameter: f64,
    pub bolt_hole_diameter: f64,
    pub bolt_count: u32,
    pub raised_face_diameter: f64,
    pub raised_face_height: f64,
}

/// The fixed catalogue of standard PN16 flanges. Not user-extensible.
pub static CATALOGUE: [FlangeSpec; 7] = [
    FlangeSpec {
        designation: "100PN16",
        hole_diameter: 100.0,
        flange_diameter: 220.0,
        flange_thickness: 20.0,
        bolt_circle_diameter: 180.0,
        bolt_hole_diameter: 18.0,
        bolt_count: 8,
        raised_face_diameter: 158.0,
        raised_face_height: 2.0,
    },
    FlangeSpec {
        designation: "125PN16",
        hole_diameter: 125.0,
        flange_diameter: 250.0,
        flange_thickness: 22.0,
        bolt_circle_diameter: 210.0,
        bolt_hole_diameter: 18.0,
        bolt_count: 8,
        raised_face_diameter: 188.0,
        raised_face_height: 2.0,
    },
    FlangeSpec {
        designation: "150PN16",
        hole_diameter: 150.0,
        flange_diameter: 285.0,
        flange_thickness: 22.0,
        bolt_circle_diameter: 240.0,
        bolt_hole_diameter: 22.0,
        bolt_count: 8,
        raised_face_diameter: 212.0,
        raised_face_height: 2.0,
    },
    FlangeSpec {
        designation: "200PN16",
        hole_diameter: 200.0,
        flange_diameter: 340.0,
        flange_thickness: 24.0,
        bolt_circle_diameter: 295.0,
        bolt_hole_diameter: 22.0,
        bolt_count: 12,
        raised_face_diameter: 268.0,
        raised_face_height: 2.0,
    },
    FlangeSpec {
        designation: "250PN16",
        hole_diameter: 250.0,
        flange_diameter: 405.0,
        flange_thickness: 26.0,
        bolt_circle_diameter: 355.0,
        bolt_hole_diameter: 26.0,
        bolt_count: 12,
        raised_face_diameter: 320.0,
        raised_face_height: 2.0,
    },
    FlangeSpec {
        designation: "300PN16",
        hole_diameter: 300.0,
        flange_diameter: 460.0,
        flange_thickness: 28.0,
        bolt_circle_diameter: 410.0,
        bolt_hole_diameter: 26.0,
        bolt_count: 12,
        raised_face_diameter: 378.0,
        raised_face_height: 2.0,
    },
    FlangeSpec {
        designation: "400PN16",
        hole_diameter: 400.0,
        flange_diameter: 580.0,
        flange_thickness: 32.0,
        bolt_circle_diameter: 525.0,
        bolt_hole_diameter: 30.0,
        bolt_count: 16,
        raised_face_diameter: 490.0,
        raised_face_height: 2.0,
    },
];

impl FlangeSpec {
    /// Looks a designation up in the standard catalogue.
    pub fn lookup(designation: &str) -> Result<&'static FlangeSpec> {
        CATALOGUE
            .iter()
            .find(|f| f.designation == designation)
            .ok_or_else(|| ModelError::UnknownFlangeKind {
                designation: designation.to_string(),
            })
    }

    /// All catalogue designations.
    pub fn designations() -> impl Iterator<Item = &'static str> {
        CATALOGUE.iter().map(|f| f.designation)
    }

    /// Outer flange radius.
    pub fn radius(&self) -> f64 {
        self.flange_diameter / 2.0
    }

    /// Hole radius.
    pub fn hole_radius(&self) -> f64 {
        self.hole_diameter / 2.0
    }

    /// Draws the flange at a center face point and rotation.
    ///
    /// An angle of 0 draws the flange with its center face pointing
    /// directly downward; increasing angles rotate it counter-clockwise.
    /// With `profile` the face-on view (arcs and bolt holes) is drawn in
    /// addition to the two mirrored cross-section halves.
    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        style: &RenderStyle,
        center_face: Point,
        angle: f64,
        profile: bool,
    ) {
        canvas.save();
        canvas.translate(center_face.x, center_face.y);
        canvas.rotate(-angle);

        self.draw_cross_section(canvas, style, true);
        self.draw_cross_section(canvas, style, false);

        if profile {
            self.draw_profile(canvas, style);
        }

        canvas.restore();
    }

    /// Draws one half of the longitudinal cross section.
    fn draw_cross_section(&self, canvas: &mut dyn Canvas, style: &RenderStyle, reversed: bool) {
        let rfr = self.raised_face_diameter / 2.0;
        let hrd = self.hole_diameter / 2.0;
        let frd = self.flange_diameter / 2.0;
        let fth = self.flange_thickness;
        let rfh = self.raised_face_height;
        let rev = if reversed { -1.0 } else { 1.0 };

        canvas.save();

        canvas.move_to(hrd * rev, 0.0);
        for (cdx, cdy) in [
            (rfr, 0.0),
            (rfr, rfh),
            (frd, rfh),
            (frd, fth),
            (hrd, fth),
        ] {
            canvas.line_to(cdx * rev, -cdy);
        }
        canvas.close_path();

        canvas.set_color(SECTION_COLOR);
        canvas.fill_preserve();
        canvas.set_color(style.line_color);
        canvas.stroke();

        canvas.restore();
    }

    /// Draws the face-on arcs, bolt holes and bolt-circle centerline.
    fn draw_profile(&self, canvas: &mut dyn Canvas, style: &RenderStyle) {
        let rfr = self.raised_face_diameter / 2.0;
        let hrd = self.hole_diameter / 2.0;
        let frd = self.flange_diameter / 2.0;
        let bcr = self.bolt_circle_diameter / 2.0;
        let bhr = self.bolt_hole_diameter / 2.0;
        let nbs = self.bolt_count / 2;

        canvas.save();

        // Annular flange outline.
        canvas.move_to(hrd, 0.0);
        canvas.line_to(frd, 0.0);
        canvas.arc(0.0, 0.0, frd, 0.0, PI);
        canvas.line_to(-hrd, 0.0);
        canvas.arc_negative(0.0, 0.0, hrd, PI, 0.0);
        canvas.close_path();

        canvas.set_color(ARC_COLOR);
        canvas.fill_preserve();
        canvas.set_color(style.line_color);
        canvas.stroke();

        canvas.arc(0.0, 0.0, rfr, 0.0, PI);
        canvas.stroke();

        // Bolt holes with radial tick marks.
        for i in 0..nbs {
            let ang = -PI / (nbs as f64 * 2.0) * (1.0 + i as f64 * 2.0);
            let bhc = polar_to_cartesian(ang, bcr, Point::ORIGIN);
            canvas.arc(bhc.x, bhc.y, bhr, 0.0, PI * 2.0);
            canvas.set_color(Rgb::WHITE);
            canvas.fill_preserve();

            canvas.set_color(style.line_color);
            let tick_in = polar_to_cartesian(ang, bcr - bhr * BOLT_HOLE_TICK, Point::ORIGIN);
            let tick_out = polar_to_cartesian(ang, bcr + bhr * BOLT_HOLE_TICK, Point::ORIGIN);
            canvas.move_to(tick_in.x, tick_in.y);
            canvas.line_to(tick_out.x, tick_out.y);

            canvas.stroke();
        }

        // Dashed bolt-circle arc, then the centerline stub through the
        // hole; the dash pattern deliberately stays on for the stub.
        canvas.set_dash(&style.dash);
        canvas.arc(0.0, 0.0, bcr, 0.0, PI);
        canvas.stroke();

        canvas.move_to(0.0, 0.0);
        canvas.line_to(0.0, hrd);
        canvas.stroke();

        canvas.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_all_standard_sizes() {
        for name in [
            "100PN16", "125PN16", "150PN16", "200PN16", "250PN16", "300PN16", "400PN16",
        ] {
            assert!(FlangeSpec::lookup(name).is_ok(), "{name} missing");
        }
    }

    #[test]
    fn lookup_rejects_unknown_designation() {
        let err = FlangeSpec::lookup("999PN16").unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownFlangeKind {
                designation: "999PN16".to_string()
            }
        );
    }

    #[test]
    fn catalogue_invariants_hold() {
        for f in &CATALOGUE {
            assert!(f.hole_diameter < f.raised_face_diameter, "{}", f.designation);
            assert!(
                f.raised_face_diameter < f.bolt_circle_diameter,
                "{}",
                f.designation
            );
            assert!(
                f.bolt_circle_diameter < f.flange_diameter,
                "{}",
                f.designation
            );
            assert_eq!(f.bolt_count % 2, 0, "{}", f.designation);
        }
    }
}
