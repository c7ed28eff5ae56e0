//! Shared transform stack and path accumulation for the concrete surfaces.
//!
//! Paths are stored with the current transform already applied, so the
//! surfaces only ever see device-space geometry. Circular arcs are
//! converted to cubic Bezier segments of at most a quarter turn each;
//! affine maps of cubics are exact, so baking the transform loses nothing.

use crate::canvas::{Rgb, TextExtents};
use crate::text;

/// Row-major 2x3 affine matrix: `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Matrix {
    pub fn identity() -> Self {
        Matrix {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Post-composes `other` onto this matrix (new user space inside old).
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        *self = self.then(&Matrix {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: dx,
            f: dy,
        });
    }

    pub fn scale(&mut self, factor: f64) {
        *self = self.then(&Matrix {
            a: factor,
            b: 0.0,
            c: 0.0,
            d: factor,
            e: 0.0,
            f: 0.0,
        });
    }

    pub fn rotate(&mut self, angle: f64) {
        let (sin, cos) = angle.sin_cos();
        *self = self.then(&Matrix {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        });
    }

    /// The uniform scale factor of the matrix.
    ///
    /// The engine only ever applies translate/rotate/uniform-scale, so the
    /// two column norms agree and either one is the factor.
    pub fn scale_factor(&self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }
}

/// A device-space path element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PathEl {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CubicTo(f64, f64, f64, f64, f64, f64),
    Close,
}

/// One entry of the graphics-state stack.
#[derive(Debug, Clone)]
pub(crate) struct GState {
    pub matrix: Matrix,
    pub color: Rgb,
    pub line_width: f64,
    pub dash: Vec<f64>,
    pub font_family: String,
    pub font_bold: bool,
    pub font_size: f64,
}

impl Default for GState {
    fn default() -> Self {
        GState {
            matrix: Matrix::identity(),
            color: Rgb::BLACK,
            line_width: 1.0,
            dash: Vec::new(),
            font_family: "Sans".to_string(),
            font_bold: false,
            font_size: 10.0,
        }
    }
}

/// Graphics state, state stack and current path, shared by the surfaces.
#[derive(Debug, Clone)]
pub(crate) struct PathState {
    pub gs: GState,
    stack: Vec<GState>,
    pub path: Vec<PathEl>,
    pub current: Option<(f64, f64)>,
}

impl PathState {
    pub fn new() -> Self {
        PathState {
            gs: GState::default(),
            stack: Vec::new(),
            path: Vec::new(),
            current: None,
        }
    }

    pub fn save(&mut self) {
        self.stack.push(self.gs.clone());
    }

    pub fn restore(&mut self) {
        if let Some(gs) = self.stack.pop() {
            self.gs = gs;
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        let p = self.gs.matrix.apply(x, y);
        self.path.push(PathEl::MoveTo(p.0, p.1));
        self.current = Some(p);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        let p = self.gs.matrix.apply(x, y);
        if self.current.is_none() {
            self.path.push(PathEl::MoveTo(p.0, p.1));
        } else {
            self.path.push(PathEl::LineTo(p.0, p.1));
        }
        self.current = Some(p);
    }

    pub fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close_path();
    }

    pub fn close_path(&mut self) {
        self.path.push(PathEl::Close);
        // The current point moves back to the start of the closed subpath.
        let start = self.path.iter().rev().find_map(|el| match el {
            PathEl::MoveTo(x, y) => Some((*x, *y)),
            _ => None,
        });
        self.current = start;
    }

    pub fn arc(&mut self, cx: f64, cy: f64, radius: f64, angle1: f64, angle2: f64) {
        let mut a2 = angle2;
        while a2 < angle1 {
            a2 += std::f64::consts::TAU;
        }
        self.arc_impl(cx, cy, radius, angle1, a2);
    }

    pub fn arc_negative(&mut self, cx: f64, cy: f64, radius: f64, angle1: f64, angle2: f64) {
        let mut a2 = angle2;
        while a2 > angle1 {
            a2 -= std::f64::consts::TAU;
        }
        self.arc_impl(cx, cy, radius, angle1, a2);
    }

    /// Appends an arc sweeping from `angle1` to `angle2` (either
    /// direction), split into quarter-turn cubic segments.
    fn arc_impl(&mut self, cx: f64, cy: f64, radius: f64, angle1: f64, angle2: f64) {
        let start = (cx + radius * angle1.cos(), cy + radius * angle1.sin());
        if self.current.is_some() {
            self.push_device_line(start);
        } else {
            let p = self.gs.matrix.apply(start.0, start.1);
            self.path.push(PathEl::MoveTo(p.0, p.1));
            self.current = Some(p);
        }

        let sweep = angle2 - angle1;
        let segments = (sweep.abs() / std::f64::consts::FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / segments as f64;
        let mut a = angle1;
        for _ in 0..segments {
            let b = a + step;
            // Quadrant Bezier approximation: k = 4/3 * tan(step / 4).
            let k = 4.0 / 3.0 * (step / 4.0).tan();
            let (sin_a, cos_a) = a.sin_cos();
            let (sin_b, cos_b) = b.sin_cos();
            let p1 = (
                cx + radius * (cos_a - k * sin_a),
                cy + radius * (sin_a + k * cos_a),
            );
            let p2 = (
                cx + radius * (cos_b + k * sin_b),
                cy + radius * (sin_b - k * cos_b),
            );
            let p3 = (cx + radius * cos_b, cy + radius * sin_b);
            let d1 = self.gs.matrix.apply(p1.0, p1.1);
            let d2 = self.gs.matrix.apply(p2.0, p2.1);
            let d3 = self.gs.matrix.apply(p3.0, p3.1);
            self.path
                .push(PathEl::CubicTo(d1.0, d1.1, d2.0, d2.1, d3.0, d3.1));
            self.current = Some(d3);
            a = b;
        }
    }

    fn push_device_line(&mut self, user: (f64, f64)) {
        let p = self.gs.matrix.apply(user.0, user.1);
        self.path.push(PathEl::LineTo(p.0, p.1));
        self.current = Some(p);
    }

    /// Takes the current path, clearing it.
    pub fn take_path(&mut self) -> Vec<PathEl> {
        self.current = None;
        std::mem::take(&mut self.path)
    }

    /// Returns the current path without clearing it.
    pub fn snapshot_path(&self) -> Vec<PathEl> {
        self.path.clone()
    }

    /// Line width in device units under the current transform.
    pub fn device_line_width(&self) -> f64 {
        self.gs.line_width * self.gs.matrix.scale_factor()
    }

    /// Dash pattern in device units under the current transform.
    pub fn device_dash(&self) -> Vec<f64> {
        let s = self.gs.matrix.scale_factor();
        self.gs.dash.iter().map(|d| d * s).collect()
    }

    /// Font size in device units under the current transform.
    pub fn device_font_size(&self) -> f64 {
        self.gs.font_size * self.gs.matrix.scale_factor()
    }

    /// Measures text in user units with the selected font.
    pub fn measure_text(&self, s: &str) -> TextExtents {
        text::measure(
            &self.gs.font_family,
            self.gs.font_bold,
            self.gs.font_size,
            s,
        )
    }
}
