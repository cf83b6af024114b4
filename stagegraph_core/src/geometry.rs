// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2-D affine matrix and rectangle helpers.
//!
//! Points and rectangles are plain [`kurbo::Point`] and [`kurbo::Rect`]
//! values. [`Matrix`] is a small hand-rolled affine type whose constructor
//! mirrors how a display node describes its local transform (position, scale,
//! rotation, skew and anchor), which `kurbo::Affine` has no single
//! constructor for. Conversions to and from [`Affine`] are provided so
//! backends can hand composed matrices straight to kurbo-based renderers.

use core::ops::Mul;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Rect};

/// A rectangle spanning the whole representable `f64` range.
///
/// Used as the drag bound when the caller supplies none.
pub const UNBOUNDED: Rect = Rect::new(f64::MIN, f64::MIN, f64::MAX, f64::MAX);

/// A 2-D affine matrix.
///
/// Maps a point `(x, y)` to `(a·x + c·y + tx, b·x + d·y + ty)`, the same
/// coefficient layout as [`Affine::new`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix {
    /// Horizontal scale / rotation component.
    pub a: f64,
    /// Vertical shear / rotation component.
    pub b: f64,
    /// Horizontal shear / rotation component.
    pub c: f64,
    /// Vertical scale / rotation component.
    pub d: f64,
    /// Horizontal translation.
    pub tx: f64,
    /// Vertical translation.
    pub ty: f64,
}

impl Matrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Creates a matrix from its six coefficients.
    #[inline]
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Creates a pure translation.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Creates a non-uniform scale.
    #[inline]
    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Builds a scale-rotate-skew-translate matrix in one step.
    ///
    /// Angles are in degrees. Rotation is folded into both skew angles, so a
    /// pure rotation is `skew_x == skew_y == 0`. Scaling and rotation happen
    /// about `(anchor_x, anchor_y)`, and the anchor itself lands on
    /// `(x + anchor_x, y + anchor_y)`: moving the anchor of an otherwise
    /// identity transform does not move the content.
    #[must_use]
    pub fn create_box(
        x: f64,
        y: f64,
        scale_x: f64,
        scale_y: f64,
        rotation: f64,
        skew_x: f64,
        skew_y: f64,
        anchor_x: f64,
        anchor_y: f64,
    ) -> Self {
        let (sin_x, cos_x) = sin_cos_degrees(rotation + skew_x);
        let (sin_y, cos_y) = sin_cos_degrees(rotation + skew_y);
        let a = cos_y * scale_x;
        let b = sin_y * scale_x;
        let c = -sin_x * scale_y;
        let d = cos_x * scale_y;
        Self {
            a,
            b,
            c,
            d,
            tx: x + anchor_x - (anchor_x * a + anchor_y * c),
            ty: y + anchor_y - (anchor_x * b + anchor_y * d),
        }
    }

    /// Returns the determinant of the linear part.
    #[inline]
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Returns the inverse matrix.
    ///
    /// A singular matrix (zero determinant) produces non-finite
    /// coefficients rather than an error; points mapped through it never
    /// fall inside a finite rectangle.
    #[must_use]
    pub fn invert(&self) -> Self {
        let inv_det = self.determinant().recip();
        Self {
            a: self.d * inv_det,
            b: -self.b * inv_det,
            c: -self.c * inv_det,
            d: self.a * inv_det,
            tx: (self.c * self.ty - self.d * self.tx) * inv_det,
            ty: (self.b * self.tx - self.a * self.ty) * inv_det,
        }
    }

    /// Maps a point through this matrix.
    #[inline]
    #[must_use]
    pub fn transform_point(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Maps the four corners of `rect` and returns their axis-aligned bounds.
    #[must_use]
    pub fn transform_rect_bbox(&self, rect: Rect) -> Rect {
        bounding_rect([
            self.transform_point(Point::new(rect.x0, rect.y0)),
            self.transform_point(Point::new(rect.x1, rect.y0)),
            self.transform_point(Point::new(rect.x1, rect.y1)),
            self.transform_point(Point::new(rect.x0, rect.y1)),
        ])
    }

    /// Is every coefficient [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.a.is_finite()
            && self.b.is_finite()
            && self.c.is_finite()
            && self.d.is_finite()
            && self.tx.is_finite()
            && self.ty.is_finite()
    }
}

impl Default for Matrix {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// `lhs * rhs` applies `rhs` first, then `lhs`.
impl Mul for Matrix {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            tx: self.a * rhs.tx + self.c * rhs.ty + self.tx,
            ty: self.b * rhs.tx + self.d * rhs.ty + self.ty,
        }
    }
}

impl Mul<Point> for Matrix {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: Point) -> Point {
        self.transform_point(rhs)
    }
}

impl From<Matrix> for Affine {
    fn from(m: Matrix) -> Self {
        Self::new([m.a, m.b, m.c, m.d, m.tx, m.ty])
    }
}

impl From<Affine> for Matrix {
    fn from(affine: Affine) -> Self {
        let [a, b, c, d, tx, ty] = affine.as_coeffs();
        Self { a, b, c, d, tx, ty }
    }
}

/// Returns the smallest axis-aligned rectangle containing all `points`.
#[must_use]
pub fn bounding_rect(points: [Point; 4]) -> Rect {
    let mut x0 = points[0].x;
    let mut y0 = points[0].y;
    let mut x1 = x0;
    let mut y1 = y0;
    for p in &points[1..] {
        x0 = x0.min(p.x);
        y0 = y0.min(p.y);
        x1 = x1.max(p.x);
        y1 = y1.max(p.y);
    }
    Rect::new(x0, y0, x1, y1)
}

/// Point-in-rectangle test including all four edges.
///
/// Unlike [`Rect::contains`], the right and bottom edges count as inside.
#[inline]
#[must_use]
pub fn contains_inclusive(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    let radians = (degrees % 360.0).to_radians();
    #[cfg(feature = "std")]
    let (s, c) = radians.sin_cos();
    #[cfg(not(feature = "std"))]
    let (s, c) = (radians.sin(), radians.cos());
    (s, c)
}
