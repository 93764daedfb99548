//! Geometry primitives: rectangles, rotated bounding boxes, vector rotation,
//! and pointer-coordinate extraction.
//!
//! Everything here is plain floating point. Rounding to device pixels is the
//! render layer's business.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::viewport::Point;

/// An unrotated rectangle: the value threaded through every constraint stage.
///
/// For a rotated node this is the box *before* rotation; the node is rotated
/// about this box's center.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    #[serde(alias = "x")]
    pub left: f64,
    #[serde(alias = "y")]
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Build a rectangle of the given size centered on `center`.
    #[must_use]
    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        Self { left: center.x - width / 2.0, top: center.y - height / 2.0, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        rect_center(self)
    }

    /// A copy shifted by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self { left: self.left + dx, top: self.top + dy, ..*self }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.left.is_finite() && self.top.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// The axis-aligned box enclosing this rectangle once rotated by `rotation`.
    #[must_use]
    pub fn rotated_bounds(&self, rotation: f64) -> Rect {
        let bb = bounding_box(self.width, self.height, rotation);
        Rect {
            left: self.left - bb.offset_x,
            top: self.top - bb.offset_y,
            width: bb.width,
            height: bb.height,
        }
    }
}

/// Axis-aligned bounds of a rotated rectangle.
///
/// `offset_x` / `offset_y` position the unrotated rectangle inside the box:
/// the box's left edge sits at `rect.left - offset_x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Compute the axis-aligned bounding box of a `width × height` rectangle
/// rotated by `rotation` radians about its center.
///
/// The angle is folded into `[0, π/2]` by taking absolute sine and cosine,
/// which is the same reflection as `π - angle` for the second and fourth
/// quadrants.
#[must_use]
pub fn bounding_box(width: f64, height: f64, rotation: f64) -> BoundingBox {
    let sin = rotation.sin().abs();
    let cos = rotation.cos().abs();
    let bb_width = sin * height + cos * width;
    let bb_height = sin * width + cos * height;
    BoundingBox {
        width: bb_width,
        height: bb_height,
        offset_x: (bb_width - width) / 2.0,
        offset_y: (bb_height - height) / 2.0,
    }
}

/// Center of an unrotated rectangle. Rotation does not move it.
#[must_use]
pub fn rect_center(rect: &Rect) -> Point {
    Point::new(rect.left + rect.width / 2.0, rect.top + rect.height / 2.0)
}

/// Rotate `v` by `angle` radians (turning +x toward +y).
#[must_use]
pub fn rotate_vector(v: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Pick the coordinates a pointer event refers to.
///
/// Touch events report their points in `touches`; only the primary (first)
/// touch is used. Mouse events carry no touches and use `client` directly.
#[must_use]
pub fn event_point(client: Point, touches: &[Point]) -> Point {
    touches.first().copied().unwrap_or(client)
}

/// Fold an angle into `(-π, π]`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}
