//! Rotation-aware resize math and the pivot rotation angle.
//!
//! A rotated node is resized in its own frame: the pointer delta is rotated
//! into the node's local axes, applied to the unrotated box, and the result
//! is mapped back so the anchor edge stays where it was on screen. Rotation
//! turns +x toward +y (clockwise on a y-down screen, like CSS `rotate()`).

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::geometry::{Rect, normalize_angle, rotate_vector};
use crate::handle::{ResizeMode, RotateHandle};
use crate::viewport::Point;

/// Rotate a screen-space delta into the frame of a node rotated by `angle`.
///
/// `x' = dx·cos + dy·sin`, `y' = -dx·sin + dy·cos`.
#[must_use]
pub fn local_delta(delta: Point, angle: f64) -> Point {
    rotate_vector(delta, -angle)
}

/// Apply a local-frame delta to the unrotated box for `mode`.
///
/// Right/bottom handles grow the size; left/top handles shrink it and shift
/// the origin by the same amount, so the opposite edge stays fixed in the
/// local frame. [`ResizeMode::Move`] translates; [`ResizeMode::Rotate`] is a
/// no-op here.
#[must_use]
pub fn resize_local(start: &Rect, mode: ResizeMode, local: Point) -> Rect {
    match mode {
        ResizeMode::Move => return start.translated(local.x, local.y),
        ResizeMode::Rotate => return *start,
        _ => {}
    }

    let mut rect = *start;
    if mode.is_right_side() {
        rect.width += local.x;
    }
    if mode.is_left_side() {
        rect.width -= local.x;
        rect.left += local.x;
    }
    if mode.is_bottom_side() {
        rect.height += local.y;
    }
    if mode.is_top_side() {
        rect.height -= local.y;
        rect.top += local.y;
    }
    rect
}

/// Map a box computed in `start`'s local frame back to screen space.
///
/// The center displacement between `local` and `start` is rotated by `angle`
/// and applied to `start`'s center. Any point that is stationary in the local
/// frame (the anchor edge) therefore stays stationary on screen.
#[must_use]
pub fn map_local_to_screen(start: &Rect, local: &Rect, angle: f64) -> Rect {
    let start_center = start.center();
    let offset = rotate_vector(local.center().sub(start_center), angle);
    let center = Point::new(start_center.x + offset.x, start_center.y + offset.y);
    Rect::from_center(center, local.width, local.height)
}

/// Candidate box for a resize gesture, in `start`'s local frame.
#[must_use]
pub fn resize_candidate(start: &Rect, rotation: f64, mode: ResizeMode, pointer_delta: Point) -> Rect {
    resize_local(start, mode, local_delta(pointer_delta, rotation))
}

/// Absolute rotation for a pivot gesture with the pointer at `pointer`.
///
/// The pointer's angle around `center` is taken y-up
/// (`atan2(cy - py, px - cx)`) and subtracted from the grabbed handle's home
/// angle, so the handle tracks the pointer. The result is folded into
/// `(-π, π]`.
#[must_use]
pub fn rotation_from_pointer(center: Point, pointer: Point, handle: RotateHandle) -> f64 {
    let angle = (center.y - pointer.y).atan2(pointer.x - center.x);
    normalize_angle(handle.home_angle() - angle)
}
