#![allow(clippy::float_cmp)]

use std::f64::consts::FRAC_PI_2;

use uuid::Uuid;

use super::*;
use crate::snap::{Axis, SnapKind, rects_to_snap_lines};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn session(rect: Rect, rotation: f64, mode: ResizeMode, pool: Vec<SnapLine>) -> GestureSession {
    GestureSession {
        node_id: Uuid::new_v4(),
        mode,
        rect_at_start: rect,
        rotation_at_start: rotation,
        pointer_at_start: Point::new(0.0, 0.0),
        started_at_ms: 0.0,
        pool,
        viewport: Viewport::default(),
    }
}

fn canvas_rect() -> Rect {
    let config = EngineConfig::default();
    Rect::new(0.0, 0.0, config.canvas_width, config.canvas_height)
}

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
}

#[test]
fn shift_locks_ratio() {
    assert!(Modifiers { shift: true, ..Modifiers::default() }.lock_ratio());
    assert!(!Modifiers { ctrl: true, alt: true, meta: true, shift: false }.lock_ratio());
}

// =============================================================
// PointerSample
// =============================================================

#[test]
fn mouse_sample_uses_client_position() {
    assert_eq!(PointerSample::at(12.0, 34.0).point(), Point::new(12.0, 34.0));
}

#[test]
fn touch_sample_uses_first_touch() {
    let sample = PointerSample {
        touches: vec![Point::new(5.0, 6.0), Point::new(7.0, 8.0)],
        ..PointerSample::at(0.0, 0.0)
    };
    assert_eq!(sample.point(), Point::new(5.0, 6.0));
}

#[test]
fn sample_builders() {
    let sample = PointerSample::at(1.0, 2.0)
        .with_timestamp(250.0)
        .with_modifiers(Modifiers { shift: true, ..Modifiers::default() });
    assert_eq!(sample.timestamp_ms, 250.0);
    assert!(sample.modifiers.shift);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    let state = InputState::default();
    assert!(state.is_idle());
    assert!(state.session().is_none());
    assert!(state.active_handle().is_none());
}

#[test]
fn resizing_reports_its_handle() {
    let s = session(Rect::new(0.0, 0.0, 50.0, 50.0), 0.0, ResizeMode::Left, Vec::new());
    let state = InputState::ResizingNode { session: s };
    assert_eq!(state.active_handle(), Some(Handle::Resize(ResizeMode::Left)));
    assert!(!state.is_idle());
}

#[test]
fn rotating_reports_its_handle() {
    let s = session(Rect::new(0.0, 0.0, 50.0, 50.0), 0.0, ResizeMode::Rotate, Vec::new());
    let state = InputState::RotatingNode { session: s, handle: RotateHandle::BottomLeft };
    assert_eq!(state.active_handle(), Some(Handle::Rotate(RotateHandle::BottomLeft)));
}

#[test]
fn dragging_has_no_handle() {
    let s = session(Rect::new(0.0, 0.0, 50.0, 50.0), 0.0, ResizeMode::Move, Vec::new());
    let state = InputState::DraggingNode { session: s.clone() };
    assert!(state.active_handle().is_none());
    assert_eq!(state.session(), Some(&s));
}

// =============================================================
// GestureSession: moves
// =============================================================

#[test]
fn move_snaps_right_edge_to_sibling() {
    let sibling = Rect::new(400.0, 100.0, 100.0, 100.0);
    let pool = rects_to_snap_lines(&[sibling, canvas_rect()], 15.0);
    let s = session(Rect::new(100.0, 100.0, 200.0, 150.0), 0.0, ResizeMode::Move, pool);
    let out = s.constrain(Point::new(95.0, 0.0), false, &EngineConfig::default()).unwrap();
    // Raw right edge 395 lands on the sibling's left edge at 400.
    assert!(approx_eq(out.rect.left, 200.0));
    assert!(approx_eq(out.rect.top, 100.0));
    assert_eq!(out.rect.width, 200.0);
    assert_eq!(out.guides.len(), 2);
    assert!(out.guides.iter().any(|l| l.axis == Axis::Vertical && l.position == 400.0));
    assert!(out.guides.iter().any(|l| l.axis == Axis::Horizontal && l.position == 100.0));
}

#[test]
fn rotated_move_snaps_visible_bounds() {
    // Quarter turn: the 100x50 node is drawn as a 50x100 box starting at x = 125.
    let sibling = Rect::new(200.0, 400.0, 50.0, 50.0);
    let pool = rects_to_snap_lines(&[sibling, canvas_rect()], 15.0);
    let s = session(Rect::new(100.0, 100.0, 100.0, 50.0), FRAC_PI_2, ResizeMode::Move, pool);
    let out = s.constrain(Point::new(20.0, 0.0), false, &EngineConfig::default()).unwrap();
    assert!(approx_eq(out.rect.left, 125.0));
    assert!(approx_eq(out.rect.top, 100.0));
    assert_eq!(out.rect.width, 100.0);
    assert_eq!(out.rect.height, 50.0);
}

#[test]
fn move_never_resizes_undersized_node() {
    let s = session(Rect::new(300.0, 300.0, 10.0, 10.0), 0.0, ResizeMode::Move, Vec::new());
    let out = s.constrain(Point::new(7.0, 3.0), false, &EngineConfig::default()).unwrap();
    assert!(approx_eq(out.rect.left, 307.0));
    assert!(approx_eq(out.rect.top, 303.0));
    assert_eq!(out.rect.width, 10.0);
    assert_eq!(out.rect.height, 10.0);
}

#[test]
fn move_is_kept_inside_canvas() {
    let s = session(Rect::new(100.0, 100.0, 100.0, 100.0), 0.0, ResizeMode::Move, Vec::new());
    let out = s.constrain(Point::new(5000.0, 0.0), false, &EngineConfig::default()).unwrap();
    assert!(approx_eq(out.rect.left, 1280.0 - 20.0));
    assert_eq!(out.rect.width, 100.0);
}

// =============================================================
// GestureSession: resizes
// =============================================================

#[test]
fn unrotated_resize_snaps_dragged_edge() {
    let pool = vec![SnapLine::new(410.0, Axis::Vertical, 15.0, SnapKind::Start)];
    let s = session(Rect::new(100.0, 100.0, 200.0, 150.0), 0.0, ResizeMode::Right, pool);
    let out = s.constrain(Point::new(105.0, 0.0), false, &EngineConfig::default()).unwrap();
    assert_eq!(out.rect.left, 100.0);
    assert!(approx_eq(out.rect.width, 310.0));
}

#[test]
fn ratio_lock_follows_width_on_corner() {
    let s = session(Rect::new(100.0, 100.0, 200.0, 100.0), 0.0, ResizeMode::BottomRight, Vec::new());
    let out = s.constrain(Point::new(100.0, 0.0), true, &EngineConfig::default()).unwrap();
    assert!(approx_eq(out.rect.width, 300.0));
    assert!(approx_eq(out.rect.height, 150.0));
    assert_eq!(out.rect.left, 100.0);
    assert_eq!(out.rect.top, 100.0);
}

#[test]
fn rotated_resize_keeps_anchor() {
    let s = session(Rect::new(100.0, 100.0, 100.0, 50.0), FRAC_PI_2, ResizeMode::Right, Vec::new());
    let out = s.constrain(Point::new(0.0, 20.0), false, &EngineConfig::default()).unwrap();
    assert!(approx_eq(out.rect.width, 120.0));
    assert!(approx_eq(out.rect.height, 50.0));
    assert!(approx_eq(out.rect.left, 90.0));
    assert!(approx_eq(out.rect.top, 110.0));
}

#[test]
fn rotated_resize_respects_min_size() {
    let s = session(Rect::new(100.0, 100.0, 100.0, 50.0), FRAC_PI_2, ResizeMode::Right, Vec::new());
    let out = s.constrain(Point::new(0.0, -200.0), false, &EngineConfig::default()).unwrap();
    assert!(approx_eq(out.rect.width, 30.0));
    assert!(approx_eq(out.rect.height, 50.0));
    assert!(approx_eq(out.rect.left, 135.0));
    assert!(approx_eq(out.rect.top, 65.0));
}

#[test]
fn rotated_resize_ignores_snap_pool() {
    let pool = vec![SnapLine::new(93.0, Axis::Vertical, 15.0, SnapKind::Start)];
    let s = session(Rect::new(100.0, 100.0, 100.0, 50.0), FRAC_PI_2, ResizeMode::Right, pool);
    let out = s.constrain(Point::new(0.0, 20.0), false, &EngineConfig::default()).unwrap();
    assert!(approx_eq(out.rect.left, 90.0));
    assert!(out.guides.is_empty());
}

#[test]
fn rotate_mode_leaves_rect_alone() {
    let start = Rect::new(10.0, 10.0, 100.0, 100.0);
    let s = session(start, 0.0, ResizeMode::Rotate, Vec::new());
    let out = s.constrain(Point::new(50.0, 50.0), false, &EngineConfig::default()).unwrap();
    assert_eq!(out.rect, start);
}

// =============================================================
// GestureSession: rotation and viewport
// =============================================================

#[test]
fn rotation_tracks_pointer_around_center() {
    let s = session(Rect::new(0.0, 0.0, 100.0, 100.0), 0.0, ResizeMode::Rotate, Vec::new());
    assert!(approx_eq(s.rotation(Point::new(150.0, 50.0), RotateHandle::Top), FRAC_PI_2));
    assert!(approx_eq(s.rotation(Point::new(50.0, -50.0), RotateHandle::Top), 0.0));
}

#[test]
fn canvas_point_uses_frozen_viewport() {
    let mut s = session(Rect::new(0.0, 0.0, 100.0, 100.0), 0.0, ResizeMode::Move, Vec::new());
    s.viewport = Viewport::new(10.0, 20.0, 2.0);
    let expected = s.viewport.client_to_canvas(Point::new(50.0, 60.0));
    assert_eq!(s.canvas_point(Point::new(50.0, 60.0)), expected);
}

#[test]
fn from_touches_without_touches_is_not_finite() {
    let sample = PointerSample::from_touches(Vec::new(), Modifiers::default(), 10.0);
    assert!(!sample.point().is_finite());
    let sample = PointerSample::from_touches(vec![Point::new(3.0, 4.0)], Modifiers::default(), 10.0);
    assert_eq!(sample.point(), Point::new(3.0, 4.0));
    assert_eq!(sample.timestamp_ms, 10.0);
}
