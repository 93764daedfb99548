//! Shared numeric constants for the canvas engine.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

// ── Snapping ────────────────────────────────────────────────────

/// Snap tolerance for edges, in canvas units. Midlines use half of this.
pub const SNAP_DISTANCE: f64 = 15.0;

// ── Size floors ─────────────────────────────────────────────────

/// Smallest width a node can be resized to.
pub const MIN_WIDTH: f64 = 30.0;

/// Smallest height a node can be resized to.
pub const MIN_HEIGHT: f64 = 30.0;

// ── Canvas ──────────────────────────────────────────────────────

/// How much of a node must stay inside the canvas on every side.
pub const CANVAS_PADDING: f64 = 20.0;

/// Default canvas width when the host supplies none.
pub const CANVAS_WIDTH: f64 = 1280.0;

/// Default canvas height when the host supplies none.
pub const CANVAS_HEIGHT: f64 = 800.0;

// ── Gestures ────────────────────────────────────────────────────

/// A body press must be held at least this long before movement counts as a drag.
pub const DRAG_START_DELAY_MS: f64 = 100.0;

/// Rotations whose magnitude is below this are treated as unrotated.
pub const ROTATION_EPSILON: f64 = 1e-9;

// ── Rotation handle home angles (radians, y-up) ─────────────────

pub const HOME_RIGHT: f64 = 0.0;
pub const HOME_TOP_RIGHT: f64 = FRAC_PI_4;
pub const HOME_TOP: f64 = FRAC_PI_2;
pub const HOME_TOP_LEFT: f64 = 3.0 * FRAC_PI_4;
pub const HOME_LEFT: f64 = PI;
pub const HOME_BOTTOM_LEFT: f64 = -3.0 * FRAC_PI_4;
pub const HOME_BOTTOM: f64 = -FRAC_PI_2;
pub const HOME_BOTTOM_RIGHT: f64 = -FRAC_PI_4;
