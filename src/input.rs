//! Input model: modifier keys, pointer samples, and the gesture state machine.
//!
//! `PointerSample` is what the host extracts from a mouse or touch event.
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up. Each active variant carries a [`GestureSession`]: the snapshot
//! taken at pointer-down (node rectangle, pointer position, frozen snap pool,
//! viewport), which is never mutated for the rest of the gesture.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::config::EngineConfig;
use crate::consts::ROTATION_EPSILON;
use crate::constraints::{Constrained, PipelineOptions, constrain_canvas_bounds, run_pipeline};
use crate::doc::NodeId;
use crate::error::EngineError;
use crate::geometry::{Rect, event_point};
use crate::handle::{Handle, ResizeMode, RotateHandle};
use crate::snap::{SnapLine, SnapMatches};
use crate::transform::{map_local_to_screen, resize_candidate, rotation_from_pointer};
use crate::viewport::{Point, Viewport};

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held. Locks the aspect ratio during a resize.
    pub shift: bool,
    // The rest are passed through for the host; the engine only reads `shift`.
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    #[must_use]
    pub fn lock_ratio(self) -> bool {
        self.shift
    }
}

/// One pointer event, reduced to what the engine reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerSample {
    /// `clientX` / `clientY` of a mouse event.
    pub client: Point,
    /// Client positions of the active touches; empty for mouse events.
    pub touches: Vec<Point>,
    pub modifiers: Modifiers,
    /// Event timestamp in milliseconds.
    pub timestamp_ms: f64,
}

impl PointerSample {
    /// A mouse-style sample at `(x, y)`.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self { client: Point::new(x, y), ..Self::default() }
    }

    /// A touch sample. With no touches at all the point is non-finite, so the
    /// engine rejects it instead of reading the canvas origin.
    #[must_use]
    pub fn from_touches(touches: Vec<Point>, modifiers: Modifiers, timestamp_ms: f64) -> Self {
        let client = touches.first().copied().unwrap_or(Point::new(f64::NAN, f64::NAN));
        Self { client, touches, modifiers, timestamp_ms }
    }

    #[must_use]
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }

    #[must_use]
    pub fn with_timestamp(self, timestamp_ms: f64) -> Self {
        Self { timestamp_ms, ..self }
    }

    /// Client position the event refers to (the primary touch, if any).
    #[must_use]
    pub fn point(&self) -> Point {
        event_point(self.client, &self.touches)
    }
}

/// Snapshot taken at pointer-down; read-only for the rest of the gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    pub node_id: NodeId,
    pub mode: ResizeMode,
    pub rect_at_start: Rect,
    pub rotation_at_start: f64,
    /// Pointer position at pointer-down, in canvas coordinates.
    pub pointer_at_start: Point,
    pub started_at_ms: f64,
    /// Snap lines of every other node plus the canvas, frozen at pointer-down.
    pub pool: Vec<SnapLine>,
    pub viewport: Viewport,
}

impl GestureSession {
    fn is_rotated(&self) -> bool {
        self.rotation_at_start.abs() >= ROTATION_EPSILON
    }

    /// Convert a client-space pointer into canvas space with the frozen viewport.
    #[must_use]
    pub fn canvas_point(&self, client: Point) -> Point {
        self.viewport.client_to_canvas(client)
    }

    /// The constrained rectangle for a drag or resize with the pointer at `pointer`.
    ///
    /// `pointer` is in canvas coordinates. A drag snaps and bounds the node's
    /// visible bounding box and translates the node by the same amount. An
    /// unrotated resize runs the full pipeline directly. A rotated resize runs
    /// the size stages in the node's own frame, maps the result back so the
    /// anchor stays put, and then only translates it into the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NonFinite`] if any stage yields non-finite geometry.
    pub fn constrain(&self, pointer: Point, lock_ratio: bool, config: &EngineConfig) -> Result<Constrained, EngineError> {
        let delta = pointer.sub(self.pointer_at_start);
        let start = self.rect_at_start;

        match self.mode {
            ResizeMode::Rotate => Ok(Constrained { rect: start, matches: SnapMatches::default(), guides: Vec::new() }),
            ResizeMode::Move => {
                let candidate = start.translated(delta.x, delta.y);
                let bounds = candidate.rotated_bounds(self.rotation_at_start);
                let out = run_pipeline(&bounds, &bounds, &self.pool, ResizeMode::Move, config, PipelineOptions::default())?;
                // A move never grows the box at the right or bottom, so those edges carry the shift.
                let rect = candidate.translated(out.rect.right() - bounds.right(), out.rect.bottom() - bounds.bottom());
                Ok(Constrained { rect, ..out })
            }
            mode if !self.is_rotated() => {
                let candidate = resize_candidate(&start, 0.0, mode, delta);
                let options = PipelineOptions { lock_ratio, ..PipelineOptions::default() };
                run_pipeline(&start, &candidate, &self.pool, mode, config, options)
            }
            mode => {
                let candidate = resize_candidate(&start, self.rotation_at_start, mode, delta);
                let options = PipelineOptions { snap: false, lock_ratio, bounds: false };
                let local = run_pipeline(&start, &candidate, &[], mode, config, options)?;
                let mapped = map_local_to_screen(&start, &local.rect, self.rotation_at_start);
                let bounds = mapped.rotated_bounds(self.rotation_at_start);
                let kept = constrain_canvas_bounds(
                    &bounds,
                    config.canvas_width,
                    config.canvas_height,
                    config.canvas_padding,
                    ResizeMode::Move,
                );
                let rect = mapped.translated(kept.left - bounds.left, kept.top - bounds.top);
                if !rect.is_finite() {
                    return Err(EngineError::NonFinite { stage: "map_local_to_screen" });
                }
                Ok(Constrained { rect, ..local })
            }
        }
    }

    /// Absolute rotation for a pivot gesture with the pointer at `pointer` (canvas coordinates).
    #[must_use]
    pub fn rotation(&self, pointer: Point, handle: RotateHandle) -> f64 {
        rotation_from_pointer(self.rect_at_start.center(), pointer, handle)
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries the gesture snapshot needed to compute the
/// next rectangle on every pointer-move.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A node body was pressed. Becomes a drag once the press has lasted
    /// long enough and the pointer has moved.
    PressingNode { session: GestureSession },
    /// The user is moving a node across the canvas.
    DraggingNode { session: GestureSession },
    /// The user is resizing a node from one of its eight handles.
    ResizingNode { session: GestureSession },
    /// The user is rotating a node around its center.
    RotatingNode { session: GestureSession, handle: RotateHandle },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        match self {
            Self::Idle => None,
            Self::PressingNode { session }
            | Self::DraggingNode { session }
            | Self::ResizingNode { session }
            | Self::RotatingNode { session, .. } => Some(session),
        }
    }

    /// The handle in use, if the gesture was started from one.
    #[must_use]
    pub fn active_handle(&self) -> Option<Handle> {
        match self {
            Self::ResizingNode { session } => Some(Handle::Resize(session.mode)),
            Self::RotatingNode { handle, .. } => Some(Handle::Rotate(*handle)),
            _ => None,
        }
    }
}
