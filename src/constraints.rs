//! The constraint pipeline.
//!
//! Each stage is a pure function from a candidate [`Rect`] to an adjusted
//! one, always finished by [`resolve_adjustments`]. Stages run in a fixed
//! order, each feeding the next:
//!
//! 1. [`constrain_width_height`]: minimum-size floors
//! 2. [`constrain_grid`]: snapping to the frozen snap-line pool
//! 3. [`constrain_ratio`]: aspect-ratio lock (resizes only, when requested)
//! 4. [`constrain_canvas_bounds`]: keep part of the node inside the canvas
//!
//! The central invariant: whichever edge is *not* being dragged stays put.
//! Clamping `width` naively would silently move the anchored corner, so
//! every stage hands its raw result to [`resolve_adjustments`], which moves
//! the dragged edge instead.

#[cfg(test)]
#[path = "constraints_test.rs"]
mod constraints_test;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::geometry::Rect;
use crate::handle::ResizeMode;
use crate::snap::{SnapLine, SnapMatches, closest_snap_lines, rect_to_snap_lines};

#[allow(clippy::float_cmp)]
fn moved(before: f64, after: f64) -> bool {
    before != after
}

/// Reconcile a stage's raw output with the anchor rule for `mode`.
///
/// `target` is the stage's input, `constrained` its raw output.
///
/// - Top-side resizes and moves: a height change shifts `top` the other way,
///   so the bottom stays fixed. If a resize had its `top` clamped, the height
///   absorbs the difference.
/// - Bottom-side resizes: a height change leaves `top` alone. If `top` drifted
///   it is put back and the height absorbs the drift instead.
/// - Left/right mirror the same rules on the horizontal axis.
#[must_use]
pub fn resolve_adjustments(target: &Rect, constrained: &Rect, mode: ResizeMode) -> Rect {
    let mut resolved = *constrained;
    let is_move = mode == ResizeMode::Move;

    if mode.is_top_side() || is_move {
        resolved.top -= constrained.height - target.height;
        if !is_move && moved(target.top, constrained.top) {
            resolved.height += target.top - constrained.top;
        }
    }

    if mode.is_bottom_side() {
        resolved.height += constrained.top - target.top;
        if moved(target.top, constrained.top) {
            resolved.top = target.top;
        }
    }

    if mode.is_left_side() || is_move {
        resolved.left -= constrained.width - target.width;
        if !is_move && moved(target.left, constrained.left) {
            resolved.width += target.left - constrained.left;
        }
    }

    if mode.is_right_side() {
        resolved.width += constrained.left - target.left;
        if moved(target.left, constrained.left) {
            resolved.left = target.left;
        }
    }

    resolved
}

/// Stage 1: clamp width and height up to their floors.
#[must_use]
pub fn constrain_width_height(next: &Rect, min_width: f64, min_height: f64, mode: ResizeMode) -> Rect {
    debug_assert!(min_width > 0.0 && min_height > 0.0, "size floors must be positive");
    let constrained = Rect { width: next.width.max(min_width), height: next.height.max(min_height), ..*next };
    resolve_adjustments(next, &constrained, mode)
}

/// Output of the snapping stage.
#[derive(Debug, Clone, PartialEq)]
pub struct GridResult {
    pub rect: Rect,
    /// Best match per axis, consulted by the ratio stage.
    pub matches: SnapMatches,
    /// Pool lines that were snapped to, for guide rendering.
    pub lines: Vec<SnapLine>,
}

/// Stage 2: snap the candidate's moving lines onto the pool.
///
/// The correction is the pool line's position minus the own line's position.
/// During a resize a midline moves only half as far as the dragged edge, so
/// a midline correction is doubled to land the midline exactly on target.
#[must_use]
pub fn constrain_grid(next: &Rect, pool: &[SnapLine], mode: ResizeMode, snap_distance: f64) -> GridResult {
    let own = rect_to_snap_lines(next, Some(mode), snap_distance);
    let matches = closest_snap_lines(pool, &own);
    let mut lines = Vec::with_capacity(2);
    let mut dx = 0.0;
    let mut dy = 0.0;

    if let Some(m) = matches.horizontal {
        dy = m.line.position - m.edge.position;
        if mode != ResizeMode::Move && m.edge.is_midline() {
            dy *= 2.0;
        }
        lines.push(m.line);
    }

    if let Some(m) = matches.vertical {
        dx = m.line.position - m.edge.position;
        if mode != ResizeMode::Move && m.edge.is_midline() {
            dx *= 2.0;
        }
        lines.push(m.line);
    }

    let constrained = next.translated(dx, dy);
    GridResult { rect: resolve_adjustments(next, &constrained, mode), matches, lines }
}

/// Whether ratio lock keeps the width and derives the height from it.
///
/// Width-only resizes keep the width; height-only resizes keep the height.
/// Corners keep the width unless the height snapped and the width either
/// did not snap or snapped less tightly.
fn width_drives(mode: ResizeMode, matches: &SnapMatches) -> bool {
    if !mode.is_vertical_resize() {
        return true;
    }
    if !mode.is_horizontal_resize() {
        return false;
    }
    match (matches.horizontal, matches.vertical) {
        (None, _) => true,
        (Some(h), Some(v)) => v.score < h.score,
        (Some(_), None) => false,
    }
}

/// Stage 3: hold `width / height` at the gesture-start ratio.
///
/// Moves and rotations pass through untouched, as does a degenerate
/// original with no usable ratio.
#[must_use]
pub fn constrain_ratio(original: &Rect, next: &Rect, matches: &SnapMatches, mode: ResizeMode) -> Rect {
    if !mode.is_resize() || original.width <= 0.0 || original.height <= 0.0 {
        return *next;
    }
    let ratio = original.width / original.height;
    let mut constrained = *next;
    if width_drives(mode, matches) {
        constrained.height = next.width / ratio;
    } else {
        constrained.width = next.height * ratio;
    }
    resolve_adjustments(next, &constrained, mode)
}

/// Stage 4: keep at least `padding` of the node inside the canvas on every side.
///
/// Only `top` / `left` are clamped; [`resolve_adjustments`] then turns a
/// clamped position into a size change for resizes.
#[must_use]
pub fn constrain_canvas_bounds(
    next: &Rect,
    canvas_width: f64,
    canvas_height: f64,
    padding: f64,
    mode: ResizeMode,
) -> Rect {
    let mut constrained = *next;

    // bottom
    if constrained.top + padding > canvas_height {
        constrained.top = canvas_height - padding;
    }
    // right
    if constrained.left + padding > canvas_width {
        constrained.left = canvas_width - padding;
    }
    // top
    if constrained.top + constrained.height - padding < 0.0 {
        constrained.top = padding - constrained.height;
    }
    // left
    if constrained.left + constrained.width - padding < 0.0 {
        constrained.left = padding - constrained.width;
    }

    resolve_adjustments(next, &constrained, mode)
}

/// Which optional stages a pipeline run applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Run the snapping stage.
    pub snap: bool,
    /// Run the ratio-lock stage (ignored for moves).
    pub lock_ratio: bool,
    /// Run the canvas-bounds stage.
    pub bounds: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self { snap: true, lock_ratio: false, bounds: true }
    }
}

/// Result of a full pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Constrained {
    pub rect: Rect,
    pub matches: SnapMatches,
    pub guides: Vec<SnapLine>,
}

/// Thread `candidate` through every stage in order.
///
/// `original` is the rectangle at gesture start; it supplies the ratio.
///
/// # Errors
///
/// Returns [`EngineError::NonFinite`] naming the first stage whose output
/// is not finite.
pub fn run_pipeline(
    original: &Rect,
    candidate: &Rect,
    pool: &[SnapLine],
    mode: ResizeMode,
    config: &EngineConfig,
    options: PipelineOptions,
) -> Result<Constrained, EngineError> {
    let mut rect = constrain_width_height(candidate, config.min_width, config.min_height, mode);
    ensure_finite(&rect, "constrain_width_height")?;

    let mut matches = SnapMatches::default();
    let mut guides = Vec::new();
    if options.snap {
        let grid = constrain_grid(&rect, pool, mode, config.snap_distance);
        rect = grid.rect;
        matches = grid.matches;
        guides = grid.lines;
        ensure_finite(&rect, "constrain_grid")?;
    }

    if options.lock_ratio && mode != ResizeMode::Move {
        rect = constrain_ratio(original, &rect, &matches, mode);
        ensure_finite(&rect, "constrain_ratio")?;
    }

    if options.bounds {
        rect = constrain_canvas_bounds(&rect, config.canvas_width, config.canvas_height, config.canvas_padding, mode);
        ensure_finite(&rect, "constrain_canvas_bounds")?;
    }

    Ok(Constrained { rect, matches, guides })
}

fn ensure_finite(rect: &Rect, stage: &'static str) -> Result<(), EngineError> {
    if rect.is_finite() {
        Ok(())
    } else {
        tracing::warn!(stage, ?rect, "constraint stage produced non-finite geometry");
        Err(EngineError::NonFinite { stage })
    }
}
