//! Alignment guides: deriving snap lines from rectangles and finding the
//! closest pairing between a moving rectangle and a frozen pool.
//!
//! A rectangle yields up to six lines: left edge, vertical midline and right
//! edge on the vertical axis; top edge, horizontal midline and bottom edge on
//! the horizontal axis. Edges carry the full snap distance as tolerance;
//! midlines half of it, since a midline crossing is harder to see.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::handle::ResizeMode;

/// Orientation of a snap line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// A horizontal line; `position` is a y coordinate.
    Horizontal,
    /// A vertical line; `position` is an x coordinate.
    Vertical,
}

/// Which part of its rectangle a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapKind {
    /// Left or top edge.
    Start,
    /// Vertical or horizontal midline.
    Middle,
    /// Right or bottom edge.
    End,
}

/// A candidate alignment position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapLine {
    pub position: f64,
    pub axis: Axis,
    /// Matches must be strictly closer than this.
    pub tolerance: f64,
    pub kind: SnapKind,
}

impl SnapLine {
    #[must_use]
    pub fn new(position: f64, axis: Axis, tolerance: f64, kind: SnapKind) -> Self {
        Self { position, axis, tolerance, kind }
    }

    #[must_use]
    pub fn is_midline(&self) -> bool {
        self.kind == SnapKind::Middle
    }
}

/// The best pairing of a pool line with one of the moving rectangle's lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapMatch {
    /// The pool line being snapped to.
    pub line: SnapLine,
    /// The moving rectangle's own line that lands on it.
    pub edge: SnapLine,
    /// Absolute distance between the two.
    pub distance: f64,
    /// `distance / edge.tolerance`; lower is a stronger match.
    pub score: f64,
}

/// Closest match per axis, if any is within tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SnapMatches {
    pub horizontal: Option<SnapMatch>,
    pub vertical: Option<SnapMatch>,
}

impl SnapMatches {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }
}

/// Derive the snap lines of `rect`.
///
/// With `None` or [`ResizeMode::Move`] all six lines are returned. For a
/// resize only the lines that actually move are returned, so a node cannot
/// snap on a side it isn't touching: a right-edge resize yields the right
/// edge and the vertical midline. [`ResizeMode::Rotate`] yields nothing.
#[must_use]
pub fn rect_to_snap_lines(rect: &Rect, mode: Option<ResizeMode>, snap_distance: f64) -> Vec<SnapLine> {
    let all = matches!(mode, None | Some(ResizeMode::Move));
    let mode = mode.unwrap_or(ResizeMode::Move);
    let half = snap_distance / 2.0;
    let mut lines = Vec::with_capacity(6);

    if all || mode.is_left_side() {
        lines.push(SnapLine::new(rect.left, Axis::Vertical, snap_distance, SnapKind::Start));
    }
    if all || mode.is_horizontal_resize() {
        lines.push(SnapLine::new(rect.left + rect.width / 2.0, Axis::Vertical, half, SnapKind::Middle));
    }
    if all || mode.is_right_side() {
        lines.push(SnapLine::new(rect.right(), Axis::Vertical, snap_distance, SnapKind::End));
    }
    if all || mode.is_top_side() {
        lines.push(SnapLine::new(rect.top, Axis::Horizontal, snap_distance, SnapKind::Start));
    }
    if all || mode.is_vertical_resize() {
        lines.push(SnapLine::new(rect.top + rect.height / 2.0, Axis::Horizontal, half, SnapKind::Middle));
    }
    if all || mode.is_bottom_side() {
        lines.push(SnapLine::new(rect.bottom(), Axis::Horizontal, snap_distance, SnapKind::End));
    }

    lines
}

/// Concatenate the full snap-line sets of every rectangle, in order.
#[must_use]
pub fn rects_to_snap_lines(rects: &[Rect], snap_distance: f64) -> Vec<SnapLine> {
    rects
        .iter()
        .flat_map(|rect| rect_to_snap_lines(rect, None, snap_distance))
        .collect()
}

/// Find the single closest match per axis between `pool` and `own`.
///
/// A pair is only a candidate when both lines share an axis and their
/// distance is strictly below the own line's tolerance. Candidates are
/// ranked by [`SnapMatch::score`]; on a tie the first one found wins,
/// iterating the pool in order and, within each pool line, `own` in order.
#[must_use]
pub fn closest_snap_lines(pool: &[SnapLine], own: &[SnapLine]) -> SnapMatches {
    let mut matches = SnapMatches::default();

    for line in pool {
        for edge in own {
            if line.axis != edge.axis {
                continue;
            }
            let distance = (line.position - edge.position).abs();
            if distance >= edge.tolerance {
                continue;
            }
            let candidate = SnapMatch { line: *line, edge: *edge, distance, score: distance / edge.tolerance };
            let slot = match line.axis {
                Axis::Horizontal => &mut matches.horizontal,
                Axis::Vertical => &mut matches.vertical,
            };
            if slot.is_none_or(|best| candidate.score < best.score) {
                *slot = Some(candidate);
            }
        }
    }

    matches
}
