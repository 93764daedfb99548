//! Gesture modes and the handles that start them.
//!
//! A [`ResizeMode`] names which part of a node a gesture moves: the whole
//! body, one of eight sides/corners, or its rotation. The side predicates on
//! it drive both snap-line filtering and anchor resolution, so every stage of
//! the constraint pipeline agrees on which edges are moving.

#[cfg(test)]
#[path = "handle_test.rs"]
mod handle_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    HOME_BOTTOM, HOME_BOTTOM_LEFT, HOME_BOTTOM_RIGHT, HOME_LEFT, HOME_RIGHT, HOME_TOP, HOME_TOP_LEFT,
    HOME_TOP_RIGHT,
};
use crate::error::EngineError;

/// What an in-progress gesture is doing to the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResizeMode {
    Move,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    Rotate,
}

/// The eight directional resize modes, in handle render order.
pub const RESIZE_MODES: [ResizeMode; 8] = [
    ResizeMode::Right,
    ResizeMode::Left,
    ResizeMode::Top,
    ResizeMode::Bottom,
    ResizeMode::TopLeft,
    ResizeMode::TopRight,
    ResizeMode::BottomRight,
    ResizeMode::BottomLeft,
];

impl ResizeMode {
    /// One of the eight side/corner resizes (not move, not rotate).
    #[must_use]
    pub fn is_resize(self) -> bool {
        !matches!(self, Self::Move | Self::Rotate)
    }

    /// A corner handle: two sides move at once.
    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::BottomRight | Self::BottomLeft)
    }

    #[must_use]
    pub fn is_left_side(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    #[must_use]
    pub fn is_right_side(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    #[must_use]
    pub fn is_top_side(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    #[must_use]
    pub fn is_bottom_side(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    /// The resize changes width.
    #[must_use]
    pub fn is_horizontal_resize(self) -> bool {
        self.is_left_side() || self.is_right_side()
    }

    /// The resize changes height.
    #[must_use]
    pub fn is_vertical_resize(self) -> bool {
        self.is_top_side() || self.is_bottom_side()
    }

    /// Direction the dragged vertical edge moves outward: -1 left, +1 right, 0 none.
    #[must_use]
    pub fn x_sign(self) -> f64 {
        if self.is_left_side() {
            -1.0
        } else if self.is_right_side() {
            1.0
        } else {
            0.0
        }
    }

    /// Direction the dragged horizontal edge moves outward: -1 top, +1 bottom, 0 none.
    #[must_use]
    pub fn y_sign(self) -> f64 {
        if self.is_top_side() {
            -1.0
        } else if self.is_bottom_side() {
            1.0
        } else {
            0.0
        }
    }

    /// Wire name, matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Move => "MOVE",
            Self::Top => "TOP",
            Self::Bottom => "BOTTOM",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::TopLeft => "TOP_LEFT",
            Self::TopRight => "TOP_RIGHT",
            Self::BottomRight => "BOTTOM_RIGHT",
            Self::BottomLeft => "BOTTOM_LEFT",
            Self::Rotate => "ROTATE",
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MOVE" => Ok(Self::Move),
            "TOP" => Ok(Self::Top),
            "BOTTOM" => Ok(Self::Bottom),
            "LEFT" => Ok(Self::Left),
            "RIGHT" => Ok(Self::Right),
            "TOP_LEFT" => Ok(Self::TopLeft),
            "TOP_RIGHT" => Ok(Self::TopRight),
            "BOTTOM_RIGHT" => Ok(Self::BottomRight),
            "BOTTOM_LEFT" => Ok(Self::BottomLeft),
            "ROTATE" => Ok(Self::Rotate),
            other => Err(EngineError::UnknownMode(other.to_owned())),
        }
    }
}

/// Canonical positions a rotation grip can sit at around a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RotateHandle {
    Right,
    TopRight,
    #[default]
    Top,
    TopLeft,
    Left,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl RotateHandle {
    /// Angle of this handle around an unrotated node, measured y-up from +x.
    ///
    /// Grabbing the handle and leaving the pointer at its home angle yields a
    /// rotation of zero.
    #[must_use]
    pub fn home_angle(self) -> f64 {
        match self {
            Self::Right => HOME_RIGHT,
            Self::TopRight => HOME_TOP_RIGHT,
            Self::Top => HOME_TOP,
            Self::TopLeft => HOME_TOP_LEFT,
            Self::Left => HOME_LEFT,
            Self::BottomLeft => HOME_BOTTOM_LEFT,
            Self::Bottom => HOME_BOTTOM,
            Self::BottomRight => HOME_BOTTOM_RIGHT,
        }
    }
}

/// A grip on the selected node that a pointer-down can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "at", rename_all = "snake_case")]
pub enum Handle {
    Resize(ResizeMode),
    Rotate(RotateHandle),
}

/// Which handles the render layer should draw.
///
/// Nothing without a selection; every handle while idle; only the grip in use
/// while a resize or rotation is running. A body drag hides no handles.
#[must_use]
pub fn visible_handles(has_selection: bool, active: Option<Handle>) -> Vec<Handle> {
    if !has_selection {
        return Vec::new();
    }
    match active {
        Some(handle) => vec![handle],
        None => {
            let mut handles: Vec<Handle> = RESIZE_MODES.iter().copied().map(Handle::Resize).collect();
            handles.push(Handle::Rotate(RotateHandle::default()));
            handles
        }
    }
}
