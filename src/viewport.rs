//! Points and the viewport transform between client and canvas coordinates.
//!
//! The host measures where the canvas sits on the page (and how it is
//! scaled) once, and hands the result to the engine as a [`Viewport`]. The
//! engine never queries layout itself.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

/// A point in either client or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Maps client (page) coordinates onto the canvas.
///
/// `origin_x` / `origin_y` are the client coordinates of the canvas's top-left
/// corner. `scale` is client pixels per canvas unit (1.0 = unscaled).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub origin_x: f64,
    pub origin_y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { origin_x: 0.0, origin_y: 0.0, scale: 1.0 }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(origin_x: f64, origin_y: f64, scale: f64) -> Self {
        Self { origin_x, origin_y, scale }
    }

    /// Convert a client-space point to canvas coordinates.
    #[must_use]
    pub fn client_to_canvas(&self, client: Point) -> Point {
        Point {
            x: (client.x - self.origin_x) / self.scale,
            y: (client.y - self.origin_y) / self.scale,
        }
    }

    /// Convert a canvas-space point to client coordinates.
    #[must_use]
    pub fn canvas_to_client(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.scale + self.origin_x,
            y: canvas.y * self.scale + self.origin_y,
        }
    }

    /// Convert a client-space distance to a canvas-space distance.
    #[must_use]
    pub fn client_dist_to_canvas(&self, client_dist: f64) -> f64 {
        client_dist / self.scale
    }

    /// Whether the transform can be inverted safely.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.origin_x.is_finite() && self.origin_y.is_finite() && self.scale.is_finite() && self.scale > 0.0
    }
}
