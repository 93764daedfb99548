//! Engine configuration supplied by the host.
//!
//! The host passes a JSON object (any subset of the fields below); missing
//! fields fall back to the defaults in [`crate::consts`]. Every value is
//! checked by [`EngineConfig::validate`] before the engine accepts it.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_PADDING, CANVAS_WIDTH, DRAG_START_DELAY_MS, MIN_HEIGHT, MIN_WIDTH, SNAP_DISTANCE};
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Edge snap tolerance in canvas units; midlines use half.
    pub snap_distance: f64,
    pub min_width: f64,
    pub min_height: f64,
    /// How much of a node must remain inside the canvas on each side.
    pub canvas_padding: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Hold time before a body press may turn into a drag.
    pub drag_start_delay_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_distance: SNAP_DISTANCE,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
            canvas_padding: CANVAS_PADDING,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            drag_start_delay_ms: DRAG_START_DELAY_MS,
        }
    }
}

impl EngineConfig {
    /// Default config for a canvas of the given size.
    #[must_use]
    pub fn with_canvas(canvas_width: f64, canvas_height: f64) -> Self {
        Self { canvas_width, canvas_height, ..Self::default() }
    }

    /// Parse a JSON config object and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Json`] for malformed input and
    /// [`EngineError::InvalidConfig`] for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would let the pipeline produce degenerate geometry.
    ///
    /// Size floors and canvas dimensions must be positive; snap distance,
    /// padding and drag delay must be non-negative. All must be finite.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), EngineError> {
        positive("min_width", self.min_width)?;
        positive("min_height", self.min_height)?;
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        non_negative("snap_distance", self.snap_distance)?;
        non_negative("canvas_padding", self.canvas_padding)?;
        non_negative("drag_start_delay_ms", self.drag_start_delay_ms)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig { field, value })
    }
}
