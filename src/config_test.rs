#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn default_matches_constants() {
    let c = EngineConfig::default();
    assert_eq!(c.snap_distance, 15.0);
    assert_eq!(c.min_width, 30.0);
    assert_eq!(c.min_height, 30.0);
    assert_eq!(c.canvas_padding, 20.0);
    assert_eq!(c.drag_start_delay_ms, 100.0);
    assert!(c.validate().is_ok());
}

#[test]
fn with_canvas_overrides_dimensions_only() {
    let c = EngineConfig::with_canvas(640.0, 480.0);
    assert_eq!(c.canvas_width, 640.0);
    assert_eq!(c.canvas_height, 480.0);
    assert_eq!(c.snap_distance, 15.0);
}

#[test]
fn from_json_fills_missing_fields() {
    let c = EngineConfig::from_json(r#"{"canvas_width": 900, "snap_distance": 8}"#).unwrap();
    assert_eq!(c.canvas_width, 900.0);
    assert_eq!(c.snap_distance, 8.0);
    assert_eq!(c.min_width, 30.0);
}

#[test]
fn from_json_empty_object_is_default() {
    assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
}

#[test]
fn from_json_rejects_malformed() {
    assert!(matches!(EngineConfig::from_json("{not json"), Err(EngineError::Json(_))));
}

#[test]
fn from_json_rejects_zero_min_width() {
    let err = EngineConfig::from_json(r#"{"min_width": 0}"#).unwrap_err();
    assert!(matches!(err, EngineError::InvalidConfig { field: "min_width", .. }));
}

#[test]
fn validate_rejects_negative_canvas() {
    let c = EngineConfig { canvas_height: -10.0, ..EngineConfig::default() };
    assert!(matches!(c.validate(), Err(EngineError::InvalidConfig { field: "canvas_height", .. })));
}

#[test]
fn validate_rejects_non_finite() {
    let c = EngineConfig { snap_distance: f64::NAN, ..EngineConfig::default() };
    assert!(matches!(c.validate(), Err(EngineError::InvalidConfig { field: "snap_distance", .. })));
    let c = EngineConfig { canvas_width: f64::INFINITY, ..EngineConfig::default() };
    assert!(c.validate().is_err());
}

#[test]
fn validate_allows_zero_snap_and_padding() {
    let c = EngineConfig { snap_distance: 0.0, canvas_padding: 0.0, ..EngineConfig::default() };
    assert!(c.validate().is_ok());
}

#[test]
fn error_message_names_field() {
    let err = EngineConfig { min_height: -1.0, ..EngineConfig::default() }.validate().unwrap_err();
    assert_eq!(err.to_string(), "invalid config: min_height = -1");
}
