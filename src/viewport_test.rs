#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_sub() {
    let d = Point::new(10.0, 4.0).sub(Point::new(3.0, 6.0));
    assert_eq!(d, Point::new(7.0, -2.0));
}

#[test]
fn point_is_finite() {
    assert!(Point::new(1.0, -1.0).is_finite());
    assert!(!Point::new(f64::NAN, 0.0).is_finite());
    assert!(!Point::new(0.0, f64::INFINITY).is_finite());
}

// --- Viewport defaults ---

#[test]
fn viewport_default_is_identity() {
    let vp = Viewport::default();
    assert_eq!(vp.origin_x, 0.0);
    assert_eq!(vp.origin_y, 0.0);
    assert_eq!(vp.scale, 1.0);
    assert!(vp.is_valid());
}

#[test]
fn viewport_rejects_zero_scale() {
    assert!(!Viewport::new(0.0, 0.0, 0.0).is_valid());
    assert!(!Viewport::new(0.0, 0.0, -1.0).is_valid());
    assert!(!Viewport::new(f64::NAN, 0.0, 1.0).is_valid());
}

// --- client_to_canvas ---

#[test]
fn client_to_canvas_identity() {
    let vp = Viewport::default();
    let p = vp.client_to_canvas(Point::new(50.0, 75.0));
    assert!(point_approx_eq(p, Point::new(50.0, 75.0)));
}

#[test]
fn client_to_canvas_with_origin() {
    let vp = Viewport::new(100.0, 50.0, 1.0);
    let p = vp.client_to_canvas(Point::new(100.0, 50.0));
    assert!(point_approx_eq(p, Point::new(0.0, 0.0)));
}

#[test]
fn client_to_canvas_with_origin_and_scale() {
    let vp = Viewport::new(20.0, 10.0, 2.0);
    // (60-20)/2 = 20, (30-10)/2 = 10
    let p = vp.client_to_canvas(Point::new(60.0, 30.0));
    assert!(point_approx_eq(p, Point::new(20.0, 10.0)));
}

// --- canvas_to_client ---

#[test]
fn canvas_to_client_with_origin_and_scale() {
    let vp = Viewport::new(20.0, 10.0, 3.0);
    let p = vp.canvas_to_client(Point::new(5.0, 5.0));
    assert!(approx_eq(p.x, 35.0));
    assert!(approx_eq(p.y, 25.0));
}

#[test]
fn round_trip_fractional_scale() {
    let vp = Viewport::new(13.7, -42.3, 0.75);
    let canvas = Point::new(333.3, -999.9);
    let back = vp.client_to_canvas(vp.canvas_to_client(canvas));
    assert!(point_approx_eq(canvas, back));
}

// --- client_dist_to_canvas ---

#[test]
fn client_dist_scales_with_viewport() {
    let vp = Viewport::new(999.0, -999.0, 4.0);
    assert!(approx_eq(vp.client_dist_to_canvas(8.0), 2.0));
}

#[test]
fn client_dist_fractional_scale() {
    let vp = Viewport::new(0.0, 0.0, 0.5);
    assert!(approx_eq(vp.client_dist_to_canvas(10.0), 20.0));
}
