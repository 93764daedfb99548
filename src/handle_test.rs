#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// ResizeMode predicates
// =============================================================

#[test]
fn move_and_rotate_are_not_resizes() {
    assert!(!ResizeMode::Move.is_resize());
    assert!(!ResizeMode::Rotate.is_resize());
    for mode in RESIZE_MODES {
        assert!(mode.is_resize(), "{mode} should be a resize");
    }
}

#[test]
fn side_predicates_partition_modes() {
    for mode in RESIZE_MODES {
        assert!(!(mode.is_left_side() && mode.is_right_side()), "{mode}");
        assert!(!(mode.is_top_side() && mode.is_bottom_side()), "{mode}");
        assert!(mode.is_horizontal_resize() || mode.is_vertical_resize(), "{mode}");
    }
}

#[test]
fn corners_move_two_sides() {
    for mode in RESIZE_MODES {
        assert_eq!(mode.is_corner(), mode.is_horizontal_resize() && mode.is_vertical_resize(), "{mode}");
    }
}

#[test]
fn edge_modes_move_one_axis() {
    assert!(ResizeMode::Left.is_horizontal_resize());
    assert!(!ResizeMode::Left.is_vertical_resize());
    assert!(ResizeMode::Bottom.is_vertical_resize());
    assert!(!ResizeMode::Bottom.is_horizontal_resize());
}

#[test]
fn move_has_no_sides() {
    let m = ResizeMode::Move;
    assert!(!m.is_left_side() && !m.is_right_side() && !m.is_top_side() && !m.is_bottom_side());
    assert!(!ResizeMode::Rotate.is_horizontal_resize());
    assert!(!ResizeMode::Rotate.is_vertical_resize());
}

#[test]
fn signs_point_outward() {
    assert_eq!(ResizeMode::TopLeft.x_sign(), -1.0);
    assert_eq!(ResizeMode::TopLeft.y_sign(), -1.0);
    assert_eq!(ResizeMode::BottomRight.x_sign(), 1.0);
    assert_eq!(ResizeMode::BottomRight.y_sign(), 1.0);
    assert_eq!(ResizeMode::Top.x_sign(), 0.0);
    assert_eq!(ResizeMode::Right.y_sign(), 0.0);
    assert_eq!(ResizeMode::Move.x_sign(), 0.0);
}

// =============================================================
// Names
// =============================================================

#[test]
fn mode_parses_its_own_name() {
    for mode in RESIZE_MODES.into_iter().chain([ResizeMode::Move, ResizeMode::Rotate]) {
        assert_eq!(mode.as_str().parse::<ResizeMode>().unwrap(), mode);
    }
}

#[test]
fn mode_rejects_unknown_name() {
    let err = "DIAGONAL".parse::<ResizeMode>().unwrap_err();
    assert!(matches!(err, EngineError::UnknownMode(ref s) if s == "DIAGONAL"));
}

#[test]
fn mode_serde_matches_display() {
    let json = serde_json::to_string(&ResizeMode::BottomLeft).unwrap();
    assert_eq!(json, "\"BOTTOM_LEFT\"");
    assert_eq!(ResizeMode::BottomLeft.to_string(), "BOTTOM_LEFT");
}

// =============================================================
// RotateHandle
// =============================================================

#[test]
fn rotate_handle_default_is_top() {
    assert_eq!(RotateHandle::default(), RotateHandle::Top);
}

#[test]
fn rotate_handle_home_angles_are_distinct() {
    let handles = [
        RotateHandle::Right,
        RotateHandle::TopRight,
        RotateHandle::Top,
        RotateHandle::TopLeft,
        RotateHandle::Left,
        RotateHandle::BottomLeft,
        RotateHandle::Bottom,
        RotateHandle::BottomRight,
    ];
    for (i, a) in handles.iter().enumerate() {
        for (j, b) in handles.iter().enumerate() {
            if i != j {
                assert_ne!(a.home_angle(), b.home_angle(), "{a:?} vs {b:?}");
            }
        }
    }
}

// =============================================================
// visible_handles
// =============================================================

#[test]
fn no_handles_without_selection() {
    assert!(visible_handles(false, None).is_empty());
    assert!(visible_handles(false, Some(Handle::Resize(ResizeMode::Top))).is_empty());
}

#[test]
fn idle_selection_shows_all_handles() {
    let handles = visible_handles(true, None);
    assert_eq!(handles.len(), 9);
    assert!(handles.contains(&Handle::Rotate(RotateHandle::Top)));
    for mode in RESIZE_MODES {
        assert!(handles.contains(&Handle::Resize(mode)));
    }
}

#[test]
fn active_resize_shows_only_its_handle() {
    let active = Handle::Resize(ResizeMode::BottomRight);
    assert_eq!(visible_handles(true, Some(active)), vec![active]);
}

#[test]
fn handle_serializes_tagged() {
    let json = serde_json::to_value(Handle::Resize(ResizeMode::TopLeft)).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "resize", "at": "TOP_LEFT" }));
}
