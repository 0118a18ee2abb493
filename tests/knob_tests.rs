// Host-side tests for knob input handling.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod knob {
        include!("../src/core/knob.rs");
    }
}

use self::core::knob::*;
use std::f32::consts::TAU;

fn knob() -> KnobState {
    KnobState::new(KnobParams::default())
}

#[test]
fn starts_at_zero_and_idle() {
    let k = knob();
    assert_eq!(k.angle(), 0.0);
    assert!(!k.is_dragging());
}

#[test]
fn wheel_scales_by_sensitivity() {
    let mut k = knob();
    let a = k.wheel(400.0);
    assert!((a - 400.0 * 0.0025).abs() < 1e-6);
    let b = k.wheel(-100.0);
    assert!((b - 300.0 * 0.0025).abs() < 1e-6);
}

#[test]
fn wheel_clamps_at_both_travel_limits() {
    let mut k = knob();
    assert_eq!(k.wheel(-500.0), 0.0);
    assert_eq!(k.wheel(1e9), TAU);
    // reversing from the limit moves immediately, no wound-up excess
    let back = k.wheel(-40.0);
    assert!((back - (TAU - 0.1)).abs() < 1e-5);
}

#[test]
fn drag_up_fifty_pixels_from_one_radian() {
    let mut k = knob();
    k.wheel(1.0 / 0.0025);
    assert!((k.angle() - 1.0).abs() < 1e-5);
    k.begin_drag(300.0);
    let a = k.drag_to(250.0).expect("drag active");
    assert!((a - 1.5).abs() < 1e-5);
}

#[test]
fn drag_is_relative_to_gesture_start() {
    let mut k = knob();
    k.begin_drag(100.0);
    k.drag_to(50.0);
    k.drag_to(80.0);
    // only the final cursor position relative to the anchor matters
    assert!((k.angle() - 0.2).abs() < 1e-5);
    assert!(k.end_drag());
    k.begin_drag(0.0);
    k.drag_to(-10.0);
    assert!((k.angle() - 0.3).abs() < 1e-5);
}

#[test]
fn drag_down_clamps_at_zero() {
    let mut k = knob();
    k.begin_drag(0.0);
    assert_eq!(k.drag_to(1000.0), Some(0.0));
}

#[test]
fn malformed_gestures_are_no_ops() {
    let mut k = knob();
    k.wheel(200.0);
    let before = k.angle();
    assert_eq!(k.drag_to(10.0), None);
    assert!(!k.end_drag());
    assert_eq!(k.angle(), before);
    k.wheel(f32::NAN);
    assert_eq!(k.angle(), before);
}

#[test]
fn arbitrary_input_sequences_never_leave_range() {
    let mut k = knob();
    // deterministic pseudo-random walk over wheel and drag inputs
    let mut seed: u32 = 0x2545_F491;
    let mut next = || {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        (seed as f32 / u32::MAX as f32) * 2.0 - 1.0
    };
    for i in 0..5000 {
        match i % 4 {
            0 => {
                k.wheel(next() * 3000.0);
            }
            1 => k.begin_drag(next() * 800.0),
            2 => {
                k.drag_to(next() * 2000.0);
            }
            _ => {
                k.end_drag();
            }
        }
        assert!((0.0..=TAU).contains(&k.angle()), "step {i}: {}", k.angle());
    }
}

#[test]
fn custom_params_are_honoured() {
    let mut k = KnobState::new(KnobParams {
        wheel_sensitivity: 0.01,
        drag_sensitivity: 0.02,
    });
    assert!((k.wheel(10.0) - 0.1).abs() < 1e-6);
    k.begin_drag(0.0);
    assert!((k.drag_to(-10.0).unwrap_or_default() - 0.3).abs() < 1e-6);
}

#[test]
fn line_and_page_wheel_deltas_scale_to_pixels() {
    assert_eq!(wheel_delta_pixels(120.0, DELTA_PIXEL, 800.0), 120.0);
    assert_eq!(wheel_delta_pixels(3.0, DELTA_LINE, 800.0), 48.0);
    assert_eq!(wheel_delta_pixels(-1.0, DELTA_PAGE, 800.0), -800.0);
    // unknown modes pass through
    assert_eq!(wheel_delta_pixels(5.0, 7, 800.0), 5.0);

    // three lines turn the knob about as far as a typical pixel-mode notch
    let mut lines = knob();
    let mut pixels = knob();
    lines.wheel(wheel_delta_pixels(3.0, DELTA_LINE, 800.0));
    pixels.wheel(wheel_delta_pixels(48.0, DELTA_PIXEL, 800.0));
    assert!((lines.angle() - pixels.angle()).abs() < 1e-6);
}

#[test]
fn cancelled_drag_ignores_later_moves() {
    let mut k = knob();
    k.begin_drag(100.0);
    assert!(k.is_dragging());
    k.drag_to(50.0);
    let held = k.angle();
    // pointercancel and pointerup both end the gesture
    assert!(k.end_drag());
    assert!(!k.is_dragging());
    assert_eq!(k.drag_to(0.0), None);
    assert_eq!(k.angle(), held);
    assert!(!k.end_drag());
}
