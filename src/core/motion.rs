use super::constants::*;
use glam::{Vec2, Vec3};

#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Map client pixel coordinates to `[-1, 1]` with +y pointing up.
#[inline]
pub fn normalize_pointer(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (client_x / width) * 2.0 - 1.0,
        -(client_y / height) * 2.0 + 1.0,
    )
}

/// Vertical bob offset for the model at a wall-clock time.
#[inline]
pub fn bob_offset(now_ms: f64) -> f32 {
    ((now_ms * BOB_RATE_PER_MS).sin() as f32) * BOB_AMPLITUDE
}

/// Smoothed per-frame pose: model tilt/yaw, point light and displayed knob.
///
/// Each field chases a target with a fixed per-frame factor, so the visual
/// always lags the input.
#[derive(Clone, Copy, Debug)]
pub struct IdleMotion {
    pub pitch: f32,
    pub yaw: f32,
    pub light: Vec3,
    pub knob_angle: f32,
}

impl Default for IdleMotion {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            light: Vec3::new(0.0, 0.0, LIGHT_Z),
            knob_angle: 0.0,
        }
    }
}

impl IdleMotion {
    pub fn step(&mut self, pointer: Vec2, knob_target: f32) {
        self.yaw = lerp(self.yaw, pointer.x * MAX_YAW, MODEL_YAW_SMOOTHING);
        self.pitch = lerp(self.pitch, -pointer.y * MAX_PITCH, MODEL_PITCH_SMOOTHING);
        let light_target = Vec3::new(
            pointer.x * LIGHT_SWAY_X,
            -pointer.y * LIGHT_SWAY_Y,
            LIGHT_Z,
        );
        self.light = self.light.lerp(light_target, LIGHT_SMOOTHING);
        self.knob_angle = lerp(self.knob_angle, knob_target, KNOB_SMOOTHING);
    }
}
