// Tuning constants for the platform-free knob, tuner and idle-motion logic.

// Knob input
pub const WHEEL_SENSITIVITY: f32 = 0.0025; // radians per wheel delta unit
pub const DRAG_SENSITIVITY: f32 = 0.01; // radians per CSS pixel of vertical drag
pub const WHEEL_LINE_PX: f32 = 16.0; // line-mode wheel deltas are scaled to pixels by this
pub const KNOB_MIN_ANGLE: f32 = 0.0;
pub const KNOB_MAX_ANGLE: f32 = std::f32::consts::TAU;

// Quiet windows (milliseconds)
pub const SCAN_SETTLE_MS: i32 = 800; // no knob input for this long resolves a station
pub const BANNER_HIDE_MS: i32 = 5000;

// Per-frame exponential smoothing factors
pub const KNOB_SMOOTHING: f32 = 0.08;
pub const MODEL_YAW_SMOOTHING: f32 = 0.08;
pub const MODEL_PITCH_SMOOTHING: f32 = 0.06;
pub const LIGHT_SMOOTHING: f32 = 0.12;

// Idle motion
pub const MAX_YAW: f32 = 0.15; // radians at the horizontal viewport edge
pub const MAX_PITCH: f32 = 0.08; // radians at the vertical viewport edge
pub const BOB_AMPLITUDE: f32 = 0.05;
pub const BOB_RATE_PER_MS: f64 = 0.0005;
pub const LIGHT_SWAY_X: f32 = 0.8;
pub const LIGHT_SWAY_Y: f32 = 0.5;
pub const LIGHT_Z: f32 = 2.0;
