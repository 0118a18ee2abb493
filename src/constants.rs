/// Viewport, lighting and playback constants for the web front-end.
///
/// Platform-free tuning (knob sensitivity, smoothing, quiet windows) lives in
/// `core/constants.rs`; this module holds what the DOM, GPU and media layers need.
// DOM
pub const MODEL_CONTAINER_ID: &str = "model-container";
pub const SONG_INFO_ID: &str = "song-info";
pub const CANVAS_ID: &str = "radio-canvas";

// Assets
pub const MODEL_URL: &str = "Models/Radio.glb";

// Playback levels
pub const STATIC_VOLUME: f64 = 0.6;
pub const STATION_VOLUME: f64 = 0.95;

// Camera
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Light rig (white lights, intensities in the 0..1 range)
pub const AMBIENT_INTENSITY: f32 = 0.6;
pub const DIRECTIONAL_INTENSITY: f32 = 0.8;
pub const DIRECTIONAL_POSITION: [f32; 3] = [5.0, 5.0, 5.0];
pub const POINT_INTENSITY: f32 = 0.6;
pub const POINT_RANGE: f32 = 20.0;
pub const POINT_DECAY: f32 = 1.0;
