pub mod channels;
pub mod constants;
pub mod knob;
pub mod motion;
pub mod schedule;
pub mod tuner;

pub use channels::*;
pub use constants::*;
pub use knob::*;
pub use motion::*;
pub use schedule::*;
pub use tuner::*;

// Shaders bundled as string constants
pub static RADIO_WGSL: &str = include_str!("../../shaders/radio.wgsl");
