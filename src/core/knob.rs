use super::constants::{
    DRAG_SENSITIVITY, KNOB_MAX_ANGLE, KNOB_MIN_ANGLE, WHEEL_LINE_PX, WHEEL_SENSITIVITY,
};

#[derive(Clone, Copy, Debug)]
pub struct KnobParams {
    pub wheel_sensitivity: f32,
    pub drag_sensitivity: f32,
}

impl Default for KnobParams {
    fn default() -> Self {
        Self {
            wheel_sensitivity: WHEEL_SENSITIVITY,
            drag_sensitivity: DRAG_SENSITIVITY,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct DragAnchor {
    angle: f32,
    cursor_y: f32,
}

/// Target angle of the tuning knob plus any drag gesture in progress.
///
/// The angle never wraps: it is clamped to `[0, 2π]` after every input, so
/// hitting a travel limit stops rotation until the input reverses.
#[derive(Clone, Debug, Default)]
pub struct KnobState {
    pub params: KnobParams,
    angle: f32,
    drag: Option<DragAnchor>,
}

impl KnobState {
    pub fn new(params: KnobParams) -> Self {
        Self {
            params,
            angle: KNOB_MIN_ANGLE,
            drag: None,
        }
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Apply one wheel event and return the new target angle.
    pub fn wheel(&mut self, delta_y: f32) -> f32 {
        if delta_y.is_finite() {
            self.angle = clamp_angle(self.angle + delta_y * self.params.wheel_sensitivity);
        }
        self.angle
    }

    pub fn begin_drag(&mut self, cursor_y: f32) {
        self.drag = Some(DragAnchor {
            angle: self.angle,
            cursor_y,
        });
    }

    /// Moving the cursor up turns the knob forward. `None` when no drag is active.
    pub fn drag_to(&mut self, cursor_y: f32) -> Option<f32> {
        let anchor = self.drag?;
        if cursor_y.is_finite() {
            let dy = anchor.cursor_y - cursor_y;
            self.angle = clamp_angle(anchor.angle + dy * self.params.drag_sensitivity);
        }
        Some(self.angle)
    }

    /// Returns whether a drag was actually in progress.
    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }
}

#[inline]
pub fn clamp_angle(angle: f32) -> f32 {
    angle.clamp(KNOB_MIN_ANGLE, KNOB_MAX_ANGLE)
}

/// `WheelEvent.deltaMode` values.
pub const DELTA_PIXEL: u32 = 0;
pub const DELTA_LINE: u32 = 1;
pub const DELTA_PAGE: u32 = 2;

/// Normalize a wheel delta to CSS pixels so line- and page-mode devices turn
/// the knob at the same rate as pixel-mode ones.
pub fn wheel_delta_pixels(delta_y: f64, delta_mode: u32, page_height: f32) -> f32 {
    let delta = delta_y as f32;
    match delta_mode {
        DELTA_LINE => delta * WHEEL_LINE_PX,
        DELTA_PAGE => delta * page_height,
        _ => delta,
    }
}
