use crate::core::Cancel;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A pending `setTimeout` callback; owns the closure so it lives until it runs.
pub struct Timeout {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn schedule(delay_ms: i32, f: impl FnOnce() + 'static) -> Option<Self> {
        let window = web::window()?;
        let callback: Closure<dyn FnMut()> = Closure::once(f);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms,
        ) {
            Ok(id) => Some(Self {
                id,
                _callback: callback,
            }),
            Err(e) => {
                log::error!("setTimeout error: {:?}", e);
                None
            }
        }
    }
}

impl Cancel for Timeout {
    fn cancel(self) {
        if let Some(window) = web::window() {
            window.clear_timeout_with_handle(self.id);
        }
    }
}
