use crate::core::Debounce;
use crate::timer::Timeout;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Transient song-info text; the latest `show` wins and re-arms the hide.
pub struct Banner {
    el: Option<web::HtmlElement>,
    hide: Debounce<Timeout>,
}

impl Banner {
    pub fn find(document: &web::Document, id: &str) -> Self {
        let el = document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<web::HtmlElement>().ok());
        if el.is_none() {
            log::warn!("[banner] #{} not found; song info will not be shown", id);
        }
        Self {
            el,
            hide: Debounce::new(),
        }
    }

    pub fn show<F>(&mut self, text: &str, schedule_hide: F)
    where
        F: FnOnce(u64) -> Option<Timeout>,
    {
        if let Some(el) = &self.el {
            el.set_text_content(Some(text));
            _ = el.style().set_property("opacity", "1");
        }
        if self.hide.is_pending() {
            log::debug!("[banner] replacing text; hide timer restarts");
        }
        self.hide.arm(schedule_hide);
    }

    pub fn on_hide_timer(&mut self, generation: u64) {
        if !self.hide.fire(generation) {
            return;
        }
        if let Some(el) = &self.el {
            _ = el.style().set_property("opacity", "0");
        }
    }
}
