use crate::app::SharedApp;
use crate::core::wheel_delta_pixels;
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

/// True when the event target is the viewport container or inside it.
fn over_viewport(ev: &web::WheelEvent, container_selector: &str) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest(container_selector).ok().flatten())
        .is_some()
}

/// Scrolling over the viewport turns the knob instead of scrolling the page.
pub fn wire_wheel(app: SharedApp, container_id: &str) {
    let selector = format!("#{}", container_id);

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        if !over_viewport(&ev, &selector) {
            return;
        }
        ev.prevent_default();
        let (_, page_height) = dom::inner_size();
        let delta = wheel_delta_pixels(ev.delta_y(), ev.delta_mode(), page_height);
        app.borrow_mut().on_wheel(delta);
    }) as Box<dyn FnMut(_)>);

    // Must be non-passive or prevent_default is ignored
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            closure.as_ref().unchecked_ref(),
            &opts,
        );
    }

    closure.forget();
}
