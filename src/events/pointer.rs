use crate::app::SharedApp;
use crate::core::normalize_pointer;
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub app: SharedApp,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointer_release(&w);
    wire_gesture_retry(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (width, height) = dom::inner_size();
        let x = ev.client_x() as f32;
        let y = ev.client_y() as f32;
        let mut app = w.app.borrow_mut();
        app.pointer = normalize_pointer(x, y, width, height);
        if app.knob.is_dragging() {
            app.on_drag_move(y);
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w.app.borrow_mut().on_drag_start(ev.client_y() as f32);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        log::debug!("[knob] begin drag at y={}", ev.client_y());
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

// A cancelled touch ends the drag the same way a release does.
fn wire_pointer_release(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let was_dragging = w.app.borrow_mut().on_drag_end();
        if was_dragging {
            _ = w.canvas.release_pointer_capture(ev.pointer_id());
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        for event in ["pointerup", "pointercancel"] {
            _ = wnd.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }

    closure.forget();
}

// Browsers block autoplay until a gesture; any pointer-down retries the static loop.
fn wire_gesture_retry(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        w.app.borrow_mut().on_gesture();
    }) as Box<dyn FnMut(_)>);

    if let Some(doc) = dom::window_document() {
        _ = doc.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}
