#![cfg(target_arch = "wasm32")]
use crate::app::App;
use crate::camera::Camera;
use crate::constants::*;
use crate::core::{IdleMotion, KnobParams, KnobState};
use crate::model::RadioModel;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

mod app;
mod audio;
mod camera;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod model;
mod overlay;
mod render;
mod timer;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {}: {:?}", url, e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, resp.status());
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!("array_buffer: {:?}", e))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("read {}: {:?}", url, e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

async fn load_model(url: &str) -> anyhow::Result<RadioModel> {
    let bytes = fetch_bytes(url).await?;
    let model = RadioModel::from_slice(&bytes)?;
    log::info!(
        "[model] {} nodes={} parts={} center=({:.2},{:.2},{:.2})",
        url,
        model.nodes.len(),
        model.parts.len(),
        model.center.x,
        model.center.y,
        model.center.z
    );
    match model.knob {
        Some(k) => log::info!("[model] knob node {}", k.node),
        None => log::warn!("[model] knob node not found; knob mesh will not rotate"),
    }
    Ok(model)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("radio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let container = document
        .get_element_by_id(MODEL_CONTAINER_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", MODEL_CONTAINER_ID))?;
    let canvas = dom::mount_canvas(&document, &container, CANVAS_ID)?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let player = audio::Player::new()?;
    let banner = overlay::Banner::find(&document, SONG_INFO_ID);
    let app = App::new_shared(KnobState::new(KnobParams::default()), player, banner);
    app.borrow_mut().boot();

    events::wire_wheel(app.clone(), MODEL_CONTAINER_ID);
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        app: app.clone(),
    });

    let gpu = frame::init_gpu(&canvas).await;
    let queued_model: Rc<RefCell<Option<RadioModel>>> = Rc::new(RefCell::new(None));
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        canvas,
        gpu,
        camera: Camera::looking_at_origin(CAMERA_Z, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_FAR),
        motion: IdleMotion::default(),
        model: None,
        queued_model: queued_model.clone(),
    }));
    frame::start_loop(frame_ctx);

    spawn_local(async move {
        match load_model(MODEL_URL).await {
            Ok(model) => *queued_model.borrow_mut() = Some(model),
            Err(e) => log::error!("[model] load error: {:?}", e),
        }
    });

    Ok(())
}
