use crate::app::SharedApp;
use crate::camera::Camera;
use crate::core::{bob_offset, IdleMotion};
use crate::model::RadioModel;
use crate::render;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub app: SharedApp,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub camera: Camera,
    pub motion: IdleMotion,
    pub model: Option<RadioModel>,
    // Filled by the async loader, picked up by the next frame
    pub queued_model: Rc<RefCell<Option<RadioModel>>>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        if let Some(model) = self.queued_model.borrow_mut().take() {
            if let Some(g) = &mut self.gpu {
                g.set_model(&model);
            }
            self.model = Some(model);
        }

        let (pointer, knob_target) = {
            let app = self.app.borrow();
            (app.pointer, app.knob.angle())
        };
        self.motion.step(pointer, knob_target);

        let Some(g) = &mut self.gpu else {
            return;
        };
        let w = self.canvas.width();
        let h = self.canvas.height();
        g.resize_if_needed(w, h);
        self.camera.fit(w, h);

        let node_matrices = match &self.model {
            Some(m) => {
                let root = m.root_transform(
                    bob_offset(js_sys::Date::now()),
                    self.motion.pitch,
                    self.motion.yaw,
                );
                m.world_matrices(root, self.motion.knob_angle)
            }
            None => Vec::new(),
        };
        let scene = render::FrameScene {
            view_proj: self.camera.view_proj(),
            camera_pos: self.camera.eye,
            point_light: self.motion.light,
            node_matrices: &node_matrices,
        };
        if let Err(e) = g.render(&scene) {
            log::error!("render error: {:?}", e);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
