use crate::constants::*;
use crate::model::RadioModel;
use glam::{Mat4, Vec3};
use web_sys as web;

mod helpers;
mod mesh;
use mesh::GpuPart;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    dir_light: [f32; 4],
    point_light: [f32; 4],
    light_params: [f32; 4],
}

/// Everything the draw call needs for one frame.
pub struct FrameScene<'m> {
    pub view_proj: Mat4,
    pub camera_pos: Vec3,
    pub point_light: Vec3,
    pub node_matrices: &'m [Mat4],
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    part_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white: wgpu::TextureView,
    _depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    parts: Vec<GpuPart>,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Transparent canvas so the page background shows around the radio
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("radio_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::RADIO_WGSL.into()),
        });
        let scene_layout = helpers::uniform_layout(&device, "scene_bgl");
        let part_layout = helpers::textured_part_layout(&device);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pipeline_layout"),
            bind_group_layouts: &[&scene_layout, &part_layout],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_mesh_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            mesh::vertex_layout(),
            format,
        );
        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group =
            helpers::uniform_bind_group(&device, "scene_bg", &scene_layout, &scene_buffer);
        let (depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("base_color_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        // Untextured parts sample this, leaving the base colour factor as is
        let white = helpers::create_rgba_texture(&device, &queue, "white_tex", 1, 1, &[255; 4]);

        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            scene_buffer,
            scene_bind_group,
            part_layout,
            sampler,
            white,
            _depth_tex: depth_tex,
            depth_view,
            parts: Vec::new(),
            width,
            height,
        })
    }

    /// Upload the model's mesh parts, replacing anything previously uploaded.
    pub fn set_model(&mut self, model: &RadioModel) {
        let textures: Vec<Option<wgpu::TextureView>> = model
            .images
            .iter()
            .map(|img| {
                img.as_ref().map(|img| {
                    helpers::create_rgba_texture(
                        &self.device,
                        &self.queue,
                        "base_color_tex",
                        img.width,
                        img.height,
                        &img.rgba,
                    )
                })
            })
            .collect();
        self.parts = model
            .parts
            .iter()
            .map(|p| {
                let view = p
                    .base_color_texture
                    .and_then(|i| textures.get(i))
                    .and_then(Option::as_ref)
                    .unwrap_or(&self.white);
                GpuPart::upload(&self.device, &self.part_layout, p, view, &self.sampler)
            })
            .collect();
        log::info!(
            "[gpu] uploaded {} mesh parts, {} textures",
            self.parts.len(),
            textures.iter().flatten().count()
        );
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (tex, view) = helpers::create_depth_texture(&self.device, width, height);
            self._depth_tex = tex;
            self.depth_view = view;
        }
    }

    pub fn render(&mut self, scene: &FrameScene<'_>) -> Result<(), wgpu::SurfaceError> {
        let light_dir = Vec3::from(DIRECTIONAL_POSITION).normalize();
        let u = SceneUniforms {
            view_proj: scene.view_proj.to_cols_array_2d(),
            camera_pos: scene.camera_pos.extend(1.0).to_array(),
            dir_light: light_dir.extend(DIRECTIONAL_INTENSITY).to_array(),
            point_light: scene.point_light.extend(POINT_INTENSITY).to_array(),
            light_params: [POINT_RANGE, POINT_DECAY, AMBIENT_INTENSITY, 0.0],
        };
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&u));
        for part in &self.parts {
            let m = scene
                .node_matrices
                .get(part.node)
                .copied()
                .unwrap_or(Mat4::IDENTITY);
            part.write_transform(&self.queue, m);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            for part in &self.parts {
                rpass.set_bind_group(1, &part.bind_group, &[]);
                rpass.set_vertex_buffer(0, part.vertex_buffer.slice(..));
                rpass.set_index_buffer(part.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..part.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
