/// wgpu implementation of the viewer's `Renderer` trait.
///
/// Draws the scene through the frame's camera with depth testing, overlays
/// the helper outline as a line list and paints the debug panel with egui.

use std::sync::Arc;
use egui::{Context as EguiCtx, ViewportId};
use egui_wgpu::{Renderer as EguiRenderer, ScreenDescriptor};
use egui_winit::State as EguiWinit;
use frustum_viewer::fviewer::{
    FieldEdit, RenderFrame, Renderer, RendererStats, Result, ViewerConfig,
};
use frustum_viewer::glam::Mat4;
use frustum_viewer::{engine_bail, engine_debug, engine_err, engine_info, engine_warn};
use crate::debug_overlay;
use crate::wgpu;
use crate::wgpu::util::DeviceExt;
use crate::wgpu_mesh::{CameraUbo, GpuMeshCache, LineVertex};
use crate::wgpu_pipeline::ScenePipelines;
use crate::wgpu_texture::create_depth_view;
use crate::winit::event::WindowEvent;
use crate::winit::window::Window;

const SOURCE: &str = "fviewer::WgpuRenderer";

/// Helper outline is 12 segments; room for a few more before regrowing.
const INITIAL_LINE_CAPACITY: usize = 32;

pub struct WgpuRenderer {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    pipelines: ScenePipelines,

    camera_buf: wgpu::Buffer,
    camera_bg: wgpu::BindGroup,
    line_buf: wgpu::Buffer,
    line_capacity: usize,
    line_color_buf: wgpu::Buffer,
    line_color_bg: wgpu::BindGroup,
    meshes: GpuMeshCache,

    egui_ctx: EguiCtx,
    egui_state: EguiWinit,
    egui_painter: EguiRenderer,

    viewer_config: ViewerConfig,
    stats: RendererStats,
}

impl WgpuRenderer {
    /// Create a renderer drawing into `window`.
    ///
    /// # Errors
    ///
    /// `InitializationFailed` when no surface, adapter or device can be
    /// obtained.
    pub fn new(window: Arc<Window>, viewer_config: &ViewerConfig) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window)).map_err(|e| {
            engine_err!(InitializationFailed, SOURCE, "Failed to create surface: {}", e)
        })?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| engine_err!(InitializationFailed, SOURCE, "No compatible GPU adapter found"))?;
        engine_info!(SOURCE, "Using adapter: {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        ))
        .map_err(|e| engine_err!(InitializationFailed, SOURCE, "Failed to create device: {}", e))?;

        let caps = surface.get_capabilities(&adapter);
        let Some(&first_format) = caps.formats.first() else {
            engine_bail!(InitializationFailed, SOURCE, "Surface reports no formats");
        };
        let surface_format = caps.formats.iter().copied().find(|f| f.is_srgb()).unwrap_or(first_format);
        let alpha_mode = caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, config.width, config.height);
        let pipelines = ScenePipelines::new(&device, surface_format);

        let camera_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera_buf"),
            contents: bytemuck::bytes_of(&CameraUbo { vp: Mat4::IDENTITY.to_cols_array_2d() }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &pipelines.camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buf.as_entire_binding(),
            }],
        });

        let line_buf = create_line_buffer(&device, INITIAL_LINE_CAPACITY);
        let line_color_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("line_color_buf"),
            contents: bytemuck::cast_slice(&viewer_config.helper_color),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let line_color_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("line_color_bg"),
            layout: &pipelines.color_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: line_color_buf.as_entire_binding(),
            }],
        });

        let egui_ctx = EguiCtx::default();
        let egui_state = EguiWinit::new(
            egui_ctx.clone(),
            ViewportId::ROOT,
            &*window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_painter = EguiRenderer::new(&device, surface_format, None, 1, false);

        let mut renderer = Self {
            window,
            surface,
            device,
            queue,
            config,
            depth_view,
            pipelines,
            camera_buf,
            camera_bg,
            line_buf,
            line_capacity: INITIAL_LINE_CAPACITY,
            line_color_buf,
            line_color_bg,
            meshes: GpuMeshCache::default(),
            egui_ctx,
            egui_state,
            egui_painter,
            viewer_config: viewer_config.clone(),
            stats: RendererStats::default(),
        };
        let scale = renderer.window.scale_factor() as f32;
        renderer.apply_pixel_ratio(scale);
        Ok(renderer)
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Feed a window event to the panel. Returns true when the panel used it.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui_state.on_window_event(&self.window, event).consumed
    }

    /// Whether the pointer currently hovers the panel.
    pub fn pointer_over_ui(&self) -> bool {
        self.egui_ctx.is_pointer_over_area()
    }

    fn apply_pixel_ratio(&mut self, scale_factor: f32) {
        if scale_factor <= 0.0 {
            return;
        }
        let ratio = self.viewer_config.pixel_ratio(scale_factor);
        self.egui_ctx.set_zoom_factor(ratio / scale_factor);
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, self.config.width, self.config.height);
    }

    fn write_lines(&mut self, frame: &RenderFrame<'_>) -> u32 {
        let vertices: Vec<LineVertex> = frame
            .helper_lines
            .iter()
            .map(|p| LineVertex { pos: p.to_array() })
            .collect();
        if vertices.len() > self.line_capacity {
            self.line_capacity = vertices.len().next_power_of_two();
            self.line_buf = create_line_buffer(&self.device, self.line_capacity);
        }
        if !vertices.is_empty() {
            self.queue.write_buffer(&self.line_buf, 0, bytemuck::cast_slice(&vertices));
        }
        self.queue.write_buffer(&self.line_color_buf, 0, bytemuck::cast_slice(&frame.helper_color));
        vertices.len() as u32
    }
}

impl Renderer for WgpuRenderer {
    fn resize(&mut self, width: u32, height: u32, scale_factor: f32) {
        if width == 0 || height == 0 {
            engine_debug!(SOURCE, "Ignoring resize to {}x{}", width, height);
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
        self.apply_pixel_ratio(scale_factor);
    }

    fn render(&mut self, frame: &RenderFrame<'_>) -> Result<Vec<FieldEdit>> {
        // Panel first, so edits made this frame are returned even if the
        // surface is not ready.
        let input = self.egui_state.take_egui_input(&self.window);
        let mut edits = Vec::new();
        let full_output = self.egui_ctx.run(input, |ctx| {
            edits = debug_overlay::show(ctx, frame.debug_fields, frame.panel_open, frame.target_visible);
        });
        self.egui_state.handle_platform_output(&self.window, full_output.platform_output);

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                engine_debug!(SOURCE, "Surface lost or outdated, reconfiguring");
                self.reconfigure();
                return Ok(edits);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                engine_warn!(SOURCE, "Timed out acquiring surface texture, skipping frame");
                return Ok(edits);
            }
            Err(e) => engine_bail!(BackendError, SOURCE, "Failed to acquire surface texture: {}", e),
        };
        let view = surface_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.meshes.sync(&self.device, &self.queue, &self.pipelines.object_layout, frame.scene);
        let vp = frame.camera.view_projection_matrix();
        self.queue.write_buffer(&self.camera_buf, 0, bytemuck::bytes_of(&CameraUbo { vp: vp.to_cols_array_2d() }));
        let line_vertices = self.write_lines(frame);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("encoder") });

        let [r, g, b, a] = frame.clear_color;
        let mut draw_calls = 0u32;
        let mut triangles = 0u32;
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
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

            rp.set_pipeline(&self.pipelines.mesh);
            rp.set_bind_group(0, &self.camera_bg, &[]);
            for mesh in self.meshes.iter() {
                mesh.draw(&mut rp);
                draw_calls += 1;
                triangles += mesh.triangle_count();
            }

            if line_vertices > 0 {
                rp.set_pipeline(&self.pipelines.line);
                rp.set_bind_group(0, &self.camera_bg, &[]);
                rp.set_bind_group(1, &self.line_color_bg, &[]);
                rp.set_vertex_buffer(0, self.line_buf.slice(..));
                rp.draw(0..line_vertices, 0..1);
                draw_calls += 1;
            }
        }

        let screen = ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.egui_ctx.pixels_per_point(),
        };
        let clipped = self.egui_ctx.tessellate(full_output.shapes, screen.pixels_per_point);
        for (id, delta) in &full_output.textures_delta.set {
            self.egui_painter.update_texture(&self.device, &self.queue, *id, delta);
        }
        self.egui_painter.update_buffers(&self.device, &self.queue, &mut encoder, &clipped, &screen);
        {
            let mut rp = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            self.egui_painter.render(&mut rp, &clipped, &screen);
        }
        for id in &full_output.textures_delta.free {
            self.egui_painter.free_texture(id);
        }

        self.queue.submit(Some(encoder.finish()));
        surface_texture.present();

        self.stats = RendererStats {
            frames: self.stats.frames + 1,
            draw_calls,
            triangles,
            lines: line_vertices / 2,
        };
        Ok(edits)
    }

    fn stats(&self) -> RendererStats {
        self.stats
    }
}

fn create_line_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("helper_lines"),
        size: (capacity * core::mem::size_of::<LineVertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
