mod app;
mod config;
mod translate;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use orbitview_input::InputEvent;
use orbitview_render_wgpu::WgpuRenderer;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use app::AppState;
use config::AppConfig;
use translate::EventTranslator;

#[derive(Parser)]
#[command(name = "orbitview-desktop", about = "Orbit camera viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Window width override
    #[arg(long)]
    width: Option<u32>,

    /// Window height override
    #[arg(long)]
    height: Option<u32>,
}

/// Window and GPU objects, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    config: AppConfig,
    state: Option<AppState>,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    translator: EventTranslator,
    last_frame: Instant,
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

impl GpuApp {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            gpu: None,
            egui_ctx: EguiContext::default(),
            translator: EventTranslator::new(),
            last_frame: Instant::now(),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.config.window;
        let attrs = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height))
            .with_resizable(window_config.resizable);
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("orbitview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let state = AppState::new(&self.config, size.width, size.height)?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: present_mode(state.ctx.settings().vsync),
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, &queue, surface_format, config.width, config.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        self.state = Some(state);
        self.gpu = Some(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        });
        Ok(())
    }

    fn resize_surface(&mut self, width: u32, height: u32) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        if width == 0 || height == 0 {
            return;
        }
        gpu.config.width = width;
        gpu.config.height = height;
        gpu.surface.configure(&gpu.device, &gpu.config);
        gpu.renderer.resize(&gpu.device, width, height);
    }

    fn redraw(&mut self) {
        let (Some(gpu), Some(state)) = (&mut self.gpu, &mut self.state) else {
            return;
        };

        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;
        state.update(dt);

        let wanted = present_mode(state.ctx.settings().vsync);
        if gpu.config.present_mode != wanted {
            gpu.config.present_mode = wanted;
            gpu.surface.configure(&gpu.device, &gpu.config);
        }

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        match gpu
            .renderer
            .render(&gpu.device, &gpu.queue, &view, &state.ctx, state.camera)
        {
            Ok(draw_calls) => state.ctx.record_draw_calls(draw_calls),
            Err(e) => tracing::warn!("render failed: {e}"),
        }

        let debug_text = state.ctx.take_debug_text();
        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui::draw_panel(ctx, state);
            ui::draw_debug_text(ctx, &debug_text);
        });

        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("failed to initialize: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // The UI sees every event first.
        let consumed = match &mut self.gpu {
            Some(gpu) => gpu.egui_winit.on_window_event(&gpu.window, &event).consumed,
            None => false,
        };

        if let Some(input) = self.translator.translate(&event) {
            // Releases and window changes always reach the camera so a drag
            // that ends over the panel does not stick.
            let blocked = consumed
                && matches!(
                    input,
                    InputEvent::PointerPressed { .. }
                        | InputEvent::PointerMoved { .. }
                        | InputEvent::Scroll { .. }
                        | InputEvent::KeyPressed(_)
                );
            if !blocked {
                tracing::trace!(kind = input.kind(), "input");
                if let Some(state) = &mut self.state {
                    state.handle_input(&input);
                }
            }
        }

        match event {
            WindowEvent::Resized(size) => self.resize_surface(size.width, size.height),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }

        if self.state.as_ref().is_some_and(|s| s.quit_requested) {
            tracing::info!("exit requested");
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("orbitview-desktop starting");

    let config = AppConfig::load_or_default(cli.config.as_deref())?.with_size(cli.width, cli.height);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
