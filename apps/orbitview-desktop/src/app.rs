use anyhow::{Context, Result, bail};
use orbitview_assets::{AssetStore, TextureData, cube_geometry};
use orbitview_camera::OrbitCameraController;
use orbitview_common::CameraHandle;
use orbitview_input::{InputEvent, Key, PointerButton};
use orbitview_render::{
    CameraSettings, DemoScene, MaterialId, RenderContext, RendererKind, TextureId,
};
use orbitview_render_wgpu::{MESH_SHADER, UBER_SHADER_NAME, WgpuRenderer};
use orbitview_tools::FrameStats;
use std::path::Path;

use crate::config::{AppConfig, AssetsConfig};

/// Character cell of the frame statistics overlay.
const STATS_X: u16 = 45;
const STATS_Y: u16 = 2;
/// Renderable count above which the overlay warns.
const MESH_BUDGET: usize = 1024;

/// Everything the desktop app owns apart from the window and GPU objects.
pub struct AppState {
    pub ctx: RenderContext,
    pub controller: OrbitCameraController,
    pub camera: CameraHandle,
    pub scene: DemoScene,
    pub stats: FrameStats,
    pub assets: AssetStore,
    pub draw_stats: bool,
    pub show_panel: bool,
    pub quit_requested: bool,
    shader_compile_command: Option<String>,
}

impl AppState {
    /// Build the render context, demo scene and orbit camera for a
    /// `width` x `height` surface.
    pub fn new(config: &AppConfig, width: u32, height: u32) -> Result<Self> {
        let mut settings = config.render.clone();
        settings.resolution_width = width.max(1);
        settings.resolution_height = height.max(1);
        let mut ctx = RenderContext::new(settings);

        load_uber_shader(&mut ctx, config.assets.shader.as_deref());
        for system in WgpuRenderer::SYSTEMS {
            ctx.register_render_system(system);
        }
        ctx.register_render_system("debug_text");
        ctx.register_render_system("ui");

        let mut assets = AssetStore::new();
        let geometry = assets.add_geometry(&mut ctx, "cube", cube_geometry());
        let (textured, floor) = create_materials(&mut ctx, &mut assets, &config.assets)?;
        let scene = DemoScene::build(&mut ctx, geometry, textured, floor)
            .context("failed to build demo scene")?;

        let camera = ctx.create_camera(CameraSettings {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
            ..CameraSettings::default()
        });
        let controller = OrbitCameraController::from_rig(&ctx, camera, config.camera);
        tracing::info!(
            renderables = ctx.renderables().len(),
            assets = assets.len(),
            "scene ready"
        );

        Ok(Self {
            ctx,
            controller,
            camera,
            scene,
            stats: FrameStats::new(),
            assets,
            draw_stats: true,
            show_panel: true,
            quit_requested: false,
            shader_compile_command: config.assets.shader_compile_command.clone(),
        })
    }

    /// Deliver one input event to the camera controller and app bindings.
    pub fn handle_input(&mut self, event: &InputEvent) {
        self.controller.on_event(event);
        match *event {
            InputEvent::WindowResized { width, height } => self.resize(width, height),
            InputEvent::WindowFocused(false) => self.release_pointer_buttons(),
            InputEvent::WindowClosed => self.quit_requested = true,
            InputEvent::KeyPressed(Key::Escape) => self.quit_requested = true,
            InputEvent::KeyPressed(Key::F1) => self.show_panel = !self.show_panel,
            InputEvent::KeyPressed(Key::F5) => {
                if let Err(e) = self.recompile_shaders() {
                    tracing::error!("shader recompile failed: {e:#}");
                }
            }
            _ => {}
        }
    }

    /// A window that loses focus mid-drag may never see the button release,
    /// so end any drag or pan here.
    fn release_pointer_buttons(&mut self) {
        for button in [
            PointerButton::Primary,
            PointerButton::Secondary,
            PointerButton::Middle,
        ] {
            self.controller.on_event(&InputEvent::PointerReleased {
                button,
                x: 0.0,
                y: 0.0,
            });
        }
    }

    /// Track a new surface size in the render settings and camera projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let mut settings = self.ctx.settings().clone();
        settings.resolution_width = width;
        settings.resolution_height = height;
        self.ctx.set_settings(settings);
        if let Some(camera) = self.ctx.camera_mut(self.camera) {
            camera.set_viewport(width as f32, height as f32);
        }
    }

    /// Advance one frame: camera smoothing, scene animation, stats overlay.
    pub fn update(&mut self, dt: f32) {
        self.controller.on_update(dt, &mut self.ctx);
        self.scene.advance(dt);
        if let Err(e) = self.scene.apply(&mut self.ctx) {
            tracing::warn!("failed to update scene transforms: {e}");
        }
        self.stats.record(dt);
        if self.draw_stats {
            self.stats
                .submit_overlay(&mut self.ctx, STATS_X, STATS_Y, MESH_BUDGET);
        }
    }

    pub fn set_renderer(&mut self, renderer: RendererKind) {
        let mut settings = self.ctx.settings().clone();
        settings.renderer = renderer;
        self.ctx.set_settings(settings);
    }

    pub fn set_vsync(&mut self, vsync: bool) {
        let mut settings = self.ctx.settings().clone();
        settings.vsync = vsync;
        self.ctx.set_settings(settings);
    }

    /// Run the configured shader compile command, then reload shader files.
    ///
    /// Without a command the files are reloaded directly. Returns the number
    /// of shaders reloaded.
    pub fn recompile_shaders(&mut self) -> Result<usize> {
        if let Some(command) = &self.shader_compile_command {
            tracing::info!(%command, "compiling shaders");
            let status = shell(command)
                .status()
                .with_context(|| format!("failed to run `{command}`"))?;
            if !status.success() {
                bail!("`{command}` exited with {status}");
            }
        }
        let count = self.ctx.reload_shaders()?;
        Ok(count)
    }
}

#[cfg(unix)]
fn shell(command: &str) -> std::process::Command {
    let mut cmd = std::process::Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> std::process::Command {
    let mut cmd = std::process::Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

fn load_uber_shader(ctx: &mut RenderContext, path: Option<&Path>) {
    if let Some(path) = path {
        match ctx.load_shader(UBER_SHADER_NAME, path) {
            Ok(()) => return,
            Err(e) => tracing::warn!("{e}; using built-in shader"),
        }
    }
    ctx.register_shader(UBER_SHADER_NAME, MESH_SHADER);
}

/// Load a configured texture, or upload `fallback` when unset or unreadable.
fn texture_or(
    ctx: &mut RenderContext,
    assets: &mut AssetStore,
    path: Option<&Path>,
    fallback: impl FnOnce() -> TextureData,
) -> Result<TextureId> {
    if let Some(path) = path {
        match assets.load_texture(ctx, path) {
            Ok(id) => return Ok(id),
            Err(e) => tracing::warn!(path = %path.display(), "texture unavailable: {e}"),
        }
    }
    Ok(assets.add_texture(ctx, fallback())?)
}

/// The textured cube material and the plain white floor material.
fn create_materials(
    ctx: &mut RenderContext,
    assets: &mut AssetStore,
    config: &AssetsConfig,
) -> Result<(MaterialId, MaterialId)> {
    let albedo = texture_or(ctx, assets, config.albedo.as_deref(), || {
        TextureData::checkerboard(64, [230, 230, 230, 255], [60, 90, 160, 255])
    })?;
    let normal = texture_or(
        ctx,
        assets,
        config.normal.as_deref(),
        TextureData::default_normal,
    )?;
    let specular = texture_or(ctx, assets, config.specular.as_deref(), TextureData::white)?;
    let white = texture_or(ctx, assets, config.white.as_deref(), TextureData::white)?;

    let textured = ctx.create_material(UBER_SHADER_NAME)?;
    ctx.set_material_texture(textured, "u_albedo", albedo)?;
    ctx.set_material_texture(textured, "u_normal", normal)?;
    ctx.set_material_texture(textured, "u_specular", specular)?;

    let floor = ctx.create_material(UBER_SHADER_NAME)?;
    ctx.set_material_texture(floor, "u_albedo", white)?;
    Ok((textured, floor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitview_render::CameraRig;

    fn state() -> AppState {
        AppState::new(&AppConfig::default(), 480, 720).unwrap()
    }

    #[test]
    fn builds_demo_scene_with_fallback_textures() {
        let state = state();
        assert_eq!(state.ctx.renderables().len(), 3);
        assert_eq!(state.ctx.camera_count(), 1);
        // checkerboard, default normal, white (specular and floor dedup)
        assert_eq!(state.ctx.textures().len(), 3);
        assert!(state.ctx.shader(UBER_SHADER_NAME).is_some());
        assert_eq!(
            state.ctx.render_systems(),
            &["grid", "mesh", "debug_text", "ui"]
        );
        assert_eq!(state.ctx.settings().resolution_width, 480);
    }

    #[test]
    fn missing_texture_paths_fall_back() {
        let mut config = AppConfig::default();
        config.assets.albedo = Some("/nonexistent/albedo.png".into());
        config.assets.shader = Some("/nonexistent/uber.wgsl".into());
        let state = AppState::new(&config, 480, 720).unwrap();
        assert_eq!(state.ctx.renderables().len(), 3);
        assert_eq!(
            state.ctx.shader(UBER_SHADER_NAME).unwrap().source,
            MESH_SHADER
        );
    }

    #[test]
    fn camera_starts_from_created_pose() {
        let state = state();
        let pose = state.ctx.camera_pose(state.camera).unwrap();
        assert!((pose.position - state.controller.position()).length() < 1e-4);
        assert!((state.controller.distance() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn scroll_then_update_moves_camera() {
        let mut state = state();
        state.handle_input(&InputEvent::Scroll { delta: 2.0 });
        state.update(1.0 / 60.0);
        let pose = state.ctx.camera_pose(state.camera).unwrap();
        assert!((pose.position.distance(pose.target) - 6.0).abs() < 1e-3);
    }

    #[test]
    fn drag_orbits_camera() {
        let mut state = state();
        let before = state.ctx.camera_pose(state.camera).unwrap();
        state.handle_input(&InputEvent::PointerPressed {
            button: PointerButton::Primary,
            x: 100.0,
            y: 100.0,
        });
        state.handle_input(&InputEvent::PointerMoved { x: 200.0, y: 100.0 });
        state.update(1.0);
        let after = state.ctx.camera_pose(state.camera).unwrap();
        assert!(before.position.distance(after.position) > 0.1);
    }

    #[test]
    fn focus_loss_ends_drag_and_pan() {
        let mut state = state();
        state.handle_input(&InputEvent::PointerPressed {
            button: PointerButton::Primary,
            x: 100.0,
            y: 100.0,
        });
        state.handle_input(&InputEvent::PointerPressed {
            button: PointerButton::Middle,
            x: 100.0,
            y: 100.0,
        });
        assert!(state.controller.is_pointer_engaged());
        assert!(state.controller.is_panning());

        state.handle_input(&InputEvent::WindowFocused(false));
        assert!(!state.controller.is_pointer_engaged());
        assert!(!state.controller.is_panning());

        let yaw = state.controller.target_yaw();
        state.handle_input(&InputEvent::PointerMoved { x: 300.0, y: 100.0 });
        assert_eq!(state.controller.target_yaw(), yaw);
    }

    #[test]
    fn focus_gain_keeps_drag() {
        let mut state = state();
        state.handle_input(&InputEvent::PointerPressed {
            button: PointerButton::Primary,
            x: 0.0,
            y: 0.0,
        });
        state.handle_input(&InputEvent::WindowFocused(true));
        assert!(state.controller.is_pointer_engaged());
    }

    #[test]
    fn resize_updates_settings_and_camera() {
        let mut state = state();
        state.handle_input(&InputEvent::WindowResized {
            width: 1024,
            height: 512,
        });
        assert_eq!(state.ctx.settings().resolution_width, 1024);
        assert_eq!(state.ctx.settings().resolution_height, 512);
        let camera = state.ctx.camera(state.camera).unwrap();
        assert_eq!(camera.aspect(), 2.0);
    }

    #[test]
    fn zero_size_resize_ignored() {
        let mut state = state();
        state.resize(0, 100);
        assert_eq!(state.ctx.settings().resolution_width, 480);
    }

    #[test]
    fn update_queues_stats_overlay() {
        let mut state = state();
        state.update(0.016);
        assert_eq!(state.ctx.take_debug_text().len(), 4);
        state.draw_stats = false;
        state.update(0.016);
        assert!(state.ctx.debug_text().is_empty());
    }

    #[test]
    fn keys_toggle_panel_and_quit() {
        let mut state = state();
        state.handle_input(&InputEvent::KeyPressed(Key::F1));
        assert!(!state.show_panel);
        state.handle_input(&InputEvent::KeyPressed(Key::Escape));
        assert!(state.quit_requested);
    }

    #[test]
    fn renderer_and_vsync_settings() {
        let mut state = state();
        state.set_renderer(RendererKind::Normals);
        state.set_vsync(true);
        assert_eq!(state.ctx.settings().renderer, RendererKind::Normals);
        assert!(state.ctx.settings().vsync);
    }

    #[cfg(unix)]
    #[test]
    fn recompile_runs_command_then_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let shader = dir.path().join("uber.wgsl");
        std::fs::write(&shader, "// v1").unwrap();
        let mut config = AppConfig::default();
        config.assets.shader = Some(shader.clone());
        config.assets.shader_compile_command =
            Some(format!("echo '// v2' > '{}'", shader.display()));
        let mut state = AppState::new(&config, 480, 720).unwrap();
        let generation = state.ctx.shader_generation();

        assert_eq!(state.recompile_shaders().unwrap(), 1);
        assert_eq!(
            state.ctx.shader(UBER_SHADER_NAME).unwrap().source.trim(),
            "// v2"
        );
        assert!(state.ctx.shader_generation() > generation);
    }

    #[cfg(unix)]
    #[test]
    fn failed_command_keeps_shaders() {
        let mut config = AppConfig::default();
        config.assets.shader_compile_command = Some("exit 3".to_string());
        let mut state = AppState::new(&config, 480, 720).unwrap();
        let generation = state.ctx.shader_generation();
        assert!(state.recompile_shaders().is_err());
        assert_eq!(state.ctx.shader_generation(), generation);
    }
}
