use glam::{Mat4, Vec3};
use orbitview_common::{CameraHandle, RenderableId};
use std::collections::BTreeMap;
use std::path::Path;

use crate::camera::{Camera, CameraPose, CameraRig, CameraSettings};
use crate::error::RenderError;
use crate::resources::{
    Geometry, GeometryId, Material, MaterialId, Renderable, ShaderSource, Texture, TextureFormat,
    TextureId,
};
use crate::settings::{RenderSettings, RendererKind};

/// Debug text colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    White,
    Red,
    Green,
    Yellow,
}

/// One line of on-screen debug text, positioned on a character grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugTextLine {
    pub x: u16,
    pub y: u16,
    pub color: TextColor,
    pub text: String,
}

/// Renderer-agnostic render state.
///
/// Owns every render resource; callers refer to them by handle or id.
/// Backends read this each frame and report their draw call count back.
#[derive(Debug)]
pub struct RenderContext {
    settings: RenderSettings,
    cameras: BTreeMap<CameraHandle, Camera>,
    geometries: Vec<Geometry>,
    textures: Vec<Texture>,
    materials: Vec<Material>,
    renderables: Vec<(RenderableId, Renderable)>,
    shaders: BTreeMap<String, ShaderSource>,
    shader_generation: u64,
    render_systems: Vec<String>,
    debug_text: Vec<DebugTextLine>,
    draw_calls: u32,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

impl RenderContext {
    pub fn new(settings: RenderSettings) -> Self {
        tracing::info!(
            renderer = settings.renderer.name(),
            width = settings.resolution_width,
            height = settings.resolution_height,
            "render context initialized"
        );
        Self {
            settings,
            cameras: BTreeMap::new(),
            geometries: Vec::new(),
            textures: Vec::new(),
            materials: Vec::new(),
            renderables: Vec::new(),
            shaders: BTreeMap::new(),
            shader_generation: 0,
            render_systems: Vec::new(),
            debug_text: Vec::new(),
            draw_calls: 0,
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Replace the settings. Resolution changes are logged for the backend.
    pub fn set_settings(&mut self, settings: RenderSettings) {
        if settings.resolution_width != self.settings.resolution_width
            || settings.resolution_height != self.settings.resolution_height
        {
            tracing::debug!(
                width = settings.resolution_width,
                height = settings.resolution_height,
                "render resolution changed"
            );
        }
        if settings.renderer != self.settings.renderer {
            tracing::info!(renderer = settings.renderer.name(), "renderer switched");
        }
        self.settings = settings;
    }

    pub fn set_clear_color(&mut self, rgba: u32) {
        self.settings.clear_color = rgba;
    }

    pub fn renderer_names(&self) -> Vec<&'static str> {
        RendererKind::ALL.iter().map(|k| k.name()).collect()
    }

    // Cameras

    pub fn create_camera(&mut self, settings: CameraSettings) -> CameraHandle {
        let handle = CameraHandle::new();
        self.cameras.insert(handle, Camera::new(settings));
        tracing::debug!(?handle, "camera created");
        handle
    }

    pub fn camera(&self, handle: CameraHandle) -> Option<&Camera> {
        self.cameras.get(&handle)
    }

    pub fn camera_mut(&mut self, handle: CameraHandle) -> Option<&mut Camera> {
        self.cameras.get_mut(&handle)
    }

    pub fn destroy_camera(&mut self, handle: CameraHandle) -> bool {
        self.cameras.remove(&handle).is_some()
    }

    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }

    // Geometry, textures, materials

    pub fn create_geometry(&mut self, geometry: Geometry) -> GeometryId {
        let id = GeometryId(self.geometries.len() as u32);
        tracing::debug!(
            vertices = geometry.vertices.len(),
            indices = geometry.indices.len(),
            "geometry created"
        );
        self.geometries.push(geometry);
        id
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0 as usize)
    }

    /// All geometry, indexed by `GeometryId`. Append-only.
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn create_texture(
        &mut self,
        data: Vec<u8>,
        format: TextureFormat,
        width: u32,
        height: u32,
    ) -> Result<TextureId, RenderError> {
        let expected = Texture::expected_len(width, height, format);
        if data.len() != expected {
            return Err(RenderError::TextureSize {
                expected,
                actual: data.len(),
            });
        }
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(Texture {
            width,
            height,
            format,
            data,
        });
        tracing::debug!(width, height, "texture created");
        Ok(id)
    }

    pub fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id.0 as usize)
    }

    /// All textures, indexed by `TextureId`. Append-only.
    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    /// Create a material for a loaded shader.
    pub fn create_material(&mut self, shader: &str) -> Result<MaterialId, RenderError> {
        if !self.shaders.contains_key(shader) {
            return Err(RenderError::ShaderNotFound(shader.to_string()));
        }
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(Material::new(shader));
        Ok(id)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    /// Bind a texture to one of a material's sampler uniforms.
    pub fn set_material_texture(
        &mut self,
        material: MaterialId,
        uniform: &str,
        texture: TextureId,
    ) -> Result<(), RenderError> {
        if self.texture(texture).is_none() {
            return Err(RenderError::TextureNotFound(texture));
        }
        let m = self
            .materials
            .get_mut(material.0 as usize)
            .ok_or(RenderError::MaterialNotFound(material))?;
        m.set_texture(uniform, texture);
        Ok(())
    }

    // Renderables

    /// Create a renderable and add it to the draw list.
    pub fn create_renderable(
        &mut self,
        geometry: GeometryId,
        material: MaterialId,
    ) -> Result<RenderableId, RenderError> {
        if self.geometry(geometry).is_none() {
            return Err(RenderError::GeometryNotFound(geometry));
        }
        if self.material(material).is_none() {
            return Err(RenderError::MaterialNotFound(material));
        }
        let id = RenderableId::new();
        self.renderables.push((
            id,
            Renderable {
                geometry,
                material,
                transform: Mat4::IDENTITY,
            },
        ));
        Ok(id)
    }

    pub fn set_transform(&mut self, id: RenderableId, transform: Mat4) -> Result<(), RenderError> {
        let (_, r) = self
            .renderables
            .iter_mut()
            .find(|(rid, _)| *rid == id)
            .ok_or(RenderError::RenderableNotFound(id))?;
        r.transform = transform;
        Ok(())
    }

    /// Renderables in insertion order.
    pub fn renderables(&self) -> &[(RenderableId, Renderable)] {
        &self.renderables
    }

    pub fn remove_renderable(&mut self, id: RenderableId) -> bool {
        let before = self.renderables.len();
        self.renderables.retain(|(rid, _)| *rid != id);
        self.renderables.len() != before
    }

    // Shaders

    /// Load WGSL source for `name` from `path`.
    pub fn load_shader(&mut self, name: &str, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref().to_path_buf();
        let source = std::fs::read_to_string(&path).map_err(|source| RenderError::ShaderIo {
            path: path.clone(),
            source,
        })?;
        tracing::info!(name, path = %path.display(), "shader loaded");
        self.shaders
            .insert(name.to_string(), ShaderSource { path, source });
        self.shader_generation += 1;
        Ok(())
    }

    /// Register in-memory shader source under `name`.
    pub fn register_shader(&mut self, name: &str, source: impl Into<String>) {
        self.shaders.insert(
            name.to_string(),
            ShaderSource {
                path: Default::default(),
                source: source.into(),
            },
        );
        self.shader_generation += 1;
    }

    /// Re-read every shader that came from a file. Returns how many were reloaded.
    ///
    /// On error the previously loaded sources stay in place.
    pub fn reload_shaders(&mut self) -> Result<usize, RenderError> {
        let mut reloaded = Vec::new();
        for (name, shader) in &self.shaders {
            if shader.path.as_os_str().is_empty() {
                continue;
            }
            let source =
                std::fs::read_to_string(&shader.path).map_err(|source| RenderError::ShaderIo {
                    path: shader.path.clone(),
                    source,
                })?;
            reloaded.push((name.clone(), source));
        }
        let count = reloaded.len();
        for (name, source) in reloaded {
            if let Some(shader) = self.shaders.get_mut(&name) {
                shader.source = source;
            }
        }
        self.shader_generation += 1;
        tracing::info!(count, "shaders reloaded");
        Ok(count)
    }

    pub fn shader(&self, name: &str) -> Option<&ShaderSource> {
        self.shaders.get(name)
    }

    pub fn shaders(&self) -> &BTreeMap<String, ShaderSource> {
        &self.shaders
    }

    /// Bumped whenever shader sources change so backends can rebuild pipelines.
    pub fn shader_generation(&self) -> u64 {
        self.shader_generation
    }

    // Render systems and statistics

    pub fn register_render_system(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.render_systems.contains(&name) {
            self.render_systems.push(name);
        }
    }

    pub fn render_systems(&self) -> &[String] {
        &self.render_systems
    }

    /// Distinct (geometry, material) pairs the backend has to bind.
    pub fn render_state_count(&self) -> usize {
        let mut states: Vec<(GeometryId, MaterialId)> = self
            .renderables
            .iter()
            .map(|(_, r)| (r.geometry, r.material))
            .collect();
        states.sort();
        states.dedup();
        states.len()
    }

    /// GPU buffers backing the resources: vertex + index per geometry, one per texture.
    pub fn buffer_count(&self) -> usize {
        self.geometries.len() * 2 + self.textures.len()
    }

    pub fn record_draw_calls(&mut self, count: u32) {
        self.draw_calls = count;
    }

    pub fn draw_calls(&self) -> u32 {
        self.draw_calls
    }

    // Debug text

    pub fn submit_debug_text(&mut self, x: u16, y: u16, text: impl Into<String>) {
        self.submit_debug_text_colored(x, y, TextColor::White, text);
    }

    pub fn submit_debug_text_colored(
        &mut self,
        x: u16,
        y: u16,
        color: TextColor,
        text: impl Into<String>,
    ) {
        self.debug_text.push(DebugTextLine {
            x,
            y,
            color,
            text: text.into(),
        });
    }

    pub fn debug_text(&self) -> &[DebugTextLine] {
        &self.debug_text
    }

    /// Drain the debug text queued for this frame.
    pub fn take_debug_text(&mut self) -> Vec<DebugTextLine> {
        std::mem::take(&mut self.debug_text)
    }
}

impl CameraRig for RenderContext {
    fn camera_pose(&self, camera: CameraHandle) -> Option<CameraPose> {
        self.cameras.get(&camera).map(Camera::pose)
    }

    fn set_camera_pose(
        &mut self,
        camera: CameraHandle,
        position: Vec3,
        look_at: Vec3,
    ) -> Result<(), RenderError> {
        let cam = self
            .cameras
            .get_mut(&camera)
            .ok_or(RenderError::CameraNotFound(camera))?;
        cam.set_pose(CameraPose {
            position,
            target: look_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Vertex;
    use std::io::Write;

    fn triangle() -> Geometry {
        let v = Vertex {
            position: [0.0; 3],
            normal: 0,
            tangent: 0,
            uv: [0, 0],
        };
        Geometry {
            vertices: vec![v; 3],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn camera_pose_round_trip() {
        let mut ctx = RenderContext::default();
        let cam = ctx.create_camera(CameraSettings::default());
        ctx.set_camera_pose(cam, Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO)
            .unwrap();
        let pose = ctx.camera_pose(cam).unwrap();
        assert_eq!(pose.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(pose.target, Vec3::ZERO);
    }

    #[test]
    fn destroyed_camera_rejects_pose() {
        let mut ctx = RenderContext::default();
        let cam = ctx.create_camera(CameraSettings::default());
        assert!(ctx.destroy_camera(cam));
        assert!(ctx.camera_pose(cam).is_none());
        let err = ctx.set_camera_pose(cam, Vec3::ONE, Vec3::ZERO);
        assert!(matches!(err, Err(RenderError::CameraNotFound(_))));
    }

    #[test]
    fn texture_size_is_validated() {
        let mut ctx = RenderContext::default();
        let err = ctx.create_texture(vec![0; 7], TextureFormat::Rgba8, 2, 1);
        assert!(matches!(
            err,
            Err(RenderError::TextureSize {
                expected: 8,
                actual: 7
            })
        ));
        assert!(ctx
            .create_texture(vec![0; 8], TextureFormat::Rgba8, 2, 1)
            .is_ok());
    }

    #[test]
    fn material_requires_loaded_shader() {
        let mut ctx = RenderContext::default();
        assert!(matches!(
            ctx.create_material("uber"),
            Err(RenderError::ShaderNotFound(_))
        ));
        ctx.register_shader("uber", "// wgsl");
        assert!(ctx.create_material("uber").is_ok());
    }

    #[test]
    fn renderables_keep_insertion_order() {
        let mut ctx = RenderContext::default();
        ctx.register_shader("uber", "");
        let geo = ctx.create_geometry(triangle());
        let mat = ctx.create_material("uber").unwrap();
        let a = ctx.create_renderable(geo, mat).unwrap();
        let b = ctx.create_renderable(geo, mat).unwrap();
        let ids: Vec<_> = ctx.renderables().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(ctx.render_state_count(), 1);

        let m = Mat4::from_translation(Vec3::X);
        ctx.set_transform(b, m).unwrap();
        assert_eq!(ctx.renderables()[1].1.transform, m);
        assert!(ctx.remove_renderable(a));
        assert!(matches!(
            ctx.set_transform(a, m),
            Err(RenderError::RenderableNotFound(_))
        ));
    }

    #[test]
    fn renderable_requires_known_resources() {
        let mut ctx = RenderContext::default();
        let err = ctx.create_renderable(GeometryId(0), MaterialId(0));
        assert!(matches!(err, Err(RenderError::GeometryNotFound(_))));
    }

    #[test]
    fn buffer_count_tracks_resources() {
        let mut ctx = RenderContext::default();
        ctx.create_geometry(triangle());
        ctx.create_texture(vec![0; 4], TextureFormat::Rgba8, 1, 1)
            .unwrap();
        assert_eq!(ctx.buffer_count(), 3);
    }

    #[test]
    fn shader_reload_picks_up_changes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "// v1").unwrap();
        let mut ctx = RenderContext::default();
        ctx.load_shader("uber", file.path()).unwrap();
        let gen_before = ctx.shader_generation();
        assert_eq!(ctx.shader("uber").unwrap().source, "// v1");

        std::fs::write(file.path(), "// v2").unwrap();
        assert_eq!(ctx.reload_shaders().unwrap(), 1);
        assert_eq!(ctx.shader("uber").unwrap().source, "// v2");
        assert!(ctx.shader_generation() > gen_before);
    }

    #[test]
    fn missing_shader_file_is_an_error() {
        let mut ctx = RenderContext::default();
        let err = ctx.load_shader("uber", "/nonexistent/uber.wgsl");
        assert!(matches!(err, Err(RenderError::ShaderIo { .. })));
    }

    #[test]
    fn debug_text_drains_per_frame() {
        let mut ctx = RenderContext::default();
        ctx.submit_debug_text(45, 2, "framerate: 60.00 fps");
        ctx.submit_debug_text_colored(25, 2, TextColor::Red, "Too many meshes!!");
        assert_eq!(ctx.debug_text().len(), 2);
        let lines = ctx.take_debug_text();
        assert_eq!(lines[1].color, TextColor::Red);
        assert!(ctx.debug_text().is_empty());
    }

    #[test]
    fn render_systems_are_unique() {
        let mut ctx = RenderContext::default();
        ctx.register_render_system("mesh");
        ctx.register_render_system("mesh");
        ctx.register_render_system("ui");
        assert_eq!(ctx.render_systems(), &["mesh".to_string(), "ui".to_string()]);
    }
}
