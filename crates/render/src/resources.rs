use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GeometryId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

/// Mesh vertex.
///
/// Normal and tangent are packed RGBA8 (`xyz * 0.5 + 0.5`), texture
/// coordinates are signed-normalized 16-bit.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: u32,
    pub tangent: u32,
    pub uv: [i16; 2],
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Geometry {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureFormat {
    Rgba8,
}

impl TextureFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            TextureFormat::Rgba8 => 4,
        }
    }
}

/// CPU-side texture data.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub data: Vec<u8>,
}

impl Texture {
    pub fn expected_len(width: u32, height: u32, format: TextureFormat) -> usize {
        width as usize * height as usize * format.bytes_per_pixel()
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// A shader program plus the texture samplers bound to it.
#[derive(Debug, Clone)]
pub struct Material {
    pub shader: String,
    textures: BTreeMap<String, TextureId>,
}

impl Material {
    pub fn new(shader: impl Into<String>) -> Self {
        Self {
            shader: shader.into(),
            textures: BTreeMap::new(),
        }
    }

    /// Bind a texture to a sampler uniform such as `u_albedo`.
    pub fn set_texture(&mut self, uniform: impl Into<String>, texture: TextureId) {
        self.textures.insert(uniform.into(), texture);
    }

    pub fn texture(&self, uniform: &str) -> Option<TextureId> {
        self.textures.get(uniform).copied()
    }

    pub fn textures(&self) -> &BTreeMap<String, TextureId> {
        &self.textures
    }
}

/// A geometry drawn with a material at a model transform.
#[derive(Debug, Clone, Copy)]
pub struct Renderable {
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub transform: Mat4,
}

/// Shader source loaded from disk.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub path: PathBuf,
    pub source: String,
}
