use orbitview_render::{Geometry, GeometryId, RenderContext, TextureId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

use crate::AssetError;
use crate::texture::TextureData;

/// Content-addressed asset ID computed from the asset data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssetKind {
    Texture { width: u32, height: u32 },
    Geometry { vertex_count: u32, index_count: u32 },
}

/// Registry record for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub name: String,
    pub kind: AssetKind,
}

/// Content-addressed registry of everything uploaded to a render context.
///
/// Registering the same content twice returns the first upload's id. The
/// manifest (names and kinds) can be saved to JSON for inspection; the
/// render-context ids are only valid for the context they came from and are
/// not persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetStore {
    entries: BTreeMap<AssetId, AssetEntry>,
    #[serde(skip)]
    textures: BTreeMap<AssetId, TextureId>,
    #[serde(skip)]
    geometries: BTreeMap<AssetId, GeometryId>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a texture file and upload it, reusing an identical earlier upload.
    pub fn load_texture(
        &mut self,
        ctx: &mut RenderContext,
        path: impl AsRef<Path>,
    ) -> Result<TextureId, AssetError> {
        let data = TextureData::from_file(path)?;
        self.add_texture(ctx, data)
    }

    pub fn add_texture(
        &mut self,
        ctx: &mut RenderContext,
        texture: TextureData,
    ) -> Result<TextureId, AssetError> {
        let id = texture_hash(&texture);
        if let Some(existing) = self.textures.get(&id) {
            tracing::debug!(name = %texture.name, "texture already registered");
            return Ok(*existing);
        }
        let entry = AssetEntry {
            name: texture.name.clone(),
            kind: AssetKind::Texture {
                width: texture.width,
                height: texture.height,
            },
        };
        let texture_id = texture.upload(ctx)?;
        self.entries.insert(id, entry);
        self.textures.insert(id, texture_id);
        Ok(texture_id)
    }

    pub fn add_geometry(
        &mut self,
        ctx: &mut RenderContext,
        name: &str,
        geometry: Geometry,
    ) -> GeometryId {
        let id = geometry_hash(&geometry);
        if let Some(existing) = self.geometries.get(&id) {
            return *existing;
        }
        self.entries.insert(
            id,
            AssetEntry {
                name: name.to_string(),
                kind: AssetKind::Geometry {
                    vertex_count: geometry.vertices.len() as u32,
                    index_count: geometry.indices.len() as u32,
                },
            },
        );
        let geometry_id = ctx.create_geometry(geometry);
        self.geometries.insert(id, geometry_id);
        geometry_id
    }

    pub fn get(&self, id: AssetId) -> Option<&AssetEntry> {
        self.entries.get(&id)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&AssetId, &AssetEntry)> {
        self.entries.iter()
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Save the manifest to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a manifest saved by [`save`](Self::save).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let file = std::fs::File::open(path)?;
        let store: Self = serde_json::from_reader(file)?;
        Ok(store)
    }
}

fn digest_id(hasher: Sha256) -> AssetId {
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    AssetId(u64::from_le_bytes(bytes))
}

fn texture_hash(texture: &TextureData) -> AssetId {
    let mut hasher = Sha256::new();
    hasher.update(b"texture");
    hasher.update(texture.width.to_le_bytes());
    hasher.update(texture.height.to_le_bytes());
    hasher.update(&texture.data);
    digest_id(hasher)
}

fn geometry_hash(geometry: &Geometry) -> AssetId {
    let mut hasher = Sha256::new();
    hasher.update(b"geometry");
    hasher.update(bytemuck::cast_slice::<_, u8>(&geometry.vertices));
    hasher.update(bytemuck::cast_slice::<_, u8>(&geometry.indices));
    digest_id(hasher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::cube_geometry;

    #[test]
    fn identical_textures_upload_once() {
        let mut ctx = RenderContext::default();
        let mut store = AssetStore::new();
        let a = store.add_texture(&mut ctx, TextureData::white()).unwrap();
        let b = store.add_texture(&mut ctx, TextureData::white()).unwrap();
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
        assert_eq!(ctx.textures().len(), 1);
    }

    #[test]
    fn different_textures_get_different_ids() {
        let mut ctx = RenderContext::default();
        let mut store = AssetStore::new();
        let a = store.add_texture(&mut ctx, TextureData::white()).unwrap();
        let b = store
            .add_texture(&mut ctx, TextureData::default_normal())
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn geometry_dedup() {
        let mut ctx = RenderContext::default();
        let mut store = AssetStore::new();
        let a = store.add_geometry(&mut ctx, "cube", cube_geometry());
        let b = store.add_geometry(&mut ctx, "cube again", cube_geometry());
        assert_eq!(a, b);
        assert_eq!(ctx.buffer_count(), 2);
        let (_, entry) = store.entries().next().unwrap();
        assert_eq!(
            entry.kind,
            AssetKind::Geometry {
                vertex_count: 24,
                index_count: 36
            }
        );
    }

    #[test]
    fn load_texture_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("white.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 255, 255, 255]))
            .save(&path)
            .unwrap();
        let mut ctx = RenderContext::default();
        let mut store = AssetStore::new();
        let id = store.load_texture(&mut ctx, &path).unwrap();
        assert_eq!(ctx.texture(id).unwrap().width, 4);
    }

    #[test]
    fn save_and_load_manifest() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut ctx = RenderContext::default();
        let mut store = AssetStore::new();
        store.add_geometry(&mut ctx, "cube", cube_geometry());
        store.add_texture(&mut ctx, TextureData::white()).unwrap();
        store.save(tmp.path()).unwrap();

        let loaded = AssetStore::load(tmp.path()).unwrap();
        assert_eq!(loaded.len(), 2);
    }
}
