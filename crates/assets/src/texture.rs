use image::DynamicImage;
use orbitview_render::{RenderContext, TextureFormat, TextureId};
use std::path::Path;

use crate::AssetError;

/// Decoded RGBA8 texture, rows stored bottom-up.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub name: String,
}

impl TextureData {
    /// Decode an image file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let img = image::open(path).map_err(|source| match source {
            image::ImageError::IoError(e) => AssetError::Io(e),
            source => AssetError::Decode {
                path: path.to_path_buf(),
                source,
            },
        })?;
        tracing::debug!(path = %path.display(), "texture decoded");
        Ok(Self::from_image(img, &name))
    }

    /// Decode an in-memory encoded image.
    pub fn from_bytes(bytes: &[u8], name: &str) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes).map_err(|source| AssetError::Decode {
            path: name.into(),
            source,
        })?;
        Ok(Self::from_image(img, name))
    }

    fn from_image(img: DynamicImage, name: &str) -> Self {
        let rgba = img.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            data: rgba.into_raw(),
            name: name.to_string(),
        }
    }

    /// A 1x1 texture of one colour.
    pub fn solid_color(color: [u8; 4], name: &str) -> Self {
        Self {
            width: 1,
            height: 1,
            data: color.to_vec(),
            name: name.to_string(),
        }
    }

    pub fn white() -> Self {
        Self::solid_color([255, 255, 255, 255], "white")
    }

    /// Flat tangent-space normal (0, 0, 1).
    pub fn default_normal() -> Self {
        Self::solid_color([128, 128, 255, 255], "default_normal")
    }

    /// Two-colour checkerboard with 8-pixel squares.
    pub fn checkerboard(size: u32, color1: [u8; 4], color2: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let is_even = ((x / 8) + (y / 8)) % 2 == 0;
                data.extend_from_slice(if is_even { &color1 } else { &color2 });
            }
        }
        Self {
            width: size,
            height: size,
            data,
            name: "checkerboard".to_string(),
        }
    }

    /// Create the texture in `ctx`.
    pub fn upload(self, ctx: &mut RenderContext) -> Result<TextureId, AssetError> {
        Ok(ctx.create_texture(self.data, TextureFormat::Rgba8, self.width, self.height)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    #[test]
    fn loads_png_flipped_to_rgba8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("albedo.png");
        // Top row red, bottom row blue.
        let img = RgbaImage::from_fn(2, 2, |_, y| if y == 0 { Rgba(RED) } else { Rgba(BLUE) });
        img.save(&path).unwrap();

        let tex = TextureData::from_file(&path).unwrap();
        assert_eq!((tex.width, tex.height), (2, 2));
        assert_eq!(tex.data.len(), 16);
        assert_eq!(&tex.data[0..4], &BLUE);
        assert_eq!(&tex.data[8..12], &RED);
        assert_eq!(tex.name, "albedo.png");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TextureData::from_file("/nonexistent/albedo.png").unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = TextureData::from_bytes(b"not an image", "junk").unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn checkerboard_alternates() {
        let tex = TextureData::checkerboard(16, RED, BLUE);
        assert_eq!(tex.data.len(), 16 * 16 * 4);
        assert_eq!(&tex.data[0..4], &RED);
        let ninth = 8 * 4;
        assert_eq!(&tex.data[ninth..ninth + 4], &BLUE);
    }

    #[test]
    fn upload_registers_texture() {
        let mut ctx = RenderContext::default();
        let id = TextureData::white().upload(&mut ctx).unwrap();
        let tex = ctx.texture(id).unwrap();
        assert_eq!(tex.data, vec![255; 4]);
    }
}
