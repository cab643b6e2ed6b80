use serde::{Deserialize, Serialize};

/// Shading mode the backend uses for renderables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Albedo texture with a single directional light.
    Lit,
    /// Albedo texture only.
    Unlit,
    /// World-space normals as colour.
    Normals,
}

impl RendererKind {
    pub const ALL: [RendererKind; 3] = [RendererKind::Lit, RendererKind::Unlit, RendererKind::Normals];

    pub fn name(&self) -> &'static str {
        match self {
            RendererKind::Lit => "lit",
            RendererKind::Unlit => "unlit",
            RendererKind::Normals => "normals",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Index passed to shaders as the shading mode.
    pub fn shader_mode(&self) -> u32 {
        match self {
            RendererKind::Lit => 0,
            RendererKind::Unlit => 1,
            RendererKind::Normals => 2,
        }
    }
}

/// Render context settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub renderer: RendererKind,
    pub resolution_width: u32,
    pub resolution_height: u32,
    pub vsync: bool,
    /// Packed `0xRRGGBBAA`.
    pub clear_color: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            renderer: RendererKind::Lit,
            resolution_width: 1280,
            resolution_height: 720,
            vsync: false,
            clear_color: 0xFF00FFFF,
        }
    }
}

impl RenderSettings {
    /// Clear colour as normalized RGBA.
    pub fn clear_color_rgba(&self) -> [f32; 4] {
        let c = self.clear_color;
        [
            ((c >> 24) & 0xFF) as f32 / 255.0,
            ((c >> 16) & 0xFF) as f32 / 255.0,
            ((c >> 8) & 0xFF) as f32 / 255.0,
            (c & 0xFF) as f32 / 255.0,
        ]
    }

    pub fn aspect(&self) -> f32 {
        self.resolution_width.max(1) as f32 / self.resolution_height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_clear_color_is_magenta() {
        let s = RenderSettings::default();
        assert_eq!(s.clear_color_rgba(), [1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn renderer_names_round_trip() {
        for kind in RendererKind::ALL {
            assert_eq!(RendererKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(RendererKind::from_name("raytraced"), None);
    }

    #[test]
    fn aspect_never_divides_by_zero() {
        let s = RenderSettings {
            resolution_height: 0,
            ..RenderSettings::default()
        };
        assert!(s.aspect().is_finite());
    }
}
