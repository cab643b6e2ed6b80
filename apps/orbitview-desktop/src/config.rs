use orbitview_camera::OrbitSettings;
use orbitview_render::RenderSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Desktop application configuration, loaded from YAML.
///
/// Every section is optional; missing fields take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub render: RenderSettings,
    pub camera: OrbitSettings,
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "My App".to_string(),
            width: 480,
            height: 720,
            resizable: true,
        }
    }
}

/// Texture and shader locations. Missing textures fall back to generated ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub albedo: Option<PathBuf>,
    pub normal: Option<PathBuf>,
    pub specular: Option<PathBuf>,
    pub white: Option<PathBuf>,
    /// WGSL file for the `uber` shader. The built-in shader is used when unset.
    pub shader: Option<PathBuf>,
    /// Shell command run by "Recompile & load shaders" before reloading.
    pub shader_compile_command: Option<String>,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line window size overrides.
    pub fn with_size(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        if let Some(width) = width {
            self.window.width = width.max(1);
        }
        if let Some(height) = height {
            self.window.height = height.max(1);
        }
        self
    }
}
