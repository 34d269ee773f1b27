// SPDX-License-Identifier: GPL-3.0-only

use crate::errors::ConfigError;
use crate::shaders::{DirectorySources, EmbeddedSources, ShaderConfig, ShaderFormat, ShaderSourceLoader};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// What the filter shader does with a scaling method it has no kernel for
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalingFallback {
    /// Log an error and use the default kernel (Lanczos3 fast)
    #[default]
    Fallback,
    /// Fail shader construction
    Reject,
}

/// Renderer-wide shader settings
#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Driver workaround for broken rectangle texture coordinates; doubles
    /// the chroma sampling coordinates of planar formats
    pub gl_rectangle_hack: bool,
    /// Handling of scaling methods without a 4-tap kernel
    pub unsupported_scaling: ScalingFallback,
    /// Load GLSL sources from this directory instead of the embedded copies
    pub shader_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading shader config");
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Source loader matching `shader_dir`
    pub fn source_loader(&self) -> Box<dyn ShaderSourceLoader> {
        match &self.shader_dir {
            Some(dir) => Box::new(DirectorySources::new(dir.clone())),
            None => Box::new(EmbeddedSources),
        }
    }

    /// Shader construction options with the global workaround flag applied
    pub fn shader_config(&self, format: ShaderFormat, rectangle: bool, stretch: bool) -> ShaderConfig {
        ShaderConfig {
            format,
            rectangle_texture: rectangle,
            stretch,
            rectangle_hack: self.gl_rectangle_hack,
        }
    }
}
