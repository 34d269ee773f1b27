// SPDX-License-Identifier: GPL-3.0-only

//! YUV -> RGB shader configuration and lifecycle
//!
//! This library builds the GLSL conversion shaders a video renderer uses to
//! turn decoded YUV planes into RGB, and manages their GPU-side state.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`shaders`]: Pixel formats, GLSL sources, resampling kernels and the
//!   progressive / filtered conversion shaders
//! - [`color`]: Color metadata and the YUV -> RGB matrix
//! - [`gpu`]: The [`gpu::GlContext`] abstraction the shaders drive
//! - [`config`]: Renderer-wide shader settings
//!
//! # Example
//!
//! ```ignore
//! let config = Config::default();
//! let mut shader = create_shader(
//!     ctx,
//!     &config,
//!     ShaderVariant::Filter4(ScalingMethod::Lanczos3Fast),
//!     config.shader_config(ShaderFormat::Yv12, false, false),
//!     None,
//! )?;
//! shader.compile_and_link()?;
//! shader.enable();
//! ```

/// `Display` and `FromStr` for enums exposing `ALL` and `name()`
///
/// Parsing ignores case and surrounding whitespace.
macro_rules! named_enum_parsing {
    ($ty:ty, $what:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| format!("unknown {}: {}", $what, wanted))
            }
        }
    };
}

pub mod color;
pub mod config;
pub mod constants;
pub mod errors;
pub mod gpu;
pub mod shaders;

// Re-export commonly used types
pub use config::{Config, ScalingFallback};
pub use errors::{ConfigError, ShaderError, ShaderResult};
pub use shaders::{ShaderConfig, ShaderFormat, ShaderVariant, YuvShader, create_shader};
