// SPDX-License-Identifier: GPL-3.0-only
//! YUV -> RGB shader definitions and lifecycle
//!
//! Everything needed to turn a [`ShaderFormat`] plus a handful of flags into
//! a linked conversion program: the GLSL sources, define generation, the
//! resampling kernel for the filtered variant and the optional output stage.

mod format;
pub mod kernel;
pub mod output_stage;
pub mod program;
pub mod source;
pub mod yuv2rgb;

pub use format::{FORMAT_DEFINE_TAGS, ShaderFormat};
pub use kernel::{ConvolutionKernel, KernelMethod, ScalingMethod};
pub use output_stage::{DitherOutput, OutputStage};
pub use program::ShaderProgram;
pub use source::{DirectorySources, EmbeddedSources, ShaderSourceLoader, ShaderStage};
pub use yuv2rgb::{
    BaseYuvShader, FilterShader4, FrameUniforms, ProgressiveShader, ShaderConfig, ShaderVariant,
    YuvShader, build_defines, create_shader,
};
