// SPDX-License-Identifier: GPL-3.0-only

//! YUV -> RGB conversion shaders
//!
//! [`BaseYuvShader`] holds everything the variants share: the define block,
//! the linked program, cached uniform handles, the conversion matrix and the
//! optional output stage. [`ProgressiveShader`] and [`FilterShader4`] add
//! their own pixel source and, for the filtered variant, a resampling kernel
//! texture. Renderers drive either one through [`YuvShader`].
//!
//! Lifecycle: construct -> `compile_and_link` -> (`enable` / `disable`)* ->
//! `release` -> drop. Ordering is the caller's responsibility.

mod base;
mod filter4;
mod progressive;

pub use base::{BaseYuvShader, FrameUniforms, ShaderConfig, ShaderHandles, build_defines};
pub use filter4::FilterShader4;
pub use progressive::ProgressiveShader;

use super::kernel::ScalingMethod;
use super::output_stage::OutputStage;
use super::source::ShaderSourceLoader;
use super::ShaderFormat;
use crate::color::ColorSpaceParams;
use crate::config::Config;
use crate::errors::ShaderResult;
use crate::gpu::GlContext;
use std::sync::Arc;
use tracing::{debug, info};

/// Lifecycle surface shared by the shader variants
pub trait YuvShader<C: GlContext + 'static> {
    fn base(&self) -> &BaseYuvShader<C>;
    fn base_mut(&mut self) -> &mut BaseYuvShader<C>;

    /// Post-link hook; resolve handles and build link-time resources
    fn on_linked(&mut self) -> ShaderResult<()>;
    /// Push per-frame state to the bound program
    fn on_activated(&mut self) -> bool;

    fn on_deactivated(&mut self) {
        self.base_mut().on_deactivated();
    }

    /// Compile and link the loaded sources, then run the link hook
    ///
    /// Compile and link errors are returned as-is; nothing is retried.
    fn compile_and_link(&mut self) -> ShaderResult<()> {
        self.base_mut().program_mut().link()?;
        self.on_linked()
    }

    /// Bind the program and upload the frame uniforms
    fn enable(&mut self) -> bool {
        let program = self.base().program().handle();
        if program.is_none() {
            return false;
        }
        self.base().ctx().use_program(program);
        self.on_activated()
    }

    fn disable(&mut self) {
        self.on_deactivated();
        self.base().ctx().use_program(None);
    }

    fn release(&mut self) {
        self.base_mut().release();
    }

    fn set_color_space(&mut self, params: ColorSpaceParams) {
        self.base_mut().set_color_space(params);
    }

    fn frame(&self) -> &FrameUniforms {
        self.base().frame()
    }

    fn frame_mut(&mut self) -> &mut FrameUniforms {
        self.base_mut().frame_mut()
    }

    fn set_frame(&mut self, frame: FrameUniforms) {
        *self.base_mut().frame_mut() = frame;
    }

    fn defines(&self) -> &str {
        self.base().defines()
    }

    fn format(&self) -> ShaderFormat {
        self.base().format()
    }
}

/// Which conversion shader to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderVariant {
    Progressive,
    /// 4x4-tap resampling with the given scaling method
    Filter4(ScalingMethod),
}

/// Build a conversion shader, reading sources and policy from `config`
pub fn create_shader<C: GlContext + 'static>(
    ctx: Arc<C>,
    config: &Config,
    variant: ShaderVariant,
    shader: ShaderConfig,
    output: Option<Box<dyn OutputStage<C>>>,
) -> ShaderResult<Box<dyn YuvShader<C>>> {
    let loader: Box<dyn ShaderSourceLoader> = config.source_loader();
    debug!(?variant, format = %shader.format, "Creating YUV shader");
    let built: Box<dyn YuvShader<C>> = match variant {
        ShaderVariant::Progressive => {
            Box::new(ProgressiveShader::new(ctx, loader.as_ref(), shader, output)?)
        }
        ShaderVariant::Filter4(scaling) => Box::new(FilterShader4::new(
            ctx,
            loader.as_ref(),
            shader,
            scaling,
            config.unsupported_scaling,
            output,
        )?),
    };
    info!(?variant, format = %shader.format, "YUV shader created");
    Ok(built)
}
