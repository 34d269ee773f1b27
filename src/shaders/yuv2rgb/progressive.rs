// SPDX-License-Identifier: GPL-3.0-only

//! YUV -> RGB without resampling, for progressive and weave-deinterlaced video

use super::YuvShader;
use super::base::{BaseYuvShader, ShaderConfig};
use crate::constants::sources;
use crate::errors::ShaderResult;
use crate::gpu::GlContext;
use crate::shaders::output_stage::OutputStage;
use crate::shaders::source::ShaderSourceLoader;
use std::sync::Arc;

/// Bilinear-sampled conversion shader
pub struct ProgressiveShader<C: GlContext> {
    base: BaseYuvShader<C>,
}

impl<C: GlContext> ProgressiveShader<C> {
    pub fn new(
        ctx: Arc<C>,
        loader: &dyn ShaderSourceLoader,
        config: ShaderConfig,
        output: Option<Box<dyn OutputStage<C>>>,
    ) -> ShaderResult<Self> {
        let mut base = BaseYuvShader::new(ctx, loader, config, output)?;
        base.load_pixel_source(loader, sources::PIXEL_BASIC)?;
        base.append_pixel_source(loader, sources::OUTPUT)?;
        Ok(Self { base })
    }
}

impl<C: GlContext + 'static> YuvShader<C> for ProgressiveShader<C> {
    fn base(&self) -> &BaseYuvShader<C> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseYuvShader<C> {
        &mut self.base
    }

    fn on_linked(&mut self) -> ShaderResult<()> {
        self.base.on_linked();
        Ok(())
    }

    fn on_activated(&mut self) -> bool {
        self.base.on_activated()
    }
}
