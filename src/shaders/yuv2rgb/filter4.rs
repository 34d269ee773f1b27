// SPDX-License-Identifier: GPL-3.0-only

//! YUV -> RGB with 4x4-tap luma resampling from a kernel lookup texture

use super::YuvShader;
use super::base::{BaseYuvShader, ShaderConfig};
use crate::config::ScalingFallback;
use crate::constants::{DEFAULT_TEXTURE_UNIT, KERNEL_SIZE, KERNEL_TEXTURE_UNIT, sources, uniforms};
use crate::errors::{ShaderError, ShaderResult};
use crate::gpu::{GlContext, verify_state};
use crate::shaders::kernel::{ConvolutionKernel, KernelMethod, ScalingMethod};
use crate::shaders::output_stage::OutputStage;
use crate::shaders::source::ShaderSourceLoader;
use std::sync::Arc;
use tracing::{error, info};

/// Conversion shader with a resampling kernel texture
///
/// The kernel texture is rebuilt on every link and owned by this shader
/// alone; it is deleted before being recreated and when the shader drops.
pub struct FilterShader4<C: GlContext> {
    base: BaseYuvShader<C>,
    scaling: ScalingMethod,
    kernel_location: Option<C::UniformLocation>,
    kernel_texture: Option<C::Texture>,
}

impl<C: GlContext> FilterShader4<C> {
    pub fn new(
        ctx: Arc<C>,
        loader: &dyn ShaderSourceLoader,
        config: ShaderConfig,
        scaling: ScalingMethod,
        fallback: ScalingFallback,
        output: Option<Box<dyn OutputStage<C>>>,
    ) -> ShaderResult<Self> {
        if fallback == ScalingFallback::Reject && scaling.filter4_kernel().is_none() {
            error!(%scaling, "Unsupported scaling method for filter shader, rejecting");
            return Err(ShaderError::UnsupportedScaling(scaling.to_string()));
        }
        let mut base = BaseYuvShader::new(ctx, loader, config, output)?;
        base.load_pixel_source(loader, sources::PIXEL_FILTER4)?;
        base.append_pixel_source(loader, sources::OUTPUT)?;
        Ok(Self {
            base,
            scaling,
            kernel_location: None,
            kernel_texture: None,
        })
    }

    /// Scaling method in effect; reflects any fallback applied at link time
    pub fn scaling(&self) -> ScalingMethod {
        self.scaling
    }

    pub fn kernel_texture(&self) -> Option<C::Texture> {
        self.kernel_texture
    }

    fn resolve_kernel_method(&mut self) -> KernelMethod {
        match self.scaling.filter4_kernel() {
            Some(method) => method,
            None => {
                let fallback = KernelMethod::default();
                error!(
                    requested = %self.scaling,
                    fallback = %fallback.scaling_method(),
                    "Unsupported scaling method for filter shader, falling back"
                );
                self.scaling = fallback.scaling_method();
                fallback
            }
        }
    }

    fn rebuild_kernel_texture(&mut self, method: KernelMethod) -> ShaderResult<()> {
        let kernel = ConvolutionKernel::new(method, KERNEL_SIZE);
        let ctx: &C = self.base.ctx();

        if let Some(old) = self.kernel_texture.take() {
            ctx.delete_texture(old);
        }
        let texture = ctx.create_texture()?;
        self.kernel_texture = Some(texture);

        ctx.active_texture(KERNEL_TEXTURE_UNIT);
        ctx.bind_texture_1d(Some(texture));
        ctx.set_texture_1d_linear_filtering();
        ctx.upload_texture_1d_rgba32f(kernel.size() as u32, kernel.texels());
        ctx.bind_texture_1d(None);
        ctx.active_texture(DEFAULT_TEXTURE_UNIT);
        verify_state(ctx, "kernel texture upload");

        info!(?method, size = kernel.size(), "Resampling kernel texture built");
        Ok(())
    }
}

impl<C: GlContext + 'static> YuvShader<C> for FilterShader4<C> {
    fn base(&self) -> &BaseYuvShader<C> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseYuvShader<C> {
        &mut self.base
    }

    fn on_linked(&mut self) -> ShaderResult<()> {
        self.base.on_linked();
        if let Some(program) = self.base.program().handle() {
            self.kernel_location = self.base.ctx().uniform_location(program, uniforms::KERNEL);
        }
        let method = self.resolve_kernel_method();
        self.rebuild_kernel_texture(method)
    }

    fn on_activated(&mut self) -> bool {
        let ctx: &C = self.base.ctx();
        ctx.active_texture(KERNEL_TEXTURE_UNIT);
        ctx.bind_texture_1d(self.kernel_texture);
        ctx.uniform_1i(self.kernel_location.as_ref(), KERNEL_TEXTURE_UNIT as i32);
        ctx.active_texture(DEFAULT_TEXTURE_UNIT);

        self.base.on_activated()
    }
}

impl<C: GlContext> Drop for FilterShader4<C> {
    fn drop(&mut self) {
        if let Some(texture) = self.kernel_texture.take() {
            self.base.ctx().delete_texture(texture);
        }
    }
}
