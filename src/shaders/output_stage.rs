// SPDX-License-Identifier: GPL-3.0-only

//! Optional output stage appended to the YUV pixel shaders
//!
//! An output stage post-processes the converted RGB value (dithering,
//! 3D LUTs, ...). It contributes its own preprocessor defines and gets a hook
//! at every point of the owning shader's lifecycle.

use crate::gpu::{GlContext, verify_state};
use tracing::debug;

/// Capability set of an auxiliary output stage
pub trait OutputStage<C: GlContext> {
    /// Defines merged in front of the shader's own
    fn defines(&self) -> String;
    /// Resolve uniforms and create resources for a freshly linked program
    fn on_compiled_and_linked(&mut self, ctx: &C, program: C::Program);
    fn on_enabled(&mut self, ctx: &C);
    fn on_disabled(&mut self, ctx: &C);
    /// Release everything created in `on_compiled_and_linked`
    fn free(&mut self, ctx: &C);
}

/// Random dither to `depth` bits before the framebuffer quantises
pub struct DitherOutput<C: GlContext> {
    depth: u32,
    quant_location: Option<C::UniformLocation>,
}

impl<C: GlContext> DitherOutput<C> {
    pub fn new(depth: u32) -> Self {
        Self {
            depth: depth.clamp(1, 16),
            quant_location: None,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    fn quantisation(&self) -> f32 {
        ((1u32 << self.depth) - 1) as f32
    }
}

impl<C: GlContext> OutputStage<C> for DitherOutput<C> {
    fn defines(&self) -> String {
        "#define XBMC_DITHER 1\n".to_string()
    }

    fn on_compiled_and_linked(&mut self, ctx: &C, program: C::Program) {
        self.quant_location = ctx.uniform_location(program, "m_ditherquant");
        debug!(
            depth = self.depth,
            resolved = self.quant_location.is_some(),
            "Dither output linked"
        );
    }

    fn on_enabled(&mut self, ctx: &C) {
        ctx.uniform_1f(self.quant_location.as_ref(), self.quantisation());
        verify_state(ctx, "dither output enable");
    }

    fn on_disabled(&mut self, _ctx: &C) {}

    fn free(&mut self, _ctx: &C) {
        self.quant_location = None;
    }
}
