// SPDX-License-Identifier: GPL-3.0-only

//! Vertex + pixel shader pair linked into one GL program

use super::source::ShaderStage;
use crate::errors::ShaderResult;
use crate::gpu::GlContext;
use std::sync::Arc;
use tracing::debug;

/// Owns the stage sources and the linked program object
pub struct ShaderProgram<C: GlContext> {
    ctx: Arc<C>,
    vertex: ShaderStage,
    pixel: ShaderStage,
    program: Option<C::Program>,
}

impl<C: GlContext> ShaderProgram<C> {
    pub fn new(ctx: Arc<C>) -> Self {
        Self {
            ctx,
            vertex: ShaderStage::new(),
            pixel: ShaderStage::new(),
            program: None,
        }
    }

    pub fn ctx(&self) -> &Arc<C> {
        &self.ctx
    }

    pub fn vertex(&self) -> &ShaderStage {
        &self.vertex
    }

    pub fn vertex_mut(&mut self) -> &mut ShaderStage {
        &mut self.vertex
    }

    pub fn pixel(&self) -> &ShaderStage {
        &self.pixel
    }

    pub fn pixel_mut(&mut self) -> &mut ShaderStage {
        &mut self.pixel
    }

    /// Linked program, if any
    pub fn handle(&self) -> Option<C::Program> {
        self.program
    }

    /// Compile and link the current sources, replacing any earlier program
    pub fn link(&mut self) -> ShaderResult<C::Program> {
        self.free();
        let program = self
            .ctx
            .compile_and_link(self.vertex.source(), self.pixel.source())?;
        debug!(?program, "Shader program linked");
        self.program = Some(program);
        Ok(program)
    }

    /// Delete the program object. Safe to call repeatedly.
    pub fn free(&mut self) {
        if let Some(program) = self.program.take() {
            self.ctx.delete_program(program);
        }
    }
}

impl<C: GlContext> Drop for ShaderProgram<C> {
    fn drop(&mut self) {
        self.free();
    }
}
