// SPDX-License-Identifier: GPL-3.0-only

//! [`GlContext`] implementation on top of `glow`

use super::GlContext;
use crate::errors::{ShaderError, ShaderResult};
use glow::HasContext;
use std::sync::Arc;
use tracing::debug;

/// OpenGL backend
///
/// The wrapped context must be current on the calling thread for every call.
pub struct GlowContext {
    gl: Arc<glow::Context>,
}

impl GlowContext {
    pub fn new(gl: Arc<glow::Context>) -> Self {
        Self { gl }
    }

    pub fn gl(&self) -> &Arc<glow::Context> {
        &self.gl
    }

    unsafe fn compile_stage(
        &self,
        stage: u32,
        source: &str,
    ) -> ShaderResult<<glow::Context as HasContext>::Shader> {
        let gl = &self.gl;
        let shader = unsafe { gl.create_shader(stage) }.map_err(ShaderError::Compile)?;
        unsafe {
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(ShaderError::Compile(log));
            }
        }
        Ok(shader)
    }
}

impl GlContext for GlowContext {
    type Program = <glow::Context as HasContext>::Program;
    type UniformLocation = <glow::Context as HasContext>::UniformLocation;
    type Texture = <glow::Context as HasContext>::Texture;

    fn compile_and_link(&self, vertex_src: &str, pixel_src: &str) -> ShaderResult<Self::Program> {
        let gl = &self.gl;
        unsafe {
            let vs = self.compile_stage(glow::VERTEX_SHADER, vertex_src)?;
            let fs = match self.compile_stage(glow::FRAGMENT_SHADER, pixel_src) {
                Ok(fs) => fs,
                Err(e) => {
                    gl.delete_shader(vs);
                    return Err(e);
                }
            };

            let program = match gl.create_program() {
                Ok(program) => program,
                Err(e) => {
                    gl.delete_shader(vs);
                    gl.delete_shader(fs);
                    return Err(ShaderError::Link(e));
                }
            };
            gl.attach_shader(program, vs);
            gl.attach_shader(program, fs);
            gl.link_program(program);

            let linked = gl.get_program_link_status(program);
            gl.detach_shader(program, vs);
            gl.detach_shader(program, fs);
            gl.delete_shader(vs);
            gl.delete_shader(fs);

            if !linked {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link(log));
            }

            debug!(?program, "GL program linked");
            Ok(program)
        }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn uniform_1i(&self, location: Option<&Self::UniformLocation>, value: i32) {
        unsafe { self.gl.uniform_1_i32(location, value) }
    }

    fn uniform_1f(&self, location: Option<&Self::UniformLocation>, value: f32) {
        unsafe { self.gl.uniform_1_f32(location, value) }
    }

    fn uniform_2f(&self, location: Option<&Self::UniformLocation>, x: f32, y: f32) {
        unsafe { self.gl.uniform_2_f32(location, x, y) }
    }

    fn uniform_matrix4(&self, location: Option<&Self::UniformLocation>, matrix: &[f32; 16]) {
        unsafe { self.gl.uniform_matrix_4_f32_slice(location, false, matrix) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn create_texture(&self) -> ShaderResult<Self::Texture> {
        unsafe { self.gl.create_texture() }.map_err(ShaderError::TextureAllocation)
    }

    fn delete_texture(&self, texture: Self::Texture) {
        unsafe { self.gl.delete_texture(texture) }
    }

    fn bind_texture_1d(&self, texture: Option<Self::Texture>) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_1D, texture) }
    }

    fn set_texture_1d_linear_filtering(&self) {
        unsafe {
            self.gl
                .tex_parameter_i32(glow::TEXTURE_1D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_1D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
        }
    }

    fn upload_texture_1d_rgba32f(&self, width: u32, texels: &[f32]) {
        unsafe {
            self.gl.tex_image_1d(
                glow::TEXTURE_1D,
                0,
                glow::RGBA32F as i32,
                width as i32,
                0,
                glow::RGBA,
                glow::FLOAT,
                Some(bytemuck::cast_slice(texels)),
            );
        }
    }

    fn check_error(&self) -> Option<String> {
        let err = unsafe { self.gl.get_error() };
        (err != glow::NO_ERROR).then(|| format!("0x{:04x}", err))
    }
}
