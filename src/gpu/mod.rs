// SPDX-License-Identifier: GPL-3.0-only

//! Graphics context abstraction
//!
//! The shaders in this crate drive the platform graphics API through the
//! [`GlContext`] trait instead of calling GL entry points directly. Every
//! method takes `&self`, matching how `glow::Context` and `wgpu::Device`
//! expose their APIs, so one context can be shared by the renderer and all
//! of its shaders through an `Arc`.
//!
//! All calls must happen on the thread that owns the GL context.

#[cfg(feature = "glow")]
mod glow_backend;

#[cfg(feature = "glow")]
pub use glow_backend::GlowContext;

use crate::errors::ShaderResult;
use tracing::error;

/// Operations the YUV shaders need from the platform graphics API
pub trait GlContext {
    /// Linked program object
    type Program: Copy + std::fmt::Debug;
    /// Resolved uniform location
    type UniformLocation: Clone + std::fmt::Debug;
    /// Texture object
    type Texture: Copy + PartialEq + std::fmt::Debug;

    /// Compile both stages and link them into a program
    fn compile_and_link(&self, vertex_src: &str, pixel_src: &str) -> ShaderResult<Self::Program>;
    fn delete_program(&self, program: Self::Program);
    fn use_program(&self, program: Option<Self::Program>);

    /// `None` when the program has no active uniform with this name
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
    /// `None` when the program has no active attribute with this name
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    // Uploads to an unresolved location are silently dropped, as in GL.
    fn uniform_1i(&self, location: Option<&Self::UniformLocation>, value: i32);
    fn uniform_1f(&self, location: Option<&Self::UniformLocation>, value: f32);
    fn uniform_2f(&self, location: Option<&Self::UniformLocation>, x: f32, y: f32);
    /// Column-major 4x4 matrix, never transposed
    fn uniform_matrix4(&self, location: Option<&Self::UniformLocation>, matrix: &[f32; 16]);

    /// Select texture unit `unit` (0-based) as the active one
    fn active_texture(&self, unit: u32);
    fn create_texture(&self) -> ShaderResult<Self::Texture>;
    fn delete_texture(&self, texture: Self::Texture);
    fn bind_texture_1d(&self, texture: Option<Self::Texture>);
    /// Linear min and mag filtering on the bound 1D texture
    fn set_texture_1d_linear_filtering(&self);
    /// Upload `width` RGBA32F texels to the bound 1D texture
    fn upload_texture_1d_rgba32f(&self, width: u32, texels: &[f32]);

    /// Pending GL error, if any
    fn check_error(&self) -> Option<String>;
}

/// Log any pending GL error after a batch of calls
///
/// GL errors here are diagnostics; rendering carries on regardless.
pub fn verify_state<C: GlContext + ?Sized>(ctx: &C, during: &str) {
    if let Some(err) = ctx.check_error() {
        error!(during, error = %err, "GL error");
    }
}
