// SPDX-License-Identifier: GPL-3.0-only

//! State and behaviour shared by every YUV -> RGB shader variant

use crate::color::{ColorSpaceParams, ConvertMatrix};
use crate::constants::{IDENTITY_MATRIX, PLANE_TEXTURE_UNITS, attributes, sources, uniforms};
use crate::errors::ShaderResult;
use crate::gpu::{GlContext, verify_state};
use crate::shaders::ShaderFormat;
use crate::shaders::output_stage::OutputStage;
use crate::shaders::program::ShaderProgram;
use crate::shaders::source::ShaderSourceLoader;
use std::sync::Arc;
use tracing::{debug, error};

/// Construction options, fixed for the lifetime of a shader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderConfig {
    pub format: ShaderFormat,
    /// Planes are rectangle (non-normalised) textures
    pub rectangle_texture: bool,
    /// Compile in non-linear horizontal stretch support
    pub stretch: bool,
    /// Platform workaround flag, taken from [`crate::Config`]
    pub rectangle_hack: bool,
}

impl ShaderConfig {
    pub fn new(format: ShaderFormat) -> Self {
        Self {
            format,
            rectangle_texture: false,
            stretch: false,
            rectangle_hack: false,
        }
    }
}

/// Per-frame values pushed on every activation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Source texture size in pixels
    pub width: u32,
    pub height: u32,
    /// Field being rendered for interlaced content (0 or 1)
    pub field: u32,
    pub black: f32,
    pub contrast: f32,
    /// Non-linear stretch amount, 0 disables
    pub stretch: f32,
    pub alpha: f32,
    /// Output full-range RGB instead of 16-235
    pub convert_full_range: bool,
    /// Column-major projection matrix
    pub projection: [f32; 16],
    /// Column-major model matrix
    pub model: [f32; 16],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            field: 0,
            black: 0.0,
            contrast: 1.0,
            stretch: 0.0,
            alpha: 1.0,
            convert_full_range: true,
            projection: IDENTITY_MATRIX,
            model: IDENTITY_MATRIX,
        }
    }
}

/// Uniform and attribute locations resolved once after link
pub struct ShaderHandles<C: GlContext> {
    pub samp_y: Option<C::UniformLocation>,
    pub samp_u: Option<C::UniformLocation>,
    pub samp_v: Option<C::UniformLocation>,
    pub matrix: Option<C::UniformLocation>,
    pub stretch: Option<C::UniformLocation>,
    pub step: Option<C::UniformLocation>,
    pub projection: Option<C::UniformLocation>,
    pub model: Option<C::UniformLocation>,
    pub alpha: Option<C::UniformLocation>,
    pub position: Option<u32>,
    pub coord_y: Option<u32>,
    pub coord_u: Option<u32>,
    pub coord_v: Option<u32>,
}

impl<C: GlContext> ShaderHandles<C> {
    fn resolve(ctx: &C, program: C::Program) -> Self {
        Self {
            samp_y: ctx.uniform_location(program, uniforms::SAMPLER_Y),
            samp_u: ctx.uniform_location(program, uniforms::SAMPLER_U),
            samp_v: ctx.uniform_location(program, uniforms::SAMPLER_V),
            matrix: ctx.uniform_location(program, uniforms::YUV_MATRIX),
            stretch: ctx.uniform_location(program, uniforms::STRETCH),
            step: ctx.uniform_location(program, uniforms::STEP),
            projection: ctx.uniform_location(program, uniforms::PROJECTION),
            model: ctx.uniform_location(program, uniforms::MODEL),
            alpha: ctx.uniform_location(program, uniforms::ALPHA),
            position: ctx.attrib_location(program, attributes::POSITION),
            coord_y: ctx.attrib_location(program, attributes::COORD_Y),
            coord_u: ctx.attrib_location(program, attributes::COORD_U),
            coord_v: ctx.attrib_location(program, attributes::COORD_V),
        }
    }
}

/// Assemble the preprocessor block for a shader
///
/// Output stage defines come first, then rectangle, rectangle hack and
/// stretch flags, then at most one format symbol.
pub fn build_defines(config: &ShaderConfig, output_defines: Option<&str>) -> String {
    let mut defines = String::new();
    if let Some(extra) = output_defines {
        defines.push_str(extra);
    }
    let flag = |on: bool| if on { 1 } else { 0 };
    defines.push_str(&format!(
        "#define XBMC_texture_rectangle {}\n",
        flag(config.rectangle_texture)
    ));
    defines.push_str(&format!(
        "#define XBMC_texture_rectangle_hack {}\n",
        flag(config.rectangle_hack)
    ));
    defines.push_str(&format!("#define XBMC_STRETCH {}\n", flag(config.stretch)));

    match config.format.define_tag() {
        Some(tag) => defines.push_str(&format!("#define {}\n", tag)),
        None => error!(
            format = %config.format,
            "Unsupported shader format, no format define emitted"
        ),
    }
    defines
}

/// Common YUV -> RGB shader state
pub struct BaseYuvShader<C: GlContext> {
    program: ShaderProgram<C>,
    config: ShaderConfig,
    defines: String,
    frame: FrameUniforms,
    convert: ConvertMatrix,
    output: Option<Box<dyn OutputStage<C>>>,
    // Output stage holds resources that still need freeing
    output_live: bool,
    handles: Option<ShaderHandles<C>>,
}

impl<C: GlContext> BaseYuvShader<C> {
    /// Build the define block and load the vertex stage
    ///
    /// A source that cannot be loaded is fatal. An unsupported format is not:
    /// the shader is still built, it just has no format define.
    pub fn new(
        ctx: Arc<C>,
        loader: &dyn ShaderSourceLoader,
        config: ShaderConfig,
        output: Option<Box<dyn OutputStage<C>>>,
    ) -> ShaderResult<Self> {
        let output_defines = output.as_ref().map(|o| o.defines());
        let defines = build_defines(&config, output_defines.as_deref());

        let mut shader = Self {
            program: ShaderProgram::new(ctx),
            config,
            defines,
            frame: FrameUniforms::default(),
            convert: ConvertMatrix::new(),
            output_live: output.is_some(),
            output,
            handles: None,
        };

        shader
            .program
            .vertex_mut()
            .load_source(loader, sources::VERTEX, &shader.defines)?;
        debug!(defines = %shader.defines, "YUV shader defines");

        Ok(shader)
    }

    /// Load the pixel stage body with this shader's defines
    pub(crate) fn load_pixel_source(
        &mut self,
        loader: &dyn ShaderSourceLoader,
        name: &str,
    ) -> ShaderResult<()> {
        self.program
            .pixel_mut()
            .load_source(loader, name, &self.defines)
    }

    pub(crate) fn append_pixel_source(
        &mut self,
        loader: &dyn ShaderSourceLoader,
        name: &str,
    ) -> ShaderResult<()> {
        self.program.pixel_mut().append_source(loader, name)
    }

    pub fn ctx(&self) -> &Arc<C> {
        self.program.ctx()
    }

    pub fn program(&self) -> &ShaderProgram<C> {
        &self.program
    }

    pub(crate) fn program_mut(&mut self) -> &mut ShaderProgram<C> {
        &mut self.program
    }

    pub fn config(&self) -> &ShaderConfig {
        &self.config
    }

    pub fn format(&self) -> ShaderFormat {
        self.config.format
    }

    pub fn defines(&self) -> &str {
        &self.defines
    }

    pub fn frame(&self) -> &FrameUniforms {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut FrameUniforms {
        &mut self.frame
    }

    pub fn handles(&self) -> Option<&ShaderHandles<C>> {
        self.handles.as_ref()
    }

    pub fn convert_matrix(&self) -> &ConvertMatrix {
        &self.convert
    }

    pub fn has_output_stage(&self) -> bool {
        self.output.is_some()
    }

    /// Resolve unspecified metadata against the current texture size and
    /// hand it to the conversion matrix. Takes effect on the next activation.
    pub fn set_color_space(&mut self, params: ColorSpaceParams) {
        let resolved = params.resolve_unspecified(self.frame.width, self.frame.height);
        if resolved != params {
            debug!(
                color_space = %resolved.color_space,
                primaries = %resolved.primaries,
                width = self.frame.width,
                height = self.frame.height,
                "Guessed color metadata for untagged video"
            );
        }
        self.convert.set_color_space(resolved);
    }

    /// Cache handles for the freshly linked program
    pub fn on_linked(&mut self) {
        let Some(program) = self.program.handle() else {
            error!("YUV shader link hook called without a linked program");
            return;
        };
        let ctx: &C = self.program.ctx();
        let handles = ShaderHandles::resolve(ctx, program);
        debug!(
            matrix = handles.matrix.is_some(),
            step = handles.step.is_some(),
            stretch = handles.stretch.is_some(),
            position = ?handles.position,
            "YUV shader handles resolved"
        );
        self.handles = Some(handles);
        verify_state(ctx, "YUV shader link");

        if let Some(output) = self.output.as_mut() {
            output.on_compiled_and_linked(ctx, program);
            self.output_live = true;
        }
    }

    /// Push the current frame parameters to the bound program
    pub fn on_activated(&mut self) -> bool {
        let Some(handles) = self.handles.as_ref() else {
            error!("YUV shader activated before link");
            return false;
        };
        let ctx: &C = self.program.ctx();
        let frame = &self.frame;

        ctx.uniform_1i(handles.samp_y.as_ref(), PLANE_TEXTURE_UNITS[0] as i32);
        ctx.uniform_1i(handles.samp_u.as_ref(), PLANE_TEXTURE_UNITS[1] as i32);
        ctx.uniform_1i(handles.samp_v.as_ref(), PLANE_TEXTURE_UNITS[2] as i32);
        ctx.uniform_1f(handles.stretch.as_ref(), frame.stretch);
        ctx.uniform_2f(
            handles.step.as_ref(),
            1.0 / frame.width.max(1) as f32,
            1.0 / frame.height.max(1) as f32,
        );

        self.convert
            .set_params(frame.contrast, frame.black, !frame.convert_full_range);
        let matrix = self.convert.col_major();
        ctx.uniform_matrix4(handles.matrix.as_ref(), &matrix);
        ctx.uniform_matrix4(handles.projection.as_ref(), &frame.projection);
        ctx.uniform_matrix4(handles.model.as_ref(), &frame.model);
        ctx.uniform_1f(handles.alpha.as_ref(), frame.alpha);
        verify_state(ctx, "YUV shader enable");

        if let Some(output) = self.output.as_mut() {
            output.on_enabled(ctx);
        }
        true
    }

    pub fn on_deactivated(&mut self) {
        if let Some(output) = self.output.as_mut() {
            output.on_disabled(self.program.ctx());
        }
    }

    /// Free the output stage and the program. Repeated calls are no-ops.
    pub fn release(&mut self) {
        if self.output_live {
            if let Some(output) = self.output.as_mut() {
                output.free(self.program.ctx());
            }
            self.output_live = false;
        }
        self.handles = None;
        self.program.free();
    }
}

impl<C: GlContext> Drop for BaseYuvShader<C> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaders::FORMAT_DEFINE_TAGS;

    fn tag_count(defines: &str) -> usize {
        FORMAT_DEFINE_TAGS
            .iter()
            .filter(|tag| defines.contains(&format!("#define {}\n", tag)))
            .count()
    }

    #[test]
    fn test_one_format_tag_per_supported_format() {
        for format in ShaderFormat::ALL {
            let defines = build_defines(&ShaderConfig::new(format), None);
            let expected = if format.is_supported() { 1 } else { 0 };
            assert_eq!(tag_count(&defines), expected, "{:?}", format);
        }
    }

    #[test]
    fn test_flags() {
        let config = ShaderConfig {
            format: ShaderFormat::Yuy2,
            rectangle_texture: true,
            stretch: false,
            rectangle_hack: true,
        };
        let defines = build_defines(&config, None);
        assert!(defines.contains("#define XBMC_texture_rectangle 1\n"));
        assert!(defines.contains("#define XBMC_texture_rectangle_hack 1\n"));
        assert!(defines.contains("#define XBMC_STRETCH 0\n"));
        assert!(defines.ends_with("#define XBMC_YUY2\n"));
    }

    #[test]
    fn test_output_defines_come_first() {
        let defines = build_defines(
            &ShaderConfig::new(ShaderFormat::Nv12),
            Some("#define XBMC_DITHER 1\n"),
        );
        assert!(defines.starts_with("#define XBMC_DITHER 1\n"));
    }

    #[test]
    fn test_frame_defaults() {
        let frame = FrameUniforms::default();
        assert_eq!((frame.width, frame.height), (1, 1));
        assert_eq!(frame.contrast, 1.0);
        assert_eq!(frame.alpha, 1.0);
        assert_eq!(frame.model, IDENTITY_MATRIX);
    }
}
