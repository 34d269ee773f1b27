// SPDX-License-Identifier: GPL-3.0-only

//! Shader-wide constants

/// Number of texels in the resampling kernel lookup texture
pub const KERNEL_SIZE: usize = 256;

/// Texture units the three YUV planes are sampled from (Y, U, V)
pub const PLANE_TEXTURE_UNITS: [u32; 3] = [0, 1, 2];

/// Texture unit reserved for the resampling kernel
pub const KERNEL_TEXTURE_UNIT: u32 = 3;

/// Texture unit sibling renderer components expect to be active
pub const DEFAULT_TEXTURE_UNIT: u32 = 0;

/// Resolution thresholds for guessing color metadata of untagged video
///
/// Anything wider than [`HD_MIN_WIDTH`] or at least [`HD_MIN_HEIGHT`] tall is
/// treated as HD (BT.709), everything else as SD (BT.470BG).
pub const HD_MIN_WIDTH: u32 = 1024;
pub const HD_MIN_HEIGHT: u32 = 600;

/// Shader source identifiers
pub mod sources {
    pub const VERTEX: &str = "gl_yuv2rgb_vertex.glsl";
    pub const PIXEL_BASIC: &str = "gl_yuv2rgb_basic.glsl";
    pub const PIXEL_FILTER4: &str = "gl_yuv2rgb_filter4.glsl";
    pub const OUTPUT: &str = "gl_output.glsl";
}

/// Uniform names resolved after link
pub mod uniforms {
    pub const SAMPLER_Y: &str = "m_sampY";
    pub const SAMPLER_U: &str = "m_sampU";
    pub const SAMPLER_V: &str = "m_sampV";
    pub const YUV_MATRIX: &str = "m_yuvmat";
    pub const STRETCH: &str = "m_stretch";
    pub const STEP: &str = "m_step";
    pub const PROJECTION: &str = "m_proj";
    pub const MODEL: &str = "m_model";
    pub const ALPHA: &str = "m_alpha";
    pub const KERNEL: &str = "m_kernelTex";
}

/// Vertex attribute names resolved after link
pub mod attributes {
    pub const POSITION: &str = "m_attrpos";
    pub const COORD_Y: &str = "m_attrcordY";
    pub const COORD_U: &str = "m_attrcordU";
    pub const COORD_V: &str = "m_attrcordV";
}

/// 4x4 identity matrix in column-major order
pub const IDENTITY_MATRIX: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];
