// SPDX-License-Identifier: GPL-3.0-only

//! YCbCr to RGB conversion matrix
//!
//! The matrix maps a sampled texel `(y, u, v, 1)` straight to display RGB,
//! folding in every normalisation step so the pixel shader only does a
//! single `mat4 * vec4`:
//!
//! 1. rescale texel values when the texture is deeper than the video
//! 2. expand limited-range input (16-235 / 16-240 at 8 bits)
//! 3. YCbCr -> RGB from the stream's luma coefficients
//! 4. compress to limited-range output if the display expects it
//! 5. contrast and black level

use super::params::{Chromaticities, ColorPrimaries, ColorSpaceParams};
use nalgebra::{Matrix3, Matrix4, Vector3};

/// Builds the 4x4 color matrix uploaded on every shader activation
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertMatrix {
    params: ColorSpaceParams,
    contrast: f32,
    black: f32,
    limited_output: bool,
}

impl Default for ConvertMatrix {
    fn default() -> Self {
        Self {
            params: ColorSpaceParams::default(),
            contrast: 1.0,
            black: 0.0,
            limited_output: false,
        }
    }
}

impl ConvertMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set stream color metadata. Unspecified values must already be resolved.
    pub fn set_color_space(&mut self, params: ColorSpaceParams) {
        self.params = params;
    }

    pub fn color_space_params(&self) -> &ColorSpaceParams {
        &self.params
    }

    /// Set picture adjustments and whether the output is limited range
    pub fn set_params(&mut self, contrast: f32, black: f32, limited_output: bool) {
        self.contrast = contrast;
        self.black = black;
        self.limited_output = limited_output;
    }

    /// Complete texel -> RGB matrix
    pub fn yuv_matrix(&self) -> Matrix4<f32> {
        let m = self.adjustment_matrix()
            * self.output_range_matrix()
            * self.ycbcr_to_rgb_matrix()
            * self.input_normalisation_matrix();
        m.cast::<f32>()
    }

    /// [`Self::yuv_matrix`] flattened in column-major order, ready for upload
    pub fn col_major(&self) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        out.copy_from_slice(self.yuv_matrix().as_slice());
        out
    }

    /// Linear-light gamut matrix from source to destination primaries
    ///
    /// `None` when both sides use the same primaries.
    pub fn primaries_matrix(&self) -> Option<Matrix3<f32>> {
        let src = self.params.primaries;
        let dst = self.params.destination_primaries;
        if src == dst
            || src == ColorPrimaries::Unspecified
            || dst == ColorPrimaries::Unspecified
        {
            return None;
        }

        let src_c = src.chromaticities();
        let dst_c = dst.chromaticities();
        let to_xyz = rgb_to_xyz(&src_c)?;
        let from_xyz = rgb_to_xyz(&dst_c)?.try_inverse()?;
        let adapt = bradford_adaptation(src_c.white, dst_c.white)?;
        Some((from_xyz * adapt * to_xyz).cast::<f32>())
    }

    fn input_normalisation_matrix(&self) -> Matrix4<f64> {
        let bits = self.params.bit_depth.clamp(8, 16);
        let texture_bits = self.params.texture_bit_depth.clamp(8, 16);
        let max = ((1u32 << bits) - 1) as f64;

        // Samples sit in the low bits of a deeper texture
        let texel_scale = if texture_bits > bits {
            ((1u32 << texture_bits) - 1) as f64 / max
        } else {
            1.0
        };

        let shift = (1u32 << (bits - 8)) as f64;
        let chroma_mid = 128.0 * shift / max;
        let (luma_black, luma_range, chroma_range) = if self.params.limited_range {
            (16.0 * shift / max, 219.0 * shift / max, 224.0 * shift / max)
        } else {
            (0.0, 1.0, 1.0)
        };

        let luma_gain = texel_scale / luma_range;
        let chroma_gain = texel_scale / chroma_range;
        Matrix4::new(
            luma_gain, 0.0, 0.0, -luma_black / luma_range, //
            0.0, chroma_gain, 0.0, -chroma_mid / chroma_range, //
            0.0, 0.0, chroma_gain, -chroma_mid / chroma_range, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn ycbcr_to_rgb_matrix(&self) -> Matrix4<f64> {
        let (kr, kb) = self.params.color_space.luma_coefficients();
        let kg = 1.0 - kr - kb;
        Matrix4::new(
            1.0, 0.0, 2.0 * (1.0 - kr), 0.0, //
            1.0, -2.0 * kb * (1.0 - kb) / kg, -2.0 * kr * (1.0 - kr) / kg, 0.0, //
            1.0, 2.0 * (1.0 - kb), 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn output_range_matrix(&self) -> Matrix4<f64> {
        if !self.limited_output {
            return Matrix4::identity();
        }
        let gain = 219.0 / 255.0;
        let offset = 16.0 / 255.0;
        Matrix4::new(
            gain, 0.0, 0.0, offset, //
            0.0, gain, 0.0, offset, //
            0.0, 0.0, gain, offset, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn adjustment_matrix(&self) -> Matrix4<f64> {
        let c = self.contrast as f64;
        let b = self.black as f64;
        Matrix4::new(
            c, 0.0, 0.0, b, //
            0.0, c, 0.0, b, //
            0.0, 0.0, c, b, //
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

fn xy_to_xyz(xy: [f64; 2]) -> Vector3<f64> {
    Vector3::new(xy[0] / xy[1], 1.0, (1.0 - xy[0] - xy[1]) / xy[1])
}

fn rgb_to_xyz(c: &Chromaticities) -> Option<Matrix3<f64>> {
    let primaries = Matrix3::from_columns(&[xy_to_xyz(c.red), xy_to_xyz(c.green), xy_to_xyz(c.blue)]);
    let scale = primaries.try_inverse()? * xy_to_xyz(c.white);
    Some(primaries * Matrix3::from_diagonal(&scale))
}

fn bradford_adaptation(src_white: [f64; 2], dst_white: [f64; 2]) -> Option<Matrix3<f64>> {
    if src_white == dst_white {
        return Some(Matrix3::identity());
    }
    let bradford = Matrix3::new(
        0.8951, 0.2664, -0.1614, //
        -0.7502, 1.7135, 0.0367, //
        0.0389, -0.0685, 1.0296,
    );
    let src_cone = bradford * xy_to_xyz(src_white);
    let dst_cone = bradford * xy_to_xyz(dst_white);
    let gain = Vector3::new(
        dst_cone.x / src_cone.x,
        dst_cone.y / src_cone.y,
        dst_cone.z / src_cone.z,
    );
    Some(bradford.try_inverse()? * Matrix3::from_diagonal(&gain) * bradford)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorSpace;
    use nalgebra::Vector4;

    const EPS: f32 = 1e-4;

    fn apply(m: &ConvertMatrix, y: f32, u: f32, v: f32) -> [f32; 3] {
        let out = m.yuv_matrix() * Vector4::new(y, u, v, 1.0);
        [out.x, out.y, out.z]
    }

    fn assert_rgb(actual: [f32; 3], expected: [f32; 3]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < EPS, "got {:?}, expected {:?}", actual, expected);
        }
    }

    #[test]
    fn test_limited_range_black_and_white() {
        let m = ConvertMatrix::new();
        assert_rgb(apply(&m, 16.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0), [0.0, 0.0, 0.0]);
        assert_rgb(apply(&m, 235.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_full_range_gray_passes_through() {
        let mut m = ConvertMatrix::new();
        m.set_color_space(ColorSpaceParams {
            limited_range: false,
            ..Default::default()
        });
        let mid = 128.0 / 255.0;
        assert_rgb(apply(&m, 0.5, mid, mid), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_bt601_red() {
        let mut m = ConvertMatrix::new();
        m.set_color_space(ColorSpaceParams {
            color_space: ColorSpace::Bt470Bg,
            limited_range: false,
            ..Default::default()
        });
        // Pure red encoded with Kr=0.299, Kb=0.114
        let y = 0.299;
        let cb = -0.299 / (2.0 * (1.0 - 0.114));
        let cr = 0.5;
        let mid = 128.0 / 255.0;
        assert_rgb(apply(&m, y, cb + mid, cr + mid), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_ten_bit_in_sixteen_bit_texture() {
        let mut m = ConvertMatrix::new();
        m.set_color_space(ColorSpaceParams {
            bit_depth: 10,
            texture_bit_depth: 16,
            ..Default::default()
        });
        let texel = |v: f32| v / 65535.0;
        assert_rgb(apply(&m, texel(64.0), texel(512.0), texel(512.0)), [0.0, 0.0, 0.0]);
        assert_rgb(apply(&m, texel(940.0), texel(512.0), texel(512.0)), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_limited_output_and_adjustments() {
        let mut m = ConvertMatrix::new();
        m.set_params(1.0, 0.0, true);
        assert_rgb(apply(&m, 235.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0), [235.0 / 255.0; 3]);

        m.set_params(0.5, 0.1, false);
        assert_rgb(apply(&m, 235.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0), [0.6; 3]);
    }

    #[test]
    fn test_col_major_layout() {
        let m = ConvertMatrix::new();
        let flat = m.col_major();
        let mat = m.yuv_matrix();
        // Translation lives in the fourth column
        assert_eq!(flat[12], mat[(0, 3)]);
        assert_eq!(flat[15], 1.0);
        assert_eq!(flat[3], 0.0);
    }

    #[test]
    fn test_primaries_matrix() {
        let mut m = ConvertMatrix::new();
        assert!(m.primaries_matrix().is_none());

        m.set_color_space(ColorSpaceParams {
            primaries: ColorPrimaries::Bt2020,
            destination_primaries: ColorPrimaries::Bt709,
            ..Default::default()
        });
        let gamut = m.primaries_matrix().expect("gamut matrix");
        // White stays white when both sides share D65
        let white = gamut * Vector3::new(1.0f32, 1.0, 1.0);
        for c in white.iter() {
            assert!((c - 1.0).abs() < 1e-3);
        }
        // BT.2020 red is outside BT.709
        assert!(gamut[(0, 0)] > 1.0);
    }
}
