// SPDX-License-Identifier: GPL-3.0-only

//! Resampling kernels for the 4-tap filter shader
//!
//! The kernel is sampled as a 1D RGBA32F lookup texture: texel `i` covers the
//! sub-pixel offset `x = i / size` and holds the four tap weights for the
//! source pixels at distances `-1 - x`, `-x`, `1 - x` and `2 - x`.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Video scaling methods a renderer may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalingMethod {
    Nearest,
    Linear,
    Cubic,
    Lanczos2,
    Lanczos3Fast,
    Lanczos3,
    Sinc8,
    Spline36Fast,
    Spline36,
    Bicubic,
    Auto,
}

impl ScalingMethod {
    pub const ALL: [ScalingMethod; 11] = [
        ScalingMethod::Nearest,
        ScalingMethod::Linear,
        ScalingMethod::Cubic,
        ScalingMethod::Lanczos2,
        ScalingMethod::Lanczos3Fast,
        ScalingMethod::Lanczos3,
        ScalingMethod::Sinc8,
        ScalingMethod::Spline36Fast,
        ScalingMethod::Spline36,
        ScalingMethod::Bicubic,
        ScalingMethod::Auto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScalingMethod::Nearest => "nearest",
            ScalingMethod::Linear => "linear",
            ScalingMethod::Cubic => "cubic",
            ScalingMethod::Lanczos2 => "lanczos2",
            ScalingMethod::Lanczos3Fast => "lanczos3-fast",
            ScalingMethod::Lanczos3 => "lanczos3",
            ScalingMethod::Sinc8 => "sinc8",
            ScalingMethod::Spline36Fast => "spline36-fast",
            ScalingMethod::Spline36 => "spline36",
            ScalingMethod::Bicubic => "bicubic",
            ScalingMethod::Auto => "auto",
        }
    }

    /// Kernel used by the 4-tap filter shader, if this method has one
    pub fn filter4_kernel(&self) -> Option<KernelMethod> {
        match self {
            ScalingMethod::Lanczos3Fast => Some(KernelMethod::Lanczos3Fast),
            ScalingMethod::Spline36Fast => Some(KernelMethod::Spline36Fast),
            _ => None,
        }
    }
}

named_enum_parsing!(ScalingMethod, "scaling method");

/// Kernels the 4-tap filter shader can sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KernelMethod {
    /// Fallback for unsupported scaling requests
    #[default]
    Lanczos3Fast,
    Spline36Fast,
}

impl KernelMethod {
    pub fn scaling_method(&self) -> ScalingMethod {
        match self {
            KernelMethod::Lanczos3Fast => ScalingMethod::Lanczos3Fast,
            KernelMethod::Spline36Fast => ScalingMethod::Spline36Fast,
        }
    }

    fn weight(&self, x: f64) -> f64 {
        match self {
            KernelMethod::Lanczos3Fast => lanczos_weight(x, 3.0),
            KernelMethod::Spline36Fast => spline36_weight(x),
        }
    }
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

fn lanczos_weight(x: f64, radius: f64) -> f64 {
    let ax = x.abs();
    if ax >= radius {
        0.0
    } else {
        sinc(ax) * sinc(ax / radius)
    }
}

fn spline36_weight(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 1.0 {
        ((13.0 / 11.0 * ax - 453.0 / 209.0) * ax - 3.0 / 209.0) * ax + 1.0
    } else if ax < 2.0 {
        let t = ax - 1.0;
        ((-6.0 / 11.0 * t + 270.0 / 209.0) * t - 156.0 / 209.0) * t
    } else if ax < 3.0 {
        let t = ax - 2.0;
        ((1.0 / 11.0 * t - 45.0 / 209.0) * t + 26.0 / 209.0) * t
    } else {
        0.0
    }
}

/// Tap weights for every sub-pixel offset
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionKernel {
    method: KernelMethod,
    texels: Vec<f32>,
}

impl ConvolutionKernel {
    pub fn new(method: KernelMethod, size: usize) -> Self {
        let mut texels = Vec::with_capacity(size * 4);
        for i in 0..size {
            let x = i as f64 / size as f64;
            let mut taps = [0.0f64; 4];
            for (j, tap) in taps.iter_mut().enumerate() {
                *tap = method.weight(j as f64 - 1.0 - x);
            }
            // Truncated windows don't sum to 1
            let sum: f64 = taps.iter().sum();
            texels.extend(taps.iter().map(|t| (t / sum) as f32));
        }
        Self { method, texels }
    }

    pub fn method(&self) -> KernelMethod {
        self.method
    }

    /// Number of RGBA texels
    pub fn size(&self) -> usize {
        self.texels.len() / 4
    }

    /// Flat RGBA32F texel data
    pub fn texels(&self) -> &[f32] {
        &self.texels
    }

    pub fn taps(&self, index: usize) -> Option<[f32; 4]> {
        let start = index.checked_mul(4)?;
        let slice = self.texels.get(start..start.checked_add(4)?)?;
        Some([slice[0], slice[1], slice[2], slice[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::KERNEL_SIZE;

    #[test]
    fn test_whitelist() {
        let supported: Vec<_> = ScalingMethod::ALL
            .into_iter()
            .filter(|m| m.filter4_kernel().is_some())
            .collect();
        assert_eq!(
            supported,
            vec![ScalingMethod::Lanczos3Fast, ScalingMethod::Spline36Fast]
        );
        assert_eq!(KernelMethod::default().scaling_method(), ScalingMethod::Lanczos3Fast);
    }

    #[test]
    fn test_kernel_size_and_normalisation() {
        for method in [KernelMethod::Lanczos3Fast, KernelMethod::Spline36Fast] {
            let kernel = ConvolutionKernel::new(method, KERNEL_SIZE);
            assert_eq!(kernel.size(), KERNEL_SIZE);
            assert_eq!(kernel.texels().len(), KERNEL_SIZE * 4);
            for i in 0..KERNEL_SIZE {
                let sum: f32 = kernel.taps(i).unwrap().iter().sum();
                assert!((sum - 1.0).abs() < 1e-5, "{:?} row {} sums to {}", method, i, sum);
            }
        }
    }

    #[test]
    fn test_zero_offset_is_identity() {
        // At x = 0 the second tap sits exactly on the source pixel
        for method in [KernelMethod::Lanczos3Fast, KernelMethod::Spline36Fast] {
            let taps = ConvolutionKernel::new(method, KERNEL_SIZE).taps(0).unwrap();
            assert!((taps[1] - 1.0).abs() < 1e-6);
            assert!(taps[0].abs() < 1e-6);
            assert!(taps[2].abs() < 1e-6);
        }
    }

    #[test]
    fn test_half_offset_is_symmetric() {
        let kernel = ConvolutionKernel::new(KernelMethod::Lanczos3Fast, KERNEL_SIZE);
        let taps = kernel.taps(KERNEL_SIZE / 2).unwrap();
        assert!((taps[0] - taps[3]).abs() < 1e-6);
        assert!((taps[1] - taps[2]).abs() < 1e-6);
    }

    #[test]
    fn test_taps_out_of_range() {
        let kernel = ConvolutionKernel::new(KernelMethod::Spline36Fast, 4);
        assert!(kernel.taps(4).is_none());
    }

    #[test]
    fn test_taps_near_usize_max() {
        let kernel = ConvolutionKernel::new(KernelMethod::Lanczos3Fast, KERNEL_SIZE);
        assert!(kernel.taps(usize::MAX / 4).is_none());
        assert!(kernel.taps(usize::MAX).is_none());
    }
}
