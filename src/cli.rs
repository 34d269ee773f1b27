// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for shader inspection
//!
//! This module provides command-line functionality for:
//! - Printing shader defines
//! - Printing the color conversion matrix
//! - Dumping resampling kernels

use serde::Serialize;
use std::path::PathBuf;
use yuv2rgb_shader::Config;
use yuv2rgb_shader::color::{ColorPrimaries, ColorSpace, ColorSpaceParams, ConvertMatrix};
use yuv2rgb_shader::shaders::{ConvolutionKernel, ScalingMethod, ShaderFormat, build_defines};

pub struct MatrixArgs {
    pub color_space: ColorSpace,
    pub primaries: ColorPrimaries,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u32,
    pub texture_bit_depth: u32,
    pub limited_range: bool,
}

#[derive(Serialize)]
struct MatrixReport {
    params: ColorSpaceParams,
    /// Column-major, as uploaded to the shader
    yuv_matrix: [f32; 16],
    /// Row-major 3x3 gamut mapping, absent when source and display agree
    primaries_matrix: Option<[[f32; 3]; 3]>,
}

#[derive(Serialize)]
struct KernelReport {
    method: String,
    size: usize,
    taps: Vec<[f32; 4]>,
}

/// Print the define block for a shader built with these options
pub fn print_defines(
    format: ShaderFormat,
    rect: bool,
    stretch: bool,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let shader = config.shader_config(format, rect, stretch);
    print!("{}", build_defines(&shader, None));
    if !format.is_supported() {
        eprintln!("warning: {} has no format define", format);
    }
    Ok(())
}

/// Print the resolved color metadata and matrices as JSON
pub fn print_matrix(args: MatrixArgs) -> Result<(), Box<dyn std::error::Error>> {
    let params = ColorSpaceParams {
        color_space: args.color_space,
        primaries: args.primaries,
        destination_primaries: ColorPrimaries::Bt709,
        bit_depth: args.bit_depth,
        texture_bit_depth: args.texture_bit_depth,
        limited_range: args.limited_range,
    }
    .resolve_unspecified(args.width, args.height);

    let mut convert = ConvertMatrix::new();
    convert.set_color_space(params);

    let primaries_matrix = convert.primaries_matrix().map(|m| {
        let mut rows = [[0.0f32; 3]; 3];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = m[(r, c)];
            }
        }
        rows
    });

    let report = MatrixReport {
        params,
        yuv_matrix: convert.col_major(),
        primaries_matrix,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Print the kernel texels for a scaling method as JSON
pub fn print_kernel(method: ScalingMethod, size: usize) -> Result<(), Box<dyn std::error::Error>> {
    let Some(kernel_method) = method.filter4_kernel() else {
        return Err(format!("{} has no 4-tap kernel", method).into());
    };
    if size == 0 {
        return Err("kernel size must be at least 1".into());
    }

    let kernel = ConvolutionKernel::new(kernel_method, size);
    let report = KernelReport {
        method: method.to_string(),
        size: kernel.size(),
        taps: (0..kernel.size()).filter_map(|i| kernel.taps(i)).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
