// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use yuv2rgb_shader::color::{ColorPrimaries, ColorSpace};
use yuv2rgb_shader::shaders::{ScalingMethod, ShaderFormat};

mod cli;

#[derive(Parser)]
#[command(name = "yuv2rgb")]
#[command(about = "Inspect the YUV to RGB conversion shaders")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the preprocessor defines a shader would be compiled with
    Defines {
        /// Pixel format of the source planes
        #[arg(short, long)]
        format: ShaderFormat,

        /// Planes are rectangle textures
        #[arg(long)]
        rect: bool,

        /// Enable non-linear stretch support
        #[arg(long)]
        stretch: bool,

        /// Shader settings file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the resolved color metadata and the conversion matrix
    Matrix {
        #[arg(long, default_value = "unspecified")]
        color_space: ColorSpace,

        #[arg(long, default_value = "unspecified")]
        primaries: ColorPrimaries,

        /// Source width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Source height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Bits per sample of the video
        #[arg(long, default_value = "8")]
        bits: u32,

        /// Bits per sample of the uploaded texture (default: same as --bits)
        #[arg(long)]
        texture_bits: Option<u32>,

        /// Input is full range (0-255) instead of limited (16-235)
        #[arg(long)]
        full_range: bool,
    },

    /// Print the resampling kernel texels
    Kernel {
        #[arg(short, long, default_value = "lanczos3-fast")]
        method: ScalingMethod,

        /// Number of texels
        #[arg(short, long, default_value = "256")]
        size: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=yuv2rgb_shader=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Defines {
            format,
            rect,
            stretch,
            config,
        } => cli::print_defines(format, rect, stretch, config),
        Commands::Matrix {
            color_space,
            primaries,
            width,
            height,
            bits,
            texture_bits,
            full_range,
        } => cli::print_matrix(cli::MatrixArgs {
            color_space,
            primaries,
            width,
            height,
            bit_depth: bits,
            texture_bit_depth: texture_bits.unwrap_or(bits),
            limited_range: !full_range,
        }),
        Commands::Kernel { method, size } => cli::print_kernel(method, size),
    }
}
