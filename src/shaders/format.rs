// SPDX-License-Identifier: GPL-3.0-only

//! Pixel layouts the YUV shaders know about

use serde::{Deserialize, Serialize};

/// Layout of the YUV planes bound to a shader
///
/// Exactly one format governs a shader for its entire lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShaderFormat {
    /// No planes configured yet
    None,
    /// Planar 4:2:0, 8-bit
    Yv12,
    #[serde(rename = "yv12-9")]
    Yv12_9,
    #[serde(rename = "yv12-10")]
    Yv12_10,
    #[serde(rename = "yv12-12")]
    Yv12_12,
    #[serde(rename = "yv12-14")]
    Yv12_14,
    #[serde(rename = "yv12-16")]
    Yv12_16,
    /// Semi-planar 4:2:0 (Y plane + interleaved UV plane)
    Nv12,
    /// NV12 sampled as red/green textures, handled by a dedicated shader
    Nv12Rrg,
    /// Packed 4:2:2 (Y0 U Y1 V)
    Yuy2,
    /// Packed 4:2:2 (U Y0 V Y1)
    Uyvy,
}

impl ShaderFormat {
    pub const ALL: [ShaderFormat; 11] = [
        ShaderFormat::None,
        ShaderFormat::Yv12,
        ShaderFormat::Yv12_9,
        ShaderFormat::Yv12_10,
        ShaderFormat::Yv12_12,
        ShaderFormat::Yv12_14,
        ShaderFormat::Yv12_16,
        ShaderFormat::Nv12,
        ShaderFormat::Nv12Rrg,
        ShaderFormat::Yuy2,
        ShaderFormat::Uyvy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShaderFormat::None => "none",
            ShaderFormat::Yv12 => "yv12",
            ShaderFormat::Yv12_9 => "yv12-9",
            ShaderFormat::Yv12_10 => "yv12-10",
            ShaderFormat::Yv12_12 => "yv12-12",
            ShaderFormat::Yv12_14 => "yv12-14",
            ShaderFormat::Yv12_16 => "yv12-16",
            ShaderFormat::Nv12 => "nv12",
            ShaderFormat::Nv12Rrg => "nv12-rrg",
            ShaderFormat::Yuy2 => "yuy2",
            ShaderFormat::Uyvy => "uyvy",
        }
    }

    /// Preprocessor symbol selecting the sampling path in the pixel shader
    ///
    /// `None` means this shader family cannot render the format.
    pub fn define_tag(&self) -> Option<&'static str> {
        match self {
            ShaderFormat::Yv12
            | ShaderFormat::Yv12_9
            | ShaderFormat::Yv12_10
            | ShaderFormat::Yv12_12
            | ShaderFormat::Yv12_14
            | ShaderFormat::Yv12_16 => Some("XBMC_YV12"),
            ShaderFormat::Nv12 => Some("XBMC_NV12"),
            ShaderFormat::Yuy2 => Some("XBMC_YUY2"),
            ShaderFormat::Uyvy => Some("XBMC_UYVY"),
            ShaderFormat::None | ShaderFormat::Nv12Rrg => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.define_tag().is_some()
    }

    /// Bits per sample of the planes
    pub fn bit_depth(&self) -> u32 {
        match self {
            ShaderFormat::Yv12_9 => 9,
            ShaderFormat::Yv12_10 => 10,
            ShaderFormat::Yv12_12 => 12,
            ShaderFormat::Yv12_14 => 14,
            ShaderFormat::Yv12_16 => 16,
            _ => 8,
        }
    }
}

named_enum_parsing!(ShaderFormat, "shader format");

/// Every preprocessor symbol [`ShaderFormat::define_tag`] can produce
pub const FORMAT_DEFINE_TAGS: [&str; 4] = ["XBMC_YV12", "XBMC_NV12", "XBMC_YUY2", "XBMC_UYVY"];
