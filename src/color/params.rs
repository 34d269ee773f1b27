// SPDX-License-Identifier: GPL-3.0-only

//! Color metadata carried by a video stream

use crate::constants::{HD_MIN_HEIGHT, HD_MIN_WIDTH};
use serde::{Deserialize, Serialize};

/// Matrix coefficients used to encode RGB as YCbCr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    Bt709,
    Bt470Bg,
    Smpte170M,
    Smpte240M,
    Fcc,
    Bt2020Ncl,
    Bt2020Cl,
    #[default]
    Unspecified,
}

impl ColorSpace {
    pub const ALL: [ColorSpace; 8] = [
        ColorSpace::Bt709,
        ColorSpace::Bt470Bg,
        ColorSpace::Smpte170M,
        ColorSpace::Smpte240M,
        ColorSpace::Fcc,
        ColorSpace::Bt2020Ncl,
        ColorSpace::Bt2020Cl,
        ColorSpace::Unspecified,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorSpace::Bt709 => "bt709",
            ColorSpace::Bt470Bg => "bt470bg",
            ColorSpace::Smpte170M => "smpte170m",
            ColorSpace::Smpte240M => "smpte240m",
            ColorSpace::Fcc => "fcc",
            ColorSpace::Bt2020Ncl => "bt2020ncl",
            ColorSpace::Bt2020Cl => "bt2020cl",
            ColorSpace::Unspecified => "unspecified",
        }
    }

    /// Luma coefficients (Kr, Kb)
    ///
    /// Unspecified falls back to BT.709; callers are expected to resolve it
    /// with [`ColorSpaceParams::resolve_unspecified`] first.
    pub fn luma_coefficients(&self) -> (f64, f64) {
        match self {
            ColorSpace::Bt709 | ColorSpace::Unspecified => (0.2126, 0.0722),
            ColorSpace::Bt470Bg | ColorSpace::Smpte170M => (0.299, 0.114),
            ColorSpace::Smpte240M => (0.212, 0.087),
            ColorSpace::Fcc => (0.30, 0.11),
            ColorSpace::Bt2020Ncl | ColorSpace::Bt2020Cl => (0.2627, 0.0593),
        }
    }
}

/// Chromaticities of the RGB primaries a stream was mastered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPrimaries {
    Bt709,
    Bt470M,
    Bt470Bg,
    Smpte170M,
    Smpte240M,
    Film,
    Bt2020,
    #[default]
    Unspecified,
}

/// CIE 1931 xy coordinates of red, green, blue and the white point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chromaticities {
    pub red: [f64; 2],
    pub green: [f64; 2],
    pub blue: [f64; 2],
    pub white: [f64; 2],
}

const D65: [f64; 2] = [0.3127, 0.3290];
const ILLUMINANT_C: [f64; 2] = [0.310, 0.316];

impl ColorPrimaries {
    pub const ALL: [ColorPrimaries; 8] = [
        ColorPrimaries::Bt709,
        ColorPrimaries::Bt470M,
        ColorPrimaries::Bt470Bg,
        ColorPrimaries::Smpte170M,
        ColorPrimaries::Smpte240M,
        ColorPrimaries::Film,
        ColorPrimaries::Bt2020,
        ColorPrimaries::Unspecified,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorPrimaries::Bt709 => "bt709",
            ColorPrimaries::Bt470M => "bt470m",
            ColorPrimaries::Bt470Bg => "bt470bg",
            ColorPrimaries::Smpte170M => "smpte170m",
            ColorPrimaries::Smpte240M => "smpte240m",
            ColorPrimaries::Film => "film",
            ColorPrimaries::Bt2020 => "bt2020",
            ColorPrimaries::Unspecified => "unspecified",
        }
    }

    pub fn chromaticities(&self) -> Chromaticities {
        match self {
            ColorPrimaries::Bt709 | ColorPrimaries::Unspecified => Chromaticities {
                red: [0.640, 0.330],
                green: [0.300, 0.600],
                blue: [0.150, 0.060],
                white: D65,
            },
            ColorPrimaries::Bt470M => Chromaticities {
                red: [0.670, 0.330],
                green: [0.210, 0.710],
                blue: [0.140, 0.080],
                white: ILLUMINANT_C,
            },
            ColorPrimaries::Bt470Bg => Chromaticities {
                red: [0.640, 0.330],
                green: [0.290, 0.600],
                blue: [0.150, 0.060],
                white: D65,
            },
            ColorPrimaries::Smpte170M | ColorPrimaries::Smpte240M => Chromaticities {
                red: [0.630, 0.340],
                green: [0.310, 0.595],
                blue: [0.155, 0.070],
                white: D65,
            },
            ColorPrimaries::Film => Chromaticities {
                red: [0.681, 0.319],
                green: [0.243, 0.692],
                blue: [0.145, 0.049],
                white: ILLUMINANT_C,
            },
            ColorPrimaries::Bt2020 => Chromaticities {
                red: [0.708, 0.292],
                green: [0.170, 0.797],
                blue: [0.131, 0.046],
                white: D65,
            },
        }
    }
}

named_enum_parsing!(ColorSpace, "color space");
named_enum_parsing!(ColorPrimaries, "color primaries");

/// Everything the conversion matrix needs to know about a stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSpaceParams {
    pub color_space: ColorSpace,
    pub primaries: ColorPrimaries,
    /// Primaries of the display; gamut mapping happens when these differ
    pub destination_primaries: ColorPrimaries,
    /// Bits per sample in the decoded video
    pub bit_depth: u32,
    /// Bits per sample of the texture the planes were uploaded to
    pub texture_bit_depth: u32,
    pub limited_range: bool,
}

impl Default for ColorSpaceParams {
    fn default() -> Self {
        Self {
            color_space: ColorSpace::Bt709,
            primaries: ColorPrimaries::Bt709,
            destination_primaries: ColorPrimaries::Bt709,
            bit_depth: 8,
            texture_bit_depth: 8,
            limited_range: true,
        }
    }
}

/// Whether a frame of this size is assumed to be HD content
#[inline]
pub fn is_hd_resolution(width: u32, height: u32) -> bool {
    width > HD_MIN_WIDTH || height >= HD_MIN_HEIGHT
}

impl ColorSpaceParams {
    /// Replace unspecified color space and primaries with a guess based on
    /// the frame size. HD frames get BT.709, smaller ones BT.470BG.
    ///
    /// This is an approximation for untagged streams, nothing more.
    pub fn resolve_unspecified(mut self, width: u32, height: u32) -> Self {
        let hd = is_hd_resolution(width, height);
        if self.color_space == ColorSpace::Unspecified {
            self.color_space = if hd {
                ColorSpace::Bt709
            } else {
                ColorSpace::Bt470Bg
            };
        }
        if self.primaries == ColorPrimaries::Unspecified {
            self.primaries = if hd {
                ColorPrimaries::Bt709
            } else {
                ColorPrimaries::Bt470Bg
            };
        }
        self
    }
}
