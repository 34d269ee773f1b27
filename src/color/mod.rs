// SPDX-License-Identifier: GPL-3.0-only

//! Color metadata and the YCbCr -> RGB conversion matrix

mod matrix;
mod params;

pub use matrix::ConvertMatrix;
pub use params::{Chromaticities, ColorPrimaries, ColorSpace, ColorSpaceParams, is_hd_resolution};
