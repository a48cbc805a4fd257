// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::util::try_filled_vec;

fn num_pixels(size: (usize, usize)) -> Result<usize> {
    size.0.checked_mul(size.1).ok_or(Error::ArithmeticOverflow)
}

fn check_len(size: (usize, usize), actual: usize) -> Result<()> {
    let expected = num_pixels(size)?;
    if actual != expected {
        return Err(Error::PixelBufferSizeMismatch { expected, actual });
    }
    Ok(())
}

/// Row-major 8-bit RGB raster.
#[derive(Clone, PartialEq, Eq)]
pub struct RgbImage {
    size: (usize, usize),
    data: Vec<[u8; 3]>,
}

impl RgbImage {
    /// Black image of `size` pixels.
    pub fn new(size: (usize, usize)) -> Result<Self> {
        let data = try_filled_vec(num_pixels(size)?, [0u8; 3])?;
        Ok(Self { size, data })
    }

    pub fn from_pixels(size: (usize, usize), data: Vec<[u8; 3]>) -> Result<Self> {
        check_len(size, data.len())?;
        Ok(Self { size, data })
    }

    /// Builds an image from `r, g, b, r, g, b, ...` bytes.
    pub fn from_interleaved(size: (usize, usize), bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 3 != 0 {
            return Err(Error::PixelBufferSizeMismatch {
                expected: num_pixels(size)?.saturating_mul(3),
                actual: bytes.len(),
            });
        }
        check_len(size, bytes.len() / 3)?;
        let data = bytes
            .chunks_exact(3)
            .map(|px| [px[0], px[1], px[2]])
            .collect();
        Ok(Self { size, data })
    }

    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.data
    }

    pub fn pixels_mut(&mut self) -> &mut [[u8; 3]] {
        &mut self.data
    }

    pub fn row(&self, y: usize) -> &[[u8; 3]] {
        &self.data[y * self.size.0..(y + 1) * self.size.0]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [[u8; 3]] {
        &mut self.data[y * self.size.0..(y + 1) * self.size.0]
    }

    pub fn to_interleaved(&self) -> Vec<u8> {
        self.data.iter().flatten().copied().collect()
    }
}

impl Debug for RgbImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RgbImage {}x{}", self.size.0, self.size.1)
    }
}

/// Row-major single-channel intensity raster.
#[derive(Clone, PartialEq, Eq)]
pub struct LumaPlane {
    size: (usize, usize),
    data: Vec<u8>,
}

impl LumaPlane {
    pub fn new(size: (usize, usize), data: Vec<u8>) -> Result<Self> {
        check_len(size, data.len())?;
        Ok(Self { size, data })
    }

    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    #[inline(always)]
    pub fn sample(&self, offset: usize) -> u8 {
        self.data[offset]
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.size.0..(y + 1) * self.size.0]
    }

    /// Gray RGB image with every channel set to the plane's intensity.
    pub fn to_rgb(&self) -> RgbImage {
        RgbImage {
            size: self.size,
            data: self.data.iter().map(|&v| [v, v, v]).collect(),
        }
    }
}

impl Debug for LumaPlane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LumaPlane {}x{}", self.size.0, self.size.1)
    }
}
