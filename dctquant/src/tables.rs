// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Constant tables shared by the forward and inverse transforms.

use std::f32::consts::FRAC_1_SQRT_2;
use std::str::FromStr;

use crate::block::BLOCK_SIZE;
use crate::error::{Error, Result};

/// Position in zigzag order of each coefficient, indexed by its natural (row-major)
/// position in the 8x8 frequency grid.
pub const ZIGZAG: [usize; BLOCK_SIZE] = [
    0, 1, 5, 6, 14, 15, 27, 28, //
    2, 4, 7, 13, 16, 26, 29, 42, //
    3, 8, 12, 17, 25, 30, 41, 43, //
    9, 11, 18, 24, 31, 40, 44, 53, //
    10, 19, 23, 32, 39, 45, 52, 54, //
    20, 22, 33, 38, 46, 51, 55, 60, //
    21, 34, 37, 47, 50, 56, 59, 61, //
    35, 36, 48, 49, 57, 58, 62, 63, //
];

/// Natural position of each zigzag position. Inverse of [`ZIGZAG`].
pub const INVERSE_ZIGZAG: [usize; BLOCK_SIZE] = {
    let mut table = [0usize; BLOCK_SIZE];
    let mut i = 0;
    while i < BLOCK_SIZE {
        table[ZIGZAG[i]] = i;
        i += 1;
    }
    table
};

#[inline(always)]
pub fn zigzag(natural_index: usize) -> usize {
    ZIGZAG[natural_index]
}

#[inline(always)]
pub fn inverse_zigzag(zigzag_index: usize) -> usize {
    INVERSE_ZIGZAG[zigzag_index]
}

const ALPHA_DC: f32 = FRAC_1_SQRT_2 * 0.5;
const ALPHA_AC: f32 = 0.5;

/// Orthonormal DCT-II/DCT-III scale for frequency `index`: sqrt(1/8) for the DC
/// term, sqrt(2/8) for the others.
#[inline(always)]
pub fn alpha(index: usize) -> f32 {
    debug_assert!(index < 8);
    if index == 0 { ALPHA_DC } else { ALPHA_AC }
}

/// Luminance table of ITU-T T.81 Annex K, natural order.
pub const DEFAULT_QUANT_MATRIX: [u32; BLOCK_SIZE] = [
    16, 11, 10, 16, 24, 40, 51, 61, //
    12, 12, 14, 19, 26, 58, 60, 55, //
    14, 13, 16, 24, 40, 57, 69, 56, //
    14, 17, 22, 29, 51, 87, 80, 62, //
    18, 22, 37, 56, 68, 109, 103, 77, //
    24, 35, 55, 64, 81, 104, 113, 92, //
    49, 64, 78, 87, 103, 121, 120, 101, //
    72, 92, 95, 98, 112, 100, 103, 99, //
];

/// Quality at which [`QuantMatrix::with_quality`] returns [`DEFAULT_QUANT_MATRIX`].
pub const DEFAULT_QUALITY: u32 = 50;

/// Per-frequency quantization divisors in natural order. Every entry is at least 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantMatrix {
    entries: [u32; BLOCK_SIZE],
}

impl QuantMatrix {
    pub fn new(entries: [u32; BLOCK_SIZE]) -> Result<Self> {
        if let Some((index, &value)) = entries.iter().enumerate().find(|(_, v)| **v == 0) {
            return Err(Error::InvalidQuantEntry { index, value });
        }
        Ok(Self { entries })
    }

    /// Scales [`DEFAULT_QUANT_MATRIX`] with the IJG quality curve. Quality 50 keeps
    /// the table as is, higher values shrink the divisors towards 1, lower values
    /// grow them up to 255.
    pub fn with_quality(quality: u32) -> Result<Self> {
        if !(1..=100).contains(&quality) {
            return Err(Error::InvalidQuality(quality));
        }
        let scale = if quality < 50 {
            5000 / quality
        } else {
            200 - 2 * quality
        };
        let entries = DEFAULT_QUANT_MATRIX.map(|q| ((q * scale + 50) / 100).clamp(1, 255));
        Self::new(entries)
    }

    pub fn entries(&self) -> &[u32; BLOCK_SIZE] {
        &self.entries
    }

    /// Divisor for the coefficient at natural position `index`.
    #[inline(always)]
    pub fn get(&self, index: usize) -> u32 {
        self.entries[index]
    }
}

impl Default for QuantMatrix {
    fn default() -> Self {
        Self {
            entries: DEFAULT_QUANT_MATRIX,
        }
    }
}

/// Parses 64 integers in natural order, separated by whitespace and/or commas.
/// Text after `#` on a line is ignored.
impl FromStr for QuantMatrix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s
            .lines()
            .map(|line| line.split('#').next().unwrap_or(""))
            .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
            .filter(|token| !token.is_empty())
            .collect();
        if tokens.len() != BLOCK_SIZE {
            return Err(Error::QuantMatrixLength(tokens.len()));
        }
        let mut entries = [0u32; BLOCK_SIZE];
        for (entry, token) in entries.iter_mut().zip(tokens) {
            *entry = token
                .parse()
                .map_err(|_| Error::QuantMatrixToken(token.to_string()))?;
        }
        Self::new(entries)
    }
}
