// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::CosineBasis;
use crate::block::{BLOCK_DIM, BLOCK_SIZE, BlockGrid};
use crate::image::RgbImage;
use crate::tables::{QuantMatrix, alpha, zigzag};

/// Un-zigzag, dequantization and DCT-III of 8x8 blocks.
#[derive(Clone, Debug)]
pub struct InverseTransform {
    basis: CosineBasis,
    quant: QuantMatrix,
}

impl InverseTransform {
    pub fn new(quant: QuantMatrix) -> Self {
        Self {
            basis: CosineBasis::new(),
            quant,
        }
    }

    pub fn quant_matrix(&self) -> &QuantMatrix {
        &self.quant
    }

    /// Restores natural order and multiplies by the quantization divisors. Precision
    /// dropped by quantization is not recovered.
    pub fn dequantize(&self, block: &[i8; BLOCK_SIZE]) -> [f32; BLOCK_SIZE] {
        let mut coefficients = [0.0f32; BLOCK_SIZE];
        for (natural, coefficient) in coefficients.iter_mut().enumerate() {
            *coefficient = block[zigzag(natural)] as f32 * self.quant.get(natural) as f32;
        }
        coefficients
    }

    /// Orthonormal 2D DCT-III, the inverse of [`super::ForwardTransform::dct`].
    pub fn idct(&self, coefficients: &[f32; BLOCK_SIZE]) -> [f32; BLOCK_SIZE] {
        let mut samples = [0.0f32; BLOCK_SIZE];
        for m in 0..BLOCK_DIM {
            for n in 0..BLOCK_DIM {
                let mut sum = 0.0;
                for p in 0..BLOCK_DIM {
                    for q in 0..BLOCK_DIM {
                        sum += alpha(p)
                            * alpha(q)
                            * coefficients[p * BLOCK_DIM + q]
                            * self.basis.get(m, p)
                            * self.basis.get(n, q);
                    }
                }
                samples[m * BLOCK_DIM + n] = sum;
            }
        }
        samples
    }

    /// Turns zigzag-ordered quantized coefficients back into 8-bit intensities.
    pub fn reconstruct_block(&self, block: &[i8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        self.idct(&self.dequantize(block))
            .map(|v| (v.round() + 128.0).clamp(0.0, 255.0) as u8)
    }

    /// Writes reconstructed intensities to all three channels of a block of `image`.
    pub fn store_block(
        samples: &[u8; BLOCK_SIZE],
        grid: &BlockGrid,
        block_row: usize,
        block_col: usize,
        image: &mut RgbImage,
    ) {
        debug_assert_eq!(image.size(), grid.image_size());
        let pixels = image.pixels_mut();
        for y in 0..BLOCK_DIM {
            for x in 0..BLOCK_DIM {
                let v = samples[y * BLOCK_DIM + x];
                pixels[grid.pixel_offset(block_row, block_col, y, x)] = [v, v, v];
            }
        }
    }
}
