// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use array_init::array_init;

use super::CosineBasis;
use crate::block::{BLOCK_DIM, BLOCK_SIZE, BlockGrid};
use crate::image::LumaPlane;
use crate::tables::{QuantMatrix, alpha, zigzag};

/// Divides `coefficient` by `divisor` and rounds half away from zero. Results outside
/// the `i8` range saturate to `i8::MIN`/`i8::MAX`; the flag reports whether that
/// happened.
#[inline]
pub fn quantize(coefficient: f32, divisor: u32) -> (i8, bool) {
    let rounded = (coefficient / divisor as f32).round();
    if rounded > i8::MAX as f32 {
        (i8::MAX, true)
    } else if rounded < i8::MIN as f32 {
        (i8::MIN, true)
    } else {
        (rounded as i8, false)
    }
}

/// Quantized coefficients of one block, in zigzag order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantizedBlock {
    pub coefficients: [i8; BLOCK_SIZE],
    /// Number of coefficients that did not fit in an `i8` and were saturated.
    pub saturated: usize,
}

/// DCT-II, quantization and zigzag reordering of 8x8 blocks.
///
/// Holds no mutable state; a single instance is shared by all compression workers.
#[derive(Clone, Debug)]
pub struct ForwardTransform {
    basis: CosineBasis,
    quant: QuantMatrix,
}

impl ForwardTransform {
    pub fn new(quant: QuantMatrix) -> Self {
        Self {
            basis: CosineBasis::new(),
            quant,
        }
    }

    pub fn quant_matrix(&self) -> &QuantMatrix {
        &self.quant
    }

    /// Reads a block of `plane` and centers it around zero.
    pub fn load_block(
        plane: &LumaPlane,
        grid: &BlockGrid,
        block_row: usize,
        block_col: usize,
    ) -> [f32; BLOCK_SIZE] {
        array_init(|i| {
            let offset = grid.pixel_offset(block_row, block_col, i / BLOCK_DIM, i % BLOCK_DIM);
            plane.sample(offset) as f32 - 128.0
        })
    }

    /// Orthonormal 2D DCT-II of row-major `samples`. Output is row-major by
    /// (vertical, horizontal) frequency.
    pub fn dct(&self, samples: &[f32; BLOCK_SIZE]) -> [f32; BLOCK_SIZE] {
        let mut coefficients = [0.0f32; BLOCK_SIZE];
        for p in 0..BLOCK_DIM {
            for q in 0..BLOCK_DIM {
                let mut sum = 0.0;
                for m in 0..BLOCK_DIM {
                    for n in 0..BLOCK_DIM {
                        sum += samples[m * BLOCK_DIM + n]
                            * self.basis.get(m, p)
                            * self.basis.get(n, q);
                    }
                }
                coefficients[p * BLOCK_DIM + q] = alpha(p) * alpha(q) * sum;
            }
        }
        coefficients
    }

    /// Transforms centered `samples` into quantized zigzag-ordered coefficients.
    pub fn transform_block(&self, samples: &[f32; BLOCK_SIZE]) -> QuantizedBlock {
        let coefficients = self.dct(samples);
        let mut block = QuantizedBlock {
            coefficients: [0; BLOCK_SIZE],
            saturated: 0,
        };
        for (natural, &coefficient) in coefficients.iter().enumerate() {
            let (value, saturated) = quantize(coefficient, self.quant.get(natural));
            block.coefficients[zigzag(natural)] = value;
            block.saturated += saturated as usize;
        }
        block
    }
}

#[cfg(test)]
mod test {
    use arbtest::arbitrary::Unstructured;
    use test_log::test;

    use super::{ForwardTransform, quantize};
    use crate::block::{BLOCK_DIM, BLOCK_SIZE, BlockGrid};
    use crate::error::Result;
    use crate::image::LumaPlane;
    use crate::tables::QuantMatrix;
    use crate::util::test::{assert_all_almost_eq, assert_almost_eq};

    fn flat_quant() -> QuantMatrix {
        QuantMatrix::new([1; BLOCK_SIZE]).unwrap()
    }

    fn constant_block(engine: &ForwardTransform, value: u8) -> Result<super::QuantizedBlock> {
        let plane = LumaPlane::new((8, 8), vec![value; BLOCK_SIZE])?;
        let grid = BlockGrid::for_image_size((8, 8))?;
        Ok(engine.transform_block(&ForwardTransform::load_block(&plane, &grid, 0, 0)))
    }

    #[test]
    fn mid_gray_has_empty_spectrum() -> Result<()> {
        let engine = ForwardTransform::new(QuantMatrix::default());
        let block = constant_block(&engine, 128)?;
        assert_eq!(block.coefficients, [0; BLOCK_SIZE]);
        assert_eq!(block.saturated, 0);
        Ok(())
    }

    #[test]
    fn constant_block_only_has_dc() -> Result<()> {
        let engine = ForwardTransform::new(QuantMatrix::default());
        // DC = 8 * (138 - 128) = 80, divided by 16.
        let block = constant_block(&engine, 138)?;
        assert_eq!(block.coefficients[0], 5);
        assert!(block.coefficients[1..].iter().all(|&c| c == 0));
        Ok(())
    }

    #[test]
    fn vertical_ramp() {
        let engine = ForwardTransform::new(QuantMatrix::default());
        let samples: [f32; BLOCK_SIZE] = std::array::from_fn(|i| (i / BLOCK_DIM) as f32);
        let coefficients = engine.dct(&samples);
        // Only the first column of frequencies (no horizontal variation) is non-zero.
        let first_column: Vec<f32> = (0..BLOCK_DIM).map(|p| coefficients[p * BLOCK_DIM]).collect();
        let expected = [
            28.0,
            -18.2216412,
            0.0,
            -1.90481783,
            0.0,
            -0.568239222,
            0.0,
            -0.143407825,
        ];
        assert_all_almost_eq!(first_column.as_slice(), expected.as_slice(), 1e-3);
        for p in 0..BLOCK_DIM {
            for q in 1..BLOCK_DIM {
                assert_almost_eq!(coefficients[p * BLOCK_DIM + q], 0.0, 1e-3);
            }
        }
    }

    #[test]
    fn dct_preserves_energy() {
        let engine = ForwardTransform::new(QuantMatrix::default());
        arbtest::arbtest(|u: &mut Unstructured<'_>| {
            let mut samples = [0.0f32; BLOCK_SIZE];
            for s in samples.iter_mut() {
                *s = u.int_in_range(0u8..=255)? as f32 - 128.0;
            }
            let coefficients = engine.dct(&samples);
            let spatial: f32 = samples.iter().map(|s| s * s).sum();
            let spectral: f32 = coefficients.iter().map(|c| c * c).sum();
            assert_almost_eq!(spatial, spectral, spatial * 1e-4 + 1e-2);
            Ok(())
        });
    }

    #[test]
    fn quantize_rounds_half_away_from_zero() {
        assert_eq!(quantize(2.5, 1), (3, false));
        assert_eq!(quantize(-2.5, 1), (-3, false));
        assert_eq!(quantize(23.0, 10), (2, false));
        assert_eq!(quantize(-25.0, 10), (-3, false));
        assert_eq!(quantize(127.4, 1), (127, false));
        assert_eq!(quantize(-128.4, 1), (-128, false));
    }

    #[test]
    fn quantize_saturates() {
        assert_eq!(quantize(127.6, 1), (127, true));
        assert_eq!(quantize(1000.0, 2), (127, true));
        assert_eq!(quantize(-128.6, 1), (-128, true));
        assert_eq!(quantize(-5000.0, 3), (-128, true));
    }

    #[test]
    fn out_of_range_dc_is_saturated() -> Result<()> {
        let engine = ForwardTransform::new(flat_quant());
        // DC = 8 * 127 = 1016 and 8 * -128 = -1024, neither fits in an i8.
        let white = constant_block(&engine, 255)?;
        assert_eq!(white.coefficients[0], 127);
        assert_eq!(white.saturated, 1);
        assert!(white.coefficients[1..].iter().all(|&c| c == 0));
        let black = constant_block(&engine, 0)?;
        assert_eq!(black.coefficients[0], -128);
        assert_eq!(black.saturated, 1);
        Ok(())
    }

    #[test]
    fn output_is_zigzag_ordered() {
        let engine = ForwardTransform::new(flat_quant());
        // A horizontal cosine at frequency 1 lands at natural index 1, which is
        // zigzag position 1; a vertical one lands at natural index 8, zigzag
        // position 2.
        let basis = super::CosineBasis::new();
        let horizontal: [f32; BLOCK_SIZE] =
            std::array::from_fn(|i| 10.0 * basis.get(i % BLOCK_DIM, 1));
        let vertical: [f32; BLOCK_SIZE] =
            std::array::from_fn(|i| 10.0 * basis.get(i / BLOCK_DIM, 1));
        let h = engine.transform_block(&horizontal);
        let v = engine.transform_block(&vertical);
        assert!(h.coefficients[1] > 0);
        assert_eq!(h.coefficients[2], 0);
        assert!(v.coefficients[2] > 0);
        assert_eq!(v.coefficients[1], 0);
    }
}
