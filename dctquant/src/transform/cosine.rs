// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::f64::consts::PI;

use array_init::array_init;

use crate::block::BLOCK_DIM;

/// `cos(pi * (2m + 1) * p / 16)` for spatial index `m` and frequency `p`.
#[derive(Clone, Debug, PartialEq)]
pub struct CosineBasis {
    table: [[f32; BLOCK_DIM]; BLOCK_DIM],
}

impl CosineBasis {
    pub fn new() -> Self {
        let n = BLOCK_DIM as f64;
        Self {
            table: array_init(|m| {
                array_init(|p| (PI * (2 * m + 1) as f64 * p as f64 / (2.0 * n)).cos() as f32)
            }),
        }
    }

    #[inline(always)]
    pub fn get(&self, m: usize, p: usize) -> f32 {
        self.table[m][p]
    }
}

impl Default for CosineBasis {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::CosineBasis;
    use crate::block::BLOCK_DIM;
    use crate::tables::alpha;
    use crate::util::test::assert_almost_eq;

    #[test]
    fn known_values() {
        let basis = CosineBasis::new();
        for m in 0..BLOCK_DIM {
            assert_eq!(basis.get(m, 0), 1.0);
        }
        assert_almost_eq!(basis.get(0, 1), (std::f32::consts::PI / 16.0).cos(), 1e-7);
        assert_almost_eq!(basis.get(7, 1), (15.0 * std::f32::consts::PI / 16.0).cos(), 1e-7);
        assert_almost_eq!(basis.get(1, 4), (12.0 * std::f32::consts::PI / 16.0).cos(), 1e-7);
    }

    #[test]
    fn scaled_rows_are_orthonormal() {
        let basis = CosineBasis::new();
        for p in 0..BLOCK_DIM {
            for q in 0..BLOCK_DIM {
                let dot: f32 = (0..BLOCK_DIM)
                    .map(|m| alpha(p) * basis.get(m, p) * alpha(q) * basis.get(m, q))
                    .sum();
                let expected = if p == q { 1.0 } else { 0.0 };
                assert_almost_eq!(dot, expected, 1e-6);
            }
        }
    }
}
