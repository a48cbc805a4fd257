// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::error::{Error, Result};

pub const BLOCK_DIM: usize = 8;
pub const BLOCK_SIZE: usize = BLOCK_DIM * BLOCK_DIM;

/// Layout of an image as a row-major grid of 8x8 blocks.
///
/// All offset arithmetic of the codec goes through this type: pixel positions via
/// [`BlockGrid::pixel_offset`] and coefficient positions via
/// [`BlockGrid::coefficient_offset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockGrid {
    blocks_x: usize,
    blocks_y: usize,
}

impl BlockGrid {
    /// Grid covering an image of `size` pixels. Both dimensions must be non-zero
    /// multiples of [`BLOCK_DIM`].
    pub fn for_image_size(size: (usize, usize)) -> Result<Self> {
        let (xsize, ysize) = size;
        if xsize == 0 || ysize == 0 || xsize % BLOCK_DIM != 0 || ysize % BLOCK_DIM != 0 {
            return Err(Error::InvalidImageSize(xsize, ysize));
        }
        Ok(Self {
            blocks_x: xsize / BLOCK_DIM,
            blocks_y: ysize / BLOCK_DIM,
        })
    }

    pub fn blocks_x(&self) -> usize {
        self.blocks_x
    }

    pub fn blocks_y(&self) -> usize {
        self.blocks_y
    }

    pub fn num_blocks(&self) -> usize {
        self.blocks_x * self.blocks_y
    }

    pub fn image_size(&self) -> (usize, usize) {
        (self.blocks_x * BLOCK_DIM, self.blocks_y * BLOCK_DIM)
    }

    /// Position of a block in row-major block order.
    #[inline]
    pub fn block_index(&self, block_row: usize, block_col: usize) -> usize {
        debug_assert!(block_row < self.blocks_y && block_col < self.blocks_x);
        block_row * self.blocks_x + block_col
    }

    /// Offset of the first of the 64 coefficients of a block in a buffer holding all
    /// blocks of the grid. Distinct blocks never share a byte.
    #[inline]
    pub fn coefficient_offset(&self, block_row: usize, block_col: usize) -> usize {
        self.block_index(block_row, block_col) * BLOCK_SIZE
    }

    /// Offset of pixel (`inner_row`, `inner_col`) of a block in a row-major raster
    /// of [`BlockGrid::image_size`].
    #[inline]
    pub fn pixel_offset(
        &self,
        block_row: usize,
        block_col: usize,
        inner_row: usize,
        inner_col: usize,
    ) -> usize {
        debug_assert!(block_row < self.blocks_y && block_col < self.blocks_x);
        debug_assert!(inner_row < BLOCK_DIM && inner_col < BLOCK_DIM);
        let xsize = self.blocks_x * BLOCK_DIM;
        (block_row * BLOCK_DIM + inner_row) * xsize + block_col * BLOCK_DIM + inner_col
    }

    /// All block positions as `(block_row, block_col)`, in row-major order.
    pub fn blocks(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let blocks_x = self.blocks_x;
        (0..self.blocks_y).flat_map(move |row| (0..blocks_x).map(move |col| (row, col)))
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::{BLOCK_DIM, BLOCK_SIZE, BlockGrid};
    use crate::error::Result;

    #[test]
    fn rejects_unaligned_sizes() {
        assert!(BlockGrid::for_image_size((8, 12)).is_err());
        assert!(BlockGrid::for_image_size((13, 8)).is_err());
        assert!(BlockGrid::for_image_size((0, 8)).is_err());
        assert!(BlockGrid::for_image_size((8, 0)).is_err());
    }

    #[test]
    fn dimensions() -> Result<()> {
        let grid = BlockGrid::for_image_size((24, 16))?;
        assert_eq!((grid.blocks_x(), grid.blocks_y()), (3, 2));
        assert_eq!(grid.num_blocks(), 6);
        assert_eq!(grid.image_size(), (24, 16));
        Ok(())
    }

    #[test]
    fn pixel_offsets_cover_raster_once() -> Result<()> {
        let grid = BlockGrid::for_image_size((24, 16))?;
        let mut seen = vec![false; 24 * 16];
        for (row, col) in grid.blocks() {
            for y in 0..BLOCK_DIM {
                for x in 0..BLOCK_DIM {
                    let offset = grid.pixel_offset(row, col, y, x);
                    assert!(!seen[offset], "offset {offset} visited twice");
                    seen[offset] = true;
                }
            }
        }
        assert!(seen.iter().all(|&s| s));
        // Second block row, third block column, pixel (1, 2).
        assert_eq!(grid.pixel_offset(1, 2, 1, 2), (8 + 1) * 24 + 16 + 2);
        Ok(())
    }

    #[test]
    fn coefficient_offsets_are_disjoint() -> Result<()> {
        let grid = BlockGrid::for_image_size((40, 56))?;
        let offsets: HashSet<usize> = grid
            .blocks()
            .map(|(row, col)| grid.coefficient_offset(row, col))
            .collect();
        assert_eq!(offsets.len(), grid.num_blocks());
        assert!(offsets.iter().all(|o| o % BLOCK_SIZE == 0));
        assert_eq!(
            offsets.iter().max().copied(),
            Some((grid.num_blocks() - 1) * BLOCK_SIZE)
        );
        Ok(())
    }

    #[test]
    fn blocks_are_row_major() -> Result<()> {
        let grid = BlockGrid::for_image_size((16, 16))?;
        let order: Vec<_> = grid.blocks().collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        Ok(())
    }
}
