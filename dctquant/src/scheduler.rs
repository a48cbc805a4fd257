// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Parallel forward transform over the block grid.
//!
//! The grid is cut into contiguous bands of block rows, one per worker thread. The
//! coefficient buffer is split into matching disjoint `&mut` sub-slices before the
//! workers start, so each worker can only write the blocks of its own band and no
//! locking is needed. The threads are joined before the buffer is handed back.

use std::num::NonZeroUsize;
use std::ops::Range;
use std::thread;

use crate::block::{BLOCK_SIZE, BlockGrid};
use crate::error::{Error, Result};
use crate::image::LumaPlane;
use crate::transform::ForwardTransform;
use crate::util::tracing_wrappers::*;
use crate::util::try_filled_vec;

/// Splits `0..blocks_y` into `worker_count` contiguous ranges of
/// `blocks_y / worker_count` rows; the last range also takes the remainder. Ranges
/// are empty when there are more workers than rows.
pub fn row_bands(blocks_y: usize, worker_count: NonZeroUsize) -> Vec<Range<usize>> {
    let workers = worker_count.get();
    let rows_per_band = blocks_y / workers;
    (0..workers)
        .map(|i| {
            let start = rows_per_band * i;
            let end = if i == workers - 1 {
                blocks_y
            } else {
                rows_per_band * (i + 1)
            };
            start..end
        })
        .collect()
}

/// Quantized coefficients of a whole grid, in row-major block order.
#[derive(Debug)]
pub struct CompressedBlocks {
    pub grid: BlockGrid,
    pub coefficients: Vec<i8>,
    /// Number of coefficients saturated to the `i8` range over the whole grid.
    pub saturated: usize,
}

fn compress_band(
    engine: &ForwardTransform,
    plane: &LumaPlane,
    grid: &BlockGrid,
    rows: Range<usize>,
    band: &mut [i8],
) -> usize {
    let band_start = grid.coefficient_offset(rows.start, 0);
    let mut saturated = 0;
    for block_row in rows {
        for block_col in 0..grid.blocks_x() {
            let samples = ForwardTransform::load_block(plane, grid, block_row, block_col);
            let block = engine.transform_block(&samples);
            let offset = grid.coefficient_offset(block_row, block_col) - band_start;
            band[offset..offset + BLOCK_SIZE].copy_from_slice(&block.coefficients);
            saturated += block.saturated;
        }
    }
    saturated
}

/// Runs `engine` over every block of `plane` on `worker_count` fresh threads.
pub fn compress_blocks(
    engine: &ForwardTransform,
    plane: &LumaPlane,
    grid: BlockGrid,
    worker_count: NonZeroUsize,
) -> Result<CompressedBlocks> {
    debug_assert_eq!(plane.size(), grid.image_size());
    let len = grid
        .num_blocks()
        .checked_mul(BLOCK_SIZE)
        .ok_or(Error::ArithmeticOverflow)?;
    let mut coefficients = try_filled_vec(len, 0i8)?;
    let bands = row_bands(grid.blocks_y(), worker_count);
    debug!(
        "compressing {}x{} blocks in bands {:?}",
        grid.blocks_x(),
        grid.blocks_y(),
        bands
    );

    let band_results: Vec<(usize, thread::Result<usize>)> = thread::scope(|scope| {
        let mut rest: &mut [i8] = &mut coefficients;
        let mut handles = Vec::with_capacity(bands.len());
        for (worker, rows) in bands.into_iter().enumerate() {
            let (band, tail) =
                std::mem::take(&mut rest).split_at_mut(rows.len() * grid.blocks_x() * BLOCK_SIZE);
            rest = tail;
            if rows.is_empty() {
                continue;
            }
            handles.push((
                worker,
                scope.spawn(move || compress_band(engine, plane, &grid, rows, band)),
            ));
        }
        debug_assert!(rest.is_empty());
        handles
            .into_iter()
            .map(|(worker, handle)| (worker, handle.join()))
            .collect()
    });

    let mut saturated = 0;
    for (worker, result) in band_results {
        saturated += result.map_err(|_| Error::WorkerPanicked(worker))?;
    }
    if saturated > 0 {
        warn!("{saturated} quantized coefficients saturated to the i8 range");
    }
    Ok(CompressedBlocks {
        grid,
        coefficients,
        saturated,
    })
}
