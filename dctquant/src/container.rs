// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The compressed file format.
//!
//! ```text
//! blocks_x: u32, native endian
//! blocks_y: u32, native endian
//! blocks_x * blocks_y blocks, row-major, 64 i8 coefficients each in zigzag order
//! ```
//!
//! The size of a well-formed file is exactly `8 + 64 * blocks_x * blocks_y` bytes.

use std::io::{self, Read, Write};

use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};

use crate::api::DecoderLimits;
use crate::block::{BLOCK_DIM, BLOCK_SIZE, BlockGrid};
use crate::error::{Error, Result};
use crate::util::tracing_wrappers::*;

pub const HEADER_SIZE: u64 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerHeader {
    pub blocks_x: u32,
    pub blocks_y: u32,
}

impl ContainerHeader {
    pub fn for_grid(grid: &BlockGrid) -> Result<Self> {
        let too_large = || {
            let (xsize, ysize) = grid.image_size();
            Error::ImageSizeTooLarge(xsize as u64, ysize as u64)
        };
        Ok(Self {
            blocks_x: grid.blocks_x().try_into().map_err(|_| too_large())?,
            blocks_y: grid.blocks_y().try_into().map_err(|_| too_large())?,
        })
    }

    pub fn read(reader: &mut impl Read) -> Result<Self> {
        let mut read_field = || {
            reader.read_u32::<NativeEndian>().map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => Error::HeaderTruncated,
                _ => Error::Io(e),
            })
        };
        let blocks_x = read_field()?;
        let blocks_y = read_field()?;
        trace!(blocks_x, blocks_y, "read container header");
        Ok(Self { blocks_x, blocks_y })
    }

    pub fn write(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_u32::<NativeEndian>(self.blocks_x)?;
        writer.write_u32::<NativeEndian>(self.blocks_y)?;
        Ok(())
    }

    pub fn num_blocks(&self) -> u64 {
        self.blocks_x as u64 * self.blocks_y as u64
    }

    /// Raster size in pixels described by the header.
    pub fn image_size(&self) -> (u64, u64) {
        (
            self.blocks_x as u64 * BLOCK_DIM as u64,
            self.blocks_y as u64 * BLOCK_DIM as u64,
        )
    }

    /// Exact size in bytes of a well-formed file with this header, saturated to
    /// `u64::MAX`.
    pub fn encoded_size(&self) -> u64 {
        self.num_blocks()
            .saturating_mul(BLOCK_SIZE as u64)
            .saturating_add(HEADER_SIZE)
    }

    /// Validates the declared grid against `limits` and the address space.
    pub fn block_grid(&self, limits: &DecoderLimits) -> Result<BlockGrid> {
        if self.num_blocks() == 0 {
            return Err(Error::EmptyBlockGrid(self.blocks_x, self.blocks_y));
        }
        let (xsize, ysize) = self.image_size();
        let too_large = || Error::ImageSizeTooLarge(xsize, ysize);
        let num_pixels = xsize.checked_mul(ysize).ok_or_else(too_large)?;
        // Every pixel is stored as three bytes once decoded.
        if num_pixels
            .checked_mul(3)
            .is_none_or(|bytes| usize::try_from(bytes).is_err())
        {
            return Err(too_large());
        }
        if limits.max_pixels.is_some_and(|max| num_pixels > max as u64) {
            return Err(too_large());
        }
        BlockGrid::for_image_size((xsize as usize, ysize as usize))
    }
}

/// Writes a header for `grid` followed by `coefficients` verbatim.
pub fn write_container(
    writer: &mut impl Write,
    grid: &BlockGrid,
    coefficients: &[i8],
) -> Result<u64> {
    debug_assert_eq!(coefficients.len(), grid.num_blocks() * BLOCK_SIZE);
    let header = ContainerHeader::for_grid(grid)?;
    header.write(writer)?;
    writer.write_all(bytemuck::cast_slice(coefficients))?;
    Ok(header.encoded_size())
}

/// Streams the blocks of a container in file order.
pub struct BlockReader<R: Read> {
    reader: R,
    header: ContainerHeader,
    grid: BlockGrid,
    next_block: usize,
}

impl<R: Read> BlockReader<R> {
    /// Reads and validates the header. No block data is consumed.
    pub fn new(mut reader: R, limits: &DecoderLimits) -> Result<Self> {
        let header = ContainerHeader::read(&mut reader)?;
        Self::with_header(reader, header, limits)
    }

    /// Like [`BlockReader::new`] for a `reader` positioned just past `header`.
    pub fn with_header(reader: R, header: ContainerHeader, limits: &DecoderLimits) -> Result<Self> {
        let grid = header.block_grid(limits)?;
        Ok(Self {
            reader,
            header,
            grid,
            next_block: 0,
        })
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    pub fn grid(&self) -> &BlockGrid {
        &self.grid
    }

    /// Reads the next block into `block` and returns its `(block_row, block_col)`,
    /// or `None` once all declared blocks have been read. A block cut short by the
    /// end of the input is an error.
    pub fn read_block(&mut self, block: &mut [i8; BLOCK_SIZE]) -> Result<Option<(usize, usize)>> {
        let num_blocks = self.grid.num_blocks();
        if self.next_block == num_blocks {
            return Ok(None);
        }
        self.reader.read_i8_into(block).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::FileTruncated {
                block: self.next_block,
                num_blocks,
            },
            _ => Error::Io(e),
        })?;
        let position = (
            self.next_block / self.grid.blocks_x(),
            self.next_block % self.grid.blocks_x(),
        );
        self.next_block += 1;
        Ok(Some(position))
    }

    /// Checks that all blocks were read and that nothing follows them.
    pub fn finish(mut self) -> Result<()> {
        let num_blocks = self.grid.num_blocks();
        if self.next_block != num_blocks {
            return Err(Error::FileTruncated {
                block: self.next_block,
                num_blocks,
            });
        }
        let mut probe = [0u8; 1];
        loop {
            match self.reader.read(&mut probe) {
                Ok(0) => return Ok(()),
                Ok(_) => return Err(Error::TrailingData(num_blocks)),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }
}
