// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::Read;

use crate::api::{DecoderLimits, DecoderOptions};
use crate::block::BLOCK_SIZE;
use crate::container::{BlockReader, ContainerHeader, HEADER_SIZE};
use crate::error::{Error, Result};
use crate::image::RgbImage;
use crate::transform::InverseTransform;
use crate::util::tracing_wrappers::*;

pub struct Decoder {
    transform: InverseTransform,
    limits: DecoderLimits,
}

impl Decoder {
    pub fn new(options: DecoderOptions) -> Self {
        Self {
            transform: InverseTransform::new(options.quant_matrix),
            limits: options.limits,
        }
    }

    /// Decodes a whole container into a gray RGB image. Blocks are processed one at
    /// a time in file order. Fails if the input holds fewer or more bytes than the
    /// header declares.
    ///
    /// The block data is read before the output raster is allocated, so a short
    /// input claiming a large grid fails with [`Error::FileTruncated`] without
    /// allocating for the claimed size.
    pub fn decode<R: Read>(&self, mut reader: R) -> Result<RgbImage> {
        let header = ContainerHeader::read(&mut reader)?;
        let grid = header.block_grid(&self.limits)?;
        let body_len = header.encoded_size() - HEADER_SIZE;
        let mut body = Vec::new();
        (&mut reader).take(body_len).read_to_end(&mut body)?;
        if (body.len() as u64) < body_len {
            return Err(Error::FileTruncated {
                block: body.len() / BLOCK_SIZE,
                num_blocks: grid.num_blocks(),
            });
        }

        let mut blocks =
            BlockReader::with_header(body.as_slice().chain(reader), header, &self.limits)?;
        let mut image = RgbImage::new(grid.image_size())?;
        let mut block = [0i8; BLOCK_SIZE];
        while let Some((block_row, block_col)) = blocks.read_block(&mut block)? {
            let samples = self.transform.reconstruct_block(&block);
            InverseTransform::store_block(&samples, &grid, block_row, block_col, &mut image);
        }
        blocks.finish()?;
        debug!(
            "decoded {}x{} blocks",
            grid.blocks_x(),
            grid.blocks_y()
        );
        Ok(image)
    }
}
