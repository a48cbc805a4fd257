// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::Write;
use std::num::NonZeroUsize;

use crate::api::EncoderOptions;
use crate::block::BlockGrid;
use crate::container::write_container;
use crate::error::Result;
use crate::image::RgbImage;
use crate::plane::{PlaneExtractor, PlaneObserver};
use crate::scheduler::compress_blocks;
use crate::transform::ForwardTransform;
use crate::util::tracing_wrappers::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeSummary {
    pub grid: BlockGrid,
    /// Coefficients that did not fit in an `i8` and were saturated.
    pub saturated_coefficients: usize,
    pub bytes_written: u64,
}

pub struct Encoder {
    extractor: PlaneExtractor,
    transform: ForwardTransform,
    worker_count: NonZeroUsize,
}

impl Encoder {
    pub fn new(options: EncoderOptions) -> Self {
        Self {
            extractor: PlaneExtractor::new(options.intensity),
            transform: ForwardTransform::new(options.quant_matrix),
            worker_count: options.worker_count,
        }
    }

    pub fn encode<W: Write>(&self, image: &RgbImage, writer: W) -> Result<EncodeSummary> {
        self.encode_impl(image, writer, None)
    }

    /// Like [`Encoder::encode`], and hands the extracted intensity plane to
    /// `observer` before any block is transformed. An observer error aborts the
    /// encode before anything is written.
    pub fn encode_with_observer<W: Write>(
        &self,
        image: &RgbImage,
        writer: W,
        observer: &mut dyn PlaneObserver,
    ) -> Result<EncodeSummary> {
        self.encode_impl(image, writer, Some(observer))
    }

    fn encode_impl<W: Write>(
        &self,
        image: &RgbImage,
        mut writer: W,
        observer: Option<&mut dyn PlaneObserver>,
    ) -> Result<EncodeSummary> {
        let (grid, plane) = self.extractor.extract(image)?;
        if let Some(observer) = observer {
            observer.plane_extracted(&plane)?;
        }
        let compressed = compress_blocks(&self.transform, &plane, grid, self.worker_count)?;
        let bytes_written = write_container(&mut writer, &grid, &compressed.coefficients)?;
        writer.flush()?;
        debug!(
            bytes_written,
            saturated = compressed.saturated,
            "encoded {}x{} image",
            grid.image_size().0,
            grid.image_size().1
        );
        Ok(EncodeSummary {
            grid,
            saturated_coefficients: compressed.saturated,
            bytes_written,
        })
    }
}
