// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Reduction of an RGB raster to the single intensity plane the codec transforms.

use crate::block::BlockGrid;
use crate::error::Result;
use crate::image::{LumaPlane, RgbImage};
use crate::util::tracing_wrappers::*;

/// How a pixel's intensity is derived from its color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntensityModel {
    /// HSV value: the largest of the three channels.
    #[default]
    Value,
    /// ITU-R BT.601 luma, `0.299 R + 0.587 G + 0.114 B`.
    Rec601Luma,
}

impl IntensityModel {
    #[inline]
    pub fn intensity(self, [r, g, b]: [u8; 3]) -> u8 {
        match self {
            IntensityModel::Value => r.max(g).max(b),
            IntensityModel::Rec601Luma => {
                ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
            }
        }
    }
}

/// Receives the intensity plane right after extraction, before any block is
/// transformed. Used to dump the grayscale version of the input.
pub trait PlaneObserver {
    fn plane_extracted(&mut self, plane: &LumaPlane) -> Result<()>;
}

impl<F: FnMut(&LumaPlane) -> Result<()>> PlaneObserver for F {
    fn plane_extracted(&mut self, plane: &LumaPlane) -> Result<()> {
        self(plane)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PlaneExtractor {
    model: IntensityModel,
}

impl PlaneExtractor {
    pub fn new(model: IntensityModel) -> Self {
        Self { model }
    }

    /// Checks that `image` tiles into whole blocks, then converts it to an intensity
    /// plane.
    pub fn extract(&self, image: &RgbImage) -> Result<(BlockGrid, LumaPlane)> {
        let grid = BlockGrid::for_image_size(image.size())?;
        let samples = image
            .pixels()
            .iter()
            .map(|&px| self.model.intensity(px))
            .collect();
        let plane = LumaPlane::new(image.size(), samples)?;
        debug!(
            "extracted {:?} intensity plane, {}x{} blocks",
            self.model,
            grid.blocks_x(),
            grid.blocks_y()
        );
        Ok((grid, plane))
    }
}
