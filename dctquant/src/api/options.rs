// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::num::NonZeroUsize;

use crate::api::DecoderLimits;
use crate::plane::IntensityModel;
use crate::tables::QuantMatrix;

/// Number of compression threads used unless configured otherwise.
pub const DEFAULT_WORKER_COUNT: NonZeroUsize = NonZeroUsize::new(4).unwrap();

#[derive(Clone, Debug)]
pub struct EncoderOptions {
    pub quant_matrix: QuantMatrix,
    /// Number of threads, each transforming one contiguous band of block rows.
    /// The output does not depend on this value.
    pub worker_count: NonZeroUsize,
    pub intensity: IntensityModel,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            quant_matrix: QuantMatrix::default(),
            worker_count: DEFAULT_WORKER_COUNT,
            intensity: IntensityModel::default(),
        }
    }
}

/// The quantization matrix must be the one the container was encoded with; the
/// container does not record it.
#[derive(Clone, Debug, Default)]
pub struct DecoderOptions {
    pub quant_matrix: QuantMatrix,
    pub limits: DecoderLimits,
}
