// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

/// Limits applied to the dimensions declared by a container before the output
/// raster is allocated.
///
/// By default no limit is set. Use [`DecoderLimits::default_safe()`] for containers
/// from untrusted sources.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecoderLimits {
    /// Maximum total pixels allowed (width * height).
    /// Default: `None` (unlimited).
    /// Recommended safe: `1 << 28`.
    pub max_pixels: Option<usize>,
}

impl DecoderLimits {
    pub fn default_safe() -> Self {
        Self {
            max_pixels: Some(1 << 28),
        }
    }
}
