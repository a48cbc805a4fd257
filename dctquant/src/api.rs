// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Whole-image compression and decompression.
//!
//! ```
//! use dctquant::api::{Decoder, DecoderOptions, Encoder, EncoderOptions};
//! use dctquant::image::RgbImage;
//!
//! let image = RgbImage::from_pixels((16, 8), vec![[128, 128, 128]; 16 * 8])?;
//! let mut container = Vec::new();
//! let summary = Encoder::new(EncoderOptions::default()).encode(&image, &mut container)?;
//! assert_eq!(summary.bytes_written, 8 + 2 * 64);
//!
//! let decoded = Decoder::new(DecoderOptions::default()).decode(container.as_slice())?;
//! assert_eq!(decoded, image);
//! # Ok::<(), dctquant::error::Error>(())
//! ```

mod decoder;
mod encoder;
mod limits;
mod options;

pub use decoder::*;
pub use encoder::*;
pub use limits::*;
pub use options::*;
