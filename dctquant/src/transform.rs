// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Per-block 8x8 DCT engines.
//!
//! Both directions evaluate the 2D transform directly (64 multiply-accumulates per
//! output value) over a shared [`CosineBasis`].

mod cosine;
mod forward;
mod inverse;

pub use cosine::CosineBasis;
pub use forward::{ForwardTransform, QuantizedBlock, quantize};
pub use inverse::InverseTransform;
