// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! A block-based DCT image codec.
//!
//! Images are reduced to a single intensity plane, split into 8x8 blocks, transformed
//! with a DCT-II, quantized, reordered in zigzag order and stored in a small container:
//! two native-endian `u32` block counts followed by 64 signed bytes per block.
//! Compression runs on a fixed number of worker threads, decompression is sequential.

#![deny(unsafe_code)]
pub mod api;
pub mod block;
pub mod container;
pub mod error;
pub mod image;
pub mod plane;
pub mod scheduler;
pub mod tables;
pub mod transform;
pub mod util;
