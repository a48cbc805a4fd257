// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::block::BLOCK_DIM;

#[derive(Error, Debug)]
pub enum Error {
    // Input validation errors
    #[error(
        "Invalid image size: {0}x{1}, dimensions must be non-zero multiples of {block_dim}",
        block_dim = BLOCK_DIM
    )]
    InvalidImageSize(usize, usize),
    #[error("Pixel buffer holds {actual} samples, expected {expected}")]
    PixelBufferSizeMismatch { expected: usize, actual: usize },
    #[error("Invalid quantization matrix entry {value} at index {index}, entries must be >= 1")]
    InvalidQuantEntry { index: usize, value: u32 },
    #[error("Quantization matrix has {0} entries, expected 64")]
    QuantMatrixLength(usize),
    #[error("Invalid quantization matrix token {0:?}")]
    QuantMatrixToken(String),
    #[error("Invalid quality {0}, expected a value in 1..=100")]
    InvalidQuality(u32),
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Plane observer failed: {0}")]
    Observer(Box<dyn std::error::Error + Send + Sync>),
    // Container format errors
    #[error("Container header truncated")]
    HeaderTruncated,
    #[error("Container declares an empty block grid: {0}x{1}")]
    EmptyBlockGrid(u32, u32),
    #[error("File truncated: block {block} of {num_blocks} is incomplete")]
    FileTruncated { block: usize, num_blocks: usize },
    #[error("Trailing data after the last of {0} blocks")]
    TrailingData(usize),
    #[error("Image size too large: {0}x{1}")]
    ImageSizeTooLarge(u64, u64),
    // Resource errors
    #[error("Out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),
    // Generic arithmetic overflow. Prefer using other errors if possible.
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
    #[error("Compression worker {0} panicked")]
    WorkerPanicked(usize),
}

/// Coarse classification of [`Error`], used by callers to decide how a failure is
/// reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied an image or quantization matrix the codec cannot accept.
    InputValidation,
    /// Reading or writing a file failed.
    Io,
    /// A container is malformed.
    Format,
    /// Allocation, size arithmetic or a worker thread failed.
    Resource,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidImageSize(..)
            | Error::PixelBufferSizeMismatch { .. }
            | Error::InvalidQuantEntry { .. }
            | Error::QuantMatrixLength(_)
            | Error::QuantMatrixToken(_)
            | Error::InvalidQuality(_) => ErrorKind::InputValidation,
            Error::Io(_) | Error::Observer(_) => ErrorKind::Io,
            Error::HeaderTruncated
            | Error::EmptyBlockGrid(..)
            | Error::FileTruncated { .. }
            | Error::TrailingData(_)
            | Error::ImageSizeTooLarge(..) => ErrorKind::Format,
            Error::OutOfMemory(_) | Error::ArithmeticOverflow | Error::WorkerPanicked(_) => {
                ErrorKind::Resource
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
