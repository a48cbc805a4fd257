// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The `compress`, `decompress` and `info` operations, with failures tagged by the
//! stage they happened in.

use std::fmt;
use std::fs::{self, File};
use std::io::BufReader;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Report, eyre};
use dctquant::api::{
    Decoder, DecoderLimits, DecoderOptions, EncodeSummary, Encoder, EncoderOptions,
};
use dctquant::block::BlockGrid;
use dctquant::container::ContainerHeader;
use dctquant::error::{Error, ErrorKind};
use dctquant::image::LumaPlane;
use dctquant::plane::IntensityModel;
use dctquant::tables::QuantMatrix;
use dctquant::util::write_atomically;

use crate::bitmap::{BitmapFormat, read_pixels, write_pixels};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Validation,
    Read,
    Transform,
    Write,
}

impl Stage {
    /// Process exit status reported when an operation fails in this stage.
    pub fn exit_code(self) -> u8 {
        match self {
            Stage::Validation => 3,
            Stage::Read => 4,
            Stage::Transform => 5,
            Stage::Write => 6,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validation => "validation",
            Stage::Read => "read",
            Stage::Transform => "transform",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct StageFailure {
    pub stage: Stage,
    pub report: Report,
}

impl StageFailure {
    pub fn new(stage: Stage, report: impl Into<Report>) -> Self {
        Self {
            stage,
            report: report.into(),
        }
    }

    /// Tags a codec error. I/O errors are attributed to `io_stage`.
    fn from_codec(error: Error, io_stage: Stage) -> Self {
        let stage = match error.kind() {
            ErrorKind::InputValidation => Stage::Validation,
            ErrorKind::Io => io_stage,
            ErrorKind::Format => Stage::Read,
            ErrorKind::Resource => Stage::Transform,
        };
        Self::new(stage, error)
    }
}

type StageResult<T> = Result<T, StageFailure>;

/// Picks the quantization matrix from a matrix file or a quality factor; with
/// neither, the default luminance table is used.
pub fn load_quant_matrix(
    quality: Option<u32>,
    matrix_file: Option<&Path>,
) -> StageResult<QuantMatrix> {
    match (quality, matrix_file) {
        (Some(_), Some(_)) => Err(StageFailure::new(
            Stage::Validation,
            eyre!("--quality and --quant-matrix are mutually exclusive"),
        )),
        (None, Some(path)) => {
            let text = fs::read_to_string(path).map_err(|e| {
                StageFailure::new(
                    Stage::Read,
                    Report::new(e).wrap_err(format!("cannot read {}", path.display())),
                )
            })?;
            text.parse()
                .map_err(|e| StageFailure::from_codec(e, Stage::Read))
        }
        (Some(quality), None) => QuantMatrix::with_quality(quality)
            .map_err(|e| StageFailure::from_codec(e, Stage::Read)),
        (None, None) => Ok(QuantMatrix::default()),
    }
}

pub fn worker_count(workers: usize) -> StageResult<NonZeroUsize> {
    NonZeroUsize::new(workers).ok_or_else(|| {
        StageFailure::new(Stage::Validation, eyre!("worker count must be positive"))
    })
}

fn check_bitmap_path(path: &Path) -> StageResult<()> {
    BitmapFormat::from_path(path)
        .map(|_| ())
        .map_err(|e| StageFailure::new(Stage::Validation, e))
}

#[derive(Clone, Debug)]
pub struct CompressJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub quant_matrix: QuantMatrix,
    pub worker_count: NonZeroUsize,
    pub intensity: IntensityModel,
    /// Where to write the intensity plane, as a gray bitmap.
    pub grayscale_dump: Option<PathBuf>,
}

pub fn compress(job: &CompressJob) -> StageResult<EncodeSummary> {
    check_bitmap_path(&job.input)?;
    if let Some(dump) = &job.grayscale_dump {
        check_bitmap_path(dump)?;
    }
    let image = read_pixels(&job.input).map_err(|e| StageFailure::new(Stage::Read, e))?;
    BlockGrid::for_image_size(image.size())
        .map_err(|e| StageFailure::from_codec(e, Stage::Read))?;

    let encoder = Encoder::new(EncoderOptions {
        quant_matrix: job.quant_matrix.clone(),
        worker_count: job.worker_count,
        intensity: job.intensity,
    });
    let mut dump_written = false;
    let mut dump = |plane: &LumaPlane| -> dctquant::error::Result<()> {
        if let Some(path) = &job.grayscale_dump {
            write_pixels(path, &plane.to_rgb()).map_err(|e| Error::Observer(e.into()))?;
            dump_written = true;
        }
        Ok(())
    };
    let result = write_atomically(&job.output, |writer| {
        encoder.encode_with_observer(&image, writer, &mut dump)
    })
    .map_err(|e| StageFailure::from_codec(e, Stage::Write));

    // A failed compress leaves no outputs, including the dump.
    if result.is_err() && dump_written {
        if let Some(path) = &job.grayscale_dump {
            let _ = fs::remove_file(path);
        }
    }
    result
}

#[derive(Clone, Debug)]
pub struct DecompressJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub quant_matrix: QuantMatrix,
    pub limits: DecoderLimits,
}

pub fn decompress(job: &DecompressJob) -> StageResult<(usize, usize)> {
    check_bitmap_path(&job.output)?;
    let file = File::open(&job.input).map_err(|e| {
        StageFailure::new(
            Stage::Read,
            Report::new(e).wrap_err(format!("cannot open {}", job.input.display())),
        )
    })?;
    let decoder = Decoder::new(DecoderOptions {
        quant_matrix: job.quant_matrix.clone(),
        limits: job.limits.clone(),
    });
    let image = decoder
        .decode(BufReader::new(file))
        .map_err(|e| StageFailure::from_codec(e, Stage::Read))?;
    write_pixels(&job.output, &image).map_err(|e| StageFailure::new(Stage::Write, e))?;
    Ok(image.size())
}

/// What the header of a container declares, and whether the file agrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerInfo {
    pub header: ContainerHeader,
    pub file_size: u64,
}

impl ContainerInfo {
    pub fn expected_size(&self) -> u64 {
        self.header.encoded_size()
    }

    pub fn size_matches(&self) -> bool {
        self.file_size == self.expected_size()
    }
}

impl fmt::Display for ContainerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (xsize, ysize) = self.header.image_size();
        writeln!(
            f,
            "Blocks: {} x {} ({} total)",
            self.header.blocks_x,
            self.header.blocks_y,
            self.header.num_blocks()
        )?;
        writeln!(f, "Image size: {xsize} x {ysize}")?;
        write!(
            f,
            "File size: {} bytes, expected {} bytes ({})",
            self.file_size,
            self.expected_size(),
            if self.size_matches() { "ok" } else { "mismatch" }
        )
    }
}

pub fn info(input: &Path) -> StageResult<ContainerInfo> {
    let read_failure = |e: std::io::Error| {
        StageFailure::new(
            Stage::Read,
            Report::new(e).wrap_err(format!("cannot read {}", input.display())),
        )
    };
    let file = File::open(input).map_err(read_failure)?;
    let file_size = file.metadata().map_err(read_failure)?.len();
    let header = ContainerHeader::read(&mut BufReader::new(file))
        .map_err(|e| StageFailure::from_codec(e, Stage::Read))?;
    Ok(ContainerInfo { header, file_size })
}
