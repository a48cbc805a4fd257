// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dctquant::api::{DEFAULT_WORKER_COUNT, DecoderLimits};
use dctquant::plane::IntensityModel;
use dctquant_cli::ops::{
    self, CompressJob, DecompressJob, StageFailure, load_quant_matrix, worker_count,
};

#[derive(Args)]
struct QuantArgs {
    /// JPEG-style quality factor (1-100) applied to the default luminance matrix
    #[clap(long, conflicts_with = "quant_matrix")]
    quality: Option<u32>,

    /// Text file with 64 quantization divisors in row-major order
    #[clap(long)]
    quant_matrix: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Intensity {
    /// max(r, g, b)
    Value,
    /// 0.299 r + 0.587 g + 0.114 b
    Luma,
}

#[derive(Subcommand)]
enum Command {
    /// Compresses a .png, .ppm or .pgm image
    Compress {
        input: PathBuf,
        output: PathBuf,

        #[clap(flatten)]
        quant: QuantArgs,

        /// Number of compression threads
        #[clap(long, default_value_t = DEFAULT_WORKER_COUNT.get())]
        workers: usize,

        #[clap(long, value_enum, default_value = "value")]
        intensity: Intensity,

        /// Also writes the intensity plane as a gray image
        #[clap(long)]
        grayscale_dump: Option<PathBuf>,
    },
    /// Decompresses a container into a .png, .ppm or .pgm image
    Decompress {
        input: PathBuf,
        output: PathBuf,

        #[clap(flatten)]
        quant: QuantArgs,

        /// Refuses containers declaring more pixels than this
        #[clap(long)]
        max_pixels: Option<usize>,
    },
    /// Prints the header of a container
    Info { input: PathBuf },
}

#[derive(Parser)]
#[command(version, about = "Block DCT image compressor")]
struct Opt {
    #[command(subcommand)]
    command: Command,
}

fn run(opt: Opt) -> Result<(), StageFailure> {
    match opt.command {
        Command::Compress {
            input,
            output,
            quant,
            workers,
            intensity,
            grayscale_dump,
        } => {
            let job = CompressJob {
                input,
                output,
                quant_matrix: load_quant_matrix(quant.quality, quant.quant_matrix.as_deref())?,
                worker_count: worker_count(workers)?,
                intensity: match intensity {
                    Intensity::Value => IntensityModel::Value,
                    Intensity::Luma => IntensityModel::Rec601Luma,
                },
                grayscale_dump,
            };
            let summary = ops::compress(&job)?;
            let (xsize, ysize) = summary.grid.image_size();
            println!(
                "Compressed {xsize} x {ysize} image into {} bytes",
                summary.bytes_written
            );
            if summary.saturated_coefficients > 0 {
                eprintln!(
                    "Warning: {} coefficients saturated",
                    summary.saturated_coefficients
                );
            }
        }
        Command::Decompress {
            input,
            output,
            quant,
            max_pixels,
        } => {
            let job = DecompressJob {
                input,
                output,
                quant_matrix: load_quant_matrix(quant.quality, quant.quant_matrix.as_deref())?,
                limits: DecoderLimits { max_pixels },
            };
            let (xsize, ysize) = ops::decompress(&job)?;
            println!("Decompressed {xsize} x {ysize} image");
        }
        Command::Info { input } => {
            println!("{}", ops::info(&input)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(feature = "tracing-subscriber")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(EnvFilter::from_default_env())
            .init();
    }
    if let Err(err) = color_eyre::install() {
        eprintln!("Cannot install error report handler: {err}");
    }

    let opt = Opt::parse();
    match run(opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("Error during {} stage: {:?}", failure.stage, failure.report);
            ExitCode::from(failure.stage.exit_code())
        }
    }
}
