// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::{BufRead, Seek, Write};

use color_eyre::eyre::{Result, WrapErr, eyre};
use dctquant::image::RgbImage;

/// Decodes any PNG to 8-bit RGB. Palettes are expanded, 16-bit samples are
/// truncated, gray is replicated and alpha is dropped.
pub fn decode_png<R: BufRead + Seek>(input: R) -> Result<RgbImage> {
    let mut decoder = png::Decoder::new(input);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != png::BitDepth::Eight {
        return Err(eyre!("unexpected PNG output bit depth {:?}", bit_depth));
    }
    let (width, height) = (reader.info().width as usize, reader.info().height as usize);
    let samples = color_type.samples();
    let len = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(samples))
        .ok_or_else(|| eyre!("PNG too large: {}x{}", width, height))?;
    let mut buf = vec![0u8; len];
    let frame = reader.next_frame(&mut buf)?;
    let bytes = &buf[..frame.buffer_size()];

    let pixels = match color_type {
        png::ColorType::Rgb => bytes.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect(),
        png::ColorType::Rgba => bytes.chunks_exact(4).map(|c| [c[0], c[1], c[2]]).collect(),
        png::ColorType::Grayscale => bytes.iter().map(|&g| [g, g, g]).collect(),
        png::ColorType::GrayscaleAlpha => bytes.chunks_exact(2).map(|c| [c[0], c[0], c[0]]).collect(),
        png::ColorType::Indexed => return Err(eyre!("PNG palette was not expanded")),
    };
    RgbImage::from_pixels((width, height), pixels).wrap_err("inconsistent PNG frame size")
}

pub fn encode_png<W: Write>(image: &RgbImage, output: W) -> Result<()> {
    let (width, height) = image.size();
    let mut encoder = png::Encoder::new(output, u32::try_from(width)?, u32::try_from(height)?);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Fast);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.to_interleaved())?;
    writer.finish()?;
    Ok(())
}
