// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::{Read, Write};

use color_eyre::eyre::{Result, WrapErr, eyre};
use dctquant::image::RgbImage;
use dctquant::plane::IntensityModel;

struct HeaderTokens<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> HeaderTokens<'a> {
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b == b'#' {
                while self.bytes.get(self.pos).is_some_and(|&b| b != b'\n') {
                    self.pos += 1;
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_number(&mut self, what: &str) -> Result<usize> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.bytes[start..self.pos])?
            .parse()
            .wrap_err_with(|| format!("invalid PNM {what}"))
    }

    /// Consumes the single whitespace byte that separates the header from the raster.
    fn end_of_header(&mut self) -> Result<&'a [u8]> {
        match self.bytes.get(self.pos) {
            Some(b) if b.is_ascii_whitespace() => Ok(&self.bytes[self.pos + 1..]),
            _ => Err(eyre!("malformed PNM header")),
        }
    }
}

/// Decodes a binary `P6` or `P5` file with a maximum value of 255. Gray samples are
/// replicated to all three channels.
pub fn decode_pnm(input: &mut impl Read) -> Result<RgbImage> {
    let mut bytes = vec![];
    input.read_to_end(&mut bytes)?;
    let channels = match bytes.get(..2) {
        Some(b"P6") => 3,
        Some(b"P5") => 1,
        _ => return Err(eyre!("not a binary PPM or PGM file")),
    };
    let mut tokens = HeaderTokens {
        bytes: &bytes,
        pos: 2,
    };
    let width = tokens.next_number("width")?;
    let height = tokens.next_number("height")?;
    let max_value = tokens.next_number("maximum value")?;
    if max_value != 255 {
        return Err(eyre!("unsupported PNM maximum value {}", max_value));
    }
    let raster = tokens.end_of_header()?;
    let len = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| eyre!("PNM too large: {}x{}", width, height))?;
    if raster.len() < len {
        return Err(eyre!(
            "PNM raster truncated: {} of {} bytes",
            raster.len(),
            len
        ));
    }
    let raster = &raster[..len];
    if channels == 3 {
        Ok(RgbImage::from_interleaved((width, height), raster)?)
    } else {
        let pixels = raster.iter().map(|&g| [g, g, g]).collect();
        Ok(RgbImage::from_pixels((width, height), pixels)?)
    }
}

pub fn encode_ppm(image: &RgbImage, output: &mut impl Write) -> Result<()> {
    write!(output, "P6\n{} {}\n255\n", image.size().0, image.size().1)?;
    output.write_all(&image.to_interleaved())?;
    Ok(())
}

pub fn encode_pgm(image: &RgbImage, output: &mut impl Write) -> Result<()> {
    write!(output, "P5\n{} {}\n255\n", image.size().0, image.size().1)?;
    let samples: Vec<u8> = image
        .pixels()
        .iter()
        .map(|&px| IntensityModel::Value.intensity(px))
        .collect();
    output.write_all(&samples)?;
    Ok(())
}
