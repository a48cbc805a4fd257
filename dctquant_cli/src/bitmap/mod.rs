// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Reading and writing of pixel rasters, selected by file extension.

pub mod png;
pub mod pnm;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, eyre};
use dctquant::image::RgbImage;
use dctquant::util::write_atomically;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitmapFormat {
    Png,
    /// Binary RGB, `P6`.
    Ppm,
    /// Binary grayscale, `P5`.
    Pgm,
}

impl BitmapFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("png") => Ok(BitmapFormat::Png),
            Some("ppm") => Ok(BitmapFormat::Ppm),
            Some("pgm") => Ok(BitmapFormat::Pgm),
            _ => Err(eyre!(
                "unsupported bitmap format for {}, expected .png, .ppm or .pgm",
                path.display()
            )),
        }
    }
}

pub fn read_pixels(path: &Path) -> Result<RgbImage> {
    let format = BitmapFormat::from_path(path)?;
    let file = File::open(path).wrap_err_with(|| format!("cannot open {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let image = match format {
        BitmapFormat::Png => self::png::decode_png(reader),
        BitmapFormat::Ppm | BitmapFormat::Pgm => pnm::decode_pnm(&mut reader),
    };
    image.wrap_err_with(|| format!("cannot decode {}", path.display()))
}

/// Writes `image` to `path`. Gray output keeps the HSV value of each pixel.
pub fn write_pixels(path: &Path, image: &RgbImage) -> Result<()> {
    let format = BitmapFormat::from_path(path)?;
    write_atomically(path, |writer| match format {
        BitmapFormat::Png => self::png::encode_png(image, writer),
        BitmapFormat::Ppm => pnm::encode_ppm(image, writer),
        BitmapFormat::Pgm => pnm::encode_pgm(image, writer),
    })
    .wrap_err_with(|| format!("cannot write {}", path.display()))
}

#[cfg(test)]
mod test {
    use std::fs;
    use std::path::Path;

    use dctquant::image::RgbImage;

    use super::{BitmapFormat, read_pixels, write_pixels};
    use crate::test_util::{random_image, scratch_dir};

    #[test]
    fn format_from_extension() {
        assert_eq!(
            BitmapFormat::from_path(Path::new("a/b.PNG")).unwrap(),
            BitmapFormat::Png
        );
        assert_eq!(
            BitmapFormat::from_path(Path::new("x.ppm")).unwrap(),
            BitmapFormat::Ppm
        );
        assert_eq!(
            BitmapFormat::from_path(Path::new("x.pgm")).unwrap(),
            BitmapFormat::Pgm
        );
        assert!(BitmapFormat::from_path(Path::new("x.bmp")).is_err());
        assert!(BitmapFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn color_files_round_trip() {
        let dir = scratch_dir("color");
        let image = random_image((24, 16), 7);
        for name in ["image.png", "image.ppm"] {
            let path = dir.join(name);
            write_pixels(&path, &image).unwrap();
            assert_eq!(read_pixels(&path).unwrap(), image, "{name}");
        }
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn gray_file_keeps_value() {
        let dir = scratch_dir("gray");
        let path = dir.join("gray.pgm");
        let image = RgbImage::from_pixels((2, 1), vec![[10, 200, 30], [7, 7, 7]]).unwrap();
        write_pixels(&path, &image).unwrap();
        let gray = read_pixels(&path).unwrap();
        assert_eq!(gray.pixels(), &[[200, 200, 200], [7, 7, 7]]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file() {
        assert!(read_pixels(Path::new("/nonexistent/dir/image.png")).is_err());
    }
}
