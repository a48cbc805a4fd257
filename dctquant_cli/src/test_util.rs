// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fs;
use std::path::PathBuf;

use dctquant::image::RgbImage;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// Fresh empty directory under the system temp dir, unique per test name and process.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dctquant-cli-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Image with independent uniformly random channels.
pub fn random_image(size: (usize, usize), seed: u64) -> RgbImage {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    let pixels = (0..size.0 * size.1)
        .map(|_| [rng.random(), rng.random(), rng.random()])
        .collect();
    RgbImage::from_pixels(size, pixels).unwrap()
}
