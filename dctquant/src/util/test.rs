// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use num_traits::Num;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::image::RgbImage;

pub fn abs_delta<T: Num + std::cmp::PartialOrd>(left_val: T, right_val: T) -> T {
    if left_val > right_val {
        left_val - right_val
    } else {
        right_val - left_val
    }
}

macro_rules! assert_almost_eq {
    ($left:expr, $right:expr, $max_error:expr $(,)?) => {
        let (left_val, right_val, max_error) = (&$left, &$right, &$max_error);
        match $crate::util::test::abs_delta(*left_val, *right_val).partial_cmp(max_error) {
            Some(std::cmp::Ordering::Greater) | None => panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n max_error: `{:?}`",
                left_val, right_val, max_error
            ),
            _ => {}
        }
    };
}
pub(crate) use assert_almost_eq;

macro_rules! assert_all_almost_eq {
    ($left:expr, $right:expr, $max_error:expr $(,)?) => {
        let (left_val, right_val, max_error) = (&$left, &$right, &$max_error);
        if left_val.len() != right_val.len() {
            panic!("assertion failed: `(left ≈ right)`\n left.len(): `{}`,\n right.len(): `{}`", left_val.len(), right_val.len());
        }
        for index in 0..left_val.len() {
            match $crate::util::test::abs_delta(left_val[index], right_val[index]).partial_cmp(max_error) {
                Some(std::cmp::Ordering::Greater) | None =>  panic!(
                    "assertion failed: `(left ≈ right)`\n left: `{:?}`,\n right: `{:?}`,\n max_error: `{:?}`,\n left[{}]: `{}`,\n right[{}]: `{}`",
                    left_val, right_val, max_error, index, left_val[index], index, right_val[index]
                ),
                _ => {}
            }
        }
    };
}
pub(crate) use assert_all_almost_eq;

/// Image with independent uniformly random channels.
pub fn random_image(size: (usize, usize), seed: u64) -> RgbImage {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    let pixels = (0..size.0 * size.1)
        .map(|_| [rng.random(), rng.random(), rng.random()])
        .collect();
    RgbImage::from_pixels(size, pixels).unwrap()
}

/// Smooth gray ramp, the kind of content the default quantization matrix is built for.
pub fn gradient_image(size: (usize, usize)) -> RgbImage {
    let mut image = RgbImage::new(size).unwrap();
    for y in 0..size.1 {
        for (x, px) in image.row_mut(y).iter_mut().enumerate() {
            let v = (64 + (x * 96) / size.0 + (y * 64) / size.1) as u8;
            *px = [v, v, v];
        }
    }
    image
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_with_floats() {
        assert_almost_eq!(1.0000001f64, 1.0000002, 0.000001);
        assert_almost_eq!(1.0, 1.1, 0.2);
    }

    #[test]
    fn test_with_integers() {
        assert_almost_eq!(100, 101, 2);
        assert_almost_eq!(500i64, 498, 3);
    }

    #[test]
    #[should_panic]
    fn test_panic_float() {
        assert_almost_eq!(1.0, 1.2, 0.1);
    }

    #[test]
    #[should_panic]
    fn test_nan_comparison() {
        assert_almost_eq!(f64::NAN, f64::NAN, 0.1);
    }

    #[test]
    fn test_all_almost_eq() {
        assert_all_almost_eq!([1.0f32, 2.0], [1.01f32, 1.99], 0.02);
    }
}
