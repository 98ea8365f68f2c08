//! Image arithmetic operations
//!
//! This module provides pixel-wise arithmetic on grayscale images:
//!
//! - Absolute difference of two images (`absolute_difference`)
//! - Sum of 2 to 5 images (`add_images`), saturating or pre-scaled
//! - Scalar addition, multiplication and division
//!
//! Every operation validates channel count and geometry before reading
//! any pixel and returns a fresh image.
//!
//! # Saturation policies
//!
//! Saturating variants clamp each result into `[0, 255]`.
//! Non-saturating scalar variants rescale the whole float result into
//! `[0, 255]` with a min-max stretch; a flat result maps to 128.

use super::{Channels, Pix};
use crate::error::{Error, Result};

/// Smallest number of images accepted by [`Pix::add_images`]
pub const MIN_ADD_IMAGES: usize = 2;

/// Largest number of images accepted by [`Pix::add_images`]
pub const MAX_ADD_IMAGES: usize = 5;

/// Value assigned to every pixel when a non-saturating scalar result is flat
pub const FLAT_RESULT_VALUE: u8 = 128;

/// Rescale `values` into `[0, target_max]` by min-max stretching.
///
/// Each output is `round((v - min) / (max - min) * target_max)`.
/// If all values are equal, every output is `flat_value`.
pub fn normalize_min_max(values: &[f64], target_max: f64, flat_value: u8) -> Vec<u8> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if values.is_empty() || max <= min {
        return vec![flat_value; values.len()];
    }
    // divide before scaling so exact halves stay exact
    let range = max - min;
    values
        .iter()
        .map(|&v| ((v - min) / range * target_max).round().clamp(0.0, 255.0) as u8)
        .collect()
}

/// Clamp a float into the 8-bit range, rounding to nearest.
#[inline]
pub fn clamp_to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

impl Pix {
    /// Absolute difference `|self - other|`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] if either image is color and
    /// [`Error::IncompatibleSizes`] if the geometries differ.
    pub fn absolute_difference(&self, other: &Pix) -> Result<Pix> {
        check_binary_operands(self, other)?;
        Ok(self.zip_samples(other, |a, b| (a as i16 - b as i16).unsigned_abs() as u8))
    }

    /// Sum of 2 to 5 grayscale images.
    ///
    /// With `saturate`, samples are summed in floating point and clamped to
    /// `[0, 255]`. Without it, each image is first min-max rescaled into
    /// `[0, 255 / n]` (integer division) independently, then summed and
    /// clamped. A flat input image rescales to all zeros.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImageCount`] for fewer than 2 or more than 5
    /// images, and the usual channel and size errors.
    pub fn add_images(images: &[Pix], saturate: bool) -> Result<Pix> {
        if !(MIN_ADD_IMAGES..=MAX_ADD_IMAGES).contains(&images.len()) {
            return Err(Error::InvalidImageCount {
                min: MIN_ADD_IMAGES,
                max: MAX_ADD_IMAGES,
                actual: images.len(),
            });
        }
        let first = &images[0];
        for pix in images {
            pix.check_gray()?;
            first.check_same_size(pix)?;
        }

        let mut sum = vec![0.0f64; first.pixel_count()];
        if saturate {
            for pix in images {
                for (acc, &v) in sum.iter_mut().zip(pix.data()) {
                    *acc += v as f64;
                }
            }
        } else {
            let max_scale_value = (255 / images.len()) as f64;
            for pix in images {
                let values: Vec<f64> = pix.data().iter().map(|&v| v as f64).collect();
                let scaled = normalize_min_max(&values, max_scale_value, 0);
                for (acc, v) in sum.iter_mut().zip(scaled) {
                    *acc += v as f64;
                }
            }
        }

        let data = sum.into_iter().map(clamp_to_u8).collect();
        Pix::from_vec(first.width(), first.height(), Channels::Gray, data)
    }

    /// Add a scalar to every pixel.
    pub fn add_scalar(&self, k: f64, saturate: bool) -> Result<Pix> {
        self.scalar_op(|v| v + k, saturate)
    }

    /// Multiply every pixel by a scalar.
    pub fn multiply_scalar(&self, k: f64, saturate: bool) -> Result<Pix> {
        self.scalar_op(|v| v * k, saturate)
    }

    /// Divide every pixel by a scalar.
    ///
    /// There is a single policy: quotients are rounded and clamped to
    /// `[0, 255]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivideByZero`] when `k == 0`, regardless of content.
    pub fn divide_scalar(&self, k: f64) -> Result<Pix> {
        if k == 0.0 {
            return Err(Error::DivideByZero);
        }
        self.scalar_op(|v| v / k, true)
    }

    fn scalar_op(&self, f: impl Fn(f64) -> f64, saturate: bool) -> Result<Pix> {
        self.check_gray()?;
        if saturate {
            return Ok(self.map_samples(|v| clamp_to_u8(f(v as f64))));
        }
        let values: Vec<f64> = self.data().iter().map(|&v| f(v as f64)).collect();
        let data = normalize_min_max(&values, 255.0, FLAT_RESULT_VALUE);
        Pix::from_vec(self.width(), self.height(), Channels::Gray, data)
    }
}

/// Validate two operands of a grayscale binary operation.
pub(crate) fn check_binary_operands(a: &Pix, b: &Pix) -> Result<()> {
    a.check_gray()?;
    b.check_gray()?;
    a.check_same_size(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(w: u32, h: u32, v: u8) -> Pix {
        Pix::new_filled(w, h, Channels::Gray, v).unwrap()
    }

    #[test]
    fn test_absolute_difference() {
        let a = Pix::from_vec(3, 1, Channels::Gray, vec![0, 200, 50]).unwrap();
        let b = Pix::from_vec(3, 1, Channels::Gray, vec![255, 100, 50]).unwrap();
        let d = a.absolute_difference(&b).unwrap();
        assert_eq!(d.data(), &[255, 100, 0]);
    }

    #[test]
    fn test_add_images_saturate() {
        let a = gray(4, 4, 200);
        let b = gray(4, 4, 200);
        let sum = Pix::add_images(&[a, b], true).unwrap();
        assert!(sum.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_add_images_prescaled() {
        let a = Pix::from_vec(2, 1, Channels::Gray, vec![0, 255]).unwrap();
        let b = Pix::from_vec(2, 1, Channels::Gray, vec![10, 20]).unwrap();
        let sum = Pix::add_images(&[a, b], false).unwrap();
        // 255 / 2 = 127 per image
        assert_eq!(sum.data(), &[0, 254]);

        // flat images rescale to zero
        let flat = Pix::add_images(&[gray(2, 2, 90), gray(2, 2, 90)], false).unwrap();
        assert!(flat.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_add_images_count() {
        let a = gray(2, 2, 1);
        assert!(matches!(
            Pix::add_images(std::slice::from_ref(&a), true),
            Err(Error::InvalidImageCount { actual: 1, .. })
        ));
        let six = vec![a.clone(); 6];
        assert!(matches!(
            Pix::add_images(&six, true),
            Err(Error::InvalidImageCount { actual: 6, .. })
        ));
        let other = gray(3, 2, 1);
        assert!(matches!(
            Pix::add_images(&[a, other], true),
            Err(Error::IncompatibleSizes(..))
        ));
    }

    #[test]
    fn test_scalar_saturating() {
        let pix = Pix::from_vec(3, 1, Channels::Gray, vec![0, 100, 250]).unwrap();
        assert_eq!(pix.add_scalar(10.0, true).unwrap().data(), &[10, 110, 255]);
        assert_eq!(pix.add_scalar(-10.0, true).unwrap().data(), &[0, 90, 240]);
        assert_eq!(pix.multiply_scalar(2.0, true).unwrap().data(), &[0, 200, 255]);
        assert_eq!(pix.divide_scalar(4.0).unwrap().data(), &[0, 25, 63]);
    }

    #[test]
    fn test_scalar_non_saturating() {
        let pix = Pix::from_vec(3, 1, Channels::Gray, vec![0, 100, 200]).unwrap();
        let out = pix.multiply_scalar(3.0, false).unwrap();
        assert_eq!(out.data(), &[0, 128, 255]);

        let flat = gray(2, 2, 7).add_scalar(1000.0, false).unwrap();
        assert!(flat.data().iter().all(|&v| v == FLAT_RESULT_VALUE));
    }

    #[test]
    fn test_divide_by_zero() {
        let pix = gray(3, 3, 42);
        assert!(matches!(pix.divide_scalar(0.0), Err(Error::DivideByZero)));
    }

    #[test]
    fn test_color_rejected() {
        let color = Pix::new(2, 2, Channels::Bgr).unwrap();
        assert!(color.add_scalar(1.0, true).is_err());
        assert!(color.absolute_difference(&color).is_err());
    }

    #[test]
    fn test_normalize_min_max() {
        assert_eq!(normalize_min_max(&[-10.0, 0.0, 10.0], 255.0, 0), vec![0, 128, 255]);
        assert_eq!(normalize_min_max(&[3.0, 3.0], 255.0, 0), vec![0, 0]);
    }

    #[test]
    fn test_normalize_min_max_half_rounds_up() {
        assert_eq!(normalize_min_max(&[0.0, 25.0, 50.0], 255.0, 0), vec![0, 128, 255]);
        // every exact half over a range of spans
        for max in 1..=600u32 {
            let values: Vec<f64> = (0..=max).map(f64::from).collect();
            let out = normalize_min_max(&values, 255.0, 0);
            for (v, &o) in out.iter().enumerate() {
                let expected = (v as f64 / max as f64 * 255.0).round() as u8;
                assert_eq!(o, expected, "v = {}, max = {}", v, max);
            }
        }
    }
}
