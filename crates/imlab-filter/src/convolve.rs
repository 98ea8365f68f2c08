//! Convolution operations
//!
//! [`convolve`] produces a floating-point [`Plane`] of the same size as
//! the input; the public filters differ only in the kernel and in how that
//! plane is brought back to 8 bits.

use crate::{BorderPolicy, FilterError, FilterResult, Kernel, SmoothingKernel};
use imlab_core::{Channels, Pix, normalize_min_max};

/// A single-channel floating-point image
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: u32,
    height: u32,
    data: Vec<f64>,
}

impl Plane {
    /// Create a plane filled with `value`.
    pub fn new_filled(width: u32, height: u32, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major samples
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Value at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Smallest and largest sample
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Combine two planes of equal size sample by sample.
    pub(crate) fn zip_map(&self, other: &Plane, f: impl Fn(f64, f64) -> f64) -> Plane {
        Plane {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Convert by truncating toward zero, saturating at 0 and 255.
    pub fn to_pix_truncated(&self) -> FilterResult<Pix> {
        let data = self.data.iter().map(|&v| v.clamp(0.0, 255.0) as u8).collect();
        Ok(Pix::from_vec(self.width, self.height, Channels::Gray, data)?)
    }

    /// Convert by min-max stretching to `[0, 255]`; a flat plane becomes 0.
    pub fn to_pix_normalized(&self) -> FilterResult<Pix> {
        let data = normalize_min_max(&self.data, 255.0, 0);
        Ok(Pix::from_vec(self.width, self.height, Channels::Gray, data)?)
    }
}

/// Correlate a grayscale image with a kernel.
///
/// Each output sample is `sum(weight * sample) / divisor` over the window
/// centered on the pixel. With [`BorderPolicy::ResultFill`], only pixels
/// whose window lies entirely inside the image are computed; the rest keep
/// the fill value.
///
/// # Errors
///
/// Returns a core shape error for color input.
pub fn convolve(pix: &Pix, kernel: &Kernel, border: BorderPolicy) -> FilterResult<Plane> {
    pix.check_gray()?;

    let w = pix.width();
    let h = pix.height();
    let r = kernel.radius();
    let data = pix.data();

    if let BorderPolicy::ResultFill(value) = border {
        let mut out = Plane::new_filled(w, h, value as f64);
        if w <= 2 * r || h <= 2 * r {
            return Ok(out);
        }
        for y in r..h - r {
            for x in r..w - r {
                out.data[(y * w + x) as usize] = window_sum(kernel, |kx, ky| {
                    data[((y + ky - r) * w + x + kx - r) as usize]
                });
            }
        }
        return Ok(out);
    }

    let mut out = Plane::new_filled(w, h, 0.0);
    let r = r as i64;
    for y in 0..h {
        for x in 0..w {
            out.data[(y * w + x) as usize] = window_sum(kernel, |kx, ky| {
                let sx = x as i64 + kx as i64 - r;
                let sy = y as i64 + ky as i64 - r;
                border.sample(data, w, h, sx, sy).unwrap_or(0)
            });
        }
    }
    Ok(out)
}

#[inline]
fn window_sum(kernel: &Kernel, sample: impl Fn(u32, u32) -> u8) -> f64 {
    let size = kernel.size();
    let weights = kernel.weights();
    let mut sum = 0.0;
    for ky in 0..size {
        for kx in 0..size {
            let wt = weights[(ky * size + kx) as usize];
            if wt != 0.0 {
                sum += wt * sample(kx, ky) as f64;
            }
        }
    }
    sum / kernel.divisor()
}

/// Smooth with a named kernel.
///
/// The result is truncated to 8 bits without renormalization.
pub fn smoothing(pix: &Pix, kernel: SmoothingKernel, border: BorderPolicy) -> FilterResult<Pix> {
    convolve(pix, &kernel.kernel(), border)?.to_pix_truncated()
}

/// Filter with a user-supplied 3x3 kernel.
///
/// If every response lies in `[0, 255]` the result is truncated to 8 bits;
/// otherwise it is min-max stretched to the full range.
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`] unless the kernel is 3x3.
pub fn custom_mask(pix: &Pix, kernel: &Kernel, border: BorderPolicy) -> FilterResult<Pix> {
    if kernel.size() != 3 {
        return Err(FilterError::InvalidKernel(format!(
            "custom mask must be 3x3, got {0}x{0}",
            kernel.size()
        )));
    }
    let plane = convolve(pix, kernel, border)?;
    let (min, max) = plane.min_max();
    if min < 0.0 || max > 255.0 {
        plane.to_pix_normalized()
    } else {
        plane.to_pix_truncated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> Pix {
        let data = (0..w * h).map(|i| ((i % w) * 10) as u8).collect();
        Pix::from_vec(w, h, Channels::Gray, data).unwrap()
    }

    #[test]
    fn test_identity_kernel() {
        let pix = gradient(6, 4);
        let identity =
            Kernel::from_rows([[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]);
        for border in [BorderPolicy::Reflect, BorderPolicy::Constant(3)] {
            let plane = convolve(&pix, &identity, border).unwrap();
            let expected: Vec<f64> = pix.data().iter().map(|&v| v as f64).collect();
            assert_eq!(plane.data(), expected.as_slice());
        }
    }

    #[test]
    fn test_constant_border() {
        let pix = Pix::new_filled(3, 3, Channels::Gray, 10).unwrap();
        let sum = Kernel::from_rows([[1.0; 3]; 3]);
        let plane = convolve(&pix, &sum, BorderPolicy::Constant(0)).unwrap();
        assert_eq!(plane.get(1, 1), Some(90.0));
        assert_eq!(plane.get(0, 0), Some(40.0));
        assert_eq!(plane.get(1, 0), Some(60.0));

        let plane = convolve(&pix, &sum, BorderPolicy::Reflect).unwrap();
        assert!(plane.data().iter().all(|&v| v == 90.0));
    }

    #[test]
    fn test_result_fill_band() {
        let pix = Pix::new_filled(5, 4, Channels::Gray, 50).unwrap();
        let out = smoothing(&pix, SmoothingKernel::Average, BorderPolicy::ResultFill(7)).unwrap();
        for y in 0..4 {
            for x in 0..5 {
                let interior = (1..4).contains(&x) && (1..3).contains(&y);
                let expected = if interior { 50 } else { 7 };
                assert_eq!(out.get_pixel(x, y), Some(expected), "({}, {})", x, y);
            }
        }

        // too small for any interior pixel
        let tiny = Pix::new_filled(2, 2, Channels::Gray, 50).unwrap();
        let out = smoothing(&tiny, SmoothingKernel::Gaussian, BorderPolicy::ResultFill(1)).unwrap();
        assert!(out.data().iter().all(|&v| v == 1));
    }

    #[test]
    fn test_smoothing_flat_is_exact() {
        let pix = Pix::new_filled(8, 8, Channels::Gray, 199).unwrap();
        for k in SmoothingKernel::ALL {
            let out = smoothing(&pix, k, BorderPolicy::Reflect).unwrap();
            assert!(out.data().iter().all(|&v| v == 199), "{}", k);
        }
    }

    #[test]
    fn test_custom_mask_clip_or_normalize() {
        let pix = gradient(8, 3);
        let shift = Kernel::from_rows([[0.0, 0.0, 0.0], [0.0, 0.5, 0.0], [0.0, 0.0, 0.0]]);
        let out = custom_mask(&pix, &shift, BorderPolicy::Reflect).unwrap();
        assert_eq!(out.get_pixel(3, 1), Some(15));

        let negative = Kernel::from_rows([[0.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 0.0]]);
        let out = custom_mask(&pix, &negative, BorderPolicy::Reflect).unwrap();
        // -0 maps to 255 and -70 to 0
        assert_eq!(out.get_pixel(0, 0), Some(255));
        assert_eq!(out.get_pixel(7, 0), Some(0));

        let big = Kernel::new(5, vec![0.0; 25]).unwrap();
        assert!(matches!(
            custom_mask(&pix, &big, BorderPolicy::Reflect),
            Err(FilterError::InvalidKernel(_))
        ));
    }

    #[test]
    fn test_convolve_rejects_color() {
        let pix = Pix::new(4, 4, Channels::Bgr).unwrap();
        let k = SmoothingKernel::Average.kernel();
        assert!(matches!(
            convolve(&pix, &k, BorderPolicy::Reflect),
            Err(FilterError::Core(_))
        ));
    }
}
