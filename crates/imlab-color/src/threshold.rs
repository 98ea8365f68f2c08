//! Binary thresholding
//!
//! Provides the methods for turning a grayscale image into a 0/255 mask:
//! - Fixed threshold binarization (`threshold_binary`)
//! - Level-preserving threshold (`threshold_with_levels`)
//! - Band threshold between two limits (`threshold_double`)
//! - Otsu's method (automatic threshold selection)
//! - Adaptive (local mean or Gaussian-weighted mean) thresholding

use crate::{ColorError, ColorResult};
use imlab_core::{Channels, Pix};

/// Options for adaptive thresholding
#[derive(Debug, Clone)]
pub struct AdaptiveThresholdOptions {
    /// Size of the local window; see [`AdaptiveThresholdOptions::window`]
    pub block_size: u32,
    /// Constant subtracted from the local mean
    pub c: f64,
    /// Method for computing local threshold
    pub method: AdaptiveMethod,
}

/// Method for adaptive threshold computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdaptiveMethod {
    /// Use mean of local window
    #[default]
    Mean,
    /// Use Gaussian-weighted mean
    Gaussian,
}

impl AdaptiveMethod {
    /// Stable identifier
    pub fn name(self) -> &'static str {
        match self {
            AdaptiveMethod::Mean => "mean",
            AdaptiveMethod::Gaussian => "gaussian",
        }
    }

    /// Look up a method by its identifier
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mean" => Some(AdaptiveMethod::Mean),
            "gaussian" => Some(AdaptiveMethod::Gaussian),
            _ => None,
        }
    }
}

impl AdaptiveThresholdOptions {
    /// Window size actually used: at least 3 and odd, an even size
    /// growing by one.
    pub fn window(&self) -> u32 {
        let size = self.block_size.max(3);
        if size % 2 == 0 { size + 1 } else { size }
    }
}

impl Default for AdaptiveThresholdOptions {
    fn default() -> Self {
        Self {
            block_size: 11,
            c: 2.0,
            method: AdaptiveMethod::Mean,
        }
    }
}

fn check_threshold(threshold: i32) -> ColorResult<u8> {
    u8::try_from(threshold).map_err(|_| {
        ColorError::OutOfRange(format!("threshold must be in 0..=255, got {}", threshold))
    })
}

/// Binarize: pixels `>= threshold` become 255, all others 0.
///
/// # Errors
///
/// Returns [`ColorError::OutOfRange`] if `threshold` is outside
/// `[0, 255]`, and a core shape error for color input.
pub fn threshold_binary(pix: &Pix, threshold: i32) -> ColorResult<Pix> {
    pix.check_gray()?;
    let t = check_threshold(threshold)?;
    Ok(pix.map_samples(|v| if v >= t { 255 } else { 0 }))
}

/// Like [`threshold_binary`], but passing pixels keep their value.
pub fn threshold_with_levels(pix: &Pix, threshold: i32) -> ColorResult<Pix> {
    pix.check_gray()?;
    let t = check_threshold(threshold)?;
    Ok(pix.map_samples(|v| if v >= t { v } else { 0 }))
}

/// Band threshold: pixels in `[lower, upper]` become 255, others 0.
///
/// The limits are swapped if given in reverse order.
pub fn threshold_double(pix: &Pix, lower: i32, upper: i32) -> ColorResult<Pix> {
    pix.check_gray()?;
    let mut lo = check_threshold(lower)?;
    let mut hi = check_threshold(upper)?;
    if lo > hi {
        std::mem::swap(&mut lo, &mut hi);
    }
    Ok(pix.map_samples(|v| if (lo..=hi).contains(&v) { 255 } else { 0 }))
}

/// Compute Otsu's threshold for a grayscale image.
///
/// Maximizes the between-class variance over the histogram; the first
/// maximum wins. A flat image yields 0.
pub fn compute_otsu_threshold(pix: &Pix) -> ColorResult<u8> {
    let hist = pix.gray_histogram()?;
    let scale = 1.0 / hist.pixels_num as f64;
    let mu: f64 = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64 * scale)
        .sum();

    let mut q1 = 0.0f64;
    let mut mu1 = 0.0f64;
    let mut max_sigma = 0.0f64;
    let mut max_val = 0u8;
    for (i, &c) in hist.counts.iter().enumerate() {
        let p_i = c as f64 * scale;
        mu1 *= q1;
        q1 += p_i;
        let q2 = 1.0 - q1;

        if q1.min(q2) < f32::EPSILON as f64 || q1.max(q2) > 1.0 - f32::EPSILON as f64 {
            continue;
        }

        mu1 = (mu1 + i as f64 * p_i) / q1;
        let mu2 = (mu - q1 * mu1) / q2;
        let sigma = q1 * q2 * (mu1 - mu2) * (mu1 - mu2);
        if sigma > max_sigma {
            max_sigma = sigma;
            max_val = i as u8;
        }
    }

    log::debug!("otsu threshold = {}", max_val);
    Ok(max_val)
}

/// Binarize with Otsu's threshold.
///
/// Returns the threshold and the image where pixels strictly above it
/// become 255.
pub fn threshold_otsu(pix: &Pix) -> ColorResult<(u8, Pix)> {
    let t = compute_otsu_threshold(pix)?;
    Ok((t, pix.map_samples(|v| if v > t { 255 } else { 0 })))
}

/// Apply adaptive thresholding.
///
/// A pixel becomes 255 when `v - local > -ceil(c)`, where `local` is the
/// rounded mean (or Gaussian-weighted mean) of its window with replicated
/// borders. Block sizes below 3 become 3 and even ones grow by one.
pub fn adaptive_threshold(pix: &Pix, options: &AdaptiveThresholdOptions) -> ColorResult<Pix> {
    let local = local_means(pix, options)?;
    let idelta = options.c.ceil() as i32;
    let data = pix
        .data()
        .iter()
        .zip(local.iter())
        .map(|(&v, &m)| if v as i32 - m as i32 > -idelta { 255 } else { 0 })
        .collect();
    Ok(Pix::from_vec(pix.width(), pix.height(), Channels::Gray, data)?)
}

/// Inverted adaptive thresholding.
///
/// A pixel becomes 255 when `v - local <= -floor(c)`, 0 otherwise.
pub fn adaptive_threshold_inverse(
    pix: &Pix,
    options: &AdaptiveThresholdOptions,
) -> ColorResult<Pix> {
    let local = local_means(pix, options)?;
    let idelta = options.c.floor() as i32;
    let data = pix
        .data()
        .iter()
        .zip(local.iter())
        .map(|(&v, &m)| if v as i32 - m as i32 <= -idelta { 255 } else { 0 })
        .collect();
    Ok(Pix::from_vec(pix.width(), pix.height(), Channels::Gray, data)?)
}

/// Rounded local (weighted) means with replicated borders.
fn local_means(pix: &Pix, options: &AdaptiveThresholdOptions) -> ColorResult<Vec<u8>> {
    pix.check_gray()?;
    let size = options.window();
    if size != options.block_size {
        log::debug!("adaptive threshold: block size {} used as {}", options.block_size, size);
    }

    let weights = match options.method {
        AdaptiveMethod::Mean => vec![1.0 / size as f64; size as usize],
        AdaptiveMethod::Gaussian => gaussian_weights(size),
    };

    // Separable pass: rows, then columns
    let w = pix.width() as i64;
    let h = pix.height() as i64;
    let r = (size / 2) as i64;
    let data = pix.data();
    let mut horiz = vec![0.0f64; data.len()];
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            for (k, &wt) in weights.iter().enumerate() {
                let sx = (x + k as i64 - r).clamp(0, w - 1);
                sum += wt * data[(y * w + sx) as usize] as f64;
            }
            horiz[(y * w + x) as usize] = sum;
        }
    }

    let mut out = vec![0u8; data.len()];
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            for (k, &wt) in weights.iter().enumerate() {
                let sy = (y + k as i64 - r).clamp(0, h - 1);
                sum += wt * horiz[(sy * w + x) as usize];
            }
            out[(y * w + x) as usize] = sum.round().clamp(0.0, 255.0) as u8;
        }
    }
    Ok(out)
}

/// Normalized 1-D Gaussian weights with `sigma = 0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
fn gaussian_weights(size: u32) -> Vec<f64> {
    let sigma = 0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let r = (size / 2) as i32;
    let raw: Vec<f64> = (-r..=r)
        .map(|i| (-(i * i) as f64 / (2.0 * sigma * sigma)).exp())
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|v| v / total).collect()
}
