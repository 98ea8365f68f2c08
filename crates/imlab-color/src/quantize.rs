//! Gray-level quantization

use crate::{ColorError, ColorResult};
use imlab_core::Pix;

/// Reduce a grayscale image to `levels` evenly spaced gray levels.
///
/// With `step = 256 / levels` (real division), each pixel becomes
/// `floor(v / step) * step`, clipped to `[0, 255]` and truncated to 8 bits.
///
/// # Errors
///
/// Returns [`ColorError::OutOfRange`] unless `2 <= levels <= 256`, and a
/// core shape error for color input.
pub fn posterize(pix: &Pix, levels: u32) -> ColorResult<Pix> {
    pix.check_gray()?;
    if !(2..=256).contains(&levels) {
        return Err(ColorError::OutOfRange(format!(
            "posterize levels must be in 2..=256, got {}",
            levels
        )));
    }

    let step = 256.0 / levels as f64;
    let mut lut = [0u8; 256];
    for (v, slot) in lut.iter_mut().enumerate() {
        *slot = ((v as f64 / step).floor() * step).clamp(0.0, 255.0) as u8;
    }
    Ok(pix.apply_lut(&lut))
}
