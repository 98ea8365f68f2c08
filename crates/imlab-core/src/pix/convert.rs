//! Channel-layout conversion
//!
//! - [`Pix::convert_to_gray`]: luminance from B, G, R samples
//! - [`Pix::convert_to_bgr`]: replicate a gray channel into three

use super::{Channels, Pix};
use crate::error::{Error, Result};

/// Fixed-point luminance weights (scaled by 2^14) for R, G, B
const GRAY_WEIGHTS: (u32, u32, u32) = (4899, 9617, 1868);
const GRAY_SHIFT: u32 = 14;

impl Pix {
    /// Convert to a single-channel luminance image.
    ///
    /// Uses `0.299 R + 0.587 G + 0.114 B` in 14-bit fixed point with
    /// rounding. A grayscale input is returned as a cheap clone.
    pub fn convert_to_gray(&self) -> Result<Pix> {
        if self.is_gray() {
            return Ok(self.clone());
        }
        let (wr, wg, wb) = GRAY_WEIGHTS;
        let round = 1u32 << (GRAY_SHIFT - 1);
        let data: Vec<u8> = self
            .data()
            .chunks_exact(3)
            .map(|bgr| {
                let (b, g, r) = (bgr[0] as u32, bgr[1] as u32, bgr[2] as u32);
                ((r * wr + g * wg + b * wb + round) >> GRAY_SHIFT) as u8
            })
            .collect();
        Pix::from_vec(self.width(), self.height(), Channels::Gray, data)
    }

    /// Convert a grayscale image to three identical B, G, R channels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] if the image is already color.
    pub fn convert_to_bgr(&self) -> Result<Pix> {
        if !self.is_gray() {
            return Err(Error::UnsupportedChannels {
                expected: 1,
                actual: self.channels().count(),
            });
        }
        let data = self.data().iter().flat_map(|&v| [v, v, v]).collect();
        Pix::from_vec(self.width(), self.height(), Channels::Bgr, data)
    }
}
