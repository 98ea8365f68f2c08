//! Per-pixel point operations

use super::Pix;
use crate::error::Result;

impl Pix {
    /// Photographic negative: `255 - v` for every pixel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedChannels`] for color input.
    pub fn negate(&self) -> Result<Pix> {
        self.check_gray()?;
        Ok(self.map_samples(|v| 255 - v))
    }
}
