//! Binary mask conversions
//!
//! A binary mask is a grayscale image whose samples are a subset of
//! {0, 1} or a subset of {0, 255}. The conversions here relabel between
//! the two domains after validating the input.

use super::Pix;
use crate::error::{Error, Result};

/// Sample domain of a binary mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskDomain {
    /// Samples in {0, 1}
    ZeroOne,
    /// Samples in {0, 255}
    ZeroFull,
}

impl MaskDomain {
    /// The foreground sample value.
    #[inline]
    pub fn foreground(self) -> u8 {
        match self {
            MaskDomain::ZeroOne => 1,
            MaskDomain::ZeroFull => 255,
        }
    }
}

impl Pix {
    /// Sorted list of the distinct sample values.
    pub fn unique_values(&self) -> Vec<u8> {
        let mut seen = [false; 256];
        for &v in self.data() {
            seen[v as usize] = true;
        }
        (0..=255u8).filter(|&v| seen[v as usize]).collect()
    }

    /// Largest sample value.
    pub fn max_value(&self) -> u8 {
        self.data().iter().copied().max().unwrap_or(0)
    }

    /// Determine the mask domain of a grayscale image.
    ///
    /// An all-zero image reports [`MaskDomain::ZeroFull`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] for color input and
    /// [`Error::InvalidMaskDomain`] if the samples are not a subset of
    /// {0, 1} or of {0, 255}.
    pub fn mask_domain(&self) -> Result<MaskDomain> {
        self.check_gray()?;
        let values = self.unique_values();
        if values.iter().all(|&v| v == 0 || v == 255) {
            Ok(MaskDomain::ZeroFull)
        } else if values.iter().all(|&v| v <= 1) {
            Ok(MaskDomain::ZeroOne)
        } else {
            Err(Error::InvalidMaskDomain(format!(
                "expected values in {{0, 1}} or {{0, 255}}, found {:?}",
                values
            )))
        }
    }

    /// Convert a 0/1 mask into a 0/255 mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMaskDomain`] if any sample is not 0 or 1.
    pub fn to_8bit_mask(&self) -> Result<Pix> {
        self.check_gray()?;
        let values = self.unique_values();
        if !values.iter().all(|&v| v <= 1) {
            return Err(Error::InvalidMaskDomain(format!(
                "expected a 0/1 mask, found {:?}",
                values
            )));
        }
        Ok(self.map_samples(|v| v * 255))
    }

    /// Convert a 0/255 mask into a 0/1 mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMaskDomain`] if any sample is not 0 or 255.
    pub fn to_binary_mask(&self) -> Result<Pix> {
        self.check_gray()?;
        let values = self.unique_values();
        if !values.iter().all(|&v| v == 0 || v == 255) {
            return Err(Error::InvalidMaskDomain(format!(
                "expected a 0/255 mask, found {:?}",
                values
            )));
        }
        Ok(self.map_samples(|v| v / 255))
    }
}
