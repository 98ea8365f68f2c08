//! PIX - The pixel buffer
//!
//! The `Pix` structure is the image type every imlab operation consumes
//! and produces.
//!
//! # Pixel layout
//!
//! - One unsigned 8-bit sample per channel
//! - Dense row-major storage, no row padding
//! - Grayscale images have one channel
//! - Color images have three interleaved channels in B, G, R order
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for efficient cloning (shared ownership) and is never
//! mutated in place by an operation. To build or modify pixel data,
//! convert to `PixMut` via [`Pix::try_into_mut`] or [`Pix::to_mut`],
//! then convert back with `Into<Pix>`.

mod access;
pub mod arith;
pub mod convert;
pub mod histogram;
pub mod mask;
pub mod point;
pub mod rop;

pub use histogram::{Histogram, HistogramResult};

use crate::error::{Error, Result};
use std::sync::Arc;

/// Number of interleaved channels per pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Channels {
    /// Single-channel grayscale
    #[default]
    Gray = 1,
    /// Three-channel color, stored B, G, R
    Bgr = 3,
}

impl Channels {
    /// Create from a channel count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] for anything but 1 or 3.
    pub fn from_count(count: u32) -> Result<Self> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Bgr),
            _ => Err(Error::UnsupportedChannels {
                expected: 3,
                actual: count,
            }),
        }
    }

    /// Get the number of samples per pixel.
    #[inline]
    pub fn count(self) -> u32 {
        self as u32
    }
}

/// Internal image data
#[derive(Debug, Clone)]
struct PixData {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

/// Immutable pixel buffer
///
/// Cloning a `Pix` is cheap and shares the sample storage.
///
/// # Examples
///
/// ```
/// use imlab_core::{Channels, Pix};
///
/// let pix = Pix::new_filled(4, 4, Channels::Gray, 100).unwrap();
/// assert_eq!(pix.get_pixel(3, 3), Some(100));
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new zero-filled image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        Self::new_filled(width, height, channels, 0)
    }

    /// Create a new image with every sample set to `value`.
    pub fn new_filled(width: u32, height: u32, channels: Channels, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = Self::sample_count(width, height, channels);
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                channels,
                data: vec![value; len],
            }),
        })
    }

    /// Wrap an existing row-major sample vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for an empty geometry and
    /// [`Error::BufferSize`] if `data.len()` does not equal
    /// `width * height * channels`.
    pub fn from_vec(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = Self::sample_count(width, height, channels);
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                channels,
                data,
            }),
        })
    }

    #[inline]
    fn sample_count(width: u32, height: u32, channels: Channels) -> usize {
        width as usize * height as usize * channels.count() as usize
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Check whether the image has a single channel.
    #[inline]
    pub fn is_gray(&self) -> bool {
        self.inner.channels == Channels::Gray
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.inner.width as usize * self.inner.height as usize
    }

    /// Get raw access to the sample data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the number of strong references to the sample storage.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get the samples of one row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_data(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Number of samples per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.width as usize * self.inner.channels.count() as usize
    }

    /// Check if two images have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Create a deep copy with independent sample storage.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new(self.inner.as_ref().clone()),
        }
    }

    /// Try to take unique ownership of the sample storage.
    ///
    /// Fails (returning the original `Pix`) if the storage is shared.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: self.inner.as_ref().clone(),
        }
    }

    /// Require a single-channel image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] for color input.
    pub fn check_gray(&self) -> Result<()> {
        if self.is_gray() {
            Ok(())
        } else {
            Err(Error::UnsupportedChannels {
                expected: 1,
                actual: self.inner.channels.count(),
            })
        }
    }

    /// Require that `other` has the same width and height.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleSizes`] otherwise.
    pub fn check_same_size(&self, other: &Pix) -> Result<()> {
        if self.sizes_equal(other) {
            Ok(())
        } else {
            Err(Error::IncompatibleSizes(
                self.width(),
                self.height(),
                other.width(),
                other.height(),
            ))
        }
    }

    /// Apply a function to every sample, producing a new image of the
    /// same geometry.
    pub fn map_samples(&self, f: impl Fn(u8) -> u8) -> Pix {
        let data = self.inner.data.iter().map(|&v| f(v)).collect();
        Pix {
            inner: Arc::new(PixData {
                width: self.inner.width,
                height: self.inner.height,
                channels: self.inner.channels,
                data,
            }),
        }
    }

    /// Apply a 256-entry lookup table to every sample.
    pub fn apply_lut(&self, lut: &[u8; 256]) -> Pix {
        self.map_samples(|v| lut[v as usize])
    }

    /// Combine two same-geometry images sample by sample.
    ///
    /// Callers validate geometry first.
    pub(crate) fn zip_samples(&self, other: &Pix, f: impl Fn(u8, u8) -> u8) -> Pix {
        let data = self
            .inner
            .data
            .iter()
            .zip(other.inner.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Pix {
            inner: Arc::new(PixData {
                width: self.inner.width,
                height: self.inner.height,
                channels: self.inner.channels,
                data,
            }),
        }
    }
}

/// Mutable pixel buffer
///
/// Obtained from [`Pix::try_into_mut`] or [`Pix::to_mut`].
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Get raw access to the sample data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the sample data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get mutable access to one row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.inner.width as usize * self.inner.channels.count() as usize;
        let start = y as usize * stride;
        &mut self.inner.data[start..start + stride]
    }

    /// Set every sample to `value`.
    pub fn set_all(&mut self, value: u8) {
        self.inner.data.fill(value);
    }

    /// Clear all samples to zero.
    pub fn clear(&mut self) {
        self.set_all(0);
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels() {
        assert_eq!(Channels::from_count(1).unwrap(), Channels::Gray);
        assert_eq!(Channels::from_count(3).unwrap(), Channels::Bgr);
        assert!(Channels::from_count(4).is_err());
        assert_eq!(Channels::Bgr.count(), 3);
    }

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200, Channels::Gray).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert!(pix.is_gray());
        assert_eq!(pix.data().len(), 20_000);

        let color = Pix::new(10, 5, Channels::Bgr).unwrap();
        assert_eq!(color.stride(), 30);
        assert_eq!(color.data().len(), 150);
    }

    #[test]
    fn test_pix_creation_invalid() {
        assert!(Pix::new(0, 100, Channels::Gray).is_err());
        assert!(Pix::new(100, 0, Channels::Gray).is_err());
        assert!(matches!(
            Pix::from_vec(2, 2, Channels::Gray, vec![0; 5]),
            Err(Error::BufferSize {
                expected: 4,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_pix_clone_shares_data() {
        let pix1 = Pix::new(100, 100, Channels::Gray).unwrap();
        let pix2 = pix1.clone();

        assert_eq!(pix1.ref_count(), 2);
        assert_eq!(pix1.data().as_ptr(), pix2.data().as_ptr());
    }

    #[test]
    fn test_pix_deep_clone() {
        let pix1 = Pix::new(100, 100, Channels::Gray).unwrap();
        let pix2 = pix1.deep_clone();

        assert_eq!(pix1.ref_count(), 1);
        assert_eq!(pix2.ref_count(), 1);
        assert_ne!(pix1.data().as_ptr(), pix2.data().as_ptr());
    }

    #[test]
    fn test_try_into_mut_shared() {
        let pix1 = Pix::new(4, 4, Channels::Gray).unwrap();
        let pix2 = pix1.clone();
        let back = pix1.try_into_mut().unwrap_err();
        drop(pix2);
        let mut pm = back.try_into_mut().unwrap();
        pm.set_all(9);
        let pix: Pix = pm.into();
        assert!(pix.data().iter().all(|&v| v == 9));
    }

    #[test]
    fn test_checks() {
        let gray = Pix::new(10, 10, Channels::Gray).unwrap();
        let color = Pix::new(10, 10, Channels::Bgr).unwrap();
        let wide = Pix::new(12, 10, Channels::Gray).unwrap();

        assert!(gray.check_gray().is_ok());
        assert!(matches!(
            color.check_gray(),
            Err(Error::UnsupportedChannels {
                expected: 1,
                actual: 3
            })
        ));
        assert!(matches!(
            gray.check_same_size(&wide),
            Err(Error::IncompatibleSizes(10, 10, 12, 10))
        ));
    }

    #[test]
    fn test_row_data() {
        let data: Vec<u8> = (0..12).collect();
        let pix = Pix::from_vec(4, 3, Channels::Gray, data).unwrap();
        assert_eq!(pix.row_data(1), &[4, 5, 6, 7]);

        let mut pm = pix.to_mut();
        pm.row_data_mut(2).fill(0);
        let pix: Pix = pm.into();
        assert_eq!(pix.row_data(2), &[0, 0, 0, 0]);
        assert_eq!(pix.row_data(0), &[0, 1, 2, 3]);
    }
}
