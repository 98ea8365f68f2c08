//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//!
//! For grayscale images `get_pixel` / `set_pixel` address the single
//! sample. For color images they address the first (blue) sample; use
//! the `*_bgr` accessors for all three.

use super::{Channels, Pix, PixMut};
use crate::error::{Error, Result};

#[inline]
fn sample_index(width: u32, channels: Channels, x: u32, y: u32) -> usize {
    (y as usize * width as usize + x as usize) * channels.count() as usize
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the computed index lies outside the sample buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data()[sample_index(self.width(), self.channels(), x, y)]
    }

    /// Get the (B, G, R) samples at (x, y).
    ///
    /// Grayscale images report the same value for all three.
    pub fn get_bgr(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = sample_index(self.width(), self.channels(), x, y);
        let data = self.data();
        match self.channels() {
            Channels::Gray => Some((data[idx], data[idx], data[idx])),
            Channels::Bgr => Some((data[idx], data[idx + 1], data[idx + 2])),
        }
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data()[sample_index(self.width(), self.channels(), x, y)]
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        self.check_coords(x, y)?;
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u8) {
        let idx = sample_index(self.width(), self.channels(), x, y);
        self.data_mut()[idx] = val;
    }

    /// Set the (B, G, R) samples at (x, y).
    ///
    /// On a grayscale image only the blue value is stored.
    pub fn set_bgr(&mut self, x: u32, y: u32, b: u8, g: u8, r: u8) -> Result<()> {
        self.check_coords(x, y)?;
        let idx = sample_index(self.width(), self.channels(), x, y);
        let channels = self.channels();
        let data = self.data_mut();
        data[idx] = b;
        if channels == Channels::Bgr {
            data[idx + 1] = g;
            data[idx + 2] = r;
        }
        Ok(())
    }

    fn check_coords(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        Ok(())
    }
}
