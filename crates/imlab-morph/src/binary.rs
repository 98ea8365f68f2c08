//! Binary morphological operations
//!
//! Implements erosion, dilation, opening, and closing for binary masks
//! stored as 8-bit images in either the 0/1 or the 0/255 domain. Results
//! come back in the caller's domain.
//!
//! Pixels outside the image never influence the result: erosion does not
//! eat into objects touching the edge and dilation does not grow from it.

use crate::{MorphError, MorphResult, Sel, SelShape};
use imlab_core::{Channels, MaskDomain, Pix};

/// Parameters shared by erode / dilate / open / close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphOptions {
    /// Structuring element shape
    pub shape: SelShape,
    /// Structuring element size (odd, >= 3)
    pub size: u32,
    /// Number of passes (>= 1)
    pub iterations: u32,
}

impl Default for MorphOptions {
    fn default() -> Self {
        Self {
            shape: SelShape::Rect,
            size: 3,
            iterations: 1,
        }
    }
}

impl MorphOptions {
    fn sel(&self) -> MorphResult<Sel> {
        if self.iterations == 0 {
            return Err(MorphError::InvalidParameters(
                "iterations must be >= 1".into(),
            ));
        }
        Sel::new(self.shape, self.size)
    }
}

/// Check that `pix` is a grayscale binary mask and report its domain.
///
/// An all-zero image is reported as [`MaskDomain::ZeroFull`].
///
/// # Errors
///
/// Returns a core shape error for color input and a core domain error if
/// the samples are not a subset of {0, 1} or of {0, 255}.
pub fn validate_binary(pix: &Pix) -> MorphResult<MaskDomain> {
    Ok(pix.mask_domain()?)
}

/// A 0/1 working copy of a mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BinaryGrid {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) bits: Vec<u8>,
}

impl BinaryGrid {
    /// Any non-zero sample becomes 1.
    pub(crate) fn from_pix(pix: &Pix) -> Self {
        Self {
            width: pix.width(),
            height: pix.height(),
            bits: pix.data().iter().map(|&v| (v != 0) as u8).collect(),
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b != 0).count()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Foreground stays only where every in-bounds hit is foreground.
    pub(crate) fn erode(&self, sel: &Sel) -> Self {
        self.neighborhood(sel, true)
    }

    /// Foreground wherever any in-bounds hit is foreground.
    pub(crate) fn dilate(&self, sel: &Sel) -> Self {
        self.neighborhood(sel, false)
    }

    fn neighborhood(&self, sel: &Sel, all: bool) -> Self {
        let w = self.width as i32;
        let h = self.height as i32;
        let offsets: Vec<(i32, i32)> = sel.hit_offsets().collect();
        let mut bits = Vec::with_capacity(self.bits.len());
        for y in 0..h {
            for x in 0..w {
                let mut in_bounds = offsets.iter().filter_map(|&(dx, dy)| {
                    let (sx, sy) = (x + dx, y + dy);
                    (sx >= 0 && sy >= 0 && sx < w && sy < h)
                        .then(|| self.bits[(sy * w + sx) as usize])
                });
                let v = if all {
                    in_bounds.all(|b| b != 0)
                } else {
                    in_bounds.any(|b| b != 0)
                };
                bits.push(v as u8);
            }
        }
        Self {
            width: self.width,
            height: self.height,
            bits,
        }
    }

    /// Return to an 8-bit image in `domain`.
    pub(crate) fn to_pix(&self, domain: MaskDomain) -> MorphResult<Pix> {
        let fg = domain.foreground();
        let data = self.bits.iter().map(|&b| b * fg).collect();
        Ok(Pix::from_vec(self.width, self.height, Channels::Gray, data)?)
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Erode,
    Dilate,
}

fn apply(pix: &Pix, options: &MorphOptions, steps: &[Step]) -> MorphResult<Pix> {
    let domain = validate_binary(pix)?;
    let sel = options.sel()?;
    let mut grid = BinaryGrid::from_pix(pix);
    for step in steps {
        for _ in 0..options.iterations {
            grid = match step {
                Step::Erode => grid.erode(&sel),
                Step::Dilate => grid.dilate(&sel),
            };
        }
    }
    log::trace!(
        "{:?} x{} with {:?} {}: {} foreground pixels",
        steps,
        options.iterations,
        options.shape,
        options.size,
        grid.count()
    );
    grid.to_pix(domain)
}

/// Erode a binary mask.
pub fn erode(pix: &Pix, options: &MorphOptions) -> MorphResult<Pix> {
    apply(pix, options, &[Step::Erode])
}

/// Dilate a binary mask.
pub fn dilate(pix: &Pix, options: &MorphOptions) -> MorphResult<Pix> {
    apply(pix, options, &[Step::Dilate])
}

/// Open a binary mask
///
/// `iterations` erosions followed by as many dilations.
/// Removes small foreground objects and smooths contours.
pub fn open(pix: &Pix, options: &MorphOptions) -> MorphResult<Pix> {
    apply(pix, options, &[Step::Erode, Step::Dilate])
}

/// Close a binary mask
///
/// `iterations` dilations followed by as many erosions.
/// Fills small holes and connects nearby objects.
pub fn close(pix: &Pix, options: &MorphOptions) -> MorphResult<Pix> {
    apply(pix, options, &[Step::Dilate, Step::Erode])
}
