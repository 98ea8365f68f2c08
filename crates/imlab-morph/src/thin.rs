//! Morphological skeletonization
//!
//! The skeleton is the union, over successive erosions of the mask, of the
//! pixels that an opening with a 3x3 cross removes:
//!
//! 1. `eroded = erode(img, cross)`
//! 2. `spur = img AND NOT dilate(eroded, cross)`
//! 3. `skeleton |= spur`, `img = eroded`
//!
//! The loop ends when `img` is empty.

use crate::binary::{BinaryGrid, validate_binary};
use crate::{MorphResult, Sel};
use imlab_core::Pix;

/// Skeletonize a binary mask.
///
/// The result is returned in the input's domain (0/1 or 0/255). An
/// all-zero mask yields an all-zero skeleton after one pass.
///
/// Erosion ignores pixels outside the image, so a mask whose foreground
/// cannot shrink further (for example one covering the whole image) stops
/// at that fixed point. The number of passes is also capped at
/// `width + height`, which exceeds the erosion depth of any mask.
///
/// # Errors
///
/// Returns a core error if `pix` is not a grayscale binary mask.
pub fn skeletonize(pix: &Pix) -> MorphResult<Pix> {
    let domain = validate_binary(pix)?;
    let cross = Sel::cross3();
    let max_iterations = pix.width() as usize + pix.height() as usize;

    let mut img = BinaryGrid::from_pix(pix);
    let mut skeleton = BinaryGrid {
        width: img.width,
        height: img.height,
        bits: vec![0; img.bits.len()],
    };

    let mut iterations = 0;
    loop {
        iterations += 1;
        let eroded = img.erode(&cross);
        let opened = eroded.dilate(&cross);
        for ((s, &v), &o) in skeleton.bits.iter_mut().zip(&img.bits).zip(&opened.bits) {
            *s |= v & !o & 1;
        }

        if eroded.is_empty() {
            break;
        }
        if eroded == img {
            log::debug!(
                "skeletonize: erosion reached a fixed point with {} pixels",
                img.count()
            );
            break;
        }
        if iterations >= max_iterations {
            log::debug!("skeletonize: stopped after {} passes", iterations);
            break;
        }
        img = eroded;
    }

    log::debug!(
        "skeletonize: {} passes, {} skeleton pixels",
        iterations,
        skeleton.count()
    );
    skeleton.to_pix(domain)
}
