//! Median filtering

use crate::{BorderPolicy, FilterError, FilterResult};
use imlab_core::{Channels, Pix};

/// Window sizes accepted by [`median`]
pub const MEDIAN_SIZES: [u32; 4] = [3, 5, 7, 9];

/// Apply a square median filter.
///
/// With [`BorderPolicy::ResultFill`] only pixels whose window fits inside
/// the image are filtered and the outer band keeps the fill value. Other
/// policies synthesize the missing samples and filter every pixel.
///
/// # Errors
///
/// Returns [`FilterError::OutOfRange`] if `size` is not 3, 5, 7 or 9, and
/// a core shape error for color input.
pub fn median(pix: &Pix, size: u32, border: BorderPolicy) -> FilterResult<Pix> {
    pix.check_gray()?;
    if !MEDIAN_SIZES.contains(&size) {
        return Err(FilterError::OutOfRange(format!(
            "median size must be one of {:?}, got {}",
            MEDIAN_SIZES, size
        )));
    }

    let w = pix.width();
    let h = pix.height();
    let r = (size / 2) as i64;
    let data = pix.data();
    let mut window = Vec::with_capacity((size * size) as usize);

    if let BorderPolicy::ResultFill(value) = border {
        let mut out = vec![value; data.len()];
        let (wi, hi) = (w as i64, h as i64);
        for y in r..hi - r {
            for x in r..wi - r {
                window.clear();
                for dy in -r..=r {
                    let row = ((y + dy) * wi) as usize;
                    let (x0, x1) = (row + (x - r) as usize, row + (x + r) as usize);
                    window.extend_from_slice(&data[x0..=x1]);
                }
                out[(y * wi + x) as usize] = middle(&mut window);
            }
        }
        return Ok(Pix::from_vec(w, h, Channels::Gray, out)?);
    }

    let mut out = Vec::with_capacity(data.len());
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            window.clear();
            for dy in -r..=r {
                for dx in -r..=r {
                    window.push(border.sample(data, w, h, x + dx, y + dy).unwrap_or(0));
                }
            }
            out.push(middle(&mut window));
        }
    }
    Ok(Pix::from_vec(w, h, Channels::Gray, out)?)
}

/// Middle element of an odd-length window.
fn middle(window: &mut [u8]) -> u8 {
    let mid = window.len() / 2;
    *window.select_nth_unstable(mid).1
}
