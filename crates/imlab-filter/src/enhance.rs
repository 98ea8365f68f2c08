//! Histogram-based contrast enhancement
//!
//! Every operation here builds a 256-entry tone reproduction curve
//! ([`TrcLut`]) from the image histogram or its parameters and maps the
//! image through it.

use crate::{FilterError, FilterResult};
use imlab_core::Pix;

/// Largest accepted saturation percentage for [`stretch`]
pub const MAX_SATURATION_PERCENT: f64 = 5.0;

/// A 256-entry lookup table for tone reproduction curve mapping.
pub type TrcLut = [u8; 256];

/// Find the stretch bounds `(Lmin, Lmax)`.
///
/// With `saturation_percent == 0` these are the first and last occupied
/// bins. Otherwise counts are accumulated from each end until they reach
/// `saturation_percent / 2` percent of the pixels; the bound is the first
/// occupied bin at which that happens.
pub fn stretch_bounds(pix: &Pix, saturation_percent: f64) -> FilterResult<(u8, u8)> {
    check_saturation(saturation_percent)?;
    let hist = pix.gray_histogram()?;

    if saturation_percent == 0.0 {
        let lmin = hist.first_nonzero().unwrap_or(0);
        let lmax = hist.last_nonzero().unwrap_or(255);
        return Ok((lmin, lmax));
    }

    let threshold = (saturation_percent / 2.0 / 100.0 * hist.pixels_num as f64) as u64;
    let find = |bins: &mut dyn Iterator<Item = usize>, default: u8| {
        let mut found: Option<u8> = None;
        let mut accumulated = 0u64;
        for z in bins {
            let count = hist.counts[z];
            if found.is_none() && count != 0 {
                found = Some(z as u8);
            }
            accumulated += count;
            if accumulated >= threshold && count != 0 {
                return z as u8;
            }
        }
        found.unwrap_or(default)
    };

    let lmin = find(&mut (0..256), 0);
    let lmax = find(&mut (0..256).rev(), 255);
    Ok((lmin, lmax))
}

/// Linear histogram stretch with optional saturation.
///
/// Values below `Lmin` map to 0, above `Lmax` to 255, and in between to
/// `round((v - Lmin) * 255 / (Lmax - Lmin))`. If `Lmin == Lmax` the image
/// is returned unchanged.
///
/// # Errors
///
/// Returns [`FilterError::OutOfRange`] unless
/// `0 <= saturation_percent <= 5`.
pub fn stretch(pix: &Pix, saturation_percent: f64) -> FilterResult<Pix> {
    let (lmin, lmax) = stretch_bounds(pix, saturation_percent)?;
    log::debug!(
        "stretch({}%): Lmin = {}, Lmax = {}",
        saturation_percent,
        lmin,
        lmax
    );
    if lmax <= lmin {
        return Ok(pix.clone());
    }
    Ok(pix.apply_lut(&stretch_trc(lmin, lmax)))
}

/// Tone curve mapping `[lmin, lmax]` linearly onto `[0, 255]`.
pub fn stretch_trc(lmin: u8, lmax: u8) -> TrcLut {
    let mut lut = [0u8; 256];
    let span = lmax.saturating_sub(lmin).max(1) as f64;
    for (z, entry) in lut.iter_mut().enumerate() {
        let z = z as u8;
        *entry = if z < lmin {
            0
        } else if z > lmax {
            255
        } else {
            ((z - lmin) as f64 * 255.0 / span).round().min(255.0) as u8
        };
    }
    lut
}

/// Histogram equalization through the cumulative distribution.
///
/// `lut[v] = round((cdf[v] - cdf_min) / (total - cdf_min) * 255)` for
/// occupied prefixes, 0 before the first occupied bin. A single-valued
/// image has `total == cdf_min` and maps to all zeros.
pub fn equalize(pix: &Pix) -> FilterResult<Pix> {
    Ok(pix.apply_lut(&equalize_trc(pix)?))
}

/// Tone curve used by [`equalize`].
pub fn equalize_trc(pix: &Pix) -> FilterResult<TrcLut> {
    let hist = pix.gray_histogram()?;
    let cdf = hist.cumulative();
    let total = hist.pixels_num;
    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);
    log::debug!("equalize: cdf_min = {}, total = {}", cdf_min, total);

    let mut lut = [0u8; 256];
    if total == cdf_min {
        return Ok(lut);
    }

    let range = (total - cdf_min) as f64;
    for (entry, &c) in lut.iter_mut().zip(cdf.iter()) {
        if c > 0 {
            *entry = ((c - cdf_min) as f64 / range * 255.0).round() as u8;
        }
    }
    Ok(lut)
}

/// Map `[p1, p2]` linearly onto `[q1, q2]`.
///
/// Values below `p1` become `q1`, values above `p2` become `q2`, and the
/// rest `round((v - p1) * (q2 - q1) / (p2 - p1) + q1)`, clamped to
/// `[0, 255]`.
///
/// # Errors
///
/// Returns [`FilterError::OutOfRange`] unless `p1 < p2` and `q1 < q2`.
pub fn stretch_range(pix: &Pix, p1: i32, p2: i32, q1: i32, q2: i32) -> FilterResult<Pix> {
    pix.check_gray()?;
    if p1 >= p2 {
        return Err(FilterError::OutOfRange(format!(
            "p1 must be less than p2, got p1 = {}, p2 = {}",
            p1, p2
        )));
    }
    if q1 >= q2 {
        return Err(FilterError::OutOfRange(format!(
            "q1 must be less than q2, got q1 = {}, q2 = {}",
            q1, q2
        )));
    }

    let (dq, dp) = ((q2 - q1) as f64, (p2 - p1) as f64);
    let mut lut = [0u8; 256];
    for (v, entry) in lut.iter_mut().enumerate() {
        let v = v as i32;
        let mapped = if v < p1 {
            q1 as f64
        } else if v > p2 {
            q2 as f64
        } else {
            ((v - p1) as f64 * dq / dp + q1 as f64).round()
        };
        *entry = mapped.clamp(0.0, 255.0) as u8;
    }
    Ok(pix.apply_lut(&lut))
}

fn check_saturation(saturation_percent: f64) -> FilterResult<()> {
    if !(0.0..=MAX_SATURATION_PERCENT).contains(&saturation_percent) {
        return Err(FilterError::OutOfRange(format!(
            "saturation must be in 0..=5 percent, got {}",
            saturation_percent
        )));
    }
    Ok(())
}
