//! Edge detection and sharpening
//!
//! The Laplacian, Prewitt and Sobel responses are signed, so they are
//! min-max stretched to `[0, 255]` for display. Canny produces a 0/255
//! edge map.

use crate::convolve::convolve;
use crate::{BorderPolicy, FilterError, FilterResult, Kernel, LaplacianKernel, PrewittDirection};
use imlab_core::{Channels, Pix};

/// Sharpen with a named Laplacian kernel; the response is min-max stretched.
pub fn sharpening(pix: &Pix, kernel: LaplacianKernel, border: BorderPolicy) -> FilterResult<Pix> {
    convolve(pix, &kernel.kernel(), border)?.to_pix_normalized()
}

/// Directional Prewitt gradient; the response is min-max stretched.
pub fn prewitt(pix: &Pix, direction: PrewittDirection, border: BorderPolicy) -> FilterResult<Pix> {
    convolve(pix, &direction.kernel(), border)?.to_pix_normalized()
}

/// Sobel gradient magnitude `sqrt(gx^2 + gy^2)`, min-max stretched.
pub fn sobel(pix: &Pix, border: BorderPolicy) -> FilterResult<Pix> {
    let gx = convolve(pix, &Kernel::sobel_x(), border)?;
    let gy = convolve(pix, &Kernel::sobel_y(), border)?;
    gx.zip_map(&gy, |a, b| (a * a + b * b).sqrt())
        .to_pix_normalized()
}

/// Hysteresis thresholds for [`canny`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyOptions {
    /// Gradients above this continue an edge
    pub low_threshold: f64,
    /// Gradients above this start an edge
    pub high_threshold: f64,
}

impl Default for CannyOptions {
    fn default() -> Self {
        Self {
            low_threshold: 100.0,
            high_threshold: 200.0,
        }
    }
}

/// Canny edge detector.
///
/// Uses a 3x3 Sobel aperture with replicated borders and the L1 gradient
/// norm `|gx| + |gy|`, non-maximum suppression along four quantized
/// directions, and hysteresis over 8-connected neighbors. Thresholds given
/// in reverse order are swapped.
///
/// # Errors
///
/// Returns [`FilterError::OutOfRange`] for negative or non-finite
/// thresholds, and a core shape error for color input.
pub fn canny(pix: &Pix, options: &CannyOptions) -> FilterResult<Pix> {
    pix.check_gray()?;
    let (mut low, mut high) = (options.low_threshold, options.high_threshold);
    if !(low.is_finite() && high.is_finite()) || low < 0.0 || high < 0.0 {
        return Err(FilterError::OutOfRange(format!(
            "canny thresholds must be finite and non-negative, got ({}, {})",
            low, high
        )));
    }
    if low > high {
        std::mem::swap(&mut low, &mut high);
    }

    let w = pix.width() as usize;
    let h = pix.height() as usize;
    let (mag, dir) = gradients(pix);
    let candidates = non_max_suppression(w, h, &mag, &dir, low);
    let out = hysteresis(w, h, &mag, &candidates, high);

    log::trace!(
        "canny({}, {}): {} edge pixels",
        low,
        high,
        out.iter().filter(|&&v| v != 0).count()
    );
    Ok(Pix::from_vec(w as u32, h as u32, Channels::Gray, out)?)
}

/// Quantized gradient direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Gradient mostly along x; compare left/right
    Horizontal,
    /// Gradient mostly along y; compare up/down
    Vertical,
    /// gx and gy share a sign; compare up-left/down-right
    Diagonal,
    /// gx and gy differ in sign; compare up-right/down-left
    AntiDiagonal,
}

fn gradients(pix: &Pix) -> (Vec<f64>, Vec<Direction>) {
    const TAN_22_5: f64 = 0.414_213_562_373_095_1;

    let w = pix.width() as i64;
    let h = pix.height() as i64;
    let data = pix.data();
    let at = |x: i64, y: i64| data[(y.clamp(0, h - 1) * w + x.clamp(0, w - 1)) as usize] as f64;

    let mut mag = Vec::with_capacity(data.len());
    let mut dir = Vec::with_capacity(data.len());
    for y in 0..h {
        for x in 0..w {
            let gx = -at(x - 1, y - 1) + at(x + 1, y - 1) - 2.0 * at(x - 1, y)
                + 2.0 * at(x + 1, y)
                - at(x - 1, y + 1)
                + at(x + 1, y + 1);
            let gy = -at(x - 1, y - 1) - 2.0 * at(x, y - 1) - at(x + 1, y - 1)
                + at(x - 1, y + 1)
                + 2.0 * at(x, y + 1)
                + at(x + 1, y + 1);
            mag.push(gx.abs() + gy.abs());

            let (ax, ay) = (gx.abs(), gy.abs());
            dir.push(if ay < ax * TAN_22_5 {
                Direction::Horizontal
            } else if ax < ay * TAN_22_5 {
                Direction::Vertical
            } else if gx * gy > 0.0 {
                Direction::Diagonal
            } else {
                Direction::AntiDiagonal
            });
        }
    }
    (mag, dir)
}

/// Keep local maxima above `low`.
///
/// The first neighbor along the gradient must be strictly smaller, the
/// second no larger, so plateaus keep exactly one pixel.
fn non_max_suppression(w: usize, h: usize, mag: &[f64], dir: &[Direction], low: f64) -> Vec<bool> {
    let m_at = |x: isize, y: isize| {
        if x < 0 || y < 0 || x >= w as isize || y >= h as isize {
            0.0
        } else {
            mag[y as usize * w + x as usize]
        }
    };

    let mut out = vec![false; w * h];
    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            let m = mag[idx];
            if m <= low {
                continue;
            }
            let (xi, yi) = (x as isize, y as isize);
            let (before, after) = match dir[idx] {
                Direction::Horizontal => (m_at(xi - 1, yi), m_at(xi + 1, yi)),
                Direction::Vertical => (m_at(xi, yi - 1), m_at(xi, yi + 1)),
                Direction::Diagonal => (m_at(xi - 1, yi - 1), m_at(xi + 1, yi + 1)),
                Direction::AntiDiagonal => (m_at(xi + 1, yi - 1), m_at(xi - 1, yi + 1)),
            };
            out[idx] = m > before && m >= after;
        }
    }
    out
}

fn hysteresis(w: usize, h: usize, mag: &[f64], candidates: &[bool], high: f64) -> Vec<u8> {
    let mut out = vec![0u8; w * h];
    let mut stack = Vec::new();

    for (idx, &is_candidate) in candidates.iter().enumerate() {
        if is_candidate && mag[idx] > high {
            out[idx] = 255;
            stack.push((idx % w, idx / w));
        }
    }

    while let Some((x, y)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                let nidx = ny * w + nx;
                if candidates[nidx] && out[nidx] == 0 {
                    out[nidx] = 255;
                    stack.push((nx, ny));
                }
            }
        }
    }
    out
}
