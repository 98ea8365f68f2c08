//! Inpainting by fast marching
//!
//! Damaged pixels (nonzero in a mask) are filled from the intact region
//! inward, in order of their distance `T` to it. `T` solves `|grad T| = 1`
//! on the pixel grid. Each pixel is estimated from the pixels already set
//! within a radius around it:
//!
//! - [`InpaintMethod::Telea`] extrapolates `I(q) + grad I(q) . (p - q)`,
//!   weighted by alignment with the marching direction, distance and
//!   level difference
//! - [`InpaintMethod::NavierStokes`] takes a weighted mean of `I(q)`,
//!   favoring neighbors along the isophote through `q`, so edges run on
//!   into the hole
//!
//! Both work per channel on gray and BGR images.

use crate::{FilterError, FilterResult};
use imlab_core::{Channels, Pix};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::RangeInclusive;

/// Neighborhood radii; other values are clamped into this range
pub const INPAINT_RADIUS: RangeInclusive<u32> = 1..=20;

/// Distance of pixels the front has not reached
const FAR: f64 = 1.0e6;

/// Alignment below which a direction counts as perpendicular
const MIN_ALIGNMENT: f64 = 0.01;

/// Inpainting method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InpaintMethod {
    /// Weighted first-order extrapolation
    #[default]
    Telea,
    /// Isophote-weighted mean
    NavierStokes,
}

impl InpaintMethod {
    /// Catalogue order
    pub const ALL: [InpaintMethod; 2] = [InpaintMethod::Telea, InpaintMethod::NavierStokes];

    /// Stable identifier
    pub fn name(self) -> &'static str {
        match self {
            InpaintMethod::Telea => "telea",
            InpaintMethod::NavierStokes => "ns",
        }
    }

    /// Case-insensitive lookup by identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Final value
    Known,
    /// On the front; damaged band pixels hold a provisional value
    Band,
    /// Not reached yet
    Inside,
}

/// Heap entry; the smallest distance pops first, ties in raster order
#[derive(Debug, Clone, Copy, PartialEq)]
struct Front {
    t: f64,
    idx: usize,
}

impl Eq for Front {}

impl PartialOrd for Front {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Front {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .t
            .total_cmp(&self.t)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

struct Field {
    width: usize,
    height: usize,
    nc: usize,
    state: Vec<State>,
    t: Vec<f64>,
    values: Vec<f64>,
}

impl Field {
    fn neighbors4(&self, idx: usize) -> impl Iterator<Item = usize> + use<> {
        let (w, h) = (self.width, self.height);
        let (x, y) = (idx % w, idx / w);
        [
            (x > 0).then(|| idx - 1),
            (x + 1 < w).then(|| idx + 1),
            (y > 0).then(|| idx - w),
            (y + 1 < h).then(|| idx + w),
        ]
        .into_iter()
        .flatten()
    }

    /// Index of `(x, y)` if it lies in the image and holds a value.
    fn settled(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let idx = y as usize * self.width + x as usize;
        (self.state[idx] != State::Inside).then_some(idx)
    }

    /// Upwind solution of `|grad T| = 1` from one horizontal and one
    /// vertical neighbor.
    fn solve(&self, a: Option<usize>, b: Option<usize>) -> f64 {
        match (a, b) {
            (Some(a), Some(b)) => {
                let (ta, tb) = (self.t[a], self.t[b]);
                let d = ta - tb;
                if d.abs() < 1.0 {
                    (ta + tb + (2.0 - d * d).sqrt()) * 0.5
                } else {
                    1.0 + ta.min(tb)
                }
            }
            (Some(a), None) | (None, Some(a)) => 1.0 + self.t[a],
            (None, None) => FAR,
        }
    }

    fn arrival(&self, x: i64, y: i64) -> f64 {
        let left = self.settled(x - 1, y);
        let right = self.settled(x + 1, y);
        let up = self.settled(x, y - 1);
        let down = self.settled(x, y + 1);
        [
            self.solve(up, left),
            self.solve(down, left),
            self.solve(up, right),
            self.solve(down, right),
        ]
        .into_iter()
        .fold(FAR, f64::min)
    }

    /// Gradient of `f` at `(x, y)` over settled pixels: central where both
    /// sides are settled, one-sided otherwise.
    fn grad(&self, x: i64, y: i64, f: impl Fn(usize) -> f64) -> (f64, f64) {
        let center = f(y as usize * self.width + x as usize);
        let axis = |fwd: Option<usize>, back: Option<usize>| match (fwd, back) {
            (Some(a), Some(b)) => (f(a) - f(b)) * 0.5,
            (Some(a), None) => f(a) - center,
            (None, Some(b)) => center - f(b),
            (None, None) => 0.0,
        };
        (
            axis(self.settled(x + 1, y), self.settled(x - 1, y)),
            axis(self.settled(x, y + 1), self.settled(x, y - 1)),
        )
    }

    fn estimate(&self, idx: usize, method: InpaintMethod, radius: u32) -> Vec<f64> {
        let (w, nc) = (self.width, self.nc);
        let (px, py) = ((idx % w) as i64, (idx / w) as i64);
        let grad_t = self.grad(px, py, |i| self.t[i]);
        let r = radius as i64;
        let mut acc = vec![0.0; nc];
        let mut sum = vec![0.0; nc];

        for qy in (py - r).max(0)..=(py + r).min(self.height as i64 - 1) {
            for qx in (px - r).max(0)..=(px + r).min(w as i64 - 1) {
                let (dx, dy) = (px - qx, py - qy);
                let len_sq = (dx * dx + dy * dy) as f64;
                if len_sq == 0.0 || len_sq > (r * r) as f64 {
                    continue;
                }
                let Some(q) = self.settled(qx, qy) else {
                    continue;
                };
                let dst = 1.0 / (len_sq * len_sq.sqrt());
                let lev = 1.0 / (1.0 + (self.t[q] - self.t[idx]).abs());
                let (rx, ry) = (dx as f64, dy as f64);

                for c in 0..nc {
                    let value = |i: usize| self.values[i * nc + c];
                    let (gx, gy) = self.grad(qx, qy, value);
                    let (weight, sample) = match method {
                        InpaintMethod::Telea => {
                            let dir = (rx * grad_t.0 + ry * grad_t.1).abs();
                            let dir = if dir <= MIN_ALIGNMENT { 1e-6 } else { dir };
                            (dir * dst * lev, value(q) + gx * rx + gy * ry)
                        }
                        InpaintMethod::NavierStokes => {
                            // the isophote is (-gy, gx)
                            let norm = (gx * gx + gy * gy).sqrt();
                            let dir = if norm < MIN_ALIGNMENT {
                                1e-6
                            } else {
                                ((ry * gx - rx * gy).abs() / (norm * len_sq.sqrt())).max(1e-6)
                            };
                            (dir * dst * lev, value(q))
                        }
                    };
                    acc[c] += weight * sample;
                    sum[c] += weight;
                }
            }
        }

        (0..nc)
            .map(|c| {
                if sum[c] > 0.0 {
                    (acc[c] / sum[c]).clamp(0.0, 255.0)
                } else {
                    self.values[idx * nc + c]
                }
            })
            .collect()
    }
}

/// Fill the pixels of `pix` where `mask` is nonzero.
///
/// `mask` may be gray or BGR (converted to gray first) and must match the
/// size of `pix`. `radius` is clamped into [`INPAINT_RADIUS`]. Pixels
/// outside the mask are returned unchanged; an empty mask returns `pix`.
///
/// # Errors
///
/// Returns a core shape error if the sizes differ, and
/// [`FilterError::InvalidParameters`] if the mask covers every pixel.
pub fn inpaint(pix: &Pix, mask: &Pix, method: InpaintMethod, radius: u32) -> FilterResult<Pix> {
    pix.check_same_size(mask)?;
    let mask = mask.convert_to_gray()?;
    let radius = radius.clamp(*INPAINT_RADIUS.start(), *INPAINT_RADIUS.end());

    let damaged: Vec<bool> = mask.data().iter().map(|&m| m != 0).collect();
    let holes = damaged.iter().filter(|&&d| d).count();
    if holes == 0 {
        return Ok(pix.clone());
    }
    if holes == damaged.len() {
        return Err(FilterError::InvalidParameters(
            "mask covers the whole image".to_string(),
        ));
    }

    let (w, h) = (pix.width() as usize, pix.height() as usize);
    let nc = pix.channels().count() as usize;
    let mut field = Field {
        width: w,
        height: h,
        nc,
        state: damaged
            .iter()
            .map(|&d| if d { State::Inside } else { State::Known })
            .collect(),
        t: damaged.iter().map(|&d| if d { FAR } else { 0.0 }).collect(),
        values: pix.data().iter().map(|&v| v as f64).collect(),
    };

    let mut heap = BinaryHeap::new();
    for idx in 0..w * h {
        if !damaged[idx] && field.neighbors4(idx).any(|n| damaged[n]) {
            field.state[idx] = State::Band;
            heap.push(Front { t: 0.0, idx });
        }
    }

    let mut steps = 0usize;
    while let Some(Front { idx, .. }) = heap.pop() {
        if field.state[idx] == State::Known {
            continue;
        }
        field.state[idx] = State::Known;

        let ahead: Vec<usize> = field
            .neighbors4(idx)
            .filter(|&n| damaged[n] && field.state[n] != State::Known)
            .collect();
        for n in ahead {
            field.t[n] = field.arrival((n % w) as i64, (n / w) as i64);
            let estimate = field.estimate(n, method, radius);
            field.values[n * nc..(n + 1) * nc].copy_from_slice(&estimate);
            field.state[n] = State::Band;
            heap.push(Front { t: field.t[n], idx: n });
            steps += 1;
        }
    }

    log::debug!(
        "inpaint: method {}, radius {}, {} damaged pixels, {} estimates",
        method.name(),
        radius,
        holes,
        steps
    );
    let data = field.values.iter().map(|&v| v.round() as u8).collect();
    Ok(Pix::from_vec(pix.width(), pix.height(), pix.channels(), data)?)
}

/// Mask of the pixels whose gray level lies in `lower..=upper` (255 inside,
/// 0 outside). BGR input is converted to gray first.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `lower > upper`.
pub fn range_mask(pix: &Pix, lower: u8, upper: u8) -> FilterResult<Pix> {
    if lower > upper {
        return Err(FilterError::InvalidParameters(format!(
            "lower bound {} exceeds upper bound {}",
            lower, upper
        )));
    }
    let gray = pix.convert_to_gray()?;
    let data = gray
        .data()
        .iter()
        .map(|&v| if (lower..=upper).contains(&v) { 255 } else { 0 })
        .collect();
    Ok(Pix::from_vec(gray.width(), gray.height(), Channels::Gray, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imlab_core::ErrorKind;

    fn mask_rect(w: u32, h: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> Pix {
        let mut pm = Pix::new(w, h, Channels::Gray).unwrap().to_mut();
        for y in y0..y1 {
            for x in x0..x1 {
                pm.set_pixel(x, y, 255).unwrap();
            }
        }
        pm.into()
    }

    fn ramp(w: u32, h: u32) -> Pix {
        let data = (0..h).flat_map(|_| (0..w).map(|x| (x * 4) as u8)).collect();
        Pix::from_vec(w, h, Channels::Gray, data).unwrap()
    }

    #[test]
    fn test_flat_hole_filled_exactly() {
        let pix = Pix::new_filled(20, 20, Channels::Gray, 120).unwrap();
        let mut pm = pix.deep_clone().to_mut();
        for y in 7..13 {
            for x in 7..13 {
                pm.set_pixel(x, y, 0).unwrap();
            }
        }
        let damaged: Pix = pm.into();
        let mask = mask_rect(20, 20, 7, 7, 13, 13);
        for method in InpaintMethod::ALL {
            let out = inpaint(&damaged, &mask, method, 3).unwrap();
            assert_eq!(out.data(), pix.data(), "{}", method.name());
        }
    }

    #[test]
    fn test_telea_continues_linear_ramp() {
        let clean = ramp(32, 16);
        let mask = mask_rect(32, 16, 13, 4, 18, 12);
        let mut pm = clean.deep_clone().to_mut();
        for y in 4..12 {
            for x in 13..18 {
                pm.set_pixel(x, y, 255).unwrap();
            }
        }
        let out = inpaint(&pm.into(), &mask, InpaintMethod::Telea, 3).unwrap();
        for (a, b) in clean.data().iter().zip(out.data()) {
            assert!(a.abs_diff(*b) <= 1, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_ns_stays_within_known_range() {
        let clean = ramp(32, 16);
        let mask = mask_rect(32, 16, 13, 4, 18, 12);
        let out = inpaint(&clean, &mask, InpaintMethod::NavierStokes, 5).unwrap();
        for y in 0..16 {
            for x in 0..32 {
                let v = out.get_pixel(x, y).unwrap();
                if (13..18).contains(&x) && (4..12).contains(&y) {
                    assert!((4 * 8..=4 * 23).contains(&(v as u32)), "({}, {}) = {}", x, y, v);
                } else {
                    assert_eq!(v, clean.get_pixel(x, y).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_bgr_channels_filled_separately() {
        let mut pm = Pix::new(10, 10, Channels::Bgr).unwrap().to_mut();
        for y in 0..10 {
            for x in 0..10 {
                pm.set_bgr(x, y, 10, 20, 30).unwrap();
            }
        }
        pm.set_bgr(4, 4, 255, 255, 255).unwrap();
        pm.set_bgr(5, 4, 255, 255, 255).unwrap();
        let mask = mask_rect(10, 10, 4, 4, 6, 5);
        let out = inpaint(&pm.into(), &mask, InpaintMethod::Telea, 3).unwrap();
        assert_eq!(out.get_bgr(4, 4), Some((10, 20, 30)));
        assert_eq!(out.get_bgr(5, 4), Some((10, 20, 30)));
    }

    #[test]
    fn test_empty_mask_and_radius_clamp() {
        let pix = ramp(12, 6);
        let empty = Pix::new(12, 6, Channels::Gray).unwrap();
        assert_eq!(inpaint(&pix, &empty, InpaintMethod::Telea, 3).unwrap().data(), pix.data());

        let mask = mask_rect(12, 6, 4, 2, 6, 4);
        for method in InpaintMethod::ALL {
            let low = inpaint(&pix, &mask, method, 0).unwrap();
            assert_eq!(low.data(), inpaint(&pix, &mask, method, 1).unwrap().data());
            let high = inpaint(&pix, &mask, method, 99).unwrap();
            assert_eq!(high.data(), inpaint(&pix, &mask, method, 20).unwrap().data());
        }
    }

    #[test]
    fn test_inpaint_errors() {
        let pix = ramp(8, 8);
        let wrong = Pix::new(8, 9, Channels::Gray).unwrap();
        let err = inpaint(&pix, &wrong, InpaintMethod::Telea, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
        let full = Pix::new_filled(8, 8, Channels::Gray, 255).unwrap();
        assert!(matches!(
            inpaint(&pix, &full, InpaintMethod::Telea, 3),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_method_names() {
        assert_eq!(InpaintMethod::from_name("telea"), Some(InpaintMethod::Telea));
        assert_eq!(InpaintMethod::from_name("NS"), Some(InpaintMethod::NavierStokes));
        assert_eq!(InpaintMethod::from_name("fmm"), None);
        assert_eq!(InpaintMethod::default(), InpaintMethod::Telea);
    }

    #[test]
    fn test_range_mask() {
        let pix = Pix::from_vec(5, 1, Channels::Gray, vec![0, 50, 100, 150, 200]).unwrap();
        assert_eq!(range_mask(&pix, 50, 150).unwrap().data(), &[0, 255, 255, 255, 0]);
        assert_eq!(range_mask(&pix, 0, 255).unwrap().data(), &[255; 5]);
        assert!(matches!(
            range_mask(&pix, 151, 150),
            Err(FilterError::InvalidParameters(_))
        ));
    }
}
