//! Spatial moments
//!
//! Raw moments `m_pq` up to order 3, central moments `mu_pq` about the
//! centroid and scale-normalized central moments
//! `nu_pq = mu_pq / m00^(1 + (p + q) / 2)`.
//!
//! Moments come either from pixels ([`Moments::from_pixels`], every sample
//! weighted by its value) or from a closed border polygon
//! ([`Moments::from_border`], Green's theorem over the enclosed region).

use crate::ccbord::Border;
use crate::error::RegionResult;
use imlab_core::Pix;

/// Names of the raw moments, in [`Moments::raw`] order
pub const RAW_NAMES: [&str; 10] = [
    "m00", "m10", "m01", "m20", "m11", "m02", "m30", "m21", "m12", "m03",
];

/// Names of the central moments, in [`Moments::central`] order
pub const CENTRAL_NAMES: [&str; 7] = ["mu20", "mu11", "mu02", "mu30", "mu21", "mu12", "mu03"];

/// Names of the normalized moments, in [`Moments::normalized`] order
pub const NORMALIZED_NAMES: [&str; 7] = ["nu20", "nu11", "nu02", "nu30", "nu21", "nu12", "nu03"];

/// Raw, central and normalized moments up to order 3
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub m20: f64,
    pub m11: f64,
    pub m02: f64,
    pub m30: f64,
    pub m21: f64,
    pub m12: f64,
    pub m03: f64,

    pub mu20: f64,
    pub mu11: f64,
    pub mu02: f64,
    pub mu30: f64,
    pub mu21: f64,
    pub mu12: f64,
    pub mu03: f64,

    pub nu20: f64,
    pub nu11: f64,
    pub nu02: f64,
    pub nu30: f64,
    pub nu21: f64,
    pub nu12: f64,
    pub nu03: f64,
}

impl Moments {
    /// Moments of a grayscale image, each pixel weighted by its sample value.
    ///
    /// # Errors
    ///
    /// Returns a core shape error for color input.
    pub fn from_pixels(pix: &Pix) -> RegionResult<Self> {
        pix.check_gray()?;
        let mut raw = [0f64; 10];
        for y in 0..pix.height() {
            let row = pix.row_data(y);
            let yf = y as f64;
            // per-row sums of v, v*x, v*x^2, v*x^3
            let (mut s0, mut s1, mut s2, mut s3) = (0f64, 0f64, 0f64, 0f64);
            for (x, &v) in row.iter().enumerate() {
                if v == 0 {
                    continue;
                }
                let v = v as f64;
                let xf = x as f64;
                s0 += v;
                s1 += v * xf;
                s2 += v * xf * xf;
                s3 += v * xf * xf * xf;
            }
            let (y2, y3) = (yf * yf, yf * yf * yf);
            raw[0] += s0;
            raw[1] += s1;
            raw[2] += s0 * yf;
            raw[3] += s2;
            raw[4] += s1 * yf;
            raw[5] += s0 * y2;
            raw[6] += s3;
            raw[7] += s2 * yf;
            raw[8] += s1 * y2;
            raw[9] += s0 * y3;
        }
        Ok(Self::complete(raw))
    }

    /// Moments of the region enclosed by a closed border polygon.
    ///
    /// The result does not depend on the border's orientation. Borders
    /// enclosing no area give all-zero moments.
    pub fn from_border(border: &Border) -> Self {
        let mut a = [0f64; 10];
        let points = border.points();
        let Some(last) = points.last() else {
            return Self::default();
        };

        let (mut xp, mut yp) = (last.x as f64, last.y as f64);
        for p in points {
            let (xi, yi) = (p.x as f64, p.y as f64);
            let (xp2, yp2) = (xp * xp, yp * yp);
            let (xi2, yi2) = (xi * xi, yi * yi);
            let dxy = xp * yi - xi * yp;
            let xs = xp + xi;
            let ys = yp + yi;

            a[0] += dxy;
            a[1] += dxy * xs;
            a[2] += dxy * ys;
            a[3] += dxy * (xp * xs + xi2);
            a[4] += dxy * (xp * (ys + yp) + xi * (ys + yi));
            a[5] += dxy * (yp * ys + yi2);
            a[6] += dxy * xs * (xp2 + xi2);
            a[7] += dxy * (xp2 * (3.0 * yp + yi) + 2.0 * xi * xp * ys + xi2 * (yp + 3.0 * yi));
            a[8] += dxy * (yp2 * (3.0 * xp + xi) + 2.0 * yi * yp * xs + yi2 * (xp + 3.0 * xi));
            a[9] += dxy * ys * (yp2 + yi2);

            xp = xi;
            yp = yi;
        }

        if a[0].abs() <= f64::from(f32::EPSILON) {
            return Self::default();
        }
        let sign = a[0].signum();
        let scale = [
            2.0, 6.0, 6.0, 12.0, 24.0, 12.0, 20.0, 60.0, 60.0, 20.0,
        ];
        let mut raw = [0f64; 10];
        for ((r, v), s) in raw.iter_mut().zip(a).zip(scale) {
            *r = sign * v / s;
        }
        Self::complete(raw)
    }

    /// Derive central and normalized moments from raw moments.
    fn complete(raw: [f64; 10]) -> Self {
        let [m00, m10, m01, m20, m11, m02, m30, m21, m12, m03] = raw;
        let inv_m00 = if m00 != 0.0 { 1.0 / m00 } else { 0.0 };
        let cx = m10 * inv_m00;
        let cy = m01 * inv_m00;

        let mu20 = m20 - m10 * cx;
        let mu11 = m11 - m10 * cy;
        let mu02 = m02 - m01 * cy;
        let mu30 = m30 - cx * (3.0 * mu20 + cx * m10);
        let mu21 = m21 - cx * (2.0 * mu11 + cx * m01) - cy * mu20;
        let mu12 = m12 - cy * (2.0 * mu11 + cy * m10) - cx * mu02;
        let mu03 = m03 - cy * (3.0 * mu02 + cy * m01);

        let s2 = inv_m00 * inv_m00;
        let s3 = s2 * inv_m00.abs().sqrt();

        Self {
            m00,
            m10,
            m01,
            m20,
            m11,
            m02,
            m30,
            m21,
            m12,
            m03,
            mu20,
            mu11,
            mu02,
            mu30,
            mu21,
            mu12,
            mu03,
            nu20: mu20 * s2,
            nu11: mu11 * s2,
            nu02: mu02 * s2,
            nu30: mu30 * s3,
            nu21: mu21 * s3,
            nu12: mu12 * s3,
            nu03: mu03 * s3,
        }
    }

    /// `(m10 / m00, m01 / m00)`, or `(0, 0)` when `m00` is zero
    pub fn centroid(&self) -> (f64, f64) {
        if self.m00 == 0.0 {
            (0.0, 0.0)
        } else {
            (self.m10 / self.m00, self.m01 / self.m00)
        }
    }

    /// Raw moments in [`RAW_NAMES`] order
    pub fn raw(&self) -> [f64; 10] {
        [
            self.m00, self.m10, self.m01, self.m20, self.m11, self.m02, self.m30, self.m21,
            self.m12, self.m03,
        ]
    }

    /// Central moments in [`CENTRAL_NAMES`] order
    pub fn central(&self) -> [f64; 7] {
        [
            self.mu20, self.mu11, self.mu02, self.mu30, self.mu21, self.mu12, self.mu03,
        ]
    }

    /// Normalized moments in [`NORMALIZED_NAMES`] order
    pub fn normalized(&self) -> [f64; 7] {
        [
            self.nu20, self.nu11, self.nu02, self.nu30, self.nu21, self.nu12, self.nu03,
        ]
    }

    /// Translation, scale and rotation invariants `(M1, M2, M3)`.
    ///
    /// - `M1 = nu20 + nu02`
    /// - `M2 = (nu20 - nu02)^2 + 4 nu11^2`
    /// - `M3 = (nu30 - 3 nu12)^2 + (3 nu21 - nu03)^2`
    pub fn invariants(&self) -> (f64, f64, f64) {
        let m1 = self.nu20 + self.nu02;
        let m2 = (self.nu20 - self.nu02).powi(2) + 4.0 * self.nu11.powi(2);
        let m3 = (self.nu30 - 3.0 * self.nu12).powi(2) + (3.0 * self.nu21 - self.nu03).powi(2);
        (m1, m2, m3)
    }
}
