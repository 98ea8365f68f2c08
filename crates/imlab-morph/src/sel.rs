//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Elements here are square, odd-sized and centered, and are
//! generated from one of three shapes.

use crate::{MorphError, MorphResult};
use std::fmt;
use std::str::FromStr;

/// Smallest structuring element size
pub const MIN_SEL_SIZE: u32 = 3;

/// Shape of a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelShape {
    /// Full square
    #[default]
    Rect,
    /// Center row and center column
    Cross,
    /// Filled ellipse inscribed in the square
    Ellipse,
}

impl SelShape {
    /// Every shape, in display order
    pub const ALL: [SelShape; 3] = [SelShape::Rect, SelShape::Cross, SelShape::Ellipse];

    /// Stable identifier (`"rect"`, `"cross"`, `"ellipse"`)
    pub fn key(self) -> &'static str {
        match self {
            SelShape::Rect => "rect",
            SelShape::Cross => "cross",
            SelShape::Ellipse => "ellipse",
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            SelShape::Rect => "Prostokąt",
            SelShape::Cross => "Krzyż",
            SelShape::Ellipse => "Elipsa",
        }
    }

    /// Look up a shape by identifier or display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.key() == name || s.name() == name)
    }
}

impl fmt::Display for SelShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SelShape {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| MorphError::UnknownShape(s.to_string()))
    }
}

/// Structuring element
///
/// A `size x size` grid of hits centered at `(size / 2, size / 2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    shape: SelShape,
    size: u32,
    hits: Vec<bool>,
}

impl Sel {
    /// Create a structuring element of the given shape.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] if `size` is even or below 3.
    pub fn new(shape: SelShape, size: u32) -> MorphResult<Self> {
        if size < MIN_SEL_SIZE || size % 2 == 0 {
            return Err(MorphError::InvalidSel(format!(
                "size must be odd and >= {}, got {}",
                MIN_SEL_SIZE, size
            )));
        }
        let n = size as usize;
        let c = n / 2;
        let mut hits = vec![false; n * n];
        match shape {
            SelShape::Rect => hits.fill(true),
            SelShape::Cross => {
                for i in 0..n {
                    hits[c * n + i] = true;
                    hits[i * n + c] = true;
                }
            }
            SelShape::Ellipse => {
                // row half-widths from the inscribed ellipse
                let r = c as f64;
                for (i, row) in hits.chunks_exact_mut(n).enumerate() {
                    let dy = i as f64 - r;
                    let dx = (r * ((r * r - dy * dy) / (r * r)).sqrt()).round() as usize;
                    let j1 = c.saturating_sub(dx);
                    let j2 = (c + dx + 1).min(n);
                    row[j1..j2].fill(true);
                }
            }
        }
        Ok(Self { shape, size, hits })
    }

    /// 3x3 cross
    pub fn cross3() -> Self {
        Self {
            shape: SelShape::Cross,
            size: 3,
            hits: vec![false, true, false, true, true, true, false, true, false],
        }
    }

    /// Shape the element was generated from
    #[inline]
    pub fn shape(&self) -> SelShape {
        self.shape
    }

    /// Side length
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Whether `(x, y)` is a hit
    pub fn is_hit(&self, x: u32, y: u32) -> bool {
        x < self.size && y < self.size && self.hits[(y * self.size + x) as usize]
    }

    /// Number of hits
    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|&&h| h).count()
    }

    /// Offsets `(dx, dy)` of all hits relative to the center
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let n = self.size as i32;
        let c = n / 2;
        self.hits
            .iter()
            .enumerate()
            .filter(|(_, h)| **h)
            .map(move |(i, _)| (i as i32 % n - c, i as i32 / n - c))
    }
}

impl fmt::Display for Sel {
    /// Rows of `x` (hit) and `.` (no hit)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.hits.chunks_exact(self.size as usize) {
            let line: String = row.iter().map(|&h| if h { 'x' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
