//! Convolution kernels
//!
//! A [`Kernel`] is a square, odd-sized matrix of weights with an optional
//! divisor. Named kernels used by the workbench dialogs live in small
//! catalogue enums ([`SmoothingKernel`], [`LaplacianKernel`],
//! [`PrewittDirection`]) that map a stable display name to the weights.

use crate::{FilterError, FilterResult};
use std::fmt;
use std::str::FromStr;

/// A square 2D convolution kernel
///
/// The effective weight of each element is `weight / divisor`. Keeping
/// integer weights and a separate divisor lets normalized kernels
/// reproduce exact averages.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: u32,
    weights: Vec<f64>,
    divisor: f64,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `size` is even or zero, or
    /// if `weights.len() != size * size`.
    pub fn new(size: u32, weights: Vec<f64>) -> FilterResult<Self> {
        Self::with_divisor(size, weights, 1.0)
    }

    /// Create a kernel whose weights are divided by `divisor`.
    pub fn with_divisor(size: u32, weights: Vec<f64>, divisor: f64) -> FilterResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel size must be odd, got {}",
                size
            )));
        }
        if weights.len() != (size * size) as usize {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} weights for a {}x{} kernel, got {}",
                size * size,
                size,
                size,
                weights.len()
            )));
        }
        if divisor == 0.0 || !divisor.is_finite() {
            return Err(FilterError::InvalidKernel(format!(
                "invalid kernel divisor {}",
                divisor
            )));
        }
        Ok(Self {
            size,
            weights,
            divisor,
        })
    }

    /// Create a 3x3 kernel from rows.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self {
            size: 3,
            weights: rows.iter().flatten().copied().collect(),
            divisor: 1.0,
        }
    }

    fn from_rows_div(rows: [[f64; 3]; 3], divisor: f64) -> Self {
        Self {
            divisor,
            ..Self::from_rows(rows)
        }
    }

    /// Side length
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Distance from the center to the edge (`size / 2`)
    #[inline]
    pub fn radius(&self) -> u32 {
        self.size / 2
    }

    /// Raw weights, row-major, before division
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Divisor applied to the weighted sum
    pub fn divisor(&self) -> f64 {
        self.divisor
    }

    /// Effective weight at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x < self.size && y < self.size {
            Some(self.weights[(y * self.size + x) as usize] / self.divisor)
        } else {
            None
        }
    }

    /// Sobel kernel responding to horizontal gradients (Gx)
    pub fn sobel_x() -> Self {
        Self::from_rows([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]])
    }

    /// Sobel kernel responding to vertical gradients (Gy)
    pub fn sobel_y() -> Self {
        Self::from_rows([[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]])
    }
}

/// Normalized smoothing kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmoothingKernel {
    /// Cross-shaped average, weights / 5
    Average,
    /// Weighted 3x3 approximation of a Gaussian, weights / 17
    Gaussian,
}

impl SmoothingKernel {
    /// Every smoothing kernel, in display order
    pub const ALL: [SmoothingKernel; 2] = [SmoothingKernel::Average, SmoothingKernel::Gaussian];

    /// Stable display name
    pub fn name(self) -> &'static str {
        match self {
            SmoothingKernel::Average => "Uśrednienie",
            SmoothingKernel::Gaussian => "Filtr Gaussa",
        }
    }

    /// Look up a kernel by display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// The kernel weights
    pub fn kernel(self) -> Kernel {
        match self {
            SmoothingKernel::Average => {
                Kernel::from_rows_div([[0.0, 1.0, 0.0], [1.0, 1.0, 1.0], [0.0, 1.0, 0.0]], 5.0)
            }
            SmoothingKernel::Gaussian => {
                Kernel::from_rows_div([[1.0, 2.0, 1.0], [2.0, 5.0, 2.0], [1.0, 2.0, 1.0]], 17.0)
            }
        }
    }
}

/// Laplacian sharpening kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaplacianKernel {
    /// 4-neighbor Laplacian
    Variant1,
    /// 8-neighbor Laplacian
    Variant2,
    /// Diagonal-weighted Laplacian
    Variant3,
}

impl LaplacianKernel {
    /// Every Laplacian kernel, in display order
    pub const ALL: [LaplacianKernel; 3] = [
        LaplacianKernel::Variant1,
        LaplacianKernel::Variant2,
        LaplacianKernel::Variant3,
    ];

    /// Stable display name
    pub fn name(self) -> &'static str {
        match self {
            LaplacianKernel::Variant1 => "Laplacjan wariant 1",
            LaplacianKernel::Variant2 => "Laplacjan wariant 2",
            LaplacianKernel::Variant3 => "Laplacjan wariant 3",
        }
    }

    /// Look up a kernel by display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// The kernel weights
    pub fn kernel(self) -> Kernel {
        match self {
            LaplacianKernel::Variant1 => {
                Kernel::from_rows([[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]])
            }
            LaplacianKernel::Variant2 => {
                Kernel::from_rows([[-1.0, -1.0, -1.0], [-1.0, 8.0, -1.0], [-1.0, -1.0, -1.0]])
            }
            LaplacianKernel::Variant3 => {
                Kernel::from_rows([[-1.0, 2.0, -1.0], [2.0, -4.0, 2.0], [-1.0, 2.0, -1.0]])
            }
        }
    }
}

/// Compass direction of a Prewitt gradient kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrewittDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl PrewittDirection {
    /// Every direction, clockwise from north
    pub const ALL: [PrewittDirection; 8] = [
        PrewittDirection::N,
        PrewittDirection::NE,
        PrewittDirection::E,
        PrewittDirection::SE,
        PrewittDirection::S,
        PrewittDirection::SW,
        PrewittDirection::W,
        PrewittDirection::NW,
    ];

    /// Stable display name
    pub fn name(self) -> &'static str {
        match self {
            PrewittDirection::N => "Prewitt N (0°)",
            PrewittDirection::NE => "Prewitt NE (45°)",
            PrewittDirection::E => "Prewitt E (90°)",
            PrewittDirection::SE => "Prewitt SE (135°)",
            PrewittDirection::S => "Prewitt S (180°)",
            PrewittDirection::SW => "Prewitt SW (225°)",
            PrewittDirection::W => "Prewitt W (270°)",
            PrewittDirection::NW => "Prewitt NW (315°)",
        }
    }

    /// Look up a direction by display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// Clockwise angle from north, in degrees
    pub fn angle(self) -> u32 {
        self as u32 * 45
    }

    /// The kernel weights
    pub fn kernel(self) -> Kernel {
        let rows = match self {
            PrewittDirection::N => [[1.0, 1.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -1.0, -1.0]],
            PrewittDirection::NE => [[0.0, 1.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, -1.0, 0.0]],
            PrewittDirection::E => [[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]],
            PrewittDirection::SE => [[-1.0, -1.0, 0.0], [-1.0, 0.0, 1.0], [0.0, 1.0, 1.0]],
            PrewittDirection::S => [[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
            PrewittDirection::SW => [[0.0, -1.0, -1.0], [1.0, 0.0, -1.0], [1.0, 1.0, 0.0]],
            PrewittDirection::W => [[1.0, 0.0, -1.0], [1.0, 0.0, -1.0], [1.0, 0.0, -1.0]],
            PrewittDirection::NW => [[1.0, 1.0, 0.0], [1.0, 0.0, -1.0], [0.0, -1.0, -1.0]],
        };
        Kernel::from_rows(rows)
    }
}

macro_rules! impl_catalogue_traits {
    ($($ty:ident),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }

            impl FromStr for $ty {
                type Err = FilterError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::from_name(s).ok_or_else(|| FilterError::UnknownName(s.to_string()))
                }
            }
        )*
    };
}

impl_catalogue_traits!(SmoothingKernel, LaplacianKernel, PrewittDirection);
