//! Border handling for spatial filters
//!
//! When a filter window extends past the image edge, the samples outside
//! are either synthesized ([`BorderPolicy::Reflect`],
//! [`BorderPolicy::Constant`]) or never read
//! ([`BorderPolicy::ResultFill`]).

use crate::{FilterError, FilterResult};
use std::fmt;

/// How a spatial filter treats pixels outside the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderPolicy {
    /// Mirror across the edge, repeating the edge sample (`fedcba|abcdef`)
    #[default]
    Reflect,
    /// Treat every outside sample as the given value
    Constant(u8),
    /// Compute only where the window fits; the outer band of the result
    /// (kernel radius wide) is set to the given value
    ResultFill(u8),
}

impl BorderPolicy {
    /// Stable identifiers, in display order
    pub const NAMES: [&'static str; 3] =
        ["BORDER_CONSTANT", "BORDER_REFLECT", "Wypełnienie wyniku stałą"];

    /// Stable identifier of this policy
    pub fn name(self) -> &'static str {
        match self {
            BorderPolicy::Constant(_) => Self::NAMES[0],
            BorderPolicy::Reflect => Self::NAMES[1],
            BorderPolicy::ResultFill(_) => Self::NAMES[2],
        }
    }

    /// Build a policy from its identifier and a fill value.
    ///
    /// `value` is ignored for [`BorderPolicy::Reflect`].
    pub fn from_name(name: &str, value: u8) -> FilterResult<Self> {
        match name {
            "BORDER_CONSTANT" => Ok(BorderPolicy::Constant(value)),
            "BORDER_REFLECT" => Ok(BorderPolicy::Reflect),
            "Wypełnienie wyniku stałą" => Ok(BorderPolicy::ResultFill(value)),
            _ => Err(FilterError::UnknownName(name.to_string())),
        }
    }

    /// Sample the image at a possibly out-of-range position.
    ///
    /// Returns `None` when the policy does not synthesize samples.
    #[inline]
    pub(crate) fn sample(self, data: &[u8], width: u32, height: u32, x: i64, y: i64) -> Option<u8> {
        let w = width as i64;
        let h = height as i64;
        if (0..w).contains(&x) && (0..h).contains(&y) {
            return Some(data[(y * w + x) as usize]);
        }
        match self {
            BorderPolicy::Reflect => {
                let sx = reflect_index(x, w);
                let sy = reflect_index(y, h);
                Some(data[(sy * w + sx) as usize])
            }
            BorderPolicy::Constant(value) => Some(value),
            BorderPolicy::ResultFill(_) => None,
        }
    }
}

impl fmt::Display for BorderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BorderPolicy::Reflect => f.write_str(self.name()),
            BorderPolicy::Constant(v) | BorderPolicy::ResultFill(v) => {
                write!(f, "{}({})", self.name(), v)
            }
        }
    }
}

/// Map an index into `[0, n)` by mirroring with edge repetition.
fn reflect_index(mut i: i64, n: i64) -> i64 {
    if n == 1 {
        return 0;
    }
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i;
        }
    }
}
