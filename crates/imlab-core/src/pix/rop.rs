//! Bitwise logical operations
//!
//! NOT, AND, OR and XOR applied to the raw byte of each pixel. The result
//! is the same whether the operands are 0/1 masks, 0/255 masks or full
//! grayscale images.

use super::Pix;
use super::arith::check_binary_operands;
use crate::error::Result;

/// Binary logical operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    /// `a & b`
    And,
    /// `a | b`
    Or,
    /// `a ^ b`
    Xor,
}

impl LogicOp {
    #[inline]
    fn apply(self, a: u8, b: u8) -> u8 {
        match self {
            LogicOp::And => a & b,
            LogicOp::Or => a | b,
            LogicOp::Xor => a ^ b,
        }
    }
}

impl Pix {
    /// Bitwise complement of every pixel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedChannels`] for color input.
    pub fn logical_not(&self) -> Result<Pix> {
        self.check_gray()?;
        Ok(self.map_samples(|v| !v))
    }

    /// Combine two grayscale images of identical size with `op`.
    pub fn logical_op(&self, other: &Pix, op: LogicOp) -> Result<Pix> {
        check_binary_operands(self, other)?;
        Ok(self.zip_samples(other, |a, b| op.apply(a, b)))
    }

    /// Bitwise AND.
    pub fn logical_and(&self, other: &Pix) -> Result<Pix> {
        self.logical_op(other, LogicOp::And)
    }

    /// Bitwise OR.
    pub fn logical_or(&self, other: &Pix) -> Result<Pix> {
        self.logical_op(other, LogicOp::Or)
    }

    /// Bitwise XOR.
    pub fn logical_xor(&self, other: &Pix) -> Result<Pix> {
        self.logical_op(other, LogicOp::Xor)
    }
}
