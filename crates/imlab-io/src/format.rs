//! Image format detection
//!
//! Formats are recognized by their leading signature bytes; file
//! extensions are only a hint for writers.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Portable anymap (PGM / PPM)
    Pnm,
    /// Portable Network Graphics
    Png,
    /// JPEG / JFIF
    Jpeg,
}

impl ImageFormat {
    /// Conventional file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Pnm => "pnm",
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }

    /// Guess the format from a path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pnm" | "pgm" | "ppm" => Some(ImageFormat::Pnm),
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }
}

/// Leading bytes that identify each format
const SIGNATURES: [(&[u8], ImageFormat); 6] = [
    (b"\x89PNG\r\n\x1a\n", ImageFormat::Png),
    (b"\xff\xd8\xff", ImageFormat::Jpeg),
    (b"P2", ImageFormat::Pnm),
    (b"P3", ImageFormat::Pnm),
    (b"P5", ImageFormat::Pnm),
    (b"P6", ImageFormat::Pnm),
];

/// Detect the format of an image file from its first bytes.
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut head = Vec::with_capacity(8);
    File::open(path)?.take(8).read_to_end(&mut head)?;
    detect_format_from_bytes(&head)
}

/// Detect the format of an encoded image held in memory.
///
/// # Errors
///
/// [`IoError::InvalidData`] for fewer than two bytes and
/// [`IoError::UnsupportedFormat`] when no signature matches.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(format!(
            "{} bytes are too few to identify an image",
            data.len()
        )));
    }
    SIGNATURES
        .iter()
        .find(|(sig, _)| data.starts_with(sig))
        .map(|&(_, format)| format)
        .ok_or_else(|| {
            IoError::UnsupportedFormat(format!(
                "unrecognized header bytes {:02X?}",
                &data[..data.len().min(4)]
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(
            detect_format_from_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]).unwrap(),
            ImageFormat::Png
        );
        assert_eq!(
            detect_format_from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap(),
            ImageFormat::Jpeg
        );
        assert_eq!(detect_format_from_bytes(b"P5\n").unwrap(), ImageFormat::Pnm);
        assert!(detect_format_from_bytes(b"P4\n").is_err());
        assert!(detect_format_from_bytes(b"x").is_err());
    }

    #[test]
    fn test_from_path() {
        assert_eq!(ImageFormat::from_path("a/b.PGM"), Some(ImageFormat::Pnm));
        assert_eq!(ImageFormat::from_path("c.jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_path("d.tif"), None);
    }
}
