//! imlab-io - Image and feature-table I/O
//!
//! Supported image formats (each behind a Cargo feature):
//!
//! - PNM (`pnm`): P2/P3/P5/P6 read, P5/P6 write
//! - PNG (`png-format`): 8-bit gray and RGB(A) read, gray/RGB write
//! - JPEG (`jpeg`): baseline/progressive read, baseline write
//!
//! Color images are held in memory with B, G, R channel order; codecs
//! convert to and from the on-disk order.
//!
//! The [`export`] module writes feature tables produced by
//! `imlab-region` as tab-separated text.

mod error;
pub mod export;
pub mod format;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use export::{
    save_feature_table, save_object_table, write_feature_table, write_object_table,
};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use imlab_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file, detecting the format from its header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let reader = BufReader::new(File::open(path)?);
    read_image_format(reader, format)
}

/// Read an image from memory, detecting the format from its header.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

#[allow(unused_variables)]
fn read_image_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<Pix> {
    match format {
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write an image to a file in the given format.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_format(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into memory in the given format.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(pix, &mut buffer, format)?;
    Ok(buffer)
}

#[allow(unused_variables)]
fn write_image_format<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, writer),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, writer),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}
