//! JPEG image format support
//!
//! Uses `jpeg-decoder` for reading and `jpeg-encoder` for writing.
//! Grayscale JPEGs load as grayscale, everything else as B,G,R color.

use crate::{IoError, IoResult};
use imlab_core::{Channels, Pix};
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType, Encoder};
use std::io::{Read, Write};

/// Quality used by [`write_jpeg`]
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG image info".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    log::debug!("JPEG {}x{} {:?}", width, height, info.pixel_format);

    match info.pixel_format {
        PixelFormat::L8 => Ok(Pix::from_vec(width, height, Channels::Gray, pixels)?),
        PixelFormat::L16 => {
            // big-endian 16-bit samples, keep the high byte
            let data = pixels.chunks_exact(2).map(|s| s[0]).collect();
            Ok(Pix::from_vec(width, height, Channels::Gray, data)?)
        }
        PixelFormat::RGB24 => {
            let data = pixels
                .chunks_exact(3)
                .flat_map(|rgb| [rgb[2], rgb[1], rgb[0]])
                .collect();
            Ok(Pix::from_vec(width, height, Channels::Bgr, data)?)
        }
        PixelFormat::CMYK32 => {
            let data = pixels
                .chunks_exact(4)
                .flat_map(|cmyk| {
                    let k = 255 - cmyk[3] as u32;
                    let conv = |c: u8| ((255 - c as u32) * k / 255) as u8;
                    [conv(cmyk[2]), conv(cmyk[1]), conv(cmyk[0])]
                })
                .collect();
            Ok(Pix::from_vec(width, height, Channels::Bgr, data)?)
        }
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "unsupported JPEG pixel format: {:?}",
            other
        ))),
    }
}

/// Write a JPEG image at [`DEFAULT_QUALITY`]
pub fn write_jpeg<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    write_jpeg_with_quality(pix, writer, DEFAULT_QUALITY)
}

/// Write a JPEG image at the given quality (1..=100)
pub fn write_jpeg_with_quality<W: Write>(pix: &Pix, writer: W, quality: u8) -> IoResult<()> {
    let width = u16::try_from(pix.width())
        .map_err(|_| IoError::EncodeError(format!("width {} too large for JPEG", pix.width())))?;
    let height = u16::try_from(pix.height()).map_err(|_| {
        IoError::EncodeError(format!("height {} too large for JPEG", pix.height()))
    })?;
    let color_type = match pix.channels() {
        Channels::Gray => ColorType::Luma,
        Channels::Bgr => ColorType::Bgr,
    };

    let encoder = Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(pix.data(), width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}
