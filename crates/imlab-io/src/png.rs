//! PNG image format support
//!
//! Decoding normalizes every PNG variant to 8-bit samples (palettes are
//! expanded, 16-bit samples stripped). Gray and gray+alpha images load as
//! grayscale; RGB and RGBA load as B,G,R color with alpha dropped.

use crate::{IoError, IoResult};
use imlab_core::{Channels, Pix};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let samples = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG output format: {:?} {:?}",
                other, output_info.bit_depth
            )));
        }
    };
    log::debug!(
        "PNG {}x{} {:?} -> {} samples/pixel",
        width,
        height,
        output_info.color_type,
        samples
    );

    let channels = if samples <= 2 {
        Channels::Gray
    } else {
        Channels::Bgr
    };
    let mut data = Vec::with_capacity(width as usize * height as usize * channels.count() as usize);
    for y in 0..height as usize {
        let row = &buf[y * bytes_per_row..y * bytes_per_row + width as usize * samples];
        for px in row.chunks_exact(samples) {
            match channels {
                Channels::Gray => data.push(px[0]),
                Channels::Bgr => data.extend_from_slice(&[px[2], px[1], px[0]]),
            }
        }
    }

    Ok(Pix::from_vec(width, height, channels, data)?)
}

/// Write a PNG image (8-bit gray or RGB)
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let color_type = match pix.channels() {
        Channels::Gray => ColorType::Grayscale,
        Channels::Bgr => ColorType::Rgb,
    };

    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let result = match pix.channels() {
        Channels::Gray => writer.write_image_data(pix.data()),
        Channels::Bgr => {
            let rgb: Vec<u8> = pix
                .data()
                .chunks_exact(3)
                .flat_map(|bgr| [bgr[2], bgr[1], bgr[0]])
                .collect();
            writer.write_image_data(&rgb)
        }
    };
    result.map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let mut pm = Pix::new(10, 10, Channels::Gray).unwrap().to_mut();
        for y in 0..10 {
            for x in 0..10 {
                pm.set_pixel(x, y, ((x + y) * 10) as u8).unwrap();
            }
        }
        let pix: Pix = pm.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();

        let pix2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2.width(), 10);
        assert_eq!(pix2.height(), 10);
        assert!(pix2.is_gray());
        assert_eq!(pix2.data(), pix.data());
    }

    #[test]
    fn test_png_roundtrip_color() {
        let mut pm = Pix::new(5, 5, Channels::Bgr).unwrap().to_mut();
        pm.set_bgr(0, 0, 255, 0, 0).unwrap();
        pm.set_bgr(1, 1, 0, 255, 0).unwrap();
        pm.set_bgr(2, 2, 0, 0, 255).unwrap();
        let pix: Pix = pm.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();

        let pix2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2.get_bgr(0, 0), Some((255, 0, 0)));
        assert_eq!(pix2.get_bgr(1, 1), Some((0, 255, 0)));
        assert_eq!(pix2.get_bgr(2, 2), Some((0, 0, 255)));
    }
}
