//! PNM (Portable Any Map) image format support
//!
//! Supports:
//! - PGM (P2 ASCII, P5 binary) - grayscale
//! - PPM (P3 ASCII, P6 binary) - color
//!
//! Only 8-bit data is handled. A maxval below 255 is rescaled to the full
//! 8-bit range on read; files are always written with maxval 255 in the
//! binary variants.

use crate::{IoError, IoResult};
use imlab_core::{Channels, Pix};
use std::io::{BufRead, Write};

/// Read a PNM image
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Pix> {
    let magic = read_token(&mut reader)?;
    let (channels, binary) = match magic.as_str() {
        "P2" => (Channels::Gray, false),
        "P3" => (Channels::Bgr, false),
        "P5" => (Channels::Gray, true),
        "P6" => (Channels::Bgr, true),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM type: {}",
                other
            )));
        }
    };

    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;
    let maxval = read_number(&mut reader, "maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNM maxval: {}",
            maxval
        )));
    }
    log::debug!(
        "PNM header: {} {}x{} maxval {}",
        magic,
        width,
        height,
        maxval
    );

    let samples = width as usize * height as usize * channels.count() as usize;
    let mut raw = vec![0u8; samples];
    if binary {
        reader
            .read_exact(&mut raw)
            .map_err(|e| IoError::DecodeError(format!("truncated PNM raster: {}", e)))?;
    } else {
        for slot in raw.iter_mut() {
            let v = read_number(&mut reader, "sample")?;
            if v > maxval {
                return Err(IoError::InvalidData(format!(
                    "sample {} exceeds maxval {}",
                    v, maxval
                )));
            }
            *slot = v as u8;
        }
    }

    if maxval != 255 {
        for v in raw.iter_mut() {
            *v = ((*v as u32 * 255 + maxval / 2) / maxval).min(255) as u8;
        }
    }

    // PPM stores R, G, B
    if channels == Channels::Bgr {
        for px in raw.chunks_exact_mut(3) {
            px.swap(0, 2);
        }
    }

    Ok(Pix::from_vec(width, height, channels, raw)?)
}

/// Write a PNM image (P5 for grayscale, P6 for color)
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let magic = match pix.channels() {
        Channels::Gray => "P5",
        Channels::Bgr => "P6",
    };
    write!(writer, "{}\n{} {}\n255\n", magic, pix.width(), pix.height())?;

    match pix.channels() {
        Channels::Gray => writer.write_all(pix.data())?,
        Channels::Bgr => {
            let rgb: Vec<u8> = pix
                .data()
                .chunks_exact(3)
                .flat_map(|bgr| [bgr[2], bgr[1], bgr[0]])
                .collect();
            writer.write_all(&rgb)?;
        }
    }
    Ok(())
}

/// Read one whitespace-delimited header token, skipping `#` comments.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut in_comment = false;
    loop {
        let byte = match next_byte(reader)? {
            Some(b) => b,
            None if token.is_empty() => {
                return Err(IoError::DecodeError("unexpected end of PNM header".into()));
            }
            None => return Ok(token),
        };
        if in_comment {
            if byte == b'\n' || byte == b'\r' {
                in_comment = false;
            }
            continue;
        }
        match byte {
            b'#' if token.is_empty() => in_comment = true,
            b if b.is_ascii_whitespace() => {
                if !token.is_empty() {
                    return Ok(token);
                }
            }
            b => token.push(b as char),
        }
    }
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse::<u32>()
        .map_err(|_| IoError::InvalidData(format!("invalid PNM {}: {:?}", what, token)))
}

fn next_byte<R: BufRead>(reader: &mut R) -> IoResult<Option<u8>> {
    let buf = reader.fill_buf()?;
    if buf.is_empty() {
        return Ok(None);
    }
    let byte = buf[0];
    reader.consume(1);
    Ok(Some(byte))
}
