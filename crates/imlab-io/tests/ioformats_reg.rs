//! Image format regression test
//!
//! Lossless round trips through PNM and PNG for gray and BGR images,
//! bounded error through JPEG, and format detection from headers.

use imlab_core::{Channels, Pix};
use imlab_io::{
    ImageFormat, detect_format, detect_format_from_bytes, read_image, read_image_mem, write_image,
    write_image_mem,
};
use imlab_test::{RegParams, regout_dir};
use std::fs;

fn gradient_gray(w: u32, h: u32) -> Pix {
    let data = (0..h)
        .flat_map(|y| (0..w).map(move |x| (x * 3 + y * 2) as u8))
        .collect();
    Pix::from_vec(w, h, Channels::Gray, data).unwrap()
}

fn gradient_bgr(w: u32, h: u32) -> Pix {
    let mut pm = Pix::new(w, h, Channels::Bgr).unwrap().to_mut();
    for y in 0..h {
        for x in 0..w {
            pm.set_bgr(x, y, (x * 4) as u8, (y * 4) as u8, 200).unwrap();
        }
    }
    pm.into()
}

fn max_abs_diff(a: &Pix, b: &Pix) -> u8 {
    a.data()
        .iter()
        .zip(b.data())
        .map(|(&x, &y)| x.abs_diff(y))
        .max()
        .unwrap_or(0)
}

#[test]
fn ioformats_reg() {
    let mut rp = RegParams::new("ioformats");
    let outdir = regout_dir();
    fs::create_dir_all(&outdir).unwrap();

    let gray = gradient_gray(37, 23);
    let bgr = gradient_bgr(40, 30);

    // --- Lossless formats, through memory and through files ---
    for format in [ImageFormat::Pnm, ImageFormat::Png] {
        for pix in [&gray, &bgr] {
            let bytes = write_image_mem(pix, format).unwrap();
            rp.compare_values(
                1.0,
                (detect_format_from_bytes(&bytes).unwrap() == format) as u8 as f64,
                0.0,
            );
            let back = read_image_mem(&bytes).unwrap();
            rp.compare_pix(pix, &back);

            let path = format!(
                "{}/ioformats_{}.{}",
                outdir,
                pix.channels().count(),
                format.extension()
            );
            write_image(pix, &path, format).unwrap();
            rp.compare_values(1.0, (detect_format(&path).unwrap() == format) as u8 as f64, 0.0);
            rp.compare_pix(pix, &read_image(&path).unwrap());
        }
    }

    // --- JPEG keeps geometry and stays close on smooth content ---
    for pix in [&gray, &bgr] {
        let bytes = write_image_mem(pix, ImageFormat::Jpeg).unwrap();
        let back = read_image_mem(&bytes).unwrap();
        rp.compare_values(pix.width() as f64, back.width() as f64, 0.0);
        rp.compare_values(pix.height() as f64, back.height() as f64, 0.0);
        rp.compare_values(
            pix.channels().count() as f64,
            back.channels().count() as f64,
            0.0,
        );
        rp.compare_values(0.0, max_abs_diff(pix, &back) as f64, 40.0);
    }

    // --- ASCII PGM with a comment and a reduced maxval ---
    let ascii = b"P2\n# comment\n3 1\n15\n0 15 5\n";
    let pix = read_image_mem(ascii).unwrap();
    rp.compare_strings(&[0, 255, 85], pix.data());

    // --- Garbage is rejected ---
    rp.compare_values(
        1.0,
        read_image_mem(b"not an image").is_err() as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "ioformats regression test failed");
}
