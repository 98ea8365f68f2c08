//! Inpainting regression test
//!
//! A smooth BGR gradient gets a white scratch, the scratch is picked out
//! with a gray-level band mask and filled with both methods.

use imlab_core::{Channels, ErrorKind, Pix};
use imlab_filter::{InpaintMethod, inpaint, range_mask};
use imlab_io::ImageFormat;
use imlab_test::RegParams;

const W: u32 = 40;
const H: u32 = 30;

fn gradient() -> Pix {
    let mut pm = Pix::new(W, H, Channels::Bgr).unwrap().to_mut();
    for y in 0..H {
        for x in 0..W {
            pm.set_bgr(x, y, (x * 4) as u8, (y * 4) as u8, 200).unwrap();
        }
    }
    pm.into()
}

fn in_scratch(x: u32, y: u32) -> bool {
    ((y == 14 || y == 15) && (6..34).contains(&x)) || (x == 20 && (3..27).contains(&y))
}

#[test]
fn inpaint_reg() {
    let mut rp = RegParams::new("inpaint");

    let clean = gradient();
    let mut pm = clean.deep_clone().to_mut();
    for y in 0..H {
        for x in 0..W {
            if in_scratch(x, y) {
                pm.set_bgr(x, y, 255, 255, 255).unwrap();
            }
        }
    }
    let scratched: Pix = pm.into();

    // --- Band mask finds exactly the scratch ---
    let mask = range_mask(&scratched, 250, 255).unwrap();
    let marked = mask.data().iter().filter(|&&m| m == 255).count();
    let expected = (0..H)
        .flat_map(|y| (0..W).map(move |x| (x, y)))
        .filter(|&(x, y)| in_scratch(x, y))
        .count();
    rp.compare_values(expected as f64, marked as f64, 0.0);

    // --- Telea continues the linear gradient ---
    let telea = inpaint(&scratched, &mask, InpaintMethod::Telea, 3).unwrap();
    let worst = clean
        .data()
        .iter()
        .zip(telea.data())
        .map(|(&a, &b)| a.abs_diff(b))
        .max()
        .unwrap_or(0);
    rp.compare_values(0.0, worst as f64, 1.0);
    rp.write_pix_and_check(&telea, ImageFormat::Png).unwrap();

    // --- Navier-Stokes stays inside the range of the gradient ---
    let ns = inpaint(&scratched, &mask, InpaintMethod::NavierStokes, 3).unwrap();
    let mut outside_untouched = true;
    let mut in_range = true;
    for y in 0..H {
        for x in 0..W {
            let got = ns.get_bgr(x, y).unwrap();
            if in_scratch(x, y) {
                in_range &= got.0 <= 4 * (W - 1) as u8 && got.1 <= 4 * (H - 1) as u8 && got.2 == 200;
            } else {
                outside_untouched &= got == clean.get_bgr(x, y).unwrap();
            }
        }
    }
    rp.compare_values(1.0, in_range as u8 as f64, 0.0);
    rp.compare_values(1.0, outside_untouched as u8 as f64, 0.0);
    rp.write_pix_and_check(&ns, ImageFormat::Png).unwrap();

    // --- A gray mask of the wrong size is rejected ---
    let small = Pix::new(W - 1, H, Channels::Gray).unwrap();
    let err = inpaint(&scratched, &small, InpaintMethod::Telea, 3).unwrap_err();
    rp.compare_values(
        1.0,
        (err.kind() == ErrorKind::SizeMismatch) as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "inpaint regression test failed");
}
