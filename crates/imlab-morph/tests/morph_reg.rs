//! Binary morphology regression test
//!
//! Duality and ordering properties of erosion and dilation on random
//! masks, idempotence of opening and closing, domain preservation and
//! skeletonization.

use imlab_core::{Channels, ErrorKind, Pix};
use imlab_io::ImageFormat;
use imlab_morph::{
    MorphOptions, SelShape, close, dilate, erode, open, skeletonize, validate_binary,
};
use imlab_test::RegParams;
use rand::prelude::*;

fn random_mask(rng: &mut StdRng, w: u32, h: u32, fg: u8, density: f64) -> Pix {
    let data = (0..w * h)
        .map(|_| if rng.random_bool(density) { fg } else { 0 })
        .collect();
    Pix::from_vec(w, h, Channels::Gray, data).unwrap()
}

fn subset(a: &Pix, b: &Pix) -> bool {
    a.data().iter().zip(b.data()).all(|(&x, &y)| x == 0 || y != 0)
}

fn count_on(pix: &Pix) -> usize {
    pix.data().iter().filter(|&&v| v != 0).count()
}

#[test]
fn morph_reg() {
    let mut rp = RegParams::new("morph");
    let mut rng = StdRng::seed_from_u64(77);

    // --- erode(A) <= A <= dilate(A); open(A) <= A <= close(A) ---
    for shape in SelShape::ALL {
        for size in [3, 5, 7] {
            let opts = MorphOptions {
                shape,
                size,
                iterations: 1,
            };
            let pix = random_mask(&mut rng, 40, 30, 255, 0.6);
            let eroded = erode(&pix, &opts).unwrap();
            let dilated = dilate(&pix, &opts).unwrap();
            let opened = open(&pix, &opts).unwrap();
            let closed = close(&pix, &opts).unwrap();
            rp.compare_values(1.0, subset(&eroded, &pix) as u8 as f64, 0.0);
            rp.compare_values(1.0, subset(&pix, &dilated) as u8 as f64, 0.0);
            rp.compare_values(1.0, subset(&opened, &pix) as u8 as f64, 0.0);
            rp.compare_values(1.0, subset(&pix, &closed) as u8 as f64, 0.0);

            // opening and closing are idempotent
            rp.compare_pix(&opened, &open(&opened, &opts).unwrap());
            rp.compare_pix(&closed, &close(&closed, &opts).unwrap());
        }
    }

    // --- 0/1 masks answer in 0/1 and agree with the 0/255 result ---
    let full = random_mask(&mut rng, 32, 32, 255, 0.5);
    let binary = full.to_binary_mask().unwrap();
    let opts = MorphOptions {
        shape: SelShape::Ellipse,
        size: 5,
        iterations: 2,
    };
    let out01 = dilate(&binary, &opts).unwrap();
    let out255 = dilate(&full, &opts).unwrap();
    rp.compare_values(1.0, out01.max_value() as f64, 0.0);
    rp.compare_pix(&out01.to_8bit_mask().unwrap(), &out255);

    // --- Skeleton of an empty mask is empty ---
    let empty = Pix::new(8, 8, Channels::Gray).unwrap();
    let skel = skeletonize(&empty).unwrap();
    rp.compare_values(0.0, count_on(&skel) as f64, 0.0);

    // --- Skeleton of a bar lies inside it and is much thinner ---
    let mut pm = Pix::new(40, 20, Channels::Gray).unwrap().to_mut();
    for y in 5..14 {
        for x in 4..36 {
            pm.set_pixel(x, y, 255).unwrap();
        }
    }
    let bar: Pix = pm.into();
    let skel = skeletonize(&bar).unwrap();
    rp.compare_values(1.0, subset(&skel, &bar) as u8 as f64, 0.0);
    let ratio = count_on(&skel) as f64 / count_on(&bar) as f64;
    rp.compare_values(1.0, (ratio > 0.0 && ratio < 0.5) as u8 as f64, 0.0);
    rp.write_pix_and_check(&skel, ImageFormat::Png).unwrap();

    // Skeleton keeps the 0/1 domain
    let skel01 = skeletonize(&bar.to_binary_mask().unwrap()).unwrap();
    rp.compare_pix(&skel01.to_8bit_mask().unwrap(), &skel);

    // --- Invalid input ---
    let gray = Pix::new_filled(5, 5, Channels::Gray, 128).unwrap();
    let err = validate_binary(&gray).unwrap_err();
    rp.compare_values(1.0, (err.kind() == ErrorKind::Domain) as u8 as f64, 0.0);
    let bgr = Pix::new(5, 5, Channels::Bgr).unwrap();
    let err = erode(&bgr, &MorphOptions::default()).unwrap_err();
    rp.compare_values(1.0, (err.kind() == ErrorKind::Shape) as u8 as f64, 0.0);
    let err = open(
        &empty,
        &MorphOptions {
            size: 2,
            ..Default::default()
        },
    )
    .unwrap_err();
    rp.compare_values(1.0, (err.kind() == ErrorKind::Range) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "morph regression test failed");
}
