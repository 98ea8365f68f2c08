//! Thresholding regression test
//!
//! Fixed, band, Otsu and adaptive thresholds on synthetic images, plus
//! posterization.

use imlab_color::{
    AdaptiveMethod, AdaptiveThresholdOptions, adaptive_threshold,
    adaptive_threshold_inverse, compute_otsu_threshold, posterize, threshold_binary,
    threshold_double, threshold_otsu, threshold_with_levels,
};
use imlab_core::{Channels, ErrorKind, Pix};
use imlab_test::RegParams;
use rand::prelude::*;

fn random_gray(rng: &mut StdRng, w: u32, h: u32) -> Pix {
    let data = (0..w * h).map(|_| rng.random_range(0..=255u8)).collect();
    Pix::from_vec(w, h, Channels::Gray, data).unwrap()
}

#[test]
fn threshold_reg() {
    let mut rp = RegParams::new("threshold");
    let mut rng = StdRng::seed_from_u64(77);

    // --- Fixed threshold ---
    let flat = Pix::new_filled(4, 4, Channels::Gray, 100).unwrap();
    let at = threshold_binary(&flat, 100).unwrap();
    rp.compare_pix(&at, &Pix::new_filled(4, 4, Channels::Gray, 255).unwrap());
    let above = threshold_binary(&flat, 101).unwrap();
    rp.compare_pix(&above, &Pix::new(4, 4, Channels::Gray).unwrap());

    // Binarizing a mask again at the same threshold changes nothing
    let pix = random_gray(&mut rng, 40, 30);
    for t in [0, 1, 64, 128, 255] {
        let once = threshold_binary(&pix, t).unwrap();
        let values = once.unique_values();
        rp.compare_values(1.0, values.iter().all(|&v| v == 0 || v == 255) as u8 as f64, 0.0);
        let twice = threshold_binary(&once, t.max(1)).unwrap();
        rp.compare_pix(&once, &twice);
    }

    // Level-preserving threshold agrees with the mask on where it is non-zero
    let levels = threshold_with_levels(&pix, 128).unwrap();
    let mask = threshold_binary(&pix, 128).unwrap();
    let agree = levels
        .data()
        .iter()
        .zip(mask.data())
        .zip(pix.data())
        .all(|((&l, &m), &v)| if m == 255 { l == v } else { l == 0 });
    rp.compare_values(1.0, agree as u8 as f64, 0.0);

    // Band threshold is the AND of two one-sided thresholds
    let band = threshold_double(&pix, 60, 180).unwrap();
    let lo = threshold_binary(&pix, 60).unwrap();
    let hi = threshold_binary(&pix, 181).unwrap().negate().unwrap();
    rp.compare_pix(&band, &lo.logical_and(&hi).unwrap());
    rp.compare_pix(&band, &threshold_double(&pix, 180, 60).unwrap());

    // Out-of-range thresholds
    for t in [-1, 256, 1000] {
        let err = threshold_binary(&pix, t).unwrap_err();
        rp.compare_values(1.0, (err.kind() == ErrorKind::Range) as u8 as f64, 0.0);
    }
    let color = Pix::new(4, 4, Channels::Bgr).unwrap();
    let err = threshold_binary(&color, 10).unwrap_err();
    rp.compare_values(1.0, (err.kind() == ErrorKind::Shape) as u8 as f64, 0.0);

    // --- Otsu ---
    let mut data = Vec::with_capacity(400);
    for i in 0..400 {
        let base: i32 = if i < 200 { 50 } else { 190 };
        data.push((base + rng.random_range(-10..=10)) as u8);
    }
    let bimodal = Pix::from_vec(20, 20, Channels::Gray, data).unwrap();
    let t = compute_otsu_threshold(&bimodal).unwrap();
    rp.compare_values(1.0, (40..180).contains(&t) as u8 as f64, 0.0);
    let (t2, bin) = threshold_otsu(&bimodal).unwrap();
    rp.compare_values(t as f64, t2 as f64, 0.0);
    let on = bin.data().iter().filter(|&&v| v == 255).count();
    rp.compare_values(200.0, on as f64, 0.0);

    // --- Adaptive ---
    // Gradient background with a dark stroke: the stroke is found
    let mut pm = Pix::new(32, 32, Channels::Gray).unwrap().to_mut();
    for y in 0..32 {
        for x in 0..32 {
            let v = if x == 16 { 20 } else { (x * 6 + 40) as u8 };
            pm.set_pixel(x, y, v).unwrap();
        }
    }
    let page: Pix = pm.into();
    for method in [AdaptiveMethod::Mean, AdaptiveMethod::Gaussian] {
        let opts = AdaptiveThresholdOptions {
            method,
            ..Default::default()
        };
        let out = adaptive_threshold(&page, &opts).unwrap();
        let inv = adaptive_threshold_inverse(&page, &opts).unwrap();
        rp.compare_values(0.0, out.get_pixel(16, 10).unwrap() as f64, 0.0);
        rp.compare_values(255.0, inv.get_pixel(16, 10).unwrap() as f64, 0.0);
        // with an integral c the two variants are complements
        rp.compare_pix(&inv, &out.negate().unwrap());
    }
    // even block sizes grow to the next odd size
    let even = AdaptiveThresholdOptions {
        block_size: 10,
        ..Default::default()
    };
    rp.compare_pix(
        &adaptive_threshold(&page, &AdaptiveThresholdOptions::default()).unwrap(),
        &adaptive_threshold(&page, &even).unwrap(),
    );

    // --- Posterize ---
    let ramp = Pix::from_vec(256, 1, Channels::Gray, (0..=255).collect()).unwrap();
    for levels in [2u32, 4, 8, 16] {
        let out = posterize(&ramp, levels).unwrap();
        rp.compare_values(levels as f64, out.unique_values().len() as f64, 0.0);
    }

    assert!(rp.cleanup(), "threshold regression test failed");
}
