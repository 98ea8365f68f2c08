//! End-to-end pipeline regression test
//!
//! Smooth a synthetic scene, binarize it with Otsu, clean the mask with an
//! opening and report its objects, going through the facade only.

use imlab::color::threshold_otsu;
use imlab::filter::{BorderPolicy, SmoothingKernel, smoothing};
use imlab::io::{ImageFormat, read_image_mem, write_image_mem, write_object_table};
use imlab::morph::{MorphOptions, open};
use imlab::region::{analyze_objects, render_objects};
use imlab::{Channels, Pix};
use imlab_test::RegParams;

fn scene() -> Pix {
    let mut pm = Pix::new_filled(80, 60, Channels::Gray, 40).unwrap().to_mut();
    let blobs = [(8, 8, 20, 14), (40, 10, 12, 30), (12, 36, 18, 16)];
    for (x0, y0, w, h) in blobs {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                pm.set_pixel(x, y, 200).unwrap();
            }
        }
    }
    // isolated bright pixels the opening removes
    for (x, y) in [(65, 5), (70, 50), (60, 30)] {
        pm.set_pixel(x, y, 220).unwrap();
    }
    pm.into()
}

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    let bytes = write_image_mem(&scene(), ImageFormat::Pnm).unwrap();
    let pix = read_image_mem(&bytes).unwrap();

    let smooth = smoothing(&pix, SmoothingKernel::Gaussian, BorderPolicy::Reflect).unwrap();
    let (threshold, mask) = threshold_otsu(&smooth).unwrap();
    rp.compare_values(1.0, (40..200).contains(&threshold) as u8 as f64, 0.0);

    let cleaned = open(&mask, &MorphOptions::default()).unwrap();
    let objects = analyze_objects(&cleaned).unwrap();
    rp.compare_values(3.0, objects.len() as f64, 0.0);
    let ids: Vec<u32> = objects.iter().map(|o| o.id).collect();
    rp.compare_strings(b"\x01\x02\x03", &ids.iter().map(|&i| i as u8).collect::<Vec<_>>());

    let mut table = Vec::new();
    write_object_table(&objects, &mut table).unwrap();
    rp.compare_values(4.0, String::from_utf8(table).unwrap().lines().count() as f64, 0.0);

    let preview = render_objects(&cleaned, &objects).unwrap();
    rp.write_pix_and_check(&preview, ImageFormat::Png).unwrap();

    assert!(rp.cleanup(), "pipeline regression test failed");
}
