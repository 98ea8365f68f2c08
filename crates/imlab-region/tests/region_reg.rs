//! Region analysis regression test
//!
//! Component counts, object filtering, feature values of simple shapes,
//! translation invariance of the moment invariants and the object preview.

use imlab_core::{Channels, ErrorKind, Pix};
use imlab_io::ImageFormat;
use imlab_region::{
    ConnectivityType, analyze_binary_object, analyze_objects, find_connected_components,
    get_outer_borders, render_objects, sort_by_area_desc,
};
use imlab_test::RegParams;
use rand::prelude::*;

fn paint(pm: &mut imlab_core::PixMut, x0: u32, y0: u32, w: u32, h: u32) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            pm.set_pixel(x, y, 255).unwrap();
        }
    }
}

#[test]
fn region_reg() {
    let mut rp = RegParams::new("region");

    // --- A 20x20 square and a 3-pixel speck: one object survives ---
    let mut pm = Pix::new(64, 48, Channels::Gray).unwrap().to_mut();
    paint(&mut pm, 10, 10, 20, 20);
    paint(&mut pm, 50, 40, 3, 1);
    let pix: Pix = pm.into();
    let comps = find_connected_components(&pix, ConnectivityType::EightWay).unwrap();
    rp.compare_values(2.0, comps.len() as f64, 0.0);
    rp.compare_values(400.0, comps[0].pixel_count as f64, 0.0);
    let objects = analyze_objects(&pix).unwrap();
    rp.compare_values(1.0, objects.len() as f64, 0.0);
    rp.compare_values(361.0, objects[0].area, 0.0);
    rp.compare_values(76.0, objects[0].perimeter, 1e-9);
    rp.compare_values(19.0, objects[0].centroid.0 as f64, 0.0);
    rp.compare_values(1.0, objects[0].shape.solidity, 1e-12);

    // --- Single-object features agree with the multi-object border ---
    let single = analyze_binary_object(&pix).unwrap();
    rp.compare_values(361.0, single.area, 0.0);
    rp.compare_values(255.0 * 403.0, single.moments.m00, 0.0);
    rp.compare_values(20.0 * 20.0 / (19.0 * 19.0), 1.0 / single.shape.extent, 1e-12);

    // --- Invariants do not depend on position ---
    let mut rng = StdRng::seed_from_u64(1234);
    let mut reference = None;
    for _ in 0..4 {
        let x0 = rng.random_range(0..30);
        let y0 = rng.random_range(0..20);
        let mut pm = Pix::new(60, 40, Channels::Gray).unwrap().to_mut();
        paint(&mut pm, x0, y0, 17, 9);
        paint(&mut pm, x0, y0 + 9, 5, 8);
        let objs = analyze_objects(&pm.into()).unwrap();
        rp.compare_values(1.0, objs.len() as f64, 0.0);
        let m = (objs[0].m1, objs[0].m2, objs[0].m3);
        match reference {
            None => reference = Some(m),
            Some((m1, m2, m3)) => {
                rp.compare_values(m1, m.0, 1e-9);
                rp.compare_values(m2, m.1, 1e-9);
                rp.compare_values(m3, m.2, 1e-9);
            }
        }
    }

    // --- Objects inside a hole are objects too, but not outermost ---
    let mut pm = Pix::new(40, 40, Channels::Gray).unwrap().to_mut();
    paint(&mut pm, 2, 2, 30, 30);
    for y in 6..28 {
        for x in 6..28 {
            pm.set_pixel(x, y, 0).unwrap();
        }
    }
    paint(&mut pm, 12, 12, 8, 8);
    paint(&mut pm, 34, 2, 4, 30);
    let nested: Pix = pm.into();
    rp.compare_values(2.0, get_outer_borders(&nested).unwrap().len() as f64, 0.0);
    let mut objs = analyze_objects(&nested).unwrap();
    rp.compare_values(3.0, objs.len() as f64, 0.0);
    // raster order: ring, bar, then the island inside the ring's hole
    rp.compare_values(49.0, objs[2].area, 0.0);
    rp.compare_values(12.0, objs[2].bounds.x as f64, 0.0);
    sort_by_area_desc(&mut objs);
    let ids: Vec<f64> = objs.iter().map(|o| o.id as f64).collect();
    rp.compare_values(1.0, ids[0], 0.0);
    rp.compare_values(2.0, ids[1], 0.0);
    rp.compare_values(3.0, ids[2], 0.0);
    rp.compare_values(841.0, objs[0].area, 0.0);

    // --- Preview ---
    let preview = render_objects(&nested, &objs).unwrap();
    rp.compare_values(3.0, preview.channels().count() as f64, 0.0);
    rp.write_pix_and_check(&preview, ImageFormat::Png).unwrap();

    // --- Invalid masks ---
    let gray = Pix::new_filled(8, 8, Channels::Gray, 100).unwrap();
    let err = analyze_objects(&gray).unwrap_err();
    rp.compare_values(1.0, (err.kind() == ErrorKind::Domain) as u8 as f64, 0.0);
    let color = Pix::new(8, 8, Channels::Bgr).unwrap();
    let err = analyze_binary_object(&color).unwrap_err();
    rp.compare_values(1.0, (err.kind() == ErrorKind::Shape) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "region regression test failed");
}
