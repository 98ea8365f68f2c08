//! Tab-separated feature tables
//!
//! Two layouts are written:
//!
//! - a two-column `Feature`/`Value` listing of one object's
//!   [`BinaryObjectFeatures`], every value with 4 decimals
//! - a one-row-per-object table of [`ObjectFeatureSet`]s with a header row
//!
//! Both open directly in a spreadsheet.

use crate::IoResult;
use imlab_region::{
    BinaryObjectFeatures, CENTRAL_NAMES, NORMALIZED_NAMES, ObjectFeatureSet, RAW_NAMES,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Leading columns of the object table; moment columns follow
pub const OBJECT_COLUMNS: [&str; 12] = [
    "ID",
    "Area",
    "Perimeter",
    "Centroid_X",
    "Centroid_Y",
    "AspectRatio",
    "Extent",
    "Solidity",
    "EquivalentDiameter",
    "M1",
    "M2",
    "M3",
];

/// Write one object's features as a `Feature\tValue` listing.
pub fn write_feature_table<W: Write>(
    features: &BinaryObjectFeatures,
    mut writer: W,
) -> IoResult<()> {
    let (cx, cy) = features.centroid;
    let shape = &features.shape;
    let named = [
        ("Area", features.area),
        ("Perimeter", features.perimeter),
        ("Centroid_X", cx),
        ("Centroid_Y", cy),
        ("AspectRatio", shape.aspect_ratio),
        ("Extent", shape.extent),
        ("Solidity", shape.solidity),
        ("EquivalentDiameter", shape.equivalent_diameter),
    ];
    let m = &features.moments;
    let moments = RAW_NAMES
        .iter()
        .zip(m.raw())
        .chain(CENTRAL_NAMES.iter().zip(m.central()))
        .chain(NORMALIZED_NAMES.iter().zip(m.normalized()))
        .map(|(&name, v)| (name, v));

    writeln!(writer, "Feature\tValue")?;
    for (name, value) in named.into_iter().chain(moments) {
        writeln!(writer, "{}\t{:.4}", name, value)?;
    }
    Ok(())
}

/// Write a table with one row per object.
///
/// Area, perimeter, aspect ratio, extent and equivalent diameter have 2
/// decimals, solidity 4, the invariants M1-M3 6, raw and central moments
/// 4 and normalized moments 6. Centroids are whole pixels. An empty list
/// writes nothing, not even the header.
pub fn write_object_table<W: Write>(objects: &[ObjectFeatureSet], mut writer: W) -> IoResult<()> {
    if objects.is_empty() {
        return Ok(());
    }

    let header: Vec<&str> = OBJECT_COLUMNS
        .iter()
        .chain(RAW_NAMES.iter())
        .chain(CENTRAL_NAMES.iter())
        .chain(NORMALIZED_NAMES.iter())
        .copied()
        .collect();
    writeln!(writer, "{}", header.join("\t"))?;

    for obj in objects {
        let mut row = vec![
            obj.id.to_string(),
            format!("{:.2}", obj.area),
            format!("{:.2}", obj.perimeter),
            obj.centroid.0.to_string(),
            obj.centroid.1.to_string(),
            format!("{:.2}", obj.shape.aspect_ratio),
            format!("{:.2}", obj.shape.extent),
            format!("{:.4}", obj.shape.solidity),
            format!("{:.2}", obj.shape.equivalent_diameter),
            format!("{:.6}", obj.m1),
            format!("{:.6}", obj.m2),
            format!("{:.6}", obj.m3),
        ];
        let m = &obj.moments;
        row.extend(m.raw().iter().map(|v| format!("{:.4}", v)));
        row.extend(m.central().iter().map(|v| format!("{:.4}", v)));
        row.extend(m.normalized().iter().map(|v| format!("{:.6}", v)));
        writeln!(writer, "{}", row.join("\t"))?;
    }
    Ok(())
}

/// Save one object's features to a file.
pub fn save_feature_table<P: AsRef<Path>>(
    features: &BinaryObjectFeatures,
    path: P,
) -> IoResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_feature_table(features, &mut writer)?;
    writer.flush()?;
    log::debug!("saved feature table to {}", path.display());
    Ok(())
}

/// Save an object table to a file.
///
/// An empty list creates no file.
pub fn save_object_table<P: AsRef<Path>>(objects: &[ObjectFeatureSet], path: P) -> IoResult<()> {
    if objects.is_empty() {
        return Ok(());
    }
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_object_table(objects, &mut writer)?;
    writer.flush()?;
    log::debug!("saved {} objects to {}", objects.len(), path.display());
    Ok(())
}
