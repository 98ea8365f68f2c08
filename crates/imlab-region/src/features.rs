//! Feature vector of a single binary object
//!
//! The mask is treated as one object: moments are taken over all of its
//! foreground pixels, while area, perimeter and shape coefficients come
//! from the outer border of the largest component.

use crate::ccbord::{Border, get_outer_borders};
use crate::error::RegionResult;
use crate::moments::Moments;
use imlab_core::{MaskDomain, Pix};

/// Shape ratios of an object's outer border
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShapeCoefficients {
    /// Bounding box width / height
    pub aspect_ratio: f64,
    /// Border area / bounding box area
    pub extent: f64,
    /// Border area / convex hull area
    pub solidity: f64,
    /// Diameter of the circle with the same area
    pub equivalent_diameter: f64,
}

/// Complete feature record of a binary object
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BinaryObjectFeatures {
    /// Pixel moments of the whole mask in the 0/255 domain
    pub moments: Moments,
    /// Area enclosed by the largest outer border
    pub area: f64,
    /// Length of the largest outer border
    pub perimeter: f64,
    /// `(m10 / m00, m01 / m00)`
    pub centroid: (f64, f64),
    /// Shape ratios of the largest outer border
    pub shape: ShapeCoefficients,
}

/// `sqrt(4 * area / pi)`, or 0 for an empty area
pub fn equivalent_diameter(area: f64) -> f64 {
    if area > 0.0 {
        (4.0 * area / std::f64::consts::PI).sqrt()
    } else {
        0.0
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den != 0.0 { num / den } else { 0.0 }
}

/// The border enclosing the largest area; the first one wins ties.
pub(crate) fn largest_border(borders: &[Border]) -> Option<&Border> {
    borders.iter().fold(None, |best: Option<(&Border, f64)>, b| {
        let area = b.area();
        match best {
            Some((_, best_area)) if area <= best_area => best,
            _ => Some((b, area)),
        }
    })
    .map(|(b, _)| b)
}

/// Shape ratios of one border.
pub(crate) fn border_shape(border: &Border) -> ShapeCoefficients {
    let area = border.area();
    let bbox = border.bounding_box().unwrap_or_default();
    ShapeCoefficients {
        aspect_ratio: bbox.aspect_ratio(),
        extent: ratio(area, bbox.area() as f64),
        solidity: ratio(area, border.convex_hull().area()),
        equivalent_diameter: equivalent_diameter(area),
    }
}

/// Raw, central and normalized moments of a mask.
///
/// 0/1 masks are scaled to 0/255 first, so `m00` is 255 times the
/// foreground pixel count.
///
/// # Errors
///
/// Returns a core error if `pix` is not a grayscale binary mask.
pub fn moments(pix: &Pix) -> RegionResult<Moments> {
    match pix.mask_domain()? {
        MaskDomain::ZeroOne => Moments::from_pixels(&pix.to_8bit_mask()?),
        MaskDomain::ZeroFull => Moments::from_pixels(pix),
    }
}

/// `(area, perimeter)` of the largest outer border, or `(0, 0)` for an
/// empty mask.
///
/// # Errors
///
/// Returns a core error if `pix` is not a grayscale binary mask.
pub fn area_perimeter(pix: &Pix) -> RegionResult<(f64, f64)> {
    let borders = get_outer_borders(pix)?;
    Ok(largest_border(&borders).map_or((0.0, 0.0), |b| (b.area(), b.arc_length())))
}

/// Shape ratios of the largest outer border; all zero for an empty mask.
///
/// # Errors
///
/// Returns a core error if `pix` is not a grayscale binary mask.
pub fn shape_coefficients(pix: &Pix) -> RegionResult<ShapeCoefficients> {
    let borders = get_outer_borders(pix)?;
    Ok(largest_border(&borders).map(border_shape).unwrap_or_default())
}

/// Moments, area, perimeter, centroid and shape ratios of a mask.
///
/// # Errors
///
/// Returns a core error if `pix` is not a grayscale binary mask.
pub fn analyze_binary_object(pix: &Pix) -> RegionResult<BinaryObjectFeatures> {
    let moments = moments(pix)?;
    let borders = get_outer_borders(pix)?;
    let largest = largest_border(&borders);
    let (area, perimeter) = largest.map_or((0.0, 0.0), |b| (b.area(), b.arc_length()));
    let shape = largest.map(border_shape).unwrap_or_default();
    log::debug!(
        "analyze_binary_object: {} outer borders, area = {}, perimeter = {:.3}",
        borders.len(),
        area,
        perimeter
    );

    Ok(BinaryObjectFeatures {
        moments,
        area,
        perimeter,
        centroid: moments.centroid(),
        shape,
    })
}
