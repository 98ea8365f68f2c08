//! Multi-object analysis
//!
//! Every 8-connected component of a mask, including one lying in a hole of
//! another, becomes one object described by its outer border: border moments and their invariants, area, perimeter,
//! centroid and shape ratios. Borders enclosing less than
//! [`MIN_OBJECT_AREA`] are treated as noise.

use crate::ccbord::{Border, BorderPoint, get_component_borders};
use crate::error::{RegionError, RegionResult};
use crate::features::{ShapeCoefficients, border_shape};
use crate::geometry::BoundingBox;
use crate::moments::Moments;
use imlab_core::{MaskDomain, Pix, PixMut};

/// Borders enclosing less area than this are dropped
pub const MIN_OBJECT_AREA: f64 = 10.0;

/// Object colors as (B, G, R), assigned cyclically by id
pub const PALETTE: [[u8; 3]; 12] = [
    [255, 0, 0],
    [0, 255, 0],
    [0, 0, 255],
    [255, 255, 0],
    [255, 0, 255],
    [0, 255, 255],
    [128, 0, 0],
    [0, 128, 0],
    [0, 0, 128],
    [128, 128, 0],
    [128, 0, 128],
    [0, 128, 128],
];

/// Centroid marker color (B, G, R)
pub const CENTROID_COLOR: [u8; 3] = [0, 0, 255];

/// Centroid marker radius in pixels
const CENTROID_RADIUS: i32 = 3;

/// Palette color for an object id (ids start at 1).
pub fn palette_color(id: u32) -> [u8; 3] {
    PALETTE[(id.saturating_sub(1) as usize) % PALETTE.len()]
}

/// Features of one object
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectFeatureSet {
    /// 1-based id in discovery order
    pub id: u32,
    /// Area enclosed by the outer border
    pub area: f64,
    /// Length of the outer border
    pub perimeter: f64,
    /// Centroid, truncated to whole pixels
    pub centroid: (i32, i32),
    /// Bounding rectangle of the border
    pub bounds: BoundingBox,
    /// Shape ratios of the border
    pub shape: ShapeCoefficients,
    /// Border moments
    pub moments: Moments,
    /// `nu20 + nu02`
    pub m1: f64,
    /// `(nu20 - nu02)^2 + 4 nu11^2`
    pub m2: f64,
    /// `(nu30 - 3 nu12)^2 + (3 nu21 - nu03)^2`
    pub m3: f64,
    /// Preview color (B, G, R)
    pub color: [u8; 3],
    /// Outer border
    pub border: Border,
}

impl ObjectFeatureSet {
    fn from_border(id: u32, border: Border, area: f64) -> Self {
        let moments = Moments::from_border(&border);
        let (cx, cy) = moments.centroid();
        let (m1, m2, m3) = moments.invariants();
        Self {
            id,
            area,
            perimeter: border.arc_length(),
            centroid: (cx as i32, cy as i32),
            bounds: border.bounding_box().unwrap_or_default(),
            shape: border_shape(&border),
            moments,
            m1,
            m2,
            m3,
            color: palette_color(id),
            border,
        }
    }
}

/// Analyze every object of a mask, nested ones included.
///
/// Objects are returned in discovery order (raster order of each border's
/// first pixel) with ids 1, 2, ... counting only the objects kept.
///
/// # Errors
///
/// Returns a core error if `pix` is not a grayscale binary mask.
pub fn analyze_objects(pix: &Pix) -> RegionResult<Vec<ObjectFeatureSet>> {
    let borders = get_component_borders(pix)?;
    let found = borders.len();

    let mut objects = Vec::new();
    for border in borders {
        let area = border.area();
        if area < MIN_OBJECT_AREA {
            continue;
        }
        let id = objects.len() as u32 + 1;
        objects.push(ObjectFeatureSet::from_border(id, border, area));
    }

    log::debug!(
        "analyze_objects: {} borders found, {} below area {} dropped",
        found,
        found - objects.len(),
        MIN_OBJECT_AREA
    );
    Ok(objects)
}

/// Order objects by descending area; equal areas keep their order.
pub fn sort_by_area_desc(objects: &mut [ObjectFeatureSet]) {
    objects.sort_by(|a, b| b.area.total_cmp(&a.area));
}

/// Draw a BGR preview of analyzed objects over their mask.
///
/// The mask is shown in black and white, each border in its object's
/// color, and each centroid as a filled red disk.
///
/// # Errors
///
/// Returns a core error if `pix` is not a grayscale binary mask and
/// [`RegionError::InvalidParameters`] if an object lies outside the image.
pub fn render_objects(pix: &Pix, objects: &[ObjectFeatureSet]) -> RegionResult<Pix> {
    let full = match pix.mask_domain()? {
        MaskDomain::ZeroOne => pix.to_8bit_mask()?,
        MaskDomain::ZeroFull => pix.clone(),
    };
    let (w, h) = (pix.width() as i32, pix.height() as i32);
    for obj in objects {
        let b = obj.bounds;
        if b.x < 0 || b.y < 0 || b.x + b.w as i32 > w || b.y + b.h as i32 > h {
            return Err(RegionError::InvalidParameters(format!(
                "object {} at {:?} lies outside the {}x{} image",
                obj.id, b, w, h
            )));
        }
    }

    let mut canvas = full.convert_to_bgr()?.to_mut();
    for obj in objects {
        let points = obj.border.points();
        match points {
            [] => {}
            [p] => plot(&mut canvas, *p, obj.color),
            _ => {
                for (a, b) in obj.border.edges() {
                    draw_line(&mut canvas, a, b, obj.color);
                }
            }
        }
    }
    for obj in objects {
        let (cx, cy) = obj.centroid;
        for dy in -CENTROID_RADIUS..=CENTROID_RADIUS {
            for dx in -CENTROID_RADIUS..=CENTROID_RADIUS {
                if dx * dx + dy * dy <= CENTROID_RADIUS * CENTROID_RADIUS {
                    plot(&mut canvas, BorderPoint::new(cx + dx, cy + dy), CENTROID_COLOR);
                }
            }
        }
    }
    Ok(canvas.into())
}

/// Set one pixel; points outside the canvas are skipped.
fn plot(canvas: &mut PixMut, p: BorderPoint, bgr: [u8; 3]) {
    if p.x < 0 || p.y < 0 {
        return;
    }
    let [b, g, r] = bgr;
    let _ = canvas.set_bgr(p.x as u32, p.y as u32, b, g, r);
}

/// Bresenham line including both end points.
fn draw_line(canvas: &mut PixMut, a: BorderPoint, b: BorderPoint, bgr: [u8; 3]) {
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut p = a;
    loop {
        plot(canvas, p, bgr);
        if p == b {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            p.x += sx;
        }
        if e2 <= dx {
            err += dx;
            p.y += sy;
        }
    }
}
