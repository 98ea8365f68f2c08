//! Border tracing for connected components
//!
//! This module traces the outer border of each 8-connected foreground
//! component of a binary mask. Pixels outside the image count as
//! background. [`get_component_borders`] traces every component, including
//! those lying inside a hole of another one; [`get_outer_borders`] keeps
//! only the outermost components. Hole borders are never traced.
//!
//! Borders are closed point lists of pixel coordinates, starting at the
//! component's first pixel in raster order and running down its left side
//! (counterclockwise on screen). Every border pixel is listed.

use crate::conncomp::{ConnectivityType, label_where};
use crate::error::RegionResult;
use imlab_core::Pix;

/// One of the 8 neighbor steps, numbered clockwise on screen from East
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East = 0,
    SouthEast = 1,
    South = 2,
    SouthWest = 3,
    West = 4,
    NorthWest = 5,
    North = 6,
    NorthEast = 7,
}

/// `(dx, dy)` of each direction, y pointing down
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

impl Direction {
    /// Chain-code order
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
    ];

    /// `(dx, dy)` of one step.
    pub fn offset(self) -> (i32, i32) {
        NEIGHBOR_OFFSETS[self as usize]
    }

    /// Direction of a unit step, if `(dx, dy)` is one.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        NEIGHBOR_OFFSETS
            .iter()
            .position(|&o| o == (dx, dy))
            .map(|i| Self::ALL[i])
    }

    /// Rotate clockwise by `eighths` of a turn.
    pub fn turned_cw(self, eighths: usize) -> Self {
        Self::ALL[(self as usize + eighths) % 8]
    }
}

/// Pixel coordinate on a border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BorderPoint {
    pub x: i32,
    pub y: i32,
}

impl BorderPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbor one step away.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for BorderPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A closed border
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Border {
    points: Vec<BorderPoint>,
}

impl Border {
    /// Create a border from an ordered point list
    pub fn new(points: Vec<BorderPoint>) -> Self {
        Self { points }
    }

    /// Ordered points
    pub fn points(&self) -> &[BorderPoint] {
        &self.points
    }

    /// Number of points
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the border has no points
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs, closing back to the first point
    pub fn edges(&self) -> impl Iterator<Item = (BorderPoint, BorderPoint)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Chain code of the steps between consecutive points
    pub fn chain_code(&self) -> Vec<Direction> {
        if self.points.len() < 2 {
            return Vec::new();
        }
        self.edges()
            .filter_map(|(a, b)| Direction::from_offset(b.x - a.x, b.y - a.y))
            .collect()
    }
}

/// Trace the outer border of the component whose first raster pixel is
/// `start`.
///
/// `is_fg` reports foreground for in-image coordinates and must return
/// false outside the image.
fn trace_outer(start: BorderPoint, is_fg: impl Fn(i32, i32) -> bool) -> Border {
    let fg_step = |p: BorderPoint, d: Direction| {
        let q = p.step(d);
        is_fg(q.x, q.y).then_some(q)
    };

    // clockwise from the west neighbor for the second point
    let first_step = (0..8).find_map(|k| fg_step(start, Direction::West.turned_cw(k)));
    let Some(second) = first_step else {
        return Border::new(vec![start]);
    };

    let mut points = Vec::new();
    let mut prev = second;
    let mut current = start;
    loop {
        // from the step back to `prev`, counterclockwise
        let back = Direction::from_offset(prev.x - current.x, prev.y - current.y)
            .unwrap_or(Direction::East);
        let next = (1..8).find_map(|k| fg_step(current, back.turned_cw(8 - k)));
        points.push(current);
        let Some(next) = next.or_else(|| fg_step(current, back)) else {
            break;
        };
        if next == start && current == second {
            break;
        }
        prev = current;
        current = next;
    }
    Border::new(points)
}

/// Outer borders of all outermost 8-connected components of a mask.
///
/// A component lying in a hole of another one is skipped. Borders come in
/// raster order of each component's first pixel.
///
/// # Errors
///
/// Returns a core error if `pix` is not a grayscale binary mask.
pub fn get_outer_borders(pix: &Pix) -> RegionResult<Vec<Border>> {
    trace_borders(pix, true)
}

/// Outer borders of every 8-connected component of a mask, including
/// components nested in holes of others.
///
/// Hole borders are not reported. Borders come in raster order of each
/// component's first pixel.
///
/// # Errors
///
/// Returns a core error if `pix` is not a grayscale binary mask.
pub fn get_component_borders(pix: &Pix) -> RegionResult<Vec<Border>> {
    trace_borders(pix, false)
}

fn trace_borders(pix: &Pix, outermost_only: bool) -> RegionResult<Vec<Border>> {
    pix.mask_domain()?;
    let w = pix.width();
    let h = pix.height();
    let data = pix.data();

    let fg = label_where(w, h, ConnectivityType::EightWay, |i| data[i] != 0);
    let outside = outermost_only.then(|| frame_background(w, h, data));

    let is_fg = |x: i32, y: i32| {
        let inside = x >= 0 && y >= 0 && x < w as i32 && y < h as i32;
        inside && data[(y as u32 * w + x as u32) as usize] != 0
    };

    let mut borders = Vec::new();
    for comp in fg.components() {
        let (x, y) = comp.first;
        if let Some(outside) = &outside {
            // the first pixel's west neighbor is background
            if x > 0 && !outside[(y * w + x - 1) as usize] {
                continue;
            }
        }
        borders.push(trace_outer(BorderPoint::new(x as i32, y as i32), is_fg));
    }
    log::trace!(
        "trace_borders: {} components, {} borders (outermost only: {})",
        fg.count(),
        borders.len(),
        outermost_only
    );
    Ok(borders)
}

/// Per pixel, whether it is background 4-connected to the image frame.
fn frame_background(w: u32, h: u32, data: &[u8]) -> Vec<bool> {
    let bg = label_where(w, h, ConnectivityType::FourWay, |i| data[i] == 0);
    let mut touches_frame = vec![false; bg.count() as usize + 1];
    let frame = (0..w)
        .flat_map(|x| [(x, 0), (x, h - 1)])
        .chain((0..h).flat_map(|y| [(0, y), (w - 1, y)]));
    for (x, y) in frame {
        touches_frame[bg.labels()[(y * w + x) as usize] as usize] = true;
    }
    touches_frame[0] = false;
    bg.labels()
        .iter()
        .map(|&l| touches_frame[l as usize])
        .collect()
}
