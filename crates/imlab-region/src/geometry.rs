//! Border geometry
//!
//! Area, arc length, bounding rectangle and convex hull of a [`Border`],
//! treating its points as the vertices of a closed polygon.

use crate::ccbord::{Border, BorderPoint};

/// Axis-aligned rectangle in pixel units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub w: u32,
    /// Height in pixels
    pub h: u32,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// `w * h`
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// `w / h`, or 0 when the box has no height
    pub fn aspect_ratio(&self) -> f64 {
        if self.h == 0 {
            0.0
        } else {
            self.w as f64 / self.h as f64
        }
    }
}

fn cross(o: BorderPoint, a: BorderPoint, b: BorderPoint) -> i64 {
    (a.x - o.x) as i64 * (b.y - o.y) as i64 - (a.y - o.y) as i64 * (b.x - o.x) as i64
}

impl Border {
    /// Polygon area by the shoelace formula (unsigned).
    pub fn area(&self) -> f64 {
        if self.len() < 3 {
            return 0.0;
        }
        let twice: i64 = self
            .edges()
            .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
            .sum();
        twice.abs() as f64 * 0.5
    }

    /// Closed polygon perimeter.
    pub fn arc_length(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }
        self.edges()
            .map(|(a, b)| {
                let dx = (b.x - a.x) as f64;
                let dy = (b.y - a.y) as f64;
                (dx * dx + dy * dy).sqrt()
            })
            .sum()
    }

    /// Smallest rectangle holding every point, counted in whole pixels.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.points().first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in self.points() {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(BoundingBox::new(
            min_x,
            min_y,
            (max_x - min_x + 1) as u32,
            (max_y - min_y + 1) as u32,
        ))
    }

    /// Monotonic chain convex hull, counterclockwise in x/y axes.
    ///
    /// Collinear points are dropped.
    pub fn convex_hull(&self) -> Border {
        let mut pts = self.points().to_vec();
        pts.sort_unstable();
        pts.dedup();
        if pts.len() <= 2 {
            return Border::new(pts);
        }

        let half_hull = |points: &mut dyn Iterator<Item = BorderPoint>| {
            let mut chain: Vec<BorderPoint> = Vec::new();
            for p in points {
                while let Some(&[a, b]) = chain.last_chunk::<2>() {
                    if cross(a, b, p) > 0 {
                        break;
                    }
                    chain.pop();
                }
                chain.push(p);
            }
            chain
        };
        let mut lower = half_hull(&mut pts.iter().copied());
        let mut upper = half_hull(&mut pts.iter().rev().copied());

        lower.pop();
        upper.pop();
        lower.extend(upper);
        Border::new(lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn border(list: &[(i32, i32)]) -> Border {
        Border::new(list.iter().map(|&p| p.into()).collect())
    }

    #[test]
    fn test_square_measures() {
        // 5x5 pixel square traced through its border pixel centers
        let mut list = Vec::new();
        for y in 0..4 {
            list.push((0, y));
        }
        for x in 0..4 {
            list.push((x, 4));
        }
        for y in (1..=4).rev() {
            list.push((4, y));
        }
        for x in (1..=4).rev() {
            list.push((x, 0));
        }
        let b = border(&list);
        assert_eq!(b.len(), 16);
        assert_eq!(b.area(), 16.0);
        assert_eq!(b.arc_length(), 16.0);
        assert_eq!(b.bounding_box(), Some(BoundingBox::new(0, 0, 5, 5)));
        let hull = b.convex_hull();
        assert_eq!(hull.len(), 4);
        assert_eq!(hull.area(), 16.0);
    }

    #[test]
    fn test_concave_hull() {
        // L shape
        let b = border(&[(0, 0), (0, 4), (4, 4), (4, 3), (1, 3), (1, 0)]);
        assert_eq!(b.area(), 7.0);
        let hull = b.convex_hull();
        assert_eq!(hull.area(), 11.5);
    }

    #[test]
    fn test_degenerate() {
        let point = border(&[(3, 3)]);
        assert_eq!(point.area(), 0.0);
        assert_eq!(point.arc_length(), 0.0);
        assert_eq!(point.bounding_box(), Some(BoundingBox::new(3, 3, 1, 1)));
        let line = border(&[(0, 0), (3, 0)]);
        assert_eq!(line.area(), 0.0);
        assert_eq!(line.arc_length(), 6.0);
        assert_eq!(Border::default().bounding_box(), None);
        assert_eq!(BoundingBox::new(0, 0, 4, 0).aspect_ratio(), 0.0);
    }
}
