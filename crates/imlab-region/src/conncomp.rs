//! Connected component analysis
//!
//! This module provides functions for finding and labeling connected components
//! in binary images. It uses Union-Find (disjoint set) data structure for
//! efficient labeling.
//!
//! Labels are numbered from 1 in raster order of each component's first
//! pixel; 0 is background.

use crate::error::RegionResult;
use crate::geometry::BoundingBox;
use imlab_core::Pix;

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

/// A connected component in an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Label of this component in the [`LabelMap`]
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: BoundingBox,
    /// First pixel in raster order
    pub first: (u32, u32),
}

/// Per-pixel component labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<u32>,
    count: u32,
}

impl LabelMap {
    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of components
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Row-major labels
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Label at `(x, y)`, or `None` outside the image
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.labels[(y * self.width + x) as usize])
    }

    /// Summaries of every component, ordered by label
    pub fn components(&self) -> Vec<ConnectedComponent> {
        let mut comps: Vec<ConnectedComponent> = (1..=self.count)
            .map(|label| ConnectedComponent {
                label,
                pixel_count: 0,
                bounds: BoundingBox::default(),
                first: (0, 0),
            })
            .collect();
        let mut extents = vec![(u32::MAX, u32::MAX, 0u32, 0u32); self.count as usize];

        for (idx, &label) in self.labels.iter().enumerate() {
            if label == 0 {
                continue;
            }
            let x = idx as u32 % self.width;
            let y = idx as u32 / self.width;
            let comp = &mut comps[label as usize - 1];
            if comp.pixel_count == 0 {
                comp.first = (x, y);
            }
            comp.pixel_count += 1;
            let e = &mut extents[label as usize - 1];
            e.0 = e.0.min(x);
            e.1 = e.1.min(y);
            e.2 = e.2.max(x);
            e.3 = e.3.max(y);
        }

        for (comp, (x0, y0, x1, y1)) in comps.iter_mut().zip(extents) {
            comp.bounds = BoundingBox::new(x0 as i32, y0 as i32, x1 - x0 + 1, y1 - y0 + 1);
        }
        comps
    }
}

/// Disjoint sets over provisional labels
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // slot 0 is the background
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) -> u32 {
        let ra = self.find(a);
        let rb = self.find(b);
        let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[hi as usize] = lo;
        lo
    }
}

/// Label the pixels for which `is_fg` holds.
pub(crate) fn label_where(
    width: u32,
    height: u32,
    connectivity: ConnectivityType,
    is_fg: impl Fn(usize) -> bool,
) -> LabelMap {
    let w = width as usize;
    let h = height as usize;
    let mut labels = vec![0u32; w * h];
    let mut uf = UnionFind::new();

    // previous-row and same-row neighbors already visited in raster order
    let back: &[(isize, isize)] = match connectivity {
        ConnectivityType::FourWay => &[(-1, 0), (0, -1)],
        ConnectivityType::EightWay => &[(-1, 0), (-1, -1), (0, -1), (1, -1)],
    };

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if !is_fg(idx) {
                continue;
            }
            let mut current = 0u32;
            for &(dx, dy) in back {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= w as isize {
                    continue;
                }
                let neighbor = labels[ny as usize * w + nx as usize];
                if neighbor == 0 {
                    continue;
                }
                current = if current == 0 {
                    uf.find(neighbor)
                } else {
                    uf.union(current, neighbor)
                };
            }
            labels[idx] = if current == 0 { uf.make_set() } else { current };
        }
    }

    // second pass: resolve roots and renumber in raster order
    let mut remap = vec![0u32; uf.parent.len()];
    let mut count = 0u32;
    for label in labels.iter_mut() {
        if *label == 0 {
            continue;
        }
        let root = uf.find(*label) as usize;
        if remap[root] == 0 {
            count += 1;
            remap[root] = count;
        }
        *label = remap[root];
    }

    LabelMap {
        width,
        height,
        labels,
        count,
    }
}

/// Label all connected components of the non-zero pixels of a grayscale image.
pub fn label_connected_components(
    pix: &Pix,
    connectivity: ConnectivityType,
) -> RegionResult<LabelMap> {
    pix.check_gray()?;
    let data = pix.data();
    Ok(label_where(pix.width(), pix.height(), connectivity, |i| {
        data[i] != 0
    }))
}

/// Find all connected components of the non-zero pixels of a grayscale image
///
/// Returns one record per component, each with a label, pixel count,
/// bounding box and first pixel.
pub fn find_connected_components(
    pix: &Pix,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    Ok(label_connected_components(pix, connectivity)?.components())
}
