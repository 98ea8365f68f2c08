//! imlab-region - Region analysis for binary masks
//!
//! This crate provides region processing functionality including:
//!
//! - **Connected component analysis** - Finding and labeling connected regions
//! - **Border tracing** - Outer borders of the outermost components
//! - **Border geometry** - Area, arc length, bounding box, convex hull
//! - **Moments** - Raw, central and normalized moments of pixels or borders
//! - **Feature analysis** - Feature vector of a single binary object
//! - **Object analysis** - Per-object features, invariants and preview
//!
//! # Examples
//!
//! ```
//! use imlab_core::{Channels, Pix};
//! use imlab_region::analyze_objects;
//!
//! let mut pm = Pix::new(20, 20, Channels::Gray).unwrap().to_mut();
//! for y in 2..12 {
//!     for x in 2..12 {
//!         pm.set_pixel(x, y, 255).unwrap();
//!     }
//! }
//! let objects = analyze_objects(&pm.into()).unwrap();
//! assert_eq!(objects.len(), 1);
//! assert_eq!(objects[0].area, 81.0);
//! ```

pub mod ccbord;
pub mod conncomp;
pub mod error;
pub mod features;
pub mod geometry;
pub mod moments;
pub mod objects;

// Re-export core types
pub use imlab_core;

pub use error::{RegionError, RegionResult};

pub use ccbord::{Border, BorderPoint, Direction, get_component_borders, get_outer_borders};
pub use conncomp::{
    ConnectedComponent, ConnectivityType, LabelMap, find_connected_components,
    label_connected_components,
};
pub use features::{
    BinaryObjectFeatures, ShapeCoefficients, analyze_binary_object, area_perimeter,
    equivalent_diameter, moments, shape_coefficients,
};
pub use geometry::BoundingBox;
pub use moments::{CENTRAL_NAMES, Moments, NORMALIZED_NAMES, RAW_NAMES};
pub use objects::{
    CENTROID_COLOR, MIN_OBJECT_AREA, ObjectFeatureSet, PALETTE, analyze_objects, palette_color,
    render_objects, sort_by_area_desc,
};
