//! Marker-based region growing and shape irregularity scoring for binary masks, built on
//! [imageproc].
//!
//! A binary mask goes through [`markers::generate_markers`], which finds confident object
//! cores, then [`region_growing::grow_regions`], which floods the ambiguous band around
//! them and marks where regions collide. The resulting [`LabelBuffer`] can be colorized
//! ([`region_labelling`]), scored ([`irregularity`]) and rendered as a heatmap
//! ([`heatmap`]).
//!
//! The utility functions are organized into modules the same categories (as possible) as in [imageproc].

mod colors;
pub mod contours;
pub mod distance_transform;
pub mod error;
pub mod export;
pub mod heatmap;
pub mod irregularity;
pub mod labels;
pub mod markers;
pub mod pipeline;
pub mod preprocess;
pub mod rect;
pub mod region_growing;
pub mod region_labelling;

pub use error::{Result, SegmentationError};
pub use labels::{LabelBuffer, Region, RegionIndex};
pub use markers::{MarkerConfig, Segmentation};
pub use pipeline::{Analysis, analyze, segment};
