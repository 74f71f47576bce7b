//! Shape irregularity of segmented regions.
//!
//! The index of a region is `perimeter² / (4π · area)`: about `1.0` for a disk and larger
//! for elongated or ragged outlines. Area is the pixel count; perimeter is the length of
//! the region's outer border (see [`crate::contours::outer_perimeter`]).

use std::f64::consts::PI;

use log::{debug, trace};

use crate::contours::{PerimeterMethod, outer_perimeter};
use crate::labels::{LabelBuffer, Region, RegionIndex};

/// Options for irregularity scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IrregularityConfig {
    pub perimeter: PerimeterMethod,
}

impl IrregularityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_perimeter(mut self, method: PerimeterMethod) -> Self {
        self.perimeter = method;
        self
    }
}

/// `perimeter² / (4π · area)`, or `0.0` for a region without area.
pub fn irregularity_index(perimeter: f64, area: f64) -> f64 {
    if area <= 0.0 {
        return 0.0;
    }
    perimeter * perimeter / (4.0 * PI * area)
}

/// Irregularity index of a single region.
pub fn region_irregularity(region: &Region, config: &IrregularityConfig) -> f64 {
    let area = region.area() as f64;
    let perimeter = outer_perimeter(region, config.perimeter);
    let index = irregularity_index(perimeter, area);
    trace!(
        "region {}: area {}, perimeter {:.3}, index {:.4}",
        region.label(),
        area,
        perimeter,
        index
    );
    index
}

/// Scores every region of `labels`, one value per region id in ascending label order.
///
/// The result always has as many entries as `labels` has distinct region ids.
pub fn score_regions(labels: &LabelBuffer, config: &IrregularityConfig) -> Vec<f64> {
    score_index(&RegionIndex::build(labels), config)
}

/// Like [`score_regions`], reusing an already built index.
pub fn score_index(index: &RegionIndex, config: &IrregularityConfig) -> Vec<f64> {
    let scores: Vec<f64> = index
        .iter()
        .map(|region| region_irregularity(region, config))
        .collect();

    if let Some((min, max)) = min_max(&scores) {
        debug!(
            "irregularity: {} regions, index range [{:.4}, {:.4}]",
            scores.len(),
            min,
            max
        );
    } else {
        debug!("irregularity: no regions");
    }
    scores
}

/// Smallest and largest score, or `None` for an empty slice.
pub(crate) fn min_max(scores: &[f64]) -> Option<(f64, f64)> {
    let (first, rest) = scores.split_first()?;
    Some(
        rest.iter()
            .fold((*first, *first), |(lo, hi), &s| (lo.min(s), hi.max(s))),
    )
}
