//! End-to-end segmentation and scoring of a binary mask.

use image::GrayImage;
use log::info;

use crate::error::Result;
use crate::irregularity::{IrregularityConfig, score_index};
use crate::labels::{LabelBuffer, RegionIndex};
use crate::markers::{MarkerConfig, Segmentation, generate_markers};
use crate::region_growing::grow_regions;

/// Final labels of a mask together with one irregularity score per region.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub labels: LabelBuffer,
    pub region_count: usize,
    /// One score per region, ascending label order.
    pub scores: Vec<f64>,
}

/// Generates seed markers for `mask` and grows them into final regions.
pub fn segment(mask: &GrayImage, config: &MarkerConfig) -> Result<Segmentation> {
    let markers = generate_markers(mask, config)?;
    Ok(grow_regions(markers.labels))
}

/// Segments `mask` and scores the irregularity of every resulting region.
pub fn analyze(
    mask: &GrayImage,
    markers: &MarkerConfig,
    irregularity: &IrregularityConfig,
) -> Result<Analysis> {
    let Segmentation {
        labels,
        region_count,
    } = segment(mask, markers)?;
    let scores = score_index(&RegionIndex::build(&labels), irregularity);

    info!(
        "analyzed {}x{} mask: {} regions",
        mask.width(),
        mask.height(),
        region_count
    );

    Ok(Analysis {
        labels,
        region_count,
        scores,
    })
}
