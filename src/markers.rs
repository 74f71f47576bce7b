//! Seed markers for region growing.
//!
//! A binary mask is split into three kinds of cells: confident object cores, which get a
//! region id each, confident background, and an unknown band between the two that
//! [`crate::region_growing`] later distributes among the cores.

use image::{GrayImage, Luma};
use imageproc::{
    definitions::Image,
    distance_transform::Norm,
    morphology,
    region_labelling::{Connectivity, connected_components},
};
use log::{debug, trace};

use crate::distance_transform::{DistanceMask, distance_to_background};
use crate::error::{Result, SegmentationError};
use crate::labels::{BACKGROUND, FIRST_REGION, LabelBuffer, UNKNOWN};

/// Options for marker generation.
#[derive(Debug, Clone)]
pub struct MarkerConfig {
    /// Side of the square structuring element; odd and at least 1.
    pub opening_kernel_size: u8,
    /// Number of erosions (then dilations) applied when opening the mask.
    pub opening_iterations: u8,
    /// Number of dilations used to derive the sure-background area.
    pub background_dilation_iterations: u8,
    /// Distance approximation used to find object cores.
    pub distance_mask: DistanceMask,
    /// Fraction of the largest distance above which a pixel is a sure object core.
    pub foreground_threshold_fraction: f64,
    /// Pixel connectivity used to split cores into seed regions.
    pub connectivity: Connectivity,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            opening_kernel_size: 3,
            opening_iterations: 2,
            background_dilation_iterations: 3,
            distance_mask: DistanceMask::Chamfer5,
            foreground_threshold_fraction: 0.4,
            connectivity: Connectivity::Eight,
        }
    }
}

impl MarkerConfig {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_opening(mut self, kernel_size: u8, iterations: u8) -> Self {
        self.opening_kernel_size = kernel_size;
        self.opening_iterations = iterations;
        self
    }

    pub fn with_background_dilation(mut self, iterations: u8) -> Self {
        self.background_dilation_iterations = iterations;
        self
    }

    pub fn with_distance_mask(mut self, mask: DistanceMask) -> Self {
        self.distance_mask = mask;
        self
    }

    pub fn with_foreground_fraction(mut self, fraction: f64) -> Self {
        self.foreground_threshold_fraction = fraction;
        self
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Checks every option against its documented domain.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentationError::InvalidConfig`] naming the first offending option.
    pub fn validate(&self) -> Result<()> {
        if self.opening_kernel_size == 0 || self.opening_kernel_size % 2 == 0 {
            return Err(SegmentationError::InvalidConfig(format!(
                "opening kernel size must be odd and positive, got {}",
                self.opening_kernel_size
            )));
        }
        let fraction = self.foreground_threshold_fraction;
        if !fraction.is_finite() || fraction <= 0.0 || fraction >= 1.0 {
            return Err(SegmentationError::InvalidConfig(format!(
                "foreground threshold fraction must lie in (0, 1), got {fraction}"
            )));
        }
        Ok(())
    }

    /// L∞ radius equivalent to `iterations` passes of the square kernel.
    fn radius(&self, iterations: u8) -> u8 {
        let half = u32::from(self.opening_kernel_size / 2);
        (half * u32::from(iterations)).min(u32::from(u8::MAX)) as u8
    }
}

/// A label buffer together with the number of regions it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub labels: LabelBuffer,
    pub region_count: usize,
}

/// Turns a binary mask into seed markers.
///
/// Any non-zero pixel of `mask` counts as foreground. In the result, every confident
/// object core carries a region id (`2`, `3`, ... in row-major discovery order), every
/// confident background pixel is [`BACKGROUND`] and the ambiguous band in between is
/// [`UNKNOWN`].
///
/// An empty mask is not an error: it yields zero regions and an all-background buffer.
///
/// # Errors
///
/// Returns [`SegmentationError::InvalidConfig`] if `config` fails
/// [`MarkerConfig::validate`].
pub fn generate_markers(mask: &GrayImage, config: &MarkerConfig) -> Result<Segmentation> {
    config.validate()?;
    let (width, height) = mask.dimensions();

    let binary = binarize(mask);

    let opening_radius = config.radius(config.opening_iterations);
    let opened = if opening_radius > 0 {
        morphology::open(&binary, Norm::LInf, opening_radius)
    } else {
        binary
    };

    let dilation_radius = config.radius(config.background_dilation_iterations);
    let sure_background = if dilation_radius > 0 {
        morphology::dilate(&opened, Norm::LInf, dilation_radius)
    } else {
        opened.clone()
    };

    let distances = distance_to_background(&opened, config.distance_mask);
    let max_distance = distances.pixels().map(|p| p[0]).fold(0.0f32, f32::max);
    let cutoff = config.foreground_threshold_fraction * f64::from(max_distance);
    trace!("max distance {max_distance}, core cutoff {cutoff}");

    let sure_foreground = GrayImage::from_fn(width, height, |x, y| {
        let is_core = opened.get_pixel(x, y)[0] != 0
            && (max_distance.is_infinite() || f64::from(distances.get_pixel(x, y)[0]) > cutoff);
        Luma([if is_core { 255 } else { 0 }])
    });

    // imageproc's union-find cannot label a single-pixel image.
    let components = if u64::from(width) * u64::from(height) == 1 {
        Image::from_pixel(1, 1, Luma([u32::from(sure_foreground.get_pixel(0, 0)[0] != 0)]))
    } else {
        connected_components(&sure_foreground, config.connectivity, Luma([0u8]))
    };

    // Renumber components by first appearance so ids are dense and start at
    // FIRST_REGION; component 0 is imageproc's background.
    let mut remap: Vec<i32> = Vec::new();
    let mut labels = LabelBuffer::filled(width, height, BACKGROUND)?;
    let mut region_count = 0usize;
    for (x, y, p) in components.enumerate_pixels() {
        let component = p[0] as usize;
        let label = if component == 0 {
            if sure_background.get_pixel(x, y)[0] != 0 {
                UNKNOWN
            } else {
                BACKGROUND
            }
        } else {
            if remap.len() <= component {
                remap.resize(component + 1, UNKNOWN);
            }
            if remap[component] == UNKNOWN {
                remap[component] = FIRST_REGION + region_count as i32;
                region_count += 1;
            }
            remap[component]
        };
        labels.set(x, y, label);
    }

    debug!(
        "markers: {} seed regions, {} unknown cells in {}x{} mask",
        region_count,
        labels.count(UNKNOWN),
        width,
        height
    );

    Ok(Segmentation {
        labels,
        region_count,
    })
}

fn binarize(mask: &GrayImage) -> GrayImage {
    let mut binary = mask.clone();
    for pixel in binary.pixels_mut() {
        if pixel.0[0] != 0 {
            *pixel = Luma([255]);
        }
    }
    binary
}
