//! Color renderings of label buffers.
//!
//! Colors are drawn fresh for every call: the same label gets the same color within one
//! rendering, but nothing ties a color to a label across calls.

use std::collections::HashMap;

use ab_glyph::{Font, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use log::debug;
use rand::Rng;

use crate::colors::generate_contrasting_colors;
use crate::error::Result;
use crate::labels::{BOUNDARY, LabelBuffer, RegionIndex, is_region};

/// Color of boundary cells.
pub const BOUNDARY_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
/// Color of background and unknown cells.
pub const BACKGROUND_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Position of a region's index label in a colorized rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionAnnotation {
    /// 0-based position of the region in row-major discovery order.
    pub index: usize,
    pub label: i32,
    /// Centroid `(x, y)` of the region's pixels.
    pub centroid: (f64, f64),
}

/// A colorized label buffer with one annotation per region.
#[derive(Debug, Clone)]
pub struct ColorizedRegions {
    pub image: RgbImage,
    pub annotations: Vec<RegionAnnotation>,
}

/// Colorizes `labels` with a thread-local random palette.
///
/// See [`colorize_regions_with_rng`].
pub fn colorize_regions(labels: &LabelBuffer) -> ColorizedRegions {
    colorize_regions_with_rng(labels, &mut rand::rng())
}

/// Renders every region in its own color.
///
/// Boundary cells become [`BOUNDARY_COLOR`], background and unknown cells stay
/// [`BACKGROUND_COLOR`]. Region colors are spread evenly over the hue wheel from a
/// random starting hue, so neighbouring labels stay distinguishable. Annotations are
/// listed in discovery order.
pub fn colorize_regions_with_rng<R: Rng>(
    labels: &LabelBuffer,
    rng: &mut R,
) -> ColorizedRegions {
    let index = RegionIndex::build(labels);
    let discovered = index.in_discovery_order();
    let hue_offset = rng.random_range(0.0..360.0);
    let palette = generate_contrasting_colors(discovered.len(), hue_offset);

    let colors: HashMap<i32, Rgb<u8>> = discovered
        .iter()
        .zip(palette)
        .map(|(region, color)| (region.label(), color))
        .collect();

    let (width, height) = labels.dimensions();
    let mut image = RgbImage::from_pixel(width, height, BACKGROUND_COLOR);
    for (x, y, label) in labels.iter() {
        if label == BOUNDARY {
            image.put_pixel(x, y, BOUNDARY_COLOR);
        } else if is_region(label)
            && let Some(color) = colors.get(&label)
        {
            image.put_pixel(x, y, *color);
        }
    }

    let annotations = discovered
        .iter()
        .enumerate()
        .map(|(i, region)| RegionAnnotation {
            index: i,
            label: region.label(),
            centroid: region.centroid(),
        })
        .collect::<Vec<_>>();

    debug!("colorized {} regions", annotations.len());

    ColorizedRegions { image, annotations }
}

/// Draws each annotation's index centred on its centroid.
pub fn draw_region_indices_mut(
    canvas: &mut RgbImage,
    annotations: &[RegionAnnotation],
    font: &impl Font,
    scale: f32,
    color: Rgb<u8>,
) {
    let scale = PxScale::from(scale);
    for annotation in annotations {
        let text = annotation.index.to_string();
        let (x, y) = text_origin(annotation.centroid, text_size(scale, font, &text));
        draw_text_mut(canvas, color, x, y, scale, font, &text);
    }
}

/// Top-left corner that centres a `(width, height)` text box on `centroid`.
fn text_origin(centroid: (f64, f64), (width, height): (u32, u32)) -> (i32, i32) {
    let x = centroid.0.round() as i32 - (width / 2) as i32;
    let y = centroid.1.round() as i32 - (height / 2) as i32;
    (x, y)
}

/// Blends a colorized rendering of `labels` over `base`.
///
/// `alpha` is the weight of the region colors (`0.0` keeps `base`, `1.0` shows only
/// the regions). Only region and boundary cells are blended.
///
/// # Errors
///
/// Returns [`crate::SegmentationError::DimensionMismatch`] if `base` and `labels`
/// differ in size.
pub fn overlay_regions(base: &RgbImage, labels: &LabelBuffer, alpha: f32) -> Result<RgbImage> {
    labels.ensure_dimensions(base.dimensions())?;
    let alpha = alpha.clamp(0.0, 1.0);
    let colorized = colorize_regions(labels);

    let mut out = base.clone();
    for (x, y, label) in labels.iter() {
        if label != BOUNDARY && !is_region(label) {
            continue;
        }
        let top = colorized.image.get_pixel(x, y);
        let pixel = out.get_pixel_mut(x, y);
        for c in 0..3 {
            let blended = f32::from(pixel[c]) * (1.0 - alpha) + f32::from(top[c]) * alpha;
            pixel[c] = blended.round() as u8;
        }
    }
    Ok(out)
}
