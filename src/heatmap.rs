//! Blue-to-red rendering of per-region scores.

use image::RgbImage;
use log::debug;

use crate::colors::heat_color;
use crate::error::{Result, SegmentationError};
use crate::irregularity::min_max;
use crate::labels::{LabelBuffer, RegionIndex};
use crate::region_labelling::BACKGROUND_COLOR;

/// Paints every region with a color proportional to its score.
///
/// `scores` holds one value per region of `labels` in ascending label order, exactly as
/// [`crate::irregularity::score_regions`] returns them. Scores are normalised to `[0, 1]`
/// over the observed range and mapped from blue (lowest) to red (highest); when all
/// scores are equal every region gets the blue end. Cells that are not part of a region
/// stay black.
///
/// An empty score slice yields an all-black raster.
///
/// # Errors
///
/// Returns [`SegmentationError::ScoreCountMismatch`] if `scores` is non-empty and its
/// length differs from the number of regions in `labels`.
pub fn render_heatmap(labels: &LabelBuffer, scores: &[f64]) -> Result<RgbImage> {
    let (width, height) = labels.dimensions();
    let mut image = RgbImage::from_pixel(width, height, BACKGROUND_COLOR);

    let Some((min, max)) = min_max(scores) else {
        debug!("heatmap: no scores, rendering blank {}x{} raster", width, height);
        return Ok(image);
    };

    let index = RegionIndex::build(labels);
    if index.len() != scores.len() {
        return Err(SegmentationError::ScoreCountMismatch {
            expected: index.len(),
            actual: scores.len(),
        });
    }

    let range = max - min;
    for (region, &score) in index.iter().zip(scores) {
        let t = if range > 0.0 { (score - min) / range } else { 0.0 };
        let color = heat_color(t);
        for p in region.pixels() {
            image.put_pixel(p.x, p.y, color);
        }
    }

    debug!(
        "heatmap: {} regions, score range [{:.4}, {:.4}]",
        scores.len(),
        min,
        max
    );
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn sample() -> LabelBuffer {
        LabelBuffer::from_rows(&[[2, 2, -1, 3], [1, 0, 4, 4]]).unwrap()
    }

    #[test]
    fn test_equal_scores_map_to_blue() {
        let image = render_heatmap(&sample(), &[1.0, 1.0, 1.0]).unwrap();
        for (x, y) in [(0, 0), (1, 0), (3, 0), (2, 1), (3, 1)] {
            assert_eq!(*image.get_pixel(x, y), Rgb([0, 0, 255]));
        }
    }

    #[test]
    fn test_scores_span_the_gradient() {
        let image = render_heatmap(&sample(), &[1.0, 3.0, 2.0]).unwrap();
        assert_eq!(*image.get_pixel(0, 0), Rgb([0, 0, 255]));
        assert_eq!(*image.get_pixel(3, 0), Rgb([255, 0, 0]));
        assert_eq!(*image.get_pixel(2, 1), Rgb([128, 0, 128]));
    }

    #[test]
    fn test_non_region_cells_stay_black() {
        let image = render_heatmap(&sample(), &[1.0, 3.0, 2.0]).unwrap();
        assert_eq!(*image.get_pixel(2, 0), BACKGROUND_COLOR);
        assert_eq!(*image.get_pixel(0, 1), BACKGROUND_COLOR);
        assert_eq!(*image.get_pixel(1, 1), BACKGROUND_COLOR);
    }

    #[test]
    fn test_empty_scores_render_black() {
        let image = render_heatmap(&sample(), &[]).unwrap();
        assert_eq!(image.dimensions(), (4, 2));
        assert!(image.pixels().all(|p| *p == BACKGROUND_COLOR));
    }

    #[test]
    fn test_score_count_must_match_regions() {
        assert!(matches!(
            render_heatmap(&sample(), &[1.0, 2.0]),
            Err(SegmentationError::ScoreCountMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_sparse_labels_map_by_rank() {
        let labels = LabelBuffer::from_rows(&[[2, 1, 9]]).unwrap();
        let image = render_heatmap(&labels, &[0.0, 1.0]).unwrap();
        assert_eq!(*image.get_pixel(0, 0), Rgb([0, 0, 255]));
        assert_eq!(*image.get_pixel(2, 0), Rgb([255, 0, 0]));
    }
}
