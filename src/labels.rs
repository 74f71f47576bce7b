//! Label buffers and the per-region index built from them.
//!
//! A [`LabelBuffer`] stores one signed label per pixel. Three values are reserved:
//! [`UNKNOWN`] (`0`), [`BACKGROUND`] (`1`) and [`BOUNDARY`] (`-1`). Every value from
//! [`FIRST_REGION`] (`2`) upward names a distinct region.
//!
//! Regions are not stored in the buffer as objects. [`RegionIndex`] collects the pixels
//! of every region in a single pass so that later stages never rescan the whole buffer
//! for each region.

use std::collections::BTreeMap;

use image::{Luma, math::Rect};
use imageproc::{definitions::Image, point::Point};

use crate::error::{Result, SegmentationError};
use crate::rect::pixel_bounding_box;

/// Cell not yet assigned to any region.
pub const UNKNOWN: i32 = 0;
/// Cell that belongs to the background.
pub const BACKGROUND: i32 = 1;
/// Cell where two growing regions collided.
pub const BOUNDARY: i32 = -1;
/// Smallest label that names a region.
pub const FIRST_REGION: i32 = 2;

/// Returns `true` if `label` names a region rather than a reserved value.
#[inline]
pub fn is_region(label: i32) -> bool {
    label >= FIRST_REGION
}

/// A 2-D grid of labels, one per pixel.
///
/// Every cell holds [`UNKNOWN`], [`BACKGROUND`], [`BOUNDARY`] or a region id
/// `>= FIRST_REGION`. The invariant is checked when a buffer is built from a raw image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBuffer {
    image: Image<Luma<i32>>,
}

impl LabelBuffer {
    /// Creates a `width x height` buffer filled with `label`.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentationError::InvalidLabel`] if `label` is below [`BOUNDARY`].
    pub fn filled(width: u32, height: u32, label: i32) -> Result<Self> {
        if label < BOUNDARY {
            return Err(SegmentationError::InvalidLabel {
                x: 0,
                y: 0,
                value: label,
            });
        }
        Ok(Self {
            image: Image::from_pixel(width, height, Luma([label])),
        })
    }

    /// Wraps a raw label image after checking every cell.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentationError::InvalidLabel`] for the first cell (row-major) whose
    /// value is below [`BOUNDARY`].
    pub fn from_image(image: Image<Luma<i32>>) -> Result<Self> {
        if let Some((x, y, p)) = image.enumerate_pixels().find(|(_, _, p)| p[0] < BOUNDARY) {
            return Err(SegmentationError::InvalidLabel { x, y, value: p[0] });
        }
        Ok(Self { image })
    }

    /// Builds a buffer from row-major rows of labels.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentationError::DimensionMismatch`] if the rows are ragged and
    /// [`SegmentationError::InvalidLabel`] if any value is below [`BOUNDARY`].
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.as_ref().len()) as u32;
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for row in rows {
            let row = row.as_ref();
            if row.len() as u32 != width {
                return Err(SegmentationError::DimensionMismatch {
                    expected: (width, height),
                    actual: (row.len() as u32, height),
                });
            }
            data.extend_from_slice(row);
        }
        let image = Image::from_raw(width, height, data).ok_or(
            SegmentationError::DimensionMismatch {
                expected: (width, height),
                actual: (width, height),
            },
        )?;
        Self::from_image(image)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Label at `(x, y)`. Panics if the position is out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> i32 {
        self.image.get_pixel(x, y)[0]
    }

    /// Label at `(x, y)`, or `None` if the position is out of bounds.
    #[inline]
    pub fn get_checked(&self, x: u32, y: u32) -> Option<i32> {
        self.image.get_pixel_checked(x, y).map(|p| p[0])
    }

    /// Overwrites the label at `(x, y)`. Panics if the position is out of bounds.
    ///
    /// Callers inside the crate only write reserved values or existing region ids,
    /// which keeps the buffer valid.
    #[inline]
    pub(crate) fn set(&mut self, x: u32, y: u32, label: i32) {
        self.image.put_pixel(x, y, Luma([label]));
    }

    /// Iterates `(x, y, label)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, i32)> + '_ {
        self.image.enumerate_pixels().map(|(x, y, p)| (x, y, p[0]))
    }

    /// Number of cells holding `label`.
    pub fn count(&self, label: i32) -> usize {
        self.image.pixels().filter(|p| p[0] == label).count()
    }

    /// Distinct region ids present in the buffer, ascending.
    pub fn region_labels(&self) -> Vec<i32> {
        let mut labels: Vec<i32> = self
            .image
            .pixels()
            .map(|p| p[0])
            .filter(|&l| is_region(l))
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// Number of distinct region ids present in the buffer.
    pub fn region_count(&self) -> usize {
        self.region_labels().len()
    }

    pub fn as_image(&self) -> &Image<Luma<i32>> {
        &self.image
    }

    pub fn into_image(self) -> Image<Luma<i32>> {
        self.image
    }

    /// Fails with [`SegmentationError::DimensionMismatch`] unless `other` has this
    /// buffer's dimensions.
    pub(crate) fn ensure_dimensions(&self, other: (u32, u32)) -> Result<()> {
        if self.dimensions() != other {
            return Err(SegmentationError::DimensionMismatch {
                expected: self.dimensions(),
                actual: other,
            });
        }
        Ok(())
    }
}

/// The pixels of one region, as collected by [`RegionIndex`].
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    label: i32,
    pixels: Vec<Point<u32>>,
    first_seen: usize,
}

impl Region {
    pub fn label(&self) -> i32 {
        self.label
    }

    /// Pixels of the region in row-major order.
    pub fn pixels(&self) -> &[Point<u32>] {
        &self.pixels
    }

    /// Number of pixels in the region.
    pub fn area(&self) -> usize {
        self.pixels.len()
    }

    /// Row-major position of the first pixel seen with this label.
    pub fn first_seen(&self) -> usize {
        self.first_seen
    }

    /// Centroid as the first moment of the region's pixel mask, `(x, y)`.
    pub fn centroid(&self) -> (f64, f64) {
        let n = self.pixels.len().max(1) as f64;
        let (sx, sy) = self
            .pixels
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
        (sx / n, sy / n)
    }

    /// Smallest pixel rectangle containing the region.
    pub fn bounding_box(&self) -> Option<Rect> {
        pixel_bounding_box(&self.pixels)
    }
}

/// Every region of a [`LabelBuffer`], keyed and sorted by ascending label.
#[derive(Debug, Clone, Default)]
pub struct RegionIndex {
    regions: Vec<Region>,
}

impl RegionIndex {
    /// Collects all regions of `labels` in one row-major pass.
    pub fn build(labels: &LabelBuffer) -> Self {
        let mut by_label: BTreeMap<i32, Region> = BTreeMap::new();
        for (i, (x, y, label)) in labels.iter().enumerate() {
            if !is_region(label) {
                continue;
            }
            by_label
                .entry(label)
                .or_insert_with(|| Region {
                    label,
                    pixels: Vec::new(),
                    first_seen: i,
                })
                .pixels
                .push(Point::new(x, y));
        }

        Self {
            regions: by_label.into_values().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions in ascending label order.
    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    /// Region carrying `label`, if present.
    pub fn get(&self, label: i32) -> Option<&Region> {
        self.regions
            .binary_search_by_key(&label, |r| r.label)
            .ok()
            .map(|i| &self.regions[i])
    }

    /// Position of `label` in ascending label order.
    pub fn rank(&self, label: i32) -> Option<usize> {
        self.regions.binary_search_by_key(&label, |r| r.label).ok()
    }

    /// Regions in the order their first pixel appears in a row-major scan.
    pub fn in_discovery_order(&self) -> Vec<&Region> {
        let mut ordered: Vec<&Region> = self.regions.iter().collect();
        ordered.sort_unstable_by_key(|r| r.first_seen);
        ordered
    }
}

impl<'a> IntoIterator for &'a RegionIndex {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
