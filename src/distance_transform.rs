//! Distance from every foreground pixel to the nearest background pixel.
//!
//! [`imageproc::distance_transform`] measures the opposite direction (distance to the
//! nearest *foreground* pixel), so the chamfer variants are computed here with the
//! classic two-pass sweep and the precise variant runs imageproc's exact transform on
//! the inverted mask.

use image::{GrayImage, Luma};
use imageproc::{definitions::Image, distance_transform::euclidean_squared_distance_transform};

/// Neighbourhood used to approximate Euclidean distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMask {
    /// 3x3 chamfer mask.
    Chamfer3,
    /// 5x5 chamfer mask, including knight moves.
    #[default]
    Chamfer5,
    /// Exact Euclidean distance.
    Precise,
}

impl DistanceMask {
    /// Maps the conventional mask size (`3` or `5`) to a mask.
    pub fn from_size(size: u8) -> Option<Self> {
        match size {
            3 => Some(DistanceMask::Chamfer3),
            5 => Some(DistanceMask::Chamfer5),
            _ => None,
        }
    }

    /// Chamfer forward-pass offsets `(dx, dy, weight)`. The backward pass mirrors them.
    fn forward_offsets(self) -> &'static [(i64, i64, f32)] {
        const A3: f32 = 0.955;
        const B3: f32 = 1.3693;
        const A5: f32 = 1.0;
        const B5: f32 = 1.4;
        const C5: f32 = 2.1969;
        match self {
            DistanceMask::Chamfer3 => &[(-1, 0, A3), (-1, -1, B3), (0, -1, A3), (1, -1, B3)],
            // The exact transform does not sweep.
            DistanceMask::Precise => &[],
            DistanceMask::Chamfer5 => &[
                (-1, 0, A5),
                (-1, -1, B5),
                (0, -1, A5),
                (1, -1, B5),
                (-2, -1, C5),
                (-1, -2, C5),
                (1, -2, C5),
                (2, -1, C5),
            ],
        }
    }
}

/// Distance from each non-zero pixel of `mask` to the nearest zero pixel.
///
/// Zero pixels map to `0.0`. Pixels outside the image are not treated as background,
/// so a mask without any zero pixel maps every pixel to `f32::INFINITY`.
pub fn distance_to_background(mask: &GrayImage, method: DistanceMask) -> Image<Luma<f32>> {
    let (width, height) = mask.dimensions();
    let has_background = mask.pixels().any(|p| p[0] == 0);
    if !has_background {
        return Image::from_pixel(width, height, Luma([f32::INFINITY]));
    }

    match method {
        DistanceMask::Precise => precise(mask),
        DistanceMask::Chamfer3 | DistanceMask::Chamfer5 => chamfer(mask, method),
    }
}

fn precise(mask: &GrayImage) -> Image<Luma<f32>> {
    let inverted = GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        if mask.get_pixel(x, y)[0] == 0 {
            Luma([255])
        } else {
            Luma([0])
        }
    });
    let squared = euclidean_squared_distance_transform(&inverted);
    Image::from_fn(mask.width(), mask.height(), |x, y| {
        Luma([squared.get_pixel(x, y)[0].sqrt() as f32])
    })
}

fn chamfer(mask: &GrayImage, method: DistanceMask) -> Image<Luma<f32>> {
    let (width, height) = mask.dimensions();
    let (w, h) = (width as i64, height as i64);
    let mut dist: Vec<f32> = mask
        .pixels()
        .map(|p| if p[0] == 0 { 0.0 } else { f32::INFINITY })
        .collect();
    let offsets = method.forward_offsets();

    let idx = |x: i64, y: i64| (y * w + x) as usize;

    // forwards pass
    for y in 0..h {
        for x in 0..w {
            let mut best = dist[idx(x, y)];
            if best == 0.0 {
                continue;
            }
            for &(dx, dy, weight) in offsets {
                let (nx, ny) = (x + dx, y + dy);
                if nx >= 0 && nx < w && ny >= 0 && ny < h {
                    best = best.min(dist[idx(nx, ny)] + weight);
                }
            }
            dist[idx(x, y)] = best;
        }
    }

    // backwards pass
    for y in (0..h).rev() {
        for x in (0..w).rev() {
            let mut best = dist[idx(x, y)];
            if best == 0.0 {
                continue;
            }
            for &(dx, dy, weight) in offsets {
                let (nx, ny) = (x - dx, y - dy);
                if nx >= 0 && nx < w && ny >= 0 && ny < h {
                    best = best.min(dist[idx(nx, ny)] + weight);
                }
            }
            dist[idx(x, y)] = best;
        }
    }

    Image::from_fn(width, height, |x, y| Luma([dist[idx(x as i64, y as i64)]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32, tol: f32) {
        assert!((a - b).abs() <= tol, "expected {b}, got {a}");
    }

    fn square_mask(size: u32, margin: u32) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            let inside = x >= margin && x < size - margin && y >= margin && y < size - margin;
            Luma([if inside { 255 } else { 0 }])
        })
    }

    #[test]
    fn test_background_is_zero_and_edges_are_one() {
        let mask = square_mask(11, 2);
        for method in [DistanceMask::Chamfer5, DistanceMask::Precise] {
            let dist = distance_to_background(&mask, method);
            assert_eq!(dist.get_pixel(0, 0)[0], 0.0);
            assert_eq!(dist.get_pixel(1, 5)[0], 0.0);
            assert_close(dist.get_pixel(2, 5)[0], 1.0, 1e-6);
            assert_close(dist.get_pixel(5, 5)[0], 4.0, 1e-6);
        }
    }

    #[test]
    fn test_chamfer3_underestimates_axis_steps() {
        let mask = square_mask(11, 2);
        let dist = distance_to_background(&mask, DistanceMask::Chamfer3);
        assert_close(dist.get_pixel(2, 5)[0], 0.955, 1e-6);
        assert_close(dist.get_pixel(5, 5)[0], 4.0 * 0.955, 1e-4);
    }

    #[test]
    fn test_chamfer5_is_close_to_euclidean_for_knight_moves() {
        let mut mask = GrayImage::from_pixel(9, 9, Luma([255]));
        mask.put_pixel(0, 0, Luma([0]));
        let chamfer = distance_to_background(&mask, DistanceMask::Chamfer5);
        let precise = distance_to_background(&mask, DistanceMask::Precise);
        assert_close(chamfer.get_pixel(2, 1)[0], 5f32.sqrt(), 0.05);
        assert_close(precise.get_pixel(2, 1)[0], 5f32.sqrt(), 1e-5);
        assert_close(chamfer.get_pixel(8, 8)[0], 8.0 * 2f32.sqrt(), 0.5);
    }

    #[test]
    fn test_mask_without_background_is_unbounded() {
        let mask = GrayImage::from_pixel(4, 4, Luma([1]));
        let dist = distance_to_background(&mask, DistanceMask::Chamfer5);
        assert!(dist.pixels().all(|p| p[0].is_infinite()));
    }

    #[test]
    fn test_only_chamfer_masks_have_sweep_offsets() {
        assert_eq!(DistanceMask::Chamfer3.forward_offsets().len(), 4);
        assert_eq!(DistanceMask::Chamfer5.forward_offsets().len(), 8);
        assert!(DistanceMask::Precise.forward_offsets().is_empty());
    }

    #[test]
    fn test_from_size() {
        assert_eq!(DistanceMask::from_size(3), Some(DistanceMask::Chamfer3));
        assert_eq!(DistanceMask::from_size(5), Some(DistanceMask::Chamfer5));
        assert_eq!(DistanceMask::from_size(7), None);
    }
}
