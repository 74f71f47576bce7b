use image::math::Rect;
use imageproc::point::Point;
use num_traits::{Num, ToPrimitive};

/// Finds the smallest axis-aligned box containing every pixel in `pixels`.
///
/// Pixel coordinates address whole cells, so a single pixel yields a `1x1`
/// rectangle and the returned width/height always cover the last row and
/// column inclusively.
///
/// This version is generic over numeric types that implement `PartialOrd`, making it
/// suitable for both integer and floating-point coordinates. Coordinates that cannot
/// be represented as `u32` (e.g. negative values) are clamped to `0`.
///
/// # Returns
///
/// `None` if `pixels` is empty.
///
/// # Examples
///
/// ```
/// use image::math::Rect;
/// use imageproc::point::Point;
/// use region_irregularity::rect::pixel_bounding_box;
///
/// let pixels = [Point::new(4u32, 7), Point::new(9, 2), Point::new(6, 5)];
/// let bounds = pixel_bounding_box(&pixels).unwrap();
///
/// assert_eq!(bounds, Rect { x: 4, y: 2, width: 6, height: 6 });
/// ```
pub fn pixel_bounding_box<T>(pixels: &[Point<T>]) -> Option<Rect>
where
    T: Copy + PartialOrd + Num + ToPrimitive,
{
    let (first, rest) = pixels.split_first()?;
    let mut min_x = first.x;
    let mut max_x = first.x;
    let mut min_y = first.y;
    let mut max_y = first.y;

    // `T` only has a `PartialOrd`, so no `min`/`max` helpers here.
    for p in rest {
        if p.x < min_x {
            min_x = p.x;
        }
        if p.x > max_x {
            max_x = p.x;
        }
        if p.y < min_y {
            min_y = p.y;
        }
        if p.y > max_y {
            max_y = p.y;
        }
    }

    let x = min_x.to_u32().unwrap_or(0);
    let y = min_y.to_u32().unwrap_or(0);

    let width = max_x.to_u32().unwrap_or(0).saturating_sub(x) + 1;
    let height = max_y.to_u32().unwrap_or(0).saturating_sub(y) + 1;

    Some(Rect {
        x,
        y,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pixels_have_no_box() {
        let pixels: [Point<u32>; 0] = [];
        assert_eq!(pixel_bounding_box(&pixels), None);
    }

    #[test]
    fn test_single_pixel_box() {
        let expected = Rect {
            x: 100,
            y: 100,
            width: 1,
            height: 1,
        };
        assert_eq!(pixel_bounding_box(&[Point::new(100u32, 100)]), Some(expected));
    }

    #[test]
    fn test_box_is_order_independent() {
        let pixels = [
            Point::new(20u32, 30),
            Point::new(120, 30),
            Point::new(120, 80),
            Point::new(20, 80),
        ];
        let expected = Rect {
            x: 20,
            y: 30,
            width: 101,
            height: 51,
        };
        let shuffled = [pixels[2], pixels[0], pixels[3], pixels[1]];
        assert_eq!(pixel_bounding_box(&pixels), Some(expected));
        assert_eq!(pixel_bounding_box(&shuffled), Some(expected));
    }

    #[test]
    fn test_negative_coordinates_clamp_to_origin() {
        let pixels = [Point::new(-10i32, -20), Point::new(50, 30)];
        let expected = Rect {
            x: 0,
            y: 0,
            width: 51,
            height: 31,
        };
        assert_eq!(pixel_bounding_box(&pixels), Some(expected));
    }
}
