//! Binary mask extraction from a color image.
//!
//! The usual chain is: keep one color channel, convert to grayscale, blur, then split
//! foreground from background at Otsu's level. Each step is exposed on its own.

use image::{GrayImage, Luma, RgbImage, imageops};
use imageproc::{contrast::otsu_level, filter::gaussian_blur_f32};
use log::debug;

/// A color channel of an RGB image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Options for [`binary_mask`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessConfig {
    /// Channel kept before grayscale conversion; `None` keeps all three.
    pub channel: Option<Channel>,
    /// Standard deviation of the Gaussian blur; `0.0` disables blurring.
    pub blur_sigma: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            channel: Some(Channel::Blue),
            blur_sigma: 3.0,
        }
    }
}

impl PreprocessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, channel: Option<Channel>) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma;
        self
    }
}

/// Copy of `image` with every channel except `channel` set to zero.
pub fn isolate_channel(image: &RgbImage, channel: Channel) -> RgbImage {
    let keep = channel.offset();
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        for c in 0..3 {
            if c != keep {
                pixel[c] = 0;
            }
        }
    }
    out
}

pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    imageops::grayscale(image)
}

/// Gaussian blur; a non-positive or non-finite `sigma` returns a copy.
pub fn blur(image: &GrayImage, sigma: f32) -> GrayImage {
    if !(sigma.is_finite() && sigma > 0.0) {
        return image.clone();
    }
    gaussian_blur_f32(image, sigma)
}

/// Pixels strictly above Otsu's level become `255`, all others `0`.
pub fn otsu_binarize(image: &GrayImage) -> GrayImage {
    let level = otsu_level(image);
    debug!("otsu level {}", level);

    let mut binary = image.clone();
    for pixel in binary.pixels_mut() {
        if pixel.0[0] > level {
            *pixel = Luma([255]); // Object
        } else {
            *pixel = Luma([0]); // Background
        }
    }
    binary
}

/// Runs the full chain and returns a mask ready for
/// [`crate::markers::generate_markers`].
pub fn binary_mask(image: &RgbImage, config: &PreprocessConfig) -> GrayImage {
    let gray = match config.channel {
        Some(channel) => to_grayscale(&isolate_channel(image, channel)),
        None => to_grayscale(image),
    };
    otsu_binarize(&blur(&gray, config.blur_sigma))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_isolate_channel_zeroes_the_others() {
        let image = RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
        assert_eq!(
            *isolate_channel(&image, Channel::Blue).get_pixel(1, 1),
            Rgb([0, 0, 30])
        );
        assert_eq!(
            *isolate_channel(&image, Channel::Red).get_pixel(0, 0),
            Rgb([10, 0, 0])
        );
    }

    #[test]
    fn test_blur_with_zero_sigma_is_identity() {
        let image = GrayImage::from_fn(5, 5, |x, y| Luma([(x * 40 + y) as u8]));
        assert_eq!(blur(&image, 0.0), image);
    }

    #[test]
    fn test_otsu_splits_two_levels() {
        let image = GrayImage::from_fn(10, 10, |x, _| Luma([if x < 5 { 20 } else { 200 }]));
        let binary = otsu_binarize(&image);
        assert_eq!(binary.get_pixel(0, 0)[0], 0);
        assert_eq!(binary.get_pixel(9, 9)[0], 255);
    }

    #[test]
    fn test_binary_mask_finds_bright_square() {
        let image = RgbImage::from_fn(40, 40, |x, y| {
            if (10..30).contains(&x) && (10..30).contains(&y) {
                Rgb([0, 0, 220])
            } else {
                Rgb([0, 0, 15])
            }
        });
        let mask = binary_mask(&image, &PreprocessConfig::default().with_blur_sigma(1.0));
        assert_eq!(mask.get_pixel(20, 20)[0], 255);
        assert_eq!(mask.get_pixel(2, 2)[0], 0);
        assert!(mask.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }
}
