//! Photo filters offered on the capture screen.
//!
//! Each filter maps a [`DecodedImage`] to a new image of the same size.
//! Filters never fail: an empty image, or one whose buffer does not match its
//! dimensions, is returned unchanged.
//!
//! | Filter       | Effect                                   |
//! |--------------|------------------------------------------|
//! | Original     | none                                     |
//! | Grayscale    | BT.601 luma                              |
//! | Sepia        | sepia colour matrix (BGR row order)      |
//! | Blur         | Gaussian blur (15x15 equivalent)         |
//! | Sharpen      | 3x3 sharpen kernel                       |
//! | Invert       | photographic negative                    |
//! | Brightness+  | +50 on every channel                     |
//! | Contrast+    | x1.5 on every channel                    |
//! | Vintage      | sepia, then faded (x0.9 + 15)            |

mod color;
mod convolve;

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;

pub use color::SEPIA_MATRIX;
pub use convolve::{BLUR_SIGMA, SHARPEN_KERNEL};

/// Returned when a filter name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown filter: {0}")]
pub struct UnknownFilter(pub String);

/// A selectable photo filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PhotoFilter {
    #[default]
    Original,
    Grayscale,
    Sepia,
    Blur,
    Sharpen,
    Invert,
    #[serde(rename = "Brightness+")]
    Brightness,
    #[serde(rename = "Contrast+")]
    Contrast,
    Vintage,
}

impl PhotoFilter {
    /// All filters in display order.
    pub const ALL: [PhotoFilter; 9] = [
        PhotoFilter::Original,
        PhotoFilter::Grayscale,
        PhotoFilter::Sepia,
        PhotoFilter::Blur,
        PhotoFilter::Sharpen,
        PhotoFilter::Invert,
        PhotoFilter::Brightness,
        PhotoFilter::Contrast,
        PhotoFilter::Vintage,
    ];

    /// Name shown to the user and stored with saved photos.
    pub fn label(self) -> &'static str {
        match self {
            PhotoFilter::Original => "Original",
            PhotoFilter::Grayscale => "Grayscale",
            PhotoFilter::Sepia => "Sepia",
            PhotoFilter::Blur => "Blur",
            PhotoFilter::Sharpen => "Sharpen",
            PhotoFilter::Invert => "Invert",
            PhotoFilter::Brightness => "Brightness+",
            PhotoFilter::Contrast => "Contrast+",
            PhotoFilter::Vintage => "Vintage",
        }
    }

    pub fn is_identity(self) -> bool {
        self == PhotoFilter::Original
    }
}

impl fmt::Display for PhotoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PhotoFilter {
    type Err = UnknownFilter;

    /// Accepts the label (`"Brightness+"`) or the bare name (`"brightness"`),
    /// ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PhotoFilter::ALL
            .into_iter()
            .find(|f| {
                f.label().eq_ignore_ascii_case(wanted)
                    || f.label().trim_end_matches('+').eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

/// Apply a filter, returning a new image.
pub fn apply_filter(image: &DecodedImage, filter: PhotoFilter) -> DecodedImage {
    if !image.is_consistent() {
        warn!(
            "Skipping {filter} filter: {}x{} image has {} bytes",
            image.width,
            image.height,
            image.pixels.len()
        );
        return image.clone();
    }
    if image.is_empty() {
        return image.clone();
    }

    match filter {
        PhotoFilter::Original => image.clone(),
        PhotoFilter::Blur | PhotoFilter::Sharpen => {
            let Some(rgb) = image.to_rgb_image() else {
                return image.clone();
            };
            let out = if filter == PhotoFilter::Blur {
                convolve::gaussian_blur(&rgb, BLUR_SIGMA)
            } else {
                convolve::convolve3x3(&rgb, &SHARPEN_KERNEL)
            };
            DecodedImage::from_rgb_image(out)
        }
        _ => {
            let mut out = image.clone();
            apply_pointwise(&mut out.pixels, filter);
            out
        }
    }
}

fn apply_pointwise(pixels: &mut [u8], filter: PhotoFilter) {
    match filter {
        PhotoFilter::Grayscale => color::grayscale(pixels),
        PhotoFilter::Sepia => color::color_matrix(pixels, &SEPIA_MATRIX),
        PhotoFilter::Invert => color::invert(pixels),
        PhotoFilter::Brightness => color::linear(pixels, 1.0, 50.0),
        PhotoFilter::Contrast => color::linear(pixels, 1.5, 0.0),
        PhotoFilter::Vintage => {
            color::color_matrix(pixels, &SEPIA_MATRIX);
            color::linear(pixels, 0.9, 15.0);
        }
        PhotoFilter::Original | PhotoFilter::Blur | PhotoFilter::Sharpen => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> DecodedImage {
        let pixels = rgb.repeat(width as usize * height as usize);
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_labels_roundtrip_through_from_str() {
        for filter in PhotoFilter::ALL {
            assert_eq!(filter.label().parse::<PhotoFilter>(), Ok(filter));
        }
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!("brightness".parse::<PhotoFilter>(), Ok(PhotoFilter::Brightness));
        assert_eq!(" CONTRAST+ ".parse::<PhotoFilter>(), Ok(PhotoFilter::Contrast));
        assert_eq!(
            "Posterize".parse::<PhotoFilter>(),
            Err(UnknownFilter("Posterize".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&PhotoFilter::Brightness).unwrap();
        assert_eq!(json, r#""Brightness+""#);
        let back: PhotoFilter = serde_json::from_str(r#""Vintage""#).unwrap();
        assert_eq!(back, PhotoFilter::Vintage);
    }

    #[test]
    fn test_every_filter_keeps_dimensions() {
        let img = solid(6, 4, [120, 80, 40]);
        for filter in PhotoFilter::ALL {
            let out = apply_filter(&img, filter);
            assert_eq!((out.width, out.height), (6, 4), "{filter}");
            assert!(out.is_consistent(), "{filter}");
        }
    }

    #[test]
    fn test_original_is_identity() {
        let img = solid(3, 3, [1, 2, 3]);
        assert_eq!(apply_filter(&img, PhotoFilter::Original), img);
    }

    #[test]
    fn test_grayscale_channels_equal() {
        let out = apply_filter(&solid(2, 2, [200, 100, 50]), PhotoFilter::Grayscale);
        for px in out.pixels.chunks_exact(3) {
            assert!(px[0] == px[1] && px[1] == px[2]);
        }
    }

    #[test]
    fn test_vintage_lifts_blacks() {
        let out = apply_filter(&solid(2, 1, [0, 0, 0]), PhotoFilter::Vintage);
        assert_eq!(out.pixels, vec![15; 6]);
    }

    #[test]
    fn test_brightness_and_contrast() {
        let img = solid(1, 1, [100, 100, 100]);
        assert_eq!(apply_filter(&img, PhotoFilter::Brightness).pixels, vec![150; 3]);
        assert_eq!(apply_filter(&img, PhotoFilter::Contrast).pixels, vec![150; 3]);
    }

    #[test]
    fn test_degenerate_sizes_do_not_panic() {
        for (width, height) in [(0, 0), (5, 0), (0, 5), (1, 1)] {
            let img = solid(width, height, [200, 10, 90]);
            for filter in PhotoFilter::ALL {
                let out = apply_filter(&img, filter);
                assert_eq!((out.width, out.height), (width, height), "{filter}");
                assert!(out.is_consistent(), "{filter}");
            }
        }
    }

    #[test]
    fn test_inconsistent_image_returned_unchanged() {
        let broken = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![7; 12],
        };
        for filter in PhotoFilter::ALL {
            assert_eq!(apply_filter(&broken, filter), broken);
        }
    }
}
