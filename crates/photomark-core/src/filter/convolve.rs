//! Neighbourhood filters: Gaussian blur and 3x3 sharpening.

use image::{imageops, RgbImage};

use super::color::saturate;

/// Sigma matching a 15x15 Gaussian kernel with automatic sigma
/// (`0.3 * ((15 - 1) * 0.5 - 1) + 0.8`).
pub const BLUR_SIGMA: f32 = 2.6;

/// Classic 3x3 sharpen kernel, row-major.
pub const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

/// Gaussian blur of an RGB image.
pub fn gaussian_blur(img: &RgbImage, sigma: f32) -> RgbImage {
    imageops::blur(img, sigma)
}

/// Convolve with a 3x3 kernel, replicating edge pixels.
///
/// The kernel is applied as-is (no normalisation).
pub fn convolve3x3(img: &RgbImage, kernel: &[f32; 9]) -> RgbImage {
    let (width, height) = img.dimensions();
    let mut out = RgbImage::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let clamp_x = |x: i64| x.clamp(0, width as i64 - 1) as u32;
    let clamp_y = |y: i64| y.clamp(0, height as i64 - 1) as u32;

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let mut acc = [0.0f32; 3];
        for (i, weight) in kernel.iter().enumerate() {
            if *weight == 0.0 {
                continue;
            }
            let sx = clamp_x(x as i64 + (i % 3) as i64 - 1);
            let sy = clamp_y(y as i64 + (i / 3) as i64 - 1);
            let src = img.get_pixel(sx, sy);
            for c in 0..3 {
                acc[c] += weight * src[c] as f32;
            }
        }
        pixel.0 = acc.map(saturate);
    }

    out
}
