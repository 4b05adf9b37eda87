//! Per-pixel colour filters.
//!
//! All functions work in place on RGB pixel data (3 bytes per pixel).

/// Sepia colour matrix, one row per output channel (R, G, B).
///
/// Rows are in the order used for BGR data, so on RGB pixels red takes the
/// lightest weights and blue the heaviest, giving a cool sepia.
pub const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.272, 0.534, 0.131],
    [0.349, 0.686, 0.168],
    [0.393, 0.769, 0.189],
];

/// Replace each pixel with its BT.601 luma.
pub fn grayscale(pixels: &mut [u8]) {
    for chunk in pixels.chunks_exact_mut(3) {
        let luma = 0.299 * chunk[0] as f32 + 0.587 * chunk[1] as f32 + 0.114 * chunk[2] as f32;
        let luma = saturate(luma);
        chunk.fill(luma);
    }
}

/// Multiply each pixel by a 3x3 colour matrix.
pub fn color_matrix(pixels: &mut [u8], matrix: &[[f32; 3]; 3]) {
    for chunk in pixels.chunks_exact_mut(3) {
        let (r, g, b) = (chunk[0] as f32, chunk[1] as f32, chunk[2] as f32);
        for (out, row) in chunk.iter_mut().zip(matrix) {
            *out = saturate(row[0] * r + row[1] * g + row[2] * b);
        }
    }
}

/// `v -> 255 - v` on every channel.
pub fn invert(pixels: &mut [u8]) {
    for v in pixels.iter_mut() {
        *v = 255 - *v;
    }
}

/// `v -> alpha * v + beta`, rounded and saturated.
pub fn linear(pixels: &mut [u8], alpha: f32, beta: f32) {
    for v in pixels.iter_mut() {
        *v = saturate(alpha * *v as f32 + beta);
    }
}

#[inline]
pub(crate) fn saturate(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
