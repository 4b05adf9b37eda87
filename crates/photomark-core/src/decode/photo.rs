//! Photo decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode a JPEG or PNG photo, rotating it upright according to EXIF.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognised and
/// `DecodeError::CorruptedFile` if decoding fails part-way.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let img = decode_dynamic(bytes)?;
    let upright = apply_orientation(img, get_orientation(bytes));
    Ok(DecodedImage::from_rgb_image(upright.into_rgb8()))
}

/// Decode without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let img = decode_dynamic(bytes)?;
    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

/// Read the EXIF orientation, defaulting to `Orientation::Normal`.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_jpeg;
    use image::{ImageFormat, RgbImage};

    /// Red pixel on the left, green on the right.
    fn two_pixel_image() -> DynamicImage {
        let rgb = RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        DynamicImage::ImageRgb8(rgb)
    }

    fn png_bytes(img: &DynamicImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_jpeg() {
        let jpeg = encode_jpeg(&vec![128u8; 8 * 4 * 3], 8, 4, 90).unwrap();
        let img = decode_image(&jpeg).unwrap();
        assert_eq!((img.width, img.height), (8, 4));
        assert_eq!(img.pixels.len(), 8 * 4 * 3);
    }

    #[test]
    fn test_decode_png_is_lossless() {
        let img = decode_image(&png_bytes(&two_pixel_image())).unwrap();
        assert_eq!(img.pixels, vec![255, 0, 0, 0, 255, 0]);
    }

    #[test]
    fn test_decode_no_orientation() {
        let img = decode_image_no_orientation(&png_bytes(&two_pixel_image())).unwrap();
        assert_eq!((img.width, img.height), (2, 1));
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let jpeg = encode_jpeg(&vec![128u8; 16 * 16 * 3], 16, 16, 90).unwrap();
        let result = decode_image(&jpeg[..20]);
        assert!(result.is_err());
    }

    #[test]
    fn test_orientation_without_exif() {
        let jpeg = encode_jpeg(&[0, 0, 0], 1, 1, 90).unwrap();
        assert_eq!(get_orientation(&jpeg), Orientation::Normal);
        assert_eq!(get_orientation(b"junk"), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let rotated = apply_orientation(two_pixel_image(), Orientation::Rotate90CW).into_rgb8();
        assert_eq!(rotated.dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let flipped = apply_orientation(two_pixel_image(), Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(flipped.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(flipped.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_normal_is_identity() {
        let same = apply_orientation(two_pixel_image(), Orientation::Normal).into_rgb8();
        assert_eq!(same.get_pixel(0, 0).0, [255, 0, 0]);
    }
}
