//! Photo decoding for Photomark.
//!
//! Photos arrive as JPEG or PNG bytes from the camera or the gallery. They are
//! decoded to RGB8, turned upright using the EXIF orientation tag, and handed
//! to the filter pipeline as a [`DecodedImage`].
//!
//! # Examples
//!
//! ```ignore
//! use photomark_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} photo", image.width, image.height);
//! ```

mod photo;
mod types;

pub use photo::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, DecodedImage, Orientation};
