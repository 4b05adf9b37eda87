//! Photo encoding for Photomark.
//!
//! Filtered photos are stored as JPEG. Quality is clamped to 1-100; saved
//! photos use [`PHOTO_JPEG_QUALITY`] unless the configuration overrides it.

mod jpeg;

pub use jpeg::{encode_image, encode_jpeg, EncodeError, PHOTO_JPEG_QUALITY};
