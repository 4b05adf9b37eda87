//! Photomark Core - geotagged photo capture library
//!
//! This crate reads GPS locations from photo EXIF data, applies the photo
//! filters, and keeps users and saved photos in flat JSON stores.

pub mod capture;
pub mod config;
pub mod decode;
pub mod encode;
pub mod filter;
pub mod location;
pub mod store;

pub use capture::{CaptureError, Selection, Studio};
pub use config::{Config, ConfigError};
pub use decode::{decode_image, DecodeError, DecodedImage};
pub use encode::{encode_jpeg, EncodeError};
pub use filter::{apply_filter, PhotoFilter};
pub use location::{
    extract_location, parse_coordinate, read_location, Coordinate, GpsTags, LocationReading,
};
pub use store::{AuthError, Photo, PhotoRepository, StoreError, User, UserRepository};
