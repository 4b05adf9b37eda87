//! GPS location extraction for Photomark.
//!
//! This module provides functionality for:
//! - Converting EXIF degree/minute/second strings to decimal degrees
//! - Choosing between the metadata reader's decimal pair and the raw tags
//! - Reading GPS tags straight from image bytes
//!
//! # Failure Semantics
//!
//! Nothing here returns an error. Missing, zeroed and malformed tags all end
//! up as a non-present [`LocationReading`], which collapses to the
//! `(0.0, 0.0)` sentinel through [`LocationReading::into_coordinate`].
//!
//! # Examples
//!
//! ```ignore
//! use photomark_core::location::{extract_location, GpsTags};
//!
//! let tags = GpsTags::from_raw("51/1,30/1,0/1", "N", "0/1,7/1,0/1", "W");
//! let coordinate = extract_location(&tags).into_coordinate();
//! println!("{coordinate}");
//! ```

mod dms;
mod extract;
mod reader;
mod types;

pub use dms::{dms_to_decimal, parse_component, parse_coordinate};
pub use extract::{extract_location, GpsTags, ZEROED_PLACEHOLDER};
pub use reader::{describe_exif, has_gps_data, read_location};
pub use types::{Coordinate, Hemisphere, LocationReading};
