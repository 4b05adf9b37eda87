//! Photomark WASM - WebAssembly bindings for Photomark
//!
//! Exposes photo decoding, GPS location reading, the photo filters and JPEG
//! export from photomark-core to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for decoded photos
//! - `decode` - JPEG/PNG decoding with EXIF orientation
//! - `location` - GPS location reading
//! - `filter` - Photo filters
//! - `encode` - JPEG export
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, read_location, apply_filter } from '@photomark/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const reading = read_location(bytes);
//! const preview = apply_filter(decode_image(bytes), 'Sepia');
//! ```

use wasm_bindgen::prelude::*;

mod console;
mod decode;
mod encode;
mod filter;
mod location;
mod types;

pub use decode::{decode_image, get_orientation};
pub use encode::{encode_jpeg, encode_jpeg_from_image};
pub use filter::{apply_filter, filter_names};
pub use location::{describe_exif, extract_location, has_gps_data, parse_coordinate, read_location};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console::install(log::LevelFilter::Info);
}

/// Turn on debug logging, which includes the raw GPS tag values.
#[wasm_bindgen]
pub fn enable_debug_logging() {
    log::set_max_level(log::LevelFilter::Debug);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
