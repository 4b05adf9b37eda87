//! Photo filter bindings.
//!
//! Filters are chosen by label (`"Sepia"`, `"Brightness+"`) or bare name,
//! case-insensitively.

use crate::types::JsDecodedImage;
use photomark_core::filter::{self, PhotoFilter};
use wasm_bindgen::prelude::*;

/// Apply the named filter, returning a new image.
#[wasm_bindgen]
pub fn apply_filter(image: &JsDecodedImage, name: &str) -> Result<JsDecodedImage, JsValue> {
    let filter = name
        .parse::<PhotoFilter>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let out = filter::apply_filter(&image.to_decoded(), filter);
    Ok(JsDecodedImage::from_decoded(out))
}

/// Filter labels in display order.
#[wasm_bindgen]
pub fn filter_names() -> js_sys::Array {
    PhotoFilter::ALL
        .iter()
        .map(|f| JsValue::from_str(f.label()))
        .collect()
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_apply_filter_by_label() {
        let img = JsDecodedImage::new(1, 1, vec![100, 100, 100]);
        let out = apply_filter(&img, "Brightness+").unwrap();
        assert_eq!(out.pixels(), vec![150, 150, 150]);
    }

    #[wasm_bindgen_test]
    fn test_unknown_filter_errors() {
        let img = JsDecodedImage::new(1, 1, vec![0, 0, 0]);
        assert!(apply_filter(&img, "Posterize").is_err());
    }

    #[wasm_bindgen_test]
    fn test_filter_names() {
        let names = filter_names();
        assert_eq!(names.length(), 9);
        assert_eq!(names.get(0).as_string().as_deref(), Some("Original"));
        assert_eq!(names.get(8).as_string().as_deref(), Some("Vintage"));
    }
}
