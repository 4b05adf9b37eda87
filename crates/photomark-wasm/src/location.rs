//! GPS location bindings.
//!
//! `read_location` returns a plain object tagged by `status`:
//!
//! ```typescript
//! const reading = read_location(bytes);
//! if (reading.status === 'present') {
//!   console.log(reading.latitude, reading.longitude);
//! }
//! ```

use photomark_core::location::{self, GpsTags, LocationReading};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Raw GPS tag strings as sent from JavaScript.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GpsTagsJs {
    latitude: Option<String>,
    latitude_ref: Option<String>,
    longitude: Option<String>,
    longitude_ref: Option<String>,
}

impl From<GpsTagsJs> for GpsTags {
    fn from(tags: GpsTagsJs) -> Self {
        GpsTags {
            decimal: None,
            latitude: tags.latitude,
            latitude_ref: tags.latitude_ref,
            longitude: tags.longitude,
            longitude_ref: tags.longitude_ref,
        }
    }
}

fn reading_to_js(reading: &LocationReading) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(reading)
        .map_err(|e| JsValue::from_str(&format!("Failed to convert location: {}", e)))
}

/// Read the GPS location from a photo's EXIF data.
#[wasm_bindgen]
pub fn read_location(bytes: &[u8]) -> Result<JsValue, JsValue> {
    reading_to_js(&location::read_location(bytes))
}

/// Read a location from tag strings another EXIF reader already pulled out.
///
/// # Arguments
/// * `tags` - `{latitude, latitudeRef, longitude, longitudeRef}`, any of which
///   may be missing
#[wasm_bindgen]
pub fn extract_location(tags: JsValue) -> Result<JsValue, JsValue> {
    let tags: GpsTagsJs = serde_wasm_bindgen::from_value(tags)
        .map_err(|e| JsValue::from_str(&format!("Invalid GPS tags: {}", e)))?;
    reading_to_js(&location::extract_location(&tags.into()))
}

/// Convert a `"d/1,m/1,s/100"` string and hemisphere letter to signed degrees.
///
/// Returns 0 when the value cannot be parsed.
#[wasm_bindgen]
pub fn parse_coordinate(raw: &str, reference: &str) -> f64 {
    location::parse_coordinate(raw, reference)
}

#[wasm_bindgen]
pub fn has_gps_data(bytes: &[u8]) -> bool {
    location::has_gps_data(bytes)
}

/// Human-readable dump of the GPS and camera tags.
#[wasm_bindgen]
pub fn describe_exif(bytes: &[u8]) -> String {
    location::describe_exif(bytes)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_read_location_not_present() {
        let value = read_location(b"plain bytes").unwrap();
        let status = js_sys::Reflect::get(&value, &JsValue::from_str("status")).unwrap();
        assert_eq!(status.as_string().as_deref(), Some("notPresent"));
    }

    #[wasm_bindgen_test]
    fn test_extract_location_from_js_object() {
        let tags = js_sys::Object::new();
        for (key, value) in [
            ("latitude", "abc/1,30/1,0/1"),
            ("latitudeRef", "N"),
            ("longitude", "0/1,7/1,0/1"),
            ("longitudeRef", "W"),
        ] {
            js_sys::Reflect::set(&tags, &JsValue::from_str(key), &JsValue::from_str(value)).unwrap();
        }

        let value = extract_location(tags.into()).unwrap();
        let status = js_sys::Reflect::get(&value, &JsValue::from_str("status")).unwrap();
        assert_eq!(status.as_string().as_deref(), Some("malformed"));
    }
}
