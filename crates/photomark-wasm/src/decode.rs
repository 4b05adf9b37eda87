//! Photo decoding bindings.
//!
//! ```typescript
//! import { decode_image } from '@photomark/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsDecodedImage;
use photomark_core::decode;
use wasm_bindgen::prelude::*;

/// Decode JPEG or PNG bytes, applying the EXIF orientation.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation value (1-8), or 1 when the tag is missing.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_image() {
        let jpeg = photomark_core::encode_jpeg(&[100u8; 16 * 8 * 3], 16, 8, 90).unwrap();
        let image = decode_image(&jpeg).unwrap();
        assert_eq!(image.width(), 16);
        assert_eq!(image.height(), 8);
    }

    #[wasm_bindgen_test]
    fn test_decode_invalid_bytes() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }
}
