//! Degree/minute/second string conversion.
//!
//! EXIF stores each GPS axis as three rationals. Once rendered as text they
//! look like `"40/1,26/1,46/1"`; some writers emit plain decimals instead
//! (`"40,26,46.5"`). Both forms are accepted here.

use log::{debug, warn};

use super::Hemisphere;

/// Parse a single DMS component (`"a/b"` or a plain decimal).
///
/// A plain decimal that does not parse, a literal `"0"` denominator, a
/// fraction without exactly two sides, or a non-finite result gives
/// `Some(0.0)`. A fraction whose numerator or denominator is not a number
/// gives `None`, which invalidates the whole axis.
pub fn parse_component(component: &str) -> Option<f64> {
    let trimmed = component.trim();

    let value = if trimmed.contains('/') {
        let parts: Vec<&str> = trimmed.split('/').collect();
        if parts.len() != 2 || parts[1].trim() == "0" {
            return Some(0.0);
        }
        let num = parts[0].trim().parse::<f64>().ok()?;
        let denom = parts[1].trim().parse::<f64>().ok()?;
        num / denom
    } else {
        trimmed.parse::<f64>().unwrap_or(0.0)
    };

    Some(if value.is_finite() { value } else { 0.0 })
}

/// Convert a comma-separated DMS string to an unsigned decimal magnitude.
///
/// Returns `0.0` when fewer than three components are present or when any
/// fraction fails to parse. Components past the third are ignored.
pub fn dms_to_decimal(raw: &str) -> f64 {
    let Some(dms) = raw.split(',').map(parse_component).collect::<Option<Vec<f64>>>() else {
        warn!("Invalid DMS value {raw:?}: unparseable fraction");
        return 0.0;
    };

    if dms.len() < 3 {
        warn!("Invalid DMS value {raw:?}: expected 3 components, got {}", dms.len());
        return 0.0;
    }

    let (degrees, minutes, seconds) = (dms[0], dms[1], dms[2]);
    let result = degrees + minutes / 60.0 + seconds / 3600.0;
    debug!("Converted DMS {raw:?} to {result} ({degrees}° {minutes}' {seconds}\")");

    if result.is_finite() {
        result
    } else {
        0.0
    }
}

/// Convert a DMS string and apply the hemisphere reference.
///
/// `S` and `W` negate the magnitude; `N`, `E` and anything unrecognised keep it.
/// This function is total: it returns a finite value for any input.
pub fn parse_coordinate(raw: &str, hemisphere_ref: &str) -> f64 {
    let magnitude = dms_to_decimal(raw);
    match Hemisphere::from_ref(hemisphere_ref) {
        Some(hemisphere) => magnitude * hemisphere.sign(),
        None => magnitude,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
