//! Reading GPS tags from image bytes with `kamadak-exif`.

use std::fmt::Write as _;
use std::io::Cursor;

use exif::{Exif, Field, In, Reader, Tag, Value};
use log::debug;

use super::extract::{extract_location, GpsTags};
use super::{Hemisphere, LocationReading};

/// Read the photo's GPS location from JPEG, PNG or TIFF bytes.
///
/// Files without readable EXIF data report [`LocationReading::NotPresent`].
pub fn read_location(bytes: &[u8]) -> LocationReading {
    match read_exif(bytes) {
        Some(exif) => extract_location(&GpsTags::from_exif(&exif)),
        None => LocationReading::NotPresent,
    }
}

/// Check whether the image carries a usable GPS location.
pub fn has_gps_data(bytes: &[u8]) -> bool {
    read_location(bytes).is_present()
}

impl GpsTags {
    /// Collect the GPS tags of the primary image.
    pub fn from_exif(exif: &Exif) -> Self {
        let field = |tag| exif.get_field(tag, In::PRIMARY);

        let latitude = decimal_axis(
            field(Tag::GPSLatitude),
            field(Tag::GPSLatitudeRef),
            [Hemisphere::North, Hemisphere::South],
        );
        let longitude = decimal_axis(
            field(Tag::GPSLongitude),
            field(Tag::GPSLongitudeRef),
            [Hemisphere::East, Hemisphere::West],
        );

        Self {
            decimal: latitude.zip(longitude),
            latitude: field(Tag::GPSLatitude).and_then(raw_value),
            latitude_ref: field(Tag::GPSLatitudeRef).and_then(raw_value),
            longitude: field(Tag::GPSLongitude).and_then(raw_value),
            longitude_ref: field(Tag::GPSLongitudeRef).and_then(raw_value),
        }
    }
}

/// Human-readable dump of the GPS and camera tags, for troubleshooting.
pub fn describe_exif(bytes: &[u8]) -> String {
    let mut out = String::from("=== EXIF DEBUG INFO ===\n");

    let Some(exif) = read_exif(bytes) else {
        out.push_str("No EXIF data found\n");
        return out;
    };

    let value = |tag| {
        exif.get_field(tag, In::PRIMARY)
            .and_then(raw_value)
            .unwrap_or_else(|| "N/A".to_string())
    };

    out.push_str("\n--- GPS ---\n");
    for (name, tag) in [
        ("GPS_LATITUDE", Tag::GPSLatitude),
        ("GPS_LONGITUDE", Tag::GPSLongitude),
        ("GPS_LATITUDE_REF", Tag::GPSLatitudeRef),
        ("GPS_LONGITUDE_REF", Tag::GPSLongitudeRef),
        ("GPS_ALTITUDE", Tag::GPSAltitude),
        ("GPS_TIMESTAMP", Tag::GPSTimeStamp),
        ("GPS_DATESTAMP", Tag::GPSDateStamp),
    ] {
        let _ = writeln!(out, "{name}: {}", value(tag));
    }

    out.push_str("\n--- DECODED LOCATION ---\n");
    match GpsTags::from_exif(&exif).decimal {
        Some((lat, lon)) => {
            let _ = writeln!(out, "Latitude: {lat}");
            let _ = writeln!(out, "Longitude: {lon}");
        }
        None => out.push_str("Coordinates unavailable\n"),
    }

    out.push_str("\n--- CAMERA ---\n");
    for (name, tag) in [
        ("DATETIME", Tag::DateTime),
        ("MAKE", Tag::Make),
        ("MODEL", Tag::Model),
        ("ORIENTATION", Tag::Orientation),
        ("IMAGE_WIDTH", Tag::ImageWidth),
        ("IMAGE_LENGTH", Tag::ImageLength),
        ("SOFTWARE", Tag::Software),
    ] {
        let _ = writeln!(out, "{name}: {}", value(tag));
    }

    debug!("{out}");
    out
}

fn read_exif(bytes: &[u8]) -> Option<Exif> {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => Some(exif),
        Err(e) => {
            debug!("No readable EXIF data: {e}");
            None
        }
    }
}

/// Render a tag value the way the fallback parser expects it.
///
/// Rationals become `"n/d,n/d,n/d"`; ASCII values lose their padding.
fn raw_value(field: &Field) -> Option<String> {
    match &field.value {
        Value::Rational(parts) => Some(
            parts
                .iter()
                .map(|r| format!("{}/{}", r.num, r.denom))
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Ascii(parts) => parts.first().map(|s| {
            String::from_utf8_lossy(s)
                .trim_end_matches('\0')
                .trim()
                .to_string()
        }),
        _ => Some(field.display_value().to_string()),
    }
}

/// Compute a signed decimal axis straight from the rationals.
///
/// Requires three components with non-zero denominators and a reference
/// letter valid for this axis.
fn decimal_axis(
    magnitude: Option<&Field>,
    reference: Option<&Field>,
    allowed: [Hemisphere; 2],
) -> Option<f64> {
    let Value::Rational(parts) = &magnitude?.value else {
        return None;
    };
    if parts.len() < 3 || parts[..3].iter().any(|r| r.denom == 0) {
        return None;
    }

    let hemisphere = Hemisphere::from_ref(&raw_value(reference?)?)?;
    if !allowed.contains(&hemisphere) {
        return None;
    }

    let value = parts[0].to_f64() + parts[1].to_f64() / 60.0 + parts[2].to_f64() / 3600.0;
    Some(value * hemisphere.sign())
}
