//! Two-stage GPS location extraction.

use log::{debug, warn};

use super::dms::parse_coordinate;
use super::{Coordinate, LocationReading};

/// The "GPS present but zeroed" value some devices write.
pub const ZEROED_PLACEHOLDER: &str = "0/1,0/1,0/1";

/// GPS values pulled out of an image's metadata.
///
/// `decimal` is the metadata reader's own decimal interpretation, already
/// signed. The four string fields are the raw tag values used as a fallback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpsTags {
    pub decimal: Option<(f64, f64)>,
    pub latitude: Option<String>,
    pub latitude_ref: Option<String>,
    pub longitude: Option<String>,
    pub longitude_ref: Option<String>,
}

impl GpsTags {
    /// Tags carrying only raw strings, no decimal pair.
    pub fn from_raw(
        latitude: &str,
        latitude_ref: &str,
        longitude: &str,
        longitude_ref: &str,
    ) -> Self {
        Self {
            decimal: None,
            latitude: Some(latitude.to_string()),
            latitude_ref: Some(latitude_ref.to_string()),
            longitude: Some(longitude.to_string()),
            longitude_ref: Some(longitude_ref.to_string()),
        }
    }
}

/// Turn GPS tags into a location reading.
///
/// The decimal pair wins when it has at least one non-zero component.
/// Otherwise the raw strings are parsed and both axes must come out non-zero.
pub fn extract_location(tags: &GpsTags) -> LocationReading {
    if let Some((latitude, longitude)) = tags.decimal {
        if latitude != 0.0 || longitude != 0.0 {
            debug!("GPS decimal pair: lat={latitude}, lon={longitude}");
            return LocationReading::Present(Coordinate::new(latitude, longitude));
        }
    }

    debug!("GPS_LATITUDE: {:?}", tags.latitude);
    debug!("GPS_LONGITUDE: {:?}", tags.longitude);
    debug!("GPS_LATITUDE_REF: {:?}", tags.latitude_ref);
    debug!("GPS_LONGITUDE_REF: {:?}", tags.longitude_ref);

    let (latitude, longitude) = match (tags.latitude.as_deref(), tags.longitude.as_deref()) {
        (Some(lat), Some(lon))
            if !lat.is_empty()
                && !lon.is_empty()
                && lat != ZEROED_PLACEHOLDER
                && lon != ZEROED_PLACEHOLDER =>
        {
            (lat, lon)
        }
        _ => {
            debug!("No usable GPS tags");
            return LocationReading::NotPresent;
        }
    };

    let latitude = parse_coordinate(latitude, tags.latitude_ref.as_deref().unwrap_or(""));
    let longitude = parse_coordinate(longitude, tags.longitude_ref.as_deref().unwrap_or(""));

    if latitude == 0.0 || longitude == 0.0 {
        warn!("GPS tags present but unusable: lat={latitude}, lon={longitude}");
        return LocationReading::Malformed;
    }

    debug!("GPS tags converted: lat={latitude}, lon={longitude}");
    LocationReading::Present(Coordinate::new(latitude, longitude))
}
