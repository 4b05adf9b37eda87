//! Core types for photo location.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A decimal-degree coordinate.
///
/// `(0.0, 0.0)` doubles as the "no location" sentinel. A photo taken exactly at
/// the equator/prime-meridian intersection is therefore indistinguishable from
/// one without GPS data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, negative south of the equator.
    pub latitude: f64,
    /// Longitude in degrees, negative west of Greenwich.
    pub longitude: f64,
}

impl Coordinate {
    /// The absent-location sentinel.
    pub const ABSENT: Coordinate = Coordinate {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both components are exactly zero.
    pub fn is_absent(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_absent() {
            write!(f, "No GPS location")
        } else {
            write!(f, "Lat: {:.6}, Lon: {:.6}", self.latitude, self.longitude)
        }
    }
}

/// Outcome of reading a photo's GPS tags.
///
/// Callers that only care about "has a location or not" should treat anything
/// other than [`LocationReading::Present`] as no location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum LocationReading {
    /// A usable coordinate.
    Present(Coordinate),
    /// No GPS tags, or the zeroed placeholder some devices write.
    NotPresent,
    /// Tags exist but did not yield a non-zero coordinate on both axes.
    Malformed,
}

impl LocationReading {
    pub fn is_present(&self) -> bool {
        matches!(self, LocationReading::Present(_))
    }

    /// The coordinate, if present.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            LocationReading::Present(c) => Some(*c),
            _ => None,
        }
    }

    /// Collapse to the sentinel representation.
    pub fn into_coordinate(self) -> Coordinate {
        self.coordinate().unwrap_or(Coordinate::ABSENT)
    }
}

/// GPS hemisphere reference letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parse an EXIF reference letter. Only the exact strings `N`, `S`, `E`
    /// and `W` match.
    pub fn from_ref(value: &str) -> Option<Self> {
        match value {
            "N" => Some(Hemisphere::North),
            "S" => Some(Hemisphere::South),
            "E" => Some(Hemisphere::East),
            "W" => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// Multiplier applied to a magnitude in this hemisphere.
    pub fn sign(self) -> f64 {
        match self {
            Hemisphere::South | Hemisphere::West => -1.0,
            Hemisphere::North | Hemisphere::East => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_sentinel() {
        assert!(Coordinate::ABSENT.is_absent());
        assert!(Coordinate::default().is_absent());
        assert!(!Coordinate::new(51.5, 0.0).is_absent());
        assert!(!Coordinate::new(0.0, -0.1167).is_absent());
    }

    #[test]
    fn test_coordinate_display() {
        assert_eq!(Coordinate::ABSENT.to_string(), "No GPS location");
        assert_eq!(
            Coordinate::new(51.5, -0.1167).to_string(),
            "Lat: 51.500000, Lon: -0.116700"
        );
    }

    #[test]
    fn test_reading_collapses_to_sentinel() {
        assert_eq!(LocationReading::NotPresent.into_coordinate(), Coordinate::ABSENT);
        assert_eq!(LocationReading::Malformed.into_coordinate(), Coordinate::ABSENT);

        let c = Coordinate::new(40.4461, -79.9822);
        let reading = LocationReading::Present(c);
        assert!(reading.is_present());
        assert_eq!(reading.into_coordinate(), c);
    }

    #[test]
    fn test_hemisphere_from_ref() {
        assert_eq!(Hemisphere::from_ref("N"), Some(Hemisphere::North));
        assert_eq!(Hemisphere::from_ref("S"), Some(Hemisphere::South));
        assert_eq!(Hemisphere::from_ref("E"), Some(Hemisphere::East));
        assert_eq!(Hemisphere::from_ref("W"), Some(Hemisphere::West));
        assert_eq!(Hemisphere::from_ref("s"), None);
        assert_eq!(Hemisphere::from_ref(""), None);
        assert_eq!(Hemisphere::from_ref(" S"), None);
        assert_eq!(Hemisphere::from_ref("S "), None);
    }

    #[test]
    fn test_hemisphere_sign() {
        assert_eq!(Hemisphere::North.sign(), 1.0);
        assert_eq!(Hemisphere::East.sign(), 1.0);
        assert_eq!(Hemisphere::South.sign(), -1.0);
        assert_eq!(Hemisphere::West.sign(), -1.0);
    }

    #[test]
    fn test_reading_serializes_with_status_tag() {
        let json = serde_json::to_string(&LocationReading::NotPresent).unwrap();
        assert_eq!(json, r#"{"status":"notPresent"}"#);
    }
}
