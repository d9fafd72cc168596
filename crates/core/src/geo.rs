//! Geographic coordinates and map viewports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A WGS-84 position in degrees.
///
/// Serialized as a `[lat, lon]` pair so catalog files read the same way
/// the coordinates are usually written.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check that both components are finite and within WGS-84 bounds.
    pub fn validate(&self) -> Result<(), ParseError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(ParseError::Latitude(self.lat));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(ParseError::Longitude(self.lon));
        }
        Ok(())
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lon]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

/// Parses `LAT,LON` (whitespace around either number is ignored).
impl FromStr for Coordinate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| ParseError::CoordinateFormat(s.to_string()))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| ParseError::CoordinateFormat(s.to_string()))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| ParseError::CoordinateFormat(s.to_string()))?;
        let coord = Coordinate::new(lat, lon);
        coord.validate()?;
        Ok(coord)
    }
}

/// Where the map should look: a center and a slippy-map zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: f64,
}

impl Viewport {
    pub const fn new(center: Coordinate, zoom: f64) -> Self {
        Self { center, zoom }
    }
}
