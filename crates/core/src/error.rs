//! Error types for FoodMap

use thiserror::Error;

/// Failure to obtain the user's position.
///
/// Every variant is handled the same way by the UI (fallback on startup,
/// alert on an explicit retry); the distinction only shows up in logs.
#[derive(Error, Debug)]
pub enum LocationError {
    #[error("location capability unavailable")]
    Unavailable,

    #[error("location request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geolocation service returned HTTP {0}")]
    Status(u16),

    #[error("invalid geolocation response: {0}")]
    InvalidResponse(String),
}

/// Failure to load an external catalog file.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {index} ({title}): {reason}")]
    InvalidRecord {
        index: usize,
        title: String,
        reason: String,
    },
}

/// Failure to parse a user-supplied value (CLI flags).
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("expected LAT,LON, got '{0}'")]
    CoordinateFormat(String),

    #[error("latitude {0} out of range [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} out of range [-180, 180]")]
    Longitude(f64),

    #[error("unknown location source '{0}' (expected ip, off or LAT,LON)")]
    LocationSource(String),
}

/// Main error type for FoodMap operations
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type alias for FoodMap operations
pub type Result<T> = std::result::Result<T, Error>;
