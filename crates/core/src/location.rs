//! Position sources: where "the user's current location" comes from.
//!
//! A desktop has no built-in geolocation, so the default source asks an
//! IP geolocation service. Sources are blocking and are expected to run
//! off the UI thread.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::{LocationError, ParseError};
use crate::geo::Coordinate;

/// Default IP geolocation endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://ipapi.co/json/";

/// Upper bound on a single lookup; a timeout counts as a failed lookup.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A one-shot "get current position" capability.
pub trait LocationSource: Send + Sync {
    /// Look up the current position. Blocks until done.
    fn locate(&self) -> Result<Coordinate, LocationError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Looks the position up from the machine's public IP address.
pub struct IpLocator {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl IpLocator {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, LocationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("foodmap/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl LocationSource for IpLocator {
    fn locate(&self) -> Result<Coordinate, LocationError> {
        debug!("GET {}", self.endpoint);
        let resp = self.client.get(&self.endpoint).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LocationError::Status(status.as_u16()));
        }
        let body = resp.text()?;
        decode_ip_response(&body)
    }

    fn describe(&self) -> String {
        format!("IP geolocation ({})", self.endpoint)
    }
}

/// First of `keys` present in `body` as a number.
///
/// Providers spell the fields differently (`latitude` or `lat`), and some
/// send both.
fn number_field(body: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| body.get(k).and_then(Value::as_f64))
}

fn text_field(body: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| body.get(k).and_then(Value::as_str))
        .map(str::to_string)
}

/// Extract a coordinate from a geolocation service's JSON body.
pub fn decode_ip_response(body: &str) -> Result<Coordinate, LocationError> {
    let body: Value = serde_json::from_str(body)
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;
    let reason = text_field(&body, &["reason", "message"]);

    if body.get("error").and_then(Value::as_bool).unwrap_or(false) {
        return Err(LocationError::InvalidResponse(
            reason.unwrap_or_else(|| "service reported an error".to_string()),
        ));
    }

    let lat = number_field(&body, &["latitude", "lat"]);
    let lon = number_field(&body, &["longitude", "lon"]);
    match (lat, lon) {
        (Some(lat), Some(lon)) => {
            let coord = Coordinate::new(lat, lon);
            coord
                .validate()
                .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;
            Ok(coord)
        }
        _ => Err(LocationError::InvalidResponse(
            reason.unwrap_or_else(|| "missing latitude/longitude".to_string()),
        )),
    }
}

/// Always reports the same position.
pub struct FixedLocation(pub Coordinate);

impl LocationSource for FixedLocation {
    fn locate(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }

    fn describe(&self) -> String {
        format!("fixed position ({})", self.0)
    }
}

/// The capability is absent; every lookup fails.
pub struct NoLocation;

impl LocationSource for NoLocation {
    fn locate(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unavailable)
    }

    fn describe(&self) -> String {
        "no location source".to_string()
    }
}

/// Which source to use, as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceKind {
    Ip,
    Off,
    Fixed(Coordinate),
}

impl SourceKind {
    /// Build the source. `endpoint` is only used by [`SourceKind::Ip`].
    pub fn build(self, endpoint: &str) -> crate::Result<Arc<dyn LocationSource>> {
        Ok(match self {
            Self::Ip => Arc::new(IpLocator::new(endpoint)?),
            Self::Off => Arc::new(NoLocation),
            Self::Fixed(coord) => Arc::new(FixedLocation(coord)),
        })
    }
}

impl Default for SourceKind {
    fn default() -> Self {
        Self::Ip
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip => write!(f, "ip"),
            Self::Off => write!(f, "off"),
            Self::Fixed(c) => write!(f, "{},{}", c.lat, c.lon),
        }
    }
}

/// Parses `ip`, `off` or `LAT,LON`.
impl FromStr for SourceKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ip" => Ok(Self::Ip),
            "off" | "none" => Ok(Self::Off),
            other if other.contains(',') => Ok(Self::Fixed(other.parse()?)),
            _ => Err(ParseError::LocationSource(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_ipapi_co_body() {
        let body = r#"{"ip":"1.2.3.4","city":"Pune","latitude":18.5196,"longitude":73.8553}"#;
        let c = decode_ip_response(body).unwrap();
        assert_eq!(c, Coordinate::new(18.5196, 73.8553));
    }

    #[test]
    fn decode_short_field_names() {
        let body = r#"{"status":"success","lat":51.5,"lon":-0.12}"#;
        assert_eq!(decode_ip_response(body).unwrap(), Coordinate::new(51.5, -0.12));
    }

    #[test]
    fn decode_body_with_both_spellings() {
        let body = r#"{"latitude":18.5196,"longitude":73.8553,"lat":18.52,"lon":73.86}"#;
        assert_eq!(decode_ip_response(body).unwrap(), Coordinate::new(18.5196, 73.8553));
    }

    #[test]
    fn decode_error_body() {
        let body = r#"{"error":true,"reason":"RateLimited"}"#;
        match decode_ip_response(body) {
            Err(LocationError::InvalidResponse(msg)) => assert_eq!(msg, "RateLimited"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn decode_missing_fields() {
        let body = r#"{"status":"fail","message":"private range"}"#;
        match decode_ip_response(body) {
            Err(LocationError::InvalidResponse(msg)) => assert_eq!(msg, "private range"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn decode_rejects_non_json_and_bad_ranges() {
        assert!(decode_ip_response("<html>").is_err());
        assert!(decode_ip_response(r#"{"lat":200.0,"lon":0.0}"#).is_err());
    }

    #[test]
    fn fixed_and_absent_sources() {
        let here = Coordinate::new(18.52, 73.85);
        assert_eq!(FixedLocation(here).locate().unwrap(), here);
        assert!(matches!(NoLocation.locate(), Err(LocationError::Unavailable)));
    }

    #[test]
    fn parse_source_kind() {
        assert_eq!("ip".parse::<SourceKind>().unwrap(), SourceKind::Ip);
        assert_eq!("OFF".parse::<SourceKind>().unwrap(), SourceKind::Off);
        assert_eq!(
            "18.5,73.8".parse::<SourceKind>().unwrap(),
            SourceKind::Fixed(Coordinate::new(18.5, 73.8))
        );
        assert_eq!(
            "gps".parse::<SourceKind>(),
            Err(ParseError::LocationSource("gps".into()))
        );
    }

    #[test]
    fn non_network_kinds_build() {
        assert!(SourceKind::Off.build(DEFAULT_ENDPOINT).unwrap().locate().is_err());
        let here = Coordinate::new(1.0, 2.0);
        assert_eq!(
            SourceKind::Fixed(here).build(DEFAULT_ENDPOINT).unwrap().locate().unwrap(),
            here
        );
    }
}
