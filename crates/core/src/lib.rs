//! # FoodMap Core
//!
//! UI-independent model of the FoodMap restaurant map.
//!
//! This crate provides:
//! - `Catalog` / `RestaurantRecord`: the restaurants on the map
//! - `Query` / `FilterCache`: category + text filtering, memoized
//! - `Session`: transient UI state (filter, search, user location, focus)
//! - `LocateControl` / `MapController`: map-scoped control logic
//! - `LocationSource`: pluggable one-shot position lookups
//! - `MapConfig`: zoom levels, fallback position, marker icons
//! - `load_catalog`: built-in or file-backed catalog

use std::path::Path;

pub mod catalog;
pub mod config;
pub mod control;
pub mod error;
pub mod filter;
pub mod geo;
pub mod location;
pub mod session;

pub use catalog::{Catalog, Category, RestaurantRecord};
pub use config::{MapConfig, MarkerIcon};
pub use control::{LocateControl, LocateOutcome, LocateState, MapController};
pub use error::{CatalogError, Error, LocationError, ParseError, Result};
pub use filter::{CategoryFilter, FilterCache, Query};
pub use geo::{Coordinate, Viewport};
pub use location::{LocationSource, SourceKind};
pub use session::{Focus, Session};

/// The catalog stored at `path`, or the built-in one when no path is given.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Ok(Catalog::load(path)?),
        None => Ok(Catalog::builtin()),
    }
}
