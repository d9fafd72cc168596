//! Per-window UI state: filter, search text, user location and focus.

use tracing::{info, warn};

use crate::error::LocationError;
use crate::filter::{CategoryFilter, Query};
use crate::geo::{Coordinate, Viewport};

/// A request to center the map on a coordinate.
///
/// `seq` increases with every request, so selecting the same restaurant
/// twice still moves the map back to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Focus {
    pub target: Coordinate,
    pub seq: u64,
}

/// Transient state owned by the application window.
#[derive(Debug, Default)]
pub struct Session {
    pub query: Query,
    user_location: Option<Coordinate>,
    focus: Option<Focus>,
    next_seq: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> CategoryFilter {
        self.query.category
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.query.category = category;
    }

    pub fn search(&self) -> &str {
        &self.query.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn user_location(&self) -> Option<Coordinate> {
        self.user_location
    }

    /// True until the user location has been resolved once.
    pub fn is_loading(&self) -> bool {
        self.user_location.is_none()
    }

    /// Apply the result of the startup lookup.
    ///
    /// A failure resolves to `fallback`. If a position is already known (a
    /// manual lookup finished first) it is kept, being the more recent one.
    pub fn resolve_initial(
        &mut self,
        result: Result<Coordinate, LocationError>,
        fallback: Coordinate,
    ) -> Coordinate {
        let position = match result {
            Ok(position) => {
                info!("initial location: {}", position);
                position
            }
            Err(e) => {
                warn!("initial location lookup failed ({}), using {}", e, fallback);
                fallback
            }
        };
        *self.user_location.get_or_insert(position)
    }

    /// Record a freshly obtained user location.
    pub fn set_user_location(&mut self, position: Coordinate) {
        self.user_location = Some(position);
    }

    /// Ask the map to center on `target`.
    pub fn focus_on(&mut self, target: Coordinate) {
        self.next_seq += 1;
        self.focus = Some(Focus {
            target,
            seq: self.next_seq,
        });
    }

    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    /// The first view of the map, once the user location is known.
    pub fn initial_viewport(&self, zoom: f64) -> Option<Viewport> {
        self.user_location.map(|center| Viewport::new(center, zoom))
    }
}
