//! Map-scoped controls: the "show my location" button and the focus
//! controller that turns sidebar selections into map moves.

use crate::geo::{Coordinate, Viewport};
use crate::session::Focus;

/// Visual state of the location button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocateState {
    #[default]
    Idle,
    Locating,
}

/// What the map view has to do after a location result arrives.
#[derive(Debug, Clone, PartialEq)]
pub enum LocateOutcome {
    /// Recenter on the new position and record it as the user's location.
    Recenter {
        viewport: Viewport,
        user_location: Coordinate,
    },
    /// Tell the user the lookup failed.
    Alert(&'static str),
}

/// The on-map "show my location" button.
///
/// `Idle -> Locating` on press, `* -> Idle` on any result. Pressing again
/// while a lookup is running issues another lookup; there is no way to
/// cancel one.
#[derive(Debug, Default)]
pub struct LocateControl {
    state: LocateState,
    in_flight: u32,
}

impl LocateControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LocateState {
        self.state
    }

    /// Number of lookups issued by this control that have not reported back.
    pub fn in_flight(&self) -> u32 {
        self.in_flight
    }

    /// Button pressed. The caller issues the lookup.
    pub fn press(&mut self) {
        self.state = LocateState::Locating;
        self.in_flight += 1;
    }

    /// A lookup succeeded.
    pub fn found(&mut self, position: Coordinate, zoom: f64) -> LocateOutcome {
        self.settle();
        LocateOutcome::Recenter {
            viewport: Viewport::new(position, zoom),
            user_location: position,
        }
    }

    /// A lookup failed.
    pub fn failed(&mut self) -> LocateOutcome {
        self.settle();
        LocateOutcome::Alert(crate::config::LOCATION_ALERT)
    }

    fn settle(&mut self) {
        self.state = LocateState::Idle;
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}

/// Applies focus changes to the map.
///
/// The sidebar never moves the map itself; it records a [`Focus`] in the
/// session and this controller, which lives with the map view, picks it up.
#[derive(Debug)]
pub struct MapController {
    zoom: f64,
    applied: Option<u64>,
}

impl MapController {
    pub fn new(zoom: f64) -> Self {
        Self {
            zoom,
            applied: None,
        }
    }

    /// Returns the viewport to move to if `focus` has not been applied yet.
    pub fn observe(&mut self, focus: Option<Focus>) -> Option<Viewport> {
        let focus = focus?;
        if self.applied == Some(focus.seq) {
            return None;
        }
        self.applied = Some(focus.seq);
        Some(Viewport::new(focus.target, self.zoom))
    }
}
