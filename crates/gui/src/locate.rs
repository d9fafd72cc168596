//! Position lookups in background threads.
//!
//! Each lookup runs in its own `std::thread` and reports back via
//! `crossbeam_channel`. Lookups cannot be cancelled once started.

use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::Sender;
use foodmap_core::LocationSource;
use tracing::{debug, warn};

use crate::state::{AppMessage, LocationOrigin, LogEntry};

/// Start a one-shot lookup. The result arrives as
/// [`AppMessage::LocationFound`] or [`AppMessage::LocationFailed`].
pub fn request_location(
    source: Arc<dyn LocationSource>,
    origin: LocationOrigin,
    tx: Sender<AppMessage>,
) {
    std::thread::spawn(move || {
        let _ = tx.send(AppMessage::Log(LogEntry::info(format!(
            "Locating via {}...",
            source.describe()
        ))));

        let start = Instant::now();
        let msg = match source.locate() {
            Ok(position) => {
                debug!(?origin, %position, elapsed = ?start.elapsed(), "location found");
                AppMessage::LocationFound { origin, position }
            }
            Err(error) => {
                warn!(?origin, %error, "location lookup failed");
                AppMessage::LocationFailed { origin, error }
            }
        };
        let _ = tx.send(msg);
    });
}
