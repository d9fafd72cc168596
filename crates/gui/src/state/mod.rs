pub mod messages;

pub use messages::{AppMessage, LocationOrigin, LogEntry, LogLevel};
