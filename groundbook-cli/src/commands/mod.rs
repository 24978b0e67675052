//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `add_venue`: Register a new venue
//! - `update_venue`: Change fields of an existing venue
//! - `remove_venue`: Remove a venue
//! - `show_venue`: Show a single venue
//! - `list_venues`: List registered venues
//! - `slots`: Show hourly availability for a date
//! - `check`: Check whether an hour range is free
//! - `book`: Book an hour range
//! - `cancel`: Cancel a booking
//! - `list`: List bookings
//! - `stats`: Show booking statistics
//! - `show_data_dir`: Show resolved data directory path
//! - `completions`: Generate shell completion scripts

pub mod add_venue;
pub mod book;
pub mod cancel;
pub mod check;
pub mod completions;
pub mod list;
pub mod list_venues;
pub mod remove_venue;
pub mod show_data_dir;
pub mod show_venue;
pub mod slots;
pub mod stats;
pub mod update_venue;

pub use add_venue::AddVenueCommand;
pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use list::ListCommand;
pub use list_venues::ListVenuesCommand;
pub use remove_venue::RemoveVenueCommand;
pub use show_data_dir::ShowDataDirCommand;
pub use show_venue::ShowVenueCommand;
pub use slots::SlotsCommand;
pub use stats::StatsCommand;
pub use update_venue::UpdateVenueCommand;
