//! Check command implementation.
//!
//! Exits 0 when every hour of the range is free and 1 when it is not, so
//! the command can be used in scripts.

use crate::error::CliError;
use crate::utils::{check_hour_range, load_configuration, open_store, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use groundbook::hours::format_hour;
use groundbook::{SlotEngine, VenueRegistry};
use std::sync::Arc;

/// Check whether an hour range is free.
#[derive(Args)]
pub struct CheckCommand {
    /// Venue identifier
    #[arg(value_name = "VENUE_ID")]
    pub venue_id: String,

    /// Date to check (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: NaiveDate,

    /// First hour of the range
    #[arg(long, value_name = "HOUR")]
    pub start: u8,

    /// Hour the range ends at (exclusive)
    #[arg(long, value_name = "HOUR")]
    pub end: u8,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        check_hour_range(self.start, self.end)?;

        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;

        let venue = VenueRegistry::new(Arc::clone(&store)).get(&self.venue_id)?;
        let free = SlotEngine::new(store).is_range_available(
            venue.id(),
            self.date,
            self.start,
            self.end,
        )?;

        let range = format!("{}-{}", format_hour(self.start), format_hour(self.end));
        if free {
            println!("available");
            Ok(())
        } else {
            println!("unavailable");
            Err(CliError::SemanticFailure(format!(
                "{range} on {} at {} is not available",
                self.date,
                venue.name()
            )))
        }
    }
}
