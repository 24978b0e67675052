//! Remove-venue command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use groundbook::{BookingAllocator, VenueRegistry};
use std::sync::Arc;

/// Remove a venue.
///
/// Bookings made at the venue are kept and reported under an
/// "Unknown venue" label afterwards.
#[derive(Args)]
pub struct RemoveVenueCommand {
    /// Venue identifier
    #[arg(value_name = "VENUE_ID")]
    pub venue_id: String,
}

impl RemoveVenueCommand {
    /// Execute the remove-venue command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;

        let venue = VenueRegistry::new(Arc::clone(&store)).delete(&self.venue_id)?;

        if !global.quiet {
            let remaining = BookingAllocator::new(store, config.booking_rules()?)
                .query(Some(venue.id()))?
                .len();
            eprintln!("Removed {}", venue.name());
            if remaining > 0 {
                eprintln!(
                    "Warning: {remaining} confirmed booking(s) still reference this venue"
                );
            }
        }
        Ok(())
    }
}
