//! Update-venue command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use groundbook::{VenuePatch, VenueRegistry, VenueType};

/// Change fields of an existing venue.
///
/// Only the given fields change. Existing bookings keep the price they
/// were made at.
#[derive(Args)]
pub struct UpdateVenueCommand {
    /// Venue identifier
    #[arg(value_name = "VENUE_ID")]
    pub venue_id: String,

    /// New display name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// New owner name
    #[arg(long, value_name = "OWNER")]
    pub owner: Option<String>,

    /// New venue category
    #[arg(long = "type", value_name = "TYPE")]
    pub venue_type: Option<VenueType>,

    /// New description (empty string clears it)
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// New opening hour
    #[arg(long, value_name = "HOUR")]
    pub open: Option<u8>,

    /// New closing hour
    #[arg(long, value_name = "HOUR")]
    pub close: Option<u8>,

    /// New price per hour
    #[arg(long, value_name = "AMOUNT")]
    pub price: Option<f64>,
}

impl UpdateVenueCommand {
    /// Execute the update-venue command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let patch = VenuePatch {
            name: self.name,
            owner_name: self.owner,
            venue_type: self.venue_type,
            description: self.description,
            start_hour: self.open,
            end_hour: self.close,
            price_per_hour: self.price,
        };
        if patch.is_empty() {
            return Err(CliError::InvalidArguments(
                "Nothing to update: pass at least one field option".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;
        let venue = VenueRegistry::new(store).update(&self.venue_id, &patch)?;

        if !global.quiet {
            eprintln!(
                "Updated {} ({}, {:.2}/h)",
                venue.name(),
                venue.operating_hours(),
                venue.price_per_hour()
            );
        }
        Ok(())
    }
}
