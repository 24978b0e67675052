//! Add-venue command implementation.
//!
//! Registers a venue and prints its generated identifier (shell-friendly)
//! to stdout.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use groundbook::venue::DEFAULT_PRICE_PER_HOUR;
use groundbook::{VenueConfig, VenueRegistry, VenueType};

/// Register a new venue.
#[derive(Args)]
pub struct AddVenueCommand {
    /// Display name of the venue
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Name of the venue owner
    #[arg(long, value_name = "OWNER")]
    pub owner: String,

    /// Venue category (cricket, padel, football, tennis, basketball, badminton, other)
    #[arg(long = "type", value_name = "TYPE", default_value = "other")]
    pub venue_type: VenueType,

    /// Free-form description
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Opening hour (0-23)
    #[arg(long, value_name = "HOUR", default_value_t = 9)]
    pub open: u8,

    /// Closing hour (1-23)
    #[arg(long, value_name = "HOUR", default_value_t = 22)]
    pub close: u8,

    /// Price per hour
    #[arg(long, value_name = "AMOUNT", default_value_t = DEFAULT_PRICE_PER_HOUR)]
    pub price: f64,
}

impl AddVenueCommand {
    /// Execute the add-venue command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;

        let venue = VenueRegistry::new(store).create(
            VenueConfig::new(self.name, self.owner)
                .venue_type(self.venue_type)
                .description(self.description)
                .hours(self.open, self.close)
                .price_per_hour(self.price),
        )?;

        if !global.quiet {
            eprintln!(
                "Registered {} ({}, {}, {:.2}/h)",
                venue.name(),
                venue.venue_type().label(),
                venue.operating_hours(),
                venue.price_per_hour()
            );
        }
        println!("{}", venue.id());
        Ok(())
    }
}
