//! Show-venue command implementation.

use crate::error::CliError;
use crate::utils::{format_price, format_timestamp, load_configuration, open_store, GlobalOptions};
use clap::{Args, ValueEnum};
use groundbook::{Venue, VenueRegistry};
use std::io::Write;

/// Output format for a single venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VenueFormat {
    /// Key/value lines
    Table,
    /// JSON object
    Json,
}

/// Show a single venue.
#[derive(Args)]
pub struct ShowVenueCommand {
    /// Venue identifier
    #[arg(value_name = "VENUE_ID")]
    pub venue_id: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: VenueFormat,
}

impl ShowVenueCommand {
    /// Execute the show-venue command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;
        let venue = VenueRegistry::new(store).get(&self.venue_id)?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        match self.format {
            VenueFormat::Table => write_venue(&mut out, &venue)?,
            VenueFormat::Json => {
                serde_json::to_writer_pretty(&mut out, &venue)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

fn write_venue<W: Write>(out: &mut W, venue: &Venue) -> Result<(), CliError> {
    writeln!(out, "id:          {}", venue.id())?;
    writeln!(out, "name:        {}", venue.name())?;
    writeln!(out, "owner:       {}", venue.owner_name())?;
    writeln!(out, "type:        {}", venue.venue_type().label())?;
    writeln!(out, "hours:       {}", venue.operating_hours())?;
    writeln!(out, "price/hour:  {}", format_price(venue.price_per_hour()))?;
    if let Some(description) = venue.description() {
        writeln!(out, "description: {description}")?;
    }
    writeln!(out, "created:     {}", format_timestamp(venue.created_at()))?;
    Ok(())
}
