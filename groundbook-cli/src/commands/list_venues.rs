//! List-venues command implementation.

use crate::error::CliError;
use crate::utils::{
    choose_format, format_price, load_configuration, open_store, print_rows, FormatArg,
    GlobalOptions,
};
use clap::Args;
use groundbook::{Venue, VenueRegistry};

const HEADERS: &[&str] = &["id", "name", "owner", "type", "hours", "price_per_hour"];

/// List registered venues.
#[derive(Args)]
pub struct ListVenuesCommand {
    /// Output format (defaults to the configured format)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
}

impl ListVenuesCommand {
    /// Execute the list-venues command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;
        let venues = VenueRegistry::new(store).list()?;

        let format = choose_format(self.format, &config);
        let rows: Vec<Vec<String>> = venues.iter().map(venue_row).collect();
        print_rows(format, HEADERS, &rows, &venues)
    }
}

fn venue_row(venue: &Venue) -> Vec<String> {
    vec![
        venue.id().to_string(),
        venue.name().to_string(),
        venue.owner_name().to_string(),
        venue.venue_type().as_str().to_string(),
        venue.operating_hours().to_string(),
        format_price(venue.price_per_hour()),
    ]
}
