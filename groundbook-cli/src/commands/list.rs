//! List command implementation.
//!
//! This module implements the `list` command, which displays bookings in
//! table, JSON, CSV or TSV form. Only confirmed bookings are shown unless
//! `--all` is given.

use crate::error::CliError;
use crate::utils::{
    choose_format, format_price, format_timestamp, load_configuration, open_store, print_rows,
    FormatArg, GlobalOptions, VenueNames,
};
use clap::Args;
use groundbook::{Booking, BookingAllocator, VenueRegistry};
use std::sync::Arc;

const HEADERS: &[&str] = &[
    "id", "venue", "date", "time", "hours", "total", "status", "customer", "phone", "email",
    "created",
];

/// List bookings.
#[derive(Args)]
pub struct ListCommand {
    /// Only show bookings for this venue
    #[arg(long, value_name = "VENUE_ID")]
    pub venue: Option<String>,

    /// Include cancelled bookings
    #[arg(long)]
    pub all: bool,

    /// Output format (defaults to the configured format)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;

        let names = VenueNames::load(&VenueRegistry::new(Arc::clone(&store)))?;
        let allocator = BookingAllocator::new(store, config.booking_rules()?);
        let venue_id = self.venue.as_deref();
        let bookings = if self.all {
            allocator.query_all(venue_id)?
        } else {
            allocator.query(venue_id)?
        };

        let format = choose_format(self.format, &config);
        let rows: Vec<Vec<String>> = bookings
            .iter()
            .map(|booking| booking_row(booking, names.name(booking.venue_id())))
            .collect();
        print_rows(format, HEADERS, &rows, &bookings)
    }
}

fn booking_row(booking: &Booking, venue_name: &str) -> Vec<String> {
    vec![
        booking.id().to_string(),
        venue_name.to_string(),
        booking.date().to_string(),
        booking.time_range(),
        booking.hours().to_string(),
        format_price(booking.total_price()),
        booking.status().to_string(),
        booking.customer_name().to_string(),
        booking.customer_phone().to_string(),
        booking.customer_email().to_string(),
        format_timestamp(booking.created_at()),
    ]
}
