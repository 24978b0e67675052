//! Book command implementation.
//!
//! This module implements the `book` command, which validates a booking
//! request and commits it if every requested hour is free. The booking
//! identifier is printed to stdout.

use crate::error::CliError;
use crate::utils::{check_hour_range, format_price, load_configuration, open_store, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use groundbook::{BookOptions, BookPlan, BookingAllocator, BookingRequest, PlanExecutor};

/// Book an hour range at a venue.
#[derive(Args)]
pub struct BookCommand {
    /// Venue identifier
    #[arg(value_name = "VENUE_ID")]
    pub venue_id: String,

    /// Date to book (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: NaiveDate,

    /// First hour of the booking
    #[arg(long, value_name = "HOUR")]
    pub start: u8,

    /// Hour the booking ends at (exclusive)
    #[arg(long, value_name = "HOUR")]
    pub end: u8,

    /// Customer name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Customer phone number
    #[arg(long, value_name = "PHONE")]
    pub phone: String,

    /// Customer email address
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// Validate and check availability without booking
    #[arg(long)]
    pub dry_run: bool,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        check_hour_range(self.start, self.end)?;

        let config = load_configuration(global)?;
        let rules = config.booking_rules()?;
        let store = open_store(global, &config)?;

        let request = BookingRequest {
            customer_name: self.name,
            customer_phone: self.phone,
            customer_email: self.email,
            date: self.date,
            start_time: self.start,
            end_time: self.end,
        };

        if self.dry_run {
            let plan = BookPlan::new(BookOptions::new(&self.venue_id, request), &rules)
                .build_plan(store.as_ref())?;
            let result = PlanExecutor::new(store.as_ref()).dry_run().execute(&plan)?;

            if !global.quiet {
                eprintln!("Dry run - would perform the following actions:");
                for (i, action) in plan.actions.iter().enumerate() {
                    eprintln!("  {}. {}", i + 1, action.description());
                }
                if !result.warnings.is_empty() {
                    eprintln!("Warnings:");
                    for warning in &result.warnings {
                        eprintln!("  - {warning}");
                    }
                }
            }
            return Ok(());
        }

        let booking = BookingAllocator::new(store, rules).create(request, &self.venue_id)?;

        if !global.quiet {
            eprintln!(
                "Booked {} on {} ({} h, total {})",
                booking.time_range(),
                booking.date(),
                booking.hours(),
                format_price(booking.total_price())
            );
        }
        println!("{}", booking.id());
        Ok(())
    }
}
