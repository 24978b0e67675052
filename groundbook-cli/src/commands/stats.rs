//! Stats command implementation.
//!
//! Prints totals, per-venue summaries, the most popular hour ranges and
//! the weekday distribution of confirmed bookings.

use crate::error::CliError;
use crate::utils::{format_price, load_configuration, open_store, GlobalOptions};
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use groundbook::hours::format_hour;
use groundbook::reporting::Report;
use groundbook::Reporting;
use std::io::Write;

/// Output format for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatsFormat {
    /// Human-readable sections
    Table,
    /// JSON document
    Json,
}

/// Show booking statistics.
#[derive(Args)]
pub struct StatsCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: StatsFormat,

    /// Compute "today" figures for this date instead of the local date
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,
}

impl StatsCommand {
    /// Execute the stats command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;

        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let report = Reporting::new(store).report_at(today)?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        match self.format {
            StatsFormat::Table => write_report(&mut out, &report)?,
            StatsFormat::Json => {
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

fn write_report<W: Write>(out: &mut W, report: &Report) -> Result<(), CliError> {
    let overall = &report.overall;
    writeln!(out, "As of {}", report.today)?;
    writeln!(out, "venues:          {}", overall.total_venues)?;
    writeln!(out, "active venues:   {}", overall.active_venues)?;
    writeln!(out, "bookings:        {}", overall.total_bookings)?;
    writeln!(out, "today:           {}", overall.today_bookings)?;
    writeln!(out, "upcoming:        {}", report.upcoming)?;
    writeln!(out, "last 7 days:     {}", report.recent)?;
    writeln!(out, "hours booked:    {}", overall.total_hours)?;
    writeln!(out, "revenue:         {}", format_price(overall.total_revenue))?;
    writeln!(
        out,
        "average booking: {}",
        format_price(overall.average_booking_value)
    )?;

    if !report.venues.is_empty() {
        writeln!(out)?;
        writeln!(out, "VENUE\tBOOKINGS\tHOURS\tREVENUE")?;
        for venue in &report.venues {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                venue.venue_name,
                venue.bookings,
                venue.hours,
                format_price(venue.revenue)
            )?;
        }
    }

    if !report.popular_ranges.is_empty() {
        writeln!(out)?;
        writeln!(out, "POPULAR\tCOUNT")?;
        for range in &report.popular_ranges {
            writeln!(
                out,
                "{}-{}\t{}",
                format_hour(range.start),
                format_hour(range.end),
                range.count
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "WEEKDAY\tCOUNT")?;
    for day in &report.weekdays {
        writeln!(out, "{}\t{}", day.weekday, day.count)?;
    }
    Ok(())
}
