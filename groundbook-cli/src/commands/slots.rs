//! Slots command implementation.
//!
//! Prints one line per operating hour of a venue on a date, marking which
//! hours are booked, followed by a summary of the free blocks.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, write_table, GlobalOptions};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use groundbook::hours::format_hour;
use groundbook::slots::free_blocks;
use groundbook::{Slot, SlotEngine, VenueRegistry};
use std::io::Write;
use std::sync::Arc;

/// Output format for availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SlotsFormat {
    /// One line per hour
    Table,
    /// JSON object with slots and free blocks
    Json,
}

/// Show hourly availability of a venue on a date.
#[derive(Args)]
pub struct SlotsCommand {
    /// Venue identifier
    #[arg(value_name = "VENUE_ID")]
    pub venue_id: String,

    /// Date to inspect (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: NaiveDate,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: SlotsFormat,
}

impl SlotsCommand {
    /// Execute the slots command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;

        // An unknown venue has no slots; report it instead of an empty day.
        let venue = VenueRegistry::new(Arc::clone(&store)).get(&self.venue_id)?;
        let slots = SlotEngine::new(store).availability(venue.id(), self.date)?;
        let blocks = free_blocks(&slots);

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        match self.format {
            SlotsFormat::Table => {
                write_table(&mut out, &["hour", "status", "booking"], &slot_rows(&slots))?;
                if !global.quiet {
                    eprintln!(
                        "{} on {}: {}",
                        venue.name(),
                        self.date,
                        describe_blocks(&blocks)
                    );
                }
            }
            SlotsFormat::Json => {
                let free: Vec<serde_json::Value> = blocks
                    .iter()
                    .map(|&(start, end)| serde_json::json!({ "start": start, "end": end }))
                    .collect();
                let body = serde_json::json!({
                    "venueId": venue.id(),
                    "date": self.date,
                    "slots": slots,
                    "freeBlocks": free,
                });
                serde_json::to_writer_pretty(&mut out, &body)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

fn slot_rows(slots: &[Slot]) -> Vec<Vec<String>> {
    slots
        .iter()
        .map(|slot| {
            vec![
                format_hour(slot.hour),
                if slot.available { "free" } else { "booked" }.to_string(),
                slot.booking_id.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

fn describe_blocks(blocks: &[(u8, u8)]) -> String {
    if blocks.is_empty() {
        return "fully booked".to_string();
    }
    let ranges: Vec<String> = blocks
        .iter()
        .map(|&(start, end)| format!("{}-{}", format_hour(start), format_hour(end)))
        .collect();
    format!("free {}", ranges.join(", "))
}
