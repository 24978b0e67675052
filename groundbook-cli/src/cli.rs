//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddVenueCommand, BookCommand, CancelCommand, CheckCommand, CompletionsCommand, ListCommand,
    ListVenuesCommand, RemoveVenueCommand, ShowDataDirCommand, ShowVenueCommand, SlotsCommand,
    StatsCommand, UpdateVenueCommand,
};
use clap::{Parser, Subcommand};
use groundbook::store::StoreBackend;
use std::path::PathBuf;

/// Command-line tool for managing venue bookings.
#[derive(Parser)]
#[command(name = "groundbook")]
#[command(version, about = "Manage sports venues and hourly bookings", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "GROUNDBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the store lock wait (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "GROUNDBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Record store backend (sqlite, json)
    #[arg(long, value_name = "BACKEND", global = true)]
    pub store: Option<StoreBackend>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Register a new venue
    AddVenue(AddVenueCommand),

    /// Change fields of an existing venue
    UpdateVenue(UpdateVenueCommand),

    /// Remove a venue (its bookings are kept)
    RemoveVenue(RemoveVenueCommand),

    /// Show a single venue
    ShowVenue(ShowVenueCommand),

    /// List registered venues
    ListVenues(ListVenuesCommand),

    /// Show hourly availability of a venue on a date
    Slots(SlotsCommand),

    /// Check whether an hour range is free
    Check(CheckCommand),

    /// Book an hour range at a venue
    Book(BookCommand),

    /// Cancel a booking
    Cancel(CancelCommand),

    /// List bookings
    List(ListCommand),

    /// Show booking statistics
    Stats(StatsCommand),

    /// Show the resolved data directory path
    ShowDataDir(ShowDataDirCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
