//! Utility functions for CLI operations.
//!
//! Configuration loading, store opening and the small formatting helpers
//! shared by the commands.

use crate::error::CliError;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use groundbook::config::{OutputFormat, StorageConfig};
use groundbook::store::{self, RecordStore, StoreBackend};
use groundbook::{Config, ConfigBuilder, Venue, VenueRegistry};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the store lock wait (in seconds).
    pub busy_timeout: Option<u64>,

    /// Override the store backend.
    pub store: Option<StoreBackend>,
}

/// Output format accepted by listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl From<OutputFormat> for FormatArg {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => Self::Table,
            OutputFormat::Json => Self::Json,
            OutputFormat::Csv => Self::Csv,
            OutputFormat::Tsv => Self::Tsv,
        }
    }
}

/// Picks the explicit `--format` or falls back to the configured one.
pub fn choose_format(explicit: Option<FormatArg>, config: &Config) -> FormatArg {
    explicit.unwrap_or_else(|| config.output_format().into())
}

/// Resolve the data directory: `--data-dir`, then `GROUNDBOOK_DATA_DIR`,
/// then `~/.groundbook`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => store::resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load layered configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. `<data-dir>/config.yaml`
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    let overrides = Config {
        storage: global.store.map(|backend| StorageConfig {
            backend: Some(backend),
            path: None,
        }),
        maximum_lock_wait_seconds: global.busy_timeout,
        ..Config::default()
    };

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .with_config(overrides)
        .build()
        .map_err(CliError::from)
}

/// Open the configured record store.
///
/// The in-memory backend is refused: nothing would outlive the command.
pub fn open_store(
    global: &GlobalOptions,
    config: &Config,
) -> Result<Arc<dyn RecordStore>, CliError> {
    let data_dir = resolve_data_dir(global)?;
    let store_config = config.store_config(&data_dir);
    check_persistent_backend(global, store_config.backend)?;
    log::debug!(
        "Opening {} store in {}",
        store_config.backend,
        store_config.data_dir.display()
    );
    store::open_store(&store_config).map_err(CliError::from)
}

fn check_persistent_backend(global: &GlobalOptions, backend: StoreBackend) -> Result<(), CliError> {
    if backend != StoreBackend::Memory {
        return Ok(());
    }
    let message = "the memory backend keeps nothing between commands; use sqlite or json";
    if global.store == Some(StoreBackend::Memory) {
        Err(CliError::InvalidArguments(format!("--store memory: {message}")))
    } else {
        Err(CliError::Config(format!("storage.backend memory: {message}")))
    }
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format an amount of money with two decimals.
pub fn format_price(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Resolves venue names for display, falling back for deleted venues.
pub struct VenueNames {
    venues: Vec<Venue>,
}

impl VenueNames {
    /// Loads every venue from `registry`.
    pub fn load(registry: &VenueRegistry) -> Result<Self, CliError> {
        Ok(Self {
            venues: registry.list()?,
        })
    }

    /// The name of `venue_id`, or the unknown-venue label.
    pub fn name(&self, venue_id: &str) -> &str {
        self.venues
            .iter()
            .find(|venue| venue.id() == venue_id)
            .map_or(groundbook::reporting::UNKNOWN_VENUE, Venue::name)
    }
}

/// Writes rows as a header plus tab-separated lines with an uppercase header.
pub fn write_table<W: Write>(
    out: &mut W,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<(), CliError> {
    let header_line = headers
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(out, "{header_line}")?;
    for row in rows {
        writeln!(out, "{}", row.join("\t"))?;
    }
    Ok(())
}

/// Writes rows as CSV or TSV with a header line.
pub fn write_delimited<W: Write>(
    out: W,
    delimiter: u8,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `rows` to stdout in `format`, or `json` for the JSON format.
pub fn print_rows<T: serde::Serialize>(
    format: FormatArg,
    headers: &[&str],
    rows: &[Vec<String>],
    json: &T,
) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match format {
        FormatArg::Table => write_table(&mut handle, headers, rows),
        FormatArg::Csv => write_delimited(handle, b',', headers, rows),
        FormatArg::Tsv => write_delimited(handle, b'\t', headers, rows),
        FormatArg::Json => {
            serde_json::to_writer_pretty(&mut handle, json)?;
            writeln!(handle)?;
            Ok(())
        }
    }
}

/// Rejects ranges the library would reject anyway, with a CLI message.
pub fn check_hour_range(start: u8, end: u8) -> Result<(), CliError> {
    if start >= end || end > groundbook::hours::DAY_END {
        return Err(CliError::InvalidArguments(format!(
            "invalid hour range {start}-{end}: need start < end <= 24"
        )));
    }
    Ok(())
}
