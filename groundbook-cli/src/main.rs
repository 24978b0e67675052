//! Main entry point for the groundbook CLI.
//!
//! This is the command-line interface for the groundbook venue booking
//! manager. It provides commands for:
//! - managing venues (`add-venue`, `update-venue`, `remove-venue`, ...)
//! - inspecting availability (`slots`, `check`)
//! - booking and cancelling (`book`, `cancel`, `list`)
//! - reporting (`stats`)

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    groundbook::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        store: cli.store,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::AddVenue(cmd) => cmd.execute(&global),
        cli::Command::UpdateVenue(cmd) => cmd.execute(&global),
        cli::Command::RemoveVenue(cmd) => cmd.execute(&global),
        cli::Command::ShowVenue(cmd) => cmd.execute(&global),
        cli::Command::ListVenues(cmd) => cmd.execute(&global),
        cli::Command::Slots(cmd) => cmd.execute(&global),
        cli::Command::Check(cmd) => cmd.execute(&global),
        cli::Command::Book(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Stats(cmd) => cmd.execute(&global),
        cli::Command::ShowDataDir(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
