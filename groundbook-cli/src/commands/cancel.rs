//! Cancel command implementation.
//!
//! Cancelling is idempotent: cancelling an already cancelled booking
//! succeeds with a warning.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use groundbook::{CancelPlan, PlanExecutor};

/// Cancel a booking.
#[derive(Args)]
pub struct CancelCommand {
    /// Booking identifier
    #[arg(value_name = "BOOKING_ID")]
    pub booking_id: String,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;

        let plan = CancelPlan::new(&self.booking_id).build_plan(store.as_ref())?;

        let mut executor = PlanExecutor::new(store.as_ref());
        if self.dry_run {
            executor = executor.dry_run();
            if !global.quiet {
                eprintln!("Dry run - would perform the following actions:");
                for (i, action) in plan.actions.iter().enumerate() {
                    eprintln!("  {}. {}", i + 1, action.description());
                }
            }
        }

        let result = executor.execute(&plan)?;

        if !global.quiet {
            for warning in &result.warnings {
                eprintln!("Warning: {warning}");
            }
            if !result.dry_run && !result.actions_taken.is_empty() {
                eprintln!("Cancelled booking {}", self.booking_id);
            }
        }
        Ok(())
    }
}
