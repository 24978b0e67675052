//! Booking operations with planning and execution phases.
//!
//! Planning validates a request against the current store state and
//! describes the change; execution applies it. Splitting the two lets
//! callers preview a change (dry run) and keeps every write in one place.

pub mod book;
pub mod cancel;
pub mod executor;
pub mod plan;

pub use book::{BookOptions, BookPlan};
pub use cancel::CancelPlan;
pub use executor::{ExecutionResult, PlanExecutor};
pub use plan::{OperationPlan, PlanAction};
