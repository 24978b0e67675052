//! Plan types for booking operations.
//!
//! A plan describes what an operation will change without changing it, so
//! it can be shown to the user (dry run) before being executed.

use crate::booking::Booking;

/// A single change to apply when the plan is executed.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanAction {
    /// Commit a new confirmed booking, re-checking availability first.
    CreateBooking(Booking),

    /// Flip a confirmed booking to cancelled.
    CancelBooking {
        /// The booking to cancel.
        booking_id: String,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateBooking(b) => format!(
                "Book {} on {} {} for {} ({} h, {:.2})",
                b.venue_id(),
                b.date(),
                b.time_range(),
                b.customer_name(),
                b.hours(),
                b.total_price()
            ),
            Self::CancelBooking { booking_id } => format!("Cancel booking {booking_id}"),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates an empty plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use groundbook::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Cancel booking abc");
    /// assert_eq!(plan.description, "Cancel booking abc");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use groundbook::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Test").add_warning("already cancelled");
    /// assert_eq!(plan.warnings.len(), 1);
    /// ```
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
