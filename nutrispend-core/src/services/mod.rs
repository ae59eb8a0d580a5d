//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod expense;
mod extraction;
mod preferences;
pub mod reminder;
mod scheduler;
mod status;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_support;

pub use expense::ExpenseService;
pub use extraction::SmartAddService;
pub use preferences::PreferenceService;
pub use reminder::{evaluate, ReminderAction, ReminderEvaluation, ReminderOutcome, ReminderService};
pub use scheduler::ReminderScheduler;
pub use status::{DateRange, ReminderStatus, StatusService, StatusSummary};
pub use summary::{CategoryTotal, DailyTotal, SpendSummary, SummaryService};
