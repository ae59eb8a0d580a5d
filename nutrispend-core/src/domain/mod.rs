//! Core domain entities
//!
//! Pure data structures with validation logic - no I/O or external dependencies.

mod expense;
pub mod reminder;
pub mod result;
mod theme;

pub use expense::{Expense, ExpenseCategory, NewExpense};
pub use reminder::{Notification, NotificationPermission, ReminderPreferences, ReminderTime};
pub use theme::Theme;
