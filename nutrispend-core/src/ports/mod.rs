//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. Services depend
//! only on these traits, not on concrete implementations.

mod clock;
mod expense_store;
mod extractor;
pub mod key_value;
mod notifier;

pub use clock::Clock;
pub use expense_store::ExpenseStore;
pub use extractor::ExpenseExtractor;
pub use key_value::{storage_keys, KeyValueStore};
pub use notifier::Notifier;
