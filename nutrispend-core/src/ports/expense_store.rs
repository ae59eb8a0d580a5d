//! Expense persistence port
//!
//! One contract, two interchangeable backends (remote record store and local
//! key-value store). The backend is chosen once at startup and injected.

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{Expense, NewExpense};

/// Create/list/delete over the expense collection
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Backend name for status output (e.g. "remote", "local")
    fn name(&self) -> &str;

    /// All expenses, most recent date first
    async fn list(&self) -> Result<Vec<Expense>>;

    /// Persist a new expense; the returned record carries its id and creation time
    async fn add(&self, expense: NewExpense) -> Result<Expense>;

    /// Remove the expense with this id. Unknown ids are a no-op.
    async fn delete(&self, id: &str) -> Result<()>;
}
