//! Expense service - list, add and delete through the active backend

use std::sync::Arc;

use tracing::info;

use crate::domain::result::Result;
use crate::domain::{Expense, NewExpense};
use crate::ports::ExpenseStore;

pub struct ExpenseService {
    store: Arc<dyn ExpenseStore>,
}

impl ExpenseService {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    /// Name of the backend in effect
    pub fn backend_name(&self) -> &str {
        self.store.name()
    }

    pub async fn list(&self) -> Result<Vec<Expense>> {
        self.store.list().await
    }

    pub async fn add(&self, expense: NewExpense) -> Result<Expense> {
        let created = self.store.add(expense).await?;
        info!(id = ?created.id, backend = self.store.name(), "Expense added");
        Ok(created)
    }

    /// Add proposals one at a time, in order
    ///
    /// Stops at the first failure; records added before it stay added.
    pub async fn add_many(&self, expenses: Vec<NewExpense>) -> Result<Vec<Expense>> {
        let mut created = Vec::with_capacity(expenses.len());
        for expense in expenses {
            created.push(self.add(expense).await?);
        }
        Ok(created)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(id).await?;
        info!(id, backend = self.store.name(), "Expense deleted");
        Ok(())
    }
}
