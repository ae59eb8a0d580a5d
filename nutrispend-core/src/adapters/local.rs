//! Local expense backend
//!
//! The whole collection lives as one JSON array under a single key of the
//! key-value store. Every write is read-modify-write of that array, so
//! concurrent writers are not coordinated: the last write wins.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::adapters::demo::generate_demo_expenses;
use crate::domain::result::Result;
use crate::domain::{Expense, NewExpense};
use crate::ports::{storage_keys, Clock, ExpenseStore, KeyValueStore};

/// Sort newest date first, keeping stored order within a day
pub(crate) fn sort_by_date_desc(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
}

pub struct LocalExpenseStore {
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl LocalExpenseStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { kv, clock }
    }

    /// Stored collection in stored order; `None` if nothing was ever written
    async fn load(&self) -> Result<Option<Vec<Expense>>> {
        match self.kv.get(storage_keys::EXPENSES).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, expenses: &[Expense]) -> Result<()> {
        let raw = serde_json::to_string(expenses)?;
        self.kv.set(storage_keys::EXPENSES, &raw).await
    }
}

#[async_trait]
impl ExpenseStore for LocalExpenseStore {
    fn name(&self) -> &str {
        "local"
    }

    async fn list(&self) -> Result<Vec<Expense>> {
        let mut expenses = match self.load().await? {
            Some(expenses) => expenses,
            None => {
                let demo = generate_demo_expenses(self.clock.today());
                self.save(&demo).await?;
                info!("Seeded local store with {} demo expenses", demo.len());
                demo
            }
        };

        sort_by_date_desc(&mut expenses);
        Ok(expenses)
    }

    async fn add(&self, expense: NewExpense) -> Result<Expense> {
        let current = self.load().await?.unwrap_or_default();

        let created = Expense::from_new(expense, Uuid::new_v4().to_string(), Utc::now());

        let mut updated = Vec::with_capacity(current.len() + 1);
        updated.push(created.clone());
        updated.extend(current);
        self.save(&updated).await?;

        debug!(id = ?created.id, "Added local expense");
        Ok(created)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let Some(current) = self.load().await? else {
            return Ok(());
        };

        let before = current.len();
        let updated: Vec<Expense> = current
            .into_iter()
            .filter(|e| e.id.as_deref() != Some(id))
            .collect();
        self.save(&updated).await?;

        debug!(id, removed = before - updated.len(), "Deleted local expense");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::InMemoryKeyValueStore;
    use crate::domain::ExpenseCategory;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    fn store_with(kv: Arc<InMemoryKeyValueStore>) -> LocalExpenseStore {
        let clock = Arc::new(FixedClock::new(today().and_hms_opt(12, 0, 0).unwrap()));
        LocalExpenseStore::new(kv, clock)
    }

    fn new_expense(description: &str, date: NaiveDate) -> NewExpense {
        NewExpense::new(description, Decimal::new(500, 2), date, ExpenseCategory::Snack)
    }

    #[tokio::test]
    async fn test_first_list_seeds_demo_data() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let store = store_with(kv.clone());

        let expenses = store.list().await.unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].description, "Lunch at Cafe");
        assert_eq!(expenses[0].date, today());

        // Seed is persisted, and a second list doesn't seed again
        assert!(kv.get(storage_keys::EXPENSES).await.unwrap().is_some());
        store.delete("1").await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_stored_collection_is_not_reseeded() {
        let kv = Arc::new(InMemoryKeyValueStore::with_entries([(storage_keys::EXPENSES, "[]")]));
        let store = store_with(kv);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_prepends() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let store = store_with(kv.clone());

        let first = store.add(new_expense("Apple", today())).await.unwrap();
        let second = store.add(new_expense("Pear", today())).await.unwrap();

        assert!(first.id.as_deref().is_some_and(|id| !id.is_empty()));
        assert!(first.created_at.is_some());
        assert_ne!(first.id, second.id);

        // Add on a never-listed store doesn't seed demo data
        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].description, "Pear");
        assert_eq!(listed[1].description, "Apple");
    }

    #[tokio::test]
    async fn test_list_sorts_by_date_desc() {
        let kv = Arc::new(InMemoryKeyValueStore::with_entries([(storage_keys::EXPENSES, "[]")]));
        let store = store_with(kv);

        let old = today() - chrono::Duration::days(10);
        store.add(new_expense("today", today())).await.unwrap();
        // Inserted last, so stored first, but dated earlier
        store.add(new_expense("backdated", old)).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].description, "today");
        assert_eq!(listed[1].description, "backdated");
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let store = store_with(kv);

        let before = store.list().await.unwrap();
        store.delete("does-not-exist").await.unwrap();
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_before_anything_stored() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let store = store_with(kv.clone());

        store.delete("1").await.unwrap();
        assert!(kv.get(storage_keys::EXPENSES).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_an_error() {
        let kv = Arc::new(InMemoryKeyValueStore::with_entries([(storage_keys::EXPENSES, "{oops")]));
        let store = store_with(kv);
        assert!(matches!(
            store.list().await,
            Err(crate::domain::result::Error::Json(_))
        ));
    }
}
