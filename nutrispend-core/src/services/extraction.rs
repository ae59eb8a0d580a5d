//! Smart add - natural-language text to persisted expenses
//!
//! Two steps so the host can show proposals before anything is written:
//! `propose` runs extraction, `commit` adds the accepted proposals in order.

use std::sync::Arc;

use tracing::debug;

use crate::domain::result::{Error, Result};
use crate::domain::{Expense, NewExpense};
use crate::ports::{Clock, ExpenseExtractor};
use crate::services::ExpenseService;

pub struct SmartAddService {
    extractor: Arc<dyn ExpenseExtractor>,
    expenses: Arc<ExpenseService>,
    clock: Arc<dyn Clock>,
}

impl SmartAddService {
    pub fn new(
        extractor: Arc<dyn ExpenseExtractor>,
        expenses: Arc<ExpenseService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            extractor,
            expenses,
            clock,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.extractor.is_configured()
    }

    /// Extract proposals from free text; an empty result is not an error
    pub async fn propose(&self, text: &str) -> Result<Vec<NewExpense>> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::validation("Nothing to extract: text is empty"));
        }
        let proposals = self.extractor.extract(text, self.clock.today()).await?;
        debug!(count = proposals.len(), "Smart add proposals");
        Ok(proposals)
    }

    /// Persist accepted proposals; the first failure stops the batch
    pub async fn commit(&self, proposals: Vec<NewExpense>) -> Result<Vec<Expense>> {
        self.expenses.add_many(proposals).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::local::LocalExpenseStore;
    use crate::adapters::memory::InMemoryKeyValueStore;
    use crate::domain::ExpenseCategory;
    use crate::ports::storage_keys;

    /// Extractor that returns a canned answer and remembers the date it was given
    struct CannedExtractor {
        reply: Vec<NewExpense>,
        seen_today: Mutex<Option<NaiveDate>>,
    }

    #[async_trait]
    impl ExpenseExtractor for CannedExtractor {
        fn is_configured(&self) -> bool {
            true
        }

        async fn extract(&self, _text: &str, today: NaiveDate) -> Result<Vec<NewExpense>> {
            *self.seen_today.lock().unwrap() = Some(today);
            Ok(self.reply.clone())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
    }

    fn setup(reply: Vec<NewExpense>) -> (SmartAddService, Arc<CannedExtractor>, Arc<ExpenseService>) {
        let clock = Arc::new(FixedClock::new(today().and_hms_opt(13, 0, 0).unwrap()));
        let kv = Arc::new(InMemoryKeyValueStore::with_entries([(storage_keys::EXPENSES, "[]")]));
        let expenses = Arc::new(ExpenseService::new(Arc::new(LocalExpenseStore::new(
            kv,
            clock.clone(),
        ))));
        let extractor = Arc::new(CannedExtractor {
            reply,
            seen_today: Mutex::new(None),
        });
        let service = SmartAddService::new(extractor.clone(), expenses.clone(), clock);
        (service, extractor, expenses)
    }

    #[tokio::test]
    async fn test_propose_passes_today_and_writes_nothing() {
        let proposal = NewExpense::new("Tacos", Decimal::new(1200, 2), today(), ExpenseCategory::DiningOut);
        let (service, extractor, expenses) = setup(vec![proposal.clone()]);

        let proposals = service.propose("tacos for 12").await.unwrap();
        assert_eq!(proposals, vec![proposal]);
        assert_eq!(*extractor.seen_today.lock().unwrap(), Some(today()));
        assert!(expenses.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_commit_adds_each_proposal() {
        let proposals = vec![
            NewExpense::new("Milk", Decimal::new(199, 2), today(), ExpenseCategory::Grocery),
            NewExpense::new("Juice", Decimal::new(350, 2), today(), ExpenseCategory::Drink),
        ];
        let (service, _, expenses) = setup(proposals.clone());

        let created = service.commit(proposals).await.unwrap();
        assert_eq!(created.len(), 2);
        assert!(created.iter().all(|e| e.id.is_some()));
        assert_eq!(expenses.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_text_rejected() {
        let (service, extractor, _) = setup(Vec::new());
        assert!(matches!(service.propose("   ").await, Err(Error::Validation(_))));
        assert_eq!(*extractor.seen_today.lock().unwrap(), None);
    }

    #[tokio::test]
    async fn test_nothing_recognized_is_empty_not_error() {
        let (service, _, _) = setup(Vec::new());
        assert!(service.propose("hello there").await.unwrap().is_empty());
    }
}
