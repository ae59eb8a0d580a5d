//! Natural-language expense extraction port

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::result::Result;
use crate::domain::NewExpense;

#[async_trait]
pub trait ExpenseExtractor: Send + Sync {
    /// Whether the extractor has the configuration it needs (e.g. an API key)
    fn is_configured(&self) -> bool;

    /// Turn free text into expense proposals
    ///
    /// `today` is the date to assume when the text doesn't name one.
    /// An empty vector means nothing was recognized and is not an error.
    async fn extract(&self, text: &str, today: NaiveDate) -> Result<Vec<NewExpense>>;
}
