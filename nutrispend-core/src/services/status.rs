//! Status service - backend, record count and reminder state at a glance

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::Backend;
use crate::domain::result::Result;
use crate::domain::Theme;
use crate::ports::ExpenseExtractor;
use crate::services::{ExpenseService, PreferenceService};

pub struct StatusService {
    backend: Backend,
    expenses: Arc<ExpenseService>,
    preferences: Arc<PreferenceService>,
    extractor: Arc<dyn ExpenseExtractor>,
}

impl StatusService {
    pub fn new(
        backend: Backend,
        expenses: Arc<ExpenseService>,
        preferences: Arc<PreferenceService>,
        extractor: Arc<dyn ExpenseExtractor>,
    ) -> Self {
        Self {
            backend,
            expenses,
            preferences,
            extractor,
        }
    }

    /// Get overall status summary
    pub async fn get_status(&self) -> Result<StatusSummary> {
        let expenses = self.expenses.list().await?;
        let reminder = self.preferences.load_reminder_preferences().await?;
        let theme = self.preferences.theme().await?;

        Ok(StatusSummary {
            backend: self.backend.label().to_string(),
            demo_mode: !self.backend.is_remote(),
            total_expenses: expenses.len(),
            date_range: DateRange {
                earliest: expenses.iter().map(|e| e.date).min(),
                latest: expenses.iter().map(|e| e.date).max(),
            },
            reminders: ReminderStatus {
                enabled: reminder.enabled,
                time: reminder.reminder_time.to_string(),
                last_reminded_date: reminder.last_reminded_date,
            },
            theme,
            extraction_configured: self.extractor.is_configured(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub backend: String,
    pub demo_mode: bool,
    pub total_expenses: usize,
    pub date_range: DateRange,
    pub reminders: ReminderStatus,
    pub theme: Theme,
    pub extraction_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct DateRange {
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ReminderStatus {
    pub enabled: bool,
    pub time: String,
    pub last_reminded_date: Option<String>,
}
