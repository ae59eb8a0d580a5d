//! Summary service - rolling 30-day spend aggregation

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::{Expense, ExpenseCategory};
use crate::ports::{Clock, ExpenseStore};

/// Days covered by the summary, today included
pub const SUMMARY_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: Decimal,
    pub count: usize,
    /// Percentage of the window total, 0-100
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total: Decimal,
    pub expense_count: usize,
    /// Categories with spend in the window, largest first
    pub by_category: Vec<CategoryTotal>,
    /// One entry per day of the window, oldest first
    pub daily: Vec<DailyTotal>,
    /// Every record the backend returned, regardless of date
    pub all_time_total: Decimal,
}

/// Aggregate the window ending on `today`
pub fn summarize(expenses: &[Expense], today: NaiveDate) -> SpendSummary {
    let start = today - Duration::days(SUMMARY_WINDOW_DAYS - 1);
    let in_window: Vec<&Expense> = expenses
        .iter()
        .filter(|e| e.date >= start && e.date <= today)
        .collect();

    let total: Decimal = in_window.iter().map(|e| e.amount).sum();

    let mut categories: BTreeMap<ExpenseCategory, (Decimal, usize)> = BTreeMap::new();
    let mut days: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for expense in &in_window {
        let entry = categories.entry(expense.category).or_insert((Decimal::ZERO, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
        *days.entry(expense.date).or_insert(Decimal::ZERO) += expense.amount;
    }

    let mut by_category: Vec<CategoryTotal> = categories
        .into_iter()
        .map(|(category, (sum, count))| CategoryTotal {
            category,
            total: sum,
            count,
            share: share_of(sum, total),
        })
        .collect();
    // Stable on ties, so equal totals keep category order
    by_category.sort_by(|a, b| b.total.cmp(&a.total));

    let daily = (0..SUMMARY_WINDOW_DAYS)
        .map(|offset| {
            let date = start + Duration::days(offset);
            DailyTotal {
                date,
                total: days.get(&date).copied().unwrap_or(Decimal::ZERO),
            }
        })
        .collect();

    SpendSummary {
        start,
        end: today,
        total,
        expense_count: in_window.len(),
        by_category,
        daily,
        all_time_total: expenses.iter().map(|e| e.amount).sum(),
    }
}

fn share_of(part: Decimal, whole: Decimal) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    (part * Decimal::ONE_HUNDRED / whole).to_f64().unwrap_or(0.0)
}

pub struct SummaryService {
    store: Arc<dyn ExpenseStore>,
    clock: Arc<dyn Clock>,
}

impl SummaryService {
    pub fn new(store: Arc<dyn ExpenseStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn summarize(&self) -> Result<SpendSummary> {
        let expenses = self.store.list().await?;
        Ok(summarize(&expenses, self.clock.today()))
    }
}
