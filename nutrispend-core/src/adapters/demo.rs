//! Demo data for the local backend
//!
//! Seeded into the local collection the first time it is listed, so a fresh
//! install has something to show on the dashboard.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::domain::{Expense, ExpenseCategory};

/// The two fixed demo expenses: lunch today, groceries yesterday
pub fn generate_demo_expenses(today: NaiveDate) -> Vec<Expense> {
    vec![
        Expense {
            id: Some("1".to_string()),
            created_at: None,
            description: "Lunch at Cafe".to_string(),
            amount: Decimal::new(1550, 2), // 15.50
            date: today,
            category: ExpenseCategory::DiningOut,
        },
        Expense {
            id: Some("2".to_string()),
            created_at: None,
            description: "Groceries".to_string(),
            amount: Decimal::new(4520, 2), // 45.20
            date: today - Duration::days(1),
            category: ExpenseCategory::Grocery,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_expenses() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let expenses = generate_demo_expenses(today);

        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].date, today);
        // Crosses the month boundary
        assert_eq!(expenses[1].date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert!(expenses.iter().all(|e| e.id.is_some()));
    }
}
