//! Expense domain model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use super::result::Error;

/// Fixed set of food spending categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Drink,
    Snack,
    Grocery,
    #[serde(rename = "Dining Out")]
    DiningOut,
    Other,
}

impl ExpenseCategory {
    /// All categories in display order
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Food,
        ExpenseCategory::Drink,
        ExpenseCategory::Snack,
        ExpenseCategory::Grocery,
        ExpenseCategory::DiningOut,
        ExpenseCategory::Other,
    ];

    /// Display label, also the persisted form
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Drink => "Drink",
            ExpenseCategory::Snack => "Snack",
            ExpenseCategory::Grocery => "Grocery",
            ExpenseCategory::DiningOut => "Dining Out",
            ExpenseCategory::Other => "Other",
        }
    }

    /// Palette colour as (r, g, b)
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            ExpenseCategory::Food => (0x10, 0xb9, 0x81),      // emerald
            ExpenseCategory::Drink => (0x3b, 0x82, 0xf6),     // blue
            ExpenseCategory::Snack => (0xf5, 0x9e, 0x0b),     // amber
            ExpenseCategory::Grocery => (0x8b, 0x5c, 0xf6),   // violet
            ExpenseCategory::DiningOut => (0xef, 0x44, 0x44), // red
            ExpenseCategory::Other => (0x9c, 0xa3, 0xaf),     // gray
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = Error;

    /// Accepts labels case-insensitively, plus `dining-out` / `dining_out` / `diningout`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();

        match normalized.as_str() {
            "food" => Ok(ExpenseCategory::Food),
            "drink" => Ok(ExpenseCategory::Drink),
            "snack" => Ok(ExpenseCategory::Snack),
            "grocery" => Ok(ExpenseCategory::Grocery),
            "diningout" => Ok(ExpenseCategory::DiningOut),
            "other" => Ok(ExpenseCategory::Other),
            _ => Err(Error::validation(format!("Unknown category: {}", s))),
        }
    }
}

/// A logged food purchase
///
/// `id` and `created_at` are assigned by the store on insert; everything
/// else is set by the caller and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_id"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub description: String,
    #[serde(
        serialize_with = "serialize_amount",
        deserialize_with = "deserialize_amount"
    )]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
}

impl Expense {
    /// Build a persisted record from a new expense and storage-assigned fields
    pub fn from_new(new: NewExpense, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Some(id),
            created_at: Some(created_at),
            description: new.description,
            amount: new.amount,
            date: new.date,
            category: new.category,
        }
    }

    /// True if the expense falls on the given calendar day
    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.date == day
    }
}

/// An expense that has not been persisted yet
///
/// Input of `ExpenseStore::add` and output of natural-language extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub description: String,
    #[serde(
        serialize_with = "serialize_amount",
        deserialize_with = "deserialize_amount"
    )]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
}

impl NewExpense {
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
        category: ExpenseCategory,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            date,
            category,
        }
    }
}

/// Amounts go over the wire as plain JSON numbers
fn serialize_amount<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::Error;
    let value = amount
        .to_f64()
        .ok_or_else(|| S::Error::custom(format!("amount out of range: {}", amount)))?;
    serializer.serialize_f64(value)
}

/// Deserialize amount that can be number or string
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    let text = match value {
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s,
        _ => return Err(D::Error::custom("expected number or string for amount")),
    };
    text.trim()
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(text.trim()))
        .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e)))
}

/// Deserialize optional ID that can be number or string
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_category_labels_round_trip_through_from_str() {
        for category in ExpenseCategory::ALL {
            assert_eq!(category.label().parse::<ExpenseCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_parsing_variants() {
        assert_eq!("dining-out".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::DiningOut);
        assert_eq!("DINING_OUT".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::DiningOut);
        assert_eq!(" grocery ".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Grocery);
        assert!("pizza".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn test_expense_wire_format() {
        let expense = Expense {
            id: Some("abc".to_string()),
            created_at: None,
            description: "Lunch at Cafe".to_string(),
            amount: Decimal::new(1550, 2),
            date: date(2025, 3, 14),
            category: ExpenseCategory::DiningOut,
        };

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["amount"], 15.5);
        assert_eq!(json["date"], "2025-03-14");
        assert_eq!(json["category"], "Dining Out");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_expense_accepts_numeric_id_and_string_amount() {
        let json = r#"{
            "id": 42,
            "created_at": "2025-03-14T08:30:00.123456+00:00",
            "description": "Coffee",
            "amount": "3.20",
            "date": "2025-03-14",
            "category": "Drink"
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.id.as_deref(), Some("42"));
        assert_eq!(expense.amount, Decimal::new(320, 2));
        assert!(expense.created_at.is_some());
        assert_eq!(expense.category, ExpenseCategory::Drink);
    }

    #[test]
    fn test_expense_without_id_or_timestamp() {
        let json = r#"{"description":"Groceries","amount":45.2,"date":"2025-03-13","category":"Grocery"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert!(expense.id.is_none());
        assert!(expense.created_at.is_none());
        assert_eq!(expense.amount, Decimal::new(452, 1));
    }

    #[test]
    fn test_from_new_assigns_storage_fields() {
        let new = NewExpense::new("Bagel", Decimal::new(250, 2), date(2025, 1, 2), ExpenseCategory::Snack);
        let now = Utc::now();
        let expense = Expense::from_new(new, "id-1".to_string(), now);

        assert_eq!(expense.id.as_deref(), Some("id-1"));
        assert_eq!(expense.created_at, Some(now));
        assert!(expense.is_on(date(2025, 1, 2)));
        assert!(!expense.is_on(date(2025, 1, 3)));
    }
}
