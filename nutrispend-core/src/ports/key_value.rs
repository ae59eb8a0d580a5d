//! String-keyed scalar store port
//!
//! Holds reminder preferences, the theme, and (for the local backend) the
//! whole expense collection as one JSON document.

use async_trait::async_trait;

use crate::domain::result::Result;

/// Keys persisted in the key-value store
pub mod storage_keys {
    pub const REMINDER_ENABLED: &str = "nutrispend_reminder_enabled";
    pub const REMINDER_TIME: &str = "nutrispend_reminder_time";
    pub const LAST_REMINDED_DATE: &str = "nutrispend_last_reminded";
    pub const EXPENSES: &str = "nutrispend_expenses";
    pub const THEME: &str = "nutrispend_theme";
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` if the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
