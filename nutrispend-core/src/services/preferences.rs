//! Preference service - typed access to reminder and theme settings
//!
//! Every value is a plain string under one key of the key-value store.
//! Reads are lenient: malformed values fall back to defaults.

use std::sync::Arc;

use tracing::warn;

use crate::domain::result::Result;
use crate::domain::{ReminderPreferences, ReminderTime, Theme};
use crate::ports::{storage_keys, KeyValueStore};

pub struct PreferenceService {
    kv: Arc<dyn KeyValueStore>,
}

impl PreferenceService {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the reminder state as of now
    pub async fn load_reminder_preferences(&self) -> Result<ReminderPreferences> {
        // Only the exact string "true" enables reminders
        let enabled = self.kv.get(storage_keys::REMINDER_ENABLED).await?.as_deref() == Some("true");

        let reminder_time = match self.kv.get(storage_keys::REMINDER_TIME).await? {
            Some(raw) => raw.parse::<ReminderTime>().unwrap_or_else(|e| {
                warn!("Ignoring stored reminder time: {}", e);
                ReminderTime::default()
            }),
            None => ReminderTime::default(),
        };

        let last_reminded_date = self.kv.get(storage_keys::LAST_REMINDED_DATE).await?;

        Ok(ReminderPreferences {
            enabled,
            reminder_time,
            last_reminded_date,
        })
    }

    pub async fn set_reminder_enabled(&self, enabled: bool) -> Result<()> {
        let value = if enabled { "true" } else { "false" };
        self.kv.set(storage_keys::REMINDER_ENABLED, value).await
    }

    pub async fn set_reminder_time(&self, time: ReminderTime) -> Result<()> {
        self.kv
            .set(storage_keys::REMINDER_TIME, &time.to_string())
            .await
    }

    /// Record that the reminder decision for `day_key` has been made
    pub async fn record_decision(&self, day_key: &str) -> Result<()> {
        self.kv.set(storage_keys::LAST_REMINDED_DATE, day_key).await
    }

    pub async fn theme(&self) -> Result<Theme> {
        match self.kv.get(storage_keys::THEME).await? {
            Some(raw) => Ok(raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored theme: {}", e);
                Theme::default()
            })),
            None => Ok(Theme::default()),
        }
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<()> {
        self.kv.set(storage_keys::THEME, theme.as_str()).await
    }
}
