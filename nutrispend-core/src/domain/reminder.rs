//! Reminder preference model and notification payloads

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::result::Error;

/// Key format for the decision date (`YYYY-MM-DD`)
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Static icon shown with every notification
pub const NOTIFICATION_ICON: &str = "https://picsum.photos/192/192";
/// Static badge shown with every notification
pub const NOTIFICATION_BADGE: &str = "https://picsum.photos/96/96";
/// Tag shared by daily reminders so platforms can collapse them
pub const DAILY_REMINDER_TAG: &str = "daily-reminder";

/// Canonical string key for a calendar day
pub fn date_key(day: NaiveDate) -> String {
    day.format(DATE_KEY_FORMAT).to_string()
}

/// Time of day for the daily reminder, minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReminderTime {
    hour: u32,
    minute: u32,
}

impl ReminderTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, Error> {
        if hour > 23 || minute > 59 {
            return Err(Error::validation(format!(
                "Invalid reminder time {:02}:{:02}",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        // hour/minute are range-checked at construction
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }

    /// The reminder deadline on a given day (seconds are zero)
    pub fn deadline_on(&self, day: NaiveDate) -> NaiveDateTime {
        day.and_time(self.as_naive_time())
    }
}

impl Default for ReminderTime {
    fn default() -> Self {
        Self { hour: 20, minute: 0 }
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ReminderTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::validation(format!("Invalid reminder time '{}', expected HH:MM", s));

        let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u32 = hours.parse().map_err(|_| invalid())?;
        let minute: u32 = minutes.parse().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }
}

impl Serialize for ReminderTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReminderTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Persisted reminder state, as read at the start of each evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderPreferences {
    pub enabled: bool,
    pub reminder_time: ReminderTime,
    /// Raw stored decision date; only equality with today's key matters
    pub last_reminded_date: Option<String>,
}

impl ReminderPreferences {
    /// True if the decision for `day` has already been recorded
    pub fn decided_on(&self, day: NaiveDate) -> bool {
        self.last_reminded_date.as_deref() == Some(date_key(day).as_str())
    }
}

/// A local notification to show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Notification {
    /// The nudge sent when nothing was logged by the reminder deadline
    pub fn daily_reminder() -> Self {
        Self {
            title: "Log your meals!".to_string(),
            body: "You haven't tracked any food expenses today yet.".to_string(),
            icon: NOTIFICATION_ICON.to_string(),
            badge: Some(NOTIFICATION_BADGE.to_string()),
            tag: Some(DAILY_REMINDER_TAG.to_string()),
        }
    }

    /// Confirmation sent once notification permission is granted
    pub fn reminders_enabled(time: ReminderTime) -> Self {
        Self {
            title: "Reminders Enabled".to_string(),
            body: format!(
                "You'll be reminded daily at {} if you haven't logged any meals.",
                time
            ),
            icon: NOTIFICATION_ICON.to_string(),
            badge: None,
            tag: None,
        }
    }
}

/// Outcome of asking the platform for notification permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    Granted,
    Denied,
    /// The user dismissed the prompt without choosing
    Default,
}
