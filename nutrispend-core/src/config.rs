//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "remote": { "url": "https://xyz.supabase.co", "anonKey": "...", "schema": "expenses", "table": "expenses" },
//!   "extraction": { "apiKey": "...", "model": "gemini-2.5-flash" },
//!   "reminder": { "checkIntervalSecs": 60 }
//! }
//! ```
//! Environment variables override the file. Unknown fields are ignored; the
//! file is only ever edited by hand.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_SCHEMA: &str = "expenses";
pub const DEFAULT_TABLE: &str = "expenses";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;

/// Remote record store connection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSettings {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub anon_key: String,
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            schema: default_schema(),
            table: default_table(),
        }
    }
}

impl RemoteSettings {
    /// Both the endpoint and the access key are present
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

/// Natural-language extraction client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            check_interval_secs: DEFAULT_CHECK_INTERVAL_SECS,
        }
    }
}

fn default_schema() -> String {
    DEFAULT_SCHEMA.to_string()
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_check_interval() -> u64 {
    DEFAULT_CHECK_INTERVAL_SECS
}

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    remote: RemoteSettings,
    #[serde(default)]
    extraction: ExtractionSettings,
    #[serde(default)]
    reminder: ReminderSettings,
}

/// NutriSpend configuration (settings file plus environment overrides)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub remote: RemoteSettings,
    pub extraction: ExtractionSettings,
    pub reminder: ReminderSettings,
}

impl Config {
    /// Load config from the data directory
    ///
    /// A missing file yields defaults. A malformed file is an error rather
    /// than silently ignored, since it would quietly flip the backend.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;
        let mut config = Self {
            remote: raw.remote,
            extraction: raw.extraction,
            reminder: raw.reminder,
        };
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Apply environment overrides through a lookup function
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = var("NUTRISPEND_SUPABASE_URL") {
            self.remote.url = url;
        }
        if let Some(key) = var("NUTRISPEND_SUPABASE_ANON_KEY") {
            self.remote.anon_key = key;
        }
        if let Some(key) = var("NUTRISPEND_GEMINI_API_KEY").or_else(|| var("GEMINI_API_KEY")) {
            self.extraction.api_key = key;
        }
        if let Some(secs) = var("NUTRISPEND_CHECK_INTERVAL_SECS").and_then(|v| v.trim().parse().ok()) {
            self.reminder.check_interval_secs = secs;
        }
    }

    /// Interval between scheduled reminder checks (never zero)
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.reminder.check_interval_secs.max(1))
    }
}

fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SETTINGS_FILE)
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let path = settings_path(data_dir);
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid settings in {}", path.display()))
}

/// Which expense backend is in effect for this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Remote(RemoteSettings),
    Local,
}

impl Backend {
    /// Remote iff both the endpoint URL and access key are configured
    pub fn select(config: &Config) -> Self {
        if config.remote.is_configured() {
            Backend::Remote(config.remote.clone())
        } else {
            Backend::Local
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Backend::Remote(_))
    }

    /// Human-readable label for status output
    pub fn label(&self) -> &'static str {
        match self {
            Backend::Remote(_) => "remote",
            Backend::Local => "local (demo mode)",
        }
    }
}
