//! CLI command implementations

pub mod add;
pub mod delete;
pub mod list;
pub mod reminder;
pub mod smart_add;
pub mod status;
pub mod summary;
pub mod theme;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use nutrispend_core::NutriSpendContext;

use crate::notifier::TerminalNotifier;

/// Get the data directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("NUTRISPEND_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".nutrispend"))
        .ok_or_else(|| anyhow!("Could not find home directory; set NUTRISPEND_DIR"))
}

/// Build the context for this run
pub fn get_context() -> Result<NutriSpendContext> {
    let data_dir = get_data_dir()?;
    NutriSpendContext::new(&data_dir, Arc::new(TerminalNotifier))
        .context("Failed to initialize NutriSpend")
}
