//! Theme command - show or set the theme preference

use anyhow::Result;
use nutrispend_core::Theme;

use super::get_context;
use crate::output;

pub async fn run(theme: Option<String>) -> Result<()> {
    let ctx = get_context()?;

    match theme {
        Some(value) => {
            let theme: Theme = value.parse()?;
            ctx.preference_service.set_theme(theme).await?;
            output::success(&format!("Theme set to {}", theme));
        }
        None => {
            let theme = ctx.preference_service.theme().await?;
            println!("Theme: {}", theme);
        }
    }

    Ok(())
}
