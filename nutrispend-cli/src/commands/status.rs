//! Status command - backend, data and reminder overview

use anyhow::Result;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::get_context;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let status = ctx.status_service.get_status().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "NutriSpend Status".bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let reminders = if status.reminders.enabled {
        format!("on at {}", status.reminders.time)
    } else {
        "off".to_string()
    };
    let extraction = if status.extraction_configured {
        "configured"
    } else {
        "not configured"
    };

    table.add_row(vec!["Backend", status.backend.as_str()]);
    table.add_row(vec!["Expenses", &status.total_expenses.to_string()]);
    table.add_row(vec!["Reminders", &reminders]);
    table.add_row(vec!["Theme", status.theme.as_str()]);
    table.add_row(vec!["Smart add", extraction]);

    println!("{}", table);
    println!();

    if let (Some(earliest), Some(latest)) = (&status.date_range.earliest, &status.date_range.latest) {
        println!("Date range: {} to {}", earliest, latest);
    }
    if let Some(last) = &status.reminders.last_reminded_date {
        println!("Last reminder decision: {}", last);
    }
    if status.demo_mode {
        println!(
            "{}",
            "Set NUTRISPEND_SUPABASE_URL and NUTRISPEND_SUPABASE_ANON_KEY to use a remote backend."
                .dimmed()
        );
    }

    Ok(())
}
