//! Summary command - 30-day spend overview

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, CellAlignment};
use rust_decimal::Decimal;

use super::get_context;
use crate::output;

const BAR_WIDTH: usize = 30;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let summary = ctx.summary_service.summarize().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "30-Day Total".bold());
    println!(
        "  {} {}",
        output::format_amount(summary.total).bold(),
        format!("({} to {}, {} expenses)", summary.start, summary.end, summary.expense_count).dimmed()
    );
    println!();

    println!("{}", "Spend by Category".bold());
    if summary.by_category.is_empty() {
        println!("  {}", "No data available".dimmed());
    } else {
        let mut table = output::create_table();
        table.set_header(vec!["Category", "Total", "Share", "Count"]);
        for entry in &summary.by_category {
            table.add_row(vec![
                output::category_cell(entry.category),
                Cell::new(output::format_amount(entry.total)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.1}%", entry.share)).set_alignment(CellAlignment::Right),
                Cell::new(entry.count).set_alignment(CellAlignment::Right),
            ]);
        }
        println!("{}", table);
    }
    println!();

    println!("{}", "Daily Trend".bold());
    let max = summary
        .daily
        .iter()
        .map(|d| d.total)
        .max()
        .unwrap_or(Decimal::ZERO);
    for day in &summary.daily {
        let amount = if day.total.is_zero() {
            String::new()
        } else {
            output::format_amount(day.total)
        };
        println!(
            "  {}  {} {}",
            day.date.format("%b %d"),
            output::bar(day.total, max, BAR_WIDTH).green(),
            amount.dimmed()
        );
    }

    if summary.all_time_total != summary.total {
        println!();
        println!(
            "{}",
            format!("All-time total: {}", output::format_amount(summary.all_time_total)).dimmed()
        );
    }

    Ok(())
}
