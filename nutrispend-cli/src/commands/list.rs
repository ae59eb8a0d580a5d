//! List command - expense history

use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;

use super::get_context;
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let expenses = ctx.expense_service.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&expenses)?);
        return Ok(());
    }

    if expenses.is_empty() {
        println!("{}", "No expenses yet. Log one with `ns add`.".dimmed());
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Date", "Category", "Description", "Amount", "ID"]);
    for expense in &expenses {
        table.add_row(vec![
            Cell::new(expense.date.format("%b %d, %Y")),
            output::category_cell(expense.category),
            Cell::new(&expense.description),
            Cell::new(output::format_amount(expense.amount)),
            Cell::new(expense.id.as_deref().unwrap_or("-")),
        ]);
    }

    println!("{}", table);
    println!(
        "{}",
        format!("{} expenses ({})", expenses.len(), ctx.backend.label()).dimmed()
    );
    Ok(())
}
