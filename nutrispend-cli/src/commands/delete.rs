//! Delete command - remove an expense

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use super::get_context;
use crate::output;

pub async fn run(id: &str, force: bool) -> Result<()> {
    let ctx = get_context()?;

    if !force {
        let expenses = ctx.expense_service.list().await?;
        match expenses.iter().find(|e| e.id.as_deref() == Some(id)) {
            Some(expense) => println!(
                "\n{}",
                format!(
                    "This will delete '{}' ({}, {}).",
                    expense.description,
                    output::format_amount(expense.amount),
                    expense.date
                )
                .yellow()
            ),
            None => {
                output::warning(&format!("No expense with ID '{}'", id));
                return Ok(());
            }
        }

        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    ctx.expense_service.delete(id).await?;
    println!("\n{} Expense '{}' deleted\n", "✓".green(), id);

    Ok(())
}
