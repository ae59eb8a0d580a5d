//! Smart add command - log expenses described in plain language

use anyhow::{bail, Result};
use colored::Colorize;
use comfy_table::Cell;
use dialoguer::Confirm;
use nutrispend_core::{Error, NewExpense};
use serde::Serialize;

use super::get_context;
use crate::output;

#[derive(Serialize)]
struct SmartAddResult<'a> {
    proposals: &'a [NewExpense],
    created: Vec<nutrispend_core::Expense>,
}

pub async fn run(text: &str, yes: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let proposals = match ctx.smart_add_service.propose(text).await {
        Ok(proposals) => proposals,
        Err(Error::Config(message)) => bail!(
            "{}. Set NUTRISPEND_GEMINI_API_KEY or extraction.apiKey in settings.json",
            message
        ),
        Err(e) => return Err(e.into()),
    };

    if json {
        // Non-interactive: only --yes saves
        let created = if yes {
            ctx.smart_add_service.commit(proposals.clone()).await?
        } else {
            Vec::new()
        };
        let result = SmartAddResult {
            proposals: &proposals,
            created,
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if proposals.is_empty() {
        output::warning("Couldn't understand any expenses in that text.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Date", "Category", "Description", "Amount"]);
    for proposal in &proposals {
        table.add_row(vec![
            Cell::new(proposal.date.format("%b %d, %Y")),
            output::category_cell(proposal.category),
            Cell::new(&proposal.description),
            Cell::new(output::format_amount(proposal.amount)),
        ]);
    }
    println!("{}", table);

    if !yes
        && !Confirm::new()
            .with_prompt(format!("Save {} expense(s)?", proposals.len()))
            .default(true)
            .interact()?
    {
        println!("{}\n", "Cancelled".dimmed());
        return Ok(());
    }

    let created = ctx.smart_add_service.commit(proposals).await?;
    output::success(&format!("Added {} expense(s)", created.len()));
    Ok(())
}
