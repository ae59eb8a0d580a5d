//! Add command - log an expense manually

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use colored::Colorize;
use dialoguer::{Input, Select};
use nutrispend_core::{ExpenseCategory, NewExpense};
use rust_decimal::Decimal;

use super::get_context;
use crate::output;

pub async fn run(
    description: Option<String>,
    amount: Option<String>,
    date: Option<String>,
    category: Option<String>,
    json: bool,
) -> Result<()> {
    // JSON mode never prompts
    if json {
        check_json_inputs(description.as_deref(), amount.as_deref())?;
    }

    let ctx = get_context()?;
    let today = ctx.clock.today();

    let description = match description {
        Some(d) => d,
        None => Input::new()
            .with_prompt("Description")
            .interact_text()?,
    };
    if description.trim().is_empty() {
        bail!("Description cannot be empty");
    }

    let amount_str = match amount {
        Some(a) => a,
        None => Input::new().with_prompt("Amount").interact_text()?,
    };
    let amount = parse_amount(&amount_str)?;

    let date = match date {
        Some(d) => parse_date(&d)?,
        None if json => today,
        None => {
            let input: String = Input::new()
                .with_prompt("Date (YYYY-MM-DD)")
                .default(today.format("%Y-%m-%d").to_string())
                .interact_text()?;
            parse_date(&input)?
        }
    };

    let category = match category {
        Some(c) => c.parse::<ExpenseCategory>()?,
        None if json => ExpenseCategory::ALL[0],
        None => {
            let labels: Vec<&str> = ExpenseCategory::ALL.iter().map(|c| c.label()).collect();
            let index = Select::new()
                .with_prompt("Category")
                .items(&labels)
                .default(0)
                .interact()?;
            ExpenseCategory::ALL[index]
        }
    };

    let expense = ctx
        .expense_service
        .add(NewExpense::new(description.trim(), amount, date, category))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&expense)?);
    } else {
        output::success("Expense added");
        println!("  ID: {}", expense.id.as_deref().unwrap_or("-"));
        println!("  {} on {} ({})", output::format_amount(expense.amount), expense.date, expense.category);
        println!("  {}", expense.description.dimmed());
    }

    Ok(())
}

fn check_json_inputs(description: Option<&str>, amount: Option<&str>) -> Result<()> {
    let missing: Vec<&str> = [("--description", description), ("--amount", amount)]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(flag, _)| flag)
        .collect();
    if !missing.is_empty() {
        bail!("--json requires {}", missing.join(" and "));
    }
    Ok(())
}

fn parse_amount(input: &str) -> Result<Decimal> {
    let amount: Decimal = input
        .trim()
        .trim_start_matches('$')
        .parse()
        .map_err(|_| anyhow!("Invalid amount: {}", input))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        bail!("Amount cannot be negative");
    }
    Ok(amount)
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date format. Use YYYY-MM-DD"))
}
