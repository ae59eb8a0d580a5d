//! Reminder command - daily reminder settings and one-shot checks

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use nutrispend_core::services::{evaluate, ReminderOutcome};
use nutrispend_core::{NotificationPermission, ReminderTime};
use serde_json::json;

use super::get_context;
use crate::output;

#[derive(Subcommand)]
pub enum ReminderCommands {
    /// Show reminder settings and what a check would do now
    Status,
    /// Enable reminders (asks for notification permission)
    On,
    /// Disable reminders
    Off,
    /// Set the daily reminder time
    Time {
        /// Time of day as HH:MM (24-hour)
        time: String,
    },
    /// Run one reminder check now
    Check,
}

pub async fn run(command: Option<ReminderCommands>, json: bool) -> Result<()> {
    match command.unwrap_or(ReminderCommands::Status) {
        ReminderCommands::Status => run_status(json).await,
        ReminderCommands::On => run_on(json).await,
        ReminderCommands::Off => {
            let ctx = get_context()?;
            ctx.reminder_service.disable_reminders().await?;
            report(json, json!({ "enabled": false }), || output::success("Reminders disabled"))
        }
        ReminderCommands::Time { time } => {
            let time: ReminderTime = time.parse()?;
            let ctx = get_context()?;
            ctx.reminder_service.set_reminder_time(time).await?;
            report(json, json!({ "time": time }), || {
                output::success(&format!("Reminder time set to {}", time))
            })
        }
        ReminderCommands::Check => run_check(json).await,
    }
}

fn report(json: bool, value: serde_json::Value, human: impl FnOnce()) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        human();
    }
    Ok(())
}

async fn run_status(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let prefs = ctx.reminder_service.preferences().await?;
    let expenses = ctx.expense_service.list().await?;
    // Dry run: evaluate without applying any action
    let preview = evaluate(&prefs, &expenses, ctx.clock.now()).outcome;

    if json {
        let value = json!({
            "enabled": prefs.enabled,
            "time": prefs.reminder_time,
            "lastRemindedDate": prefs.last_reminded_date,
            "nextCheck": preview,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Daily Reminders".bold());
    let state = if prefs.enabled { "on".green() } else { "off".red() };
    println!("  Enabled: {}", state);
    println!("  Time:    {}", prefs.reminder_time);
    if let Some(last) = &prefs.last_reminded_date {
        println!("  Last decision: {}", last);
    }
    println!("  {}", describe(&preview).dimmed());
    Ok(())
}

async fn run_on(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let permission = ctx.reminder_service.enable_reminders().await?;

    if json {
        let value = json!({
            "enabled": permission == NotificationPermission::Granted,
            "permission": permission,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match permission {
        NotificationPermission::Granted => output::success("Reminders enabled"),
        _ => output::warning("Notification permission was not granted; reminders stay off"),
    }
    Ok(())
}

async fn run_check(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let expenses = ctx.expense_service.list().await?;
    let outcome = ctx.reminder_service.check(&expenses).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        output::info(&describe(&outcome));
    }
    Ok(())
}

fn describe(outcome: &ReminderOutcome) -> String {
    match outcome {
        ReminderOutcome::Disabled => "Reminders are off.".to_string(),
        ReminderOutcome::TooEarly { deadline } => {
            format!("Too early: today's reminder is due at {}.", deadline.format("%H:%M"))
        }
        ReminderOutcome::AlreadyDecided => "Today's reminder has already been handled.".to_string(),
        ReminderOutcome::Suppressed => "Expenses logged today; no reminder needed.".to_string(),
        ReminderOutcome::Notified => "Nothing logged today; reminder sent.".to_string(),
    }
}
