//! Watch command - run the reminder loop in the foreground

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use nutrispend_core::services::ReminderScheduler;
use tokio::sync::watch;
use tracing::warn;

use super::get_context;

pub async fn run(interval: Option<u64>) -> Result<()> {
    let ctx = get_context()?;
    let period = match interval {
        Some(secs) => Duration::from_secs(secs.max(1)),
        None => ctx.config.check_interval(),
    };

    let initial = ctx.expense_service.list().await?;
    let (tx, rx) = watch::channel(initial);
    let scheduler = ReminderScheduler::spawn(ctx.reminder_service.clone(), rx, period);

    println!(
        "{}",
        format!(
            "Watching for reminders every {}s ({} backend). Press Ctrl-C to stop.",
            period.as_secs(),
            ctx.backend.label()
        )
        .dimmed()
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut poll = tokio::time::interval(period);
    // The scheduler already evaluated the initial collection
    poll.tick().await;

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = poll.tick() => {
                match ctx.expense_service.list().await {
                    Ok(expenses) => {
                        tx.send_if_modified(|current| {
                            if *current == expenses {
                                return false;
                            }
                            *current = expenses;
                            true
                        });
                    }
                    Err(e) => warn!("Failed to refresh expenses: {}", e),
                }
            }
        }
    }

    scheduler.shutdown().await;
    println!("{}", "Stopped.".dimmed());
    Ok(())
}
