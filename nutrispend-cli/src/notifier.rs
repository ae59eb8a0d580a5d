//! Terminal notifications for the reminder engine

use std::io::Write;

use async_trait::async_trait;
use colored::Colorize;
use nutrispend_core::ports::Notifier;
use nutrispend_core::{CoreResult, Notification, NotificationPermission};

/// Shows notifications as a highlighted banner and rings the terminal bell
///
/// A terminal needs no permission, so every request is granted.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn request_permission(&self) -> CoreResult<NotificationPermission> {
        Ok(NotificationPermission::Granted)
    }

    async fn notify(&self, notification: &Notification) -> CoreResult<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "\x07")?;
        writeln!(out, "{}", format!("🔔 {}", notification.title).bold().on_green())?;
        writeln!(out, "   {}", notification.body)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}
