//! Reminder engine - once-per-day "you haven't logged anything" nudge
//!
//! `evaluate` is the pure decision procedure: it looks at the preferences,
//! the expense collection and the current local time, and returns the
//! effects to perform. `ReminderService` loads the inputs and applies those
//! effects through the notifier and preference ports.
//!
//! The decision for a day is recorded before the next evaluation can see an
//! undecided state, so at most one notification goes out per calendar day.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::reminder::date_key;
use crate::domain::result::Result;
use crate::domain::{Expense, Notification, NotificationPermission, ReminderPreferences, ReminderTime};
use crate::ports::{Clock, Notifier};
use crate::services::PreferenceService;

/// What the evaluation decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReminderOutcome {
    /// Reminders are switched off
    Disabled,
    /// Today's deadline has not been reached yet
    TooEarly { deadline: NaiveDateTime },
    /// Today's decision was already recorded
    AlreadyDecided,
    /// Something was logged today; decision recorded without notifying
    Suppressed,
    /// Nothing logged today; notification sent and decision recorded
    Notified,
}

/// An effect requested by `evaluate`, applied in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderAction {
    Notify(Notification),
    /// Persist the decision date key
    RecordDecision(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEvaluation {
    pub outcome: ReminderOutcome,
    pub actions: Vec<ReminderAction>,
}

impl ReminderEvaluation {
    fn no_action(outcome: ReminderOutcome) -> Self {
        Self {
            outcome,
            actions: Vec::new(),
        }
    }
}

/// Decide what to do at `now`
pub fn evaluate(
    prefs: &ReminderPreferences,
    expenses: &[Expense],
    now: NaiveDateTime,
) -> ReminderEvaluation {
    if !prefs.enabled {
        return ReminderEvaluation::no_action(ReminderOutcome::Disabled);
    }

    let today = now.date();
    let deadline = prefs.reminder_time.deadline_on(today);
    if now < deadline {
        return ReminderEvaluation::no_action(ReminderOutcome::TooEarly { deadline });
    }

    if prefs.decided_on(today) {
        return ReminderEvaluation::no_action(ReminderOutcome::AlreadyDecided);
    }
    let today_key = date_key(today);

    if expenses.iter().any(|e| e.is_on(today)) {
        return ReminderEvaluation {
            outcome: ReminderOutcome::Suppressed,
            actions: vec![ReminderAction::RecordDecision(today_key)],
        };
    }

    ReminderEvaluation {
        outcome: ReminderOutcome::Notified,
        actions: vec![
            ReminderAction::Notify(Notification::daily_reminder()),
            ReminderAction::RecordDecision(today_key),
        ],
    }
}

/// Applies reminder decisions and drives the permission flow
pub struct ReminderService {
    preferences: Arc<PreferenceService>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl ReminderService {
    pub fn new(
        preferences: Arc<PreferenceService>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            preferences,
            notifier,
            clock,
        }
    }

    /// Run one evaluation against the given expense collection
    ///
    /// A failed notification is logged and the decision is still recorded.
    /// A failed preference write is returned.
    pub async fn check(&self, expenses: &[Expense]) -> Result<ReminderOutcome> {
        let prefs = self.preferences.load_reminder_preferences().await?;
        let evaluation = evaluate(&prefs, expenses, self.clock.now());

        for action in evaluation.actions {
            match action {
                ReminderAction::Notify(notification) => {
                    if let Err(e) = self.notifier.notify(&notification).await {
                        warn!("Failed to show reminder notification: {}", e);
                    }
                }
                ReminderAction::RecordDecision(key) => {
                    self.preferences.record_decision(&key).await?;
                }
            }
        }

        debug!(outcome = ?evaluation.outcome, "Reminder check");
        Ok(evaluation.outcome)
    }

    pub async fn preferences(&self) -> Result<ReminderPreferences> {
        self.preferences.load_reminder_preferences().await
    }

    /// Ask for notification permission and enable reminders if granted
    ///
    /// On grant, sends a confirmation naming the reminder time. On denial or
    /// dismissal nothing is written.
    pub async fn enable_reminders(&self) -> Result<NotificationPermission> {
        let permission = self.notifier.request_permission().await?;
        if permission != NotificationPermission::Granted {
            info!(?permission, "Notification permission not granted");
            return Ok(permission);
        }

        self.preferences.set_reminder_enabled(true).await?;

        let time = self.preferences.load_reminder_preferences().await?.reminder_time;
        if let Err(e) = self.notifier.notify(&Notification::reminders_enabled(time)).await {
            warn!("Failed to show confirmation notification: {}", e);
        }
        info!(%time, "Reminders enabled");
        Ok(permission)
    }

    pub async fn disable_reminders(&self) -> Result<()> {
        self.preferences.set_reminder_enabled(false).await?;
        info!("Reminders disabled");
        Ok(())
    }

    /// Change the reminder time; a decision already recorded today stands
    pub async fn set_reminder_time(&self, time: ReminderTime) -> Result<()> {
        self.preferences.set_reminder_time(time).await
    }
}
