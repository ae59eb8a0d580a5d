//! Reminder scheduler - drives the reminder engine on a timer
//!
//! One tokio task owns the loop, so evaluations never overlap: a periodic
//! tick and a change to the expense collection both end up as a call to
//! `ReminderService::check` inside that task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::domain::Expense;
use crate::services::ReminderService;

/// Shortest period the loop will tick at
pub const MIN_PERIOD: Duration = Duration::from_secs(1);

/// Handle to the running reminder loop
///
/// Dropping the handle aborts the loop; `shutdown` stops it and waits.
pub struct ReminderScheduler {
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    /// Start evaluating every `period`, plus immediately whenever `expenses` changes
    ///
    /// The first tick fires right away. Periods below [`MIN_PERIOD`] are raised to it.
    pub fn spawn(
        service: Arc<ReminderService>,
        mut expenses: watch::Receiver<Vec<Expense>>,
        period: Duration,
    ) -> Self {
        let period = period.max(MIN_PERIOD);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut publisher_alive = true;

            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {}
                    changed = expenses.changed(), if publisher_alive => {
                        if changed.is_err() {
                            // Keep ticking with the last published collection
                            debug!("Expense publisher closed");
                            publisher_alive = false;
                            continue;
                        }
                    }
                }

                let snapshot = expenses.borrow_and_update().clone();
                if let Err(e) = service.check(&snapshot).await {
                    warn!("Reminder check failed: {}", e);
                }
            }

            debug!("Reminder scheduler stopped");
        });

        Self {
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Stop the loop and wait for an in-flight evaluation to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;

    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::InMemoryKeyValueStore;
    use crate::domain::ExpenseCategory;
    use crate::ports::{storage_keys, KeyValueStore};
    use crate::services::test_support::RecordingNotifier;
    use crate::services::PreferenceService;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 2)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn logged_today() -> Expense {
        Expense {
            id: Some("t".to_string()),
            created_at: None,
            description: "Oatmeal".to_string(),
            amount: Decimal::new(400, 2),
            date: at(0, 0).date(),
            category: ExpenseCategory::Food,
        }
    }

    struct Fixture {
        kv: Arc<InMemoryKeyValueStore>,
        notifier: Arc<RecordingNotifier>,
        clock: Arc<FixedClock>,
        service: Arc<ReminderService>,
    }

    fn fixture(now: NaiveDateTime) -> Fixture {
        let kv = Arc::new(InMemoryKeyValueStore::with_entries([
            (storage_keys::REMINDER_ENABLED, "true"),
            (storage_keys::REMINDER_TIME, "20:00"),
        ]));
        let notifier = Arc::new(RecordingNotifier::granting());
        let clock = Arc::new(FixedClock::new(now));
        let service = Arc::new(ReminderService::new(
            Arc::new(PreferenceService::new(kv.clone())),
            notifier.clone(),
            clock.clone(),
        ));
        Fixture {
            kv,
            notifier,
            clock,
            service,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_many_ticks_one_notification() {
        let f = fixture(at(21, 0));
        let (_tx, rx) = watch::channel(Vec::new());

        let scheduler = ReminderScheduler::spawn(f.service.clone(), rx, Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(60 * 30)).await;

        assert_eq!(f.notifier.count(), 1);
        assert_eq!(
            f.kv.get(storage_keys::LAST_REMINDED_DATE).await.unwrap().as_deref(),
            Some("2025-09-02")
        );
        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_expense_change_triggers_immediate_check() {
        let f = fixture(at(19, 0));
        let (tx, rx) = watch::channel(Vec::new());

        let scheduler = ReminderScheduler::spawn(f.service.clone(), rx, Duration::from_secs(3600));
        // Let the immediate first tick run (too early)
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(f.kv.get(storage_keys::LAST_REMINDED_DATE).await.unwrap(), None);

        f.clock.set(at(20, 30));
        tx.send(vec![logged_today()]).unwrap();
        // Well before the next hourly tick
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(f.notifier.count(), 0);
        assert_eq!(
            f.kv.get(storage_keys::LAST_REMINDED_DATE).await.unwrap().as_deref(),
            Some("2025-09-02")
        );
        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_evaluations() {
        let f = fixture(at(8, 0));
        let (_tx, rx) = watch::channel(Vec::new());

        let scheduler = ReminderScheduler::spawn(f.service.clone(), rx, Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(scheduler.is_running());
        scheduler.shutdown().await;

        f.clock.set(at(22, 0));
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(f.notifier.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keeps_ticking_after_publisher_dropped() {
        let f = fixture(at(8, 0));
        let (tx, rx) = watch::channel(Vec::new());

        let scheduler = ReminderScheduler::spawn(f.service.clone(), rx, Duration::from_secs(60));
        drop(tx);
        tokio::time::sleep(Duration::from_secs(5)).await;

        f.clock.set(at(22, 0));
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(f.notifier.count(), 1);
        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_raised_to_minimum() {
        let f = fixture(at(21, 0));
        let (_tx, rx) = watch::channel(Vec::new());

        let scheduler = ReminderScheduler::spawn(f.service.clone(), rx, Duration::ZERO);
        tokio::time::sleep(MIN_PERIOD * 10).await;

        assert!(scheduler.is_running());
        assert_eq!(f.notifier.count(), 1);
        scheduler.shutdown().await;
    }
}
