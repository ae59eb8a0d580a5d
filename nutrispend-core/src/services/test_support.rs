//! Shared fakes for service tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::result::{Error, Result};
use crate::domain::{Notification, NotificationPermission};
use crate::ports::Notifier;

/// Notifier that records what it was asked to show
pub struct RecordingNotifier {
    permission: NotificationPermission,
    fail: bool,
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn granting() -> Self {
        Self::with_permission(NotificationPermission::Granted)
    }

    pub fn with_permission(permission: NotificationPermission) -> Self {
        Self {
            permission,
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Notifier whose `notify` always fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::granting()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn request_permission(&self) -> Result<NotificationPermission> {
        Ok(self.permission)
    }

    async fn notify(&self, notification: &Notification) -> Result<()> {
        if self.fail {
            return Err(Error::Other("display unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}
