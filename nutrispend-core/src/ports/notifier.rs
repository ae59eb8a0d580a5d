//! Local notification capability

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{Notification, NotificationPermission};

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Ask the platform for permission to show notifications
    ///
    /// Only the user-initiated enable flow calls this; the reminder engine never does.
    async fn request_permission(&self) -> Result<NotificationPermission>;

    /// Show a notification
    async fn notify(&self, notification: &Notification) -> Result<()>;
}
