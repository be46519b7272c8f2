//! Sinks for user-facing error messages.

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Receives human-readable failure messages, fire-and-forget.
///
/// Implementations must never fail back into the caller.
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// Writes each message as a `warn` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        warn!(notification = message, "Cart notification");
    }
}

/// Forwards messages to a UI task draining toasts from the channel.
impl Notifier for mpsc::UnboundedSender<String> {
    fn notify_error(&self, message: &str) {
        if self.send(message.to_string()).is_err() {
            debug!(notification = message, "Notification receiver dropped");
        }
    }
}
