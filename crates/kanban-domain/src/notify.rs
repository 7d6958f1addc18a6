/// Shown when a move could not be persisted.
pub const MOVE_FAILED_MESSAGE: &str = "Failed to move task. Please try again.";

/// Surface for transient user-facing messages.
pub trait Notifier {
    fn notify_error(&self, message: &str);
}

/// Emits notifications as `error` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}
