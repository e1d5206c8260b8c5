//! Lifecycle notifications forwarded to the host process.
//!
//! CHANGELOG:
//! - 10/17/2026 - Single-threaded startup flag
//! - 10/17/2026 - Initial implementation

use std::cell::Cell;
use std::sync::Arc;

use super::protocol::{HostChannel, HostEvent};

/// Callbacks the foreign app fires for a started module.
pub trait LifecycleObserver {
    /// Module finished starting. `logged_in` is the app's login flag.
    fn on_started(&self, logged_in: bool);
    /// App navigated to a fresh login page.
    fn on_new_login_page(&self);
}

/// Turns lifecycle callbacks into host events.
///
/// Sends are fire-and-forget: failures are logged and dropped.
pub struct HostNotifier {
    channel: Arc<dyn HostChannel>,
    started: Cell<bool>,
}

impl HostNotifier {
    pub fn new(channel: Arc<dyn HostChannel>) -> Self {
        Self {
            channel,
            started: Cell::new(false),
        }
    }

    fn emit(&self, event: HostEvent) {
        if let Err(e) = self.channel.send(&event) {
            tracing::debug!(channel = event.channel(), error = %e, "host event dropped");
        }
    }
}

impl LifecycleObserver for HostNotifier {
    fn on_started(&self, logged_in: bool) {
        // Only the first start is reported.
        if self.started.replace(true) {
            return;
        }
        self.emit(HostEvent::StartupObserved { logged_in });
    }

    fn on_new_login_page(&self) {
        self.emit(HostEvent::UserLogged);
    }
}
