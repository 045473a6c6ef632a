//! Accessibility notification subscriptions.
//!
//! The accessibility layer delivers per-window notifications through
//! observers registered per application. Registration is flaky while an
//! application is still launching, so adds are retried with bounded
//! exponential backoff; a terminal failure rolls back every observation
//! already added for that application.

use std::thread;
use std::time::Duration;

use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;
use tracing::{debug, warn};

use crate::sys::app::{Application, Pid};

/// Notification names the core recognizes, covering both the per-application
/// accessibility stream and the workspace stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
pub enum NotificationKind {
    #[strum(serialize = "AXWindowCreated")]
    WindowCreated,
    #[strum(serialize = "AXUIElementDestroyed")]
    ElementDestroyed,
    #[strum(serialize = "AXFocusedWindowChanged")]
    FocusedWindowChanged,
    #[strum(serialize = "AXMainWindowChanged")]
    MainWindowChanged,
    #[strum(serialize = "AXWindowMoved")]
    WindowMoved,
    #[strum(serialize = "AXWindowResized")]
    WindowResized,
    #[strum(serialize = "AXWindowMiniaturized")]
    WindowMiniaturized,
    #[strum(serialize = "AXWindowDeminiaturized")]
    WindowDeminiaturized,
    #[strum(serialize = "AXTitleChanged")]
    TitleChanged,
    #[strum(serialize = "AXApplicationActivated")]
    ApplicationActivated,
    #[strum(serialize = "AXApplicationDeactivated")]
    ApplicationDeactivated,
    #[strum(serialize = "AXApplicationHidden")]
    ApplicationHidden,
    #[strum(serialize = "AXApplicationShown")]
    ApplicationShown,
    #[strum(serialize = "NSWorkspaceActiveSpaceDidChangeNotification")]
    ActiveSpaceChanged,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ObserveError {
    #[error("accessibility API returned error code {0}")]
    Api(i32),
    #[error("application {0} cannot be observed")]
    NotObservable(Pid),
    #[error("notification source shut down")]
    Closed,
}

/// Subscription surface of the accessibility layer. Delivery happens through
/// the event channel, never through callbacks into this crate.
pub trait NotificationSource {
    fn observe(&mut self, pid: Pid, kind: NotificationKind) -> Result<(), ObserveError>;
    fn unobserve(&mut self, pid: Pid, kind: NotificationKind);
}

/// Retry policy for observer registration. The delay doubles after each
/// failed attempt.
#[derive(Clone, Copy, Debug)]
pub struct Backoff {
    /// Total attempts per notification, including the first. Must be at
    /// least 1.
    pub attempts: u32,
    pub initial_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff {
            attempts: 4,
            initial_delay: Duration::from_millis(50),
        }
    }
}

impl Backoff {
    fn delay(&self, failed_attempts: u32) -> Duration {
        self.initial_delay * 2u32.saturating_pow(failed_attempts.saturating_sub(1))
    }
}

/// Registers the notification set for an application, with retry and
/// rollback per the error-handling policy: a terminal failure leaves no
/// partial registration behind and is logged, not surfaced as a panic.
pub struct ObserverRegistrar {
    backoff: Backoff,
}

impl Default for ObserverRegistrar {
    fn default() -> Self { ObserverRegistrar::new(Backoff::default()) }
}

impl ObserverRegistrar {
    pub fn new(backoff: Backoff) -> ObserverRegistrar {
        assert!(backoff.attempts >= 1, "backoff must allow at least one attempt");
        ObserverRegistrar { backoff }
    }

    pub fn register_app<A: Application>(
        &self,
        source: &mut impl NotificationSource,
        app: &A,
        kinds: &[NotificationKind],
    ) -> Result<(), ObserveError> {
        let pid = app.pid();
        let mut added: Vec<NotificationKind> = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            match self.observe_with_retry(source, pid, kind) {
                Ok(()) => added.push(kind),
                Err(err) => {
                    warn!(pid, kind = %kind, error = %err, "observer registration failed, rolling back");
                    for &prev in added.iter().rev() {
                        source.unobserve(pid, prev);
                    }
                    return Err(err);
                }
            }
        }
        debug!(pid, count = added.len(), "observers registered");
        Ok(())
    }

    fn observe_with_retry(
        &self,
        source: &mut impl NotificationSource,
        pid: Pid,
        kind: NotificationKind,
    ) -> Result<(), ObserveError> {
        let mut failed = 0;
        loop {
            match source.observe(pid, kind) {
                Ok(()) => {
                    if failed > 0 {
                        debug!(pid, kind = %kind, retries = failed, "observer added after retry");
                    }
                    return Ok(());
                }
                Err(err) => {
                    failed += 1;
                    if failed >= self.backoff.attempts {
                        return Err(err);
                    }
                    thread::sleep(self.backoff.delay(failed));
                }
            }
        }
    }
}
