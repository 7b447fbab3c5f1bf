//! Phase-completion notifications.
//!
//! The engine only knows the [`Notifier`] capability. Backends here range from
//! a terminal bell to a desktop notification, and can be chained with
//! [`FallbackNotifier`].

use std::io::Write;

use notify_rust::Notification;
use tracing::debug;

use crate::error::NotifyError;
use crate::timer::Mode;

/// Receives one call per phase transition.
pub trait Notifier {
    fn notify_completion(&self, completed: Mode, next: Mode) -> Result<(), NotifyError>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify_completion(&self, completed: Mode, next: Mode) -> Result<(), NotifyError> {
        (**self).notify_completion(completed, next)
    }
}

/// Human-readable completion message.
pub fn completion_message(completed: Mode, next: Mode) -> String {
    format!("{} is over. Up next: {}.", completed.label(), next.label())
}

/// Does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify_completion(&self, _completed: Mode, _next: Mode) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Rings the terminal bell on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn notify_completion(&self, _completed: Mode, _next: Mode) -> Result<(), NotifyError> {
        let mut err = std::io::stderr();
        err.write_all(b"\x07")?;
        err.flush()?;
        Ok(())
    }
}

/// Shows a system notification.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    summary: String,
}

impl DesktopNotifier {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new("focusclock")
    }
}

impl Notifier for DesktopNotifier {
    fn notify_completion(&self, completed: Mode, next: Mode) -> Result<(), NotifyError> {
        Notification::new()
            .summary(&self.summary)
            .body(&completion_message(completed, next))
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Backend(e.to_string()))
    }
}

/// Tries `primary`, then `fallback` if the primary fails.
#[derive(Debug, Clone, Default)]
pub struct FallbackNotifier<P, F> {
    primary: P,
    fallback: F,
}

impl<P: Notifier, F: Notifier> FallbackNotifier<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Notifier, F: Notifier> Notifier for FallbackNotifier<P, F> {
    fn notify_completion(&self, completed: Mode, next: Mode) -> Result<(), NotifyError> {
        match self.primary.notify_completion(completed, next) {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!("primary notifier failed, falling back: {e}");
                self.fallback.notify_completion(completed, next)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FailingNotifier, RecordingNotifier};
    use super::*;

    #[test]
    fn fallback_used_when_primary_fails() {
        let notifier = FallbackNotifier::new(FailingNotifier, RecordingNotifier::default());
        notifier
            .notify_completion(Mode::Focus, Mode::Break)
            .unwrap();
        assert_eq!(notifier.fallback.count(), 1);
    }

    #[test]
    fn fallback_skipped_when_primary_succeeds() {
        let notifier =
            FallbackNotifier::new(RecordingNotifier::default(), RecordingNotifier::default());
        notifier
            .notify_completion(Mode::Break, Mode::Focus)
            .unwrap();
        assert_eq!(notifier.primary.count(), 1);
        assert_eq!(notifier.fallback.count(), 0);
    }

    #[test]
    fn both_failing_reports_error() {
        let notifier = FallbackNotifier::new(FailingNotifier, FailingNotifier);
        assert!(notifier
            .notify_completion(Mode::Focus, Mode::LongBreak)
            .is_err());
    }

    #[test]
    fn message_names_both_phases() {
        assert_eq!(
            completion_message(Mode::Focus, Mode::LongBreak),
            "Focus Time is over. Up next: Long Break."
        );
    }

    #[test]
    fn boxed_notifier_delegates() {
        let boxed: Box<dyn Notifier> = Box::new(SilentNotifier);
        assert!(boxed.notify_completion(Mode::Break, Mode::Focus).is_ok());
    }
}
