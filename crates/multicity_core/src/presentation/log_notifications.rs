use tracing::{debug, error, info, warn};

use super::notification::{Notice, NotificationFacade, NotificationKind};

/// Sends every notice to the tracing subscriber. Nobody dismisses a log line, so close
/// callbacks run right away.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifications;

fn emit(kind: NotificationKind, title: Option<&str>, message: &str) {
    let title = title.unwrap_or("");
    match kind {
        NotificationKind::Info | NotificationKind::Success => {
            info!(?kind, title, "{}", message)
        }
        NotificationKind::Warning => warn!(title, "{}", message),
        NotificationKind::Error => error!(title, "{}", message),
    }
}

impl NotificationFacade for LogNotifications {
    fn notify(&self, notice: Notice) {
        emit(notice.kind, notice.title.as_deref(), &notice.message);
        notice.close();
    }

    fn notify_inline(&self, message: &str, kind: NotificationKind, target: &str) {
        debug!("Inline notice for {}", target);
        emit(kind, None, message);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use super::*;

    #[test]
    fn test_notify_closes_immediately() {
        let closed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&closed);

        LogNotifications.notify(
            Notice::new("At least one row is required", NotificationKind::Warning)
                .with_on_close(move || flag.store(true, Ordering::SeqCst)),
        );

        assert!(closed.load(Ordering::SeqCst));
    }
}
