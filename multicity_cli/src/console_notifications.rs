use multicity_core::presentation::notification::{Notice, NotificationFacade, NotificationKind};

/// Prints notices to stdout as soon as they are raised.
pub struct ConsoleNotifications;

fn marker(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "info",
        NotificationKind::Success => "ok",
        NotificationKind::Warning => "warning",
        NotificationKind::Error => "error",
    }
}

impl NotificationFacade for ConsoleNotifications {
    fn notify(&self, notice: Notice) {
        match &notice.title {
            Some(title) => println!("[{}] {}\n{}\n", marker(notice.kind), title, notice.message),
            None => println!("[{}] {}", marker(notice.kind), notice.message),
        }
        notice.close();
    }

    fn notify_inline(&self, message: &str, kind: NotificationKind, _target: &str) {
        println!("[{}] {}", marker(kind), message);
    }
}
