use std::{sync::Arc, time::Duration};

use serde::Serialize;

/// Inline banners disappear on their own after this long.
pub const INLINE_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

pub type OnClose = Box<dyn FnOnce() + Send + 'static>;

/// A modal-style message. `on_close` runs once the user has dismissed it.
pub struct Notice {
    pub message: String,
    pub kind: NotificationKind,
    pub title: Option<String>,
    pub on_close: Option<OnClose>,
}

impl Notice {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            title: None,
            on_close: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_on_close(mut self, on_close: impl FnOnce() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    /// Dismisses the notice, running its close callback if any.
    pub fn close(self) {
        if let Some(on_close) = self.on_close {
            on_close();
        }
    }
}

impl std::fmt::Debug for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notice")
            .field("message", &self.message)
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

/// Where user-facing messages go. Controllers receive one at construction and never show
/// anything to the user through any other channel.
pub trait NotificationFacade: Send + Sync {
    fn notify(&self, notice: Notice);

    /// A non-blocking banner inside `target`, dismissed after [`INLINE_DISMISS_AFTER`].
    fn notify_inline(&self, message: &str, kind: NotificationKind, target: &str);
}

impl<T: NotificationFacade + ?Sized> NotificationFacade for Arc<T> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }

    fn notify_inline(&self, message: &str, kind: NotificationKind, target: &str) {
        (**self).notify_inline(message, kind, target)
    }
}
