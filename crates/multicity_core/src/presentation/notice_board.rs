use std::{collections::VecDeque, sync::Arc};

use fxhash::FxHashMap;
use parking_lot::Mutex;
use tracing::debug;

use super::notification::{INLINE_DISMISS_AFTER, Notice, NotificationFacade, NotificationKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub message: String,
    pub kind: NotificationKind,
    pub title: Option<String>,
}

impl From<&Notice> for NoticeView {
    fn from(notice: &Notice) -> Self {
        NoticeView {
            message: notice.message.clone(),
            kind: notice.kind,
            title: notice.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineBanner {
    pub message: String,
    pub kind: NotificationKind,
}

#[derive(Default)]
struct BoardState {
    notices: VecDeque<Notice>,
    banners: FxHashMap<String, (u64, InlineBanner)>,
    next_banner_id: u64,
}

/// In-memory presentation: a queue of modal notices waiting to be dismissed and one inline
/// banner per target container.
///
/// Banners are removed [`INLINE_DISMISS_AFTER`] after they were shown when a tokio runtime is
/// available. A newer banner in the same target is not removed by an older banner's timer.
/// Outside a runtime there is no timer: the banner stays until it is replaced or removed with
/// [`NoticeBoard::clear_banner`].
#[derive(Clone, Default)]
pub struct NoticeBoard {
    state: Arc<Mutex<BoardState>>,
}

impl NoticeBoard {
    pub fn pending_notices(&self) -> Vec<NoticeView> {
        self.state.lock().notices.iter().map(NoticeView::from).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.state.lock().notices.len()
    }

    /// Closes the oldest notice and runs its close callback.
    pub fn dismiss(&self) -> Option<NoticeView> {
        let notice = self.state.lock().notices.pop_front()?;
        let view = NoticeView::from(&notice);
        notice.close();
        Some(view)
    }

    pub fn banner(&self, target: &str) -> Option<InlineBanner> {
        self.state
            .lock()
            .banners
            .get(target)
            .map(|(_, banner)| banner.clone())
    }

    /// Removes the banner in `target`, whatever its age.
    pub fn clear_banner(&self, target: &str) -> Option<InlineBanner> {
        self.state
            .lock()
            .banners
            .remove(target)
            .map(|(_, banner)| banner)
    }

    fn dismiss_banner(&self, target: &str, banner_id: u64) {
        let mut state = self.state.lock();
        if matches!(state.banners.get(target), Some((id, _)) if *id == banner_id) {
            state.banners.remove(target);
            debug!("Inline banner in {} dismissed", target);
        }
    }
}

impl NotificationFacade for NoticeBoard {
    fn notify(&self, notice: Notice) {
        self.state.lock().notices.push_back(notice);
    }

    fn notify_inline(&self, message: &str, kind: NotificationKind, target: &str) {
        let banner_id = {
            let mut state = self.state.lock();
            let banner_id = state.next_banner_id;
            state.next_banner_id += 1;
            state.banners.insert(
                target.to_owned(),
                (
                    banner_id,
                    InlineBanner {
                        message: message.to_owned(),
                        kind,
                    },
                ),
            );
            banner_id
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("No tokio runtime, banner in {} will not be dismissed", target);
            return;
        };

        let board = self.clone();
        let target = target.to_owned();
        handle.spawn(async move {
            tokio::time::sleep(INLINE_DISMISS_AFTER).await;
            board.dismiss_banner(&target, banner_id);
        });
    }
}
