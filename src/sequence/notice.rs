use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

/// Location of a posted "awaiting review" notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeRef {
    pub channel_id: u64,
    pub message_id: u64,
}

/// Tracks the latest "awaiting review" notice per user so it can be removed
/// once a moderator acted on the review.
///
/// Kept in memory only; notices posted before a restart are left behind.
#[derive(Clone, Default)]
pub struct NoticeBoard {
    notices: Arc<Mutex<HashMap<u64, NoticeRef>>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn get(&self, user_id: u64) -> Option<NoticeRef> {
        self.notices.lock().await.get(&user_id).copied()
    }

    pub async fn contains(&self, user_id: u64) -> bool {
        self.notices.lock().await.contains_key(&user_id)
    }

    /// Records a user's notice, returning the one it replaces.
    pub async fn set(&self, user_id: u64, notice: NoticeRef) -> Option<NoticeRef> {
        self.notices.lock().await.insert(user_id, notice)
    }

    pub async fn take(&self, user_id: u64) -> Option<NoticeRef> {
        self.notices.lock().await.remove(&user_id)
    }
}
