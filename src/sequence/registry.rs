use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::sequence::{SequenceKind, Session, SessionKey};

/// Shared handle to a live session. Events for one session are serialized by
/// its mutex.
pub type SessionHandle = Arc<Mutex<Session>>;

struct Entry {
    handle: SessionHandle,
    /// Cached [`Session::subject`], so lookups never need session locks.
    subject: u64,
}

/// Table of live sessions keyed by `(user, channel, kind)`.
#[derive(Clone, Default)]
pub struct SequenceRegistry {
    sessions: Arc<Mutex<HashMap<SessionKey, Entry>>>,
}

impl SequenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session, evicting the sessions it supersedes.
    ///
    /// A new session replaces any session with the same key. Question and
    /// review sessions additionally replace every session of the same kind
    /// about the same subject, so a user never has two question dialogues and
    /// a user is never under two reviews at once.
    ///
    /// # Returns
    /// - Handle of the inserted session
    /// - Handles of the evicted sessions, which the caller must tear down
    pub async fn insert(&self, session: Session) -> (SessionHandle, Vec<SessionHandle>) {
        let key = session.key();
        let subject = session.subject();
        let handle = Arc::new(Mutex::new(session));

        let mut sessions = self.sessions.lock().await;
        let mut displaced = Vec::new();

        if matches!(key.kind, SequenceKind::Question | SequenceKind::Review) {
            let stale: Vec<SessionKey> = sessions
                .iter()
                .filter(|(k, entry)| k.kind == key.kind && entry.subject == subject)
                .map(|(k, _)| *k)
                .collect();
            for k in stale {
                if let Some(entry) = sessions.remove(&k) {
                    displaced.push(entry.handle);
                }
            }
        }

        if let Some(old) = sessions.insert(
            key,
            Entry {
                handle: Arc::clone(&handle),
                subject,
            },
        ) {
            displaced.push(old.handle);
        }

        (handle, displaced)
    }

    /// Live sessions of a user in a channel, in kind order.
    pub async fn find(&self, user_id: u64, channel_id: u64) -> Vec<SessionHandle> {
        let sessions = self.sessions.lock().await;

        let mut found: Vec<(SequenceKind, SessionHandle)> = sessions
            .iter()
            .filter(|(k, _)| k.user_id == user_id && k.channel_id == channel_id)
            .map(|(k, entry)| (k.kind, Arc::clone(&entry.handle)))
            .collect();
        found.sort_by_key(|(kind, _)| *kind);

        found.into_iter().map(|(_, handle)| handle).collect()
    }

    /// Removes a session if the key still maps to exactly this handle.
    ///
    /// A key reused by a newer session is left alone.
    pub async fn remove(&self, key: &SessionKey, handle: &SessionHandle) -> bool {
        let mut sessions = self.sessions.lock().await;

        match sessions.get(key) {
            Some(entry) if Arc::ptr_eq(&entry.handle, handle) => {
                sessions.remove(key);
                true
            }
            _ => false,
        }
    }

    /// Removes and returns every session of a kind about a subject.
    pub async fn take_by_subject(&self, subject: u64, kind: SequenceKind) -> Vec<SessionHandle> {
        let mut sessions = self.sessions.lock().await;

        let keys: Vec<SessionKey> = sessions
            .iter()
            .filter(|(k, entry)| k.kind == kind && entry.subject == subject)
            .map(|(k, _)| *k)
            .collect();

        keys.into_iter()
            .filter_map(|k| sessions.remove(&k))
            .map(|entry| entry.handle)
            .collect()
    }

    #[cfg(test)]
    pub async fn contains_subject(&self, subject: u64, kind: SequenceKind) -> bool {
        self.sessions
            .lock()
            .await
            .iter()
            .any(|(k, entry)| k.kind == kind && entry.subject == subject)
    }

    /// Copy of every key and handle, for sweeping without holding the table.
    pub async fn snapshot(&self) -> Vec<(SessionKey, SessionHandle)> {
        self.sessions
            .lock()
            .await
            .iter()
            .map(|(k, entry)| (*k, Arc::clone(&entry.handle)))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
