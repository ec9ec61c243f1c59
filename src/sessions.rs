//! Booking-session store.
//!
//! One session owns exactly one generated seat map and one selection
//! tracker; nothing is shared across sessions. Sessions are uuid-keyed and
//! live only in memory, so a restart drops them all.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Category;
use crate::services::selection::SelectionTracker;

#[derive(Debug)]
pub struct BookingSession {
    pub id: Uuid,
    pub category: Category,
    pub tracker: SelectionTracker,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, BookingSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, tracker: SelectionTracker, category: Category) -> Uuid {
        let id = Uuid::new_v4();
        let session = BookingSession {
            id,
            category,
            tracker,
            created_at: Utc::now(),
        };
        self.sessions.write().await.insert(id, session);
        id
    }

    /// Run `f` against a session's state under the write lock. `None` when
    /// the session does not exist.
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut BookingSession) -> T,
    ) -> Option<T> {
        self.sessions.write().await.get_mut(&id).map(f)
    }

    pub async fn remove(&self, id: Uuid) -> Option<BookingSession> {
        self.sessions.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop every session. Test-data reset hook.
    pub async fn clear(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let count = sessions.len();
        sessions.clear();
        count
    }
}
