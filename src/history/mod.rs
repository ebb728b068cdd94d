use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::models::{MovieRecord, UserId};

type UserHistory = Arc<Mutex<Vec<MovieRecord>>>;

/// Per-user viewing history, kept for the life of the process.
///
/// Each user's list sits behind its own lock so writes for one user are
/// serialized without blocking anyone else. The outer map lock is only held
/// long enough to find or create a user's slot.
pub struct HistoryStore {
    inner: Arc<RwLock<HashMap<UserId, UserHistory>>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn slot(&self, user: UserId) -> Option<UserHistory> {
        self.inner.read().await.get(&user).cloned()
    }

    async fn slot_or_create(&self, user: UserId) -> UserHistory {
        if let Some(slot) = self.slot(user).await {
            return slot;
        }
        let mut map = self.inner.write().await;
        map.entry(user).or_default().clone()
    }

    pub async fn append(&self, user: UserId, record: MovieRecord) {
        let slot = self.slot_or_create(user).await;
        slot.lock().await.push(record);
    }

    /// Empties the user's history. Clearing an unknown user is a no-op.
    pub async fn clear(&self, user: UserId) {
        if let Some(slot) = self.slot(user).await {
            slot.lock().await.clear();
        }
    }

    /// Snapshot of the user's history in viewing order.
    pub async fn get(&self, user: UserId) -> Vec<MovieRecord> {
        match self.slot(user).await {
            Some(slot) => slot.lock().await.clone(),
            None => Vec::new(),
        }
    }

    #[cfg(test)]
    pub async fn len(&self, user: UserId) -> usize {
        match self.slot(user).await {
            Some(slot) => slot.lock().await.len(),
            None => 0,
        }
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for HistoryStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
