//! In-memory session registry

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

use super::SessionController;

/// A session shared between request handlers and background completions
pub type SharedSession = Arc<Mutex<SessionController>>;

/// Live sessions addressable by id
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session and return its shared handle
    pub async fn insert(&self, session: SessionController) -> SharedSession {
        let id = session.id();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, Arc::clone(&shared));
        tracing::debug!(session_id = %id, "Session registered");
        shared
    }

    /// Look up a session
    pub async fn get(&self, id: &Uuid) -> AppResult<SharedSession> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))
    }

    /// Drop a session; in-flight completions keep their own handle and finish harmlessly
    pub async fn remove(&self, id: &Uuid) -> AppResult<()> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| tracing::debug!(session_id = %id, "Session removed"))
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))
    }

    /// Drop every session whose last update is older than `cutoff`
    ///
    /// Returns how many were evicted. A session updated after the scan
    /// is kept.
    pub async fn evict_older_than(&self, cutoff: DateTime<Utc>) -> usize {
        let candidates: Vec<(Uuid, SharedSession)> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(id, shared)| (*id, Arc::clone(shared)))
            .collect();

        let mut idle = Vec::new();
        for (id, shared) in candidates {
            if shared.lock().await.updated_at() < cutoff {
                idle.push(id);
            }
        }

        if idle.is_empty() {
            return 0;
        }

        let mut sessions = self.sessions.write().await;
        let mut evicted = 0;
        for id in idle {
            let Some(shared) = sessions.get(&id) else {
                continue;
            };
            // Skip sessions touched since the scan
            let still_idle = shared
                .try_lock()
                .is_ok_and(|session| session.updated_at() < cutoff);
            if still_idle {
                sessions.remove(&id);
                evicted += 1;
                tracing::debug!(session_id = %id, "Idle session evicted");
            }
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let catalog = Catalog::bundled().unwrap();
        let store = SessionStore::new();

        let session = SessionController::new(catalog.first());
        let id = session.id();
        store.insert(session).await;
        assert_eq!(store.len().await, 1);

        let shared = store.get(&id).await.unwrap();
        assert_eq!(shared.lock().await.id(), id);

        store.remove(&id).await.unwrap();
        assert!(store.is_empty().await);
        assert!(matches!(store.get(&id).await, Err(AppError::NotFound(_))));
        assert!(store.remove(&id).await.is_err());
    }

    #[tokio::test]
    async fn test_evict_older_than_keeps_recent_sessions() {
        let catalog = Catalog::bundled().unwrap();
        let store = SessionStore::new();

        let stale = SessionController::new(catalog.first());
        let stale_id = stale.id();
        store.insert(stale).await;

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let cutoff = Utc::now();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let fresh = SessionController::new(catalog.first());
        let fresh_id = fresh.id();
        store.insert(fresh).await;

        assert_eq!(store.evict_older_than(cutoff).await, 1);
        assert!(store.get(&stale_id).await.is_err());
        assert!(store.get(&fresh_id).await.is_ok());

        assert_eq!(store.evict_older_than(cutoff).await, 0);
        assert_eq!(store.len().await, 1);
    }
}
