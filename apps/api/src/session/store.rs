//! In-memory session registry. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::state::SessionState;

/// Holds every live session. Each session sits behind its own async mutex;
/// a handler keeps the guard for its whole action, so actions on one
/// session never overlap.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<SessionState>>>>>,
    max_idle: Duration,
}

impl SessionStore {
    pub fn new(max_idle: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_idle,
        }
    }

    /// Registers a new empty session, purging idle ones first.
    pub async fn create(&self) -> Uuid {
        self.purge_idle().await;

        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(SessionState::default())));
        info!("Session {id} created");
        id
    }

    /// Locks the session for one user action and marks it active.
    pub async fn lock(&self, id: Uuid) -> Result<OwnedMutexGuard<SessionState>, AppError> {
        let handle = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;

        let mut guard = handle.clone().lock_owned().await;

        // The session may have been purged or deleted while we waited.
        let still_registered = self
            .sessions
            .read()
            .await
            .get(&id)
            .is_some_and(|current| Arc::ptr_eq(current, &handle));
        if !still_registered {
            return Err(AppError::NotFound(format!("Session {id} not found")));
        }

        guard.last_active = Utc::now();
        Ok(guard)
    }

    /// Ends a session. Returns false if it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops sessions idle longer than `max_idle`. Sessions currently locked
    /// by an action are in use and are kept.
    pub async fn purge_idle(&self) -> usize {
        // A window reaching past the earliest representable time purges nothing.
        let cutoff = Utc::now()
            .checked_sub_signed(self.max_idle)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(state) => state.last_active >= cutoff,
            Err(_) => true,
        });
        let purged = before - sessions.len();
        if purged > 0 {
            debug!("Purged {purged} idle sessions");
        }
        purged
    }
}
