//! Session storage implementation
//!
//! Sessions live in a sharded in-memory map keyed by conversant id. Distinct
//! conversants only contend when they hash to the same shard, and every
//! operation on one conversant runs under that entry's shard lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info, warn};
use crate::models::ConversantId;
use super::session::{Session, SessionState};

/// In-memory session store
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<ConversantId, Session>>,
}

impl SessionStore {
    /// Create an empty session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the conversant's session, creating a fresh one if absent
    pub fn get_or_create(&self, conversant_id: ConversantId) -> Session {
        self.sessions
            .entry(conversant_id)
            .or_insert_with(|| {
                debug!(conversant_id = conversant_id, "Creating session");
                Session::new()
            })
            .clone()
    }

    /// Snapshot of the conversant's session, if any
    pub fn get(&self, conversant_id: ConversantId) -> Option<Session> {
        self.sessions.get(&conversant_id).map(|session| session.clone())
    }

    /// Apply `mutation` to an existing session in place.
    ///
    /// Returns `false` without calling `mutation` when the conversant has no
    /// session.
    pub fn update<F>(&self, conversant_id: ConversantId, mutation: F) -> bool
    where
        F: FnOnce(&mut Session),
    {
        match self.sessions.get_mut(&conversant_id) {
            Some(mut session) => {
                mutation(session.value_mut());
                session.touch();
                true
            }
            None => false,
        }
    }

    /// Replace whatever the conversant had with a fresh session, returning
    /// the discarded one
    pub fn reset(&self, conversant_id: ConversantId) -> Option<Session> {
        self.sessions.insert(conversant_id, Session::new())
    }

    /// Delete the conversant's session. Removing an absent session is fine.
    pub fn remove(&self, conversant_id: ConversantId) -> Option<Session> {
        let removed = self.sessions.remove(&conversant_id).map(|(_, session)| session);
        if removed.is_some() {
            debug!(conversant_id = conversant_id, "Removed session");
        }
        removed
    }

    /// Run `f` against the conversant's slot while holding its entry lock.
    ///
    /// `f` sees `None` when no session exists. Leaving `None` in the slot
    /// removes the session; leaving `Some` stores it. `f` must not call back
    /// into the store.
    pub fn transact<R, F>(&self, conversant_id: ConversantId, f: F) -> R
    where
        F: FnOnce(&mut Option<Session>) -> R,
    {
        match self.sessions.entry(conversant_id) {
            Entry::Occupied(mut entry) => {
                let mut slot = Some(std::mem::take(entry.get_mut()));
                let result = f(&mut slot);
                match slot {
                    Some(session) => {
                        *entry.get_mut() = session;
                    }
                    None => {
                        entry.remove();
                    }
                }
                result
            }
            Entry::Vacant(entry) => {
                let mut slot = None;
                let result = f(&mut slot);
                if let Some(session) = slot {
                    entry.insert(session);
                }
                result
            }
        }
    }

    pub fn contains(&self, conversant_id: ConversantId) -> bool {
        self.sessions.contains_key(&conversant_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions that have not been written for longer than `max_idle`
    pub fn purge_idle(&self, max_idle: chrono::Duration) -> usize {
        let now = chrono::Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|conversant_id, session| {
            let keep = !session.is_idle(max_idle, now);
            if !keep {
                debug!(conversant_id = *conversant_id, state = ?session.state, "Dropping idle session");
            }
            keep
        });
        before.saturating_sub(self.sessions.len())
    }

    /// Get storage statistics
    pub fn stats(&self) -> StorageStats {
        let mut by_state = HashMap::new();
        for session in self.sessions.iter() {
            *by_state.entry(session.state).or_insert(0) += 1;
        }

        StorageStats {
            total_sessions: self.sessions.len(),
            by_state,
        }
    }
}

/// Storage statistics
#[derive(Debug, Clone)]
pub struct StorageStats {
    pub total_sessions: usize,
    pub by_state: HashMap<SessionState, usize>,
}

/// Session store with an optional idle-session sweep
#[derive(Debug)]
pub struct SessionStoreManager {
    store: SessionStore,
    idle_timeout: chrono::Duration,
    sweep_interval: Duration,
    sweep_handle: Option<tokio::task::JoinHandle<()>>,
}

impl SessionStoreManager {
    pub fn new(store: SessionStore, idle_timeout: Duration, sweep_interval: Duration) -> Self {
        let idle_timeout = chrono::Duration::from_std(idle_timeout)
            .unwrap_or_else(|_| chrono::Duration::days(36_500));

        Self {
            store,
            idle_timeout,
            sweep_interval,
            sweep_handle: None,
        }
    }

    /// Start the periodic idle-session sweep
    pub fn start_sweep(&mut self) {
        if self.sweep_handle.is_some() {
            warn!("Sweep task is already running");
            return;
        }

        let store = self.store.clone();
        let idle_timeout = self.idle_timeout;
        let interval = self.sweep_interval;

        let handle = tokio::spawn(async move {
            let mut sweep_interval = tokio::time::interval(interval);

            loop {
                sweep_interval.tick().await;

                let count = store.purge_idle(idle_timeout);
                if count > 0 {
                    let stats = store.stats();
                    info!(
                        removed = count,
                        remaining = stats.total_sessions,
                        by_state = ?stats.by_state,
                        "Sweep task removed idle sessions"
                    );
                }
            }
        });

        self.sweep_handle = Some(handle);
        info!("Started idle-session sweep with interval {:?}", self.sweep_interval);
    }

    /// Stop the periodic sweep
    pub fn stop_sweep(&mut self) {
        if let Some(handle) = self.sweep_handle.take() {
            handle.abort();
            info!("Stopped idle-session sweep");
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}

impl Drop for SessionStoreManager {
    fn drop(&mut self) {
        self.stop_sweep();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_is_lazy_and_stable() {
        let store = SessionStore::new();
        assert!(!store.contains(1));

        let session = store.get_or_create(1);
        assert_eq!(session.state, SessionState::AwaitingService);
        assert!(store.contains(1));

        store.update(1, |session| session.service = Some("Химчистка".to_string()));
        let again = store.get_or_create(1);
        assert_eq!(again.service.as_deref(), Some("Химчистка"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_without_session_is_noop() {
        let store = SessionStore::new();
        let mut called = false;
        assert!(!store.update(5, |_| called = true));
        assert!(!called);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = SessionStore::new();
        store.get_or_create(9);
        assert!(store.remove(9).is_some());
        assert!(store.remove(9).is_none());
        assert!(!store.contains(9));
    }

    #[test]
    fn test_reset_discards_previous_fields() {
        let store = SessionStore::new();
        store.get_or_create(3);
        store.update(3, |session| {
            session.service = Some("Керамика".to_string());
            session.state = SessionState::AwaitingVehicle;
        });

        let previous = store.reset(3).unwrap();
        assert_eq!(previous.state, SessionState::AwaitingVehicle);

        let fresh = store.get(3).unwrap();
        assert_eq!(fresh.state, SessionState::AwaitingService);
        assert!(fresh.service.is_none());
    }

    #[test]
    fn test_transact_inserts_keeps_and_removes() {
        let store = SessionStore::new();

        let saw_session = store.transact(4, |slot| {
            let existed = slot.is_some();
            *slot = Some(Session::new());
            existed
        });
        assert!(!saw_session);
        assert!(store.contains(4));

        store.transact(4, |slot| {
            if let Some(session) = slot.as_mut() {
                session.service = Some("Полировка".to_string());
            }
        });
        assert_eq!(store.get(4).unwrap().service.as_deref(), Some("Полировка"));

        let taken = store.transact(4, |slot| slot.take());
        assert!(taken.is_some());
        assert!(!store.contains(4));

        store.transact(4, |slot| assert!(slot.is_none()));
        assert!(!store.contains(4));
    }

    #[test]
    fn test_purge_idle_only_drops_stale_sessions() {
        let store = SessionStore::new();
        store.get_or_create(1);
        store.get_or_create(2);
        store.transact(1, |slot| {
            if let Some(session) = slot.as_mut() {
                session.updated_at = chrono::Utc::now() - chrono::Duration::hours(2);
            }
        });

        let removed = store.purge_idle(chrono::Duration::hours(1));
        assert_eq!(removed, 1);
        assert!(!store.contains(1));
        assert!(store.contains(2));
    }

    #[test]
    fn test_stats_by_state() {
        let store = SessionStore::new();
        store.get_or_create(1);
        store.get_or_create(2);
        store.update(2, |session| session.state = SessionState::AwaitingTime);

        let stats = store.stats();
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.by_state.get(&SessionState::AwaitingService), Some(&1));
        assert_eq!(stats.by_state.get(&SessionState::AwaitingTime), Some(&1));
    }

    #[test]
    fn test_concurrent_access_across_conversants() {
        let store = SessionStore::new();
        let handles: Vec<_> = (0..8)
            .map(|id| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        store.get_or_create(id);
                        store.update(id, |session| {
                            session.service = Some(format!("service-{}", id));
                        });
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 8);
        for id in 0..8 {
            assert_eq!(store.get(id).unwrap().service, Some(format!("service-{}", id)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_task_removes_idle_sessions() {
        let store = SessionStore::new();
        store.get_or_create(11);
        store.transact(11, |slot| {
            if let Some(session) = slot.as_mut() {
                session.updated_at = chrono::Utc::now() - chrono::Duration::hours(3);
            }
        });

        let mut manager = SessionStoreManager::new(
            store.clone(),
            Duration::from_secs(3600),
            Duration::from_secs(60),
        );
        manager.start_sweep();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(!manager.store().contains(11));
        manager.stop_sweep();
    }
}
