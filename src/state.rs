//! Application state: the reference store, the live quiz sessions, and the quiz config.
//!
//! This module owns:
//!   - the reference store (bundled seeds, or a JSON dataset from config/env)
//!   - the session map (by quiz id), with idle and size-cap eviction
//!   - the quiz config (from TOML or defaults)
//!
//! A dataset that fails to load is logged and replaced by the bundled seeds.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::config::{load_quiz_config_from_env, QuizConfig};
use crate::error::QuizError;
use crate::seeds::seed_dataset;
use crate::session::Session;
use crate::store::{MemoryStore, ReferenceStore};

/// A live session plus the last time a request touched it.
pub struct TrackedSession {
    pub session: Session,
    pub touched: Instant,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReferenceStore>,
    pub sessions: Arc<RwLock<HashMap<Uuid, TrackedSession>>>,
    pub config: Arc<QuizConfig>,
}

impl AppState {
    /// Build state from env: load config, then the reference data it points at.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        Self::with_config(load_quiz_config_from_env())
    }

    #[instrument(level = "info", skip_all)]
    pub fn with_config(mut config: QuizConfig) -> Self {
        config.sanitize();
        let loaded = match &config.dataset_path {
            Some(path) => match MemoryStore::load_json_file(path) {
                Ok(store) => {
                    info!(target: "geoquiz", %path, countries = store.len(), "Loaded dataset");
                    Some(store)
                }
                Err(e) => {
                    error!(target: "geoquiz", %path, error = %e, "Failed to load dataset; using bundled seeds");
                    None
                }
            },
            None => None,
        };
        let store = match loaded {
            Some(store) => store,
            None => match MemoryStore::from_dataset(seed_dataset()) {
                Ok(store) => store,
                Err(e) => {
                    // Bundled data is validated by tests; an empty store keeps the server up.
                    error!(target: "geoquiz", error = %e, "Bundled seed dataset rejected");
                    MemoryStore::empty()
                }
            },
        };
        info!(target: "geoquiz", countries = store.len(), locales = ?store.available_locales(), "Reference store ready");
        Self::from_parts(Arc::new(store), config)
    }

    pub fn from_parts(store: Arc<dyn ReferenceStore>, config: QuizConfig) -> Self {
        Self {
            store,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config: Arc::new(config),
        }
    }

    fn idle_limit(&self) -> Duration {
        Duration::from_secs(self.config.session_idle_secs)
    }

    /// Insert a new session. Idle sessions go first; if the map is still full, the
    /// least recently touched ones follow.
    #[instrument(level = "debug", skip(self, session), fields(id = %session.id()))]
    pub async fn insert_session(&self, session: Session) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let mut evicted = drop_idle(&mut sessions, now, self.idle_limit());
        let cap = self.config.max_sessions.max(1);
        while sessions.len() >= cap {
            let oldest = sessions.iter().min_by_key(|(_, t)| t.touched).map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    evicted += 1;
                }
                None => break,
            }
        }
        if evicted > 0 {
            info!(target: "geoquiz", evicted, live = sessions.len(), "Evicted sessions on insert");
        }
        sessions.insert(session.id(), TrackedSession { session, touched: now });
    }

    /// Drop every session idle for longer than `session_idle_secs`. Returns how many went.
    #[instrument(level = "debug", skip(self))]
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let evicted = drop_idle(&mut sessions, Instant::now(), self.idle_limit());
        if evicted > 0 {
            info!(target: "geoquiz", evicted, live = sessions.len(), "Evicted idle sessions");
        } else {
            debug!(target: "geoquiz", live = sessions.len(), "No idle sessions");
        }
        evicted
    }

    /// Run one synchronous session transition under the write guard.
    #[instrument(level = "debug", skip(self, f), fields(%id))]
    pub async fn with_session<T>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> T) -> Result<T, QuizError> {
        let mut sessions = self.sessions.write().await;
        let tracked = sessions.get_mut(&id).ok_or(QuizError::UnknownSession(id))?;
        tracked.touched = Instant::now();
        Ok(f(&mut tracked.session))
    }
}

fn drop_idle(sessions: &mut HashMap<Uuid, TrackedSession>, now: Instant, limit: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, t| now.saturating_duration_since(t.touched) <= limit);
    before - sessions.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{QuizKind, Scope};
    use crate::session::rng_from_config;

    async fn count(st: &AppState) -> usize {
        st.sessions.read().await.len()
    }

    fn state_with(cfg: QuizConfig) -> AppState {
        AppState::with_config(QuizConfig { rng_seed: Some(3), ..cfg })
    }

    fn new_session(state: &AppState) -> Session {
        Session::start(
            state.store.as_ref(),
            QuizKind::City,
            Scope::All,
            "en",
            &state.config,
            rng_from_config(&state.config),
        )
    }

    #[tokio::test]
    async fn session_cap_drops_least_recently_touched() {
        let st = state_with(QuizConfig { max_sessions: 3, ..QuizConfig::default() });
        let mut ids = Vec::new();
        for _ in 0..3 {
            let s = new_session(&st);
            ids.push(s.id());
            st.insert_session(s).await;
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        // Touching the first session makes the second the oldest.
        st.with_session(ids[0], |s| s.status()).await.unwrap();
        for _ in 0..2 {
            let s = new_session(&st);
            ids.push(s.id());
            st.insert_session(s).await;
        }
        assert_eq!(count(&st).await, 3);
        assert!(st.with_session(ids[0], |_| ()).await.is_ok());
        assert_eq!(st.with_session(ids[1], |_| ()).await, Err(QuizError::UnknownSession(ids[1])));
        assert_eq!(st.with_session(ids[2], |_| ()).await, Err(QuizError::UnknownSession(ids[2])));
        assert!(st.with_session(ids[4], |_| ()).await.is_ok());
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted() {
        let st = state_with(QuizConfig { session_idle_secs: 0, ..QuizConfig::default() });
        for _ in 0..5 {
            st.insert_session(new_session(&st)).await;
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        // Each insert clears everything idle before it.
        assert_eq!(count(&st).await, 1);
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(st.evict_idle().await, 1);
        assert_eq!(count(&st).await, 0);
    }

    #[tokio::test]
    async fn fresh_sessions_survive_the_sweep() {
        let st = state_with(QuizConfig::default());
        for _ in 0..4 {
            st.insert_session(new_session(&st)).await;
        }
        assert_eq!(st.evict_idle().await, 0);
        assert_eq!(count(&st).await, 4);
    }

    #[test]
    fn zero_option_count_is_clamped() {
        let st = state_with(QuizConfig { option_count: 0, max_sessions: 0, ..QuizConfig::default() });
        assert_eq!(st.config.option_count, 4);
        assert_eq!(st.config.max_sessions, 1);
    }
}
