//! Shared application state for the sensory API.
//!
//! The engine core is single-writer per session; this layer supplies the
//! external serialization by holding every session behind one lock.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::classify::StateClassifier;
use crate::prediction::TriggerRiskEstimator;
use crate::{SensorySession, SessionConfig};

/// Shared application state, cloned per request handler.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Per-user sessions, created on first use
    sessions: RwLock<HashMap<String, SensorySession>>,
    /// Stateless classifier shared across requests
    classifier: StateClassifier,
    /// Risk estimator with its append-only trend history
    estimator: RwLock<TriggerRiskEstimator>,
    /// Template configuration for new sessions
    session_config: SessionConfig,
}

impl AppState {
    /// State with default session configuration.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// State with a custom template configuration for new sessions.
    pub fn with_config(session_config: SessionConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                sessions: RwLock::new(HashMap::new()),
                classifier: StateClassifier::default(),
                estimator: RwLock::new(TriggerRiskEstimator::new()),
                session_config,
            }),
        }
    }

    /// The shared classifier.
    pub fn classifier(&self) -> &StateClassifier {
        &self.inner.classifier
    }

    /// Run a closure against the risk estimator.
    pub fn with_estimator<R>(&self, f: impl FnOnce(&mut TriggerRiskEstimator) -> R) -> R {
        f(&mut self.inner.estimator.write())
    }

    /// Run a closure against a user's session, creating it on first use.
    pub fn with_session<R>(&self, user_id: &str, f: impl FnOnce(&mut SensorySession) -> R) -> R {
        let mut sessions = self.inner.sessions.write();
        let session = sessions
            .entry(user_id.to_string())
            .or_insert_with(|| SensorySession::new(user_id, self.inner.session_config.clone()));
        f(session)
    }

    /// Run a closure against an existing session, or fail with `None`.
    pub fn with_existing_session<R>(
        &self,
        user_id: &str,
        f: impl FnOnce(&mut SensorySession) -> R,
    ) -> Option<R> {
        let mut sessions = self.inner.sessions.write();
        sessions.get_mut(user_id).map(f)
    }

    /// Number of active sessions.
    pub fn session_count(&self) -> usize {
        self.inner.sessions.read().len()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_created_on_first_use() {
        let state = AppState::new();
        assert_eq!(state.session_count(), 0);

        state.with_session("user_001", |s| {
            assert_eq!(s.user_id(), "user_001");
        });
        assert_eq!(state.session_count(), 1);

        // second access reuses the session
        state.with_session("user_001", |_| {});
        assert_eq!(state.session_count(), 1);
    }

    #[test]
    fn test_existing_session_lookup() {
        let state = AppState::new();
        assert!(state.with_existing_session("ghost", |_| ()).is_none());

        state.with_session("user_001", |_| {});
        assert!(state.with_existing_session("user_001", |_| ()).is_some());
    }
}
