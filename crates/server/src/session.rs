//! Keyed session state.
//!
//! Each session key owns an independent [`RatingProfile`] behind its own
//! lock; ratings from one caller can never leak into another's fit.
//! Scoring works on a cloned snapshot, so no session lock is ever held
//! across a gradient-descent run.

use data_loader::ItemIndex;
use sources::{EngineError, RatingProfile};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

/// Owns every live session's rating state.
///
/// Sessions are created on first touch and live until the process exits;
/// nothing here is persisted.
pub struct SessionManager {
    n_items: usize,
    sessions: RwLock<HashMap<String, Arc<Mutex<RatingProfile>>>>,
}

impl SessionManager {
    pub fn new(n_items: usize) -> Self {
        Self {
            n_items,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Get or create the profile handle for a session key.
    fn handle(&self, session: &str) -> Arc<Mutex<RatingProfile>> {
        if let Some(profile) = self.sessions.read().unwrap().get(session) {
            return profile.clone();
        }

        let mut sessions = self.sessions.write().unwrap();
        sessions
            .entry(session.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(RatingProfile::new(self.n_items))))
            .clone()
    }

    /// Record a rating in the session's profile.
    ///
    /// `item` must already be resolved against the catalog.
    pub fn add_rating(
        &self,
        session: &str,
        item: ItemIndex,
        title: &str,
        rating: f64,
    ) -> Result<(), EngineError> {
        let handle = self.handle(session);
        let mut profile = handle.lock().unwrap();
        profile.insert(item, title, rating)
    }

    /// Clear a session's ratings. A no-op for sessions never touched.
    pub fn reset(&self, session: &str) {
        let handle = self.sessions.read().unwrap().get(session).cloned();
        if let Some(handle) = handle {
            handle.lock().unwrap().reset();
        }
    }

    /// Cloned snapshot of a session's profile, if the session exists.
    pub fn snapshot(&self, session: &str) -> Option<RatingProfile> {
        let handle = self.sessions.read().unwrap().get(session).cloned()?;
        let profile = handle.lock().unwrap();
        Some(profile.clone())
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().unwrap().len()
    }
}
