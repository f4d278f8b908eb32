//! Persisted login session.

use crate::errors::AppResult;
use crate::gateway::fallback::{SharedStore, lock};
use crate::models::Session;

pub const SESSION_KEY: &str = "truckhisab_session";

#[derive(Clone)]
pub struct SessionStore {
    store: SharedStore,
}

impl SessionStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Last saved session. An unreadable entry counts as logged out.
    pub fn load(&self) -> AppResult<Option<Session>> {
        lock(&self.store)?.get_json(SESSION_KEY)
    }

    pub fn save(&self, session: &Session) -> AppResult<()> {
        lock(&self.store)?.put_json(SESSION_KEY, session)
    }

    /// Returns false when there was nothing to clear.
    pub fn clear(&self) -> AppResult<bool> {
        lock(&self.store)?.remove(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::kv::KvStore;
    use crate::db::pool::DbPool;
    use std::sync::{Arc, Mutex};

    fn store() -> SessionStore {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        SessionStore::new(Arc::new(Mutex::new(KvStore::new(pool))))
    }

    #[test]
    fn save_load_clear() {
        let s = store();
        assert_eq!(s.load().unwrap(), None);

        let session = Session {
            token: "mock-token".into(),
            username: "admin".into(),
        };
        s.save(&session).unwrap();
        assert_eq!(s.load().unwrap(), Some(session));

        assert!(s.clear().unwrap());
        assert!(!s.clear().unwrap());
        assert_eq!(s.load().unwrap(), None);
    }

    #[test]
    fn corrupt_entry_reads_as_logged_out() {
        let s = store();
        lock(&s.store).unwrap().put(SESSION_KEY, "{not json").unwrap();
        assert_eq!(s.load().unwrap(), None);
    }
}
