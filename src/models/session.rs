use serde::{Deserialize, Serialize};

/// Logged-in session, persisted under a fixed key in the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
}
