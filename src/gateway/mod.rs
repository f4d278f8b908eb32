//! Record store gateway.
//!
//! A [`Transport`] is the raw request/response function: an endpoint plus
//! a JSON payload in, a JSON document out. [`Gateway`] puts typed calls on
//! top of it. Every collection call returns the complete, authoritative
//! collection for its entity type; callers replace their local copy with
//! it and never merge.

pub mod endpoint;
pub mod failover;
pub mod fallback;
pub mod remote;

use crate::errors::AppResult;
use crate::models::record::Draft;
use crate::models::{Collection, EntityKind, Profile, Session};
use endpoint::{EntityAction, Endpoint};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

pub use failover::Failover;
pub use fallback::MockServer;
pub use remote::RemoteTransport;

pub trait Transport: Send + Sync {
    fn post(&self, endpoint: Endpoint, payload: Value) -> AppResult<Value>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post(&self, endpoint: Endpoint, payload: Value) -> AppResult<Value> {
        (**self).post(endpoint, payload)
    }
}

#[derive(Deserialize)]
struct LoginUser {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(default)]
    user: Option<LoginUser>,
}

#[derive(Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: Option<String>,
}

pub struct Gateway {
    transport: Box<dyn Transport>,
}

impl Gateway {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    fn call<T: DeserializeOwned>(&self, endpoint: Endpoint, payload: Value) -> AppResult<T> {
        tracing::debug!(%endpoint, "request");
        let body = self.transport.post(endpoint, payload)?;
        Ok(serde_json::from_value(body)?)
    }

    fn entity(&self, kind: EntityKind, action: EntityAction, payload: Value) -> AppResult<Collection> {
        self.call(Endpoint::Entity(kind, action), payload)
    }

    pub fn list(&self, kind: EntityKind) -> AppResult<Collection> {
        self.entity(kind, EntityAction::List, json!({}))
    }

    /// Creates the record when `draft.id` is absent, merges into it otherwise.
    pub fn save(&self, kind: EntityKind, draft: &Draft) -> AppResult<Collection> {
        self.entity(kind, EntityAction::Save, serde_json::to_value(draft)?)
    }

    pub fn delete(&self, kind: EntityKind, id: u64) -> AppResult<Collection> {
        self.entity(kind, EntityAction::Delete, json!({ "id": id }))
    }

    pub fn toggle(&self, kind: EntityKind, id: u64) -> AppResult<Collection> {
        self.entity(kind, EntityAction::Toggle, json!({ "id": id }))
    }

    /// The session username falls back to the submitted one when the
    /// backend does not echo it.
    pub fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let res: LoginResponse = self.call(
            Endpoint::Login,
            json!({ "username": username, "password": password }),
        )?;
        let username = res
            .user
            .and_then(|u| u.username)
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| username.to_string());
        Ok(Session {
            token: res.token,
            username,
        })
    }

    /// Confirmation text from the backend, if it sent one.
    pub fn forgot_password(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> AppResult<Option<String>> {
        let mut payload = serde_json::Map::new();
        if let Some(u) = username {
            payload.insert("username".into(), Value::String(u.to_string()));
        }
        if let Some(e) = email {
            payload.insert("email".into(), Value::String(e.to_string()));
        }
        let res: MessageResponse = self.call(Endpoint::ForgotPassword, Value::Object(payload))?;
        Ok(res.message.filter(|m| !m.is_empty()))
    }

    pub fn profile(&self) -> AppResult<Profile> {
        self.call(Endpoint::ProfileGet, json!({}))
    }

    /// Returns the stored profile after the merge.
    pub fn update_profile(&self, profile: &Profile) -> AppResult<Profile> {
        self.call(Endpoint::ProfileUpdate, serde_json::to_value(profile)?)
    }
}
