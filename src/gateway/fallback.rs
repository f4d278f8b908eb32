//! Local fallback backend.
//!
//! Answers the same endpoints as the remote API from a dataset stored as
//! one JSON document in the key-value store. Seeded with one example record
//! per collection on first use.

use crate::db::kv::KvStore;
use crate::errors::{AppError, AppResult};
use crate::gateway::Transport;
use crate::gateway::endpoint::{EntityAction, Endpoint};
use crate::models::record::{Draft, find, next_id};
use crate::models::{Collection, EntityKind, Profile, Record};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex, MutexGuard};

pub const STORE_KEY: &str = "truckhisab_admin_store";

/// Key-value store shared between the fallback backend, the session store
/// and the internal log.
pub type SharedStore = Arc<Mutex<KvStore>>;

pub fn lock(store: &SharedStore) -> AppResult<MutexGuard<'_, KvStore>> {
    store
        .lock()
        .map_err(|e| AppError::StoreLock(e.to_string()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub users: Collection,
    pub trucks: Collection,
    pub locations: Collection,
    pub entries: Collection,
    pub history: Collection,
    pub profile: Profile,
}

impl Dataset {
    pub fn seed() -> Self {
        let now = Local::now();
        Self {
            users: vec![
                Record::new(1)
                    .with("name", "Admin User")
                    .with("username", "admin")
                    .with("email", "admin@example.com"),
            ],
            trucks: vec![
                Record::new(1)
                    .with("name", "Truck-100")
                    .with("number", "GJ01AB1001"),
            ],
            locations: vec![
                Record::new(1)
                    .with("name", "Ahmedabad")
                    .with("state", "Gujarat"),
            ],
            entries: vec![
                Record::new(1)
                    .with("truckId", "Truck-100")
                    .with("locationId", "Ahmedabad")
                    .with("loadType", "Steel")
                    .with("date", &now.format("%Y-%m-%d").to_string()),
            ],
            history: vec![
                Record::new(1)
                    .with("action", "Seed Data Created")
                    .with("item", "System")
                    .with("date", &now.to_rfc3339()),
            ],
            profile: Profile {
                username: "admin".into(),
                full_name: "Admin User".into(),
                email: "admin@example.com".into(),
                mobile: "9999999999".into(),
            },
        }
    }

    pub fn collection(&self, kind: EntityKind) -> &Collection {
        match kind {
            EntityKind::Users => &self.users,
            EntityKind::Trucks => &self.trucks,
            EntityKind::Locations => &self.locations,
            EntityKind::Entries => &self.entries,
            EntityKind::History => &self.history,
        }
    }

    pub fn collection_mut(&mut self, kind: EntityKind) -> &mut Collection {
        match kind {
            EntityKind::Users => &mut self.users,
            EntityKind::Trucks => &mut self.trucks,
            EntityKind::Locations => &mut self.locations,
            EntityKind::Entries => &mut self.entries,
            EntityKind::History => &mut self.history,
        }
    }
}

fn not_found(kind: EntityKind, id: u64) -> AppError {
    AppError::RecordNotFound {
        entity: kind.to_string(),
        id,
    }
}

/// Create (no id) or merge (with id) one record.
pub fn upsert(
    mut collection: Collection,
    kind: EntityKind,
    draft: Draft,
) -> AppResult<Collection> {
    match draft.id {
        Some(id) => {
            let rec = collection
                .iter_mut()
                .find(|r| r.id == Some(id))
                .ok_or_else(|| not_found(kind, id))?;
            rec.fields.extend(draft.values);
            if let Some(enabled) = draft.enabled {
                rec.enabled = enabled;
            }
        }
        None => {
            let id = next_id(&collection)
                .ok_or_else(|| AppError::IdExhausted(kind.to_string()))?;
            collection.push(Record {
                id: Some(id),
                enabled: draft.enabled.unwrap_or(true),
                fields: draft.values,
            });
        }
    }
    Ok(collection)
}

pub fn remove(collection: Collection, kind: EntityKind, id: u64) -> AppResult<Collection> {
    if find(&collection, id).is_none() {
        return Err(not_found(kind, id));
    }
    Ok(collection.into_iter().filter(|r| r.id != Some(id)).collect())
}

pub fn toggle(mut collection: Collection, kind: EntityKind, id: u64) -> AppResult<Collection> {
    let rec = collection
        .iter_mut()
        .find(|r| r.id == Some(id))
        .ok_or_else(|| not_found(kind, id))?;
    rec.enabled = !rec.enabled;
    Ok(collection)
}

#[derive(Deserialize)]
struct IdPayload {
    id: u64,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LoginPayload {
    username: String,
    password: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ForgotPayload {
    username: Option<String>,
    email: Option<String>,
}

pub struct MockServer {
    store: SharedStore,
}

impl MockServer {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    fn load(kv: &KvStore) -> AppResult<Dataset> {
        Ok(kv.get_json::<Dataset>(STORE_KEY)?.unwrap_or_else(Dataset::seed))
    }

    /// Run `f` on a fresh copy of the dataset and persist the result.
    fn mutate<F>(&self, kind: EntityKind, f: F) -> AppResult<Value>
    where
        F: FnOnce(Collection) -> AppResult<Collection>,
    {
        let kv = lock(&self.store)?;
        let mut data = Self::load(&kv)?;
        let current = std::mem::take(data.collection_mut(kind));
        let updated = f(current)?;
        *data.collection_mut(kind) = updated;
        kv.put_json(STORE_KEY, &data)?;
        Ok(serde_json::to_value(data.collection(kind))?)
    }

    fn handle_entity(&self, kind: EntityKind, action: EntityAction, payload: Value) -> AppResult<Value> {
        match action {
            EntityAction::List => {
                let kv = lock(&self.store)?;
                let data = Self::load(&kv)?;
                Ok(serde_json::to_value(data.collection(kind))?)
            }
            EntityAction::Save => {
                let draft: Draft = serde_json::from_value(payload)?;
                self.mutate(kind, |c| upsert(c, kind, draft))
            }
            EntityAction::Delete => {
                let IdPayload { id } = serde_json::from_value(payload)?;
                self.mutate(kind, |c| remove(c, kind, id))
            }
            EntityAction::Toggle => {
                let IdPayload { id } = serde_json::from_value(payload)?;
                self.mutate(kind, |c| toggle(c, kind, id))
            }
        }
    }
}

impl Transport for MockServer {
    fn post(&self, endpoint: Endpoint, payload: Value) -> AppResult<Value> {
        match endpoint {
            Endpoint::Login => {
                let p: LoginPayload = serde_json::from_value(payload)?;
                if p.username.is_empty() || p.password.is_empty() {
                    return Err(AppError::InvalidCredentials);
                }
                Ok(json!({ "token": "mock-token", "user": { "username": p.username } }))
            }
            Endpoint::ForgotPassword => {
                let p: ForgotPayload = serde_json::from_value(payload)?;
                let who = p
                    .username
                    .filter(|u| !u.is_empty())
                    .or(p.email)
                    .unwrap_or_default();
                Ok(json!({ "message": format!("Reset link sent to {who}") }))
            }
            Endpoint::ProfileGet => {
                let kv = lock(&self.store)?;
                Ok(serde_json::to_value(Self::load(&kv)?.profile)?)
            }
            Endpoint::ProfileUpdate => {
                let kv = lock(&self.store)?;
                let mut data = Self::load(&kv)?;
                let mut merged = serde_json::to_value(&data.profile)?;
                if let (Value::Object(base), Value::Object(patch)) = (&mut merged, payload) {
                    base.extend(patch);
                }
                data.profile = serde_json::from_value(merged)?;
                kv.put_json(STORE_KEY, &data)?;
                Ok(serde_json::to_value(&data.profile)?)
            }
            Endpoint::Entity(kind, action) => self.handle_entity(kind, action, payload),
        }
    }
}
