//! Top-level application state: session, one workflow per entity,
//! profile editor, current page and toast.

use crate::core::profile::ProfileEditor;
use crate::core::session::SessionStore;
use crate::core::workflow::{ActionOutcome, EntityWorkflow, SubmitOutcome};
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::gateway::Gateway;
use crate::gateway::fallback::{SharedStore, lock};
use crate::models::{Collection, EntityKind, Session};
use crate::pages::entity_page;
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_MS: u64 = 1800;
pub const RESET_SENT_MESSAGE: &str = "Reset link sent";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Entity(EntityKind),
    Profile,
}

impl Page {
    pub const KEYS: [&'static str; 7] = [
        "dashboard",
        "users",
        "trucks",
        "locations",
        "entries",
        "history",
        "profile",
    ];

    pub fn from_key(key: &str) -> AppResult<Self> {
        match key {
            "dashboard" => Ok(Page::Dashboard),
            "profile" => Ok(Page::Profile),
            other => EntityKind::from_key(other)
                .map(Page::Entity)
                .ok_or_else(|| AppError::UnknownPage(other.to_string())),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Entity(kind) => kind.as_str(),
            Page::Profile => "profile",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    shown_at: Instant,
    ttl: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= self.ttl
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub users: usize,
    pub trucks: usize,
    pub locations: usize,
    pub entries: usize,
}

/// Entity lists that could not be fetched while starting a session.
pub type BootstrapFailures = Vec<(EntityKind, AppError)>;

pub struct Shell {
    gateway: Gateway,
    sessions: SessionStore,
    store: SharedStore,
    session: Option<Session>,
    workflows: BTreeMap<EntityKind, EntityWorkflow>,
    profile: ProfileEditor,
    page: Page,
    toast: Option<Toast>,
    toast_ttl: Duration,
}

impl Shell {
    pub fn new(gateway: Gateway, store: SharedStore, toast_ttl: Duration) -> AppResult<Self> {
        let mut workflows = BTreeMap::new();
        for kind in EntityKind::ALL {
            workflows.insert(kind, EntityWorkflow::new(entity_page(kind)?));
        }
        Ok(Self {
            gateway,
            sessions: SessionStore::new(store.clone()),
            store,
            session: None,
            workflows,
            profile: ProfileEditor::new()?,
            page: Page::Dashboard,
            toast: None,
            toast_ttl,
        })
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn require_session(&self) -> AppResult<&Session> {
        self.session.as_ref().ok_or(AppError::NotLoggedIn)
    }

    /// Write an audit row. Failures are logged and never block the caller.
    fn audit(&self, operation: &str, target: &str, message: &str) {
        let res = lock(&self.store).and_then(|kv| ttlog(kv.conn(), operation, target, message));
        if let Err(e) = res {
            tracing::warn!(operation, target, error = %e, "audit log write failed");
        }
    }

    // ---------------------------
    // Toast
    // ---------------------------

    fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, self.toast_ttl));
    }

    /// The current toast, dropped once its time is up.
    pub fn active_toast(&mut self) -> Option<&Toast> {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
        self.toast.as_ref()
    }

    // ---------------------------
    // Session
    // ---------------------------

    /// Pick up a session saved by an earlier login.
    pub fn restore_session(&mut self) -> AppResult<bool> {
        self.session = self.sessions.load()?;
        Ok(self.session.is_some())
    }

    /// Nothing is persisted when the backend rejects the credentials.
    pub fn login(&mut self, username: &str, password: &str) -> AppResult<BootstrapFailures> {
        let session = self.gateway.login(username, password)?;
        self.sessions.save(&session)?;
        self.audit("login", &session.username, "Logged in");
        self.session = Some(session);
        self.page = Page::Dashboard;
        Ok(self.start_session())
    }

    pub fn forgot_password(&mut self, username: Option<&str>, email: Option<&str>) -> AppResult<String> {
        let message = self
            .gateway
            .forgot_password(username, email)?
            .unwrap_or_else(|| RESET_SENT_MESSAGE.to_string());
        self.show_toast(message.clone());
        Ok(message)
    }

    /// Returns false when nobody was logged in.
    pub fn logout(&mut self) -> AppResult<bool> {
        let had_session = self.sessions.clear()?;
        if let Some(s) = self.session.take() {
            self.audit("logout", &s.username, "Logged out");
        }
        for wf in self.workflows.values_mut() {
            wf.cancel();
            wf.dismiss();
            wf.set_items(Vec::new());
        }
        self.page = Page::Dashboard;
        self.toast = None;
        Ok(had_session)
    }

    /// Fetch every collection concurrently. A failed list leaves that
    /// collection empty.
    pub fn start_session(&mut self) -> BootstrapFailures {
        let gateway = &self.gateway;
        let results: Vec<(EntityKind, AppResult<Collection>)> = std::thread::scope(|s| {
            let handles: Vec<_> = EntityKind::ALL
                .into_iter()
                .map(|kind| (kind, s.spawn(move || gateway.list(kind))))
                .collect();
            handles
                .into_iter()
                .map(|(kind, h)| {
                    let res = h
                        .join()
                        .unwrap_or_else(|_| Err(AppError::Other(format!("{kind} list panicked"))));
                    (kind, res)
                })
                .collect()
        });

        let mut failures = Vec::new();
        for (kind, res) in results {
            let items = match res {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(entity = %kind, error = %e, "initial list failed");
                    failures.push((kind, e));
                    Vec::new()
                }
            };
            if let Some(wf) = self.workflows.get_mut(&kind) {
                wf.set_items(items);
            }
        }
        failures
    }

    // ---------------------------
    // Navigation
    // ---------------------------

    pub fn navigate(&mut self, key: &str) -> AppResult<Page> {
        let page = Page::from_key(key)?;
        if page == Page::Profile {
            self.profile.load(&self.gateway)?;
        }
        self.page = page;
        Ok(page)
    }

    pub fn dashboard(&self) -> DashboardStats {
        let count = |kind: EntityKind| self.workflows.get(&kind).map_or(0, |wf| wf.items().len());
        DashboardStats {
            users: count(EntityKind::Users),
            trucks: count(EntityKind::Trucks),
            locations: count(EntityKind::Locations),
            entries: count(EntityKind::Entries),
        }
    }

    pub fn workflow(&self, kind: EntityKind) -> AppResult<&EntityWorkflow> {
        self.workflows
            .get(&kind)
            .ok_or_else(|| AppError::UnknownPage(kind.to_string()))
    }

    pub fn workflow_mut(&mut self, kind: EntityKind) -> AppResult<&mut EntityWorkflow> {
        self.workflows
            .get_mut(&kind)
            .ok_or_else(|| AppError::UnknownPage(kind.to_string()))
    }

    pub fn profile_editor(&self) -> &ProfileEditor {
        &self.profile
    }

    pub fn profile_editor_mut(&mut self) -> &mut ProfileEditor {
        &mut self.profile
    }

    // ---------------------------
    // Mutations
    // ---------------------------

    pub fn submit(&mut self, kind: EntityKind) -> AppResult<SubmitOutcome> {
        let wf = self
            .workflows
            .get_mut(&kind)
            .ok_or_else(|| AppError::UnknownPage(kind.to_string()))?;
        let id = wf.form().and_then(|f| f.draft.id);
        let outcome = wf.submit(&self.gateway)?;

        if outcome == SubmitOutcome::Saved {
            let message = match id {
                Some(id) => format!("Updated ID {id}"),
                None => "Created record".to_string(),
            };
            self.audit("save", kind.as_str(), &message);
            self.show_toast(format!("{kind} saved"));
        }
        Ok(outcome)
    }

    /// Run the pending delete/toggle of `kind`, if any.
    pub fn confirm(&mut self, kind: EntityKind) -> AppResult<Option<ActionOutcome>> {
        let wf = self
            .workflows
            .get_mut(&kind)
            .ok_or_else(|| AppError::UnknownPage(kind.to_string()))?;
        let outcome = wf.confirm(&self.gateway);

        match &outcome {
            Some(ActionOutcome::Deleted(id)) => {
                self.audit("delete", kind.as_str(), &format!("Deleted ID {id}"));
                self.show_toast(format!("{kind} deleted"));
            }
            Some(ActionOutcome::Toggled { id, enabled }) => {
                let state = if *enabled { "Enabled" } else { "Disabled" };
                self.audit("toggle", kind.as_str(), &format!("{state} ID {id}"));
                self.show_toast(format!("{kind} status updated"));
            }
            _ => {}
        }
        Ok(outcome)
    }

    pub fn save_profile(&mut self) -> SubmitOutcome {
        let outcome = self.profile.submit(&self.gateway);
        if outcome == SubmitOutcome::Saved {
            let who = self.profile.profile().username.clone();
            self.audit("profile", &who, "Updated profile");
            self.show_toast("Profile updated");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::kv::KvStore;
    use crate::db::log::load_log;
    use crate::db::pool::DbPool;
    use crate::gateway::MockServer;
    use std::sync::{Arc, Mutex};

    fn shell_with_ttl(ttl: Duration) -> (Shell, SharedStore) {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let store: SharedStore = Arc::new(Mutex::new(KvStore::new(pool)));
        let gateway = Gateway::new(MockServer::new(store.clone()));
        (Shell::new(gateway, store.clone(), ttl).unwrap(), store)
    }

    fn shell() -> (Shell, SharedStore) {
        shell_with_ttl(Duration::from_millis(DEFAULT_TOAST_MS))
    }

    #[test]
    fn page_keys_round_trip() {
        for key in Page::KEYS {
            assert_eq!(Page::from_key(key).unwrap().key(), key);
        }
        assert!(matches!(
            Page::from_key("reports"),
            Err(AppError::UnknownPage(_))
        ));
    }

    #[test]
    fn login_persists_session_and_loads_collections() {
        let (mut sh, store) = shell();
        let failures = sh.login("admin", "secret").unwrap();
        assert!(failures.is_empty());
        assert_eq!(sh.require_session().unwrap().username, "admin");
        assert_eq!(
            sh.dashboard(),
            DashboardStats {
                users: 1,
                trucks: 1,
                locations: 1,
                entries: 1
            }
        );

        let mut other = Shell::new(
            Gateway::new(MockServer::new(store.clone())),
            store,
            Duration::from_millis(10),
        )
        .unwrap();
        assert!(other.restore_session().unwrap());
        assert_eq!(other.session().unwrap().username, "admin");
    }

    #[test]
    fn rejected_login_leaves_no_session() {
        let (mut sh, _store) = shell();
        let err = sh.login("", "secret").unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(sh.session().is_none());
        assert!(!sh.restore_session().unwrap());
        assert!(matches!(sh.require_session(), Err(AppError::NotLoggedIn)));
    }

    #[test]
    fn logout_clears_everything() {
        let (mut sh, _store) = shell();
        sh.login("admin", "x").unwrap();
        assert!(sh.logout().unwrap());
        assert!(sh.session().is_none());
        assert_eq!(sh.dashboard(), DashboardStats::default());
        assert!(!sh.logout().unwrap());
    }

    #[test]
    fn save_shows_toast_and_writes_audit_row() {
        let (mut sh, store) = shell();
        sh.login("admin", "x").unwrap();

        let wf = sh.workflow_mut(EntityKind::Trucks).unwrap();
        wf.open_create();
        wf.change("name", "Truck-200").unwrap();
        wf.change("number", "GJ05CD2002").unwrap();
        assert_eq!(sh.submit(EntityKind::Trucks).unwrap(), SubmitOutcome::Saved);

        assert_eq!(sh.active_toast().unwrap().message, "trucks saved");
        assert_eq!(sh.workflow(EntityKind::Trucks).unwrap().items().len(), 2);

        let kv = lock(&store).unwrap();
        let rows = load_log(kv.conn()).unwrap();
        assert!(rows.iter().any(|r| r.operation == "login"));
        assert!(rows.iter().any(|r| r.operation == "save" && r.target == "trucks"));
    }

    #[test]
    fn confirm_toggle_and_delete() {
        let (mut sh, _store) = shell();
        sh.login("admin", "x").unwrap();

        sh.workflow_mut(EntityKind::Users).unwrap().request_toggle(1).unwrap();
        assert_eq!(
            sh.confirm(EntityKind::Users).unwrap(),
            Some(ActionOutcome::Toggled {
                id: 1,
                enabled: false
            })
        );
        assert_eq!(sh.active_toast().unwrap().message, "users status updated");

        sh.workflow_mut(EntityKind::Users).unwrap().request_delete(1).unwrap();
        assert_eq!(
            sh.confirm(EntityKind::Users).unwrap(),
            Some(ActionOutcome::Deleted(1))
        );
        assert_eq!(sh.dashboard().users, 0);
        assert_eq!(sh.confirm(EntityKind::Users).unwrap(), None);
    }

    #[test]
    fn toast_expires() {
        let (mut sh, _store) = shell_with_ttl(Duration::ZERO);
        sh.forgot_password(Some("admin"), None).unwrap();
        assert!(sh.active_toast().is_none());
    }

    #[test]
    fn forgot_password_message() {
        let (mut sh, _store) = shell();
        let msg = sh.forgot_password(None, Some("admin@example.com")).unwrap();
        assert_eq!(msg, "Reset link sent to admin@example.com");
        assert_eq!(sh.active_toast().unwrap().message, msg);
    }

    #[test]
    fn navigate_to_profile_loads_it() {
        let (mut sh, _store) = shell();
        sh.login("admin", "x").unwrap();
        assert_eq!(sh.navigate("profile").unwrap(), Page::Profile);
        assert_eq!(sh.profile_editor().profile().mobile, "9999999999");
        assert!(sh.navigate("settings").is_err());
        assert_eq!(sh.page(), Page::Profile);
    }
}
