//! Generic list + form + confirmation workflow shared by all entity pages.
//!
//! ```text
//! Idle --open_create/open_edit--> Editing --cancel--> Idle
//! Editing --submit (invalid)--> Editing, field errors shown
//! Editing --submit (save fails)--> Editing, submit error shown
//! Editing --submit (saved)--> Idle
//! Idle --request_delete/request_toggle--> Confirming --confirm/dismiss--> Idle
//! ```
//!
//! The workflow owns its copy of the collection and replaces it with every
//! gateway response. Gateway failures are turned into messages here and
//! never escape to the caller.

use crate::errors::{AppError, AppResult};
use crate::gateway::Gateway;
use crate::models::record::{Draft, find};
use crate::models::{Collection, EntityKind, Record};
use crate::pages::EntityPage;
use crate::utils::table::Table;
use std::collections::BTreeMap;

pub const SAVE_FALLBACK_MESSAGE: &str = "Unable to save record";
pub const ACTION_FALLBACK_MESSAGE: &str = "Unable to update record";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityForm {
    pub mode: FormMode,
    pub draft: Draft,
    pub errors: BTreeMap<String, String>,
    pub submit_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Delete,
    Toggle { enable: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub action: ConfirmAction,
    pub id: u64,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Editing,
    Confirming,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    Invalid(BTreeMap<String, String>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Deleted(u64),
    Toggled { id: u64, enabled: bool },
    Failed(String),
}

fn display_message(err: &AppError, fallback: &str) -> String {
    let msg = err.to_string();
    if msg.trim().is_empty() {
        fallback.to_string()
    } else {
        msg
    }
}

pub struct EntityWorkflow {
    page: EntityPage,
    items: Collection,
    form: Option<EntityForm>,
    confirm: Option<Confirmation>,
}

impl EntityWorkflow {
    pub fn new(page: EntityPage) -> Self {
        Self {
            page,
            items: Vec::new(),
            form: None,
            confirm: None,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.page.kind
    }

    pub fn page(&self) -> &EntityPage {
        &self.page
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    /// Replace the whole collection with an authoritative response.
    pub fn set_items(&mut self, items: Collection) {
        self.items = items;
    }

    pub fn form(&self) -> Option<&EntityForm> {
        self.form.as_ref()
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirm.as_ref()
    }

    pub fn state(&self) -> WorkflowState {
        if self.form.is_some() {
            WorkflowState::Editing
        } else if self.confirm.is_some() {
            WorkflowState::Confirming
        } else {
            WorkflowState::Idle
        }
    }

    /// "Add Truck" / "Edit Truck"
    pub fn form_title(&self) -> Option<String> {
        self.form.as_ref().map(|f| match f.mode {
            FormMode::Add => format!("Add {}", self.page.label),
            FormMode::Edit => format!("Edit {}", self.page.label),
        })
    }

    fn record(&self, id: u64) -> AppResult<&Record> {
        find(&self.items, id).ok_or_else(|| AppError::RecordNotFound {
            entity: self.page.kind.to_string(),
            id,
        })
    }

    // ---------------------------
    // Form
    // ---------------------------

    /// Fresh empty draft for every schema field.
    pub fn open_create(&mut self) {
        self.form = Some(EntityForm {
            mode: FormMode::Add,
            draft: Draft::empty(self.page.schema.keys()),
            errors: BTreeMap::new(),
            submit_error: None,
        });
    }

    /// Draft seeded with a copy of record `id`.
    pub fn open_edit(&mut self, id: u64) -> AppResult<()> {
        let mut draft = Draft::from_record(self.record(id)?);
        for key in self.page.schema.keys() {
            draft.values.entry(key.to_string()).or_default();
        }
        self.form = Some(EntityForm {
            mode: FormMode::Edit,
            draft,
            errors: BTreeMap::new(),
            submit_error: None,
        });
        Ok(())
    }

    /// Update one draft field and re-validate just that field.
    /// Returns the field's error message, if any.
    pub fn change(&mut self, key: &str, value: &str) -> AppResult<Option<String>> {
        if !self.page.schema.contains(key) {
            return Err(AppError::UnknownField(key.to_string()));
        }
        let form = self.form.as_mut().ok_or(AppError::NoActiveForm)?;
        form.draft.values.insert(key.to_string(), value.to_string());

        let error = self.page.schema.validate_field(key, value);
        match &error {
            Some(msg) => form.errors.insert(key.to_string(), msg.clone()),
            None => form.errors.remove(key),
        };
        Ok(error)
    }

    pub fn cancel(&mut self) {
        self.form = None;
    }

    /// Validate everything, then save. Invalid drafts never reach the gateway.
    pub fn submit(&mut self, gateway: &Gateway) -> AppResult<SubmitOutcome> {
        let form = self.form.as_mut().ok_or(AppError::NoActiveForm)?;
        form.submit_error = None;

        let errors = self.page.schema.validate_all(|k| form.draft.value(k));
        if !errors.is_empty() {
            form.errors = errors.clone();
            return Ok(SubmitOutcome::Invalid(errors));
        }
        form.errors.clear();

        match gateway.save(self.page.kind, &form.draft) {
            Ok(updated) => {
                self.items = updated;
                self.form = None;
                Ok(SubmitOutcome::Saved)
            }
            Err(e) => {
                tracing::warn!(entity = %self.page.kind, error = %e, "save failed");
                let msg = display_message(&e, SAVE_FALLBACK_MESSAGE);
                form.submit_error = Some(msg.clone());
                Ok(SubmitOutcome::Failed(msg))
            }
        }
    }

    // ---------------------------
    // Delete / toggle
    // ---------------------------

    pub fn request_delete(&mut self, id: u64) -> AppResult<&Confirmation> {
        self.record(id)?;
        Ok(&*self.confirm.insert(Confirmation {
            action: ConfirmAction::Delete,
            id,
            title: "Delete record?".into(),
            message: format!("Are you sure you want to delete ID {id}?"),
        }))
    }

    pub fn request_toggle(&mut self, id: u64) -> AppResult<&Confirmation> {
        let enable = !self.record(id)?.enabled;
        let verb = if enable { "enable" } else { "disable" };
        let title = if enable { "Enable record?" } else { "Disable record?" };
        Ok(&*self.confirm.insert(Confirmation {
            action: ConfirmAction::Toggle { enable },
            id,
            title: title.into(),
            message: format!("Do you want to {verb} ID {id}?"),
        }))
    }

    pub fn dismiss(&mut self) {
        self.confirm = None;
    }

    /// Run the pending action. `None` when nothing was awaiting confirmation.
    pub fn confirm(&mut self, gateway: &Gateway) -> Option<ActionOutcome> {
        let pending = self.confirm.take()?;
        let kind = self.page.kind;

        let result = match pending.action {
            ConfirmAction::Delete => gateway.delete(kind, pending.id),
            ConfirmAction::Toggle { .. } => gateway.toggle(kind, pending.id),
        };

        let outcome = match result {
            Ok(updated) => {
                self.items = updated;
                match pending.action {
                    ConfirmAction::Delete => ActionOutcome::Deleted(pending.id),
                    ConfirmAction::Toggle { enable } => ActionOutcome::Toggled {
                        id: pending.id,
                        enabled: find(&self.items, pending.id).map_or(enable, |r| r.enabled),
                    },
                }
            }
            Err(e) => {
                tracing::warn!(entity = %kind, id = pending.id, error = %e, "action failed");
                ActionOutcome::Failed(display_message(&e, ACTION_FALLBACK_MESSAGE))
            }
        };
        Some(outcome)
    }

    // ---------------------------
    // Table
    // ---------------------------

    /// `id`, every schema key, `enabled`, in that order.
    pub fn columns(&self) -> Vec<String> {
        std::iter::once("id")
            .chain(self.page.schema.keys())
            .chain(std::iter::once("enabled"))
            .map(str::to_string)
            .collect()
    }

    pub fn table(&self) -> Table {
        let columns = self.columns();
        let mut table = Table::new(columns.iter().cloned().chain(std::iter::once("actions".to_string())));
        for rec in &self.items {
            let mut row: Vec<String> = columns.iter().map(|c| rec.cell(c)).collect();
            let toggle = if rec.enabled { "disable" } else { "enable" };
            row.push(format!("edit | {toggle} | delete"));
            table.add_row(row);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Transport;
    use crate::gateway::endpoint::Endpoint;
    use crate::pages::entity_page;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    /// In-memory backend that records every call and can be told to fail.
    #[derive(Clone, Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<(String, Value)>>>,
        items: Arc<Mutex<Vec<Record>>>,
        fail: Option<&'static str>,
    }

    impl Transport for Recorder {
        fn post(&self, endpoint: Endpoint, payload: Value) -> AppResult<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint.path(), payload.clone()));
            if let Some(msg) = self.fail {
                return Err(AppError::Other(msg.into()));
            }
            let mut items = self.items.lock().unwrap();
            let current = std::mem::take(&mut *items);
            let kind = EntityKind::Trucks;
            let path = endpoint.path();
            let updated = if path.ends_with("/save") {
                crate::gateway::fallback::upsert(current, kind, serde_json::from_value(payload)?)?
            } else if path.ends_with("/delete") {
                crate::gateway::fallback::remove(current, kind, payload["id"].as_u64().unwrap())?
            } else if path.ends_with("/toggle") {
                crate::gateway::fallback::toggle(current, kind, payload["id"].as_u64().unwrap())?
            } else {
                current
            };
            *items = updated.clone();
            Ok(serde_json::to_value(updated)?)
        }
    }

    fn seeded() -> Vec<Record> {
        vec![Record::new(1).with("name", "Truck-100").with("number", "GJ01AB1001")]
    }

    fn setup(fail: Option<&'static str>) -> (EntityWorkflow, Gateway, Recorder) {
        let rec = Recorder {
            fail,
            ..Recorder::default()
        };
        *rec.items.lock().unwrap() = seeded();
        let mut wf = EntityWorkflow::new(entity_page(EntityKind::Trucks).unwrap());
        wf.set_items(seeded());
        (wf, Gateway::new(rec.clone()), rec)
    }

    #[test]
    fn open_create_resets_previous_draft() {
        let (mut wf, _, _) = setup(None);
        wf.open_create();
        wf.change("name", "half typed").unwrap();
        wf.change("number", "X").unwrap();
        wf.cancel();
        wf.open_create();
        let form = wf.form().unwrap();
        assert_eq!(form.draft.value("name"), "");
        assert!(form.errors.is_empty());
        assert_eq!(form.mode, FormMode::Add);
    }

    #[test]
    fn change_validates_only_that_field() {
        let (mut wf, _, _) = setup(None);
        wf.open_create();
        let err = wf.change("number", "X").unwrap();
        assert_eq!(err.as_deref(), Some("Must be 6-15 letters/numbers"));
        let form = wf.form().unwrap();
        assert_eq!(form.errors.len(), 1);
        assert!(wf.change("number", "ABC1234567").unwrap().is_none());
        assert!(wf.form().unwrap().errors.is_empty());
    }

    #[test]
    fn change_outside_a_form_or_schema_fails() {
        let (mut wf, _, _) = setup(None);
        assert!(matches!(wf.change("name", "x"), Err(AppError::NoActiveForm)));
        wf.open_create();
        assert!(matches!(wf.change("colour", "x"), Err(AppError::UnknownField(_))));
    }

    #[test]
    fn invalid_submit_never_calls_save() {
        let (mut wf, gw, rec) = setup(None);
        wf.open_create();
        wf.change("name", "T1").unwrap();
        let out = wf.submit(&gw).unwrap();
        match out {
            SubmitOutcome::Invalid(errors) => {
                assert_eq!(errors["number"], "Truck Number is required");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(rec.calls.lock().unwrap().is_empty());
        assert_eq!(wf.state(), WorkflowState::Editing);
    }

    #[test]
    fn valid_create_appends_with_next_id() {
        let (mut wf, gw, _) = setup(None);
        wf.open_create();
        wf.change("name", "T1").unwrap();
        wf.change("number", "ABC1234567").unwrap();
        assert_eq!(wf.submit(&gw).unwrap(), SubmitOutcome::Saved);
        assert_eq!(wf.state(), WorkflowState::Idle);
        assert_eq!(wf.items().len(), 2);
        let new = &wf.items()[1];
        assert_eq!(new.id, Some(2));
        assert!(new.enabled);
        assert_eq!(new.value("name"), "T1");
    }

    #[test]
    fn short_number_on_edit_blocks_submission() {
        let (mut wf, gw, rec) = setup(None);
        wf.open_edit(1).unwrap();
        wf.change("number", "X").unwrap();
        let out = wf.submit(&gw).unwrap();
        assert!(matches!(out, SubmitOutcome::Invalid(ref e) if e["number"] == "Must be 6-15 letters/numbers"));
        assert_eq!(wf.items()[0].value("number"), "GJ01AB1001");
        assert!(rec.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn save_failure_keeps_form_open_with_message() {
        let (mut wf, gw, _) = setup(Some("backend exploded"));
        wf.open_edit(1).unwrap();
        wf.change("name", "Renamed").unwrap();
        let out = wf.submit(&gw).unwrap();
        assert_eq!(out, SubmitOutcome::Failed("Internal error: backend exploded".into()));
        let form = wf.form().unwrap();
        assert_eq!(form.draft.value("name"), "Renamed");
        assert!(form.submit_error.is_some());
        assert_eq!(wf.items()[0].value("name"), "Truck-100");
    }

    #[test]
    fn edit_draft_is_independent_of_the_list() {
        let (mut wf, _, _) = setup(None);
        wf.open_edit(1).unwrap();
        wf.change("name", "Other").unwrap();
        assert_eq!(wf.items()[0].value("name"), "Truck-100");
        wf.cancel();
        assert_eq!(wf.state(), WorkflowState::Idle);
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut wf, gw, rec) = setup(None);
        let c = wf.request_delete(1).unwrap();
        assert_eq!(c.message, "Are you sure you want to delete ID 1?");
        assert_eq!(wf.state(), WorkflowState::Confirming);
        assert!(rec.calls.lock().unwrap().is_empty());

        wf.dismiss();
        assert_eq!(wf.confirm(&gw), None);
        assert_eq!(wf.items().len(), 1);

        wf.request_delete(1).unwrap();
        assert_eq!(wf.confirm(&gw), Some(ActionOutcome::Deleted(1)));
        assert!(wf.items().is_empty());
    }

    #[test]
    fn toggle_wording_follows_current_state() {
        let (mut wf, gw, _) = setup(None);
        assert_eq!(wf.request_toggle(1).unwrap().title, "Disable record?");
        assert_eq!(
            wf.confirm(&gw),
            Some(ActionOutcome::Toggled { id: 1, enabled: false })
        );
        let c = wf.request_toggle(1).unwrap();
        assert_eq!(c.message, "Do you want to enable ID 1?");
        wf.confirm(&gw);
        assert!(wf.items()[0].enabled);
    }

    #[test]
    fn unknown_id_cannot_be_requested() {
        let (mut wf, _, _) = setup(None);
        assert!(wf.request_delete(42).is_err());
        assert!(wf.open_edit(42).is_err());
        assert_eq!(wf.state(), WorkflowState::Idle);
    }

    #[test]
    fn failed_action_is_reported_not_raised() {
        let (mut wf, gw, _) = setup(Some("offline"));
        wf.request_toggle(1).unwrap();
        assert!(matches!(wf.confirm(&gw), Some(ActionOutcome::Failed(_))));
        assert!(wf.items()[0].enabled);
        assert_eq!(wf.state(), WorkflowState::Idle);
    }

    #[test]
    fn table_has_fixed_column_order() {
        let (wf, _, _) = setup(None);
        let t = wf.table();
        assert_eq!(t.headers(), ["id", "name", "number", "enabled", "actions"]);
        assert_eq!(t.rows()[0][..4], ["1", "Truck-100", "GJ01AB1001", "true"]);
    }

    #[test]
    fn save_payload_for_new_record_has_no_id() {
        let (mut wf, gw, rec) = setup(None);
        wf.open_create();
        wf.change("name", "T1").unwrap();
        wf.change("number", "ABC1234567").unwrap();
        wf.submit(&gw).unwrap();
        let calls = rec.calls.lock().unwrap();
        assert_eq!(calls[0].0, "/trucks/save");
        assert_eq!(calls[0].1, json!({"name": "T1", "number": "ABC1234567"}));
    }
}
