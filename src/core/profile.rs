//! Single-record editor for the logged-in user's profile.

use crate::core::schema::FormSchema;
use crate::core::workflow::SubmitOutcome;
use crate::errors::{AppError, AppResult};
use crate::gateway::Gateway;
use crate::models::Profile;
use crate::pages;
use std::collections::BTreeMap;

pub const PROFILE_FALLBACK_MESSAGE: &str = "Unable to save profile";

pub struct ProfileEditor {
    schema: FormSchema,
    profile: Profile,
    errors: BTreeMap<String, String>,
    submit_error: Option<String>,
}

impl ProfileEditor {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            schema: pages::profile::schema()?,
            profile: Profile::default(),
            errors: BTreeMap::new(),
            submit_error: None,
        })
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Fetch the stored profile and clear any previous messages.
    pub fn load(&mut self, gateway: &Gateway) -> AppResult<()> {
        self.profile = gateway.profile()?;
        self.errors.clear();
        self.submit_error = None;
        Ok(())
    }

    pub fn change(&mut self, key: &str, value: &str) -> AppResult<Option<String>> {
        if !self.profile.set(key, value) {
            return Err(AppError::UnknownField(key.to_string()));
        }
        let error = self.schema.validate_field(key, value);
        match &error {
            Some(msg) => self.errors.insert(key.to_string(), msg.clone()),
            None => self.errors.remove(key),
        };
        Ok(error)
    }

    pub fn submit(&mut self, gateway: &Gateway) -> SubmitOutcome {
        self.submit_error = None;
        let profile = &self.profile;
        let errors = self
            .schema
            .validate_all(|k| profile.get(k).unwrap_or_default());
        self.errors = errors.clone();
        if !errors.is_empty() {
            return SubmitOutcome::Invalid(errors);
        }

        match gateway.update_profile(&self.profile) {
            Ok(merged) => {
                self.profile = merged;
                SubmitOutcome::Saved
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile update failed");
                let msg = e.to_string();
                let msg = if msg.trim().is_empty() {
                    PROFILE_FALLBACK_MESSAGE.to_string()
                } else {
                    msg
                };
                self.submit_error = Some(msg.clone());
                SubmitOutcome::Failed(msg)
            }
        }
    }
}
