use crate::models::EntityKind;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityAction {
    List,
    Save,
    Delete,
    Toggle,
}

impl EntityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityAction::List => "list",
            EntityAction::Save => "save",
            EntityAction::Delete => "delete",
            EntityAction::Toggle => "toggle",
        }
    }
}

/// Every request the front-end can make. All of them are `POST` with a JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    ForgotPassword,
    ProfileGet,
    ProfileUpdate,
    Entity(EntityKind, EntityAction),
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "/auth/login".into(),
            Endpoint::ForgotPassword => "/auth/forgot-password".into(),
            Endpoint::ProfileGet => "/profile/get".into(),
            Endpoint::ProfileUpdate => "/profile/update".into(),
            Endpoint::Entity(kind, action) => format!("/{}/{}", kind.as_str(), action.as_str()),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
