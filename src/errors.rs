//! Unified application error type.
//! All modules (db, gateway, core, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Store is unavailable: {0}")]
    StoreLock(String),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Transport errors
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API server unreachable: {0}")]
    Unreachable(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    // ---------------------------
    // Session / auth
    // ---------------------------
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in. Run `truckhisab login` first")]
    NotLoggedIn,

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("No {entity} record with ID {id}")]
    RecordNotFound { entity: String, id: u64 },

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Duplicate field '{0}' in schema")]
    DuplicateField(String),

    #[error("Unknown page '{0}'")]
    UnknownPage(String),

    #[error("Invalid assignment '{0}' (expected key=value)")]
    InvalidAssignment(String),

    #[error("No form is open")]
    NoActiveForm,

    #[error("{0} field(s) need attention")]
    InvalidForm(usize),

    #[error("No free ID left in {0}")]
    IdExhausted(String),

    #[error("{0}")]
    Rejected(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True when the failure means the remote backend could not be reached,
    /// as opposed to the backend answering with an error.
    pub fn is_unreachable(&self) -> bool {
        match self {
            AppError::Unreachable(_) => true,
            AppError::Http(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
