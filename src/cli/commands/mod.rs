//! One handler per top-level command, plus the shell setup they share.

pub mod config;
pub mod entity;
pub mod forgot;
pub mod init;
pub mod log;
pub mod login;
pub mod logout;
pub mod profile;
pub mod show;

use crate::app::build_shell;
use crate::config::Config;
use crate::core::shell::{BootstrapFailures, Shell};
use crate::errors::AppResult;
use crate::ui::messages::{toast, warning};

/// Shell for a logged-in command, with every collection fetched.
pub(crate) fn session_shell(cfg: &Config) -> AppResult<Shell> {
    let mut shell = build_shell(cfg)?;
    shell.require_session()?;
    let failures = shell.start_session();
    report_failures(&failures);
    Ok(shell)
}

pub(crate) fn report_failures(failures: &BootstrapFailures) {
    for (kind, err) in failures {
        warning(format!("Could not load {kind}: {err}"));
    }
}

pub(crate) fn show_toast(shell: &mut Shell) {
    if let Some(t) = shell.active_toast() {
        toast(&t.message);
    }
}
