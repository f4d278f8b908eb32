use crate::app::build_shell;
use crate::cli::commands::report_failures;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::ui::prompt::read_value;

/// Handle `login`. Missing credentials are prompted for.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Login { username, password } = cmd else {
        return Ok(());
    };

    let username = match username {
        Some(u) => u.clone(),
        None => read_value("Username", "")?.ok_or(AppError::InvalidCredentials)?,
    };
    let password = match password {
        Some(p) => p.clone(),
        None => read_value("Password", "")?.ok_or(AppError::InvalidCredentials)?,
    };

    let mut shell = build_shell(cfg)?;
    let failures = shell.login(username.trim(), &password)?;
    let who = shell.require_session()?.username.clone();
    success(format!("Logged in as {who}"));
    report_failures(&failures);
    Ok(())
}
