use crate::app::build_shell;
use crate::cli::commands::show_toast;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::prompt::read_value;

/// Handle `forgot-password`. Without flags the username or email is prompted for.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::ForgotPassword { username, email } = cmd else {
        return Ok(());
    };

    let (username, email) = match (username, email) {
        (None, None) => {
            let who = read_value("Username or email", "")?.unwrap_or_default();
            let who = who.trim().to_string();
            if who.contains('@') {
                (None, Some(who))
            } else {
                (Some(who), None)
            }
        }
        (u, e) => (u.clone(), e.clone()),
    };

    let mut shell = build_shell(cfg)?;
    shell.forgot_password(username.as_deref(), email.as_deref())?;
    show_toast(&mut shell);
    Ok(())
}
