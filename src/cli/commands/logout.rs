use crate::app::build_shell;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut shell = build_shell(cfg)?;
    let who = shell.require_session()?.username.clone();
    shell.logout()?;
    success(format!("Logged out {who}"));
    Ok(())
}
