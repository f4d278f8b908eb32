use crate::cli::commands::entity::print_list;
use crate::cli::commands::profile::print_profile;
use crate::cli::commands::session_shell;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::shell::{Page, Shell};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::formatting::bold;

/// Handle `show <page>`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Show { page } = cmd else {
        return Ok(());
    };
    // Reject unknown keys before touching the store.
    Page::from_key(page)?;

    let mut shell = session_shell(cfg)?;
    match shell.navigate(page)? {
        Page::Dashboard => print_dashboard(&shell),
        Page::Entity(kind) => print_list(shell.workflow(kind)?, cfg),
        Page::Profile => print_profile(shell.profile_editor()),
    }
    Ok(())
}

fn print_dashboard(shell: &Shell) {
    let stats = shell.dashboard();
    let who = shell.session().map_or("", |s| s.username.as_str());
    header(format!("Dashboard ({who})"));
    for (label, count) in [
        ("Users", stats.users),
        ("Trucks", stats.trucks),
        ("Locations", stats.locations),
        ("Entries", stats.entries),
    ] {
        println!("{:<10} {}", label, bold(&count.to_string()));
    }
}
