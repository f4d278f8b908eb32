use crate::cli::commands::{session_shell, show_toast};
use crate::cli::parser::{Commands, EntityCommand, parse_assignment};
use crate::config::Config;
use crate::core::shell::Shell;
use crate::core::workflow::{ActionOutcome, EntityWorkflow, SubmitOutcome};
use crate::errors::{AppError, AppResult};
use crate::models::EntityKind;
use crate::ui::messages::{field_error, header, info, success, warning};
use crate::ui::prompt::{ask_confirmation, read_value};
use crate::utils::colors::colorize_enabled;
use crate::utils::formatting::bold;
use crate::utils::table::Table;

/// Handle `users|trucks|locations|entries|history [action]`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Some((kind, action)) = cmd.entity() else {
        return Ok(());
    };
    let mut shell = session_shell(cfg)?;

    match action.cloned().unwrap_or(EntityCommand::List) {
        EntityCommand::List => {
            print_list(shell.workflow(kind)?, cfg);
            Ok(())
        }
        EntityCommand::Add { set } => {
            shell.workflow_mut(kind)?.open_create();
            fill_form(&mut shell, kind, &set)?;
            submit(&mut shell, kind)
        }
        EntityCommand::Edit { id, set } => {
            shell.workflow_mut(kind)?.open_edit(id)?;
            fill_form(&mut shell, kind, &set)?;
            submit(&mut shell, kind)
        }
        EntityCommand::Delete { id, yes } => {
            shell.workflow_mut(kind)?.request_delete(id)?;
            confirm(&mut shell, kind, yes || !cfg.confirm_actions)
        }
        EntityCommand::Toggle { id, yes } => {
            shell.workflow_mut(kind)?.request_toggle(id)?;
            confirm(&mut shell, kind, yes || !cfg.confirm_actions)
        }
    }
}

pub fn print_list(wf: &EntityWorkflow, cfg: &Config) {
    header(wf.page().title);
    if wf.items().is_empty() {
        info("No records found.");
        return;
    }

    let table = wf.table();
    let enabled_col = table.headers().iter().position(|h| h == "enabled");
    let mut colored = Table::new(table.headers().to_vec());
    for row in table.rows() {
        let mut row = row.clone();
        if let Some(cell) = enabled_col.and_then(|c| row.get_mut(c)) {
            *cell = colorize_enabled(*cell == "true");
        }
        colored.add_row(row);
    }
    print!("{}", colored.render(cfg.separator()));
}

/// Apply `--set` assignments, or prompt for every field when none are given.
fn fill_form(shell: &mut Shell, kind: EntityKind, set: &[String]) -> AppResult<()> {
    let wf = shell.workflow_mut(kind)?;

    if !set.is_empty() {
        for raw in set {
            let (key, value) = parse_assignment(raw)?;
            if let Some(msg) = wf.change(&key, &value)? {
                field_error(label_of(wf, &key), &msg);
            }
        }
        return Ok(());
    }

    if let Some(title) = wf.form_title() {
        header(title);
    }
    let fields: Vec<(String, String)> = wf
        .page()
        .schema
        .fields()
        .iter()
        .map(|f| (f.key.clone(), f.label.clone()))
        .collect();

    for (key, label) in fields {
        loop {
            let current = wf
                .form()
                .map(|f| f.draft.value(&key).to_string())
                .unwrap_or_default();
            let Some(value) = read_value(&label, &current)? else {
                wf.cancel();
                return Err(AppError::Rejected("Cancelled".into()));
            };
            match wf.change(&key, &value)? {
                Some(msg) => field_error(&label, &msg),
                None => break,
            }
        }
    }
    Ok(())
}

fn label_of<'a>(wf: &'a EntityWorkflow, key: &'a str) -> &'a str {
    wf.page()
        .schema
        .field(key)
        .map_or(key, |f| f.label.as_str())
}

fn submit(shell: &mut Shell, kind: EntityKind) -> AppResult<()> {
    match shell.submit(kind)? {
        SubmitOutcome::Saved => {
            show_toast(shell);
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            let wf = shell.workflow(kind)?;
            for (key, msg) in &errors {
                field_error(label_of(wf, key), msg);
            }
            Err(AppError::InvalidForm(errors.len()))
        }
        SubmitOutcome::Failed(msg) => Err(AppError::Rejected(msg)),
    }
}

fn confirm(shell: &mut Shell, kind: EntityKind, skip_prompt: bool) -> AppResult<()> {
    let wf = shell.workflow_mut(kind)?;
    let Some(pending) = wf.confirmation().cloned() else {
        return Ok(());
    };

    if !skip_prompt && !ask_confirmation(&bold(&pending.title), &pending.message) {
        wf.dismiss();
        warning("Cancelled.");
        return Ok(());
    }

    match shell.confirm(kind)? {
        Some(ActionOutcome::Deleted(id)) => {
            success(format!("Deleted ID {id}"));
            show_toast(shell);
            Ok(())
        }
        Some(ActionOutcome::Toggled { id, enabled }) => {
            let state = if enabled { "enabled" } else { "disabled" };
            success(format!("ID {id} is now {state}"));
            show_toast(shell);
            Ok(())
        }
        Some(ActionOutcome::Failed(msg)) => Err(AppError::Rejected(msg)),
        None => Ok(()),
    }
}
