use crate::cli::commands::{session_shell, show_toast};
use crate::cli::parser::{Commands, ProfileCommand, parse_assignment};
use crate::config::Config;
use crate::core::profile::ProfileEditor;
use crate::core::workflow::SubmitOutcome;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{field_error, header};
use crate::ui::prompt::read_value;
use crate::utils::colors::{RESET, color_for_optional_field};

/// Handle `profile [show|update]`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Profile { action } = cmd else {
        return Ok(());
    };
    let mut shell = session_shell(cfg)?;
    shell.navigate("profile")?;

    match action.clone().unwrap_or(ProfileCommand::Show) {
        ProfileCommand::Show => {
            print_profile(shell.profile_editor());
            Ok(())
        }
        ProfileCommand::Update { set } => {
            fill(shell.profile_editor_mut(), &set)?;
            match shell.save_profile() {
                SubmitOutcome::Saved => {
                    show_toast(&mut shell);
                    Ok(())
                }
                SubmitOutcome::Invalid(errors) => {
                    let editor = shell.profile_editor();
                    for (key, msg) in &errors {
                        field_error(label_of(editor, key), msg);
                    }
                    Err(AppError::InvalidForm(errors.len()))
                }
                SubmitOutcome::Failed(msg) => Err(AppError::Rejected(msg)),
            }
        }
    }
}

pub fn print_profile(editor: &ProfileEditor) {
    header("My Profile");
    let profile = editor.profile();
    for field in editor.schema().fields() {
        let value = profile.get(&field.key).unwrap_or_default();
        let color = color_for_optional_field(Some(value));
        println!("{:<10} {color}{}{RESET}", field.label, if value.is_empty() { "-" } else { value });
    }
}

fn label_of<'a>(editor: &'a ProfileEditor, key: &'a str) -> &'a str {
    editor.schema().field(key).map_or(key, |f| f.label.as_str())
}

fn fill(editor: &mut ProfileEditor, set: &[String]) -> AppResult<()> {
    if !set.is_empty() {
        for raw in set {
            let (key, value) = parse_assignment(raw)?;
            if let Some(msg) = editor.change(&key, &value)? {
                field_error(label_of(editor, &key), &msg);
            }
        }
        return Ok(());
    }

    let fields: Vec<(String, String)> = editor
        .schema()
        .fields()
        .iter()
        .map(|f| (f.key.clone(), f.label.clone()))
        .collect();

    for (key, label) in fields {
        loop {
            let current = editor.profile().get(&key).unwrap_or_default().to_string();
            let Some(value) = read_value(&label, &current)? else {
                return Err(AppError::Rejected("Cancelled".into()));
            };
            match editor.change(&key, &value)? {
                Some(msg) => field_error(&label, &msg),
                None => break,
            }
        }
    }
    Ok(())
}
