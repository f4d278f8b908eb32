//! Interactive stdin prompts.

use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user. EOF counts as "no".
pub fn ask_confirmation(title: &str, prompt: &str) -> bool {
    warning(format!("{title} {prompt}"));
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// Read one line after printing `label`. Returns `None` on EOF.
pub fn read_value(label: &str, current: &str) -> AppResult<Option<String>> {
    if current.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{current}]: ");
    }
    io::stdout().flush()?;

    let mut s = String::new();
    if io::stdin().read_line(&mut s)? == 0 {
        return Ok(None);
    }
    let line = s.trim_end_matches(['\r', '\n']);
    // An empty answer keeps the current value.
    if line.is_empty() && !current.is_empty() {
        return Ok(Some(current.to_string()));
    }
    Ok(Some(line.to_string()))
}
