/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

/// Returns GREY when the field is empty, RESET otherwise.
pub fn color_for_optional_field<T: AsRef<str>>(value: Option<T>) -> &'static str {
    match value {
        Some(v) if !v.as_ref().trim().is_empty() => RESET,
        _ => GREY,
    }
}

/// Green for enabled records, red for disabled ones.
pub fn colorize_enabled(enabled: bool) -> String {
    if enabled {
        format!("{GREEN}enabled{RESET}")
    } else {
        format!("{RED}disabled{RESET}")
    }
}
