//! Declarative field validation.
//!
//! Each schema holds a map `field key -> [Validator]`. A value is trimmed
//! before checking; `Required` runs first and short-circuits the rest.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub const EMAIL_MESSAGE: &str = "Please enter a valid email";
pub const TRUCK_NUMBER_MESSAGE: &str = "Must be 6-15 letters/numbers";
pub const MOBILE_MESSAGE: &str = "Mobile must be 10 digits";

#[derive(Debug, Clone)]
pub enum Validator {
    Required,
    Email,
    Pattern { regex: Regex, message: String },
}

impl Validator {
    pub fn pattern(expr: &str, message: &str) -> Result<Self, regex::Error> {
        Ok(Validator::Pattern {
            regex: Regex::new(expr)?,
            message: message.to_string(),
        })
    }

    /// 6-15 alphanumeric or hyphen characters.
    pub fn truck_number() -> Self {
        Validator::Pattern {
            regex: Regex::new(r"^[A-Za-z0-9-]{6,15}$").expect("valid truck number regex"),
            message: TRUCK_NUMBER_MESSAGE.to_string(),
        }
    }

    /// Exactly ten ASCII digits.
    pub fn mobile() -> Self {
        Validator::Pattern {
            regex: Regex::new(r"^[0-9]{10}$").expect("valid mobile regex"),
            message: MOBILE_MESSAGE.to_string(),
        }
    }

    /// `value` must already be trimmed.
    pub fn check(&self, label: &str, value: &str) -> Result<(), String> {
        match self {
            Validator::Required if value.is_empty() => Err(format!("{label} is required")),
            Validator::Required => Ok(()),
            Validator::Email if EMAIL_RE.is_match(value) => Ok(()),
            Validator::Email => Err(EMAIL_MESSAGE.to_string()),
            Validator::Pattern { regex, .. } if regex.is_match(value) => Ok(()),
            Validator::Pattern { message, .. } => Err(message.clone()),
        }
    }
}

/// First failing validator's message, if any.
pub fn run(validators: &[Validator], label: &str, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        // Optional fields accept the empty string without running the rest.
        return validators
            .iter()
            .any(|v| matches!(v, Validator::Required))
            .then(|| format!("{label} is required"));
    }
    validators
        .iter()
        .find_map(|v| v.check(label, value).err())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Vec<Validator> {
        vec![Validator::Required, Validator::Email]
    }

    #[test]
    fn email_accepts_simple_address() {
        assert_eq!(run(&email(), "Email", "a@b.co"), None);
    }

    #[test]
    fn email_rejects_missing_tld_space_and_empty() {
        assert_eq!(run(&email(), "Email", "a@b").as_deref(), Some(EMAIL_MESSAGE));
        assert_eq!(run(&email(), "Email", "a b@c.com").as_deref(), Some(EMAIL_MESSAGE));
        assert_eq!(run(&email(), "Email", "").as_deref(), Some("Email is required"));
    }

    #[test]
    fn whitespace_only_is_empty() {
        let v = [Validator::Required];
        assert_eq!(run(&v, "Name", "   ").as_deref(), Some("Name is required"));
        assert_eq!(run(&v, "Name", " x "), None);
    }

    #[test]
    fn truck_number_bounds() {
        let v = [Validator::Required, Validator::truck_number()];
        assert_eq!(run(&v, "Truck Number", "X").as_deref(), Some(TRUCK_NUMBER_MESSAGE));
        assert_eq!(run(&v, "Truck Number", "ABC12").as_deref(), Some(TRUCK_NUMBER_MESSAGE));
        assert_eq!(run(&v, "Truck Number", "ABC123"), None);
        assert_eq!(run(&v, "Truck Number", "GJ-01-AB-1001"), None);
        assert_eq!(run(&v, "Truck Number", "ABCDEFGHIJKLMNOP").as_deref(), Some(TRUCK_NUMBER_MESSAGE));
        assert_eq!(run(&v, "Truck Number", "AB 1234").as_deref(), Some(TRUCK_NUMBER_MESSAGE));
    }

    #[test]
    fn mobile_requires_ten_digits() {
        let v = [Validator::Required, Validator::mobile()];
        assert_eq!(run(&v, "Mobile", "9999999999"), None);
        assert_eq!(run(&v, "Mobile", "99999").as_deref(), Some(MOBILE_MESSAGE));
        assert_eq!(run(&v, "Mobile", "99999x9999").as_deref(), Some(MOBILE_MESSAGE));
    }

    #[test]
    fn optional_pattern_field_may_be_blank() {
        let v = [Validator::pattern(r"^\d+$", "digits only").unwrap()];
        assert_eq!(run(&v, "Code", ""), None);
        assert_eq!(run(&v, "Code", "a").as_deref(), Some("digits only"));
    }
}
