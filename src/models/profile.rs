use serde::{Deserialize, Serialize};

/// The logged-in user's own profile. Fixed keys, no `id`/`enabled`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub mobile: String,
}

impl Profile {
    /// Wire keys in display order.
    pub const KEYS: [&'static str; 4] = ["username", "fullName", "email", "mobile"];

    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "username" => Some(&self.username),
            "fullName" => Some(&self.full_name),
            "email" => Some(&self.email),
            "mobile" => Some(&self.mobile),
            _ => None,
        }
    }

    /// Returns false when `key` is not a profile field.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "username" => &mut self.username,
            "fullName" => &mut self.full_name,
            "email" => &mut self.email,
            "mobile" => &mut self.mobile,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}
