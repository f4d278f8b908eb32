use crate::errors::{AppError, AppResult};
use crate::utils::path::{expand_tilde, is_absolute};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub const DEFAULT_TOAST_MS: u64 = crate::core::shell::DEFAULT_TOAST_MS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: String,
    /// Remote API base URL. Without one every call is served locally.
    pub api_url: Option<String>,
    pub toast_ms: u64,
    pub confirm_actions: bool,
    pub log_level: String,
    pub separator_char: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            api_url: None,
            toast_ms: DEFAULT_TOAST_MS,
            confirm_actions: true,
            log_level: "warn".to_string(),
            separator_char: "-".to_string(),
        }
    }
}

impl Config {
    /// `~/.truckhisab` on every platform.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".truckhisab")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("truckhisab.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("truckhisab.sqlite")
    }

    /// Load the config file, or defaults when there is none. Missing keys
    /// take their default value.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Resolve a user supplied database name: absolute paths are kept,
    /// anything else lands in the config directory.
    pub fn resolve_database(name: &str) -> PathBuf {
        if is_absolute(name) || name.starts_with("~/") {
            expand_tilde(name)
        } else {
            Self::config_dir().join(name)
        }
    }

    /// Create the config directory and file. In test mode the config file
    /// is left alone. Returns the database path to initialize.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let db_path = match custom_db {
            Some(name) => Self::resolve_database(name),
            None => Self::database_file(),
        };

        if !is_test {
            fs::create_dir_all(Self::config_dir())?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let cfg: Config = serde_yaml::from_str("api_url: http://localhost:8080\n").unwrap();
        assert_eq!(cfg.api_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cfg.toast_ms, 1800);
        assert!(cfg.confirm_actions);
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.separator(), '-');
    }

    #[test]
    fn absolute_database_is_kept() {
        let p = if cfg!(windows) { "C:\\db\\th.sqlite" } else { "/tmp/th.sqlite" };
        assert_eq!(Config::resolve_database(p), PathBuf::from(p));
        assert!(Config::resolve_database("custom.sqlite").ends_with(".truckhisab/custom.sqlite"));
    }
}
