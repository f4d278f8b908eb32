use clap::{Parser, Subcommand};

/// Command-line interface definition for TruckHisab
/// Admin CLI for users, trucks, locations, truck entries and history
#[derive(Parser)]
#[command(
    name = "truckhisab",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small business-administration CLI: manage users, trucks, locations and truck entries",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the remote API base URL
    #[arg(global = true, long = "api-url")]
    pub api_url: Option<String>,

    /// Serve every request from the local store
    #[arg(global = true, long = "offline")]
    pub offline: bool,

    /// Show debug diagnostics on stderr
    #[arg(global = true, short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Log in and start a session
    Login {
        #[arg(long = "username", short = 'u')]
        username: Option<String>,

        #[arg(long = "password", short = 'p')]
        password: Option<String>,
    },

    /// Request a password reset link
    ForgotPassword {
        #[arg(long = "username", short = 'u', conflicts_with = "email")]
        username: Option<String>,

        #[arg(long = "email", short = 'e')]
        email: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show a page by key: dashboard, users, trucks, locations, entries, history, profile
    Show {
        #[arg(default_value = "dashboard")]
        page: String,
    },

    /// Manage users
    Users {
        #[command(subcommand)]
        action: Option<EntityCommand>,
    },

    /// Manage trucks
    Trucks {
        #[command(subcommand)]
        action: Option<EntityCommand>,
    },

    /// Manage locations
    Locations {
        #[command(subcommand)]
        action: Option<EntityCommand>,
    },

    /// Manage truck entries
    Entries {
        #[command(subcommand)]
        action: Option<EntityCommand>,
    },

    /// Manage the truck entry history
    History {
        #[command(subcommand)]
        action: Option<EntityCommand>,
    },

    /// View or update your profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileCommand>,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand, Clone)]
pub enum EntityCommand {
    /// List all records
    List,

    /// Create a record. Fields not given with --set are prompted for.
    Add {
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },

    /// Edit a record by ID. Without --set every field is prompted for.
    Edit {
        id: u64,

        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },

    /// Delete a record by ID
    Delete {
        id: u64,

        #[arg(long = "yes", short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Enable or disable a record by ID
    Toggle {
        id: u64,

        #[arg(long = "yes", short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Subcommand, Clone)]
pub enum ProfileCommand {
    /// Show the profile
    Show,

    /// Update profile fields. Without --set every field is prompted for.
    Update {
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
}

impl Commands {
    /// Entity kind and action for the five entity commands.
    pub fn entity(&self) -> Option<(crate::models::EntityKind, Option<&EntityCommand>)> {
        use crate::models::EntityKind;
        match self {
            Commands::Users { action } => Some((EntityKind::Users, action.as_ref())),
            Commands::Trucks { action } => Some((EntityKind::Trucks, action.as_ref())),
            Commands::Locations { action } => Some((EntityKind::Locations, action.as_ref())),
            Commands::Entries { action } => Some((EntityKind::Entries, action.as_ref())),
            Commands::History { action } => Some((EntityKind::History, action.as_ref())),
            _ => None,
        }
    }
}

/// Split `key=value`. The value may itself contain `=`.
pub fn parse_assignment(raw: &str) -> crate::errors::AppResult<(String, String)> {
    match raw.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => Err(crate::errors::AppError::InvalidAssignment(raw.to_string())),
    }
}
