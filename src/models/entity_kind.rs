use serde::{Deserialize, Serialize};
use std::fmt;

/// The five record kinds managed through the CRUD workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Users,
    Trucks,
    Locations,
    Entries,
    History,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Users,
        EntityKind::Trucks,
        EntityKind::Locations,
        EntityKind::Entries,
        EntityKind::History,
    ];

    /// Key used in endpoints, page routing and the fallback dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Trucks => "trucks",
            EntityKind::Locations => "locations",
            EntityKind::Entries => "entries",
            EntityKind::History => "history",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "users" => Some(EntityKind::Users),
            "trucks" => Some(EntityKind::Trucks),
            "locations" => Some(EntityKind::Locations),
            "entries" => Some(EntityKind::Entries),
            "history" => Some(EntityKind::History),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
