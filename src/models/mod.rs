pub mod entity_kind;
pub mod profile;
pub mod record;
pub mod session;

pub use entity_kind::EntityKind;
pub use profile::Profile;
pub use record::{Collection, Record};
pub use session::Session;
