use super::EntityPage;
use crate::errors::AppResult;
use crate::models::EntityKind;

pub fn page() -> AppResult<EntityPage> {
    EntityPage::new(
        EntityKind::Users,
        "User List",
        "User",
        &[("name", "Name"), ("username", "Username"), ("email", "Email")],
    )
}
