use super::EntityPage;
use crate::errors::AppResult;
use crate::models::EntityKind;

pub fn page() -> AppResult<EntityPage> {
    EntityPage::new(
        EntityKind::Locations,
        "Location List",
        "Location",
        &[("name", "Location"), ("state", "State")],
    )
}
