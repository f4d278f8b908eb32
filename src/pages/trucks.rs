use super::EntityPage;
use crate::errors::AppResult;
use crate::models::EntityKind;

pub fn page() -> AppResult<EntityPage> {
    EntityPage::new(
        EntityKind::Trucks,
        "Truck List",
        "Truck",
        &[("name", "Truck Name"), ("number", "Truck Number")],
    )
}
