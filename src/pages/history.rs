use super::EntityPage;
use crate::errors::AppResult;
use crate::models::EntityKind;

pub fn page() -> AppResult<EntityPage> {
    EntityPage::new(
        EntityKind::History,
        "Truck Entry History",
        "History",
        &[("action", "Action"), ("item", "Item"), ("date", "Date/Time")],
    )
}
