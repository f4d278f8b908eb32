use super::EntityPage;
use crate::errors::AppResult;
use crate::models::EntityKind;

pub fn page() -> AppResult<EntityPage> {
    EntityPage::new(
        EntityKind::Entries,
        "Truck Entry",
        "Entry",
        &[
            ("truckId", "Truck Name"),
            ("locationId", "Location"),
            ("loadType", "Load Type"),
            ("date", "Date"),
        ],
    )
}
