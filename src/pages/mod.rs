//! Page wrappers: each entity binds the shared workflow to its own field
//! schema, page title and record label.

pub mod entries;
pub mod history;
pub mod locations;
pub mod profile;
pub mod trucks;
pub mod users;

use crate::core::schema::FormSchema;
use crate::errors::AppResult;
use crate::models::EntityKind;

#[derive(Debug, Clone)]
pub struct EntityPage {
    pub kind: EntityKind,
    pub title: &'static str,
    /// Singular noun used in form titles ("Add Truck").
    pub label: &'static str,
    pub schema: FormSchema,
}

impl EntityPage {
    pub fn new(
        kind: EntityKind,
        title: &'static str,
        label: &'static str,
        fields: &[(&str, &str)],
    ) -> AppResult<Self> {
        Ok(Self {
            kind,
            title,
            label,
            schema: FormSchema::from_pairs(fields)?,
        })
    }
}

pub fn entity_page(kind: EntityKind) -> AppResult<EntityPage> {
    match kind {
        EntityKind::Users => users::page(),
        EntityKind::Trucks => trucks::page(),
        EntityKind::Locations => locations::page(),
        EntityKind::Entries => entries::page(),
        EntityKind::History => history::page(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_page() {
        for kind in EntityKind::ALL {
            let page = entity_page(kind).unwrap();
            assert_eq!(page.kind, kind);
            assert!(page.schema.fields().len() >= 2);
        }
    }
}
