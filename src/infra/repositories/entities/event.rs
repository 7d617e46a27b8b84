//! Event database entity for SeaORM.
//!
//! `animal_id` is the subject of the event; `mother_id` is a second,
//! nullable reference into the same animals table, populated only for
//! birth events.

use sea_orm::entity::prelude::*;

use crate::domain::{Event, EventType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub animal_id: i32,
    pub mother_id: Option<i32>,
    pub event_type: String,
    pub event_date: Date,
    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::animal::Entity",
        from = "Column::AnimalId",
        to = "super::animal::Column::Id"
    )]
    Animal,
    #[sea_orm(
        belongs_to = "super::animal::Entity",
        from = "Column::MotherId",
        to = "super::animal::Column::Id"
    )]
    Mother,
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Event {
    fn from(model: Model) -> Self {
        Event {
            id: model.id,
            animal_id: model.animal_id,
            mother_id: model.mother_id,
            event_type: EventType::from(model.event_type.as_str()),
            event_date: model.event_date,
            notes: model.notes,
        }
    }
}
