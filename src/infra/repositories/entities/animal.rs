//! Animal database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Animal, Sex};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "animals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub tag_number: String,
    pub breed: String,
    pub birth_date: Date,
    pub sex: String,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub weight: Decimal,
    pub health_status: String,
    /// Soft-delete flag (false = retired from the herd, row is kept)
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Animal {
    fn from(model: Model) -> Self {
        Animal {
            id: model.id,
            tag_number: model.tag_number,
            breed: model.breed,
            birth_date: model.birth_date,
            sex: Sex::from(model.sex.as_str()),
            weight: model.weight,
            health_status: model.health_status,
            active: model.active,
        }
    }
}
