//! Migration: Create events table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::AnimalId).integer().not_null())
                    .col(ColumnDef::new(Events::MotherId).integer().null())
                    .col(ColumnDef::new(Events::EventType).string_len(20).not_null())
                    .col(ColumnDef::new(Events::EventDate).date().not_null())
                    .col(ColumnDef::new(Events::Notes).string_len(200).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_animal")
                            .from(Events::Table, Events::AnimalId)
                            .to(Animals::Table, Animals::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_mother")
                            .from(Events::Table, Events::MotherId)
                            .to(Animals::Table, Animals::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for listing an animal's history
        manager
            .create_index(
                Index::create()
                    .name("idx_events_animal_id")
                    .table(Events::Table)
                    .col(Events::AnimalId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
    AnimalId,
    MotherId,
    EventType,
    EventDate,
    Notes,
}

#[derive(Iden)]
enum Animals {
    Table,
    Id,
}
