//! Migration: Create animals table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Animals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Animals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Animals::TagNumber)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Animals::Breed).string_len(50).not_null())
                    .col(ColumnDef::new(Animals::BirthDate).date().not_null())
                    .col(ColumnDef::new(Animals::Sex).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Animals::Weight)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Animals::HealthStatus)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Animals::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for efficient filtering of active animals
        manager
            .create_index(
                Index::create()
                    .name("idx_animals_active")
                    .table(Animals::Table)
                    .col(Animals::Active)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Animals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Animals {
    Table,
    Id,
    TagNumber,
    Breed,
    BirthDate,
    Sex,
    Weight,
    HealthStatus,
    Active,
}
