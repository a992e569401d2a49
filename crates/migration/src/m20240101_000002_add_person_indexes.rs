use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_person::Person;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Listing walks the table in insertion order
        manager
            .create_index(
                Index::create()
                    .name("idx_person_created_at")
                    .table(Person::Table)
                    .col(Person::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_person_created_at").table(Person::Table).to_owned())
            .await
    }
}
