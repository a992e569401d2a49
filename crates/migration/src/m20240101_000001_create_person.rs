//! Create `person` table.
//!
//! Every writable column is nullable: a person may be stored with no fields.
//! `null_fields` flags the columns a client set to `null` explicitly, so they
//! can be told apart from columns that were never set. `created_at` only
//! orders listings. Neither is exposed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Person::Table)
                    .if_not_exists()
                    .col(uuid(Person::Id).primary_key())
                    .col(text_null(Person::Name))
                    .col(text_null(Person::Image))
                    .col(text_null(Person::Title))
                    .col(small_integer(Person::NullFields).default(0))
                    .col(timestamp_with_time_zone(Person::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Person::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Person { Table, Id, Name, Image, Title, NullFields, CreatedAt }
