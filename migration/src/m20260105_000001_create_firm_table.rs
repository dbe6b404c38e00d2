use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Firm::Table)
                    .if_not_exists()
                    .col(string(Firm::Id).primary_key())
                    .col(string(Firm::Name))
                    .col(string_null(Firm::Description))
                    .col(string_uniq(Firm::ChannelId))
                    .col(string_null(Firm::EndpointUrl))
                    .col(boolean(Firm::Enabled).default(true))
                    .col(timestamp(Firm::CreatedAt))
                    .col(timestamp(Firm::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Firm::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Firm {
    Table,
    Id,
    Name,
    Description,
    ChannelId,
    EndpointUrl,
    Enabled,
    CreatedAt,
    UpdatedAt,
}
