use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Receipt::Table)
                    .if_not_exists()
                    .col(pk_auto(Receipt::Id))
                    .col(string_null(Receipt::FirmId))
                    .col(string(Receipt::PlayerId))
                    .col(string(Receipt::PlayerName))
                    .col(string(Receipt::Kind))
                    .col(string(Receipt::Item))
                    .col(integer(Receipt::Quantity))
                    .col(big_integer(Receipt::UnitPrice).default(0))
                    .col(string(Receipt::Status).default("pending"))
                    .col(integer_null(Receipt::VerifiedQuantity))
                    .col(string_null(Receipt::VerificationNote))
                    .col(text_null(Receipt::MatchedMessageIds))
                    .col(timestamp(Receipt::SubmittedAt))
                    .col(timestamp_null(Receipt::VerifiedAt))
                    .col(timestamp_null(Receipt::PaidAt))
                    .col(
                        timestamp(Receipt::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_receipt_status")
                    .table(Receipt::Table)
                    .col(Receipt::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_receipt_status")
                    .table(Receipt::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Receipt::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Receipt {
    Table,
    Id,
    FirmId,
    PlayerId,
    PlayerName,
    Kind,
    Item,
    Quantity,
    UnitPrice,
    Status,
    VerifiedQuantity,
    VerificationNote,
    MatchedMessageIds,
    SubmittedAt,
    VerifiedAt,
    PaidAt,
    CreatedAt,
}
