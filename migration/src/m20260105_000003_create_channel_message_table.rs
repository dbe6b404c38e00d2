use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChannelMessage::Table)
                    .if_not_exists()
                    .col(pk_auto(ChannelMessage::Id))
                    .col(string_uniq(ChannelMessage::MessageId))
                    .col(string(ChannelMessage::ChannelId))
                    .col(string(ChannelMessage::AuthorId))
                    .col(string(ChannelMessage::AuthorName))
                    .col(text(ChannelMessage::Content))
                    .col(text(ChannelMessage::Embeds))
                    .col(string_uniq(ChannelMessage::DedupeKey))
                    .col(timestamp(ChannelMessage::Timestamp))
                    .col(
                        timestamp(ChannelMessage::ReceivedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing and verification both scan by channel & time
        manager
            .create_index(
                Index::create()
                    .name("idx_channel_message_channel_timestamp")
                    .table(ChannelMessage::Table)
                    .col(ChannelMessage::ChannelId)
                    .col(ChannelMessage::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_channel_message_channel_timestamp")
                    .table(ChannelMessage::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ChannelMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ChannelMessage {
    Table,
    Id,
    MessageId,
    ChannelId,
    AuthorId,
    AuthorName,
    Content,
    Embeds,
    DedupeKey,
    Timestamp,
    ReceivedAt,
}
