use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "channel_message")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub message_id: String,
    pub channel_id: String,
    pub author_id: String,
    pub author_name: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// JSON encoded list of message embeds
    #[sea_orm(column_type = "Text")]
    pub embeds: String,
    #[sea_orm(unique)]
    pub dedupe_key: String,
    pub timestamp: DateTimeUtc,
    pub received_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
