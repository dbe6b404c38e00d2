use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "receipt")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub firm_id: Option<String>,
    pub player_id: String,
    pub player_name: String,
    pub kind: String,
    pub item: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub status: String,
    pub verified_quantity: Option<i32>,
    pub verification_note: Option<String>,
    /// JSON encoded list of Discord message IDs that satisfied verification
    pub matched_message_ids: Option<String>,
    pub submitted_at: DateTimeUtc,
    pub verified_at: Option<DateTimeUtc>,
    pub paid_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
