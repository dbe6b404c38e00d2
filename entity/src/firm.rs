use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "firm")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(unique)]
    pub channel_id: String,
    pub endpoint_url: Option<String>,
    pub enabled: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::firm_access_role::Entity")]
    FirmAccessRole,
}

impl Related<super::firm_access_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FirmAccessRole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
