use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_firm_table::Firm;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FirmAccessRole::Table)
                    .if_not_exists()
                    .col(pk_auto(FirmAccessRole::Id))
                    .col(string(FirmAccessRole::FirmId))
                    .col(string(FirmAccessRole::RoleId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_firm_access_role_firm_id")
                            .from(FirmAccessRole::Table, FirmAccessRole::FirmId)
                            .to(Firm::Table, Firm::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One entry per role per firm
        manager
            .create_index(
                Index::create()
                    .name("idx_firm_access_role_unique")
                    .table(FirmAccessRole::Table)
                    .col(FirmAccessRole::FirmId)
                    .col(FirmAccessRole::RoleId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_firm_access_role_unique")
                    .table(FirmAccessRole::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(FirmAccessRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FirmAccessRole {
    Table,
    Id,
    FirmId,
    RoleId,
}
