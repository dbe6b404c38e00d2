pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_firm_table;
mod m20260105_000002_create_firm_access_role_table;
mod m20260105_000003_create_channel_message_table;
mod m20260106_000004_create_receipt_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_firm_table::Migration),
            Box::new(m20260105_000002_create_firm_access_role_table::Migration),
            Box::new(m20260105_000003_create_channel_message_table::Migration),
            Box::new(m20260106_000004_create_receipt_table::Migration),
        ]
    }
}
