use crate::server::{
    data::firm::FirmRepository,
    model::firm::{CreateFirmParam, UpdateFirmParam},
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod channel_in_use;
mod create;
mod delete;
mod find;
mod update;

fn create_param(id: &str, channel_id: &str, roles: &[&str]) -> CreateFirmParam {
    CreateFirmParam {
        id: id.to_string(),
        name: format!("Firm {}", id),
        description: None,
        channel_id: channel_id.to_string(),
        endpoint_url: None,
        enabled: true,
        access_roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}
