//! Wire-level DTOs exchanged with the dashboard frontend, the Discord bot and
//! firm endpoints.

pub mod api;
pub mod firm;
pub mod message;
pub mod notification;
pub mod receipt;
pub mod status;
