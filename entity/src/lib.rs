//! SeaORM entity definitions for the dashboard database.

pub mod prelude;

pub mod channel_message;
pub mod firm;
pub mod firm_access_role;
pub mod receipt;
