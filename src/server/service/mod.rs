//! Business logic layer.
//!
//! Services validate input, coordinate repositories and external calls, and convert
//! between domain models and DTOs at the edges. Controllers, the Discord bot and the
//! scheduler all go through these services.

pub mod activity;
pub mod firm;
pub mod forwarder;
pub mod message;
pub mod notification;
pub mod receipt;
pub mod status;

#[cfg(test)]
mod test;
