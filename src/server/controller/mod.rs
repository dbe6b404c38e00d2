//! HTTP request handlers.
//!
//! Controllers extract and validate request data, call into the service layer and
//! convert domain models into DTOs. Every handler carries a `utoipa::path`
//! annotation and is collected into the OpenAPI document in `router`.

pub mod firm;
pub mod receipt;
pub mod status;
pub mod webhook;
