use crate::server::{
    data::receipt::ReceiptRepository,
    error::AppError,
    model::receipt::{CreateReceiptParam, ReceiptKind, ReceiptStatus, VerificationOutcome},
};
use chrono::{Duration, Utc};
use entity::prelude::Receipt;
use test_utils::{builder::TestBuilder, factory::receipt::ReceiptFactory};

mod create;
mod list;
mod record_verification;
mod set_status;
