//! Farm activity handling: message parsing, deduplication keys and receipt
//! verification against parsed deposits.

pub mod dedupe;
pub mod parser;
pub mod verification;
