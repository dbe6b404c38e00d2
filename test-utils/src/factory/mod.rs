//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests.
//!
//! # Overview
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Create with defaults
//! let firm = factory::create_firm(&db).await?;
//!
//! // Using builder pattern for customization
//! let firm = factory::firm::FirmFactory::new(&db)
//!     .channel_id("123456")
//!     .endpoint_url(Some("http://localhost:9000/hook"))
//!     .access_roles(["42"])
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `firm` - Firms with their access roles
//! - `channel_message` - Stored Discord channel messages
//! - `receipt` - Farm service receipts
//! - `helpers` - Unique ID generation

pub mod channel_message;
pub mod firm;
pub mod helpers;
pub mod receipt;

pub use channel_message::create_channel_message;
pub use firm::create_firm;
pub use receipt::create_receipt;
