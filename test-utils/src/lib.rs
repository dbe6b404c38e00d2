//! Blackgolden Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the
//! dashboard backend. This crate offers a builder pattern for creating test contexts with
//! in-memory SQLite databases and customizable table schemas, plus factories for the
//! firm, channel message and receipt entities.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Entity factories with sensible defaults
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::Receipt;
//!
//! #[tokio::test]
//! async fn test_receipt_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(Receipt)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
