use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Firm, FirmAccessRole};
///
/// let test = TestBuilder::new()
///     .with_table(Firm)
///     .with_table(FirmAccessRole)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys should be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create the table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the firm and firm access role tables.
    pub fn with_firm_tables(self) -> Self {
        self.with_table(Firm).with_table(FirmAccessRole)
    }

    /// Adds every table of the application schema.
    ///
    /// Use this for service and router tests that touch firms, messages and receipts.
    pub fn with_all_tables(self) -> Self {
        self.with_firm_tables()
            .with_table(ChannelMessage)
            .with_table(Receipt)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}
