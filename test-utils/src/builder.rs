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
/// use entity::prelude::{User, AfkStatus};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(AfkStatus)
///     .build()
///     .await?;
/// ```
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
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables required by the statistics features.
    ///
    /// Adds `User` followed by every table that references it and is written to
    /// by message or voice events:
    /// - AfkStatus
    /// - CallSession
    /// - SpamStats
    pub fn with_activity_tables(self) -> Self {
        self.with_table(User)
            .with_table(AfkStatus)
            .with_table(CallSession)
            .with_table(SpamStats)
    }

    /// Adds the guild and user configuration tables.
    pub fn with_settings_tables(self) -> Self {
        self.with_table(GuildSettings).with_table(UserSettings)
    }

    /// Adds every table in the schema, including the declared-only ones.
    pub fn with_all_tables(self) -> Self {
        self.with_activity_tables()
            .with_settings_tables()
            .with_table(Finance)
            .with_table(DueItem)
            .with_table(GamePreference)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
