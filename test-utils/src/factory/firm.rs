//! Firm factory for creating test firm entities and their access roles.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::{next_id, next_snowflake};

/// Factory for creating test firms with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let firm = FirmFactory::new(&db)
///     .id("fazenda")
///     .enabled(false)
///     .build()
///     .await?;
/// ```
pub struct FirmFactory<'a> {
    db: &'a DatabaseConnection,
    entity: entity::firm::Model,
    access_roles: Vec<String>,
}

impl<'a> FirmFactory<'a> {
    /// Creates a new FirmFactory with a unique id, name and channel.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        let now = Utc::now();

        Self {
            db,
            entity: entity::firm::Model {
                id: format!("firm-{}", id),
                name: format!("Firm {}", id),
                description: None,
                channel_id: next_snowflake(),
                endpoint_url: None,
                enabled: true,
                created_at: now,
                updated_at: now,
            },
            access_roles: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.entity.id = id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.entity.name = name.into();
        self
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.entity.channel_id = channel_id.into();
        self
    }

    pub fn endpoint_url(mut self, endpoint_url: Option<&str>) -> Self {
        self.entity.endpoint_url = endpoint_url.map(str::to_string);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.entity.enabled = enabled;
        self
    }

    /// Sets the Discord role IDs allowed to view the firm.
    pub fn access_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.access_roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Builds and inserts the firm and its access roles into the database.
    ///
    /// # Returns
    /// - `Ok(entity::firm::Model)` - Created firm entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::firm::Model, DbErr> {
        let firm = entity::firm::ActiveModel {
            id: ActiveValue::Set(self.entity.id),
            name: ActiveValue::Set(self.entity.name),
            description: ActiveValue::Set(self.entity.description),
            channel_id: ActiveValue::Set(self.entity.channel_id),
            endpoint_url: ActiveValue::Set(self.entity.endpoint_url),
            enabled: ActiveValue::Set(self.entity.enabled),
            created_at: ActiveValue::Set(self.entity.created_at),
            updated_at: ActiveValue::Set(self.entity.updated_at),
        }
        .insert(self.db)
        .await?;

        for role_id in self.access_roles {
            entity::firm_access_role::ActiveModel {
                id: ActiveValue::NotSet,
                firm_id: ActiveValue::Set(firm.id.clone()),
                role_id: ActiveValue::Set(role_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(firm)
    }
}

/// Creates an enabled public firm without an endpoint.
///
/// Shorthand for `FirmFactory::new(db).build().await`.
pub async fn create_firm(db: &DatabaseConnection) -> Result<entity::firm::Model, DbErr> {
    FirmFactory::new(db).build().await
}
