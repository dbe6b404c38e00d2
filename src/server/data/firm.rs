//! Firm data repository for database operations
//!
//! Provides the `FirmRepository` for managing firm configurations and their access
//! roles. Firms and roles are always written together inside a transaction so a firm
//! is never observable with a partially replaced role list.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashMap;

use crate::server::model::firm::{CreateFirmParam, Firm, UpdateFirmParam};

/// Repository providing database operations for firm management.
///
/// This struct holds a reference to the database connection and provides methods
/// for creating, reading, updating, and deleting firm records.
pub struct FirmRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FirmRepository<'a> {
    /// Creates a new FirmRepository instance
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `FirmRepository` - new repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new firm along with its access roles
    ///
    /// # Arguments
    /// - `param` - Create parameters containing the firm data
    ///
    /// # Returns
    /// - `Ok(Firm)` - The created firm as a domain model
    /// - `Err(DbErr)` - Database error during insert, e.g. duplicate id or channel
    pub async fn create(&self, param: CreateFirmParam) -> Result<Firm, DbErr> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let firm = entity::firm::ActiveModel {
            id: ActiveValue::Set(param.id),
            name: ActiveValue::Set(param.name),
            description: ActiveValue::Set(param.description),
            channel_id: ActiveValue::Set(param.channel_id),
            endpoint_url: ActiveValue::Set(param.endpoint_url),
            enabled: ActiveValue::Set(param.enabled),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(&txn)
        .await?;

        let roles = insert_roles(&txn, &firm.id, param.access_roles).await?;

        txn.commit().await?;

        Ok(Firm::from_entity(firm, roles))
    }

    /// Finds a firm by ID
    ///
    /// # Returns
    /// - `Ok(Some(Firm))` - The firm with its access roles
    /// - `Ok(None)` - No firm with this ID exists
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Firm>, DbErr> {
        let Some(firm) = entity::prelude::Firm::find_by_id(id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let roles = self.get_roles(&firm.id).await?;

        Ok(Some(Firm::from_entity(firm, roles)))
    }

    /// Finds the firm bound to a Discord channel
    ///
    /// # Returns
    /// - `Ok(Some(Firm))` - The firm configured for the channel
    /// - `Ok(None)` - No firm uses this channel
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_channel_id(&self, channel_id: &str) -> Result<Option<Firm>, DbErr> {
        let Some(firm) = entity::prelude::Firm::find()
            .filter(entity::firm::Column::ChannelId.eq(channel_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let roles = self.get_roles(&firm.id).await?;

        Ok(Some(Firm::from_entity(firm, roles)))
    }

    /// Gets every firm ordered by name
    pub async fn get_all(&self) -> Result<Vec<Firm>, DbErr> {
        let firms = entity::prelude::Firm::find()
            .order_by_asc(entity::firm::Column::Name)
            .order_by_asc(entity::firm::Column::Id)
            .all(self.db)
            .await?;

        let mut roles_by_firm: HashMap<String, Vec<entity::firm_access_role::Model>> =
            HashMap::new();
        for role in entity::prelude::FirmAccessRole::find()
            .order_by_asc(entity::firm_access_role::Column::Id)
            .all(self.db)
            .await?
        {
            roles_by_firm.entry(role.firm_id.clone()).or_default().push(role);
        }

        Ok(firms
            .into_iter()
            .map(|firm| {
                let roles = roles_by_firm.remove(&firm.id).unwrap_or_default();
                Firm::from_entity(firm, roles)
            })
            .collect())
    }

    /// Checks whether a channel is already bound to a firm other than `exclude_id`
    pub async fn channel_in_use(
        &self,
        channel_id: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Firm::find().filter(entity::firm::Column::ChannelId.eq(channel_id));

        if let Some(exclude_id) = exclude_id {
            query = query.filter(entity::firm::Column::Id.ne(exclude_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Counts the stored firms
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Firm::find().count(self.db).await
    }

    /// Updates a firm and replaces its access roles
    ///
    /// # Arguments
    /// - `id` - ID of the firm to update
    /// - `param` - Update parameters replacing every editable field
    ///
    /// # Returns
    /// - `Ok(Some(Firm))` - The updated firm
    /// - `Ok(None)` - No firm with this ID exists
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(&self, id: &str, param: UpdateFirmParam) -> Result<Option<Firm>, DbErr> {
        let Some(existing) = entity::prelude::Firm::find_by_id(id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let txn = self.db.begin().await?;

        let mut active: entity::firm::ActiveModel = existing.into();
        active.name = ActiveValue::Set(param.name);
        active.description = ActiveValue::Set(param.description);
        active.channel_id = ActiveValue::Set(param.channel_id);
        active.endpoint_url = ActiveValue::Set(param.endpoint_url);
        active.enabled = ActiveValue::Set(param.enabled);
        active.updated_at = ActiveValue::Set(Utc::now());
        let firm = active.update(&txn).await?;

        entity::prelude::FirmAccessRole::delete_many()
            .filter(entity::firm_access_role::Column::FirmId.eq(id))
            .exec(&txn)
            .await?;
        let roles = insert_roles(&txn, &firm.id, param.access_roles).await?;

        txn.commit().await?;

        Ok(Some(Firm::from_entity(firm, roles)))
    }

    /// Deletes a firm and its access roles
    ///
    /// # Returns
    /// - `Ok(true)` - The firm was deleted
    /// - `Ok(false)` - No firm with this ID exists
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, id: &str) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::FirmAccessRole::delete_many()
            .filter(entity::firm_access_role::Column::FirmId.eq(id))
            .exec(&txn)
            .await?;
        let result = entity::prelude::Firm::delete_by_id(id.to_string())
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    async fn get_roles(&self, firm_id: &str) -> Result<Vec<entity::firm_access_role::Model>, DbErr> {
        entity::prelude::FirmAccessRole::find()
            .filter(entity::firm_access_role::Column::FirmId.eq(firm_id))
            .order_by_asc(entity::firm_access_role::Column::Id)
            .all(self.db)
            .await
    }
}

async fn insert_roles<C: ConnectionTrait>(
    conn: &C,
    firm_id: &str,
    roles: Vec<String>,
) -> Result<Vec<entity::firm_access_role::Model>, DbErr> {
    let mut inserted = Vec::with_capacity(roles.len());

    for role_id in roles {
        let role = entity::firm_access_role::ActiveModel {
            id: ActiveValue::NotSet,
            firm_id: ActiveValue::Set(firm_id.to_string()),
            role_id: ActiveValue::Set(role_id),
        }
        .insert(conn)
        .await?;
        inserted.push(role);
    }

    Ok(inserted)
}
