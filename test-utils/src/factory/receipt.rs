//! Receipt factory for creating farm service receipts.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test receipts.
///
/// Defaults to a pending receipt for 10 `Milho` (`planta`) by player `123`
/// named `João Silva`, submitted now.
pub struct ReceiptFactory<'a> {
    db: &'a DatabaseConnection,
    entity: entity::receipt::Model,
}

impl<'a> ReceiptFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let now = Utc::now();

        Self {
            db,
            entity: entity::receipt::Model {
                id: 0,
                firm_id: None,
                player_id: "123".to_string(),
                player_name: "João Silva".to_string(),
                kind: "planta".to_string(),
                item: "Milho".to_string(),
                quantity: 10,
                unit_price: 25,
                status: "pending".to_string(),
                verified_quantity: None,
                verification_note: None,
                matched_message_ids: None,
                submitted_at: now,
                verified_at: None,
                paid_at: None,
                created_at: now,
            },
        }
    }

    pub fn firm_id(mut self, firm_id: impl Into<String>) -> Self {
        self.entity.firm_id = Some(firm_id.into());
        self
    }

    pub fn player(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.entity.player_id = id.into();
        self.entity.player_name = name.into();
        self
    }

    /// Sets the kind (`animal` or `planta`) and item.
    pub fn item(mut self, kind: impl Into<String>, item: impl Into<String>) -> Self {
        self.entity.kind = kind.into();
        self.entity.item = item.into();
        self
    }

    pub fn quantity(mut self, quantity: i32) -> Self {
        self.entity.quantity = quantity;
        self
    }

    pub fn unit_price(mut self, unit_price: i64) -> Self {
        self.entity.unit_price = unit_price;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.entity.status = status.into();
        self
    }

    pub fn submitted_at(mut self, submitted_at: DateTime<Utc>) -> Self {
        self.entity.submitted_at = submitted_at;
        self
    }

    /// Builds and inserts the receipt into the database.
    pub async fn build(self) -> Result<entity::receipt::Model, DbErr> {
        entity::receipt::ActiveModel {
            id: ActiveValue::NotSet,
            firm_id: ActiveValue::Set(self.entity.firm_id),
            player_id: ActiveValue::Set(self.entity.player_id),
            player_name: ActiveValue::Set(self.entity.player_name),
            kind: ActiveValue::Set(self.entity.kind),
            item: ActiveValue::Set(self.entity.item),
            quantity: ActiveValue::Set(self.entity.quantity),
            unit_price: ActiveValue::Set(self.entity.unit_price),
            status: ActiveValue::Set(self.entity.status),
            verified_quantity: ActiveValue::Set(self.entity.verified_quantity),
            verification_note: ActiveValue::Set(self.entity.verification_note),
            matched_message_ids: ActiveValue::Set(self.entity.matched_message_ids),
            submitted_at: ActiveValue::Set(self.entity.submitted_at),
            verified_at: ActiveValue::Set(self.entity.verified_at),
            paid_at: ActiveValue::Set(self.entity.paid_at),
            created_at: ActiveValue::Set(self.entity.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending receipt with default values.
pub async fn create_receipt(db: &DatabaseConnection) -> Result<entity::receipt::Model, DbErr> {
    ReceiptFactory::new(db).build().await
}
