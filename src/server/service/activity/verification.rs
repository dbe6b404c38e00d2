//! Receipt verification against deposits parsed from channel messages.
//!
//! A receipt is verified when the deposits posted by its member around the
//! submission time add up to at least the claimed quantity. Only messages within
//! [`VERIFICATION_WINDOW_MINUTES`] of `submitted_at` are considered, restricted to the
//! receipt firm's channel when the receipt names a firm.

use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        channel_message::ChannelMessageRepository, firm::FirmRepository,
        receipt::ReceiptRepository,
    },
    error::AppError,
    model::{
        activity::{ActivityType, ParsedActivity},
        message::ChannelMessage,
        receipt::{Receipt, ReceiptStatus, VerificationOutcome},
    },
    service::activity::parser::fold,
};

/// Half width of the window around `submitted_at` searched for deposits
pub const VERIFICATION_WINDOW_MINUTES: i64 = 5;

pub struct ActivityVerificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActivityVerificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Verifies a pending receipt against the stored channel messages
    ///
    /// # Arguments
    /// - `receipt_id` - ID of the receipt to verify
    ///
    /// # Returns
    /// - `Ok((Receipt, VerificationOutcome))` - The receipt after recording the outcome
    /// - `Err(AppError::NotFound)` - No receipt with this ID exists
    /// - `Err(AppError::BadRequest)` - The receipt is not pending
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn verify(&self, receipt_id: i32) -> Result<(Receipt, VerificationOutcome), AppError> {
        let receipt_repo = ReceiptRepository::new(self.db);

        let receipt = receipt_repo
            .find_by_id(receipt_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Receipt not found".to_string()))?;

        if receipt.status != ReceiptStatus::Pending {
            return Err(AppError::BadRequest(format!(
                "Only pending receipts can be verified, receipt is {}",
                receipt.status.as_str()
            )));
        }

        let channel_id = match &receipt.firm_id {
            Some(firm_id) => match FirmRepository::new(self.db).find_by_id(firm_id).await? {
                Some(firm) => Some(firm.channel_id),
                None => {
                    tracing::warn!(
                        "Receipt {} references unknown firm {}, searching every channel",
                        receipt.id,
                        firm_id
                    );
                    None
                }
            },
            None => None,
        };

        let window = Duration::minutes(VERIFICATION_WINDOW_MINUTES);
        let messages = ChannelMessageRepository::new(self.db)
            .find_in_window(
                channel_id.as_deref(),
                receipt.submitted_at - window,
                receipt.submitted_at + window,
            )
            .await?;

        let outcome = reconcile(&receipt, &messages);

        tracing::debug!(
            "Receipt {} verification: {} of {} matched in {} candidate messages",
            receipt.id,
            outcome.matched_quantity,
            outcome.expected_quantity,
            messages.len()
        );

        let updated = receipt_repo
            .record_verification(receipt.id, &outcome)
            .await?
            .ok_or_else(|| AppError::NotFound("Receipt not found".to_string()))?;

        Ok((updated, outcome))
    }
}

/// Sums the deposits in `messages` that match the receipt's member, item and kind
pub fn reconcile(receipt: &Receipt, messages: &[ChannelMessage]) -> VerificationOutcome {
    let mut matched_quantity = 0i64;
    let mut matched_message_ids = Vec::new();

    for message in messages {
        let Some(activity) = message.parse() else {
            continue;
        };

        if activity.tipo != ActivityType::Deposito
            || activity.categoria != receipt.kind.category()
            || !member_matches(receipt, message, &activity)
            || !item_matches(&receipt.item, activity.item.as_deref())
        {
            continue;
        }

        matched_quantity += activity.quantidade;
        matched_message_ids.push(message.message_id.clone());
    }

    let expected_quantity = receipt.quantity as i64;
    let verified = matched_quantity >= expected_quantity;

    let reason = if verified {
        None
    } else if matched_quantity == 0 {
        Some("no matching deposit found".to_string())
    } else {
        Some(format!("found {} of {}", matched_quantity, expected_quantity))
    };

    VerificationOutcome {
        verified,
        matched_quantity,
        expected_quantity,
        matched_message_ids,
        reason,
    }
}

fn member_matches(receipt: &Receipt, message: &ChannelMessage, activity: &ParsedActivity) -> bool {
    let (id, name) = if activity.membro_id.is_none() && activity.membro_nome.is_none() {
        (Some(message.author.id.as_str()), Some(message.author.name.as_str()))
    } else {
        (activity.membro_id.as_deref(), activity.membro_nome.as_deref())
    };

    if id.is_some_and(|id| id == receipt.player_id) {
        return true;
    }

    name.is_some_and(|name| fold(name.trim()) == fold(receipt.player_name.trim()))
}

fn item_matches(expected: &str, parsed: Option<&str>) -> bool {
    let Some(parsed) = parsed else {
        return false;
    };

    let expected = fold(expected.trim());
    let parsed = fold(parsed.trim());

    !expected.is_empty()
        && !parsed.is_empty()
        && (expected == parsed || expected.contains(&parsed) || parsed.contains(&expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::{
        message::MessageAuthor,
        receipt::{ReceiptKind, ReceiptStatus},
    };
    use chrono::{TimeZone, Utc};

    fn receipt(kind: ReceiptKind, item: &str, quantity: i32) -> Receipt {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap();
        Receipt {
            id: 1,
            firm_id: None,
            player_id: "123".to_string(),
            player_name: "João Silva".to_string(),
            kind,
            item: item.to_string(),
            quantity,
            unit_price: 10,
            status: ReceiptStatus::Pending,
            verified_quantity: None,
            verification_note: None,
            matched_message_ids: Vec::new(),
            submitted_at: now,
            verified_at: None,
            paid_at: None,
            created_at: now,
        }
    }

    fn message(message_id: &str, content: &str) -> ChannelMessage {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 12, 1, 0).unwrap();
        ChannelMessage {
            id: 1,
            message_id: message_id.to_string(),
            channel_id: "100".to_string(),
            author: MessageAuthor {
                id: "999".to_string(),
                name: "Farm Logger".to_string(),
            },
            content: content.to_string(),
            embeds: Vec::new(),
            dedupe_key: message_id.to_string(),
            timestamp: now,
            received_at: now,
        }
    }

    #[test]
    fn sums_matching_deposits_until_quantity() {
        let receipt = receipt(ReceiptKind::Planta, "Milho", 15);
        let messages = vec![
            message("1", "[ID]: 123 João Silva\n[DEPOSITOU]: 10x Milho"),
            message("2", "[ID]: 123 João Silva\n[DEPOSITOU]: 5x Milho"),
        ];

        let outcome = reconcile(&receipt, &messages);

        assert!(outcome.verified);
        assert_eq!(outcome.matched_quantity, 15);
        assert_eq!(outcome.matched_message_ids, vec!["1", "2"]);
        assert_eq!(outcome.reason, None);
    }

    #[test]
    fn reports_partial_match() {
        let receipt = receipt(ReceiptKind::Planta, "Milho", 20);
        let messages = vec![message("1", "[ID]: 123 João Silva\n[DEPOSITOU]: 10x Milho")];

        let outcome = reconcile(&receipt, &messages);

        assert!(!outcome.verified);
        assert_eq!(outcome.reason.as_deref(), Some("found 10 of 20"));
    }

    #[test]
    fn ignores_other_members_withdrawals_and_categories() {
        let receipt = receipt(ReceiptKind::Planta, "Milho", 5);
        let messages = vec![
            message("1", "[ID]: 77 Outro\n[DEPOSITOU]: 10x Milho"),
            message("2", "[ID]: 123 João Silva\n[RETIROU]: 10x Milho"),
            message("3", "[ID]: 123 João Silva\n[DEPOSITOU]: 10x Carne"),
            message("4", "bom dia"),
        ];

        let outcome = reconcile(&receipt, &messages);

        assert!(!outcome.verified);
        assert_eq!(outcome.matched_quantity, 0);
        assert_eq!(outcome.reason.as_deref(), Some("no matching deposit found"));
    }

    #[test]
    fn matches_folded_names_and_partial_items() {
        let receipt = receipt(ReceiptKind::Animal, "Galinha", 3);
        let messages = vec![message("1", "[MEMBRO]: joao silva\n[DEPOSITOU]: 3x Galinha Caipira")];

        let outcome = reconcile(&receipt, &messages);

        assert!(outcome.verified);
        assert_eq!(outcome.matched_quantity, 3);
    }

    #[test]
    fn falls_back_to_discord_author_without_member() {
        let receipt = receipt(ReceiptKind::Planta, "Milho", 4);
        let mut msg = message("1", "[DEPOSITOU]: 4x Milho");
        msg.author.id = "123".to_string();

        let outcome = reconcile(&receipt, &[msg]);

        assert!(outcome.verified);
    }
}
