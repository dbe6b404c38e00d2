use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Author of a Discord message as posted by the bot webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageAuthorDto {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmbedFieldDto {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmbedAuthorDto {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmbedFooterDto {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmbedDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<EmbedFieldDto>,
    #[serde(default)]
    pub author: Option<EmbedAuthorDto>,
    #[serde(default)]
    pub footer: Option<EmbedFooterDto>,
}

/// A single Discord message delivered to the channel message webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageDataDto {
    pub id: String,
    #[serde(default)]
    pub content: String,
    pub author: MessageAuthorDto,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub embeds: Vec<EmbedDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMessagesRequestDto {
    pub channel_id: String,
    #[serde(default)]
    pub messages: Vec<MessageDataDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponseDto {
    pub success: bool,
    pub received: u64,
    pub stored: u64,
    pub duplicates: u64,
}

/// Structured farm activity extracted from a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedActivityDto {
    pub tipo: String,
    pub categoria: String,
    pub membro_id: Option<String>,
    pub membro_nome: Option<String>,
    pub item: Option<String>,
    pub quantidade: i64,
    pub local: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoredAuthorDto {
    pub id: String,
    pub name: String,
}

/// A stored channel message annotated with the result of the activity parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessageDto {
    pub id: String,
    pub channel_id: String,
    pub author: StoredAuthorDto,
    pub content: String,
    pub embeds: Vec<EmbedDto>,
    pub timestamp: DateTime<Utc>,
    pub received_at: DateTime<Utc>,
    pub parse_success: bool,
    pub tipo: String,
    pub categoria: String,
    pub display_text: String,
    pub parsed: Option<ParsedActivityDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChannelMessagesDto {
    pub messages: Vec<StoredMessageDto>,
    pub total: u64,
}
