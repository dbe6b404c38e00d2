use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlayerDto {
    pub id: u32,
    pub name: String,
    pub ping: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatusDto {
    pub online: bool,
    pub hostname: Option<String>,
    pub player_count: u32,
    pub max_players: Option<u32>,
    pub players: Vec<PlayerDto>,
}
