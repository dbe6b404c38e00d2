//! FiveM game server status.
//!
//! Reads the standard `info.json` and `players.json` endpoints every FiveM server
//! exposes. The dashboard shows the server as offline whenever they cannot be read.

use serde::Deserialize;

use crate::model::status::{PlayerDto, ServerStatusDto};

#[derive(Debug, Deserialize)]
struct InfoResponse {
    #[serde(default)]
    vars: InfoVars,
}

#[derive(Debug, Default, Deserialize)]
struct InfoVars {
    #[serde(rename = "sv_projectName")]
    project_name: Option<String>,
    #[serde(rename = "sv_hostname")]
    hostname: Option<String>,
    #[serde(rename = "sv_maxClients")]
    max_clients: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlayerResponse {
    id: u32,
    name: String,
    #[serde(default)]
    ping: u32,
}

pub struct StatusService<'a> {
    http_client: &'a reqwest::Client,
    server_url: Option<&'a str>,
}

impl<'a> StatusService<'a> {
    /// Creates a status service for the FiveM server at `server_url`, if configured
    pub fn new(http_client: &'a reqwest::Client, server_url: Option<&'a str>) -> Self {
        Self {
            http_client,
            server_url,
        }
    }

    /// Gets the current server status
    ///
    /// Never fails: a missing server URL or any request/decoding error yields an
    /// offline status with no players.
    pub async fn status(&self) -> ServerStatusDto {
        let Some(server_url) = self.server_url else {
            return offline();
        };

        match self.fetch(server_url).await {
            Ok(status) => status,
            Err(e) => {
                tracing::debug!("FiveM server {} unreachable: {}", server_url, e);
                offline()
            }
        }
    }

    async fn fetch(&self, server_url: &str) -> Result<ServerStatusDto, reqwest::Error> {
        let info: InfoResponse = self
            .http_client
            .get(format!("{}/info.json", server_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let players: Vec<PlayerResponse> = self
            .http_client
            .get(format!("{}/players.json", server_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(ServerStatusDto {
            online: true,
            hostname: info.vars.project_name.or(info.vars.hostname),
            player_count: players.len() as u32,
            max_players: info
                .vars
                .max_clients
                .and_then(|m| m.trim().parse::<u32>().ok()),
            players: players
                .into_iter()
                .map(|p| PlayerDto {
                    id: p.id,
                    name: p.name,
                    ping: p.ping,
                })
                .collect(),
        })
    }
}

fn offline() -> ServerStatusDto {
    ServerStatusDto {
        online: false,
        hostname: None,
        player_count: 0,
        max_players: None,
        players: Vec::new(),
    }
}
