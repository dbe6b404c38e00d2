//! Domain models for farm activity parsed out of Discord messages.

use crate::model::message::ParsedActivityDto;

/// Kind of movement a farm message reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    /// Items or money put into the family chest
    Deposito,
    /// Items or money taken out of the family chest
    Saque,
    /// Items added to a member's inventory
    InventarioEntrada,
    /// Items removed from a member's inventory
    InventarioSaida,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposito => "deposito",
            Self::Saque => "saque",
            Self::InventarioEntrada => "inventario_entrada",
            Self::InventarioSaida => "inventario_saida",
        }
    }

    /// Past-tense Portuguese verb used when rendering display text
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Deposito => "depositou",
            Self::Saque => "retirou",
            Self::InventarioEntrada => "adicionou ao inventário",
            Self::InventarioSaida => "removeu do inventário",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityCategory {
    Animais,
    Plantas,
    Dinheiro,
    Outros,
}

impl ActivityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Animais => "animais",
            Self::Plantas => "plantas",
            Self::Dinheiro => "dinheiro",
            Self::Outros => "outros",
        }
    }
}

/// Placeholder `tipo` reported for messages the parser could not understand
pub const UNKNOWN_ACTIVITY: &str = "desconhecido";

/// Structured farm activity extracted from a message's text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedActivity {
    pub tipo: ActivityType,
    pub categoria: ActivityCategory,
    pub membro_id: Option<String>,
    pub membro_nome: Option<String>,
    /// Item name as written in the message; `None` for money movements
    pub item: Option<String>,
    pub quantidade: i64,
    /// Chest or storage the movement happened in
    pub local: Option<String>,
    pub display_text: String,
}

impl ParsedActivity {
    pub fn into_dto(self) -> ParsedActivityDto {
        ParsedActivityDto {
            tipo: self.tipo.as_str().to_string(),
            categoria: self.categoria.as_str().to_string(),
            membro_id: self.membro_id,
            membro_nome: self.membro_nome,
            item: self.item,
            quantidade: self.quantidade,
            local: self.local,
        }
    }
}
