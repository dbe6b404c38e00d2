//! Regex based parser for the farm log messages posted by the in-game bot.
//!
//! The game bot posts Portuguese templates, either as labelled lines
//!
//! ```text
//! [ID]: 123 João Silva
//! [DEPOSITOU]: 10x Milho
//! [BAÚ]: Fazenda
//! ```
//!
//! as embeds with a title and `Item`/`Quantidade` fields, or as a single sentence
//! such as `João (123) depositou 10x Milho no baú Fazenda`. Everything is matched
//! accent and case insensitively.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::server::model::{
    activity::{ActivityCategory, ActivityType, ParsedActivity},
    message::MessageEmbed,
};

static MARKDOWN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*|__|~~|\|\||`+").unwrap());

/// `[LABEL]: value`, `[LABEL] value` or `LABEL: value`
static LABELLED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:\[\s*(?P<bl>[^\[\]]{1,40}?)\s*\]\s*:?|(?P<pl>[^\[\]:]{1,40}?)\s*:)\s*(?P<value>.*?)\s*$",
    )
    .unwrap()
});

/// `<name> depositou <value> [no baú <local>]`
static PROSE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?P<name>.+?)\s+(?P<verb>depositou|guardou|colocou|retirou|sacou|pegou|adicionou|recebeu|removeu|perdeu)\s+(?P<value>.+?)(?:\s+(?:no|na|do|da|ao|em)\s+(?P<local>(?:ba[uú]|armaz[eé]m|invent[aá]rio)\b.*))?$",
    )
    .unwrap()
});

static MONEY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:r\$|\$)\s*(?P<n>\d[\d.,]*)$").unwrap());

static MONEY_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<n>\d[\d.,]*)\s*(?:reais|r\$|\$|em dinheiro|dinheiro)$").unwrap()
});

static NUMBER_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?P<n>\d[\d.,]*)$").unwrap());

/// `10x Milho`, `10 x Milho`, `10 Milho`
static QUANTITY_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<n>\d[\d.]*)\s*(?:x\b)?\s*(?P<item>[^\d\s].*)$").unwrap()
});

/// `Milho x10`, `Milho x 10`, `Milho (10)`, `Milho: 10`
static ITEM_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?P<item>.*?[^\d\s])\s*(?:x\s*(?P<n1>\d[\d.]*)|\(\s*(?P<n2>\d[\d.]*)\s*\)|:\s*(?P<n3>\d[\d.]*))$",
    )
    .unwrap()
});

static MEMBER_ID_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<id>\d+)\s*(?:[-|:]\s*)?(?P<name>.*)$").unwrap());

static MEMBER_ID_LAST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<name>.+?)\s*(?:\(\s*(?P<id1>\d+)\s*\)|\[\s*(?P<id2>\d+)\s*\]|#\s*(?P<id3>\d+)|\|\s*(?P<id4>\d+))$",
    )
    .unwrap()
});

static MEMBER_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<@!?(?P<id>\d+)>$").unwrap());

const DEPOSIT_KEYWORDS: &[&str] = &[
    "depositou",
    "deposito",
    "deposito realizado",
    "guardou",
    "colocou",
];
const WITHDRAWAL_KEYWORDS: &[&str] = &["retirou", "saque", "sacou", "pegou", "retirada"];
const INVENTORY_IN_KEYWORDS: &[&str] = &[
    "adicionou",
    "adicionado",
    "item adicionado",
    "recebeu",
    "entrada",
];
const INVENTORY_OUT_KEYWORDS: &[&str] = &[
    "removeu",
    "removido",
    "item removido",
    "perdeu",
    "saida",
];

const MEMBER_LABELS: &[&str] = &[
    "id",
    "membro",
    "membro id",
    "passaporte",
    "jogador",
    "player",
    "usuario",
    "nome",
];
const LOCAL_LABELS: &[&str] = &["bau", "local", "armazem"];
const ITEM_LABELS: &[&str] = &["item", "itens", "produto"];
const QUANTITY_LABELS: &[&str] = &["quantidade", "qtd", "quantia", "valor"];

const ANIMAL_KEYWORDS: &[&str] = &[
    "animal", "boi", "vaca", "bezerro", "touro", "porco", "leitao", "leitoes", "galinha",
    "frango", "pinto", "ovelha", "carneiro", "cabra", "bode", "cavalo", "coelho", "pato",
    "peru", "carne", "couro", "leite", "ovo", "la", "pena", "bacon", "pele",
];
const PLANT_KEYWORDS: &[&str] = &[
    "planta", "muda", "semente", "colheita", "milho", "trigo", "tomate", "batata", "alface",
    "cenoura", "laranja", "maca", "uva", "cafe", "algodao", "cana", "soja", "arroz", "feijao",
    "morango", "abobora", "cebola", "alho", "tabaco", "erva", "grao", "fruta", "folha",
];

/// Flattens message content and embeds into plain text, one logical line each.
///
/// Order: content, then per embed its title, author, description, fields as
/// `name: value` and footer. Discord markdown and quote markers are removed.
pub fn message_text(content: &str, embeds: &[MessageEmbed]) -> String {
    let mut lines: Vec<String> = Vec::new();

    push_block(&mut lines, content);

    for embed in embeds {
        if let Some(title) = &embed.title {
            push_block(&mut lines, title);
        }
        if let Some(author) = &embed.author_name {
            push_block(&mut lines, author);
        }
        if let Some(description) = &embed.description {
            push_block(&mut lines, description);
        }
        for field in &embed.fields {
            let name = strip_markdown(&field.name);
            let value = strip_markdown(&field.value)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            let name = name.trim();
            if name.is_empty() {
                push_block(&mut lines, &value);
            } else {
                lines.push(format!("{}: {}", name, value));
            }
        }
        if let Some(footer) = &embed.footer {
            push_block(&mut lines, footer);
        }
    }

    lines.join("\n")
}

fn push_block(lines: &mut Vec<String>, block: &str) {
    for line in strip_markdown(block).lines() {
        let line = line.trim_start_matches('>').trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
}

fn strip_markdown(value: &str) -> String {
    MARKDOWN.replace_all(value, "").into_owned()
}

/// Lower-cases and removes Portuguese diacritics
pub fn fold(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            c => c,
        })
        .collect()
}

/// Folded label with surrounding symbols removed and whitespace collapsed
fn normalize_label(label: &str) -> String {
    fold(label)
        .trim_matches(|c: char| !c.is_alphanumeric())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Label {
    Member,
    Local,
    Item,
    Quantity,
    Action(ActivityType),
}

fn action_keyword(normalized: &str) -> Option<ActivityType> {
    let lookup = |word: &str| {
        if DEPOSIT_KEYWORDS.contains(&word) {
            Some(ActivityType::Deposito)
        } else if WITHDRAWAL_KEYWORDS.contains(&word) {
            Some(ActivityType::Saque)
        } else if INVENTORY_IN_KEYWORDS.contains(&word) {
            Some(ActivityType::InventarioEntrada)
        } else if INVENTORY_OUT_KEYWORDS.contains(&word) {
            Some(ActivityType::InventarioSaida)
        } else {
            None
        }
    };

    lookup(normalized).or_else(|| {
        // "item adicionado ao baú" or "depósito de itens"
        let mut words = normalized.split_whitespace();
        let first = words.next()?;
        match words.next() {
            Some(second) => lookup(&format!("{} {}", first, second)).or_else(|| lookup(first)),
            None => lookup(first),
        }
    })
}

fn classify_label(label: &str) -> Option<Label> {
    let normalized = normalize_label(label);

    if MEMBER_LABELS.contains(&normalized.as_str()) {
        Some(Label::Member)
    } else if LOCAL_LABELS.iter().any(|l| normalized.starts_with(l)) {
        Some(Label::Local)
    } else if ITEM_LABELS.contains(&normalized.as_str()) {
        Some(Label::Item)
    } else if QUANTITY_LABELS.contains(&normalized.as_str()) {
        Some(Label::Quantity)
    } else {
        action_keyword(&normalized).map(Label::Action)
    }
}

/// A bare title line such as `📦 DEPÓSITO` or `Item removido`
fn title_action(line: &str) -> Option<ActivityType> {
    let normalized = normalize_label(line);
    if normalized.is_empty() || normalized.split_whitespace().count() > 4 {
        return None;
    }
    action_keyword(&normalized)
}

/// Parses `1.500`, `1.500,00` or `20` into an integer quantity
fn parse_quantity(value: &str) -> Option<i64> {
    let integer_part = value.split(',').next().unwrap_or_default();
    let digits: String = integer_part.chars().filter(|c| *c != '.').collect();
    digits.parse::<i64>().ok()
}

#[derive(Debug, Default, PartialEq)]
struct Amount {
    item: Option<String>,
    quantity: Option<i64>,
    money: bool,
}

fn parse_amount(value: &str) -> Amount {
    let value = value.trim();
    if value.is_empty() {
        return Amount::default();
    }

    if let Some(caps) = MONEY_PREFIX
        .captures(value)
        .or_else(|| MONEY_SUFFIX.captures(value))
    {
        return Amount {
            item: None,
            quantity: parse_quantity(&caps["n"]),
            money: true,
        };
    }

    if let Some(caps) = NUMBER_ONLY.captures(value) {
        return Amount {
            item: None,
            quantity: parse_quantity(&caps["n"]),
            money: false,
        };
    }

    if let Some(caps) = QUANTITY_FIRST.captures(value) {
        return amount_with_item(caps["item"].trim(), parse_quantity(&caps["n"]));
    }

    if let Some(caps) = ITEM_FIRST.captures(value) {
        let quantity = caps
            .name("n1")
            .or_else(|| caps.name("n2"))
            .or_else(|| caps.name("n3"))
            .and_then(|m| parse_quantity(m.as_str()));
        return amount_with_item(caps["item"].trim(), quantity);
    }

    amount_with_item(value, None)
}

fn amount_with_item(item: &str, quantity: Option<i64>) -> Amount {
    let item = item.trim_end_matches(|c: char| c == '.' || c == ',').trim();
    Amount {
        money: fold(item).split_whitespace().next() == Some("dinheiro"),
        item: Some(item.to_string()).filter(|i| !i.is_empty()),
        quantity,
    }
}

/// Splits a member value into (id, name)
fn parse_member(value: &str) -> (Option<String>, Option<String>) {
    let value = value.trim();
    let name = |s: &str| Some(s.trim().to_string()).filter(|n| !n.is_empty());

    if let Some(caps) = MEMBER_MENTION.captures(value) {
        return (Some(caps["id"].to_string()), None);
    }
    if let Some(caps) = MEMBER_ID_FIRST.captures(value) {
        return (Some(caps["id"].to_string()), name(&caps["name"]));
    }
    if let Some(caps) = MEMBER_ID_LAST.captures(value) {
        let id = caps
            .name("id1")
            .or_else(|| caps.name("id2"))
            .or_else(|| caps.name("id3"))
            .or_else(|| caps.name("id4"))
            .map(|m| m.as_str().to_string());
        return (id, name(&caps["name"]));
    }
    (None, name(value))
}

/// Derives the category of an item from keywords in its name
pub fn categorize_item(item: &str) -> ActivityCategory {
    let folded = fold(item);
    let words: Vec<&str> = folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let matches = |keywords: &[&str]| {
        words.iter().any(|word| {
            keywords.iter().any(|kw| {
                *word == *kw
                    || word.strip_suffix('s') == Some(*kw)
                    || word.strip_suffix("es") == Some(*kw)
            })
        })
    };

    if words.first() == Some(&"dinheiro") {
        ActivityCategory::Dinheiro
    } else if matches(ANIMAL_KEYWORDS) {
        ActivityCategory::Animais
    } else if matches(PLANT_KEYWORDS) {
        ActivityCategory::Plantas
    } else {
        ActivityCategory::Outros
    }
}

/// `1500` → `1.500`
fn format_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    if value < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

#[derive(Debug, Default)]
struct ParseState {
    tipo: Option<ActivityType>,
    membro_id: Option<String>,
    membro_nome: Option<String>,
    item: Option<String>,
    quantidade: Option<i64>,
    money: bool,
    local: Option<String>,
}

impl ParseState {
    fn apply_amount(&mut self, amount: Amount) {
        if amount.money {
            self.money = true;
        }
        if self.item.is_none() {
            self.item = amount.item;
        }
        if self.quantidade.is_none() {
            self.quantidade = amount.quantity;
        }
    }

    fn apply_member(&mut self, value: &str) {
        let (id, name) = parse_member(value);
        if self.membro_id.is_none() {
            self.membro_id = id;
        }
        if self.membro_nome.is_none() {
            self.membro_nome = name;
        }
    }

    fn apply_label(&mut self, label: Label, value: &str) {
        match label {
            Label::Member => self.apply_member(value),
            Label::Local => {
                if self.local.is_none() && !value.is_empty() {
                    self.local = Some(value.to_string());
                }
            }
            Label::Item | Label::Quantity => self.apply_amount(parse_amount(value)),
            Label::Action(tipo) => {
                if self.tipo.is_none() {
                    self.tipo = Some(tipo);
                }
                self.apply_amount(parse_amount(value));
            }
        }
    }

    fn apply_prose(&mut self, caps: &Captures) {
        let Some(tipo) = action_keyword(&fold(&caps["verb"])) else {
            return;
        };
        if self.tipo.is_none() {
            self.tipo = Some(tipo);
        }
        self.apply_member(&caps["name"]);
        self.apply_amount(parse_amount(&caps["value"]));

        if let Some(local) = caps.name("local") {
            let folded = fold(local.as_str());
            if !folded.starts_with("inventario") && self.local.is_none() {
                // Drop the "baú"/"armazém" noun, keep its name
                let name = local
                    .as_str()
                    .split_once(char::is_whitespace)
                    .map(|(_, rest)| rest.trim().to_string())
                    .filter(|rest| !rest.is_empty());
                self.local = name;
            }
        }
    }

    fn finish(self) -> Option<ParsedActivity> {
        let tipo = self.tipo?;
        let quantidade = self.quantidade.filter(|q| *q > 0)?;

        let categoria = match (self.money, self.item.as_deref()) {
            (true, _) => ActivityCategory::Dinheiro,
            (false, Some(item)) => categorize_item(item),
            (false, None) => ActivityCategory::Outros,
        };

        let who = match (&self.membro_nome, &self.membro_id) {
            (Some(name), Some(id)) => format!("{} ({})", name, id),
            (Some(name), None) => name.clone(),
            (None, Some(id)) => format!("ID {}", id),
            (None, None) => "Alguém".to_string(),
        };
        let what = match (&categoria, &self.item) {
            (ActivityCategory::Dinheiro, _) => format!("${}", format_thousands(quantidade)),
            (_, Some(item)) => format!("{}x {}", quantidade, item),
            (_, None) => format!("{} itens", quantidade),
        };
        let local = self
            .local
            .as_ref()
            .map(|l| format!(" no baú {}", l))
            .unwrap_or_default();

        Some(ParsedActivity {
            tipo,
            categoria,
            display_text: format!("{} {} {}{}", who, tipo.verb(), what, local),
            membro_id: self.membro_id,
            membro_nome: self.membro_nome,
            item: if categoria == ActivityCategory::Dinheiro {
                None
            } else {
                self.item
            },
            quantidade,
            local: self.local,
        })
    }
}

/// Parses the flattened text of a farm log message.
///
/// # Arguments
/// - `text` - Message text as produced by [`message_text`]
///
/// # Returns
/// - `Some(ParsedActivity)` - An action keyword and a positive quantity were found
/// - `None` - The text is not a recognised farm log
pub fn parse_discord_message(text: &str) -> Option<ParsedActivity> {
    let mut state = ParseState::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let mut prose_candidate = line;

        if let Some(caps) = LABELLED_LINE.captures(line) {
            let label = caps
                .name("bl")
                .or_else(|| caps.name("pl"))
                .map(|m| m.as_str())
                .unwrap_or_default();
            let value = caps.name("value").map_or("", |m| m.as_str()).trim();

            if let Some(kind) = classify_label(label) {
                state.apply_label(kind, value);
                continue;
            }
            // "Log: João depositou 10x Milho"
            if !value.is_empty() && PROSE_LINE.is_match(value) {
                prose_candidate = value;
            }
        }

        if let Some(caps) = PROSE_LINE.captures(prose_candidate) {
            state.apply_prose(&caps);
            continue;
        }

        if state.tipo.is_none() {
            state.tipo = title_action(line);
        }
    }

    state.finish()
}
