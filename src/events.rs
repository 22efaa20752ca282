use serde::Serialize;
use solana_pubkey::Pubkey;

use crate::protocols::InstructionKind;
use crate::types::{InstructionIndex, base58};

/// Whether an event came from a discriminator match or from shape guessing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Confidence {
    Exact,
    Heuristic,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TradeKind {
    Buy,
    Sell,
    /// Input token unknown, so no direction could be assigned.
    Swap,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

impl From<Direction> for TradeKind {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Buy => Self::Buy,
            Direction::Sell => Self::Sell,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateEvent {
    #[serde(with = "base58::pubkey")]
    pub token_mint: Pubkey,
    #[serde(with = "base58::pubkey")]
    pub pool: Pubkey,
    #[serde(with = "base58::pubkey")]
    pub creator: Pubkey,
    pub decimals: u8,
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Initial liquidity, or the creator's purchase folded into the creation.
    pub amount: u64,
    pub instruction_kind: InstructionKind,
    pub instruction_index: InstructionIndex,
    pub timestamp: Option<i64>,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeEvent {
    #[serde(with = "base58::pubkey")]
    pub token_in: Pubkey,
    #[serde(with = "base58::pubkey")]
    pub token_out: Pubkey,
    #[serde(with = "base58::pubkey")]
    pub pool: Pubkey,
    #[serde(with = "base58::pubkey")]
    pub trader: Pubkey,
    pub amount_in: u64,
    /// Zero when the payload does not carry it; instruction data alone cannot
    /// tell what was actually received.
    pub amount_out: u64,
    pub kind: TradeKind,
    pub instruction_kind: InstructionKind,
    pub instruction_index: InstructionIndex,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationEvent {
    #[serde(with = "base58::pubkey")]
    pub source_pool: Pubkey,
    #[serde(with = "base58::pubkey")]
    pub destination_pool: Pubkey,
    #[serde(with = "base58::pubkey")]
    pub token: Pubkey,
    #[serde(with = "base58::pubkey")]
    pub owner: Pubkey,
    pub amount: u64,
    pub instruction_index: InstructionIndex,
    pub timestamp: Option<i64>,
    pub confidence: Confidence,
}

/// Directional view of a trade, carrying the limit the trader set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapDetail {
    pub direction: Direction,
    #[serde(with = "base58::pubkey")]
    pub token_in: Pubkey,
    #[serde(with = "base58::pubkey")]
    pub token_out: Pubkey,
    #[serde(with = "base58::pubkey")]
    pub pool: Pubkey,
    #[serde(with = "base58::pubkey")]
    pub trader: Pubkey,
    pub amount_in: u64,
    pub amount_out: u64,
    pub min_amount_out: u64,
    pub max_amount_in: u64,
    /// Fraction in `[0, 1)` by which `amount_out` fell short of `min_amount_out`.
    pub slippage: f64,
    pub instruction_index: InstructionIndex,
    pub confidence: Confidence,
}

/// Outcome of one classified instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedEvent {
    Create(CreateEvent),
    Trade {
        trade: TradeEvent,
        detail: Option<SwapDetail>,
    },
    Migration(MigrationEvent),
}

impl DecodedEvent {
    pub fn confidence(&self) -> Confidence {
        match self {
            Self::Create(create) => create.confidence,
            Self::Trade { trade, .. } => trade.confidence,
            Self::Migration(migration) => migration.confidence,
        }
    }

    pub fn instruction_index(&self) -> InstructionIndex {
        match self {
            Self::Create(create) => create.instruction_index,
            Self::Trade { trade, .. } => trade.instruction_index,
            Self::Migration(migration) => migration.instruction_index,
        }
    }
}
