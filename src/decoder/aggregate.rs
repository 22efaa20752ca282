use serde::Serialize;
use solana_pubkey::Pubkey;

use crate::error::DecodeError;
use crate::events::{
    Confidence, CreateEvent, DecodedEvent, Direction, MigrationEvent, SwapDetail, TradeEvent,
    TradeKind,
};
use crate::protocols::ProgramFamily;
use crate::types::{InstructionIndex, base58};

/// Why an instruction from a registered program produced no event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub instruction_index: InstructionIndex,
    #[serde(with = "base58::pubkey")]
    pub program_id: Pubkey,
    pub family: ProgramFamily,
    pub error: DecodeError,
}

/// Everything decoded from one transaction.
///
/// `trade_buy_indices[i]` is the instruction index of `swap_buys[i]`; the same
/// holds for sells. Only [`TransactionResult::record`] appends, so the pairs
/// never drift apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionResult {
    pub signature: String,
    pub slot: u64,
    pub block_time: Option<i64>,
    pub creates: Vec<CreateEvent>,
    pub trades: Vec<TradeEvent>,
    pub trade_buy_indices: Vec<InstructionIndex>,
    pub trade_sell_indices: Vec<InstructionIndex>,
    pub migrations: Vec<MigrationEvent>,
    pub swap_buys: Vec<SwapDetail>,
    pub swap_sells: Vec<SwapDetail>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("transaction signature is empty")]
    EmptySignature,

    #[error("transaction slot is zero")]
    ZeroSlot,

    #[error("{indices} buy indices for {details} buy details")]
    BuyCountMismatch { indices: usize, details: usize },

    #[error("{indices} sell indices for {details} sell details")]
    SellCountMismatch { indices: usize, details: usize },

    #[error("trade at {instruction_index} has a zero {field} address")]
    ZeroTradeAddress {
        instruction_index: InstructionIndex,
        field: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionSummary {
    pub creates: usize,
    pub trades: usize,
    pub buys: usize,
    pub sells: usize,
    pub undirected_swaps: usize,
    pub migrations: usize,
    pub heuristic_events: usize,
    pub diagnostics: usize,
    /// Mints seen in creations and trades, in first-seen order.
    #[serde(with = "base58::pubkey_vec")]
    pub unique_tokens: Vec<Pubkey>,
}

impl TransactionResult {
    pub fn new(signature: impl Into<String>, slot: u64, block_time: Option<i64>) -> Self {
        Self {
            signature: signature.into(),
            slot,
            block_time,
            creates: Vec::new(),
            trades: Vec::new(),
            trade_buy_indices: Vec::new(),
            trade_sell_indices: Vec::new(),
            migrations: Vec::new(),
            swap_buys: Vec::new(),
            swap_sells: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn record(&mut self, event: DecodedEvent) {
        match event {
            DecodedEvent::Create(create) => self.creates.push(create),
            DecodedEvent::Migration(migration) => self.migrations.push(migration),
            DecodedEvent::Trade { trade, detail } => {
                if let Some(detail) = detail {
                    match detail.direction {
                        Direction::Buy => {
                            self.trade_buy_indices.push(detail.instruction_index);
                            self.swap_buys.push(detail);
                        }
                        Direction::Sell => {
                            self.trade_sell_indices.push(detail.instruction_index);
                            self.swap_sells.push(detail);
                        }
                    }
                }
                self.trades.push(trade);
            }
        }
    }

    pub fn record_failure(
        &mut self,
        instruction_index: InstructionIndex,
        program_id: Pubkey,
        family: ProgramFamily,
        error: DecodeError,
    ) {
        self.diagnostics.push(Diagnostic {
            instruction_index,
            program_id,
            family,
            error,
        });
    }

    pub fn event_count(&self) -> usize {
        self.creates.len() + self.trades.len() + self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.event_count() == 0
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.signature.is_empty() {
            issues.push(ValidationIssue::EmptySignature);
        }
        if self.slot == 0 {
            issues.push(ValidationIssue::ZeroSlot);
        }
        if self.trade_buy_indices.len() != self.swap_buys.len() {
            issues.push(ValidationIssue::BuyCountMismatch {
                indices: self.trade_buy_indices.len(),
                details: self.swap_buys.len(),
            });
        }
        if self.trade_sell_indices.len() != self.swap_sells.len() {
            issues.push(ValidationIssue::SellCountMismatch {
                indices: self.trade_sell_indices.len(),
                details: self.swap_sells.len(),
            });
        }

        let zero = Pubkey::default();
        for trade in &self.trades {
            for (field, key) in [
                ("token_in", trade.token_in),
                ("token_out", trade.token_out),
                ("pool", trade.pool),
            ] {
                if key == zero {
                    issues.push(ValidationIssue::ZeroTradeAddress {
                        instruction_index: trade.instruction_index,
                        field,
                    });
                }
            }
        }

        issues
    }

    pub fn summary(&self) -> TransactionSummary {
        let heuristic_events = self
            .creates
            .iter()
            .map(|c| c.confidence)
            .chain(self.trades.iter().map(|t| t.confidence))
            .chain(self.migrations.iter().map(|m| m.confidence))
            .filter(|c| *c == Confidence::Heuristic)
            .count();

        let mut unique_tokens: Vec<Pubkey> = Vec::new();
        let zero = Pubkey::default();
        let mints = self
            .creates
            .iter()
            .map(|c| c.token_mint)
            .chain(self.trades.iter().flat_map(|t| [t.token_in, t.token_out]));
        for mint in mints {
            if mint != zero && !unique_tokens.contains(&mint) {
                unique_tokens.push(mint);
            }
        }

        TransactionSummary {
            creates: self.creates.len(),
            trades: self.trades.len(),
            buys: self.swap_buys.len(),
            sells: self.swap_sells.len(),
            undirected_swaps: self
                .trades
                .iter()
                .filter(|t| t.kind == TradeKind::Swap)
                .count(),
            migrations: self.migrations.len(),
            heuristic_events,
            diagnostics: self.diagnostics.len(),
            unique_tokens,
        }
    }
}
