#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod events;
pub mod protocols;
pub mod tokens;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{DecoderConfig, ProgramOverride};
pub use decoder::TransactionDecoder;
pub use decoder::aggregate::{Diagnostic, TransactionResult, TransactionSummary, ValidationIssue};
pub use decoder::family::{FamilyDecoder, decoder_for};
pub use error::{DecodeError, Error};
pub use events::{
    Confidence, CreateEvent, DecodedEvent, Direction, MigrationEvent, SwapDetail, TradeEvent,
    TradeKind,
};
pub use protocols::{InstructionKind, ProgramFamily, ProgramRegistry};
pub use solana_pubkey::Pubkey;
pub use tokens::{BaseCurrency, KnownTokens, TokenInfo, TokenMetadata, format_token_amount};
pub use types::{CompiledInstruction, InnerInstructions, InstructionIndex, TransactionInput};
