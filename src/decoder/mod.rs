pub mod accounts;
pub mod aggregate;
pub(crate) mod build;
pub mod discriminator;
pub mod family;
pub mod fields;
pub mod heuristic;

use std::sync::Arc;

use solana_pubkey::Pubkey;

use crate::config::DecoderConfig;
use crate::decoder::aggregate::TransactionResult;
use crate::decoder::build::{BuildContext, build_event};
use crate::decoder::family::decoder_for;
use crate::error::DecodeError;
use crate::events::{Confidence, DecodedEvent};
use crate::protocols::{ProgramFamily, ProgramRegistry};
use crate::tokens::{BaseCurrency, KnownTokens, TokenMetadata};
use crate::types::{CompiledInstruction, InstructionIndex, TransactionInput};

/// Turns transactions into creation, trade and migration events.
///
/// Cheap to clone and safe to share: the registry and collaborators sit
/// behind `Arc`, and decoding never mutates the decoder.
#[derive(Clone)]
pub struct TransactionDecoder {
    registry: Arc<ProgramRegistry>,
    base_currency: Arc<dyn BaseCurrency + Send + Sync>,
    metadata: Arc<dyn TokenMetadata + Send + Sync>,
    enable_heuristics: bool,
}

impl Default for TransactionDecoder {
    fn default() -> Self {
        let known = Arc::new(KnownTokens::default());
        Self {
            registry: Arc::new(ProgramRegistry::default()),
            base_currency: known.clone(),
            metadata: known,
            enable_heuristics: true,
        }
    }
}

impl TransactionDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &DecoderConfig) -> Self {
        let known = Arc::new(
            config
                .additional_base_currencies
                .iter()
                .fold(KnownTokens::default(), |known, mint| {
                    known.with_base_currency(*mint)
                }),
        );
        Self {
            registry: Arc::new(config.registry()),
            base_currency: known.clone(),
            metadata: known,
            enable_heuristics: config.enable_heuristics,
        }
    }

    pub fn with_registry(mut self, registry: ProgramRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn with_base_currency(mut self, base: Arc<dyn BaseCurrency + Send + Sync>) -> Self {
        self.base_currency = base;
        self
    }

    pub fn with_token_metadata(mut self, metadata: Arc<dyn TokenMetadata + Send + Sync>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_heuristics(mut self, enabled: bool) -> Self {
        self.enable_heuristics = enabled;
        self
    }

    /// Routes another program id to a family. Clones of this decoder made
    /// earlier keep their own registry.
    pub fn register_program(&mut self, program_id: Pubkey, family: ProgramFamily) {
        Arc::make_mut(&mut self.registry).insert(program_id, family);
    }

    pub fn registry(&self) -> &ProgramRegistry {
        &self.registry
    }

    /// Family that owns `program_id`, or `UnrecognizedProgram`.
    pub fn route(&self, program_id: &Pubkey) -> Result<ProgramFamily, DecodeError> {
        self.registry
            .resolve_family(program_id)
            .ok_or(DecodeError::UnrecognizedProgram)
    }

    /// Decodes every instruction in occurrence order. Never fails: problems
    /// with individual instructions end up in `diagnostics`.
    pub fn decode(&self, tx: &TransactionInput) -> TransactionResult {
        let mut result = TransactionResult::new(tx.signature.clone(), tx.slot, tx.block_time);

        for (index, ix) in tx.instructions_in_order() {
            let Ok(program_id) = tx.program_id(ix) else {
                tracing::warn!(%index, program_id_index = ix.program_id_index, "program id index out of range");
                continue;
            };
            let Ok(family) = self.route(&program_id) else {
                tracing::trace!(%index, "skipping unregistered program");
                continue;
            };

            match self.decode_instruction(tx, index, ix, family) {
                Ok(Some(event)) => {
                    tracing::trace!(%index, %family, confidence = %event.confidence(), "decoded instruction");
                    result.record(event);
                }
                Ok(None) => {}
                Err(error) => {
                    if matches!(error, DecodeError::MalformedPayload { .. }) {
                        tracing::warn!(%index, %family, %error, "malformed instruction");
                    } else {
                        tracing::debug!(%index, %family, %error, "instruction produced no event");
                    }
                    result.record_failure(index, program_id, family, error);
                }
            }
        }

        result
    }

    /// Decodes one instruction of `tx` already routed to `family`.
    ///
    /// `Ok(None)` means the instruction was recognized but carries no event
    /// (liquidity deposits and withdrawals).
    pub fn decode_instruction(
        &self,
        tx: &TransactionInput,
        index: InstructionIndex,
        ix: &CompiledInstruction,
        family: ProgramFamily,
    ) -> Result<Option<DecodedEvent>, DecodeError> {
        let decoder = decoder_for(family);
        let accounts = tx.instruction_accounts(ix)?;
        let ctx = BuildContext {
            index,
            fee_payer: tx.fee_payer(),
            block_time: tx.block_time,
            default_decimals: decoder.default_decimals(),
            base: self.base_currency.as_ref(),
            metadata: self.metadata.as_ref(),
        };

        match discriminator::resolve(decoder, &ix.data) {
            Ok(resolved) => build_event(
                &ctx,
                resolved.spec,
                &accounts,
                &ix.data,
                resolved.data_start(),
                Confidence::Exact,
            ),
            Err(DecodeError::UnresolvedDiscriminator) if self.enable_heuristics => {
                let profile = decoder.heuristic_profile(&ix.data);
                heuristic::decode(&ctx, &profile, &accounts, &ix.data).map(Some)
            }
            Err(error) => Err(error),
        }
    }

    /// Decodes a transaction given as JSON in the shape of [`TransactionInput`].
    pub fn decode_json(&self, json: &str) -> Result<TransactionResult, crate::Error> {
        let tx = TransactionInput::from_json(json)?;
        Ok(self.decode(&tx))
    }
}
