use solana_pubkey::Pubkey;

use crate::decoder::accounts::{self, RoleMap};
use crate::decoder::fields::{self, FieldSet};
use crate::error::DecodeError;
use crate::events::{Confidence, CreateEvent, DecodedEvent, MigrationEvent, SwapDetail, TradeEvent};
use crate::protocols::{EventCategory, InstructionSpec, Role};
use crate::tokens::{BaseCurrency, TokenMetadata};
use crate::types::InstructionIndex;

/// Per-instruction inputs shared by the exact and fallback paths.
pub(crate) struct BuildContext<'a> {
    pub index: InstructionIndex,
    pub fee_payer: Option<&'a Pubkey>,
    pub block_time: Option<i64>,
    pub default_decimals: u8,
    pub base: &'a dyn BaseCurrency,
    pub metadata: &'a dyn TokenMetadata,
}

/// Binds accounts, extracts fields and assembles the event for `spec`.
///
/// `Ok(None)` is a recognized instruction with no event category.
pub(crate) fn build_event(
    ctx: &BuildContext<'_>,
    spec: &InstructionSpec,
    accounts: &[Pubkey],
    payload: &[u8],
    data_start: usize,
    confidence: Confidence,
) -> Result<Option<DecodedEvent>, DecodeError> {
    let Some(category) = spec.kind.category() else {
        tracing::debug!(index = %ctx.index, kind = %spec.kind, "instruction recognized, no event");
        return Ok(None);
    };

    let roles = accounts::bind(&spec.accounts, accounts, ctx.fee_payer, ctx.index)?;
    let values = fields::extract(spec.layout, payload, data_start);

    let event = match category {
        EventCategory::Create => {
            DecodedEvent::Create(create_event(ctx, spec, &roles, values, confidence))
        }
        EventCategory::Trade => trade_event(ctx, spec, &roles, &values, confidence),
        EventCategory::Migration => DecodedEvent::Migration(MigrationEvent {
            source_pool: roles.get_or_default(Role::SourcePool),
            destination_pool: roles.get_or_default(Role::DestinationPool),
            token: roles.get_or_default(Role::TokenMint),
            owner: roles.get_or_default(Role::Owner),
            amount: values.amount,
            instruction_index: ctx.index,
            timestamp: ctx.block_time,
            confidence,
        }),
    };
    Ok(Some(event))
}

fn create_event(
    ctx: &BuildContext<'_>,
    spec: &InstructionSpec,
    roles: &RoleMap,
    values: FieldSet,
    confidence: Confidence,
) -> CreateEvent {
    let token_mint = roles.get_or_default(Role::TokenMint);
    let known = ctx.metadata.lookup(&token_mint);
    let decimals = values
        .decimals
        .or_else(|| known.as_ref().map(|info| info.decimals))
        .unwrap_or(ctx.default_decimals);
    let symbol = values.symbol.or_else(|| known.map(|info| info.symbol));

    CreateEvent {
        token_mint,
        pool: roles.get_or_default(Role::Pool),
        creator: roles.get_or_default(Role::Creator),
        decimals,
        symbol,
        name: values.name,
        uri: values.uri,
        amount: values.amount,
        instruction_kind: spec.kind,
        instruction_index: ctx.index,
        timestamp: ctx.block_time,
        confidence,
    }
}

fn trade_event(
    ctx: &BuildContext<'_>,
    spec: &InstructionSpec,
    roles: &RoleMap,
    values: &FieldSet,
    confidence: Confidence,
) -> DecodedEvent {
    let token_in = roles.get_or_default(Role::TokenIn);
    let direction = fields::direction(&token_in, ctx.base);

    let trade = TradeEvent {
        token_in,
        token_out: roles.get_or_default(Role::TokenOut),
        pool: roles.get_or_default(Role::Pool),
        trader: roles.get_or_default(Role::Trader),
        amount_in: values.amount_in,
        amount_out: values.amount_out,
        kind: fields::trade_kind(direction),
        instruction_kind: spec.kind,
        instruction_index: ctx.index,
        confidence,
    };

    let detail = direction.map(|direction| SwapDetail {
        direction,
        token_in: trade.token_in,
        token_out: trade.token_out,
        pool: trade.pool,
        trader: trade.trader,
        amount_in: trade.amount_in,
        amount_out: trade.amount_out,
        min_amount_out: values.min_amount_out,
        max_amount_in: values.max_amount_in,
        slippage: fields::slippage(trade.amount_out, values.min_amount_out),
        instruction_index: ctx.index,
        confidence,
    });

    DecodedEvent::Trade { trade, detail }
}
