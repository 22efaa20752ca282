use solana_pubkey::Pubkey;

use crate::decoder::build::{BuildContext, build_event};
use crate::error::DecodeError;
use crate::events::{Confidence, DecodedEvent};
use crate::protocols::{
    HEURISTIC_CREATE_PAYLOAD, HEURISTIC_TRADE_PAYLOAD, HeuristicProfile, InstructionSpec,
};

/// Picks a shape for an unresolved instruction. First match wins: creation,
/// then trade, then migration.
pub fn classify(
    profile: &HeuristicProfile,
    account_count: usize,
    payload_len: usize,
) -> Option<&InstructionSpec> {
    let data_start = profile.data_start;
    if account_count >= profile.create.accounts.min_accounts
        && payload_len >= data_start + HEURISTIC_CREATE_PAYLOAD
    {
        return Some(&profile.create);
    }
    if account_count >= profile.trade.accounts.min_accounts
        && payload_len >= data_start + HEURISTIC_TRADE_PAYLOAD
    {
        return Some(&profile.trade);
    }
    if account_count >= profile.migration.accounts.min_accounts {
        return Some(&profile.migration);
    }
    None
}

/// Best-effort decode of an instruction no discriminator table recognized.
/// Every event produced here is marked [`Confidence::Heuristic`].
pub(crate) fn decode(
    ctx: &BuildContext<'_>,
    profile: &HeuristicProfile,
    accounts: &[Pubkey],
    payload: &[u8],
) -> Result<DecodedEvent, DecodeError> {
    let spec = classify(profile, accounts.len(), payload.len()).ok_or(DecodeError::Unclassified)?;
    tracing::debug!(
        index = %ctx.index,
        kind = %spec.kind,
        accounts = accounts.len(),
        len = payload.len(),
        "falling back to shape-based decode"
    );

    let event = build_event(
        ctx,
        spec,
        accounts,
        payload,
        profile.data_start,
        Confidence::Heuristic,
    )?
    .ok_or(DecodeError::Unclassified)?;

    if let DecodedEvent::Trade { trade, .. } = &event
        && trade.amount_in == 0
    {
        return Err(DecodeError::Unclassified);
    }
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::InstructionKind;

    #[test]
    fn shapes_are_tried_create_trade_migration() {
        let profile = HeuristicProfile::with_data_start(8);
        let kind = |accounts, len| classify(&profile, accounts, len).map(|s| s.kind);

        assert_eq!(kind(8, 40), Some(InstructionKind::Create));
        assert_eq!(kind(8, 39), Some(InstructionKind::Swap));
        assert_eq!(kind(6, 24), Some(InstructionKind::Swap));
        assert_eq!(kind(6, 23), Some(InstructionKind::Migrate));
        assert_eq!(kind(4, 0), Some(InstructionKind::Migrate));
        assert_eq!(kind(3, 100), None);
    }

    #[test]
    fn data_start_shifts_the_length_thresholds() {
        let profile = HeuristicProfile::with_data_start(1);
        assert_eq!(
            classify(&profile, 6, 17).map(|s| s.kind),
            Some(InstructionKind::Swap)
        );
        assert_eq!(
            classify(&profile, 8, 33).map(|s| s.kind),
            Some(InstructionKind::Create)
        );
    }
}
