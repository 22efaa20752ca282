use solana_pubkey::Pubkey;

use crate::events::{Direction, TradeKind};
use crate::protocols::FieldName;
use crate::tokens::BaseCurrency;

/// Strictly below 1.0 so a fully missed minimum never reads as total loss.
pub const MAX_SLIPPAGE: f64 = 1.0 - f64::EPSILON / 2.0;

#[inline]
pub fn read_u64_le(data: &[u8], offset: usize) -> Option<u64> {
    let bytes: [u8; 8] = data.get(offset..offset.checked_add(8)?)?.try_into().ok()?;
    Some(u64::from_le_bytes(bytes))
}

#[inline]
pub fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes: [u8; 4] = data.get(offset..offset.checked_add(4)?)?.try_into().ok()?;
    Some(u32::from_le_bytes(bytes))
}

#[inline]
pub fn read_u8(data: &[u8], offset: usize) -> Option<u8> {
    data.get(offset).copied()
}

/// Borsh string: u32 LE length prefix then UTF-8 bytes. Returns the string and
/// the number of bytes consumed.
pub fn read_borsh_string(data: &[u8], offset: usize) -> Option<(String, usize)> {
    let len = usize::try_from(read_u32_le(data, offset)?).ok()?;
    let start = offset.checked_add(4)?;
    let bytes = data.get(start..start.checked_add(len)?)?;
    let text = std::str::from_utf8(bytes).ok()?;
    Some((text.to_string(), 4 + len))
}

/// Values read from an instruction payload. Anything the payload was too
/// short to carry stays at zero / `None`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldSet {
    pub amount_in: u64,
    pub amount_out: u64,
    pub min_amount_out: u64,
    pub max_amount_in: u64,
    pub amount: u64,
    pub decimals: Option<u8>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub uri: Option<String>,
}

/// Reads `layout` in order starting at `data_start`. The first field that does
/// not fit ends extraction; it and every later field keep their zero value.
pub fn extract(layout: &[FieldName], payload: &[u8], data_start: usize) -> FieldSet {
    let mut fields = FieldSet::default();
    let mut cursor = data_start;

    for field in layout {
        let consumed = match field {
            FieldName::Decimals => read_u8(payload, cursor).map(|v| {
                fields.decimals = Some(v);
                1
            }),
            FieldName::Name | FieldName::Symbol | FieldName::Uri => {
                read_borsh_string(payload, cursor).map(|(text, used)| {
                    let slot = match field {
                        FieldName::Name => &mut fields.name,
                        FieldName::Symbol => &mut fields.symbol,
                        _ => &mut fields.uri,
                    };
                    *slot = Some(text);
                    used
                })
            }
            FieldName::Skip64 => read_u64_le(payload, cursor).map(|_| 8),
            FieldName::AmountIn
            | FieldName::AmountOut
            | FieldName::MinAmountOut
            | FieldName::MaxAmountIn
            | FieldName::Amount => read_u64_le(payload, cursor).map(|v| {
                match field {
                    FieldName::AmountIn => fields.amount_in = v,
                    FieldName::AmountOut => fields.amount_out = v,
                    FieldName::MinAmountOut => fields.min_amount_out = v,
                    FieldName::MaxAmountIn => fields.max_amount_in = v,
                    _ => fields.amount = v,
                }
                8
            }),
        };

        match consumed {
            Some(n) => cursor += n,
            None => {
                tracing::trace!(?field, cursor, len = payload.len(), "payload ends before field");
                break;
            }
        }
    }

    fields
}

/// Shortfall of `actual` against `expected` as a fraction in `[0, 1)`.
///
/// Zero when there is no bound, when `actual` is unresolved (zero), or when
/// the bound was met.
pub fn slippage(actual: u64, expected: u64) -> f64 {
    if expected == 0 || actual == 0 || actual >= expected {
        return 0.0;
    }
    let shortfall = (expected - actual) as f64 / expected as f64;
    shortfall.min(MAX_SLIPPAGE)
}

/// `None` when the input token is unknown (all-zero address).
pub fn direction(token_in: &Pubkey, base: &dyn BaseCurrency) -> Option<Direction> {
    if *token_in == Pubkey::default() {
        return None;
    }
    if base.is_base_currency(token_in) {
        Some(Direction::Buy)
    } else {
        Some(Direction::Sell)
    }
}

pub fn trade_kind(direction: Option<Direction>) -> TradeKind {
    direction.map_or(TradeKind::Swap, TradeKind::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::{BUY_LAYOUT, CREATE_LAYOUT, EXACT_IN_LAYOUT};
    use crate::tokens::{KnownTokens, NATIVE_MINT, USDC_MINT};

    fn payload(prefix: &[u8], words: &[u64]) -> Vec<u8> {
        let mut data = prefix.to_vec();
        for word in words {
            data.extend_from_slice(&word.to_le_bytes());
        }
        data
    }

    fn borsh(text: &str) -> Vec<u8> {
        let mut out = (text.len() as u32).to_le_bytes().to_vec();
        out.extend_from_slice(text.as_bytes());
        out
    }

    #[test]
    fn reads_amounts_after_simple_discriminator() {
        let data = payload(&[1], &[1_000_000_000, 950_000_000]);
        let fields = extract(EXACT_IN_LAYOUT, &data, 1);
        assert_eq!(fields.amount_in, 1_000_000_000);
        assert_eq!(fields.min_amount_out, 950_000_000);
        assert_eq!(fields.amount_out, 0);
    }

    #[test]
    fn short_payload_leaves_trailing_fields_zero() {
        let data = payload(&[6], &[500]);
        let fields = extract(BUY_LAYOUT, &data, 1);
        assert_eq!(fields.amount_in, 500);
        assert_eq!(fields.max_amount_in, 0);

        let mut partial = payload(&[6], &[500]);
        partial.extend_from_slice(&[1, 2, 3]);
        assert_eq!(extract(BUY_LAYOUT, &partial, 1), fields);
    }

    #[test]
    fn data_start_past_payload_yields_defaults() {
        assert_eq!(extract(EXACT_IN_LAYOUT, &[1, 2], 8), FieldSet::default());
    }

    #[test]
    fn max_amount_is_not_wrapped() {
        let data = payload(&[1], &[u64::MAX, u64::MAX]);
        let fields = extract(EXACT_IN_LAYOUT, &data, 1);
        assert_eq!(fields.amount_in, u64::MAX);
        assert_eq!(fields.min_amount_out, u64::MAX);
    }

    #[test]
    fn create_layout_reads_decimals_then_amount() {
        let mut data = vec![9, 6];
        data.extend_from_slice(&42u64.to_le_bytes());
        let fields = extract(CREATE_LAYOUT, &data, 1);
        assert_eq!(fields.decimals, Some(6));
        assert_eq!(fields.amount, 42);
    }

    #[test]
    fn borsh_strings_advance_the_cursor() {
        let mut data = vec![0; 8];
        data.extend(borsh("Dog Coin"));
        data.extend(borsh("DOG"));
        data.extend(borsh("https://x.y/dog.json"));
        let layout = [FieldName::Name, FieldName::Symbol, FieldName::Uri];
        let fields = extract(&layout, &data, 8);
        assert_eq!(fields.name.as_deref(), Some("Dog Coin"));
        assert_eq!(fields.symbol.as_deref(), Some("DOG"));
        assert_eq!(fields.uri.as_deref(), Some("https://x.y/dog.json"));
    }

    #[test]
    fn truncated_string_stops_extraction() {
        let mut data = vec![0; 8];
        data.extend(borsh("Dog Coin"));
        data.extend_from_slice(&200u32.to_le_bytes());
        data.extend_from_slice(b"DO");
        let layout = [FieldName::Name, FieldName::Symbol, FieldName::Uri];
        let fields = extract(&layout, &data, 8);
        assert_eq!(fields.name.as_deref(), Some("Dog Coin"));
        assert_eq!(fields.symbol, None);
        assert_eq!(fields.uri, None);
    }

    #[test]
    fn slippage_edges() {
        assert_eq!(slippage(100, 0), 0.0);
        assert_eq!(slippage(0, 100), 0.0);
        assert_eq!(slippage(100, 100), 0.0);
        assert_eq!(slippage(150, 100), 0.0);
        assert!((slippage(90, 100) - 0.1).abs() < 1e-12);
        let worst = slippage(1, u64::MAX);
        assert!(worst < 1.0);
        assert!(worst > 0.99);
    }

    #[test]
    fn direction_follows_base_currency() {
        let known = KnownTokens::default();
        assert_eq!(direction(&NATIVE_MINT, &known), Some(Direction::Buy));
        assert_eq!(direction(&USDC_MINT, &known), Some(Direction::Buy));
        assert_eq!(
            direction(&Pubkey::new_from_array([3; 32]), &known),
            Some(Direction::Sell)
        );
        assert_eq!(direction(&Pubkey::default(), &known), None);
        assert_eq!(trade_kind(None), TradeKind::Swap);
    }
}
