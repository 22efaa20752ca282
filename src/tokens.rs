use std::collections::{HashMap, HashSet};

use serde::Serialize;
use solana_pubkey::{Pubkey, pubkey};

pub const NATIVE_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");
pub const USDC_MINT: Pubkey = pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");
pub const USDT_MINT: Pubkey = pubkey!("Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB");

/// Decimals assumed for a created token when neither the payload nor the
/// metadata source says otherwise.
pub const DEFAULT_DECIMALS: u8 = 9;

/// Decides trade direction: spending a base currency is a buy.
pub trait BaseCurrency {
    fn is_base_currency(&self, mint: &Pubkey) -> bool;
}

/// Optional enrichment for creation events. Never needed for correctness.
pub trait TokenMetadata {
    fn lookup(&self, mint: &Pubkey) -> Option<TokenInfo>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(symbol: &str, name: &str, decimals: u8) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals,
        }
    }
}

/// In-memory token table seeded with SOL, USDC and USDT, all of which count
/// as base currencies.
#[derive(Debug, Clone)]
pub struct KnownTokens {
    tokens: HashMap<Pubkey, TokenInfo>,
    base_currencies: HashSet<Pubkey>,
}

impl Default for KnownTokens {
    fn default() -> Self {
        let tokens = HashMap::from([
            (NATIVE_MINT, TokenInfo::new("SOL", "Solana", 9)),
            (USDC_MINT, TokenInfo::new("USDC", "USD Coin", 6)),
            (USDT_MINT, TokenInfo::new("USDT", "Tether USD", 6)),
        ]);
        let base_currencies = HashSet::from([NATIVE_MINT, USDC_MINT, USDT_MINT]);
        Self {
            tokens,
            base_currencies,
        }
    }
}

impl KnownTokens {
    pub fn with_token(mut self, mint: Pubkey, info: TokenInfo) -> Self {
        self.tokens.insert(mint, info);
        self
    }

    pub fn with_base_currency(mut self, mint: Pubkey) -> Self {
        self.base_currencies.insert(mint);
        self
    }

    pub fn base_currencies(&self) -> impl Iterator<Item = &Pubkey> {
        self.base_currencies.iter()
    }
}

impl BaseCurrency for KnownTokens {
    fn is_base_currency(&self, mint: &Pubkey) -> bool {
        self.base_currencies.contains(mint)
    }
}

impl TokenMetadata for KnownTokens {
    fn lookup(&self, mint: &Pubkey) -> Option<TokenInfo> {
        self.tokens.get(mint).cloned()
    }
}

/// Renders base units as a decimal string without trailing fractional zeros.
pub fn format_token_amount(amount: u64, decimals: u8) -> String {
    if decimals == 0 || amount == 0 {
        return amount.to_string();
    }
    let Some(divisor) = 10u64.checked_pow(u32::from(decimals)) else {
        // more decimals than u64 has digits: everything is fractional
        let fraction = format!("{amount:0>width$}", width = usize::from(decimals));
        return format!("0.{}", fraction.trim_end_matches('0'));
    };
    let integer = amount / divisor;
    let fraction = amount % divisor;
    if fraction == 0 {
        return integer.to_string();
    }
    let fraction = format!("{fraction:0>width$}", width = usize::from(decimals));
    format!("{integer}.{}", fraction.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_marks_stablecoins_and_sol_as_base() {
        let known = KnownTokens::default();
        assert!(known.is_base_currency(&NATIVE_MINT));
        assert!(known.is_base_currency(&USDC_MINT));
        assert!(known.is_base_currency(&USDT_MINT));
        assert!(!known.is_base_currency(&Pubkey::new_from_array([9; 32])));
    }

    #[test]
    fn extra_base_currency_is_honored() {
        let mint = Pubkey::new_from_array([4; 32]);
        let known = KnownTokens::default().with_base_currency(mint);
        assert!(known.is_base_currency(&mint));
        assert_eq!(known.base_currencies().count(), 4);
    }

    #[test]
    fn lookup_returns_decimals() {
        let known = KnownTokens::default();
        assert_eq!(known.lookup(&USDC_MINT).map(|t| t.decimals), Some(6));
        assert_eq!(known.lookup(&Pubkey::new_from_array([1; 32])), None);
    }

    #[test]
    fn format_token_amount_cases() {
        assert_eq!(format_token_amount(1_500_000_000, 9), "1.5");
        assert_eq!(format_token_amount(1_000_000, 6), "1");
        assert_eq!(format_token_amount(1, 6), "0.000001");
        assert_eq!(format_token_amount(42, 0), "42");
        assert_eq!(format_token_amount(7, 25), "0.0000000000000000000000007");
    }
}
