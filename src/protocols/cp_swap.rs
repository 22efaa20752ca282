use crate::decoder::family::FamilyDecoder;
use crate::protocols::{
    AMOUNT_LAYOUT, AccountSchema, COMPLEX_DATA_START, EXACT_IN_LAYOUT, EXACT_OUT_LAYOUT,
    GENERIC_SWAP, InstructionKind, InstructionSpec, ProgramFamily, Role, RoleSource,
};

pub const SWAP_BASE_IN: u8 = 11;
pub const SWAP_BASE_OUT: u8 = 12;

pub const INITIALIZE_DISCRIMINATOR: u64 =
    u64::from_le_bytes([175, 175, 109, 31, 13, 152, 155, 237]);
pub const SWAP_BASE_INPUT_DISCRIMINATOR: u64 =
    u64::from_le_bytes([143, 190, 90, 218, 196, 30, 51, 222]);
pub const SWAP_BASE_OUTPUT_DISCRIMINATOR: u64 =
    u64::from_le_bytes([55, 217, 98, 86, 163, 74, 180, 173]);

// payer, authority, amm_config, pool_state, input_token_account,
// output_token_account, input_vault, output_vault, input_token_program,
// output_token_program, input_token_mint, output_token_mint, observation_state
const SWAP_ACCOUNTS: AccountSchema = AccountSchema {
    min_accounts: 13,
    roles: &[
        (Role::Trader, RoleSource::Position(0)),
        (Role::Pool, RoleSource::Position(3)),
        (Role::TokenIn, RoleSource::Position(10)),
        (Role::TokenOut, RoleSource::Position(11)),
    ],
};

// creator, amm_config, authority, pool_state, token_0_mint, token_1_mint, ...
const INITIALIZE_ACCOUNTS: AccountSchema = AccountSchema {
    min_accounts: 20,
    roles: &[
        (Role::Creator, RoleSource::Position(0)),
        (Role::Pool, RoleSource::Position(3)),
        (Role::TokenMint, RoleSource::Position(4)),
    ],
};

pub static SIMPLE_INSTRUCTIONS: &[(u8, InstructionSpec)] = &[
    (
        SWAP_BASE_IN,
        InstructionSpec {
            kind: InstructionKind::SwapBaseIn,
            accounts: GENERIC_SWAP,
            layout: EXACT_IN_LAYOUT,
        },
    ),
    (
        SWAP_BASE_OUT,
        InstructionSpec {
            kind: InstructionKind::SwapBaseOut,
            accounts: GENERIC_SWAP,
            layout: EXACT_OUT_LAYOUT,
        },
    ),
];

pub static COMPLEX_INSTRUCTIONS: &[(u64, InstructionSpec)] = &[
    (
        INITIALIZE_DISCRIMINATOR,
        InstructionSpec {
            kind: InstructionKind::InitializePool,
            accounts: INITIALIZE_ACCOUNTS,
            // init_amount_0; init_amount_1 and open_time are not recorded
            layout: AMOUNT_LAYOUT,
        },
    ),
    (
        SWAP_BASE_INPUT_DISCRIMINATOR,
        InstructionSpec {
            kind: InstructionKind::SwapBaseIn,
            accounts: SWAP_ACCOUNTS,
            layout: EXACT_IN_LAYOUT,
        },
    ),
    (
        SWAP_BASE_OUTPUT_DISCRIMINATOR,
        InstructionSpec {
            kind: InstructionKind::SwapBaseOut,
            accounts: SWAP_ACCOUNTS,
            layout: EXACT_OUT_LAYOUT,
        },
    ),
];

pub struct CpSwapDecoder;

impl FamilyDecoder for CpSwapDecoder {
    fn family(&self) -> ProgramFamily {
        ProgramFamily::CpSwap
    }

    fn simple_table(&self) -> &'static [(u8, InstructionSpec)] {
        SIMPLE_INSTRUCTIONS
    }

    fn complex_table(&self) -> &'static [(u64, InstructionSpec)] {
        COMPLEX_INSTRUCTIONS
    }

    fn framing(&self) -> usize {
        COMPLEX_DATA_START
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::DiscriminatorKey;

    #[test]
    fn anchor_swaps_bind_mints_from_the_tail() {
        let spec = CpSwapDecoder
            .lookup(DiscriminatorKey::Complex(SWAP_BASE_INPUT_DISCRIMINATOR))
            .map(|s| (s.kind, s.accounts.min_accounts, s.accounts.roles));
        let Some((kind, min_accounts, roles)) = spec else {
            unreachable!("swap_base_input missing from table");
        };
        assert_eq!(kind, InstructionKind::SwapBaseIn);
        assert_eq!(min_accounts, 13);
        assert!(roles.contains(&(Role::TokenIn, RoleSource::Position(10))));
        assert!(roles.contains(&(Role::TokenOut, RoleSource::Position(11))));
    }

    #[test]
    fn initialize_is_a_pool_creation() {
        let spec = CpSwapDecoder.lookup(DiscriminatorKey::Complex(INITIALIZE_DISCRIMINATOR));
        assert_eq!(spec.map(|s| s.kind), Some(InstructionKind::InitializePool));
        assert_eq!(spec.map(|s| s.accounts.min_accounts), Some(20));
    }

    #[test]
    fn legacy_single_byte_swaps_still_resolve() {
        assert_eq!(
            CpSwapDecoder
                .lookup(DiscriminatorKey::Simple(SWAP_BASE_OUT))
                .map(|s| s.layout),
            Some(EXACT_OUT_LAYOUT)
        );
        assert!(CpSwapDecoder.lookup(DiscriminatorKey::Simple(1)).is_none());
    }
}
