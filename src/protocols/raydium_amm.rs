use crate::decoder::family::FamilyDecoder;
use crate::protocols::{
    AMOUNT_LAYOUT, AccountSchema, BUY_LAYOUT, CREATE_LAYOUT, EXACT_IN_LAYOUT, EXACT_OUT_LAYOUT,
    GENERIC_CREATE, GENERIC_MIGRATION, GENERIC_SWAP, InstructionKind, InstructionSpec,
    ProgramFamily, SIMPLE_DATA_START,
};

pub const INITIALIZE_POOL: u8 = 0;
pub const SWAP: u8 = 1;
pub const DEPOSIT: u8 = 2;
pub const WITHDRAW: u8 = 3;
pub const MIGRATE: u8 = 4;
pub const BUY: u8 = 6;
pub const SELL: u8 = 7;
pub const CREATE_POOL: u8 = 9;
pub const SWAP_BASE_IN: u8 = 11;
pub const SWAP_BASE_OUT: u8 = 12;

pub const INITIALIZE_DISCRIMINATOR: u64 = 0x175d_3d5b_8c84_f4aa;
pub const SWAP_DISCRIMINATOR: u64 = 0xf8c6_9e91_e175_87c8;
pub const BUY_DISCRIMINATOR: u64 = 0x6606_3d12_01da_ebea;
pub const SELL_DISCRIMINATOR: u64 = 0xb712_469c_946d_a122;

const NO_ACCOUNTS: AccountSchema = AccountSchema {
    min_accounts: 0,
    roles: &[],
};

const fn spec(
    kind: InstructionKind,
    accounts: AccountSchema,
    layout: &'static [crate::protocols::FieldName],
) -> InstructionSpec {
    InstructionSpec {
        kind,
        accounts,
        layout,
    }
}

pub static SIMPLE_INSTRUCTIONS: &[(u8, InstructionSpec)] = &[
    (
        INITIALIZE_POOL,
        spec(InstructionKind::InitializePool, GENERIC_CREATE, CREATE_LAYOUT),
    ),
    (SWAP, spec(InstructionKind::Swap, GENERIC_SWAP, EXACT_IN_LAYOUT)),
    (DEPOSIT, spec(InstructionKind::Deposit, NO_ACCOUNTS, &[])),
    (WITHDRAW, spec(InstructionKind::Withdraw, NO_ACCOUNTS, &[])),
    (
        MIGRATE,
        spec(InstructionKind::Migrate, GENERIC_MIGRATION, AMOUNT_LAYOUT),
    ),
    (BUY, spec(InstructionKind::Buy, GENERIC_SWAP, BUY_LAYOUT)),
    (SELL, spec(InstructionKind::Sell, GENERIC_SWAP, EXACT_IN_LAYOUT)),
    (
        CREATE_POOL,
        spec(InstructionKind::CreatePool, GENERIC_CREATE, CREATE_LAYOUT),
    ),
    (
        SWAP_BASE_IN,
        spec(InstructionKind::SwapBaseIn, GENERIC_SWAP, EXACT_IN_LAYOUT),
    ),
    (
        SWAP_BASE_OUT,
        spec(InstructionKind::SwapBaseOut, GENERIC_SWAP, EXACT_OUT_LAYOUT),
    ),
];

pub static COMPLEX_INSTRUCTIONS: &[(u64, InstructionSpec)] = &[
    (
        INITIALIZE_DISCRIMINATOR,
        spec(InstructionKind::InitializePool, GENERIC_CREATE, CREATE_LAYOUT),
    ),
    (
        SWAP_DISCRIMINATOR,
        spec(InstructionKind::Swap, GENERIC_SWAP, EXACT_IN_LAYOUT),
    ),
    (
        BUY_DISCRIMINATOR,
        spec(InstructionKind::Buy, GENERIC_SWAP, BUY_LAYOUT),
    ),
    (
        SELL_DISCRIMINATOR,
        spec(InstructionKind::Sell, GENERIC_SWAP, EXACT_IN_LAYOUT),
    ),
];

/// Legacy constant-product AMM (V4 and V5 builds).
pub struct RaydiumAmmDecoder;

impl FamilyDecoder for RaydiumAmmDecoder {
    fn family(&self) -> ProgramFamily {
        ProgramFamily::RaydiumAmm
    }

    fn simple_table(&self) -> &'static [(u8, InstructionSpec)] {
        SIMPLE_INSTRUCTIONS
    }

    fn complex_table(&self) -> &'static [(u64, InstructionSpec)] {
        COMPLEX_INSTRUCTIONS
    }

    fn framing(&self) -> usize {
        SIMPLE_DATA_START
    }
}
