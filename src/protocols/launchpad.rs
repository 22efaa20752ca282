use crate::decoder::family::FamilyDecoder;
use crate::protocols::{
    AccountSchema, BUY_LAYOUT, COMPLEX_DATA_START, CREATE_LAYOUT, EXACT_IN_LAYOUT, FieldName,
    GENERIC_CREATE, GENERIC_SWAP, InstructionKind, InstructionSpec, ProgramFamily, Role,
    RoleSource,
};
use crate::tokens::NATIVE_MINT;

pub const INITIALIZE: u8 = 10;
pub const BUY: u8 = 6;
pub const SELL: u8 = 7;

pub const CREATE_DISCRIMINATOR: u64 = u64::from_le_bytes([24, 30, 200, 40, 5, 28, 7, 119]);
pub const BUY_DISCRIMINATOR: u64 = u64::from_le_bytes([102, 6, 61, 18, 1, 218, 235, 234]);
pub const SELL_DISCRIMINATOR: u64 = u64::from_le_bytes([51, 230, 133, 164, 1, 127, 131, 173]);
pub const MIGRATE_DISCRIMINATOR: u64 = u64::from_le_bytes([155, 234, 231, 146, 236, 158, 162, 30]);

/// Bonding-curve mints are created with six decimals.
pub const TOKEN_DECIMALS: u8 = 6;

const TRADE_ACCOUNTS: usize = 12;

// create: mint, mint_authority, bonding_curve, associated_bonding_curve,
// global, mpl_token_metadata, metadata, user, ...
const CREATE_ACCOUNTS: AccountSchema = AccountSchema {
    min_accounts: 8,
    roles: &[
        (Role::TokenMint, RoleSource::Position(0)),
        (Role::Pool, RoleSource::Position(2)),
        (Role::Creator, RoleSource::Position(7)),
    ],
};

// buy/sell: global, fee_recipient, mint, bonding_curve,
// associated_bonding_curve, associated_user, user, ...
const BUY_ACCOUNTS: AccountSchema = AccountSchema {
    min_accounts: TRADE_ACCOUNTS,
    roles: &[
        (Role::TokenIn, RoleSource::Fixed(NATIVE_MINT)),
        (Role::TokenOut, RoleSource::Position(2)),
        (Role::Pool, RoleSource::Position(3)),
        (Role::Trader, RoleSource::Position(6)),
    ],
};

const SELL_ACCOUNTS: AccountSchema = AccountSchema {
    min_accounts: TRADE_ACCOUNTS,
    roles: &[
        (Role::TokenIn, RoleSource::Position(2)),
        (Role::TokenOut, RoleSource::Fixed(NATIVE_MINT)),
        (Role::Pool, RoleSource::Position(3)),
        (Role::Trader, RoleSource::Position(6)),
    ],
};

// migrate: global, withdraw_authority, mint, bonding_curve,
// associated_bonding_curve, user, system_program, token_program, amm_program, pool, ...
const MIGRATE_ACCOUNTS: AccountSchema = AccountSchema {
    min_accounts: 10,
    roles: &[
        (Role::SourcePool, RoleSource::Position(3)),
        (Role::DestinationPool, RoleSource::Position(9)),
        (Role::TokenMint, RoleSource::Position(2)),
        (Role::Owner, RoleSource::Position(5)),
    ],
};

pub static SIMPLE_INSTRUCTIONS: &[(u8, InstructionSpec)] = &[
    (
        INITIALIZE,
        InstructionSpec {
            kind: InstructionKind::InitializePool,
            accounts: GENERIC_CREATE,
            layout: CREATE_LAYOUT,
        },
    ),
    (
        BUY,
        InstructionSpec {
            kind: InstructionKind::Buy,
            accounts: GENERIC_SWAP,
            layout: BUY_LAYOUT,
        },
    ),
    (
        SELL,
        InstructionSpec {
            kind: InstructionKind::Sell,
            accounts: GENERIC_SWAP,
            layout: EXACT_IN_LAYOUT,
        },
    ),
];

pub static COMPLEX_INSTRUCTIONS: &[(u64, InstructionSpec)] = &[
    (
        CREATE_DISCRIMINATOR,
        InstructionSpec {
            kind: InstructionKind::Create,
            accounts: CREATE_ACCOUNTS,
            layout: &[FieldName::Name, FieldName::Symbol, FieldName::Uri],
        },
    ),
    (
        BUY_DISCRIMINATOR,
        InstructionSpec {
            kind: InstructionKind::Buy,
            accounts: BUY_ACCOUNTS,
            // token amount wanted, then the SOL spend cap
            layout: &[FieldName::AmountOut, FieldName::MaxAmountIn],
        },
    ),
    (
        SELL_DISCRIMINATOR,
        InstructionSpec {
            kind: InstructionKind::Sell,
            accounts: SELL_ACCOUNTS,
            layout: EXACT_IN_LAYOUT,
        },
    ),
    (
        MIGRATE_DISCRIMINATOR,
        InstructionSpec {
            kind: InstructionKind::Migrate,
            accounts: MIGRATE_ACCOUNTS,
            layout: &[],
        },
    ),
];

/// Bonding-curve launchpad. Anchor program, so unknown payloads are framed
/// with an 8-byte discriminator.
pub struct LaunchpadDecoder;

impl FamilyDecoder for LaunchpadDecoder {
    fn family(&self) -> ProgramFamily {
        ProgramFamily::Launchpad
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

    fn default_decimals(&self) -> u8 {
        TOKEN_DECIMALS
    }
}
