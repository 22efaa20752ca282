pub mod cp_swap;
pub mod launchpad;
pub mod raydium_amm;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use solana_pubkey::{Pubkey, pubkey};

pub const RAYDIUM_AMM_V4_PROGRAM_ID: Pubkey =
    pubkey!("675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8");
pub const RAYDIUM_AMM_V5_PROGRAM_ID: Pubkey =
    pubkey!("5quBtoiQqxF9Jv6KYKctB59NT3gtJD2Y65kdnB1Uev3h");
pub const LAUNCHPAD_PROGRAM_ID: Pubkey = pubkey!("6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P");
pub const CP_SWAP_PROGRAM_ID: Pubkey = pubkey!("CPMMoo8L3F4NbTegBCKVNunggL7H1ZpdTHKxQB5qKP1C");

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProgramFamily {
    RaydiumAmm,
    Launchpad,
    CpSwap,
}

impl ProgramFamily {
    pub const ALL: [Self; 3] = [Self::RaydiumAmm, Self::Launchpad, Self::CpSwap];

    pub fn from_program_id(program_id: &Pubkey) -> Option<Self> {
        if *program_id == RAYDIUM_AMM_V4_PROGRAM_ID || *program_id == RAYDIUM_AMM_V5_PROGRAM_ID {
            Some(Self::RaydiumAmm)
        } else if *program_id == LAUNCHPAD_PROGRAM_ID {
            Some(Self::Launchpad)
        } else if *program_id == CP_SWAP_PROGRAM_ID {
            Some(Self::CpSwap)
        } else {
            None
        }
    }

    pub fn program_ids(self) -> &'static [Pubkey] {
        match self {
            Self::RaydiumAmm => &[RAYDIUM_AMM_V4_PROGRAM_ID, RAYDIUM_AMM_V5_PROGRAM_ID],
            Self::Launchpad => &[LAUNCHPAD_PROGRAM_ID],
            Self::CpSwap => &[CP_SWAP_PROGRAM_ID],
        }
    }

    pub fn all_program_ids() -> &'static [Pubkey] {
        &[
            RAYDIUM_AMM_V4_PROGRAM_ID,
            RAYDIUM_AMM_V5_PROGRAM_ID,
            LAUNCHPAD_PROGRAM_ID,
            CP_SWAP_PROGRAM_ID,
        ]
    }
}

/// Program id to family routing table.
///
/// Immutable once shared; additions go through [`ProgramRegistry::with_program`]
/// which hands back a new registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramRegistry {
    programs: HashMap<Pubkey, ProgramFamily>,
}

impl Default for ProgramRegistry {
    fn default() -> Self {
        let programs = ProgramFamily::ALL
            .iter()
            .flat_map(|family| family.program_ids().iter().map(|id| (*id, *family)))
            .collect();
        Self { programs }
    }
}

impl ProgramRegistry {
    pub fn empty() -> Self {
        Self {
            programs: HashMap::new(),
        }
    }

    pub fn with_program(mut self, program_id: Pubkey, family: ProgramFamily) -> Self {
        self.insert(program_id, family);
        self
    }

    pub fn insert(&mut self, program_id: Pubkey, family: ProgramFamily) {
        self.programs.insert(program_id, family);
    }

    pub fn resolve_family(&self, program_id: &Pubkey) -> Option<ProgramFamily> {
        self.programs.get(program_id).copied()
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Pubkey, &ProgramFamily)> {
        self.programs.iter()
    }
}

/// Which event sequence an instruction kind feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    Create,
    Trade,
    Migration,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InstructionKind {
    InitializePool,
    CreatePool,
    Create,
    Swap,
    SwapBaseIn,
    SwapBaseOut,
    Buy,
    Sell,
    Deposit,
    Withdraw,
    Migrate,
}

impl InstructionKind {
    /// `None` for kinds that are recognized but never produce an event.
    pub fn category(self) -> Option<EventCategory> {
        match self {
            Self::InitializePool | Self::CreatePool | Self::Create => Some(EventCategory::Create),
            Self::Swap | Self::SwapBaseIn | Self::SwapBaseOut | Self::Buy | Self::Sell => {
                Some(EventCategory::Trade)
            }
            Self::Migrate => Some(EventCategory::Migration),
            Self::Deposit | Self::Withdraw => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscriminatorKey {
    Simple(u8),
    /// First 8 payload bytes read little-endian.
    Complex(u64),
}

impl DiscriminatorKey {
    pub fn data_start(self) -> usize {
        match self {
            Self::Simple(_) => SIMPLE_DATA_START,
            Self::Complex(_) => COMPLEX_DATA_START,
        }
    }
}

pub const SIMPLE_DATA_START: usize = 1;
pub const COMPLEX_DATA_START: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::EnumCount)]
pub enum Role {
    TokenMint,
    Pool,
    Creator,
    TokenIn,
    TokenOut,
    Trader,
    SourcePool,
    DestinationPool,
    Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSource {
    /// Index into the instruction's own account list.
    Position(usize),
    /// First account key of the transaction. Used only where the family
    /// cannot pin the acting signer to a fixed index.
    FeePayer,
    /// Role implied by the instruction itself, e.g. the native mint on a
    /// bonding-curve buy.
    Fixed(Pubkey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSchema {
    pub min_accounts: usize,
    pub roles: &'static [(Role, RoleSource)],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    AmountIn,
    AmountOut,
    MinAmountOut,
    MaxAmountIn,
    Amount,
    Decimals,
    Name,
    Symbol,
    Uri,
    /// Consumes 8 bytes without recording them.
    Skip64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionSpec {
    pub kind: InstructionKind,
    pub accounts: AccountSchema,
    pub layout: &'static [FieldName],
}

/// Shapes used by the fallback decoder when no discriminator matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicProfile {
    /// Data start assumed for unrecognized payloads.
    pub data_start: usize,
    pub create: InstructionSpec,
    pub trade: InstructionSpec,
    pub migration: InstructionSpec,
}

pub const CREATE_MIN_ACCOUNTS: usize = 8;
pub const TRADE_MIN_ACCOUNTS: usize = 6;
pub const MIGRATION_MIN_ACCOUNTS: usize = 4;

/// Bytes past the data start a payload needs before the fallback decoder
/// treats it as a creation.
pub const HEURISTIC_CREATE_PAYLOAD: usize = 32;
/// Bytes past the data start a payload needs before the fallback decoder
/// treats it as a trade.
pub const HEURISTIC_TRADE_PAYLOAD: usize = 16;

pub(crate) const GENERIC_CREATE: AccountSchema = AccountSchema {
    min_accounts: CREATE_MIN_ACCOUNTS,
    roles: &[
        (Role::TokenMint, RoleSource::Position(0)),
        (Role::Pool, RoleSource::Position(1)),
        (Role::Creator, RoleSource::Position(2)),
    ],
};

pub(crate) const GENERIC_SWAP: AccountSchema = AccountSchema {
    min_accounts: TRADE_MIN_ACCOUNTS,
    roles: &[
        (Role::TokenIn, RoleSource::Position(0)),
        (Role::TokenOut, RoleSource::Position(1)),
        (Role::Pool, RoleSource::Position(2)),
        (Role::Trader, RoleSource::FeePayer),
    ],
};

pub(crate) const GENERIC_MIGRATION: AccountSchema = AccountSchema {
    min_accounts: MIGRATION_MIN_ACCOUNTS,
    roles: &[
        (Role::SourcePool, RoleSource::Position(0)),
        (Role::DestinationPool, RoleSource::Position(1)),
        (Role::TokenMint, RoleSource::Position(2)),
        (Role::Owner, RoleSource::Position(3)),
    ],
};

pub(crate) const CREATE_LAYOUT: &[FieldName] = &[FieldName::Decimals, FieldName::Amount];
pub(crate) const EXACT_IN_LAYOUT: &[FieldName] = &[FieldName::AmountIn, FieldName::MinAmountOut];
pub(crate) const EXACT_OUT_LAYOUT: &[FieldName] = &[FieldName::MaxAmountIn, FieldName::AmountOut];
pub(crate) const BUY_LAYOUT: &[FieldName] = &[FieldName::AmountIn, FieldName::MaxAmountIn];
pub(crate) const AMOUNT_LAYOUT: &[FieldName] = &[FieldName::Amount];

pub(crate) const HEURISTIC_CREATE: InstructionSpec = InstructionSpec {
    kind: InstructionKind::Create,
    accounts: AccountSchema {
        min_accounts: CREATE_MIN_ACCOUNTS,
        roles: &[
            (Role::TokenMint, RoleSource::Position(0)),
            (Role::Pool, RoleSource::Position(1)),
            (Role::Creator, RoleSource::FeePayer),
        ],
    },
    layout: CREATE_LAYOUT,
};

pub(crate) const HEURISTIC_TRADE: InstructionSpec = InstructionSpec {
    kind: InstructionKind::Swap,
    accounts: GENERIC_SWAP,
    layout: EXACT_IN_LAYOUT,
};

pub(crate) const HEURISTIC_MIGRATION: InstructionSpec = InstructionSpec {
    kind: InstructionKind::Migrate,
    accounts: AccountSchema {
        min_accounts: MIGRATION_MIN_ACCOUNTS,
        roles: &[
            (Role::SourcePool, RoleSource::Position(0)),
            (Role::DestinationPool, RoleSource::Position(1)),
            (Role::TokenMint, RoleSource::Position(2)),
            (Role::Owner, RoleSource::FeePayer),
        ],
    },
    layout: AMOUNT_LAYOUT,
};

impl HeuristicProfile {
    /// Fallback shapes shared by every family; only the data start differs.
    pub fn with_data_start(data_start: usize) -> Self {
        Self {
            data_start,
            create: HEURISTIC_CREATE,
            trade: HEURISTIC_TRADE,
            migration: HEURISTIC_MIGRATION,
        }
    }
}
