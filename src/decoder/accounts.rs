use solana_pubkey::Pubkey;
use strum::EnumCount;

use crate::error::DecodeError;
use crate::protocols::{AccountSchema, Role, RoleSource};
use crate::types::InstructionIndex;

/// Accounts bound to their roles for one instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleMap {
    slots: [Option<Pubkey>; Role::COUNT],
}

impl RoleMap {
    pub fn get(&self, role: Role) -> Option<Pubkey> {
        self.slots[role as usize]
    }

    /// Roles the schema does not declare read as the all-zero address.
    pub fn get_or_default(&self, role: Role) -> Pubkey {
        self.get(role).unwrap_or_default()
    }

    fn set(&mut self, role: Role, key: Pubkey) {
        self.slots[role as usize] = Some(key);
    }
}

/// Binds accounts to roles by position. Fails closed: an account list shorter
/// than the schema's minimum binds nothing.
pub fn bind(
    schema: &AccountSchema,
    accounts: &[Pubkey],
    fee_payer: Option<&Pubkey>,
    index: InstructionIndex,
) -> Result<RoleMap, DecodeError> {
    if accounts.len() < schema.min_accounts {
        return Err(DecodeError::InsufficientAccounts {
            required: schema.min_accounts,
            got: accounts.len(),
        });
    }

    let mut roles = RoleMap::default();
    for (role, source) in schema.roles {
        let key = match source {
            RoleSource::Position(position) => {
                *accounts
                    .get(*position)
                    .ok_or(DecodeError::InsufficientAccounts {
                        required: position + 1,
                        got: accounts.len(),
                    })?
            }
            RoleSource::FeePayer => {
                let payer = fee_payer
                    .copied()
                    .ok_or_else(|| DecodeError::malformed("transaction has no fee payer"))?;
                tracing::debug!(%index, ?role, "actor role bound to transaction fee payer");
                payer
            }
            RoleSource::Fixed(key) => *key,
        };
        roles.set(*role, key);
    }

    Ok(roles)
}
