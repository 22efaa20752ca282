use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use solana_pubkey::Pubkey;

use crate::error::{DecodeError, Error};

/// A transaction as handed over by the upstream envelope decoder.
///
/// Mirrors the RPC `jsonParsed`-free shape: account keys and instruction data
/// are base58 text, account references are indices into `account_keys`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    /// Transaction signature (base58).
    pub signature: String,
    /// Solana slot in which the transaction landed.
    pub slot: u64,
    /// Unix timestamp of the block, when the source knows it.
    #[serde(default)]
    pub block_time: Option<i64>,
    /// Full account-key table. Index 0 is the fee payer.
    #[serde(with = "base58::pubkey_vec")]
    pub account_keys: Vec<Pubkey>,
    /// Top-level instructions in transaction order.
    #[serde(default)]
    pub instructions: Vec<CompiledInstruction>,
    /// CPI instructions grouped by the index of their top-level parent.
    #[serde(default)]
    pub inner_instructions: Vec<InnerInstructions>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    #[serde(default)]
    pub accounts: Vec<u8>,
    #[serde(with = "base58::bytes")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InnerInstructions {
    /// Index of the top-level instruction that issued these CPIs.
    pub index: u8,
    pub instructions: Vec<CompiledInstruction>,
}

/// Position of an instruction: `outer` for top-level, `outer.inner` for CPIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstructionIndex {
    pub outer: u32,
    pub inner: Option<u32>,
}

impl InstructionIndex {
    pub fn top_level(outer: u32) -> Self {
        Self { outer, inner: None }
    }

    pub fn inner(outer: u32, inner: u32) -> Self {
        Self {
            outer,
            inner: Some(inner),
        }
    }
}

impl fmt::Display for InstructionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner {
            Some(inner) => write!(f, "{}.{inner}", self.outer),
            None => write!(f, "{}", self.outer),
        }
    }
}

impl Serialize for InstructionIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl TransactionInput {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.account_keys.first()
    }

    /// Top-level instructions by index, then inner instructions ordered by
    /// parent index and sub-index.
    pub fn instructions_in_order(&self) -> Vec<(InstructionIndex, &CompiledInstruction)> {
        let mut ordered: Vec<(InstructionIndex, &CompiledInstruction)> = self
            .instructions
            .iter()
            .enumerate()
            .map(|(i, ix)| (InstructionIndex::top_level(i as u32), ix))
            .collect();

        let mut inner: Vec<(InstructionIndex, &CompiledInstruction)> = self
            .inner_instructions
            .iter()
            .flat_map(|group| {
                group.instructions.iter().enumerate().map(|(j, ix)| {
                    (InstructionIndex::inner(u32::from(group.index), j as u32), ix)
                })
            })
            .collect();
        inner.sort_by_key(|(index, _)| *index);

        ordered.extend(inner);
        ordered
    }

    pub fn program_id(&self, ix: &CompiledInstruction) -> Result<Pubkey, DecodeError> {
        self.key_at(ix.program_id_index)
    }

    /// Resolves the instruction's account indices against the key table.
    pub fn instruction_accounts(
        &self,
        ix: &CompiledInstruction,
    ) -> Result<Vec<Pubkey>, DecodeError> {
        ix.accounts.iter().map(|&i| self.key_at(i)).collect()
    }

    fn key_at(&self, index: u8) -> Result<Pubkey, DecodeError> {
        self.account_keys
            .get(usize::from(index))
            .copied()
            .ok_or_else(|| {
                DecodeError::malformed(format!(
                    "account index {index} out of range for {} keys",
                    self.account_keys.len()
                ))
            })
    }
}

pub fn parse_pubkey(s: &str) -> Result<Pubkey, Error> {
    let bytes = bs58::decode(s).into_vec().map_err(|e| Error::Parse {
        reason: format!("invalid base58 address {s}: {e}"),
    })?;
    let array: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| Error::Parse {
        reason: format!("address {s} decodes to {} bytes", b.len()),
    })?;
    Ok(Pubkey::new_from_array(array))
}

pub fn pubkey_to_string(pubkey: &Pubkey) -> String {
    bs58::encode(pubkey.to_bytes()).into_string()
}

/// Serde adapters for base58 text fields.
pub(crate) mod base58 {
    pub mod pubkey {
        use serde::{Deserialize, Deserializer, Serializer};
        use solana_pubkey::Pubkey;

        pub fn serialize<S: Serializer>(value: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&super::super::pubkey_to_string(value))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
            let s = String::deserialize(deserializer)?;
            super::super::parse_pubkey(&s).map_err(serde::de::Error::custom)
        }
    }

    pub mod pubkey_vec {
        use serde::{Deserialize, Deserializer, Serializer};
        use solana_pubkey::Pubkey;

        pub fn serialize<S: Serializer>(
            value: &[Pubkey],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(value.iter().map(super::super::pubkey_to_string))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<Pubkey>, D::Error> {
            let raw = Vec::<String>::deserialize(deserializer)?;
            raw.iter()
                .map(|s| super::super::parse_pubkey(s).map_err(serde::de::Error::custom))
                .collect()
        }
    }

    pub mod bytes {
        use serde::{Deserialize, Deserializer};

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<u8>, D::Error> {
            let s = String::deserialize(deserializer)?;
            bs58::decode(&s)
                .into_vec()
                .map_err(|e| serde::de::Error::custom(format!("invalid base58 data: {e}")))
        }
    }
}
