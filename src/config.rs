use serde::Deserialize;
use solana_pubkey::Pubkey;

use crate::error::Error;
use crate::protocols::{ProgramFamily, ProgramRegistry};
use crate::types::base58;

/// Decoder settings, typically loaded from JSON.
///
/// ```json
/// {
///   "enable_heuristics": true,
///   "additional_programs": [{"program_id": "...", "family": "cp_swap"}],
///   "additional_base_currencies": ["..."]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Run the shape-based fallback on unresolved discriminators.
    pub enable_heuristics: bool,
    /// Extra program ids (forks, redeployments) routed to a known family.
    pub additional_programs: Vec<ProgramOverride>,
    /// Mints treated as base currencies on top of SOL, USDC and USDT.
    #[serde(with = "base58::pubkey_vec")]
    pub additional_base_currencies: Vec<Pubkey>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramOverride {
    #[serde(with = "base58::pubkey")]
    pub program_id: Pubkey,
    pub family: ProgramFamily,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            enable_heuristics: true,
            additional_programs: Vec::new(),
            additional_base_currencies: Vec::new(),
        }
    }
}

impl DecoderConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Built-in program ids cannot be rerouted to another family.
    pub fn validate(&self) -> Result<(), Error> {
        for program in &self.additional_programs {
            if let Some(builtin) = ProgramFamily::from_program_id(&program.program_id)
                && builtin != program.family
            {
                return Err(Error::Config {
                    reason: format!(
                        "program {} is built in as {builtin}, cannot map it to {}",
                        crate::types::pubkey_to_string(&program.program_id),
                        program.family
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn registry(&self) -> ProgramRegistry {
        self.additional_programs
            .iter()
            .fold(ProgramRegistry::default(), |registry, program| {
                registry.with_program(program.program_id, program.family)
            })
    }
}
