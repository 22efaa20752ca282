use crate::protocols::cp_swap::CpSwapDecoder;
use crate::protocols::launchpad::LaunchpadDecoder;
use crate::protocols::raydium_amm::RaydiumAmmDecoder;
use crate::protocols::{
    COMPLEX_DATA_START, DiscriminatorKey, HeuristicProfile, InstructionSpec, ProgramFamily,
};
use crate::tokens::DEFAULT_DECIMALS;

/// Static decoding tables for one program family.
///
/// Discriminator values are only meaningful inside the family that declares
/// them; nothing here is ever compared across families.
pub trait FamilyDecoder: Sync {
    fn family(&self) -> ProgramFamily;

    fn simple_table(&self) -> &'static [(u8, InstructionSpec)];

    fn complex_table(&self) -> &'static [(u64, InstructionSpec)];

    /// Data start the fallback decoder assumes for short payloads no table
    /// matched.
    fn framing(&self) -> usize;

    fn default_decimals(&self) -> u8 {
        DEFAULT_DECIMALS
    }

    /// A family that declares 8-byte discriminators treats any payload long
    /// enough to carry one as 8-byte framed, whatever its usual framing.
    fn fallback_data_start(&self, payload: &[u8]) -> usize {
        if !self.complex_table().is_empty() && payload.len() >= COMPLEX_DATA_START {
            COMPLEX_DATA_START
        } else {
            self.framing()
        }
    }

    fn heuristic_profile(&self, payload: &[u8]) -> HeuristicProfile {
        HeuristicProfile::with_data_start(self.fallback_data_start(payload))
    }

    fn lookup(&self, key: DiscriminatorKey) -> Option<&'static InstructionSpec> {
        match key {
            DiscriminatorKey::Simple(byte) => self
                .simple_table()
                .iter()
                .find(|(value, _)| *value == byte)
                .map(|(_, spec)| spec),
            DiscriminatorKey::Complex(value) => self
                .complex_table()
                .iter()
                .find(|(v, _)| *v == value)
                .map(|(_, spec)| spec),
        }
    }
}

pub fn decoder_for(family: ProgramFamily) -> &'static dyn FamilyDecoder {
    match family {
        ProgramFamily::RaydiumAmm => &RaydiumAmmDecoder,
        ProgramFamily::Launchpad => &LaunchpadDecoder,
        ProgramFamily::CpSwap => &CpSwapDecoder,
    }
}
