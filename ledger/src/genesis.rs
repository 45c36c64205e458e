//! Genesis configuration: who receives the supply and how much there is.
//!
//! The supply is fixed at initialization. It is configured in whole tokens and
//! scaled by `10^decimals` into raw units.

use cbc_types::{Account, TokenAmount, TokenMetadata};

use crate::LedgerError;

/// Script hash of the account that receives the entire supply on the
/// reference deployment.
pub const DEFAULT_GENESIS_ACCOUNT: [u8; Account::HASH_LEN] = [
    0x59, 0x35, 0x56, 0x2f, 0x02, 0xb2, 0x01, 0xf8, 0x22, 0xea, 0x2b, 0x15, 0x17, 0x77, 0x18,
    0x98, 0x5f, 0x69, 0xc4, 0x52,
];

/// Whole tokens minted at genesis on the reference deployment.
pub const DEFAULT_SUPPLY_TOKENS: u64 = 1_000_000_000;

/// Everything the ledger needs to perform its one-time initialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenesisConfig {
    pub metadata: TokenMetadata,
    /// Account credited with the entire supply.
    pub owner: Account,
    /// Total supply in raw units.
    pub total_supply: TokenAmount,
}

impl GenesisConfig {
    /// Build a configuration from a supply expressed in whole tokens.
    pub fn new(
        metadata: TokenMetadata,
        owner: Account,
        supply_tokens: u64,
    ) -> Result<Self, LedgerError> {
        if owner.is_empty() {
            return Err(LedgerError::InvalidGenesis("owner account is empty".into()));
        }
        let raw = metadata
            .unit_factor()
            .and_then(|factor| factor.checked_mul(u128::from(supply_tokens)))
            .ok_or_else(|| {
                LedgerError::InvalidGenesis(format!(
                    "{supply_tokens} tokens at {} decimals overflows u128",
                    metadata.decimals
                ))
            })?;
        Ok(Self {
            metadata,
            owner,
            total_supply: TokenAmount::new(raw),
        })
    }
}

impl Default for GenesisConfig {
    fn default() -> Self {
        let metadata = TokenMetadata::default();
        let factor = 10u128.pow(u32::from(metadata.decimals));
        Self {
            metadata,
            owner: Account::from(DEFAULT_GENESIS_ACCOUNT),
            total_supply: TokenAmount::new(u128::from(DEFAULT_SUPPLY_TOKENS) * factor),
        }
    }
}
