//! Descriptive token metadata exposed through read-only operations.

use serde::{Deserialize, Serialize};

/// Human-facing description of the token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    /// Number of decimal places between raw units and one whole token.
    pub decimals: u8,
}

impl TokenMetadata {
    /// Raw units per whole token (`10^decimals`), `None` if it does not fit a `u128`.
    pub fn unit_factor(&self) -> Option<u128> {
        10u128.checked_pow(u32::from(self.decimals))
    }
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "Community Based Creation".to_string(),
            symbol: "CBC".to_string(),
            decimals: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metadata_matches_cbc() {
        let meta = TokenMetadata::default();
        assert_eq!(meta.symbol, "CBC");
        assert_eq!(meta.unit_factor(), Some(100_000_000));
    }

    #[test]
    fn absurd_decimals_have_no_factor() {
        let meta = TokenMetadata {
            decimals: 200,
            ..TokenMetadata::default()
        };
        assert_eq!(meta.unit_factor(), None);
    }
}
