//! Token amounts.
//!
//! Amounts are non-negative fixed-point integers held in raw units (`u128`).
//! One whole token is `10^decimals` raw units (see [`crate::TokenMetadata`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantity of tokens in raw units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    /// Encoded width of an amount in storage.
    pub const ENCODED_LEN: usize = 16;

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Little-endian storage encoding.
    pub fn to_le_bytes(self) -> [u8; Self::ENCODED_LEN] {
        self.0.to_le_bytes()
    }

    /// Decode the storage encoding; `None` if the width is wrong.
    pub fn from_le_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; Self::ENCODED_LEN] = bytes.try_into().ok()?;
        Some(Self(u128::from_le_bytes(arr)))
    }
}

impl From<u128> for TokenAmount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
