//! Store key layout and value encoding.
//!
//! | entry        | key                                  | value            |
//! |--------------|--------------------------------------|------------------|
//! | balance      | `0x01 ‖ account`                     | `u128` LE        |
//! | allowance    | `0x02 ‖ owner ‖ spender`             | `u128` LE        |
//! | total supply | `totalSupply`                        | `u128` LE        |
//!
//! The allowance key is a plain concatenation, so it is only unambiguous when
//! account ids share a fixed width (20 bytes for derived accounts).

use cbc_store::StoreError;
use cbc_types::{Account, TokenAmount};

pub const BALANCE_PREFIX: u8 = 0x01;
pub const ALLOWANCE_PREFIX: u8 = 0x02;
pub const TOTAL_SUPPLY_KEY: &[u8] = b"totalSupply";

pub fn balance_key(account: &Account) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + account.len());
    key.push(BALANCE_PREFIX);
    key.extend_from_slice(account.as_bytes());
    key
}

pub fn allowance_key(owner: &Account, spender: &Account) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + owner.len() + spender.len());
    key.push(ALLOWANCE_PREFIX);
    key.extend_from_slice(owner.as_bytes());
    key.extend_from_slice(spender.as_bytes());
    key
}

/// Recover the account from a balance key, `None` for any other key.
pub fn account_from_balance_key(key: &[u8]) -> Option<Account> {
    match key.split_first() {
        Some((&BALANCE_PREFIX, rest)) => Some(Account::new(rest)),
        _ => None,
    }
}

pub fn encode_amount(amount: TokenAmount) -> Vec<u8> {
    amount.to_le_bytes().to_vec()
}

pub fn decode_amount(key: &[u8], bytes: &[u8]) -> Result<TokenAmount, StoreError> {
    TokenAmount::from_le_slice(bytes).ok_or_else(|| {
        StoreError::Corruption(format!(
            "value under key {key:02x?} is {} bytes, expected {}",
            bytes.len(),
            TokenAmount::ENCODED_LEN
        ))
    })
}
