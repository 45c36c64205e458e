//! Invocation shapes at the host boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use cbc_types::{Account, TokenAmount};

use crate::ContractError;

/// Why the host is running the contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// The host asks whether the contract owner authorized the surrounding transaction.
    Verification,
    /// A regular operation call.
    #[default]
    Application,
}

/// A loosely typed argument, as transported by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arg {
    Bytes(Vec<u8>),
    Integer(i128),
}

impl Arg {
    pub fn account(account: &Account) -> Self {
        Arg::Bytes(account.as_bytes().to_vec())
    }

    /// An amount argument, or `None` if it does not fit the host's signed integer.
    pub fn amount(amount: u128) -> Option<Self> {
        i128::try_from(amount).ok().map(Arg::Integer)
    }

    /// Interpret as an account id. Only non-empty byte arguments qualify.
    pub fn as_account(&self) -> Option<Account> {
        match self {
            Arg::Bytes(bytes) if !bytes.is_empty() => Some(Account::new(bytes.clone())),
            _ => None,
        }
    }

    /// Interpret as an amount. Only non-negative integers qualify.
    pub fn as_amount(&self) -> Option<TokenAmount> {
        match self {
            Arg::Integer(n) => u128::try_from(*n).ok().map(TokenAmount::new),
            Arg::Bytes(_) => None,
        }
    }
}

/// `0x`-prefixed text is bytes, anything else must be a decimal integer.
impl FromStr for Arg {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(digits) = s.strip_prefix("0x") {
            return hex::decode(digits)
                .map(Arg::Bytes)
                .map_err(|e| ContractError::InvalidArgument(format!("{s}: {e}")));
        }
        s.parse::<i128>()
            .map(Arg::Integer)
            .map_err(|e| ContractError::InvalidArgument(format!("{s}: {e}")))
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Bytes(bytes) => write!(f, "0x{}", hex::encode(bytes)),
            Arg::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// Every operation the contract exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Deploy,
    TotalSupply,
    Name,
    Symbol,
    Decimals,
    BalanceOf,
    Transfer,
    TransferFrom,
    Approve,
    Allowance,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::Deploy,
        Operation::TotalSupply,
        Operation::Name,
        Operation::Symbol,
        Operation::Decimals,
        Operation::BalanceOf,
        Operation::Transfer,
        Operation::TransferFrom,
        Operation::Approve,
        Operation::Allowance,
    ];

    /// Resolve a host operation name; snake_case aliases are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let op = match name {
            "deploy" | "initialize" => Operation::Deploy,
            "totalSupply" | "total_supply" => Operation::TotalSupply,
            "name" => Operation::Name,
            "symbol" => Operation::Symbol,
            "decimals" => Operation::Decimals,
            "balanceOf" | "balance_of" => Operation::BalanceOf,
            "transfer" => Operation::Transfer,
            "transferFrom" | "transfer_from" => Operation::TransferFrom,
            "approve" => Operation::Approve,
            "allowance" => Operation::Allowance,
            _ => return None,
        };
        Some(op)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Deploy => "deploy",
            Operation::TotalSupply => "totalSupply",
            Operation::Name => "name",
            Operation::Symbol => "symbol",
            Operation::Decimals => "decimals",
            Operation::BalanceOf => "balanceOf",
            Operation::Transfer => "transfer",
            Operation::TransferFrom => "transferFrom",
            Operation::Approve => "approve",
            Operation::Allowance => "allowance",
        }
    }

    /// Exact number of arguments the operation takes.
    pub fn arity(&self) -> usize {
        match self {
            Operation::Deploy
            | Operation::TotalSupply
            | Operation::Name
            | Operation::Symbol
            | Operation::Decimals => 0,
            Operation::BalanceOf => 1,
            Operation::Allowance => 2,
            Operation::Transfer | Operation::Approve => 3,
            Operation::TransferFrom => 4,
        }
    }

    /// The result reported when the call is malformed or rejected.
    pub fn failure(&self) -> Outcome {
        match self {
            Operation::TotalSupply
            | Operation::Decimals
            | Operation::BalanceOf
            | Operation::Allowance => Outcome::Integer(0),
            Operation::Name | Operation::Symbol => Outcome::Text(String::new()),
            Operation::Deploy
            | Operation::Transfer
            | Operation::TransferFrom
            | Operation::Approve => Outcome::Bool(false),
        }
    }
}

/// The value handed back to the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Bool(bool),
    Integer(u128),
    Text(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Bool(b) => write!(f, "{b}"),
            Outcome::Integer(n) => write!(f, "{n}"),
            Outcome::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One call into the contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    #[serde(default)]
    pub trigger: Trigger,
    pub operation: String,
    #[serde(default)]
    pub args: Vec<Arg>,
}

/// Domain separator for the signed form of an invocation.
const SIGNING_DOMAIN: &[u8] = b"cbc-invocation-v1";

impl Invocation {
    pub fn application(operation: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            trigger: Trigger::Application,
            operation: operation.into(),
            args,
        }
    }

    pub fn verification() -> Self {
        Self {
            trigger: Trigger::Verification,
            operation: String::new(),
            args: Vec::new(),
        }
    }

    /// Unambiguous byte encoding that witnesses sign (after hashing).
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(64);
        out.extend_from_slice(SIGNING_DOMAIN);
        out.push(match self.trigger {
            Trigger::Verification => 0,
            Trigger::Application => 1,
        });
        push_framed(&mut out, self.operation.as_bytes());
        out.extend_from_slice(&(self.args.len() as u32).to_le_bytes());
        for arg in &self.args {
            match arg {
                Arg::Bytes(bytes) => {
                    out.push(0);
                    push_framed(&mut out, bytes);
                }
                Arg::Integer(n) => {
                    out.push(1);
                    out.extend_from_slice(&n.to_le_bytes());
                }
            }
        }
        out
    }
}

fn push_framed(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cli_arguments() {
        assert_eq!("0xabcd".parse::<Arg>().unwrap(), Arg::Bytes(vec![0xab, 0xcd]));
        assert_eq!("42".parse::<Arg>().unwrap(), Arg::Integer(42));
        assert_eq!("-1".parse::<Arg>().unwrap(), Arg::Integer(-1));
        assert!("0xzz".parse::<Arg>().is_err());
        assert!("abc".parse::<Arg>().is_err());
    }

    #[test]
    fn argument_typing() {
        assert_eq!(Arg::Integer(-5).as_amount(), None);
        assert_eq!(Arg::Integer(5).as_amount(), Some(TokenAmount::new(5)));
        assert_eq!(Arg::Integer(5).as_account(), None);
        assert_eq!(Arg::Bytes(Vec::new()).as_account(), None);
        assert_eq!(Arg::Bytes(vec![1]).as_amount(), None);
    }

    #[test]
    fn names_resolve_back_to_operations() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.name()), Some(op));
        }
        assert_eq!(Operation::from_name("transfer_from"), Some(Operation::TransferFrom));
        assert_eq!(Operation::from_name("mint"), None);
    }

    #[test]
    fn canonical_bytes_separate_argument_boundaries() {
        let a = Invocation::application("op", vec![Arg::Bytes(vec![1, 2]), Arg::Bytes(vec![3])]);
        let b = Invocation::application("op", vec![Arg::Bytes(vec![1]), Arg::Bytes(vec![2, 3])]);
        assert_ne!(a.canonical_bytes(), b.canonical_bytes());
    }

    #[test]
    fn amounts_beyond_i128_are_not_representable() {
        assert_eq!(Arg::amount(u128::MAX), None);
        assert_eq!(Arg::amount(i128::MAX as u128 + 1), None);
        assert_eq!(Arg::amount(i128::MAX as u128), Some(Arg::Integer(i128::MAX)));
        assert_eq!(Arg::amount(7), Some(Arg::Integer(7)));
    }
}
