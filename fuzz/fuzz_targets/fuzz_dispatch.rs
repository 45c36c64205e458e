#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use cbc_contract::{Arg, Contract, Invocation};
use cbc_ledger::{GenesisConfig, Ledger, WitnessSet};
use cbc_nullables::NullStore;
use cbc_types::{Account, TokenAmount, TokenMetadata};

const OPERATIONS: &[&str] = &[
    "deploy",
    "totalSupply",
    "balanceOf",
    "transfer",
    "transferFrom",
    "approve",
    "allowance",
    "decimals",
];

#[derive(Arbitrary, Debug)]
enum FuzzArg {
    Account(u8),
    Raw(Vec<u8>),
    Integer(i128),
}

#[derive(Arbitrary, Debug)]
struct FuzzCall {
    operation: u8,
    args: Vec<FuzzArg>,
    signer: u8,
}

// Run a sequence of arbitrary calls and check the books still balance.
fuzz_target!(|calls: Vec<FuzzCall>| {
    let genesis = GenesisConfig {
        metadata: TokenMetadata::default(),
        owner: Account::from([0u8; 20]),
        total_supply: TokenAmount::new(1_000_000),
    };
    let contract = Contract::new(Ledger::new(NullStore::new(), genesis));

    for call in calls.iter().take(64) {
        let name = OPERATIONS[call.operation as usize % OPERATIONS.len()];
        let args = call
            .args
            .iter()
            .map(|a| match a {
                FuzzArg::Account(b) => Arg::Bytes(vec![b % 4; 20]),
                FuzzArg::Raw(bytes) => Arg::Bytes(bytes.clone()),
                FuzzArg::Integer(n) => Arg::Integer(*n),
            })
            .collect();
        let witness = WitnessSet::empty().with(Account::from([call.signer % 4; 20]));
        let outcome = contract.invoke(&witness, &Invocation::application(name, args));
        assert!(outcome.is_ok(), "in-memory store never faults");
    }

    let snapshot = contract.ledger().snapshot().unwrap();
    assert!(snapshot.is_consistent());
    assert_eq!(snapshot.zero_entries(), 0);
});
