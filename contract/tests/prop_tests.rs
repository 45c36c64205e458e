//! Arbitrary invocations never panic and never break conservation.

use cbc_contract::{Arg, Contract, Invocation, Outcome};
use cbc_ledger::{GenesisConfig, Ledger, WitnessSet};
use cbc_nullables::NullStore;
use cbc_types::{Account, TokenAmount, TokenMetadata};
use proptest::prelude::*;

const NAMES: &[&str] = &[
    "deploy",
    "totalSupply",
    "name",
    "symbol",
    "decimals",
    "balanceOf",
    "transfer",
    "transferFrom",
    "approve",
    "allowance",
    "mint",
    "",
];

fn arb_arg() -> impl Strategy<Value = Arg> {
    prop_oneof![
        (0u8..4).prop_map(|b| Arg::Bytes(vec![b; 20])),
        prop::collection::vec(any::<u8>(), 0..3).prop_map(Arg::Bytes),
        (-5i128..2000).prop_map(Arg::Integer),
        any::<i128>().prop_map(Arg::Integer),
    ]
}

fn arb_invocation() -> impl Strategy<Value = Invocation> {
    (
        prop::sample::select(NAMES),
        prop::collection::vec(arb_arg(), 0..5),
    )
        .prop_map(|(name, args)| Invocation::application(name, args))
}

proptest! {
    #[test]
    fn random_invocations_conserve_supply(
        calls in prop::collection::vec(arb_invocation(), 1..40),
    ) {
        let genesis = GenesisConfig {
            metadata: TokenMetadata::default(),
            owner: Account::from([0u8; 20]),
            total_supply: TokenAmount::new(1000),
        };
        let contract = Contract::new(Ledger::new(NullStore::new(), genesis));
        let everyone: WitnessSet = (0u8..4).map(|b| Account::from([b; 20])).collect();

        let deploy = Invocation::application("deploy", vec![]);
        prop_assert_eq!(contract.invoke(&everyone, &deploy).unwrap(), Outcome::Bool(true));

        for call in &calls {
            let outcome = contract.invoke(&everyone, call);
            prop_assert!(outcome.is_ok());
        }

        let snapshot = contract.ledger().snapshot().unwrap();
        prop_assert!(snapshot.is_consistent());
        prop_assert_eq!(snapshot.zero_entries(), 0);
    }
}
