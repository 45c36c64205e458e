//! Property tests: invariants hold over arbitrary operation sequences.

use proptest::prelude::*;

use cbc_ledger::{keys, GenesisConfig, Ledger, WitnessSet};
use cbc_nullables::NullStore;
use cbc_types::{Account, TokenAmount};

const SUPPLY: u128 = 1_000;
const ACCOUNTS: u8 = 4;

#[derive(Clone, Debug)]
enum Op {
    Transfer { from: u8, to: u8, amount: u128, signed: bool },
    Approve { owner: u8, spender: u8, amount: u128 },
    TransferFrom { spender: u8, from: u8, to: u8, amount: u128 },
    Initialize,
}

fn account(i: u8) -> Account {
    Account::new(vec![i; Account::HASH_LEN])
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let idx = 0..ACCOUNTS;
    let amount = 0u128..=SUPPLY / 2;
    prop_oneof![
        (idx.clone(), idx.clone(), amount.clone(), any::<bool>())
            .prop_map(|(from, to, amount, signed)| Op::Transfer { from, to, amount, signed }),
        (idx.clone(), idx.clone(), amount.clone())
            .prop_map(|(owner, spender, amount)| Op::Approve { owner, spender, amount }),
        (idx.clone(), idx.clone(), idx, amount).prop_map(|(spender, from, to, amount)| {
            Op::TransferFrom { spender, from, to, amount }
        }),
        Just(Op::Initialize),
    ]
}

fn apply(ledger: &Ledger<NullStore>, op: &Op) {
    let _ = match op {
        Op::Transfer { from, to, amount, signed } => {
            let auth = if *signed {
                WitnessSet::empty().with(account(*from))
            } else {
                WitnessSet::empty()
            };
            ledger.transfer(&auth, &account(*from), &account(*to), TokenAmount::new(*amount))
        }
        Op::Approve { owner, spender, amount } => ledger.approve(
            &WitnessSet::empty().with(account(*owner)),
            &account(*owner),
            &account(*spender),
            TokenAmount::new(*amount),
        ),
        Op::TransferFrom { spender, from, to, amount } => ledger.transfer_from(
            &WitnessSet::empty().with(account(*spender)),
            &account(*spender),
            &account(*from),
            &account(*to),
            TokenAmount::new(*amount),
        ),
        Op::Initialize => ledger.initialize(),
    };
}

fn fresh_ledger() -> Ledger<NullStore> {
    let genesis = GenesisConfig {
        owner: account(0),
        total_supply: TokenAmount::new(SUPPLY),
        ..GenesisConfig::default()
    };
    let ledger = Ledger::new(NullStore::new(), genesis);
    ledger.initialize().unwrap();
    ledger
}

proptest! {
    /// Σ balances == total supply and no zero balance entry, after every step.
    #[test]
    fn conservation_and_no_zero_entries(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let ledger = fresh_ledger();
        for op in &ops {
            apply(&ledger, op);
            let snap = ledger.snapshot().unwrap();
            prop_assert_eq!(snap.circulating, TokenAmount::new(SUPPLY));
            prop_assert_eq!(snap.zero_entries(), 0);
        }
    }

    /// A rejected transfer leaves the store byte-for-byte unchanged.
    #[test]
    fn rejected_operations_do_not_mutate(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let ledger = fresh_ledger();
        for op in &ops {
            let before = ledger.store().dump();
            let outcome = match op {
                Op::Transfer { from, to, amount, signed } => {
                    let auth = if *signed {
                        WitnessSet::empty().with(account(*from))
                    } else {
                        WitnessSet::empty()
                    };
                    ledger.transfer(&auth, &account(*from), &account(*to), TokenAmount::new(*amount))
                }
                other => {
                    apply(&ledger, other);
                    continue;
                }
            };
            if outcome.is_err() {
                prop_assert_eq!(ledger.store().dump(), before);
            }
        }
    }

    /// The last approve wins.
    #[test]
    fn last_approve_wins(first in 0u128..10_000, second in 0u128..10_000) {
        let ledger = fresh_ledger();
        let (o, s) = (account(1), account(2));
        let auth = WitnessSet::empty().with(o.clone());
        ledger.approve(&auth, &o, &s, TokenAmount::new(first)).unwrap();
        ledger.approve(&auth, &o, &s, TokenAmount::new(second)).unwrap();
        prop_assert_eq!(ledger.allowance(&o, &s).unwrap(), TokenAmount::new(second));
        prop_assert!(ledger.store().contains(&keys::allowance_key(&o, &s)));
    }

    /// A self-transfer with a positive amount never changes state.
    #[test]
    fn self_transfer_is_noop(who in 0..ACCOUNTS, amount in 1u128..=SUPPLY * 2) {
        let ledger = fresh_ledger();
        let before = ledger.store().dump();
        let a = account(who);
        ledger.transfer(&WitnessSet::empty().with(a.clone()), &a, &a, TokenAmount::new(amount)).unwrap();
        prop_assert_eq!(ledger.store().dump(), before);
    }
}
