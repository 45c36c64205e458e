//! End-to-end calls through the contract with real Ed25519 witnesses.

use cbc_contract::{Arg, Contract, Invocation, Outcome, SignedInvocation, Trigger};
use cbc_crypto::{derive_account, keypair_from_seed};
use cbc_ledger::{GenesisConfig, Ledger, Notification};
use cbc_nullables::{NotificationRecorder, NullStore};
use cbc_types::{Account, KeyPair, TokenAmount, TokenMetadata};

struct Fixture {
    contract: Contract<NullStore>,
    recorder: NotificationRecorder,
    alice: KeyPair,
    bob: KeyPair,
    carol: KeyPair,
}

fn account(kp: &KeyPair) -> Account {
    derive_account(&kp.public)
}

fn setup(supply: u128) -> Fixture {
    let alice = keypair_from_seed(&[0xa1; 32]);
    let bob = keypair_from_seed(&[0xb0; 32]);
    let carol = keypair_from_seed(&[0xc4; 32]);
    let genesis = GenesisConfig {
        metadata: TokenMetadata::default(),
        owner: account(&alice),
        total_supply: TokenAmount::new(supply),
    };
    let recorder = NotificationRecorder::new();
    let mut ledger = Ledger::new(NullStore::new(), genesis);
    ledger.subscribe(recorder.listener());
    let contract = Contract::new(ledger);
    Fixture {
        contract,
        recorder,
        alice,
        bob,
        carol,
    }
}

fn run(f: &Fixture, op: &str, args: Vec<Arg>, signers: &[&KeyPair]) -> Outcome {
    let signed = SignedInvocation::sign(Invocation::application(op, args), signers);
    f.contract.invoke_signed(&signed).unwrap()
}

fn balance(f: &Fixture, kp: &KeyPair) -> Outcome {
    run(f, "balanceOf", vec![Arg::account(&account(kp))], &[])
}

#[test]
fn signed_transfer_moves_funds() {
    let f = setup(1000);
    assert_eq!(run(&f, "deploy", vec![], &[]), Outcome::Bool(true));

    let args = vec![
        Arg::account(&account(&f.alice)),
        Arg::account(&account(&f.bob)),
        Arg::amount(250).unwrap(),
    ];
    // Bob cannot move Alice's funds.
    assert_eq!(run(&f, "transfer", args.clone(), &[&f.bob]), Outcome::Bool(false));
    assert_eq!(run(&f, "transfer", args, &[&f.alice]), Outcome::Bool(true));

    assert_eq!(balance(&f, &f.alice), Outcome::Integer(750));
    assert_eq!(balance(&f, &f.bob), Outcome::Integer(250));
}

#[test]
fn delegated_spend_through_dispatch() {
    let f = setup(1000);
    run(&f, "deploy", vec![], &[]);

    let approve = vec![
        Arg::account(&account(&f.alice)),
        Arg::account(&account(&f.bob)),
        Arg::amount(300).unwrap(),
    ];
    assert_eq!(run(&f, "approve", approve, &[&f.alice]), Outcome::Bool(true));

    let spend = |amount| {
        vec![
            Arg::account(&account(&f.bob)),
            Arg::account(&account(&f.alice)),
            Arg::account(&account(&f.carol)),
            Arg::amount(amount).unwrap(),
        ]
    };
    // The owner's signature alone does not let anyone spend the allowance.
    assert_eq!(run(&f, "transferFrom", spend(300), &[&f.alice]), Outcome::Bool(false));
    assert_eq!(run(&f, "transfer_from", spend(300), &[&f.bob]), Outcome::Bool(true));
    assert_eq!(run(&f, "transferFrom", spend(1), &[&f.bob]), Outcome::Bool(false));

    let allowance = run(
        &f,
        "allowance",
        vec![Arg::account(&account(&f.alice)), Arg::account(&account(&f.bob))],
        &[],
    );
    assert_eq!(allowance, Outcome::Integer(0));
    assert_eq!(balance(&f, &f.carol), Outcome::Integer(300));
    assert_eq!(balance(&f, &f.alice), Outcome::Integer(700));
}

#[test]
fn notifications_follow_successful_calls_only() {
    let f = setup(500);
    run(&f, "deploy", vec![], &[]);
    run(
        &f,
        "transfer",
        vec![
            Arg::account(&account(&f.alice)),
            Arg::account(&account(&f.bob)),
            Arg::amount(600).unwrap(),
        ],
        &[&f.alice],
    );
    run(
        &f,
        "transfer",
        vec![
            Arg::account(&account(&f.alice)),
            Arg::account(&account(&f.bob)),
            Arg::amount(100).unwrap(),
        ],
        &[&f.alice],
    );

    let recorded = f.recorder.recorded();
    assert_eq!(recorded.len(), 2);
    assert_eq!(
        recorded[0],
        Notification::Transfer {
            from: None,
            to: account(&f.alice),
            amount: TokenAmount::new(500),
        }
    );
    assert_eq!(
        recorded[1],
        Notification::Transfer {
            from: Some(account(&f.alice)),
            to: account(&f.bob),
            amount: TokenAmount::new(100),
        }
    );
}

#[test]
fn verification_trigger_requires_owner_signature() {
    let f = setup(1);
    let mut inv = Invocation::verification();
    inv.operation = "anything".into();
    assert_eq!(inv.trigger, Trigger::Verification);

    let by_owner = SignedInvocation::sign(inv.clone(), &[&f.alice]);
    let by_other = SignedInvocation::sign(inv, &[&f.bob]);
    assert_eq!(f.contract.invoke_signed(&by_owner).unwrap(), Outcome::Bool(true));
    assert_eq!(f.contract.invoke_signed(&by_other).unwrap(), Outcome::Bool(false));
}

#[test]
fn outcomes_serialize_as_plain_json() {
    assert_eq!(serde_json::to_string(&Outcome::Bool(true)).unwrap(), "true");
    assert_eq!(serde_json::to_string(&Outcome::Integer(42)).unwrap(), "42");
    assert_eq!(serde_json::to_string(&Outcome::Text("CBC".into())).unwrap(), "\"CBC\"");
}
