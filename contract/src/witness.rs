//! Signed invocations.
//!
//! A witness is an Ed25519 signature over the hash of
//! [`Invocation::canonical_bytes`]. Each valid witness authorizes the account
//! derived from its public key.

use serde::Serialize;

use cbc_crypto::{blake2b_256, derive_account, sign_message, verify_signature};
use cbc_ledger::WitnessSet;
use cbc_types::{KeyPair, PublicKey, Signature};

use crate::Invocation;

/// One signature attached to an invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witness {
    pub public_key: PublicKey,
    pub signature: Signature,
}

/// An invocation together with the witnesses that signed it.
///
/// The signed message carries no nonce and is not bound to a particular
/// ledger, so a witness is only meaningful for a single in-process call.
/// Replaying a captured `SignedInvocation` would authorize it again.
#[derive(Clone, Debug)]
pub struct SignedInvocation {
    pub invocation: Invocation,
    pub witnesses: Vec<Witness>,
}

impl SignedInvocation {
    /// Sign `invocation` with every key pair given.
    pub fn sign(invocation: Invocation, signers: &[&KeyPair]) -> Self {
        let message = signing_hash(&invocation);
        let witnesses = signers
            .iter()
            .map(|kp| Witness {
                public_key: kp.public.clone(),
                signature: sign_message(&message, &kp.private),
            })
            .collect();
        Self {
            invocation,
            witnesses,
        }
    }

    /// Accounts backed by a valid signature. Invalid witnesses are dropped.
    pub fn witness_set(&self) -> WitnessSet {
        let message = signing_hash(&self.invocation);
        let mut set = WitnessSet::empty();
        for witness in &self.witnesses {
            let public_key = hex::encode(witness.public_key.as_bytes());
            match verify_signature(&message, &witness.signature, &witness.public_key) {
                Ok(true) => {
                    set.insert(derive_account(&witness.public_key));
                }
                Ok(false) => {
                    tracing::warn!(%public_key, "dropping witness with invalid signature");
                }
                Err(e) => {
                    tracing::warn!(%public_key, error = %e, "dropping malformed witness");
                }
            }
        }
        set
    }
}

/// Summary of a witness for logs and CLI output.
#[derive(Debug, Serialize)]
pub struct WitnessInfo {
    pub account: String,
    pub public_key: String,
}

impl From<&Witness> for WitnessInfo {
    fn from(w: &Witness) -> Self {
        Self {
            account: derive_account(&w.public_key).to_string(),
            public_key: hex::encode(w.public_key.as_bytes()),
        }
    }
}

fn signing_hash(invocation: &Invocation) -> [u8; 32] {
    blake2b_256(&invocation.canonical_bytes())
}
