//! Routes host invocations onto ledger operations.
//!
//! Rejections never surface as errors here: a malformed or refused call
//! reports `false` (or `0` for quantity reads) the way the host expects.
//! Only storage faults come back as `Err`.

use cbc_ledger::{AuthorizationOracle, Ledger, LedgerError};
use cbc_store::PersistentStore;
use cbc_types::Account;

use crate::invocation::{Arg, Invocation, Operation, Outcome, Trigger};
use crate::witness::SignedInvocation;
use crate::ContractError;

/// The token contract: a ledger plus its host-facing entry point.
pub struct Contract<S> {
    ledger: Ledger<S>,
}

impl<S: PersistentStore> Contract<S> {
    pub fn new(ledger: Ledger<S>) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    /// Verify the attached witnesses and run the invocation with them.
    pub fn invoke_signed(&self, signed: &SignedInvocation) -> Result<Outcome, ContractError> {
        let witnesses = signed.witness_set();
        self.invoke(&witnesses, &signed.invocation)
    }

    pub fn invoke<A>(&self, auth: &A, invocation: &Invocation) -> Result<Outcome, ContractError>
    where
        A: AuthorizationOracle + ?Sized,
    {
        match invocation.trigger {
            Trigger::Verification => {
                let owner = &self.ledger.genesis().owner;
                let authorized = auth.is_authorized(owner);
                tracing::debug!(owner = %owner, authorized, "verification trigger");
                Ok(Outcome::Bool(authorized))
            }
            Trigger::Application => self.apply(auth, invocation),
        }
    }

    fn apply<A>(&self, auth: &A, invocation: &Invocation) -> Result<Outcome, ContractError>
    where
        A: AuthorizationOracle + ?Sized,
    {
        let Some(op) = Operation::from_name(&invocation.operation) else {
            tracing::debug!(operation = %invocation.operation, "unknown operation");
            return Ok(Outcome::Bool(false));
        };
        let args = invocation.args.as_slice();
        if args.len() != op.arity() {
            tracing::debug!(
                operation = op.name(),
                expected = op.arity(),
                got = args.len(),
                "wrong argument count"
            );
            return Ok(op.failure());
        }

        let ledger = &self.ledger;
        let outcome = match op {
            Operation::Deploy => settle(op, ledger.initialize())?,
            Operation::TotalSupply => Outcome::Integer(ledger.total_supply()?.raw()),
            Operation::Name => Outcome::Text(ledger.metadata().name.clone()),
            Operation::Symbol => Outcome::Text(ledger.metadata().symbol.clone()),
            Operation::Decimals => Outcome::Integer(u128::from(ledger.metadata().decimals)),
            Operation::BalanceOf => match accounts::<1>(args) {
                Some([account]) => Outcome::Integer(ledger.balance_of(&account)?.raw()),
                None => malformed(op),
            },
            Operation::Allowance => match accounts::<2>(args) {
                Some([owner, spender]) => {
                    Outcome::Integer(ledger.allowance(&owner, &spender)?.raw())
                }
                None => malformed(op),
            },
            Operation::Transfer => match (accounts::<2>(&args[..2]), args[2].as_amount()) {
                (Some([from, to]), Some(amount)) => {
                    settle(op, ledger.transfer(auth, &from, &to, amount))?
                }
                _ => malformed(op),
            },
            Operation::Approve => match (accounts::<2>(&args[..2]), args[2].as_amount()) {
                (Some([owner, spender]), Some(amount)) => {
                    settle(op, ledger.approve(auth, &owner, &spender, amount))?
                }
                _ => malformed(op),
            },
            Operation::TransferFrom => match (accounts::<3>(&args[..3]), args[3].as_amount()) {
                (Some([spender, from, to]), Some(amount)) => {
                    settle(op, ledger.transfer_from(auth, &spender, &from, &to, amount))?
                }
                _ => malformed(op),
            },
        };
        Ok(outcome)
    }
}

/// Decode exactly `N` account arguments.
fn accounts<const N: usize>(args: &[Arg]) -> Option<[Account; N]> {
    let decoded: Vec<Account> = args.iter().map(Arg::as_account).collect::<Option<_>>()?;
    decoded.try_into().ok()
}

fn malformed(op: Operation) -> Outcome {
    tracing::debug!(operation = op.name(), "malformed arguments");
    op.failure()
}

/// Map a ledger result to the host's boolean, keeping hard faults as errors.
fn settle(op: Operation, result: Result<(), LedgerError>) -> Result<Outcome, ContractError> {
    match result {
        Ok(()) => Ok(Outcome::Bool(true)),
        Err(e) if e.is_soft() => {
            tracing::debug!(operation = op.name(), reason = %e, "operation rejected");
            Ok(op.failure())
        }
        Err(e) => {
            tracing::warn!(operation = op.name(), error = %e, "operation failed");
            Err(e.into())
        }
    }
}
