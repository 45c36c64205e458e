//! Runs the contract against the on-disk ledger for one CLI command.

use anyhow::Context;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};

use cbc_contract::{Contract, Outcome, SignedInvocation, Trigger, WitnessInfo};
use cbc_ledger::{Ledger, Notification};
use cbc_store_lmdb::{LmdbEnvironment, LmdbStore};

use crate::config::LedgerConfig;

/// Collects the notifications emitted while a command runs.
#[derive(Clone, Default)]
struct NotificationLog {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    fn listener(&self) -> Box<dyn Fn(&Notification) + Send + Sync> {
        let seen = Arc::clone(&self.seen);
        Box::new(move |n| {
            tracing::info!(event = n.name(), "notification");
            seen.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(n.clone());
        })
    }

    fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// What `cbc invoke` prints.
#[derive(Debug, Serialize)]
pub struct InvokeReport {
    pub operation: String,
    pub trigger: Trigger,
    pub witnesses: Vec<WitnessInfo>,
    pub result: Outcome,
    pub notifications: Vec<Notification>,
}

/// The contract over the configured LMDB store, with its notifications captured.
pub struct Host {
    contract: Contract<LmdbStore>,
    notifications: NotificationLog,
}

impl Host {
    pub fn open(config: &LedgerConfig) -> anyhow::Result<Self> {
        let genesis = config.token.genesis()?;
        let env = LmdbEnvironment::open(&config.data_dir, config.map_size)
            .with_context(|| format!("opening ledger at {}", config.data_dir.display()))?;
        tracing::info!(
            path = %env.path().display(),
            symbol = %genesis.metadata.symbol,
            "ledger store opened"
        );

        let notifications = NotificationLog::default();
        let mut ledger = Ledger::new(env.ledger_store(), genesis);
        ledger.subscribe(notifications.listener());
        Ok(Self {
            contract: Contract::new(ledger),
            notifications,
        })
    }

    pub fn contract(&self) -> &Contract<LmdbStore> {
        &self.contract
    }

    pub fn invoke(&self, signed: &SignedInvocation) -> anyhow::Result<InvokeReport> {
        let result = self.contract.invoke_signed(signed)?;
        Ok(InvokeReport {
            operation: signed.invocation.operation.clone(),
            trigger: signed.invocation.trigger,
            witnesses: signed.witnesses.iter().map(WitnessInfo::from).collect(),
            result,
            notifications: self.notifications.take(),
        })
    }
}
