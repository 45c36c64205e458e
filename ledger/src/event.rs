//! Notifications emitted after a ledger operation commits.

use cbc_types::{Account, TokenAmount};
use serde::Serialize;

/// A completed transfer or approval, shaped `(principal_a, principal_b, amount)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    /// Tokens moved. `from` is `None` only for the genesis credit.
    Transfer {
        from: Option<Account>,
        to: Account,
        amount: TokenAmount,
    },
    /// An allowance was set.
    Approval {
        owner: Account,
        spender: Account,
        amount: TokenAmount,
    },
}

impl Notification {
    /// The host-facing event name.
    pub fn name(&self) -> &'static str {
        match self {
            Notification::Transfer { .. } => "transfer",
            Notification::Approval { .. } => "approval",
        }
    }
}

/// Synchronous fan-out bus for ledger notifications.
///
/// Listeners run inline while the ledger still holds its operation lock, so
/// they observe notifications in commit order. A listener must not call back
/// into the ledger.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&Notification) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&Notification) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, notification: &Notification) {
        tracing::trace!(event = notification.name(), "emitting notification");
        for listener in &self.listeners {
            listener(notification);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
