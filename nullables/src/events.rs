//! Nullable notification sink: collects notifications instead of delivering them.

use cbc_ledger::Notification;
use std::sync::{Arc, Mutex};

/// Records every notification it is subscribed to.
#[derive(Clone, Default)]
pub struct NotificationRecorder {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener suitable for `Ledger::subscribe`.
    pub fn listener(&self) -> Box<dyn Fn(&Notification) + Send + Sync> {
        let seen = Arc::clone(&self.seen);
        Box::new(move |n| seen.lock().unwrap().push(n.clone()))
    }

    /// All notifications recorded so far.
    pub fn recorded(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.seen.lock().unwrap().clear();
    }
}
