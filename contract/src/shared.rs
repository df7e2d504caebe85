//! Thread-safe handle to a single contract instance

use crate::action::{Action, ActionReceipt};
use crate::contract::EdenCreator;
use crate::error::Result;
use crate::state::ContractState;
use eden_core::Authorization;
use parking_lot::Mutex;
use std::sync::Arc;

/// Actions are serialized through one lock, so concurrent callers observe
/// them one at a time
#[derive(Clone)]
pub struct SharedEdenCreator {
    inner: Arc<Mutex<EdenCreator>>,
}

impl SharedEdenCreator {
    pub fn new(contract: EdenCreator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(contract)),
        }
    }

    pub fn apply(&self, action: Action, auth: &dyn Authorization) -> Result<ActionReceipt> {
        self.inner.lock().apply(action, auth)
    }

    /// Read-only access under the lock
    pub fn with<R>(&self, f: impl FnOnce(&EdenCreator) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Copy of the committed tables
    pub fn snapshot(&self) -> ContractState {
        self.inner.lock().state().clone()
    }
}
