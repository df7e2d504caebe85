//! Persistent contract tables

use eden_governance::{ConsensusTally, ElectionState, RewardConfig};
use eden_ledger::LedgerStore;
use serde::{Deserialize, Serialize};

/// Everything the contract stores, snapshotted as one unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractState {
    pub ledger: LedgerStore,
    pub election: Option<ElectionState>,
    pub reward_config: Option<RewardConfig>,
    pub tally: ConsensusTally,
}

impl ContractState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current round, 0 before the first round starts
    pub fn election_nr(&self) -> u64 {
        self.election
            .as_ref()
            .map(|state| state.election_nr)
            .unwrap_or(0)
    }
}
