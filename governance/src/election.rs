//! Election round counter

use crate::error::{GovernanceError, Result};
use chrono::{DateTime, Utc};
use eden_core::{AdminPolicy, Authorization};
use serde::{Deserialize, Serialize};

/// Current distribution round and when it started
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionState {
    pub election_nr: u64,
    pub start_time: DateTime<Utc>,
}

impl ElectionState {
    /// Build the round following `current`. The first round is 1.
    ///
    /// Any administrator may advance the round. The counter never wraps.
    pub fn start_round(
        current: Option<&ElectionState>,
        admins: &AdminPolicy,
        auth: &dyn Authorization,
        now: DateTime<Utc>,
    ) -> Result<ElectionState> {
        admins.require_admin(auth)?;

        let current_nr = current.map(|state| state.election_nr).unwrap_or(0);
        let election_nr = current_nr
            .checked_add(1)
            .ok_or(GovernanceError::RoundOverflow)?;

        Ok(ElectionState {
            election_nr,
            start_time: now,
        })
    }
}
