//! Consensus tally: one group ranking per submitter per round

use crate::election::ElectionState;
use crate::error::{GovernanceError, Result};
use eden_core::constants::{MAX_GROUP_SIZE, MIN_GROUP_SIZE};
use eden_core::{AccountDirectory, AccountName, Authorization};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ranking submitted by one participant, best account first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusVote {
    pub round: u64,
    pub group_nr: u64,
    pub rankings: Vec<AccountName>,
    pub submitter: AccountName,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusTally {
    /// Round id -> submitter -> vote
    rounds: BTreeMap<u64, BTreeMap<AccountName, ConsensusVote>>,
}

impl ConsensusTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `submitter`'s ranking for the current round
    pub fn submit_ranking(
        &mut self,
        election: Option<&ElectionState>,
        auth: &dyn Authorization,
        accounts: &dyn AccountDirectory,
        group_nr: u64,
        rankings: Vec<AccountName>,
        submitter: &AccountName,
    ) -> Result<ConsensusVote> {
        auth.require_auth(submitter)?;

        let size = rankings.len();
        if size < MIN_GROUP_SIZE {
            return Err(GovernanceError::GroupTooSmall {
                size,
                min: MIN_GROUP_SIZE,
            });
        }
        if size > MAX_GROUP_SIZE {
            return Err(GovernanceError::GroupTooLarge {
                size,
                max: MAX_GROUP_SIZE,
            });
        }

        if let Some(missing) = rankings.iter().find(|acc| !accounts.is_account(acc)) {
            return Err(GovernanceError::AccountNotFound(missing.clone()));
        }

        let round = election
            .map(|state| state.election_nr)
            .ok_or(GovernanceError::NoActiveRound)?;

        let votes = self.rounds.entry(round).or_default();
        if votes.contains_key(submitter) {
            return Err(GovernanceError::AlreadyVoted {
                submitter: submitter.clone(),
                round,
            });
        }

        let vote = ConsensusVote {
            round,
            group_nr,
            rankings,
            submitter: submitter.clone(),
        };
        votes.insert(submitter.clone(), vote.clone());

        Ok(vote)
    }

    pub fn vote(&self, round: u64, submitter: &AccountName) -> Option<&ConsensusVote> {
        self.rounds.get(&round).and_then(|votes| votes.get(submitter))
    }

    /// All votes of a round, ordered by submitter
    pub fn votes(&self, round: u64) -> Vec<&ConsensusVote> {
        self.rounds
            .get(&round)
            .map(|votes| votes.values().collect())
            .unwrap_or_default()
    }

    /// Votes of a round for one group
    pub fn votes_by_group(&self, round: u64, group_nr: u64) -> Vec<&ConsensusVote> {
        self.votes(round)
            .into_iter()
            .filter(|vote| vote.group_nr == group_nr)
            .collect()
    }

    pub fn vote_count(&self, round: u64) -> usize {
        self.rounds.get(&round).map(BTreeMap::len).unwrap_or(0)
    }
}
