//! Eden Creator Governance Module
//!
//! Round bookkeeping for the reward distribution:
//! - Election state (round counter and start time)
//! - Reward pool configuration
//! - Consensus tally of submitted group rankings

pub mod election;
pub mod error;
pub mod reward_config;
pub mod tally;

pub use election::ElectionState;
pub use error::{GovernanceError, Result};
pub use reward_config::RewardConfig;
pub use tally::{ConsensusTally, ConsensusVote};
