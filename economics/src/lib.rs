//! Eden Creator Economics Module
//!
//! Implements the per-round reward model:
//! - Golden-ratio tier weights for the secondary (pool) token
//! - Fibonacci-indexed amounts for the primary token
//! - Batch validation and distribution planning

pub mod error;
pub mod fibonacci;
pub mod rewards;

pub use error::{RewardError, Result};
pub use fibonacci::fibonacci;
pub use rewards::{
    coeff_sum, tier_rewards, DistributionPlan, GroupRanking, RewardCredit, RewardEngine,
    POLY_COEFFS,
};
