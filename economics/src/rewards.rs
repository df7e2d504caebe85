//! Reward distribution planning
//!
//! A round pays two curves to every ranked account:
//! - Secondary (pool) token: the configured pool is split over six tiers
//!   weighted by successive powers of the golden ratio
//! - Primary token: a Fibonacci number scaled to the primary precision,
//!   shifted by the configured offset
//!
//! Groups smaller than six start below the top tier, so a group of four
//! pays tiers 2..=5.

use crate::error::{RewardError, Result};
use crate::fibonacci::fibonacci;
use eden_core::constants::{MAX_ASSET_AMOUNT, MAX_GROUP_SIZE, MIN_GROUPS, MIN_GROUP_SIZE};
use eden_core::{AccountDirectory, AccountName, Asset, Symbol};
use eden_governance::RewardConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Powers of phi (1.618...) truncated to the published precision, tier 0 first
pub const POLY_COEFFS: [f64; MAX_GROUP_SIZE] = [
    1.0,
    1.618,
    2.617924,
    4.235801032,
    6.85352607,
    11.08900518,
];

pub fn coeff_sum() -> f64 {
    POLY_COEFFS.iter().fold(0.0, |acc, c| acc + c)
}

/// Secondary-token amount per tier for one round.
///
/// `multiplier = pool / (groups * sum(coeffs))`, each tier pays
/// `floor(multiplier * coeff)`. Every tier must come out positive.
pub fn tier_rewards(pool: &Asset, num_groups: usize) -> Result<[i64; MAX_GROUP_SIZE]> {
    let multiplier = pool.amount as f64 / (num_groups as f64 * coeff_sum());

    let mut rewards = [0i64; MAX_GROUP_SIZE];
    for (tier, coeff) in POLY_COEFFS.iter().enumerate() {
        // float-to-int casts saturate, so an absurd pool cannot wrap
        let amount = (multiplier * coeff).floor() as i64;
        if amount <= 0 {
            return Err(RewardError::PoolTooSmall {
                pool: pool.clone(),
                tier,
            });
        }
        rewards[tier] = amount;
    }
    Ok(rewards)
}

/// One group's ranking in submitted order; position `i` of a group of
/// size `n` maps to tier `6 - n + i`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRanking {
    pub ranking: Vec<AccountName>,
}

impl GroupRanking {
    pub fn new(ranking: Vec<AccountName>) -> Self {
        Self { ranking }
    }
}

/// Credits owed to one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardCredit {
    pub account: AccountName,
    pub group: usize,
    pub tier: usize,
    pub primary: Asset,
    pub secondary: Asset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionPlan {
    pub tier_rewards: [i64; MAX_GROUP_SIZE],
    /// In batch order: group by group, seats in submitted order
    pub credits: Vec<RewardCredit>,
}

impl DistributionPlan {
    pub fn total_primary(&self) -> i128 {
        self.credits
            .iter()
            .map(|credit| i128::from(credit.primary.amount))
            .sum()
    }

    pub fn total_secondary(&self) -> i128 {
        self.credits
            .iter()
            .map(|credit| i128::from(credit.secondary.amount))
            .sum()
    }
}

/// Computes a round's credits; never touches the ledger
#[derive(Debug, Clone)]
pub struct RewardEngine {
    primary: Symbol,
    secondary: Symbol,
}

impl RewardEngine {
    pub fn new(primary: Symbol, secondary: Symbol) -> Self {
        Self { primary, secondary }
    }

    /// Plan the distribution for a finalized batch of group rankings.
    ///
    /// Every account may appear once in the whole batch and must exist.
    /// Rankings must already be in their final order; the position alone
    /// decides the tier and nothing here re-sorts them.
    pub fn plan(
        &self,
        groups: &[GroupRanking],
        config: &RewardConfig,
        accounts: &dyn AccountDirectory,
    ) -> Result<DistributionPlan> {
        if groups.len() < MIN_GROUPS {
            return Err(RewardError::TooFewGroups {
                count: groups.len(),
                min: MIN_GROUPS,
            });
        }

        let tier_rewards = tier_rewards(&config.pool, groups.len())?;

        let mut seen = BTreeSet::new();
        let mut credits = Vec::new();

        for (group_index, group) in groups.iter().enumerate() {
            let size = group.ranking.len();
            if size < MIN_GROUP_SIZE {
                return Err(RewardError::GroupTooSmall {
                    group: group_index,
                    size,
                    min: MIN_GROUP_SIZE,
                });
            }
            if size > MAX_GROUP_SIZE {
                return Err(RewardError::GroupTooLarge {
                    group: group_index,
                    size,
                    max: MAX_GROUP_SIZE,
                });
            }

            let first_tier = MAX_GROUP_SIZE - size;
            for (position, account) in group.ranking.iter().enumerate() {
                if !accounts.is_account(account) {
                    return Err(RewardError::AccountNotFound(account.clone()));
                }
                if !seen.insert(account) {
                    return Err(RewardError::DuplicateAccount(account.clone()));
                }

                let rank_index = first_tier + position;
                let secondary = *tier_rewards
                    .get(rank_index)
                    .ok_or(RewardError::TierOutOfRange { rank_index })?;

                credits.push(RewardCredit {
                    account: account.clone(),
                    group: group_index,
                    tier: rank_index,
                    primary: self.primary_credit(rank_index, config.fib_offset)?,
                    secondary: Asset::new(secondary, self.secondary.clone()),
                });
            }
        }

        Ok(DistributionPlan {
            tier_rewards,
            credits,
        })
    }

    /// `F(rank_index + offset) * 10^precision` of the primary symbol
    fn primary_credit(&self, rank_index: usize, fib_offset: u8) -> Result<Asset> {
        let index = rank_index + usize::from(fib_offset);
        let amount = fibonacci(index)
            .and_then(|fib| i64::try_from(fib).ok())
            .and_then(|fib| fib.checked_mul(self.primary.precision_factor()))
            .filter(|amount| *amount <= MAX_ASSET_AMOUNT)
            .ok_or(RewardError::CreditOverflow { index })?;
        Ok(Asset::new(amount, self.primary.clone()))
    }
}
