//! Serializable contract actions

use eden_core::{AccountName, Asset, Symbol};
use eden_economics::GroupRanking;
use eden_ledger::LedgerEvent;
use serde::{Deserialize, Serialize};

/// One contract action as submitted by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    CreateSymbol {
        issuer: AccountName,
        max_supply: Asset,
    },
    Issue {
        to: AccountName,
        quantity: Asset,
        #[serde(default)]
        memo: String,
    },
    Retire {
        quantity: Asset,
        #[serde(default)]
        memo: String,
    },
    Transfer {
        from: AccountName,
        to: AccountName,
        quantity: Asset,
        #[serde(default)]
        memo: String,
    },
    OpenAccount {
        owner: AccountName,
        symbol: Symbol,
        payer: AccountName,
    },
    CloseAccount {
        owner: AccountName,
        symbol: Symbol,
    },
    SetRewardConfig {
        pool: Asset,
        fib_offset: u8,
    },
    StartRound,
    SubmitRanking {
        group_nr: u64,
        rankings: Vec<AccountName>,
        submitter: AccountName,
    },
    SubmitRanks {
        groups: Vec<GroupRanking>,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::CreateSymbol { .. } => "create_symbol",
            Action::Issue { .. } => "issue",
            Action::Retire { .. } => "retire",
            Action::Transfer { .. } => "transfer",
            Action::OpenAccount { .. } => "open_account",
            Action::CloseAccount { .. } => "close_account",
            Action::SetRewardConfig { .. } => "set_reward_config",
            Action::StartRound => "start_round",
            Action::SubmitRanking { .. } => "submit_ranking",
            Action::SubmitRanks { .. } => "submit_ranks",
        }
    }
}

/// Outcome of a committed action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReceipt {
    pub action: String,
    /// Ledger effects in execution order
    pub events: Vec<LedgerEvent>,
}

impl ActionReceipt {
    /// Every (account, event) notification the action produced
    pub fn notifications(&self) -> Vec<(&AccountName, &LedgerEvent)> {
        self.events
            .iter()
            .flat_map(|event| event.notified().into_iter().map(move |acc| (acc, event)))
            .collect()
    }
}
