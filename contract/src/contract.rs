//! The Eden Creator contract
//!
//! Every public action follows the same shape:
//! 1. Clone the current tables into a staged copy
//! 2. Run the action (and any nested ledger calls) against the copy
//! 3. Commit the copy on success, drop it on failure

use crate::action::{Action, ActionReceipt};
use crate::config::ContractConfig;
use crate::error::{ContractError, Result};
use crate::state::ContractState;
use chrono::{DateTime, Utc};
use eden_core::{
    AccountDirectory, AccountName, AdminPolicy, Asset, Authorization, Signers, Symbol,
};
use eden_economics::{GroupRanking, RewardEngine};
use eden_governance::{ConsensusVote, ElectionState, RewardConfig};
use eden_ledger::{LedgerEvent, SupplyRecord, TokenContext, TokenSymbols};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Immutable deployment parameters and host capabilities
struct ContractEnv {
    config: ContractConfig,
    symbols: TokenSymbols,
    admins: AdminPolicy,
    engine: RewardEngine,
    accounts: Arc<dyn AccountDirectory + Send + Sync>,
}

impl ContractEnv {
    fn token_context<'a>(&'a self, auth: &'a dyn Authorization) -> TokenContext<'a> {
        TokenContext {
            contract: &self.config.contract,
            symbols: &self.symbols,
            auth,
            accounts: &*self.accounts,
        }
    }

    fn mint_memo(&self) -> String {
        format!("Mint new {} tokens", self.symbols.primary.code())
    }

    fn distribution_memo(&self) -> String {
        format!("Distribution of {} tokens", self.symbols.primary.code())
    }

    fn reward_memo(&self) -> String {
        format!("Eden Creators ${} rewards", self.symbols.secondary.code())
    }
}

pub struct EdenCreator {
    env: ContractEnv,
    state: ContractState,
}

impl EdenCreator {
    pub fn new(
        config: ContractConfig,
        accounts: Arc<dyn AccountDirectory + Send + Sync>,
    ) -> Result<Self> {
        Self::with_state(config, accounts, ContractState::new())
    }

    /// Resume from previously persisted tables
    pub fn with_state(
        config: ContractConfig,
        accounts: Arc<dyn AccountDirectory + Send + Sync>,
        state: ContractState,
    ) -> Result<Self> {
        config.validate()?;

        let symbols = config.token_symbols();
        let env = ContractEnv {
            admins: config.admin_policy(),
            engine: RewardEngine::new(symbols.primary.clone(), symbols.secondary.clone()),
            symbols,
            config,
            accounts,
        };

        Ok(Self { env, state })
    }

    pub fn config(&self) -> &ContractConfig {
        &self.env.config
    }

    pub fn contract_account(&self) -> &AccountName {
        &self.env.config.contract
    }

    pub fn state(&self) -> &ContractState {
        &self.state
    }

    pub fn into_state(self) -> ContractState {
        self.state
    }

    // ---- queries ----

    pub fn balance(&self, owner: &AccountName, symbol: &Symbol) -> Asset {
        self.state.ledger.balance(owner, symbol)
    }

    pub fn supply(&self, symbol: &Symbol) -> Option<&SupplyRecord> {
        self.state.ledger.supply(symbol.code())
    }

    pub fn election(&self) -> Option<&ElectionState> {
        self.state.election.as_ref()
    }

    pub fn reward_config(&self) -> Option<&RewardConfig> {
        self.state.reward_config.as_ref()
    }

    pub fn vote(&self, round: u64, submitter: &AccountName) -> Option<&ConsensusVote> {
        self.state.tally.vote(round, submitter)
    }

    pub fn votes_by_group(&self, round: u64, group_nr: u64) -> Vec<&ConsensusVote> {
        self.state.tally.votes_by_group(round, group_nr)
    }

    // ---- dispatch ----

    /// Run a serialized action
    pub fn apply(&mut self, action: Action, auth: &dyn Authorization) -> Result<ActionReceipt> {
        match action {
            Action::CreateSymbol { issuer, max_supply } => {
                self.create_symbol(auth, &issuer, &max_supply)
            }
            Action::Issue { to, quantity, memo } => self.issue(auth, &to, &quantity, &memo),
            Action::Retire { quantity, memo } => self.retire(auth, &quantity, &memo),
            Action::Transfer {
                from,
                to,
                quantity,
                memo,
            } => self.transfer(auth, &from, &to, &quantity, &memo),
            Action::OpenAccount {
                owner,
                symbol,
                payer,
            } => self.open_account(auth, &owner, &symbol, &payer),
            Action::CloseAccount { owner, symbol } => self.close_account(auth, &owner, &symbol),
            Action::SetRewardConfig { pool, fib_offset } => {
                self.set_reward_config(auth, &pool, fib_offset)
            }
            Action::StartRound => self.start_round(auth),
            Action::SubmitRanking {
                group_nr,
                rankings,
                submitter,
            } => self.submit_ranking(auth, group_nr, rankings, &submitter),
            Action::SubmitRanks { groups } => self.submit_ranks(auth, &groups),
        }
    }

    // ---- token actions ----

    pub fn create_symbol(
        &mut self,
        auth: &dyn Authorization,
        issuer: &AccountName,
        max_supply: &Asset,
    ) -> Result<ActionReceipt> {
        let ctx = self.env.token_context(auth);
        commit(&mut self.state, "create_symbol", |state| {
            Ok(vec![state.ledger.create(&ctx, issuer, max_supply)?])
        })
    }

    pub fn issue(
        &mut self,
        auth: &dyn Authorization,
        to: &AccountName,
        quantity: &Asset,
        memo: &str,
    ) -> Result<ActionReceipt> {
        let ctx = self.env.token_context(auth);
        commit(&mut self.state, "issue", |state| {
            Ok(vec![state.ledger.issue(&ctx, to, quantity, memo)?])
        })
    }

    pub fn retire(
        &mut self,
        auth: &dyn Authorization,
        quantity: &Asset,
        memo: &str,
    ) -> Result<ActionReceipt> {
        let ctx = self.env.token_context(auth);
        commit(&mut self.state, "retire", |state| {
            Ok(vec![state.ledger.retire(&ctx, quantity, memo)?])
        })
    }

    pub fn transfer(
        &mut self,
        auth: &dyn Authorization,
        from: &AccountName,
        to: &AccountName,
        quantity: &Asset,
        memo: &str,
    ) -> Result<ActionReceipt> {
        let ctx = self.env.token_context(auth);
        commit(&mut self.state, "transfer", |state| {
            Ok(vec![state.ledger.transfer(&ctx, from, to, quantity, memo)?])
        })
    }

    pub fn open_account(
        &mut self,
        auth: &dyn Authorization,
        owner: &AccountName,
        symbol: &Symbol,
        payer: &AccountName,
    ) -> Result<ActionReceipt> {
        let ctx = self.env.token_context(auth);
        commit(&mut self.state, "open_account", |state| {
            Ok(vec![state.ledger.open(&ctx, owner, symbol, payer)?])
        })
    }

    pub fn close_account(
        &mut self,
        auth: &dyn Authorization,
        owner: &AccountName,
        symbol: &Symbol,
    ) -> Result<ActionReceipt> {
        let ctx = self.env.token_context(auth);
        commit(&mut self.state, "close_account", |state| {
            Ok(vec![state.ledger.close(&ctx, owner, symbol)?])
        })
    }

    // ---- rounds and rewards ----

    pub fn set_reward_config(
        &mut self,
        auth: &dyn Authorization,
        pool: &Asset,
        fib_offset: u8,
    ) -> Result<ActionReceipt> {
        let env = &self.env;
        commit(&mut self.state, "set_reward_config", |state| {
            let config = RewardConfig::configure(
                &env.config.contract,
                &env.symbols.secondary,
                auth,
                pool,
                fib_offset,
            )?;
            info!(pool = %config.pool, fib_offset, "reward config updated");
            state.reward_config = Some(config);
            Ok(Vec::new())
        })
    }

    pub fn start_round(&mut self, auth: &dyn Authorization) -> Result<ActionReceipt> {
        self.start_round_at(auth, Utc::now())
    }

    /// Start the next round with an explicit timestamp
    pub fn start_round_at(
        &mut self,
        auth: &dyn Authorization,
        now: DateTime<Utc>,
    ) -> Result<ActionReceipt> {
        let admins = &self.env.admins;
        commit(&mut self.state, "start_round", |state| {
            let next = ElectionState::start_round(state.election.as_ref(), admins, auth, now)?;
            info!(
                election_nr = next.election_nr,
                start_time = %next.start_time,
                "round started"
            );
            state.election = Some(next);
            Ok(Vec::new())
        })
    }

    pub fn submit_ranking(
        &mut self,
        auth: &dyn Authorization,
        group_nr: u64,
        rankings: Vec<AccountName>,
        submitter: &AccountName,
    ) -> Result<ActionReceipt> {
        let accounts = &*self.env.accounts;
        commit(&mut self.state, "submit_ranking", |state| {
            let vote = state.tally.submit_ranking(
                state.election.as_ref(),
                auth,
                accounts,
                group_nr,
                rankings,
                submitter,
            )?;
            debug!(
                round = vote.round,
                group_nr = vote.group_nr,
                submitter = %vote.submitter,
                "ranking recorded"
            );
            Ok(Vec::new())
        })
    }

    /// Pay out a finalized batch of group rankings.
    ///
    /// For every ranked account the contract mints the primary credit to
    /// itself, forwards it, then forwards the secondary credit out of its
    /// own balance. The nested ledger calls run under the contract's own
    /// authority only.
    pub fn submit_ranks(
        &mut self,
        auth: &dyn Authorization,
        groups: &[GroupRanking],
    ) -> Result<ActionReceipt> {
        let env = &self.env;
        commit(&mut self.state, "submit_ranks", |state| {
            let contract = &env.config.contract;
            auth.require_auth(contract)?;

            let config = state
                .reward_config
                .clone()
                .ok_or(ContractError::RewardConfigMissing)?;
            let plan = env.engine.plan(groups, &config, &*env.accounts)?;

            info!(
                round = state.election_nr(),
                groups = groups.len(),
                credits = plan.credits.len(),
                total_primary = plan.total_primary(),
                total_secondary = plan.total_secondary(),
                "distributing rewards"
            );

            let contract_auth = Signers::single(contract.clone());
            let ctx = env.token_context(&contract_auth);
            let (mint_memo, distribution_memo, reward_memo) =
                (env.mint_memo(), env.distribution_memo(), env.reward_memo());

            let mut events = Vec::with_capacity(plan.credits.len() * 3);
            for credit in &plan.credits {
                debug!(
                    account = %credit.account,
                    tier = credit.tier,
                    primary = %credit.primary,
                    secondary = %credit.secondary,
                    "crediting"
                );
                events.push(state.ledger.issue(&ctx, contract, &credit.primary, &mint_memo)?);
                events.push(state.ledger.transfer(
                    &ctx,
                    contract,
                    &credit.account,
                    &credit.primary,
                    &distribution_memo,
                )?);
                events.push(state.ledger.transfer(
                    &ctx,
                    contract,
                    &credit.account,
                    &credit.secondary,
                    &reward_memo,
                )?);
            }
            Ok(events)
        })
    }
}

/// Run `action` on a staged copy of `state`, committing only on success
fn commit<F>(state: &mut ContractState, action: &str, run: F) -> Result<ActionReceipt>
where
    F: FnOnce(&mut ContractState) -> Result<Vec<LedgerEvent>>,
{
    let mut staged = state.clone();
    match run(&mut staged) {
        Ok(events) => {
            *state = staged;
            info!(action, events = events.len(), "action committed");
            Ok(ActionReceipt {
                action: action.to_string(),
                events,
            })
        }
        Err(err) => {
            warn!(action, category = %err.category(), error = %err, "action aborted");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eden_core::{AccountRegistry, ErrorCategory};
    use eden_ledger::LedgerError;

    fn name(s: &str) -> AccountName {
        s.parse().unwrap()
    }

    fn signed(s: &str) -> Signers {
        Signers::single(name(s))
    }

    fn eos(s: &str) -> Asset {
        format!("{} EOS", s).parse().unwrap()
    }

    fn creator_sym() -> Symbol {
        Symbol::new(4, "CREATOR").unwrap()
    }

    fn eos_sym() -> Symbol {
        Symbol::new(4, "EOS").unwrap()
    }

    fn contract() -> EdenCreator {
        let registry = AccountRegistry::with_accounts(
            ["edencreator", "dan", "alice", "bob"].iter().map(|s| name(s)),
        );
        EdenCreator::new(ContractConfig::standard().unwrap(), Arc::new(registry)).unwrap()
    }

    /// EOS created and 100.0000 held by alice
    fn funded() -> EdenCreator {
        let mut c = contract();
        let sys = signed("edencreator");
        c.create_symbol(&sys, &name("edencreator"), &eos("1000.0000"))
            .unwrap();
        c.issue(&sys, &name("edencreator"), &eos("100.0000"), "")
            .unwrap();
        c.transfer(&sys, &name("edencreator"), &name("alice"), &eos("100.0000"), "")
            .unwrap();
        c
    }

    #[test]
    fn test_failed_action_leaves_state_untouched() {
        let mut c = funded();
        let before = c.state().clone();

        let err = c
            .transfer(
                &signed("alice"),
                &name("alice"),
                &name("bob"),
                &eos("100.0001"),
                "",
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::Ledger(LedgerError::Overdrawn { .. })
        ));
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn test_transfer_receipt_notifies_both_parties() {
        let mut c = funded();
        let receipt = c
            .transfer(
                &signed("alice"),
                &name("alice"),
                &name("bob"),
                &eos("1.0000"),
                "hi",
            )
            .unwrap();

        let notified: Vec<&str> = receipt
            .notifications()
            .iter()
            .map(|(acc, _)| acc.as_str())
            .collect();
        assert_eq!(notified, vec!["alice", "bob"]);
        assert_eq!(c.balance(&name("bob"), &eos_sym()), eos("1.0000"));
    }

    #[test]
    fn test_submit_ranks_requires_reward_config() {
        let mut c = funded();
        let groups = vec![
            GroupRanking::new(vec![name("a"), name("b")]),
            GroupRanking::new(vec![name("c"), name("d")]),
        ];
        let err = c.submit_ranks(&signed("edencreator"), &groups).unwrap_err();
        assert!(matches!(err, ContractError::RewardConfigMissing));
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn test_submit_ranks_requires_contract_auth() {
        let mut c = funded();
        let err = c.submit_ranks(&signed("dan"), &[]).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Authorization);
    }

    #[test]
    fn test_reward_config_rejects_primary_pool() {
        let mut c = contract();
        let pool = Asset::new(1_000_000, creator_sym());
        let err = c
            .set_reward_config(&signed("edencreator"), &pool, 5)
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(c.reward_config().is_none());
    }

    #[test]
    fn test_round_lifecycle() {
        let mut c = contract();
        assert!(c.election().is_none());

        let err = c.start_round(&signed("alice")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Authorization);

        c.start_round(&signed("dan")).unwrap();
        c.start_round(&signed("dan")).unwrap();
        assert_eq!(c.election().unwrap().election_nr, 2);
        assert_eq!(c.state().election_nr(), 2);
    }

    #[test]
    fn test_apply_dispatch() {
        let mut c = contract();
        let receipt = c
            .apply(
                Action::CreateSymbol {
                    issuer: name("edencreator"),
                    max_supply: eos("10.0000"),
                },
                &signed("edencreator"),
            )
            .unwrap();
        assert_eq!(receipt.action, "create_symbol");
        assert_eq!(receipt.events.len(), 1);
        assert!(c.supply(&eos_sym()).is_some());

        let receipt = c.apply(Action::StartRound, &signed("dan")).unwrap();
        assert!(receipt.events.is_empty());
        assert_eq!(c.state().election_nr(), 1);
    }
}
