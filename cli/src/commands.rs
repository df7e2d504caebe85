use crate::{Cli, Commands, ShowCommand};
use anyhow::{bail, Context, Result};
use eden_contract::{Action, ActionReceipt, ContractConfig, ContractState, EdenCreator};
use eden_core::{AccountName, AccountRegistry, Signers, Symbol};
use eden_storage::{SnapshotStore, STATE_SNAPSHOT};
use owo_colors::OwoColorize;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// An action file holds either one action or a list applied in order
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ActionFile {
    Many(Vec<Action>),
    One(Action),
}

impl ActionFile {
    fn into_actions(self) -> Vec<Action> {
        match self {
            ActionFile::Many(actions) => actions,
            ActionFile::One(action) => vec![action],
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { force } => init(&cli.config, &cli.data_dir, force),
        Commands::Register { account } => register(&cli.config, &account),
        Commands::Apply { action, signers } => {
            apply(&cli.config, &cli.data_dir, &action, &signers).await
        }
        Commands::Show { what } => show(&cli.config, &cli.data_dir, what),
    }
}

fn init(config_path: &Path, data_dir: &Path, force: bool) -> Result<()> {
    let config = if config_path.exists() {
        ContractConfig::load(config_path)
            .with_context(|| format!("loading {}", config_path.display()))?
    } else {
        let config = ContractConfig::standard()?;
        config.save(config_path)?;
        info!(path = %config_path.display(), "wrote standard configuration");
        config
    };

    let store = SnapshotStore::open(data_dir)?;
    if store.exists(STATE_SNAPSHOT) && !force {
        bail!(
            "state already exists in {} (use --force to reset it)",
            data_dir.display()
        );
    }
    store.save_state(&ContractState::new())?;

    println!(
        "{} contract {} ({} / {})",
        "Initialized".green().bold(),
        config.contract,
        config.primary_symbol,
        config.secondary_symbol
    );
    Ok(())
}

fn register(config_path: &Path, account: &str) -> Result<()> {
    let mut config = ContractConfig::load(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let account: AccountName = account.parse()?;

    if config.known_accounts().contains(&account) {
        println!("{} is already registered", account);
        return Ok(());
    }

    config.accounts.push(account.clone());
    config.save(config_path)?;
    println!("{} {}", "Registered".green().bold(), account);
    Ok(())
}

fn load_contract(config_path: &Path, data_dir: &Path) -> Result<(EdenCreator, SnapshotStore)> {
    let config = ContractConfig::load(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let store = SnapshotStore::open(data_dir)?;
    let state = store
        .load_state()?
        .context("no contract state found, run `edenctl init` first")?;

    let registry = AccountRegistry::with_accounts(config.known_accounts());
    let contract = EdenCreator::with_state(config, Arc::new(registry), state)?;
    Ok((contract, store))
}

fn parse_signers(signers: &[String]) -> Result<Signers> {
    if signers.is_empty() {
        bail!("at least one --signer is required");
    }
    let signers = signers
        .iter()
        .map(|s| s.parse::<AccountName>())
        .collect::<std::result::Result<Signers, _>>()?;
    Ok(signers)
}

/// Apply every action in the file; nothing is persisted unless all succeed
async fn apply(
    config_path: &Path,
    data_dir: &Path,
    action_path: &Path,
    signers: &[String],
) -> Result<()> {
    let signers = parse_signers(signers)?;
    let contents = tokio::fs::read_to_string(action_path)
        .await
        .with_context(|| format!("reading {}", action_path.display()))?;
    let actions = serde_json::from_str::<ActionFile>(&contents)
        .with_context(|| format!("parsing {}", action_path.display()))?
        .into_actions();

    let (mut contract, store) = load_contract(config_path, data_dir)?;

    let mut receipts: Vec<ActionReceipt> = Vec::with_capacity(actions.len());
    let mut finished_rounds: Vec<ContractState> = Vec::new();
    for (index, action) in actions.into_iter().enumerate() {
        let name = action.name();
        if action == Action::StartRound && contract.state().election_nr() > 0 {
            finished_rounds.push(contract.state().clone());
        }
        let receipt = contract
            .apply(action, &signers)
            .with_context(|| format!("action #{} ({}) failed", index + 1, name))?;
        receipts.push(receipt);
    }

    store.save_state(contract.state())?;
    for state in &finished_rounds {
        store.archive_round(state)?;
    }

    println!("{}", serde_json::to_string_pretty(&receipts)?);
    Ok(())
}

fn show(config_path: &Path, data_dir: &Path, what: ShowCommand) -> Result<()> {
    let (contract, _) = load_contract(config_path, data_dir)?;
    let state = contract.state();

    match what {
        ShowCommand::State => {
            println!("{}", serde_json::to_string_pretty(state)?);
        }

        ShowCommand::Balance { owner, symbol } => {
            let owner: AccountName = owner.parse()?;
            let symbol: Symbol = symbol.parse()?;
            let balance = contract.balance(&owner, &symbol);
            println!("{}: {}", owner, balance.to_string().green());
        }

        ShowCommand::Supply => {
            let mut any = false;
            for record in state.ledger.supplies() {
                any = true;
                println!(
                    "{:<8} supply {} / max {} (issuer {})",
                    record.supply.symbol.code().to_string().yellow().bold(),
                    record.supply,
                    record.max_supply,
                    record.issuer
                );
            }
            if !any {
                println!("no symbols created");
            }
        }

        ShowCommand::Round => {
            match contract.election() {
                Some(election) => println!(
                    "{} {} (started {})",
                    "Round".yellow().bold(),
                    election.election_nr,
                    election.start_time.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                None => println!("no round started"),
            }
            match contract.reward_config() {
                Some(config) => println!(
                    "{} {} per round, fibonacci offset {}",
                    "Pool".yellow().bold(),
                    config.pool,
                    config.fib_offset
                ),
                None => println!("reward config not set"),
            }
        }

        ShowCommand::Votes { round, group } => {
            let votes = match group {
                Some(group_nr) => contract.votes_by_group(round, group_nr),
                None => state.tally.votes(round),
            };
            println!("{} votes in round {}", votes.len(), round);
            for vote in votes {
                let ranking: Vec<&str> = vote.rankings.iter().map(|a| a.as_str()).collect();
                println!(
                    "  {} group {}: {}",
                    vote.submitter.to_string().cyan(),
                    vote.group_nr,
                    ranking.join(" > ")
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_file_single_or_list() {
        let one: ActionFile = serde_json::from_str(r#"{"action":"start_round"}"#).unwrap();
        assert_eq!(one.into_actions(), vec![Action::StartRound]);

        let many: ActionFile = serde_json::from_str(
            r#"[
                {"action":"start_round"},
                {"action":"set_reward_config","pool":"100.0000 EOS","fib_offset":5}
            ]"#,
        )
        .unwrap();
        let actions = many.into_actions();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[1].name(), "set_reward_config");
    }

    #[test]
    fn test_parse_signers() {
        let signers = parse_signers(&["alice".to_string(), "bob".to_string()]).unwrap();
        assert_eq!(signers.iter().count(), 2);

        assert!(parse_signers(&[]).is_err());
        assert!(parse_signers(&["Not Valid".to_string()]).is_err());
    }
}
