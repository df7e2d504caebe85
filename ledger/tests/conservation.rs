//! Conservation tests: balances always sum to supply
//!
//! Drives a long, deterministic mix of successful and failing ledger actions
//! and checks the ledger invariants after every step.

use eden_core::{AccountName, AccountRegistry, Asset, Signers, Symbol};
use eden_ledger::*;

fn name(s: &str) -> AccountName {
    s.parse().unwrap()
}

const HOLDERS: [&str; 4] = ["alice", "bob", "carol", "dave"];

#[test]
fn test_supply_matches_balances_across_mixed_actions() {
    let contract = name("edencreator");
    let symbols = TokenSymbols {
        primary: Symbol::new(4, "CREATOR").unwrap(),
        secondary: Symbol::new(4, "EOS").unwrap(),
    };
    let accounts = AccountRegistry::with_accounts(
        HOLDERS
            .iter()
            .map(|s| name(s))
            .chain(std::iter::once(contract.clone())),
    );

    // Everybody signs; the rules under test are balance rules, not auth.
    let everyone: Signers = HOLDERS
        .iter()
        .map(|s| name(s))
        .chain(std::iter::once(contract.clone()))
        .collect();
    let ctx = TokenContext {
        contract: &contract,
        symbols: &symbols,
        auth: &everyone,
        accounts: &accounts,
    };

    let mut store = LedgerStore::new();
    store
        .create(&ctx, &contract, &Asset::new(10_000_000, symbols.secondary.clone()))
        .unwrap();
    store
        .create(&ctx, &contract, &Asset::new(10_000_000, symbols.primary.clone()))
        .unwrap();

    let mut failures = 0;
    for step in 0u32..400 {
        let from = name(HOLDERS[(step % 4) as usize]);
        let to = name(HOLDERS[((step * 7 + 1) % 4) as usize]);
        let amount = i64::from(step * 37 % 5_000) + 1;
        let eos = Asset::new(amount, symbols.secondary.clone());
        let creator = Asset::new(amount, symbols.primary.clone());

        let result = match step % 6 {
            0 => store.issue(&ctx, &contract, &eos, "mint"),
            1 => store.transfer(&ctx, &contract, &to, &eos, "pay"),
            2 => store.transfer(&ctx, &from, &to, &eos, "p2p"),
            3 => store.issue(&ctx, &contract, &creator, "mint"),
            4 => store.transfer(&ctx, &contract, &from, &creator, "dist"),
            _ => store.retire(&ctx, &eos, "burn"),
        };
        if result.is_err() {
            failures += 1;
        }

        assert!(store.is_balanced(), "ledger out of balance at step {}", step);
        for code in [symbols.primary.code(), symbols.secondary.code()] {
            let record = store.supply(code).unwrap();
            assert_eq!(store.circulating(code), i128::from(record.supply.amount));
            assert!(record.supply.amount <= record.max_supply.amount);
            assert!(store
                .holders(code)
                .iter()
                .all(|(_, row)| row.balance.amount >= 0));
        }
    }

    // The mix deliberately includes overdrafts and self transfers.
    assert!(failures > 0);
}

#[test]
fn test_transfer_is_conservative() {
    let contract = name("edencreator");
    let symbols = TokenSymbols {
        primary: Symbol::new(4, "CREATOR").unwrap(),
        secondary: Symbol::new(4, "EOS").unwrap(),
    };
    let accounts = AccountRegistry::with_accounts([contract.clone(), name("alice")]);
    let auth = Signers::single(contract.clone());
    let ctx = TokenContext {
        contract: &contract,
        symbols: &symbols,
        auth: &auth,
        accounts: &accounts,
    };

    let mut store = LedgerStore::new();
    store
        .create(&ctx, &contract, &Asset::new(1_000, symbols.secondary.clone()))
        .unwrap();
    store
        .issue(&ctx, &contract, &Asset::new(1_000, symbols.secondary.clone()), "")
        .unwrap();

    let before_sender = store.balance(&contract, &symbols.secondary).amount;
    let before_recipient = store.balance(&name("alice"), &symbols.secondary).amount;

    store
        .transfer(
            &ctx,
            &contract,
            &name("alice"),
            &Asset::new(333, symbols.secondary.clone()),
            "",
        )
        .unwrap();

    let sender_loss = before_sender - store.balance(&contract, &symbols.secondary).amount;
    let recipient_gain =
        store.balance(&name("alice"), &symbols.secondary).amount - before_recipient;
    assert_eq!(sender_loss, 333);
    assert_eq!(recipient_gain, 333);
}
