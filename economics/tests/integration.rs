use eden_core::{AccountName, AccountRegistry, Asset, Symbol};
use eden_economics::*;
use eden_governance::RewardConfig;

fn name(s: &str) -> AccountName {
    s.parse().unwrap()
}

fn engine() -> RewardEngine {
    RewardEngine::new(
        Symbol::new(4, "CREATOR").unwrap(),
        Symbol::new(4, "EOS").unwrap(),
    )
}

#[test]
fn test_fibonacci_reference_values() {
    assert_eq!(fibonacci(0), Some(0));
    assert_eq!(fibonacci(1), Some(1));
    assert_eq!(fibonacci(7), Some(13));
}

#[test]
fn test_reference_round() {
    // 100.0000 EOS over three groups of five
    let accounts: Vec<AccountName> = (1..=3)
        .flat_map(|group| {
            ["a", "b", "c", "d", "e"]
                .iter()
                .map(move |seat| name(&format!("user{}{}", seat, group)))
        })
        .collect();
    let registry = AccountRegistry::with_accounts(accounts.clone());
    let groups: Vec<GroupRanking> = accounts
        .chunks(5)
        .map(|chunk| GroupRanking::new(chunk.to_vec()))
        .collect();

    let config = RewardConfig {
        pool: "100.0000 EOS".parse::<Asset>().unwrap(),
        fib_offset: 5,
    };
    let plan = engine().plan(&groups, &config, &registry).unwrap();

    // multiplier = 1_000_000 / (3 * 27.414256282)
    let multiplier = 1_000_000.0 / (3.0 * coeff_sum());
    for (tier, coeff) in POLY_COEFFS.iter().enumerate() {
        assert_eq!(plan.tier_rewards[tier], (multiplier * coeff).floor() as i64);
    }

    assert_eq!(plan.credits.len(), 15);
    // Groups of five start at tier 1: F(6) = 8 for the first seat
    for group in plan.credits.chunks(5) {
        assert_eq!(group[0].tier, 1);
        assert_eq!(group[0].primary.amount, 8 * 10_000);
        assert_eq!(group[4].tier, 5);
        assert_eq!(group[4].primary.amount, 55 * 10_000);
    }

    // Weights grow along the ranking order
    for pair in plan.credits[..5].windows(2) {
        assert!(pair[0].secondary.amount < pair[1].secondary.amount);
    }
    assert!(plan.total_secondary() <= i128::from(config.pool.amount));
}
