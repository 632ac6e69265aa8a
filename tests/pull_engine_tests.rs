//! Properties of a single pull, checked over long seeded pull sequences.

use warpsim::gacha::{
    hard_pity_reached, pull, FourStarGuaranteeModel, Outcome, PullConfiguration, RateState, Rng,
};

/// Pull `n` times from a fresh state, returning every (outcome, state-before, state-after).
fn pull_sequence(
    config: &PullConfiguration,
    n: usize,
    seed: u64,
) -> Vec<(Outcome, RateState, RateState)> {
    let mut rng = Rng::new(seed);
    let mut state = RateState::fresh(config);
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let (outcome, next) = pull(config, state, &mut rng);
        out.push((outcome, state, next));
        state = next;
    }
    out
}

#[test]
fn counters_reset_after_their_own_rarity() {
    let config = PullConfiguration::character_banner();
    for (outcome, before, after) in pull_sequence(&config, 50_000, 1) {
        match outcome.rarity() {
            5 => {
                assert_eq!(after.pulls_since_5star, 0);
                assert_eq!(after.pulls_since_4star, before.pulls_since_4star + 1);
            }
            4 => {
                assert_eq!(after.pulls_since_4star, 0);
                assert_eq!(after.pulls_since_5star, before.pulls_since_5star + 1);
            }
            _ => {
                assert_eq!(after.pulls_since_4star, before.pulls_since_4star + 1);
                assert_eq!(after.pulls_since_5star, before.pulls_since_5star + 1);
            }
        }
    }
}

#[test]
fn chance_returns_to_base_after_hit_and_never_drops_while_ramping() {
    let config = PullConfiguration::character_banner();
    for (outcome, before, after) in pull_sequence(&config, 50_000, 2) {
        match outcome.rarity() {
            5 => assert_eq!(after.current_5star_chance, config.base_5star_chance),
            4 => assert_eq!(after.current_4star_chance, config.base_4star_chance),
            _ => {
                assert!(after.current_5star_chance >= before.current_5star_chance);
                assert!(after.current_4star_chance >= before.current_4star_chance);
            }
        }
        if outcome.rarity() != 5 && before.pulls_since_5star >= config.soft_pity_start_5star {
            assert!(after.current_5star_chance > before.current_5star_chance);
        }
    }
}

#[test]
fn hundred_percent_featured_odds_never_gives_standard_five() {
    let config = PullConfiguration {
        featured_odds: 100.0,
        ..PullConfiguration::character_banner()
    };
    let outcomes = pull_sequence(&config, 100_000, 3);
    assert!(outcomes.iter().any(|(o, _, _)| *o == Outcome::Featured5));
    assert!(outcomes.iter().all(|(o, _, _)| *o != Outcome::Standard5));
}

#[test]
fn guarantee_forces_featured_five() {
    let config = PullConfiguration {
        base_5star_chance: 100.0,
        featured_odds: 0.0,
        ..PullConfiguration::character_banner()
    };
    let mut rng = Rng::new(4);
    let guaranteed = RateState::seeded(&config, 0, 10, true, false);
    let (outcome, next) = pull(&config, guaranteed, &mut rng);
    assert_eq!(outcome, Outcome::Featured5);
    assert!(!next.five_guaranteed);

    // Losing the 50/50 sets the guarantee for the next 5★.
    let (outcome, next) = pull(&config, next, &mut rng);
    assert_eq!(outcome, Outcome::Standard5);
    assert!(next.five_guaranteed);
}

#[test]
fn hard_pity_forces_five_star_on_ninetieth_pull() {
    let config = PullConfiguration {
        base_4star_chance: 100.0,
        base_5star_chance: 0.0,
        pity_increment_5star: 0.0,
        hard_pity_cap: Some(90),
        ..PullConfiguration::character_banner()
    };
    let state = RateState::seeded(&config, 0, 89, false, false);
    assert!(hard_pity_reached(&config, &state));
    for seed in 0..200 {
        let mut rng = Rng::new(seed);
        let (outcome, next) = pull(&config, state, &mut rng);
        assert_eq!(outcome.rarity(), 5, "seed {seed}");
        assert_eq!(next.pulls_since_5star, 0);
    }

    let before_cap = RateState::seeded(&config, 0, 88, false, false);
    assert!(!hard_pity_reached(&config, &before_cap));
}

#[test]
fn no_pull_ever_exceeds_the_hard_pity_cap() {
    let config = PullConfiguration::light_cone_banner();
    for (_, before, _) in pull_sequence(&config, 100_000, 5) {
        assert!(before.pulls_since_5star < 80);
    }
}

#[test]
fn persistent_four_star_guarantee_alternates_after_a_loss() {
    let config = PullConfiguration {
        four_star_featured_odds: 0.0,
        four_star_guarantee_model: FourStarGuaranteeModel::Persistent,
        ..PullConfiguration::character_banner()
    };
    let fours: Vec<Outcome> = pull_sequence(&config, 20_000, 6)
        .into_iter()
        .map(|(o, _, _)| o)
        .filter(|o| o.rarity() == 4)
        .collect();
    assert!(fours.len() > 100);
    // With 0% odds every 4★ loses unless guaranteed, so they strictly alternate.
    for pair in fours.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn four_star_coin_flip_model_ignores_the_guarantee_flag() {
    let config = PullConfiguration {
        base_4star_chance: 100.0,
        base_5star_chance: 0.0,
        pity_increment_5star: 0.0,
        hard_pity_cap: None,
        four_star_featured_odds: 0.0,
        four_star_guarantee_model: FourStarGuaranteeModel::None,
        ..PullConfiguration::character_banner()
    };
    let mut rng = Rng::new(7);
    let mut state = RateState::seeded(&config, 0, 0, false, true);
    for _ in 0..100 {
        let (outcome, next) = pull(&config, state, &mut rng);
        assert_eq!(outcome, Outcome::Standard4);
        assert!(next.four_guaranteed);
        state = next;
    }
}

#[test]
fn bands_are_disjoint() {
    // A 5★ chance of 100 leaves no room for a 4★ even at 100% 4★ chance.
    let config = PullConfiguration {
        base_4star_chance: 100.0,
        base_5star_chance: 100.0,
        ..PullConfiguration::character_banner()
    };
    for (outcome, _, _) in pull_sequence(&config, 1_000, 8) {
        assert_eq!(outcome.rarity(), 5);
    }

    let only_fours = PullConfiguration {
        base_4star_chance: 100.0,
        base_5star_chance: 0.0,
        pity_increment_5star: 0.0,
        hard_pity_cap: None,
        ..PullConfiguration::character_banner()
    };
    for (outcome, _, _) in pull_sequence(&only_fours, 1_000, 9) {
        assert_eq!(outcome.rarity(), 4);
    }
}

#[test]
fn observed_rates_follow_base_chances_without_pity() {
    let config = PullConfiguration {
        pity_increment_4star: 0.0,
        pity_increment_5star: 0.0,
        hard_pity_cap: None,
        ..PullConfiguration::character_banner()
    };
    let n = 200_000;
    let outcomes = pull_sequence(&config, n, 10);
    let fives = outcomes.iter().filter(|(o, _, _)| o.rarity() == 5).count();
    let fours = outcomes.iter().filter(|(o, _, _)| o.rarity() == 4).count();
    let five_rate = fives as f64 / n as f64 * 100.0;
    let four_rate = fours as f64 / n as f64 * 100.0;
    assert!((five_rate - 0.6).abs() < 0.1, "5* rate {five_rate}");
    assert!((four_rate - 5.1).abs() < 0.3, "4* rate {four_rate}");
}
