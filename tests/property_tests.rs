//! Property-based tests for the game engine and batch runner.

use pig_strategy_sim::batch::run_batch_seeded;
use pig_strategy_sim::game::{play_game, GameConfig, MARGIN_REFERENCE};
use pig_strategy_sim::strategy::{default_strategies, Strategy as Player};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn preset_strategy() -> impl Strategy<Value = usize> {
    0..19usize
}

fn presets() -> Vec<Player> {
    default_strategies()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Games finish well inside the round guard, with exactly one side at the target.
    #[test]
    fn games_terminate(
        target in 1..=300i32,
        a in preset_strategy(),
        b in preset_strategy(),
        seed in any::<u64>(),
    ) {
        let all = presets();
        let config = GameConfig { target_score: target, round_limit: 10_000 };
        let mut rng = SmallRng::seed_from_u64(seed);
        let result = play_game(&all[a], &all[b], &config, &mut rng).unwrap();
        let winner = result.final_scores[result.winner.index()];
        let loser = result.final_scores[result.winner.opponent().index()];
        prop_assert!(winner >= target);
        prop_assert!(loser < target);
        prop_assert_eq!(result.margin, MARGIN_REFERENCE - loser);
    }

    #[test]
    fn batch_books_balance(
        a in preset_strategy(),
        b in preset_strategy(),
        games in 1..40u64,
        seed in any::<u64>(),
    ) {
        let all = presets();
        let config = GameConfig::new(100);
        let batch = run_batch_seeded(&all[a], &all[b], &config, games, seed).unwrap();
        prop_assert_eq!(batch.win_count[0] + batch.win_count[1], games);
        for (mine, theirs) in batch.win_margins[0].iter().zip(&batch.win_margins[1]) {
            prop_assert_eq!(*mine, -*theirs);
        }
    }
}
