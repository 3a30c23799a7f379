use pig_strategy_sim::dice::ScriptedDie;
use pig_strategy_sim::game::{play_game, GameConfig, Seat, MARGIN_REFERENCE};
use pig_strategy_sim::strategy::{find_preset, Decision, Strategy};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn cautious_versus_reckless_margins_stay_in_range() {
    let cautious = find_preset("alwaysFalse").expect("preset");
    let reckless = find_preset("alwaysTrue").expect("preset");
    let config = GameConfig::new(100);
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut wins = [0u32; 2];
    for _ in 0..1000 {
        let result = play_game(&cautious, &reckless, &config, &mut rng).expect("game");
        wins[result.winner.index()] += 1;
        assert!(
            (0..=100).contains(&result.margin),
            "margin {} out of range",
            result.margin
        );
    }
    assert_eq!(wins[0] + wins[1], 1000);
}

#[test]
fn until_six_self_play_ends_with_one_winner() {
    let a = Strategy::new("untilReach6", Decision::UntilValue(6));
    let b = a.clone();
    let config = GameConfig::new(100);
    let mut rng = SmallRng::seed_from_u64(6);
    let result = play_game(&a, &b, &config, &mut rng).expect("game");
    let winner = result.final_scores[result.winner.index()];
    let loser = result.final_scores[result.winner.opponent().index()];
    assert!(winner >= config.target_score);
    assert!(loser < config.target_score);
    assert_eq!(result.margin, MARGIN_REFERENCE - loser);
}

#[test]
fn margin_ignores_target_score() {
    let first = Strategy::new("banker", Decision::UntilValue(120));
    let second = Strategy::new("runner", Decision::AlwaysTrue);
    let mut die = ScriptedDie::new(vec![6]);
    let result = play_game(&first, &second, &GameConfig::new(200), &mut die).expect("game");
    assert_eq!(result.winner, Seat::Second);
    assert_eq!(result.winner_name, "runner");
    assert_eq!(result.final_scores, [120, 204]);
    assert_eq!(result.margin, -20);
}

#[test]
fn first_seat_wins_before_second_moves() {
    let a = Strategy::new("a", Decision::AlwaysTrue);
    let b = Strategy::new("b", Decision::AlwaysTrue);
    let mut die = ScriptedDie::new(vec![6]);
    let result = play_game(&a, &b, &GameConfig::new(20), &mut die).expect("game");
    assert_eq!(result.winner, Seat::First);
    assert_eq!(result.final_scores, [24, 0]);
    assert_eq!(result.margin, 100);
    assert_eq!(die.rolls_taken(), 4);
}

#[test]
fn bust_discards_the_whole_turn() {
    // a: 5, 4, bust | b: 6 bank | a: 6 x4 wins
    let a = Strategy::new("a", Decision::AlwaysTrue);
    let b = Strategy::new("b", Decision::AlwaysFalse);
    let mut faces = vec![5, 4, 1, 6];
    faces.extend([6; 4]);
    let mut die = ScriptedDie::new(faces);
    let result = play_game(&a, &b, &GameConfig::new(24), &mut die).expect("game");
    assert_eq!(result.winner, Seat::First);
    assert_eq!(result.final_scores, [24, 6]);
    assert_eq!(result.margin, 94);
}

#[test]
fn random_decisions_draw_from_the_coin() {
    let a = Strategy::new("coin", Decision::Random);
    let b = Strategy::new("bank", Decision::AlwaysFalse);
    // coin: continue, stop. First turn banks 3 + 3.
    let mut die = ScriptedDie::with_coins(vec![3], vec![true, false]);
    let result = play_game(&a, &b, &GameConfig::new(6), &mut die).expect("game");
    assert_eq!(result.winner, Seat::First);
    assert_eq!(result.final_scores, [6, 0]);
}
