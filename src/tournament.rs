use crate::batch::{run_batch, BatchResult};
use crate::error::SimError;
use crate::game::GameConfig;
use crate::strategy::Strategy;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::HashMap;

/// Every ordered pair of indices, self-pairings included.
pub fn ordered_pairs(len: usize) -> Vec<(usize, usize)> {
    (0..len)
        .flat_map(|a| (0..len).map(move |b| (a, b)))
        .collect()
}

fn pair_seed(seed: u64, a_idx: usize, b_idx: usize) -> u64 {
    seed ^ ((a_idx as u64) << 32) ^ (b_idx as u64)
}

fn record_name(first: &Strategy, second: &Strategy) -> String {
    format!("{}-{}", first.name, second.name)
}

/// Fails if two distinct pairings would be stored under the same record name,
/// as happens with a repeated strategy or with names such as `a-b` and `b-a-b`.
pub fn check_record_names(strategies: &[Strategy]) -> Result<(), SimError> {
    let mut seen: HashMap<String, (usize, usize)> = HashMap::new();
    for (a_idx, b_idx) in ordered_pairs(strategies.len()) {
        let record = record_name(&strategies[a_idx], &strategies[b_idx]);
        if let Some(&(x, y)) = seen.get(&record) {
            return Err(SimError::RecordNameClash {
                first: format!("{} vs. {}", strategies[x].name, strategies[y].name),
                second: format!("{} vs. {}", strategies[a_idx].name, strategies[b_idx].name),
                record,
            });
        }
        seen.insert(record, (a_idx, b_idx));
    }
    Ok(())
}

/// Plays `games_per_pair` games for every ordered pair of `strategies`.
///
/// Pairs run in parallel, each with its own RNG seeded from `seed` and the
/// pair's indices, so results do not depend on scheduling. Output follows
/// [`ordered_pairs`] order.
pub fn run_tournament(
    strategies: &[Strategy],
    config: &GameConfig,
    games_per_pair: u64,
    seed: u64,
) -> Result<Vec<BatchResult>, SimError> {
    config.validate()?;
    if games_per_pair == 0 {
        return Err(SimError::NoGames(games_per_pair));
    }
    check_record_names(strategies)?;
    let tasks = ordered_pairs(strategies.len());
    log::info!(
        "running {} pairings of {} games to {}",
        tasks.len(),
        games_per_pair,
        config.target_score
    );
    tasks
        .par_iter()
        .map(|&(a_idx, b_idx)| {
            let mut pair_rng = SmallRng::seed_from_u64(pair_seed(seed, a_idx, b_idx));
            let first = &strategies[a_idx];
            let second = &strategies[b_idx];
            log::info!(
                "running {} simulations for {} vs. {}",
                games_per_pair,
                first.name,
                second.name
            );
            run_batch(first, second, config, games_per_pair, &mut pair_rng)
        })
        .collect()
}
