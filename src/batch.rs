use crate::dice::Die;
use crate::error::SimError;
use crate::game::{play_game, GameConfig, Seat};
use crate::strategy::Strategy;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub game_count: u64,
    pub winning_score: i32,
    pub strategy_1: String,
    pub strategy_2: String,
}

/// Outcome of a fixed number of games between one ordered pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub game_settings: GameSettings,
    pub win_count: [u64; 2],
    /// Per game, in play order: `+margin` for the winner, `-margin` for the loser.
    pub win_margins: [Vec<i32>; 2],
    pub average_margins: [f64; 2],
}

impl BatchResult {
    pub fn name(&self, seat: Seat) -> &str {
        match seat {
            Seat::First => &self.game_settings.strategy_1,
            Seat::Second => &self.game_settings.strategy_2,
        }
    }

    pub fn wins(&self, seat: Seat) -> u64 {
        self.win_count[seat.index()]
    }

    pub fn losses(&self, seat: Seat) -> u64 {
        self.game_settings.game_count - self.wins(seat)
    }

    pub fn average_margin(&self, seat: Seat) -> f64 {
        self.average_margins[seat.index()]
    }

    /// Internal consistency of a record: win counts and margin lists must
    /// account for exactly `game_count` games.
    pub fn check(&self) -> Result<(), String> {
        let games = self.game_settings.game_count;
        if games == 0 {
            return Err("game_count is zero".to_string());
        }
        if self.win_count[0].checked_add(self.win_count[1]) != Some(games) {
            return Err(format!(
                "win counts {:?} do not sum to game_count {games}",
                self.win_count
            ));
        }
        if self.win_margins.iter().any(|m| m.len() as u64 != games) {
            return Err(format!("margin lists do not hold {games} entries"));
        }
        Ok(())
    }

    /// Conventional record name, `<strategy_1>-<strategy_2>`.
    pub fn stem(&self) -> String {
        format!(
            "{}-{}",
            self.game_settings.strategy_1, self.game_settings.strategy_2
        )
    }
}

fn mean(values: &[i32]) -> Result<f64, SimError> {
    if values.is_empty() {
        return Err(SimError::NoGames(0));
    }
    let total: i64 = values.iter().map(|&v| v as i64).sum();
    Ok(total as f64 / values.len() as f64)
}

pub fn run_batch<D: Die + ?Sized>(
    first: &Strategy,
    second: &Strategy,
    config: &GameConfig,
    games: u64,
    die: &mut D,
) -> Result<BatchResult, SimError> {
    if games == 0 {
        return Err(SimError::NoGames(games));
    }
    config.validate()?;
    let mut win_count = [0u64; 2];
    let mut win_margins: [Vec<i32>; 2] = [
        Vec::with_capacity(games as usize),
        Vec::with_capacity(games as usize),
    ];
    for _ in 0..games {
        let result = play_game(first, second, config, die)?;
        let winner = result.winner;
        win_count[winner.index()] += 1;
        win_margins[winner.index()].push(result.margin);
        win_margins[winner.opponent().index()].push(-result.margin);
    }
    let average_margins = [mean(&win_margins[0])?, mean(&win_margins[1])?];
    let batch = BatchResult {
        game_settings: GameSettings {
            game_count: games,
            winning_score: config.target_score,
            strategy_1: first.name.clone(),
            strategy_2: second.name.clone(),
        },
        win_count,
        win_margins,
        average_margins,
    };
    log::debug!(
        "{} vs {}: wins {:?}, average margins {:?}",
        first.name,
        second.name,
        batch.win_count,
        batch.average_margins
    );
    Ok(batch)
}

pub fn run_batch_seeded(
    first: &Strategy,
    second: &Strategy,
    config: &GameConfig,
    games: u64,
    seed: u64,
) -> Result<BatchResult, SimError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    run_batch(first, second, config, games, &mut rng)
}
