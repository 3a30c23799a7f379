use crate::dice::{Die, BUST_FACE};
use crate::error::SimError;
use crate::strategy::{Strategy, TurnView};

/// Margins are reported against this score regardless of the game's target.
pub const MARGIN_REFERENCE: i32 = 100;
pub const DEFAULT_ROUND_LIMIT: u32 = 100_000;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    pub fn opponent(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GameConfig {
    pub target_score: i32,
    /// Full rounds (both seats) before the game is abandoned.
    pub round_limit: u32,
}

impl GameConfig {
    pub fn new(target_score: i32) -> Self {
        GameConfig {
            target_score,
            round_limit: DEFAULT_ROUND_LIMIT,
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.target_score <= 0 {
            return Err(SimError::InvalidTarget(self.target_score));
        }
        Ok(())
    }
}

/// Per-game score keeping for one seat. Built fresh for every game.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlayerState {
    pub winning_score: i32,
    pub current_score: i32,
}

impl PlayerState {
    fn fresh(winning_score: i32) -> Self {
        PlayerState {
            winning_score,
            current_score: 0,
        }
    }

    fn has_won(&self) -> bool {
        self.current_score >= self.winning_score
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameResult {
    pub winner: Seat,
    pub winner_name: String,
    /// `MARGIN_REFERENCE` minus the loser's final score.
    pub margin: i32,
    pub final_scores: [i32; 2],
}

struct Game<'a, D: ?Sized> {
    players: [&'a Strategy; 2],
    states: [PlayerState; 2],
    rolls: Vec<u8>,
    die: &'a mut D,
}

impl<'a, D: Die + ?Sized> Game<'a, D> {
    fn new(first: &'a Strategy, second: &'a Strategy, target: i32, die: &'a mut D) -> Self {
        Game {
            players: [first, second],
            states: [PlayerState::fresh(target); 2],
            rolls: Vec::with_capacity(16),
            die,
        }
    }

    /// Plays one turn for `seat` and returns the points banked.
    fn take_turn(&mut self, seat: Seat) -> i32 {
        let me = self.states[seat.index()];
        let opponent_score = self.states[seat.opponent().index()].current_score;
        let strategy = self.players[seat.index()];
        self.rolls.clear();
        let mut pending = 0;
        while me.current_score + pending < me.winning_score {
            let roll = self.die.roll();
            if roll == BUST_FACE {
                self.rolls.clear();
                pending = 0;
                break;
            }
            self.rolls.push(roll);
            pending += roll as i32;
            let view = TurnView {
                winning_score: me.winning_score,
                current_score: me.current_score,
                opponent_score,
                rolls: &self.rolls,
            };
            if !strategy.decide(&view, &mut *self.die) {
                break;
            }
        }
        self.states[seat.index()].current_score += pending;
        pending
    }

    fn finish(&self, winner: Seat) -> GameResult {
        let loser = self.states[winner.opponent().index()];
        GameResult {
            winner,
            winner_name: self.players[winner.index()].name.clone(),
            margin: MARGIN_REFERENCE - loser.current_score,
            final_scores: [self.states[0].current_score, self.states[1].current_score],
        }
    }
}

/// Plays one game to completion, `first` opening every round.
pub fn play_game<D: Die + ?Sized>(
    first: &Strategy,
    second: &Strategy,
    config: &GameConfig,
    die: &mut D,
) -> Result<GameResult, SimError> {
    config.validate()?;
    let mut game = Game::new(first, second, config.target_score, die);
    for _round in 0..config.round_limit {
        for seat in [Seat::First, Seat::Second] {
            game.take_turn(seat);
            if game.states[seat.index()].has_won() {
                let result = game.finish(seat);
                log::trace!(
                    "{} vs {}: {} wins by {} ({:?})",
                    first.name,
                    second.name,
                    result.winner_name,
                    result.margin,
                    result.final_scores
                );
                return Ok(result);
            }
        }
    }
    Err(SimError::RoundLimit {
        first: first.name.clone(),
        second: second.name.clone(),
        limit: config.round_limit,
    })
}
