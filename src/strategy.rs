use crate::dice::{Die, FaceSet};
use crate::error::SimError;
use phf::phf_ordered_map;

/// What a strategy sees when asked whether to keep rolling.
#[derive(Clone, Copy, Debug)]
pub struct TurnView<'a> {
    pub winning_score: i32,
    pub current_score: i32,
    pub opponent_score: i32,
    /// Non-bust rolls taken so far this turn, oldest first.
    pub rolls: &'a [u8],
}

impl TurnView<'_> {
    pub fn pending(&self) -> i32 {
        self.rolls.iter().map(|&r| r as i32).sum()
    }
}

/// Decision rule. `true` keeps rolling, `false` banks and ends the turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Keep rolling while the turn total is below the threshold.
    UntilValue(i32),
    /// Stop as soon as the latest roll lands in the set.
    UntilRoll(FaceSet),
    Random,
    AlwaysTrue,
    AlwaysFalse,
    /// Always roll once within `delta` of the target, otherwise random.
    AgroAfter(i32),
    /// Always roll once the opponent is within `delta` of the target, otherwise random.
    AgroAfterOpponent(i32),
    /// Always roll while behind, otherwise random.
    BeatOpponent,
}

impl Decision {
    pub fn decide<D: Die + ?Sized>(&self, view: &TurnView<'_>, die: &mut D) -> bool {
        match *self {
            Decision::UntilValue(threshold) => view.pending() < threshold,
            Decision::UntilRoll(stop) => match view.rolls.last() {
                Some(&last) => !stop.contains(last),
                None => panic!("UntilRoll consulted before any roll this turn"),
            },
            Decision::Random => die.coin(),
            Decision::AlwaysTrue => true,
            Decision::AlwaysFalse => false,
            Decision::AgroAfter(delta) => {
                view.winning_score - view.current_score <= delta || die.coin()
            }
            Decision::AgroAfterOpponent(delta) => {
                view.winning_score - view.opponent_score <= delta || die.coin()
            }
            Decision::BeatOpponent => view.current_score < view.opponent_score || die.coin(),
        }
    }
}

/// A named decision rule. Identity is the name alone.
#[derive(Clone, Debug, PartialEq)]
pub struct Strategy {
    pub name: String,
    pub decision: Decision,
}

impl Strategy {
    pub fn new(name: impl Into<String>, decision: Decision) -> Self {
        Strategy {
            name: name.into(),
            decision,
        }
    }

    pub fn decide<D: Die + ?Sized>(&self, view: &TurnView<'_>, die: &mut D) -> bool {
        self.decision.decide(view, die)
    }
}

/// Named strategies compared by default, in reporting order.
pub static PRESETS: phf::OrderedMap<&'static str, Decision> = phf_ordered_map! {
    "randomControl" => Decision::Random,
    "untilReach5" => Decision::UntilValue(5),
    "untilReach8" => Decision::UntilValue(8),
    "untilReach10" => Decision::UntilValue(10),
    "untilReach15" => Decision::UntilValue(15),
    "untilReach20" => Decision::UntilValue(20),
    "untilReach25" => Decision::UntilValue(25),
    "untilRoll3456" => Decision::UntilRoll(FaceSet::of(&[3, 4, 5, 6])),
    "untilRoll456" => Decision::UntilRoll(FaceSet::of(&[4, 5, 6])),
    "untilRoll56" => Decision::UntilRoll(FaceSet::of(&[5, 6])),
    "untilRoll6" => Decision::UntilRoll(FaceSet::of(&[6])),
    "agroAfter6" => Decision::AgroAfter(6),
    "agroAfter10" => Decision::AgroAfter(10),
    "agroAfter15" => Decision::AgroAfter(15),
    "agroAfter20" => Decision::AgroAfter(20),
    "agroAfter25" => Decision::AgroAfter(25),
    "alwaysTrue" => Decision::AlwaysTrue,
    "alwaysFalse" => Decision::AlwaysFalse,
    "beatOpponent" => Decision::BeatOpponent,
};

pub fn find_preset(name: &str) -> Option<Strategy> {
    PRESETS
        .get(name)
        .map(|&decision| Strategy::new(name, decision))
}

pub fn default_strategies() -> Vec<Strategy> {
    PRESETS
        .entries()
        .map(|(&name, &decision)| Strategy::new(name, decision))
        .collect()
}

/// Resolves preset names, keeping the caller's order.
pub fn select_presets<S: AsRef<str>>(names: &[S]) -> Result<Vec<Strategy>, SimError> {
    names
        .iter()
        .map(|name| {
            find_preset(name.as_ref())
                .ok_or_else(|| SimError::UnknownStrategy(name.as_ref().to_string()))
        })
        .collect()
}
