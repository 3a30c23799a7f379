//! Cross-batch statistics per strategy.
//!
//! Win/loss counts and games played are plain sums and do not depend on the
//! order batches are folded in. The margin average does: see
//! [`AverageMargin::update`].

use crate::batch::BatchResult;
use crate::error::SimError;
use crate::game::Seat;
use crate::store::ResultStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MARGIN_SCALE: f64 = 10_000.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageMargin {
    pub average: f64,
    pub match_count: u64,
}

impl AverageMargin {
    /// First observation for a strategy.
    pub fn seed(batch_average: f64) -> Self {
        AverageMargin {
            average: batch_average / MARGIN_SCALE,
            match_count: 1,
        }
    }

    /// `average * n + batch / (10000 * n + 1)`.
    ///
    /// This is not a running mean: later batches contribute geometrically
    /// less. Stored aggregates depend on this exact arithmetic, so it is kept
    /// as is.
    pub fn update(self, batch_average: f64) -> Self {
        let n = self.match_count as f64;
        AverageMargin {
            average: self.average * n + batch_average / (MARGIN_SCALE * n + 1.0),
            match_count: self.match_count + 1,
        }
    }

    fn observe(&mut self, batch_average: f64) {
        *self = if self.match_count == 0 {
            AverageMargin::seed(batch_average)
        } else {
            self.update(batch_average)
        };
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WinLoss {
    pub wins: u64,
    pub losses: u64,
}

impl WinLoss {
    fn add(&mut self, wins: u64, losses: u64) {
        self.wins += wins;
        self.losses += losses;
    }

    fn rated(self, strategy: &str, bucket: &'static str) -> Result<WinRate, SimError> {
        let total = self.wins + self.losses;
        if total == 0 {
            return Err(SimError::EmptyBucket {
                strategy: strategy.to_string(),
                bucket,
            });
        }
        Ok(WinRate {
            wins: self.wins,
            losses: self.losses,
            rate: self.wins as f64 / total as f64,
        })
    }
}

/// Statistics for one strategy while batches are still being folded in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunningTally {
    pub games_played: u64,
    pub average_margin: AverageMargin,
    pub overall: WinLoss,
    pub first: WinLoss,
    pub second: WinLoss,
}

impl RunningTally {
    fn observe(&mut self, batch: &BatchResult, seat: Seat) {
        let wins = batch.wins(seat);
        let losses = batch.losses(seat);
        self.games_played += batch.game_settings.game_count;
        self.average_margin.observe(batch.average_margin(seat));
        self.overall.add(wins, losses);
        match seat {
            Seat::First => self.first.add(wins, losses),
            Seat::Second => self.second.add(wins, losses),
        }
    }

    fn finish(self, strategy: &str) -> Result<AggregateRecord, SimError> {
        Ok(AggregateRecord {
            games_played: self.games_played,
            average_margin: self.average_margin,
            win_loss_rate: WinLossRate {
                overall: self.overall.rated(strategy, "overall")?,
                first: self.first.rated(strategy, "first")?,
                second: self.second.rated(strategy, "second")?,
            },
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WinRate {
    pub wins: u64,
    pub losses: u64,
    pub rate: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WinLossRate {
    pub overall: WinRate,
    pub first: WinRate,
    pub second: WinRate,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub games_played: u64,
    pub average_margin: AverageMargin,
    pub win_loss_rate: WinLossRate,
}

pub type AggregateResults = BTreeMap<String, AggregateRecord>;

/// Sequential fold of batch results into per-strategy tallies.
#[derive(Clone, Debug, Default)]
pub struct Aggregator {
    tallies: BTreeMap<String, RunningTally>,
    batches: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one batch into both of its strategies, first seat first.
    /// An inconsistent batch is rejected before any tally changes.
    pub fn merge(&mut self, batch: &BatchResult) -> Result<(), SimError> {
        batch.check().map_err(|reason| SimError::InvalidBatch {
            name: batch.stem(),
            reason,
        })?;
        for seat in [Seat::First, Seat::Second] {
            self.tallies
                .entry(batch.name(seat).to_string())
                .or_default()
                .observe(batch, seat);
        }
        self.batches += 1;
        Ok(())
    }

    pub fn tally(&self, strategy: &str) -> Option<&RunningTally> {
        self.tallies.get(strategy)
    }

    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Computes win rates. Fails if any strategy has an empty bucket.
    pub fn finish(self) -> Result<AggregateResults, SimError> {
        self.tallies
            .into_iter()
            .map(|(name, tally)| {
                let record = tally.finish(&name)?;
                Ok((name, record))
            })
            .collect()
    }
}

pub fn aggregate<'a, I>(batches: I) -> Result<AggregateResults, SimError>
where
    I: IntoIterator<Item = &'a BatchResult>,
{
    let mut aggregator = Aggregator::new();
    for batch in batches {
        aggregator.merge(batch)?;
    }
    aggregator.finish()
}

/// Folds every batch record the store lists, in listing order.
pub fn aggregate_store<S: ResultStore + ?Sized>(store: &S) -> Result<AggregateResults, SimError> {
    let mut aggregator = Aggregator::new();
    for name in store.list_batches()? {
        let batch = store.load_batch(&name)?;
        aggregator.merge(&batch)?;
    }
    log::info!(
        "aggregated {} batches into {} strategies",
        aggregator.batches(),
        aggregator.tallies.len()
    );
    aggregator.finish()
}
