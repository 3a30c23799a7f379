pub mod aggregate;
pub mod batch;
pub mod dice;
pub mod error;
pub mod game;
pub mod store;
pub mod strategy;
pub mod tournament;

use crate::aggregate::{aggregate_store, AggregateResults};
use crate::game::GameConfig;
use crate::store::{JsonDirStore, ResultStore};
use crate::strategy::{default_strategies, select_presets, Strategy};
use crate::tournament::run_tournament;
use anyhow::Context;
use std::path::PathBuf;

pub use crate::error::SimError;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub match_dir: PathBuf,
    pub output_path: PathBuf,
    pub target_score: i32,
    pub games_per_pair: u64,
    pub seed: u64,
    /// Preset names to play; every preset when `None`.
    pub strategies: Option<Vec<String>>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            match_dir: PathBuf::from("match_data"),
            output_path: PathBuf::from(store::AGGREGATE_FILE),
            target_score: 100,
            games_per_pair: 10_000,
            seed: 0,
            strategies: None,
        }
    }
}

impl RunOptions {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.games_per_pair == 0 {
            anyhow::bail!("--games must be > 0");
        }
        if self.target_score <= 0 {
            anyhow::bail!("--target must be > 0");
        }
        Ok(())
    }

    pub fn resolve_strategies(&self) -> anyhow::Result<Vec<Strategy>> {
        match &self.strategies {
            Some(names) => Ok(select_presets(names.as_slice())?),
            None => Ok(default_strategies()),
        }
    }

    fn store(&self) -> JsonDirStore {
        JsonDirStore::new(&self.match_dir).with_aggregate_path(&self.output_path)
    }
}

/// Plays every ordered pairing and saves one batch record per pairing.
pub fn simulate_into<S: ResultStore + ?Sized>(
    store: &mut S,
    strategies: &[Strategy],
    config: &GameConfig,
    games_per_pair: u64,
    seed: u64,
) -> Result<Vec<String>, SimError> {
    let batches = run_tournament(strategies, config, games_per_pair, seed)?;
    let mut names = Vec::with_capacity(batches.len());
    for batch in &batches {
        names.push(store.save_batch(batch)?);
    }
    Ok(names)
}

/// Folds every stored batch and stores the resulting aggregate.
pub fn summarize_store<S: ResultStore + ?Sized>(
    store: &mut S,
) -> Result<AggregateResults, SimError> {
    let results = aggregate_store(&*store)?;
    store.save_aggregate(&results)?;
    Ok(results)
}

pub fn simulate(opts: &RunOptions) -> anyhow::Result<usize> {
    opts.validate()?;
    let strategies = opts.resolve_strategies()?;
    let mut store = opts.store();
    let names = simulate_into(
        &mut store,
        &strategies,
        &GameConfig::new(opts.target_score),
        opts.games_per_pair,
        opts.seed,
    )
    .with_context(|| format!("Failed to simulate into {}", opts.match_dir.display()))?;
    log::info!(
        "wrote {} batch records to {}",
        names.len(),
        opts.match_dir.display()
    );
    Ok(names.len())
}

pub fn summarize(opts: &RunOptions) -> anyhow::Result<AggregateResults> {
    let mut store = opts.store();
    summarize_store(&mut store)
        .with_context(|| format!("Failed to aggregate {}", opts.match_dir.display()))
}

pub fn run(opts: &RunOptions) -> anyhow::Result<AggregateResults> {
    simulate(opts)?;
    summarize(opts)
}
