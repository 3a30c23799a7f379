use clap::{Args, Parser, Subcommand};
use pig_strategy_sim::strategy::PRESETS;
use pig_strategy_sim::{run, simulate, summarize, RunOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pig-sim",
    about = "Compare bank-or-roll dice strategies across every ordered pairing"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play every ordered pairing and write one batch record per pairing
    Simulate(Options),
    /// Fold every batch record into the aggregate file
    Aggregate(Options),
    /// Simulate, then aggregate
    Run(Options),
    /// List the preset strategy names
    Strategies,
}

#[derive(Args, Debug)]
struct Options {
    /// Directory holding batch records
    #[arg(long = "match-dir", default_value = "match_data")]
    match_dir: PathBuf,

    /// Aggregate output file
    #[arg(short = 'o', long = "output", default_value = "aggregate_results.json")]
    output: PathBuf,

    /// Score needed to win a game
    #[arg(long = "target", default_value_t = 100)]
    target: i32,

    /// Games played per ordered pairing
    #[arg(short = 'n', long = "games", default_value_t = 10_000)]
    games: u64,

    #[arg(short = 's', long = "seed", default_value_t = 0)]
    seed: u64,

    /// Restrict to these presets (repeatable); all presets by default
    #[arg(long = "strategy")]
    strategies: Vec<String>,
}

impl From<Options> for RunOptions {
    fn from(opts: Options) -> Self {
        RunOptions {
            match_dir: opts.match_dir,
            output_path: opts.output,
            target_score: opts.target,
            games_per_pair: opts.games,
            seed: opts.seed,
            strategies: (!opts.strategies.is_empty()).then_some(opts.strategies),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match Cli::parse().command {
        Command::Simulate(opts) => {
            simulate(&opts.into())?;
        }
        Command::Aggregate(opts) => {
            let results = summarize(&opts.into())?;
            println!("Aggregated {} strategies", results.len());
        }
        Command::Run(opts) => {
            let results = run(&opts.into())?;
            for (name, record) in &results {
                println!(
                    "{name:>16}  games {:>8}  win rate {:.4}  (first {:.4}, second {:.4})",
                    record.games_played,
                    record.win_loss_rate.overall.rate,
                    record.win_loss_rate.first.rate,
                    record.win_loss_rate.second.rate
                );
            }
        }
        Command::Strategies => {
            for (name, decision) in PRESETS.entries() {
                println!("{name:>16}  {decision:?}");
            }
        }
    }
    Ok(())
}
