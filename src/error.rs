use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("target score must be positive, got {0}")]
    InvalidTarget(i32),
    #[error("a batch needs at least one game, got {0}")]
    NoGames(u64),
    #[error("game between {first} and {second} exceeded {limit} rounds")]
    RoundLimit {
        first: String,
        second: String,
        limit: u32,
    },
    #[error("{strategy} has no recorded games as {bucket}; win rate undefined")]
    EmptyBucket {
        strategy: String,
        bucket: &'static str,
    },
    #[error("unknown strategy {0}")]
    UnknownStrategy(String),
    #[error("pairings {first} and {second} would both be stored as {record}")]
    RecordNameClash {
        record: String,
        first: String,
        second: String,
    },
    #[error("batch {name} is inconsistent: {reason}")]
    InvalidBatch { name: String, reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}
