//! Treasure class resolver and drop economics for Diablo II 1.13d
//!
//! Computes exact expected drop counts per boss kill by walking the treasure
//! class graph analytically instead of simulating rolls, then reduces those
//! counts to economy buckets and a single rune value measured in Ist.
//!
//! # Format Overview
//!
//! ## TreasureClassEx.txt
//!
//! Tab-separated with one header row. Relevant columns:
//! - `Treasure Class`: row identifier, referenced by other rows
//! - `Item1`/`Prob1` .. `Item10`/`Prob10`: outcome and weight pairs; an
//!   outcome names either another treasure class or a terminal item code
//! - `NoDrop`: raw weight of the "nothing drops" outcome, before the
//!   player-count adjustment
//! - `Picks`: roll count; positive rows roll independently, negative rows
//!   consume their outcome list as a fixed sequence
//!
//! ## misc.txt
//!
//! Tab-separated; maps a terminal item `code` (e.g. `r07`) to its display
//! `name` (e.g. `Tal Rune`).
//!
//! ## Price table (JSON)
//!
//! Flat `{bucket: {"N": .., "O": ..}}` where O items of the bucket trade for
//! N Ist, or phased with per-phase tables and a `defaultPhase` selector.

pub mod economy;
pub mod item_names;
pub mod price;
pub mod report;
pub mod resolve;
pub mod tc_table;

// Re-export main types
pub use economy::{bucket_for, bucketize};
pub use item_names::ItemNames;
pub use price::{PriceEntry, PriceTable};
pub use report::{Difficulty, DropReport};
pub use resolve::{ExpectedCounts, LeafDist, OutcomeDist, PickPlan, Resolver};
pub use tc_table::{TcRow, TcTable};

/// Lowest player count the no-drop adjustment accepts
pub const MIN_PLAYERS: u8 = 1;

/// Highest player count the no-drop adjustment accepts
pub const MAX_PLAYERS: u8 = 8;

/// Outcome prefix for the reserved gold drop on act boss rows
pub const GOLD_PREFIX: &str = "gld";

/// Resolution depth guard; 1.13d chains stay far below this
pub const MAX_TC_DEPTH: usize = 64;

/// Errors from table parsing and treasure class resolution
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Missing required column {0:?}")]
    MissingColumn(String),

    #[error("Row {row:?}: column {column:?} has an item but no weight")]
    MissingWeight { row: String, column: String },

    #[error("Row {row:?}: invalid number {value:?} in column {column:?}")]
    InvalidNumber {
        row: String,
        column: String,
        value: String,
    },

    #[error("Unknown treasure class {0:?}")]
    UnknownTreasureClass(String),

    #[error("Treasure class {tc:?}: no-drop ratio reached 1 (raw {raw}, listed weight sum {sum})")]
    NoDropSaturated { tc: String, raw: u32, sum: u64 },

    #[error("Treasure class {tc:?}: resolution exceeded depth {limit}")]
    DepthExceeded { tc: String, limit: usize },

    #[error("Price table has no phase {0:?}")]
    UnknownPhase(String),

    #[error("Unknown difficulty {0:?} (expected N, NM, or H)")]
    UnknownDifficulty(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Clamp a requested player count into the range the game models
pub fn clamp_players(players: u8) -> u8 {
    players.clamp(MIN_PLAYERS, MAX_PLAYERS)
}
