//! CLI argument definitions for d2rpk
//!
//! All clap-derived structs and enums for command parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "d2rpk")]
#[command(about = "Diablo II boss drop economics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write per-boss drop reports, then print the rune-value summary
    #[command(visible_alias = "g")]
    Generate {
        /// Directory with TreasureClassEx.txt and misc.txt (uses configured
        /// default if not provided)
        #[arg(long, env = "D2RPK_DATA")]
        data: Option<PathBuf>,

        /// Player count assumed for the no-drop adjustment (clamped to 1-8)
        #[arg(short, long, default_value_t = 1)]
        players: u8,

        /// Difficulty: N, NM, or H
        #[arg(short, long, default_value = "H")]
        difficulty: String,

        /// Output directory for boss.<name>.drops.json files
        #[arg(short, long, default_value = "config/boss_drops")]
        out_dir: PathBuf,

        /// Path to the rune price table
        #[arg(long, default_value = "config/rune-price-table.json")]
        price_table: PathBuf,

        /// Price phase key (uses the table's defaultPhase if not provided)
        #[arg(long)]
        price_phase: Option<String>,
    },

    /// Print the rune-value summary without writing report files
    #[command(visible_alias = "s")]
    Summary {
        /// Directory with TreasureClassEx.txt and misc.txt (uses configured
        /// default if not provided)
        #[arg(long, env = "D2RPK_DATA")]
        data: Option<PathBuf>,

        /// Player count assumed for the no-drop adjustment (clamped to 1-8)
        #[arg(short, long, default_value_t = 1)]
        players: u8,

        /// Difficulty: N, NM, or H
        #[arg(short, long, default_value = "H")]
        difficulty: String,

        /// Path to the rune price table
        #[arg(long, default_value = "config/rune-price-table.json")]
        price_table: PathBuf,

        /// Price phase key (uses the table's defaultPhase if not provided)
        #[arg(long)]
        price_phase: Option<String>,
    },

    /// Inspect one treasure class
    #[command(visible_alias = "t")]
    Tc {
        /// Treasure class name, e.g. "Mephisto (H)"
        name: String,

        /// Directory with TreasureClassEx.txt and misc.txt (uses configured
        /// default if not provided)
        #[arg(long, env = "D2RPK_DATA")]
        data: Option<PathBuf>,

        /// Player count assumed for the no-drop adjustment (clamped to 1-8)
        #[arg(short, long, default_value_t = 1)]
        players: u8,

        /// Show the single-roll outcome distribution instead of the
        /// flattened leaf distribution
        #[arg(long)]
        roll: bool,

        /// Maximum rows to print
        #[arg(short, long, default_value_t = 25)]
        limit: usize,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the default game data directory
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
