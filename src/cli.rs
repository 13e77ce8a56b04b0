use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::GameType;

#[derive(Parser, Debug)]
#[command(author, version, about = "game-night rankings, sessions and banners")]
pub struct Cli {
    /// Round snapshot (JSON array). Defaults to $ROUNDS_PATH or rounds.json
    #[arg(short, long, global = true)]
    pub rounds: Option<PathBuf>,

    /// JSON file overriding roster, thresholds and weights
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Ranked player statistics
    Leaderboard {
        /// Restrict to one game family
        #[arg(short, long)]
        family: Option<GameType>,
        /// Comma-separated players (defaults to the roster)
        #[arg(short, long, value_delimiter = ',')]
        players: Vec<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Session drill-down for a threshold or team family
    Sessions {
        /// Game family
        #[arg(short, long)]
        family: GameType,
        /// Only sessions played on this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// Hall of fame and hall of shame
    Halls {
        #[arg(long)]
        json: bool,
    },
    /// Headline for the latest result, plus perfect games and losing streaks
    Banner {
        #[arg(long)]
        json: bool,
    },
    /// Report rounds that place a player in more than one tier
    Check,
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}
