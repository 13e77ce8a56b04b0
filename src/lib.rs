pub mod cli;
pub mod config;
pub mod domain;
pub mod services;
pub mod sessions;
pub mod stats;
pub mod store;
pub mod tiers;
pub mod views;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use log::info;
use serde::Serialize;
use std::path::Path;

use crate::cli::Cli;
use crate::config::EngineConfig;
use crate::domain::{GameType, Round};
use crate::services::{Pipeline, report};
use crate::store::RoundSnapshot;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub struct AppContext {
    pipeline: Pipeline,
    rounds: Vec<Round>,
}

impl AppContext {
    pub fn load(rounds_path: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => EngineConfig::from_file(path)?,
            None => EngineConfig::new(),
        };
        let snapshot = match rounds_path {
            Some(path) => RoundSnapshot::new(path),
            None => RoundSnapshot::from_env(),
        };
        info!("Reading rounds from {}", snapshot.path().display());

        Ok(Self {
            pipeline: Pipeline::new(config),
            rounds: snapshot.load_rounds()?,
        })
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn handle_leaderboard(ctx: &AppContext, family: Option<GameType>, players: &[String], json: bool) -> Result<()> {
    let players = (!players.is_empty()).then_some(players);
    let rows = ctx.pipeline.leaderboard(&ctx.rounds, family, players);
    if json {
        return print_json(&rows);
    }
    let title = match family {
        Some(game_type) => format!("Leaderboard · {game_type}"),
        None => "Leaderboard".to_string(),
    };
    report::print_leaderboard(&title, &rows);
    Ok(())
}

pub fn handle_sessions(
    ctx: &AppContext,
    family: GameType,
    date: Option<chrono::NaiveDate>,
    json: bool,
) -> Result<()> {
    let views = ctx.pipeline.session_views(&ctx.rounds, family, date);
    if json {
        return print_json(&views);
    }
    report::print_sessions(&views);
    Ok(())
}

pub fn handle_halls(ctx: &AppContext, json: bool) -> Result<()> {
    let dashboard = ctx.pipeline.run(&ctx.rounds);
    if json {
        return print_json(&serde_json::json!({
            "hallOfFame": dashboard.hall_of_fame,
            "hallOfShame": dashboard.hall_of_shame,
        }));
    }
    report::print_halls(&dashboard);
    Ok(())
}

pub fn handle_banner(ctx: &AppContext, json: bool) -> Result<()> {
    let dashboard = ctx.pipeline.run(&ctx.rounds);
    if json {
        return print_json(&serde_json::json!({
            "banner": dashboard.banner,
            "perfectGame": dashboard.perfect_game,
            "losingStreaks": dashboard.losing_streaks,
        }));
    }
    report::print_banner(dashboard.banner.as_ref());
    report::print_dashboard_extras(&dashboard);
    Ok(())
}

pub fn handle_check(ctx: &AppContext) -> Result<()> {
    let flagged = ctx.pipeline.audit(&ctx.rounds);
    if flagged.is_empty() {
        println!("All {} round(s) have unique placements", ctx.rounds.len());
    } else {
        println!("{} round(s) need repair: {}", flagged.len(), flagged.join(", "));
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
