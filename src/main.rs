use anyhow::Result;

use game_night_ranking::cli::{Cli, Command};
use game_night_ranking::{
    AppContext, handle_banner, handle_check, handle_completions, handle_halls, handle_leaderboard,
    handle_sessions, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    if let Command::Completions { shell } = &cli.command {
        return handle_completions(*shell);
    }

    let ctx = AppContext::load(cli.rounds.as_deref(), cli.config.as_deref())?;
    match &cli.command {
        Command::Leaderboard {
            family,
            players,
            json,
        } => handle_leaderboard(&ctx, *family, players, *json),
        Command::Sessions { family, date, json } => handle_sessions(&ctx, *family, *date, *json),
        Command::Halls { json } => handle_halls(&ctx, *json),
        Command::Banner { json } => handle_banner(&ctx, *json),
        Command::Check => handle_check(&ctx),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
