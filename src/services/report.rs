use colored::Colorize;

use crate::views::{BannerView, Dashboard, LeaderboardRow, SessionView};

pub fn print_leaderboard(title: &str, rows: &[LeaderboardRow]) {
    println!();
    println!("{}", title.bright_cyan().bold());
    println!("{}", "=".repeat(title.chars().count()).cyan());

    if rows.is_empty() {
        println!("{}", "  (nobody qualifies yet)".dimmed());
        return;
    }

    println!(
        "{:>3}  {:<10} {:>5} {:>3} {:>3} {:>3} {:>3} {:>6} {:>5} {:>6} {:>4}  {}",
        "#", "player", "games", "W", "R", "S", "L", "score", "rate", "streak", "pen", "recent"
    );
    for row in rows {
        println!(
            "{:>3}  {:<10} {:>5} {:>3} {:>3} {:>3} {:>3} {:>6.1} {:>5} {:>6} {:>4}  {}",
            row.rank,
            row.player.bold(),
            row.games_played,
            row.wins,
            row.runner_ups,
            row.survivals,
            row.losses,
            row.weighted_score,
            row.win_rate_label,
            row.best_streak,
            row.penalty_count,
            colour_trail(&row.recent)
        );
    }
}

fn colour_trail(trail: &str) -> String {
    trail
        .chars()
        .map(|c| match c {
            'W' => "W".green().to_string(),
            'R' => "R".yellow().to_string(),
            'S' => "S".blue().to_string(),
            _ => "L".red().to_string(),
        })
        .collect()
}

pub fn print_sessions(views: &[SessionView]) {
    if views.is_empty() {
        println!("{}", "No sessions.".dimmed());
        return;
    }

    for view in views {
        let status = if view.is_complete {
            status_label(true).green()
        } else {
            status_label(false).yellow()
        };
        println!(
            "{} {} {} {}",
            view.game_date.to_string().bold(),
            view.game_type.to_string().cyan(),
            view.id,
            status
        );
        println!("   {} round(s) to {}: {}", view.round_ids.len(), view.threshold, view.summary);
        if !view.tiers.winners.is_empty() {
            println!("   Winners: {}", view.tiers.winners.join(", ").green());
        }
        if !view.tiers.runners_up.is_empty() {
            println!("   Runners-up: {}", view.tiers.runners_up.join(", ").yellow());
        }
        if !view.tiers.survivors.is_empty() {
            println!("   Survivors: {}", view.tiers.survivors.join(", "));
        }
        if !view.tiers.losers.is_empty() {
            println!("   Losers: {}", view.tiers.losers.join(", ").red());
        }
        println!();
    }
}

fn status_label(is_complete: bool) -> &'static str {
    if is_complete { "complete" } else { "open" }
}

pub fn print_banner(banner: Option<&BannerView>) {
    match banner {
        Some(banner) => println!("{}", banner.headline.bright_yellow().bold()),
        None => println!("{}", "Nothing to announce.".dimmed()),
    }
}

pub fn print_halls(dashboard: &Dashboard) {
    print_leaderboard("Hall of Fame", &dashboard.hall_of_fame);
    print_leaderboard("Hall of Shame", &dashboard.hall_of_shame);
}

pub fn print_dashboard_extras(dashboard: &Dashboard) {
    if let Some(perfect) = &dashboard.perfect_game {
        println!(
            "{} {} beat {} without a runner-up",
            "Perfect game:".bright_green().bold(),
            perfect.winner,
            perfect.beaten.join(", ")
        );
    }
    for streak in &dashboard.losing_streaks {
        println!(
            "{} {} has lost {} {} in a row",
            "Streak:".red().bold(),
            streak.player,
            streak.length,
            streak.game_type
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label_is_plain_text() {
        assert_eq!(status_label(true), "complete");
        assert_eq!(status_label(false), "open");
    }
}
