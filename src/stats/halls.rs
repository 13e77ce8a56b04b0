use super::aggregate::ranking_order;
use super::types::PlayerStats;
use crate::config::StatsSettings;

fn eligible(stats: &[PlayerStats], settings: &StatsSettings) -> Vec<PlayerStats> {
    let mut eligible: Vec<PlayerStats> = stats
        .iter()
        .filter(|s| s.games_played >= settings.hall_min_games)
        .cloned()
        .collect();
    eligible.sort_by(ranking_order);
    eligible
}

/// Best ranked players with enough games, best first.
pub fn hall_of_fame(stats: &[PlayerStats], settings: &StatsSettings) -> Vec<PlayerStats> {
    eligible(stats, settings)
        .into_iter()
        .take(settings.hall_size)
        .collect()
}

/// Worst ranked players with enough games, worst first.
pub fn hall_of_shame(stats: &[PlayerStats], settings: &StatsSettings) -> Vec<PlayerStats> {
    eligible(stats, settings)
        .into_iter()
        .rev()
        .take(settings.hall_size)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, games_played: u32, win_rate: f64) -> PlayerStats {
        PlayerStats {
            games_played,
            win_rate,
            weighted_score: win_rate * games_played as f64 / 100.0,
            ..PlayerStats::new(name.to_string())
        }
    }

    fn names(stats: &[PlayerStats]) -> Vec<&str> {
        stats.iter().map(|s| s.player.as_str()).collect()
    }

    #[test]
    fn test_halls_respect_minimum_games() {
        let stats = vec![
            player("ana", 10, 60.0),
            player("bruno", 4, 95.0),
            player("carla", 8, 30.0),
            player("duarte", 5, 45.0),
            player("eva", 12, 10.0),
            player("filipe", 6, 80.0),
        ];
        let settings = StatsSettings::default();

        assert_eq!(names(&hall_of_fame(&stats, &settings)), vec!["filipe", "ana", "duarte"]);
        assert_eq!(names(&hall_of_shame(&stats, &settings)), vec!["eva", "carla", "duarte"]);
    }

    #[test]
    fn test_small_field_fills_what_it_can() {
        let stats = vec![player("ana", 5, 50.0), player("bruno", 1, 100.0)];
        let settings = StatsSettings::default();
        assert_eq!(names(&hall_of_fame(&stats, &settings)), vec!["ana"]);
        assert_eq!(names(&hall_of_shame(&stats, &settings)), vec!["ana"]);
    }
}
