// Per-league inner join of a salary table with a stats table on the cleaned player name.
use super::normalize::{clean_player_name, salary_join_key};
use serde::Serialize;
use shared::models::{League, PlayerSalaryRecord, PlayerStatsRecord, UnifiedPlayerRecord};
use std::collections::{HashMap, HashSet};

/// Result of joining one league. Nothing is dropped silently: every salary row
/// and every stats name that found no partner is listed.
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueJoin {
    pub league: League,
    pub records: Vec<UnifiedPlayerRecord>,
    pub unmatched_salary: Vec<String>,
    pub unmatched_stats: Vec<String>,
    /// Stats rows ignored because an earlier row already had the same name.
    pub duplicate_stats: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueJoinSummary {
    pub league: League,
    pub joined: usize,
    pub unmatched_salary: Vec<String>,
    pub unmatched_stats: Vec<String>,
    pub duplicate_stats: usize,
}

impl LeagueJoin {
    pub fn summary(&self) -> LeagueJoinSummary {
        LeagueJoinSummary {
            league: self.league,
            joined: self.records.len(),
            unmatched_salary: self.unmatched_salary.clone(),
            unmatched_stats: self.unmatched_stats.clone(),
            duplicate_stats: self.duplicate_stats,
        }
    }
}

/// Joins in salary-table order. A stats source listing a player several times
/// (traded players) contributes only its first row for that name.
pub fn join_league(
    league: League,
    salaries: &[PlayerSalaryRecord],
    stats: &[PlayerStatsRecord],
    name_artifact: &str,
) -> LeagueJoin {
    let mut by_name: HashMap<String, &PlayerStatsRecord> = HashMap::new();
    let mut stats_order: Vec<String> = Vec::new();
    let mut duplicate_stats = 0;
    for row in stats {
        let name = clean_player_name(&row.player, name_artifact);
        if by_name.contains_key(&name) {
            duplicate_stats += 1;
            tracing::debug!(%league, player = %name, team = %row.team, "Ignoring duplicate stats row");
            continue;
        }
        stats_order.push(name.clone());
        by_name.insert(name, row);
    }

    let mut records = Vec::new();
    let mut unmatched_salary = Vec::new();
    let mut salary_names: HashSet<String> = HashSet::new();
    for salary in salaries {
        let name = salary_join_key(salary);
        match by_name.get(&name) {
            Some(row) => records.push(UnifiedPlayerRecord {
                player: name.clone(),
                league,
                team: row.team.clone(),
                pos: row.pos.clone(),
                salary: salary.salary,
                stats: row.stats,
            }),
            None => unmatched_salary.push(name.clone()),
        }
        salary_names.insert(name);
    }

    let unmatched_stats = stats_order
        .into_iter()
        .filter(|name| !salary_names.contains(name))
        .collect();

    LeagueJoin {
        league,
        records,
        unmatched_salary,
        unmatched_stats,
        duplicate_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{StatLine, STAT_COLUMNS, STAT_COUNT};

    fn salary(first: &str, last: &str, amount: f64) -> PlayerSalaryRecord {
        PlayerSalaryRecord {
            first_name: first.to_string(),
            last_name: last.to_string(),
            salary: amount,
        }
    }

    fn stats(player: &str, team: &str, pts: f64) -> PlayerStatsRecord {
        let mut line: StatLine = [Some(1.0); STAT_COUNT];
        line[STAT_COLUMNS.len() - 1] = Some(pts);
        PlayerStatsRecord {
            player: player.to_string(),
            team: team.to_string(),
            pos: "G".to_string(),
            stats: line,
        }
    }

    #[test]
    fn test_matched_player_yields_one_combined_row() {
        let salaries = vec![salary("Skylar", "Diggins-Smith", 112_000.0)];
        let stat_rows = vec![stats("Skylar Diggins-Smith</strong", "DAL", 17.9)];
        let result = join_league(League::Wnba, &salaries, &stat_rows, "</strong");

        assert_eq!(result.records.len(), 1);
        let row = &result.records[0];
        assert_eq!(row.player, "Skylar Diggins-Smith");
        assert_eq!(row.league, League::Wnba);
        assert_eq!(row.team, "DAL");
        assert_eq!(row.salary, 112_000.0);
        assert_eq!(row.stat("PTS"), Some(17.9));
        assert!(result.unmatched_salary.is_empty());
        assert!(result.unmatched_stats.is_empty());
    }

    #[test]
    fn test_unmatched_players_are_excluded_and_reported() {
        let salaries = vec![
            salary("Kevin", "Durant", 30_000_000.0),
            salary("Nene", "Hilario", 3_600_000.0),
        ];
        let stat_rows = vec![stats("Kevin Durant", "GSW", 26.0), stats("Nenê", "HOU", 3.0)];
        let result = join_league(League::Nba, &salaries, &stat_rows, "</strong");

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].player, "Kevin Durant");
        assert_eq!(result.unmatched_salary, vec!["Nene Hilario".to_string()]);
        assert_eq!(result.unmatched_stats, vec!["Nenê".to_string()]);
    }

    #[test]
    fn test_preserves_salary_order() {
        let salaries = vec![salary("B", "Two", 2.0), salary("A", "One", 1.0)];
        let stat_rows = vec![stats("A One", "X", 1.0), stats("B Two", "Y", 2.0)];
        let result = join_league(League::Nba, &salaries, &stat_rows, "</strong");
        let names: Vec<&str> = result.records.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, vec!["B Two", "A One"]);
    }

    #[test]
    fn test_duplicate_stats_rows_use_first() {
        let salaries = vec![salary("Jimmy", "Butler", 20_000_000.0)];
        let stat_rows = vec![
            stats("Jimmy Butler", "TOT", 18.7),
            stats("Jimmy Butler", "MIN", 21.3),
            stats("Jimmy Butler", "PHI", 18.2),
        ];
        let result = join_league(League::Nba, &salaries, &stat_rows, "</strong");
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].team, "TOT");
        assert_eq!(result.duplicate_stats, 2);
        assert_eq!(result.summary().joined, 1);
    }

    #[test]
    fn test_empty_join_is_not_an_error() {
        let result = join_league(League::Wnba, &[salary("No", "Body", 1.0)], &[], "</strong");
        assert!(result.records.is_empty());
        assert_eq!(result.unmatched_salary.len(), 1);
    }
}
