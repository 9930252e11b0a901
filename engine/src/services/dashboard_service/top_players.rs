// Handler for the "top players by stat" charts
use std::cmp::Ordering;

use crate::data::dashboard_store::DashboardStore;
use crate::error::EngineError;
use crate::services::{StatLeader, TopPlayersRequest, TopPlayersResponse};
use shared::models::{stat_index, UnifiedPlayerRecord};

/// Missing values sort after every present value in either direction.
fn compare_values(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if descending => y.total_cmp(&x),
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The `limit` best players by `stat`, highest first. Ties keep table order.
pub fn top_players_by_stat<'a, I>(players: I, stat: &str, limit: usize) -> Result<Vec<StatLeader>, EngineError>
where
    I: IntoIterator<Item = &'a UnifiedPlayerRecord>,
{
    let idx = stat_index(stat).ok_or_else(|| EngineError::UnknownStat(stat.to_string()))?;

    let mut leaders: Vec<StatLeader> = players
        .into_iter()
        .map(|p| StatLeader {
            player: p.player.clone(),
            league: p.league,
            team: p.team.clone(),
            pos: p.pos.clone(),
            salary: p.salary,
            value: p.stats[idx],
        })
        .collect();
    leaders.sort_by(|a, b| compare_values(a.value, b.value, true));
    leaders.truncate(limit);
    Ok(leaders)
}

pub fn handle_top_players(
    request: TopPlayersRequest,
    store: &DashboardStore,
) -> Result<TopPlayersResponse, EngineError> {
    tracing::debug!(stat = %request.stat, "Handling TopPlayersRequest in dedicated handler");

    let by_stat = match top_players_by_stat(store.players_in(request.league), &request.stat, request.limit) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(stat = %request.stat, error_detail = ?e, "Unknown stat requested (handler)");
            return Err(e);
        }
    };

    let mut by_salary = by_stat.clone();
    by_salary.sort_by(|a, b| compare_values(a.value, b.value, false));

    Ok(TopPlayersResponse {
        stat: request.stat,
        league: request.league,
        by_stat,
        by_salary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dashboard_store::LeagueFilter;
    use shared::models::{League, StatLine, STAT_COUNT};

    fn player(name: &str, league: League, ast: Option<f64>) -> UnifiedPlayerRecord {
        let mut stats: StatLine = [Some(0.0); STAT_COUNT];
        stats[stat_index("AST").unwrap()] = ast;
        UnifiedPlayerRecord {
            player: name.to_string(),
            league,
            team: "T".to_string(),
            pos: "G".to_string(),
            salary: 100.0,
            stats,
        }
    }

    fn names(rows: &[StatLeader]) -> Vec<&str> {
        rows.iter().map(|r| r.player.as_str()).collect()
    }

    #[test]
    fn test_sorted_descending_with_missing_last() {
        let players = vec![
            player("A", League::Nba, Some(5.0)),
            player("B", League::Nba, None),
            player("C", League::Wnba, Some(9.0)),
            player("D", League::Wnba, Some(5.0)),
        ];
        let top = top_players_by_stat(&players, "AST", 10).unwrap();
        assert_eq!(names(&top), vec!["C", "A", "D", "B"]);
    }

    #[test]
    fn test_limit_applies_after_sorting() {
        let players: Vec<_> = (0..15)
            .map(|i| player(&format!("P{i}"), League::Nba, Some(i as f64)))
            .collect();
        let top = top_players_by_stat(&players, "AST", 10).unwrap();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].player, "P14");
        assert_eq!(top[9].player, "P5");
    }

    #[test]
    fn test_unknown_stat() {
        let players = vec![player("A", League::Nba, Some(1.0))];
        let err = top_players_by_stat(&players, "DUNKS", 10).unwrap_err();
        assert!(matches!(err, EngineError::UnknownStat(ref s) if s == "DUNKS"));
    }

    #[test]
    fn test_handle_top_players_filters_league_and_orders_salary_chart() {
        let store = DashboardStore::new(
            vec![
                player("A", League::Nba, Some(11.0)),
                player("B", League::Wnba, Some(6.9)),
                player("C", League::Wnba, Some(5.2)),
            ],
            Vec::new(),
            Vec::new(),
        );
        let response = handle_top_players(
            TopPlayersRequest { league: LeagueFilter::Wnba, stat: "AST".to_string(), limit: 10 },
            &store,
        )
        .unwrap();
        assert_eq!(names(&response.by_stat), vec!["B", "C"]);
        assert_eq!(names(&response.by_salary), vec!["C", "B"]);
        assert!(response.by_stat.iter().all(|r| r.league == League::Wnba));
    }
}
