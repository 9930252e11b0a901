// Handler for the season attendance chart
use crate::data::dashboard_store::DashboardStore;
use crate::services::{AttendanceRequest, AttendanceResponse};
use shared::models::AttendanceRecord;

/// Games of one season without the excluded pseudo-teams, ordered by team (stable).
pub fn season_attendance(records: &[AttendanceRecord], season: i32, excluded_teams: &[String]) -> Vec<AttendanceRecord> {
    let mut rows: Vec<AttendanceRecord> = records
        .iter()
        .filter(|r| r.season == season)
        .filter(|r| !excluded_teams.iter().any(|t| *t == r.team))
        .cloned()
        .collect();
    rows.sort_by(|a, b| a.team.cmp(&b.team));
    rows
}

pub fn team_attendance(rows: &[AttendanceRecord], team: &str) -> Vec<AttendanceRecord> {
    rows.iter().filter(|r| r.team == team).cloned().collect()
}

pub fn handle_attendance(
    request: AttendanceRequest,
    store: &DashboardStore,
    season: i32,
    excluded_teams: &[String],
) -> AttendanceResponse {
    let season_rows = season_attendance(store.attendance(), season, excluded_teams);
    let games = match request.team.as_deref() {
        None => {
            tracing::debug!(season, "No team selected, returning every team");
            season_rows
        }
        Some(team) => {
            let rows = team_attendance(&season_rows, team);
            if rows.is_empty() {
                tracing::warn!(season, team, "No attendance rows for team");
            }
            rows
        }
    };
    let total_attendance = games.iter().map(|g| u64::from(g.attendance)).sum();

    AttendanceResponse {
        season,
        team: request.team,
        games,
        total_attendance,
    }
}
