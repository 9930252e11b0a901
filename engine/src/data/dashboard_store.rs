// Tables consumed by the presentation layer, loaded once and read-only afterwards.
use crate::config::PipelineSettings;
use crate::data::csv_parser::PlayerCsvParser;
use crate::error::EngineError;
use serde::Serialize;
use shared::models::{AttendanceRecord, League, LeagueRevenue, UnifiedPlayerRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LeagueFilter {
    Wnba,
    Nba,
    Both,
}

impl LeagueFilter {
    pub fn matches(&self, league: League) -> bool {
        match self {
            LeagueFilter::Wnba => league == League::Wnba,
            LeagueFilter::Nba => league == League::Nba,
            LeagueFilter::Both => true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardStore {
    players: Vec<UnifiedPlayerRecord>,
    revenue: Vec<LeagueRevenue>,
    attendance: Vec<AttendanceRecord>,
}

impl DashboardStore {
    pub fn new(
        players: Vec<UnifiedPlayerRecord>,
        revenue: Vec<LeagueRevenue>,
        attendance: Vec<AttendanceRecord>,
    ) -> Self {
        DashboardStore {
            players,
            revenue,
            attendance,
        }
    }

    /// Reads the combined table written by the pipeline plus the revenue and attendance tables.
    pub fn load(settings: &PipelineSettings) -> Result<Self, EngineError> {
        let players = PlayerCsvParser::load_unified(&settings.output)?;
        let revenue = PlayerCsvParser::load_league_revenue(&settings.league_revenue)?;
        let attendance = PlayerCsvParser::load_attendance(&settings.attendance)?;
        tracing::info!(
            players = players.len(),
            revenue_rows = revenue.len(),
            attendance_rows = attendance.len(),
            "Dashboard data loaded"
        );
        Ok(Self::new(players, revenue, attendance))
    }

    pub fn players(&self) -> &[UnifiedPlayerRecord] {
        &self.players
    }

    pub fn players_in(&self, filter: LeagueFilter) -> Vec<&UnifiedPlayerRecord> {
        self.players.iter().filter(|p| filter.matches(p.league)).collect()
    }

    pub fn revenue(&self) -> &[LeagueRevenue] {
        &self.revenue
    }

    pub fn revenue_for(&self, league: League) -> Option<&LeagueRevenue> {
        self.revenue.iter().find(|r| r.league == league)
    }

    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }
}
