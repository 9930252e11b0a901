// Request/response types and handlers behind each CLI command.
pub mod dashboard_service;

use crate::data::dashboard_store::LeagueFilter;
use serde::Serialize;
use shared::models::{AttendanceRecord, League};

#[derive(Debug, Clone, PartialEq)]
pub struct TopPlayersRequest {
    pub league: LeagueFilter,
    pub stat: String,
    pub limit: usize,
}

/// One bar of the "top players" charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatLeader {
    pub player: String,
    pub league: League,
    pub team: String,
    pub pos: String,
    pub salary: f64,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPlayersResponse {
    pub stat: String,
    pub league: LeagueFilter,
    /// Highest value first.
    pub by_stat: Vec<StatLeader>,
    /// Same players, lowest value first, for the salary chart.
    pub by_salary: Vec<StatLeader>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueCard {
    pub league: League,
    pub total_revenue: String,
    pub revenue_share_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttendanceRequest {
    pub team: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceResponse {
    pub season: i32,
    pub team: Option<String>,
    pub games: Vec<AttendanceRecord>,
    pub total_attendance: u64,
}
