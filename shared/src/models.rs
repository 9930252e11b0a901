use serde::{Deserialize, Serialize};
use std::fmt;

pub const STAT_COUNT: usize = 23;

/// Per-game statistic columns, in the order they appear in the combined table.
pub const STAT_COLUMNS: [&str; STAT_COUNT] = [
    "G", "GS", "MP", "FG", "FGA", "FG%", "3P", "3PA", "3P%", "2P", "2PA", "2P%", "FT", "FTA",
    "FT%", "ORB", "TRB", "AST", "STL", "BLK", "TOV", "PF", "PTS",
];

/// Leading identity columns of the combined table.
pub const IDENTITY_COLUMNS: [&str; 5] = ["Player", "League", "Team", "Pos", "salary"];

/// One value per entry of `STAT_COLUMNS`. Blank cells (e.g. `3P%` with no attempts) are `None`.
pub type StatLine = [Option<f64>; STAT_COUNT];

/// Full header of the combined table: identity columns followed by the stat columns.
pub fn unified_columns() -> Vec<&'static str> {
    IDENTITY_COLUMNS
        .iter()
        .chain(STAT_COLUMNS.iter())
        .copied()
        .collect()
}

/// Position of a stat column inside a `StatLine`.
pub fn stat_index(column: &str) -> Option<usize> {
    STAT_COLUMNS.iter().position(|c| *c == column)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum League {
    #[serde(rename = "WNBA")]
    Wnba,
    #[serde(rename = "NBA")]
    Nba,
}

impl League {
    pub fn label(&self) -> &'static str {
        match self {
            League::Wnba => "WNBA",
            League::Nba => "NBA",
        }
    }

    pub fn from_label(label: &str) -> Option<League> {
        match label.trim() {
            "WNBA" => Some(League::Wnba),
            "NBA" => Some(League::Nba),
            _ => None,
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A salary row after the full name has been built from `first_name` and `last_name`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSalaryRecord {
    pub first_name: String,
    pub last_name: String,
    pub salary: f64,
}

impl PlayerSalaryRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A per-game stats row. `player` is kept exactly as read; cleaning happens in the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStatsRecord {
    pub player: String,
    pub team: String,
    pub pos: String,
    pub stats: StatLine,
}

/// One row of the combined WNBA/NBA table.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedPlayerRecord {
    pub player: String,
    pub league: League,
    pub team: String,
    pub pos: String,
    pub salary: f64,
    pub stats: StatLine,
}

impl UnifiedPlayerRecord {
    /// Value of a stat column, `None` for unknown columns or blank cells.
    pub fn stat(&self, column: &str) -> Option<f64> {
        stat_index(column).and_then(|idx| self.stats[idx])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueRevenue {
    pub league: League,
    pub total_year_revenue: f64,
    pub revenue_share_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub season: i32,
    pub team: String,
    pub opponent: String,
    pub attendance: u32,
}
