// Pipeline settings: input/output locations and the few knobs the cleaning step needs.
// Loaded from JSON; keys missing from a user file fall back to `Default`.
use crate::error::EngineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    pub wnba_salary: PathBuf,
    pub nba_salary: PathBuf,
    pub wnba_stats: PathBuf,
    pub nba_stats: PathBuf,
    /// Combined table written by the pipeline and read back by the dashboard store.
    pub output: PathBuf,
    pub league_revenue: PathBuf,
    pub attendance: PathBuf,
    /// Markup left behind in scraped player names.
    pub name_artifact: String,
    pub attendance_season: i32,
    /// Pseudo-teams (all-star squads) kept out of the attendance view.
    pub excluded_teams: Vec<String>,
    pub top_n: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            wnba_salary: PathBuf::from("data/cleaned_wnba_player_salary_data.csv"),
            nba_salary: PathBuf::from("data/cleaned_nba_player_salary_data.csv"),
            wnba_stats: PathBuf::from("data/WNBA_pergamestats_2019.csv"),
            nba_stats: PathBuf::from("data/NBA_pergamestats_2019.csv"),
            output: PathBuf::from("data/statspergame_salary_wnba_nba_2019.csv"),
            league_revenue: PathBuf::from("data/league_revenue.csv"),
            attendance: PathBuf::from("data/wnba_attendance.csv"),
            name_artifact: "</strong".to_string(),
            attendance_season: 2019,
            excluded_teams: vec!["Team Wilson".to_string()],
            top_n: 10,
        }
    }
}

impl PipelineSettings {
    /// Settings bundled with the binary.
    pub fn load_default() -> Result<Self, EngineError> {
        let config_str = include_str!("../../config/default.json");
        Self::from_json(config_str)
    }

    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let config_str = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        Self::from_json(&config_str)
    }

    pub fn from_json(config_str: &str) -> Result<Self, EngineError> {
        let settings: PipelineSettings = serde_json::from_str(config_str)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.top_n == 0 {
            return Err(EngineError::ConfigError("top_n must be greater than 0".to_string()));
        }
        if self.name_artifact.is_empty() {
            return Err(EngineError::ConfigError("name_artifact cannot be empty".to_string()));
        }
        Ok(())
    }
}
