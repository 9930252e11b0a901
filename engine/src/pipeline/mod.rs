// Cleaning pipeline: salary + per-game stats for each league -> one combined table.
pub mod join;
pub mod normalize;

use crate::config::PipelineSettings;
use crate::data::csv_parser::PlayerCsvParser;
use crate::error::EngineError;
use join::{join_league, LeagueJoin, LeagueJoinSummary};
use shared::models::{League, PlayerSalaryRecord, PlayerStatsRecord, UnifiedPlayerRecord};
use std::path::{Path, PathBuf};

/// Input files for one league.
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueSources {
    pub league: League,
    pub salary_path: PathBuf,
    pub stats_path: PathBuf,
    /// Name of the team column in the stats file; renamed to `Team` in the output.
    pub team_column: String,
}

impl LeagueSources {
    pub fn new(league: League, salary_path: impl Into<PathBuf>, stats_path: impl Into<PathBuf>) -> Self {
        LeagueSources {
            league,
            salary_path: salary_path.into(),
            stats_path: stats_path.into(),
            team_column: default_team_column(league).to_string(),
        }
    }

    /// NBA rows first, then WNBA, matching the published combined table.
    pub fn from_settings(settings: &PipelineSettings) -> Vec<LeagueSources> {
        vec![
            LeagueSources::new(League::Nba, &settings.nba_salary, &settings.nba_stats),
            LeagueSources::new(League::Wnba, &settings.wnba_salary, &settings.wnba_stats),
        ]
    }
}

/// basketball-reference exports use `Tm` for NBA and `Team` for WNBA.
pub fn default_team_column(league: League) -> &'static str {
    match league {
        League::Nba => "Tm",
        League::Wnba => "Team",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    pub records: Vec<UnifiedPlayerRecord>,
    pub leagues: Vec<LeagueJoinSummary>,
}

impl PipelineOutcome {
    pub fn dropped_rows(&self) -> usize {
        self.leagues.iter().map(|l| l.unmatched_salary.len()).sum()
    }
}

struct LoadedLeague {
    league: League,
    salaries: Vec<PlayerSalaryRecord>,
    stats: Vec<PlayerStatsRecord>,
}

fn load_league(sources: &LeagueSources) -> Result<LoadedLeague, EngineError> {
    tracing::info!(
        league = %sources.league,
        salary = %sources.salary_path.display(),
        stats = %sources.stats_path.display(),
        "Loading league sources"
    );
    Ok(LoadedLeague {
        league: sources.league,
        salaries: PlayerCsvParser::load_salaries(&sources.salary_path)?,
        stats: PlayerCsvParser::load_stats(&sources.stats_path, &sources.team_column)?,
    })
}

/// Joins each league and stacks the results in argument order.
pub fn combine_leagues(joins: Vec<LeagueJoin>) -> PipelineOutcome {
    let mut records = Vec::new();
    let mut leagues = Vec::new();
    for join in joins {
        leagues.push(join.summary());
        records.extend(join.records);
    }
    PipelineOutcome { records, leagues }
}

/// Loads every source before joining anything, so a missing or malformed file
/// aborts the run before any output exists.
pub fn build_unified_table(sources: &[LeagueSources], name_artifact: &str) -> Result<PipelineOutcome, EngineError> {
    let loaded = sources
        .iter()
        .map(load_league)
        .collect::<Result<Vec<_>, _>>()?;

    let joins = loaded
        .iter()
        .map(|l| {
            let join = join_league(l.league, &l.salaries, &l.stats, name_artifact);
            tracing::info!(league = %join.league, joined = join.records.len(), "Joined salary and stats");
            if !join.unmatched_salary.is_empty() || !join.unmatched_stats.is_empty() {
                tracing::warn!(
                    league = %join.league,
                    dropped_salary_rows = join.unmatched_salary.len(),
                    unmatched_stats_rows = join.unmatched_stats.len(),
                    "Players without a match were left out of the combined table"
                );
            }
            if join.duplicate_stats > 0 {
                tracing::debug!(league = %join.league, duplicates = join.duplicate_stats, "Duplicate stats rows ignored");
            }
            join
        })
        .collect();

    Ok(combine_leagues(joins))
}

/// Full run: build the combined table and write it to `output`, replacing any previous file.
pub fn run_pipeline(sources: &[LeagueSources], output: &Path, name_artifact: &str) -> Result<PipelineOutcome, EngineError> {
    let outcome = build_unified_table(sources, name_artifact)?;
    PlayerCsvParser::write_unified(output, &outcome.records)?;
    tracing::info!(
        path = %output.display(),
        rows = outcome.records.len(),
        dropped = outcome.dropped_rows(),
        "Combined table written"
    );
    Ok(outcome)
}
