// salary-gap entry point
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use engine::pipeline::join::LeagueJoinSummary;
use engine::services::{AttendanceRequest, TopPlayersRequest};
use engine::{run_pipeline, DashboardService, LeagueFilter, LeagueSources, PipelineSettings};
use serde::Serialize;
use tracing::info;

/// Command-line arguments for salary-gap
#[derive(Parser, Debug)]
#[command(name = "salary-gap")]
#[command(about = "Combine WNBA/NBA salary and per-game stats and query the result")]
#[command(version)]
struct Args {
    /// JSON settings file; the bundled defaults are used when omitted
    #[arg(short, long, env = "SALARY_GAP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Join salaries with per-game stats and write the combined table
    Clean,
    /// Top players by a per-game statistic, with their salaries
    Top {
        #[arg(short, long, value_enum, default_value = "both")]
        league: LeagueFilter,
        /// Statistic column, e.g. PTS, AST, FG%
        #[arg(short, long, default_value = "G")]
        stat: String,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Total revenue and revenue share ratio per league
    Revenue,
    /// Season attendance, for every team or a single one
    Attendance {
        #[arg(short, long)]
        team: Option<String>,
    },
}

#[derive(Serialize)]
struct CleanReport {
    output: String,
    rows: usize,
    leagues: Vec<LeagueJoinSummary>,
}

fn load_settings(path: Option<&PathBuf>) -> Result<PipelineSettings> {
    let settings = match path {
        Some(path) => PipelineSettings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => PipelineSettings::load_default().context("Failed to load bundled settings")?,
    };
    Ok(settings)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let settings = load_settings(args.config.as_ref())?;
    info!(output = %settings.output.display(), "Settings loaded");

    match args.command {
        Command::Clean => {
            let sources = LeagueSources::from_settings(&settings);
            let outcome = run_pipeline(&sources, &settings.output, &settings.name_artifact)
                .context("Cleaning pipeline failed")?;
            print_json(&CleanReport {
                output: settings.output.display().to_string(),
                rows: outcome.records.len(),
                leagues: outcome.leagues,
            })?;
        }
        Command::Top { league, stat, limit } => {
            let limit = limit.unwrap_or(settings.top_n);
            let service = DashboardService::load(settings).context("Failed to load dashboard data")?;
            let response = service.top_players(TopPlayersRequest { league, stat, limit })?;
            print_json(&response)?;
        }
        Command::Revenue => {
            let service = DashboardService::load(settings).context("Failed to load dashboard data")?;
            print_json(&service.revenue_cards()?)?;
        }
        Command::Attendance { team } => {
            let service = DashboardService::load(settings).context("Failed to load dashboard data")?;
            print_json(&service.attendance(AttendanceRequest { team }))?;
        }
    }

    Ok(())
}
