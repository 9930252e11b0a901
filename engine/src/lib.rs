// Engine library root: cleaning pipeline plus the data/query layer the dashboard reads from.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod services;

pub use config::PipelineSettings;
pub use data::dashboard_store::{DashboardStore, LeagueFilter};
pub use error::EngineError;
pub use pipeline::{build_unified_table, run_pipeline, LeagueSources, PipelineOutcome};
pub use services::dashboard_service::DashboardService;
