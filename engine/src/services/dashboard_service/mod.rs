// Query side of the dashboard. Holds the store loaded at startup and
// dispatches each request to its handler module.
use super::{
    AttendanceRequest, AttendanceResponse, RevenueCard, TopPlayersRequest, TopPlayersResponse,
};
use crate::config::PipelineSettings;
use crate::data::dashboard_store::DashboardStore;
use crate::error::EngineError;

pub mod attendance;
pub mod revenue_cards;
pub mod top_players;

pub struct DashboardService {
    store: DashboardStore,
    settings: PipelineSettings,
}

impl DashboardService {
    pub fn new(store: DashboardStore, settings: PipelineSettings) -> Self {
        DashboardService { store, settings }
    }

    pub fn load(settings: PipelineSettings) -> Result<Self, EngineError> {
        let store = DashboardStore::load(&settings)?;
        Ok(Self::new(store, settings))
    }

    pub fn store(&self) -> &DashboardStore {
        &self.store
    }

    pub fn top_players(&self, request: TopPlayersRequest) -> Result<TopPlayersResponse, EngineError> {
        tracing::info!(
            league = ?request.league,
            stat = %request.stat,
            limit = request.limit,
            "Received TopPlayersRequest, dispatching to handler."
        );
        top_players::handle_top_players(request, &self.store)
    }

    pub fn revenue_cards(&self) -> Result<Vec<RevenueCard>, EngineError> {
        tracing::info!("Received RevenueCards request, dispatching to handler.");
        revenue_cards::handle_revenue_cards(&self.store)
    }

    pub fn attendance(&self, request: AttendanceRequest) -> AttendanceResponse {
        tracing::info!(team = ?request.team, "Received AttendanceRequest, dispatching to handler.");
        attendance::handle_attendance(
            request,
            &self.store,
            self.settings.attendance_season,
            &self.settings.excluded_teams,
        )
    }
}
