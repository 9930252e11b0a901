// Handler for the league revenue cards
use crate::data::dashboard_store::DashboardStore;
use crate::error::EngineError;
use crate::services::RevenueCard;
use shared::models::LeagueRevenue;
use shared::utils::human_format;

pub fn revenue_cards(revenue: &[LeagueRevenue]) -> Result<Vec<RevenueCard>, EngineError> {
    revenue
        .iter()
        .map(|row| -> Result<RevenueCard, EngineError> {
            Ok(RevenueCard {
                league: row.league,
                total_revenue: human_format(row.total_year_revenue)?,
                revenue_share_ratio: row.revenue_share_ratio,
            })
        })
        .collect()
}

pub fn handle_revenue_cards(store: &DashboardStore) -> Result<Vec<RevenueCard>, EngineError> {
    if store.revenue().is_empty() {
        tracing::warn!("Revenue table is empty (handler)");
    }
    revenue_cards(store.revenue())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::League;
    use shared::utils::FormatError;

    #[test]
    fn test_revenue_cards_format_totals() {
        let cards = revenue_cards(&[
            LeagueRevenue { league: League::Wnba, total_year_revenue: 60_000_000.0, revenue_share_ratio: 0.2 },
            LeagueRevenue { league: League::Nba, total_year_revenue: 8_760_000_000.0, revenue_share_ratio: 0.5 },
        ])
        .unwrap();
        assert_eq!(cards[0].league, League::Wnba);
        assert_eq!(cards[0].total_revenue, "60M");
        assert_eq!(cards[1].total_revenue, "8.76B");
        assert_eq!(cards[1].revenue_share_ratio, 0.5);
    }

    #[test]
    fn test_revenue_cards_overflow_is_an_error() {
        let err = revenue_cards(&[LeagueRevenue {
            league: League::Nba,
            total_year_revenue: 2e15,
            revenue_share_ratio: 0.5,
        }])
        .unwrap_err();
        assert!(matches!(err, EngineError::Format(FormatError::MagnitudeOverflow { .. })));
    }
}
