//! Flight search queries

use async_graphql::{Context, Object, Result, ID};

use crate::error::to_graphql_error;
use crate::graphql::pagination::{clamp_limit, MAX_LIMIT};
use crate::graphql::parse_id;
use crate::graphql::types::Flight;
use crate::repositories::utils::normalize_airport_code;
use crate::repositories::FlightRepository;

/// Flight and airport queries
#[derive(Default)]
pub struct FlightQuery;

#[Object]
impl FlightQuery {
    /// Search flights by route, earliest departure first
    async fn flights(
        &self,
        ctx: &Context<'_>,
        origin: Option<String>,
        destination: Option<String>,
        #[graphql(default = 50)] limit: i32,
    ) -> Result<Vec<Flight>> {
        let repo = ctx.data::<FlightRepository>()?;
        let origin = normalize_filter(origin);
        let destination = normalize_filter(destination);

        let flights = repo
            .search(
                origin.as_deref(),
                destination.as_deref(),
                clamp_limit(limit, MAX_LIMIT),
            )
            .await
            .map_err(to_graphql_error)?;
        Ok(flights.into_iter().map(Flight::from).collect())
    }

    /// Get a flight by ID
    async fn flight(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Flight>> {
        let repo = ctx.data::<FlightRepository>()?;
        let flight_id = parse_id(&id, "flight").map_err(to_graphql_error)?;
        let flight = repo.find_by_id(flight_id).await.map_err(to_graphql_error)?;
        Ok(flight.map(Flight::from))
    }

    /// Airport codes served by at least one flight
    async fn airports(&self, ctx: &Context<'_>) -> Result<Vec<String>> {
        let repo = ctx.data::<FlightRepository>()?;
        repo.airports().await.map_err(to_graphql_error)
    }
}

/// Blank filters mean "any airport"
fn normalize_filter(code: Option<String>) -> Option<String> {
    code.map(|c| normalize_airport_code(&c))
        .filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_filter() {
        assert_eq!(normalize_filter(Some("gru".to_string())), Some("GRU".to_string()));
        assert_eq!(normalize_filter(Some("  ".to_string())), None);
        assert_eq!(normalize_filter(None), None);
    }
}
