//! Fares-by-flight bulk fetch
//!
//! Loads every fare of every requested flight in one query and groups the
//! rows by `flight_id`. Within a flight, fares are ordered cheapest first.

use red_airlines_batch_loader::BulkFetcher;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::FetchError;
use crate::models::Fare;
use crate::repositories::utils::FARE_COLUMNS;

/// Bulk fetcher for the fares of each flight
#[derive(Clone)]
pub struct FaresByFlightLoader {
    pool: PgPool,
}

impl FaresByFlightLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BulkFetcher<Uuid> for FaresByFlightLoader {
    type Value = Vec<Fare>;
    type Error = FetchError;

    async fn fetch(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT {} FROM fares WHERE flight_id = ANY($1) ORDER BY price ASC, fare_class ASC",
            FARE_COLUMNS
        );
        let fares: Vec<Fare> = sqlx::query_as(&sql)
            .bind(keys)
            .fetch_all(&self.pool)
            .await?;

        Ok(group_by_flight(fares))
    }
}

/// Group fares by flight, keeping query order within each group
fn group_by_flight(fares: Vec<Fare>) -> HashMap<Uuid, Vec<Fare>> {
    let mut result: HashMap<Uuid, Vec<Fare>> = HashMap::new();
    for fare in fares {
        result.entry(fare.flight_id).or_default().push(fare);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fare(flight_id: Uuid, fare_class: &str, price: f64) -> Fare {
        Fare {
            id: Uuid::new_v4(),
            flight_id,
            fare_class: fare_class.to_string(),
            price,
            baggage_allowance: 0,
            is_refundable: false,
            is_changeable: false,
            available_seats: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_group_by_flight_keeps_order() {
        let f1 = Uuid::new_v4();
        let f2 = Uuid::new_v4();
        let rows = vec![
            fare(f1, "Promo", 99.0),
            fare(f2, "Promo", 120.0),
            fare(f1, "Basic", 149.0),
            fare(f1, "Pro", 299.0),
        ];

        let grouped = group_by_flight(rows);

        let classes: Vec<&str> = grouped[&f1].iter().map(|f| f.fare_class.as_str()).collect();
        assert_eq!(classes, vec!["Promo", "Basic", "Pro"]);
        assert_eq!(grouped[&f2].len(), 1);
    }

    #[test]
    fn test_group_by_flight_empty() {
        assert!(group_by_flight(Vec::new()).is_empty());
    }
}
