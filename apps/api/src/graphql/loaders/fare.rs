//! Fares-by-id bulk fetch

use red_airlines_batch_loader::BulkFetcher;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::FetchError;
use crate::models::Fare;
use crate::repositories::utils::FARE_COLUMNS;

/// Bulk fetcher for fares keyed by fare id
#[derive(Clone)]
pub struct FareLoader {
    pool: PgPool,
}

impl FareLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BulkFetcher<Uuid> for FareLoader {
    type Value = Option<Fare>;
    type Error = FetchError;

    async fn fetch(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!("SELECT {} FROM fares WHERE id = ANY($1)", FARE_COLUMNS);
        let fares: Vec<Fare> = sqlx::query_as(&sql)
            .bind(keys)
            .fetch_all(&self.pool)
            .await?;

        Ok(fares.into_iter().map(|f| (f.id, Some(f))).collect())
    }
}
