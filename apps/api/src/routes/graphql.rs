//! GraphQL HTTP handlers
//!
//! Every operation gets its own [`Loaders`] registry and cancellation token.
//! The token is cancelled when the handler future is dropped (the client went
//! away) or when the operation exceeds its deadline, which fails any pending
//! batch with CANCELLED and drops in-flight loader queries.

use std::time::Duration;

use async_graphql::{ErrorExtensions, Pos};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use red_airlines_batch_loader::BatchConfig;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::error::ApiError;
use crate::graphql::{Loaders, RedAirlinesSchema};

/// Shared state for the GraphQL endpoint
#[derive(Clone)]
pub struct GraphQLState {
    pub schema: RedAirlinesSchema,
    /// Pool handed to each request's loaders
    pub pool: PgPool,
    pub batch_config: BatchConfig,
    /// Deadline for one operation
    pub request_timeout: Duration,
}

/// Create GraphQL router (`POST /`, `GET /playground`)
pub fn graphql_router(state: GraphQLState) -> Router {
    Router::new()
        .route("/", post(graphql_handler))
        .route("/playground", get(graphql_playground))
        .with_state(state)
}

/// Execute one GraphQL operation with a fresh loader registry
async fn graphql_handler(
    State(state): State<GraphQLState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let loaders = Loaders::new(state.pool.clone(), &state.batch_config, cancel.clone());
    let request = req.into_inner().data(loaders);

    match tokio::time::timeout(state.request_timeout, state.schema.execute(request)).await {
        Ok(response) => response.into(),
        Err(_) => {
            cancel.cancel();
            let secs = state.request_timeout.as_secs();
            tracing::warn!(timeout_secs = secs, "GraphQL request timed out");

            let error = ApiError::Timeout(secs)
                .extend()
                .into_server_error(Pos::default());
            async_graphql::Response::from_errors(vec![error]).into()
        }
    }
}

/// GraphQL Playground handler for development
async fn graphql_playground() -> impl IntoResponse {
    Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}
