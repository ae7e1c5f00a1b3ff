//! HTTP surface: `GET /pokemon/details/:name`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::future::Future;
use std::io;
use tracing::{info, warn};

use crate::error::FetchError;
use crate::fetch::{name_variables, GraphqlClient};
use crate::models::PokemonSummary;
use crate::query::POKEMON_DETAILS_QUERY;

#[derive(Debug, Clone)]
pub struct AppState {
    pub client: GraphqlClient,
}

impl AppState {
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }
}

/// Outcome of a lookup that reached the upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsLookup {
    Found(Vec<PokemonSummary>),
    NotFound(PokemonSummary),
}

impl DetailsLookup {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Found(_) => StatusCode::OK,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn into_body(self) -> Vec<PokemonSummary> {
        match self {
            Self::Found(list) => list,
            Self::NotFound(sentinel) => vec![sentinel],
        }
    }
}

/// Look up `name` case-insensitively. An empty match is a valid result, not an error.
pub async fn lookup_details(
    client: &GraphqlClient,
    name: &str,
) -> Result<DetailsLookup, FetchError> {
    let result = client
        .fetch(POKEMON_DETAILS_QUERY, &name_variables(&name.to_lowercase()))
        .await?;
    if result.species.is_empty() {
        return Ok(DetailsLookup::NotFound(PokemonSummary::not_found(name)));
    }
    Ok(DetailsLookup::Found(
        result.species.iter().map(PokemonSummary::from).collect(),
    ))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route("/pokemon/details/:name", get(pokemon_details_handler))
        .with_state(state)
}

async fn healthz_handler() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub async fn pokemon_details_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    match lookup_details(&state.client, &name).await {
        Ok(lookup) => {
            let status = lookup.status();
            if status == StatusCode::NOT_FOUND {
                warn!(%name, "no species matched");
            } else {
                info!(%name, "species details served");
            }
            (status, Json(lookup.into_body())).into_response()
        }
        Err(err) => {
            warn!(%name, error = %err, "species lookup failed");
            upstream_error_response(&err)
        }
    }
}

/// `{"error": {code, message, upstream_status?}}` for a failed lookup.
pub fn upstream_error_body(err: &FetchError) -> Value {
    let mut error = json!({
        "code": err.code(),
        "message": err.report(),
    });
    if let Some(status) = err.status() {
        error["upstream_status"] = json!(status);
    }
    json!({ "error": error })
}

pub(crate) fn upstream_error_response(err: &FetchError) -> Response {
    (StatusCode::BAD_GATEWAY, Json(upstream_error_body(err))).into_response()
}

/// Resolves once `signal` fires. If the handler could not be installed the
/// failure is logged and this never resolves, so the server keeps running.
pub async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutting down"),
        Err(err) => {
            warn!(error = %err, "could not listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
